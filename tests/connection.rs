use test_log::test;

use futures::TryStreamExt;
use redwire::{
	pubsub::Event,
	resp::{cmd, from_token, Token},
	Connection, Error, Result,
};

use crate::common::MockTransport;

mod common;

#[test(tokio::test)]
async fn send_awaits_single_reply() -> Result<()> {
	let mut conn = Connection::new(MockTransport::new([Token::simple("PONG")]));

	let res = conn.send(cmd!["PING"]).await?;
	assert_eq!(res, "PONG");

	let transport = conn.into_inner();
	assert_eq!(&transport.written[..], b"*1\r\n$4\r\nPING\r\n");

	Ok(())
}

#[test(tokio::test)]
async fn send_surfaces_server_error_verbatim() {
	let mut conn = Connection::new(MockTransport::new([Token::Error(
		"ERR unknown command 'foobar'".to_owned(),
	)]));

	let res = conn.send(cmd!["foobar"]).await;
	assert!(matches!(res, Err(Error::Redis(msg)) if msg == "ERR unknown command 'foobar'"));
}

#[test(tokio::test)]
async fn send_on_exhausted_source_is_closed() {
	let mut conn = Connection::new(MockTransport::new([]));

	let res = conn.send(cmd!["PING"]).await;
	assert!(matches!(res, Err(Error::Closed)));
}

#[test(tokio::test)]
async fn pipeline_preserves_arrival_order() -> Result<()> {
	let replies = (1..=5).map(|i| Token::blob(format!("r{i}").as_bytes()));
	let mut conn = Connection::new(MockTransport::delayed(replies));

	let commands = (1..=5).map(|i| cmd!["ECHO", format!("r{i}")]);
	let res = conn.pipeline(commands).await?;

	assert_eq!(res.len(), 5);
	for (i, token) in res.iter().enumerate() {
		assert_eq!(*token, format!("r{}", i + 1).as_bytes());
	}

	// all five commands went out in a single flush
	assert_eq!(conn.into_inner().flushes, 1);

	Ok(())
}

#[test(tokio::test)]
async fn pipeline_returns_error_tokens_in_place() -> Result<()> {
	let mut conn = Connection::new(MockTransport::new([
		Token::simple("OK"),
		Token::Error("ERR wrong number of arguments".to_owned()),
		Token::simple("OK"),
	]));

	let res = conn
		.pipeline([cmd!["SET", "a", "1"], cmd!["SET", "b"], cmd!["SET", "c", "3"]])
		.await?;

	assert_eq!(res.len(), 3);
	assert!(!res[0].is_error());
	assert!(res[1].is_error());
	assert!(!res[2].is_error());

	Ok(())
}

#[test(tokio::test)]
async fn pipeline_short_reply_stream_is_closed() {
	// three commands owed, the server disappears after two replies
	let mut conn = Connection::new(MockTransport::delayed([
		Token::simple("OK"),
		Token::simple("OK"),
	]));

	let res = conn
		.pipeline([cmd!["PING"], cmd!["PING"], cmd!["PING"]])
		.await;

	assert!(matches!(res, Err(Error::Closed)));
}

#[test(tokio::test)]
async fn cancelled_pipeline_closes_connection() {
	let mut conn = Connection::new(MockTransport::delayed([
		Token::simple("R1"),
		Token::simple("R2"),
	]));

	{
		let fut = conn.pipeline([cmd!["C1"], cmd!["C2"]]);
		futures::pin_mut!(fut);

		// commands written, replies still in flight; dropping the future
		// here abandons them on the wire
		assert!(futures::poll!(fut.as_mut()).is_pending());
	}

	// the cancelled batch's replies must never be attributed to a new
	// command: the connection is closed, not reused
	let res = conn.send(cmd!["C3"]).await;
	assert!(matches!(res, Err(Error::Closed)));

	let res = conn.pipeline([cmd!["C3"]]).await;
	assert!(matches!(res, Err(Error::Closed)));

	let res = conn.try_next().await;
	assert!(matches!(res, Err(Error::Closed)));
}

#[test(tokio::test)]
async fn completed_operations_keep_connection_usable() -> Result<()> {
	let mut conn = Connection::new(MockTransport::new([
		Token::simple("PONG"),
		Token::simple("PONG"),
	]));

	conn.send(cmd!["PING"]).await?;
	let res = conn.send(cmd!["PING"]).await?;
	assert_eq!(res, "PONG");

	Ok(())
}

#[test(tokio::test)]
async fn set_get_round_trip() -> Result<()> {
	let mut conn = Connection::new(MockTransport::new([
		Token::simple("OK"),
		Token::blob(b"v"),
	]));

	let res = conn.pipeline([cmd!["SET", "k", "v"], cmd!["GET", "k"]]).await?;

	let strings = res
		.into_iter()
		.map(from_token::<String>)
		.collect::<Result<Vec<_>, _>>()?;
	assert_eq!(strings, ["OK", "v"]);

	let transport = conn.into_inner();
	assert_eq!(
		&transport.written[..],
		b"*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$1\r\nv\r\n*2\r\n$3\r\nGET\r\n$1\r\nk\r\n"
	);

	Ok(())
}

#[test(tokio::test)]
async fn pubsub_stream() -> Result<()> {
	let mut conn = Connection::new(MockTransport::delayed([
		Token::Push(vec![
			Token::blob(b"subscribe"),
			Token::blob(b"foo"),
			Token::Integer(1),
		]),
		Token::Push(vec![
			Token::blob(b"message"),
			Token::blob(b"foo"),
			Token::blob(b"hello"),
		]),
	]));

	conn.send_cmd(cmd!["SUBSCRIBE", "foo"]).await?;

	// the connection is now an unbounded stream of push tokens
	let token = conn.try_next().await?.expect("subscription confirmation");
	assert!(matches!(
		from_token::<Event>(token)?,
		Event::Subscribe(sub) if sub.is_in_pubsub_mode()
	));

	let token = conn.try_next().await?.expect("published message");
	match from_token::<Event>(token)? {
		Event::Message(msg) => {
			assert_eq!(msg.channel, &b"foo"[..]);
			assert_eq!(msg.payload, &b"hello"[..]);
		}
		other => panic!("unexpected event {other:?}"),
	}

	Ok(())
}
