use std::{
	pin::Pin,
	task::{Context, Poll},
};

use futures::{Sink, SinkExt, Stream, TryStreamExt};
use pin_project_lite::pin_project;
use redwire_resp::{Command, Token};
use tracing::{debug, trace};

use crate::error::{Error, Result};

pin_project! {
	/// A connection to a Redis-compatible server over an established
	/// transport.
	///
	/// The transport supplies the outbound command sink and an inbound
	/// source of already-decoded reply [Token]s; replies correlate with
	/// commands by arrival order alone, so at most one operation may be
	/// consuming the inbound source at any time (`&mut self` enforces this
	/// within one connection).
	///
	/// Dropping an in-flight [send](Self::send) or
	/// [pipeline](Self::pipeline) future leaves replies owed on the wire
	/// that no longer line up with any request. The connection tracks this:
	/// once it happens, every later operation fails with [Error::Closed]
	/// and the transport is closed.
	///
	/// To enter PubSub mode, send the appropriate subscription command using
	/// [Self::send_cmd()] and then consume the connection as a [Stream].
	#[derive(Debug)]
	pub struct Connection<T> {
		#[pin]
		transport: T,
		desynced: bool,
	}
}

impl<T> Connection<T> {
	/// Wrap an established transport.
	pub fn new(transport: T) -> Self {
		Self {
			transport,
			desynced: false,
		}
	}

	/// Consume this connection, returning the transport.
	pub fn into_inner(self) -> T {
		self.transport
	}
}

impl<T> Connection<T>
where
	T: Sink<Command, Error = Error> + Stream<Item = Result<Token>> + Unpin,
{
	/// Send a command to the server, awaiting a single reply.
	///
	/// Fails with [Error::Redis] if the server replies with an error and
	/// with [Error::Closed] if the inbound source ends first.
	///
	/// Dropping the returned future before it completes desynchronizes the
	/// reply stream; the connection then refuses all further operations
	/// with [Error::Closed].
	pub async fn send(&mut self, command: Command) -> Result<Token> {
		self.check_live().await?;

		self.desynced = true;
		self.transport.send(command).await?;
		let reply = self.read_reply().await?;
		self.desynced = false;

		match reply {
			Token::Error(message) => Err(Error::Redis(message)),
			token => Ok(token),
		}
	}

	/// Send a command without waiting for a reply.
	pub async fn send_cmd(&mut self, command: Command) -> Result<()> {
		self.check_live().await?;

		self.desynced = true;
		self.transport.send(command).await?;
		self.desynced = false;

		Ok(())
	}

	/// Send a batch of commands as one outbound flush, then read exactly one
	/// reply per command, matched by arrival position.
	///
	/// Error replies are returned in place rather than raised so that the
	/// remaining replies keep their positions; inspect the result with
	/// [Token::is_error]. Fails with [Error::Closed] if the inbound source
	/// ends before every reply has arrived.
	///
	/// Dropping the returned future before it completes desynchronizes the
	/// reply stream; the connection then refuses all further operations
	/// with [Error::Closed].
	pub async fn pipeline<I>(&mut self, commands: I) -> Result<Vec<Token>>
	where
		I: IntoIterator<Item = Command>,
	{
		self.check_live().await?;

		self.desynced = true;
		let mut sent = 0;
		for command in commands {
			self.transport.feed(command).await?;
			sent += 1;
		}
		self.transport.flush().await?;

		trace!(sent, "awaiting pipelined replies");

		let mut replies = Vec::with_capacity(sent);
		for _ in 0..sent {
			replies.push(self.read_reply().await?);
		}
		self.desynced = false;

		Ok(replies)
	}

	/// Close the outbound half of the transport.
	pub async fn close(&mut self) -> Result<()> {
		self.transport.close().await
	}

	/// Refuse to touch the wire once a cancelled or failed operation has
	/// left replies owed: they no longer line up with any request. Closes
	/// the transport on first detection.
	async fn check_live(&mut self) -> Result<()> {
		if self.desynced {
			debug!("refusing operation on desynchronized connection");
			let _ = self.transport.close().await;
			return Err(Error::Closed);
		}

		Ok(())
	}

	async fn read_reply(&mut self) -> Result<Token> {
		self.transport.try_next().await?.ok_or(Error::Closed)
	}
}

impl<T> Stream for Connection<T>
where
	T: Stream<Item = Result<Token>>,
{
	type Item = Result<Token>;

	fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
		let this = self.project();
		if *this.desynced {
			return Poll::Ready(Some(Err(Error::Closed)));
		}

		this.transport.poll_next(cx)
	}
}

impl<T> Sink<Command> for Connection<T>
where
	T: Sink<Command, Error = Error>,
{
	type Error = Error;

	fn poll_ready(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<()>> {
		self.project().transport.poll_ready(cx)
	}

	fn start_send(self: Pin<&mut Self>, item: Command) -> Result<()> {
		self.project().transport.start_send(item)
	}

	fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<()>> {
		self.project().transport.poll_flush(cx)
	}

	fn poll_close(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<()>> {
		self.project().transport.poll_close(cx)
	}
}
