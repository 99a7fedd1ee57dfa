use bytes::Bytes;
use redwire_resp::{from_token, Error, FromToken, Kind, Result, Token};

/// Information about a subscription, returned from `(p)(un)subscribe`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
	/// The name of this channel.
	pub channel: Bytes,
	/// The number of remaining subscriptions on this connection.
	pub count: i64,
}

impl Subscription {
	/// Whether the connection is still in PubSub mode. When this is false,
	/// the connection can be reused as a normal connection.
	pub fn is_in_pubsub_mode(&self) -> bool {
		self.count > 0
	}
}

/// A message received from a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
	/// The pattern which was matched (only for `pmessage`).
	pub pattern: Option<Bytes>,
	/// The channel this message was received from.
	pub channel: Bytes,
	/// The data that was published.
	pub payload: Bytes,
}

/// A server push received while in PubSub mode. Once a
/// [Connection](crate::Connection) enters PubSub mode, every token it streams
/// can be converted into this enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
	/// Subscribed to a channel.
	Subscribe(Subscription),
	/// Unsubscribed from a channel.
	Unsubscribe(Subscription),
	/// Received a new message from one of the channels currently subscribed
	/// to.
	Message(Message),
}

fn field<T: FromToken>(items: &[Token], idx: usize) -> Result<T> {
	items
		.get(idx)
		.cloned()
		.ok_or_else(|| Error::unexpected(Kind::Push, Token::Push(items.to_vec())))
		.and_then(from_token)
}

impl FromToken for Event {
	fn from_token(token: Token) -> Result<Self> {
		let items = match token {
			// RESP2 servers deliver pushes as plain arrays
			Token::Push(items) | Token::Array(items) => items,
			other => return Err(Error::unexpected(Kind::Push, other)),
		};

		let kind: String = field(&items, 0)?;
		match kind.as_str() {
			"subscribe" | "psubscribe" => Ok(Event::Subscribe(Subscription {
				channel: field(&items, 1)?,
				count: field(&items, 2)?,
			})),
			"unsubscribe" | "punsubscribe" => Ok(Event::Unsubscribe(Subscription {
				channel: field(&items, 1)?,
				count: field(&items, 2)?,
			})),
			"message" => Ok(Event::Message(Message {
				pattern: None,
				channel: field(&items, 1)?,
				payload: field(&items, 2)?,
			})),
			"pmessage" => Ok(Event::Message(Message {
				pattern: Some(field(&items, 1)?),
				channel: field(&items, 2)?,
				payload: field(&items, 3)?,
			})),
			_ => Err(Error::unexpected(Kind::Push, Token::Push(items))),
		}
	}
}
