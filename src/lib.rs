//! A pipelined RESP3 client core.
//!
//! Commands are framed with [resp::Command], sent over a [Connection] whose
//! transport hands back already-decoded reply [Token](resp::Token)s, and
//! converted into typed values with [resp::from_token]. Replies correlate
//! with commands by arrival order alone — RESP carries no request IDs.

/// Outbound framing for transport integration.
pub mod codec;
/// Items for talking to the server over an established transport.
pub mod connection;
/// Client errors.
pub mod error;
/// PubSub message model.
pub mod pubsub;

pub use connection::Connection;
pub use error::{Error, Result};
pub use redwire_resp as resp;
