use bytes::{BufMut, BytesMut};
use redwire_resp::Command;
use tokio_util::codec::Encoder;

use crate::Error;

/// Tokio [Encoder] for the outbound half of a transport, for use with
/// [FramedWrite](tokio_util::codec::FramedWrite).
///
/// There is no matching `Decoder`: inbound bytes are parsed into
/// [Token](redwire_resp::Token)s by an external decoder before they reach
/// this crate.
#[derive(Debug)]
pub struct Codec;

impl Encoder<Command> for Codec {
	type Error = Error;

	fn encode(&mut self, item: Command, dst: &mut BytesMut) -> Result<(), Self::Error> {
		dst.put_slice(item.as_bytes());
		Ok(())
	}
}
