use std::{
	collections::VecDeque,
	pin::Pin,
	task::{Context, Poll},
};

use bytes::BytesMut;
use futures::{Sink, Stream};
use redwire::{
	resp::{Command, Token},
	Error,
};

/// A scripted transport: records outbound command bytes and plays back a
/// queue of reply tokens. With [MockTransport::delayed], every reply yields
/// to the scheduler once before arriving, simulating network latency.
#[derive(Debug)]
pub struct MockTransport {
	pub written: BytesMut,
	pub flushes: usize,
	replies: VecDeque<Token>,
	delay: bool,
	parked: bool,
}

impl MockTransport {
	pub fn new(replies: impl IntoIterator<Item = Token>) -> Self {
		Self {
			written: BytesMut::new(),
			flushes: 0,
			replies: replies.into_iter().collect(),
			delay: false,
			parked: false,
		}
	}

	pub fn delayed(replies: impl IntoIterator<Item = Token>) -> Self {
		Self {
			delay: true,
			..Self::new(replies)
		}
	}
}

impl Sink<Command> for MockTransport {
	type Error = Error;

	fn poll_ready(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), Error>> {
		Poll::Ready(Ok(()))
	}

	fn start_send(self: Pin<&mut Self>, item: Command) -> Result<(), Error> {
		self.get_mut().written.extend_from_slice(item.as_bytes());
		Ok(())
	}

	fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), Error>> {
		self.get_mut().flushes += 1;
		Poll::Ready(Ok(()))
	}

	fn poll_close(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), Error>> {
		Poll::Ready(Ok(()))
	}
}

impl Stream for MockTransport {
	type Item = Result<Token, Error>;

	fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
		let this = self.get_mut();

		if this.delay && !this.parked {
			this.parked = true;
			cx.waker().wake_by_ref();
			return Poll::Pending;
		}

		this.parked = false;
		Poll::Ready(this.replies.pop_front().map(Ok))
	}
}
