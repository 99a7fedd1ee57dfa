use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use crate::Encode;

/// One fully-framed command: a RESP array of bulk strings, immutable once
/// built and ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command(Bytes);

impl Command {
	/// Frame an ordered argument list into a command.
	///
	/// The array header is written with a single-digit count placeholder and
	/// patched once every argument has reported how many elements it
	/// contributed, so optional arguments can be omitted without pre-scanning
	/// the list. Commands with 10 to 99 elements are re-framed into a wider
	/// header.
	///
	/// # Panics
	///
	/// Panics when the arguments contribute more than 99 top-level elements.
	/// The two-digit header is a hard cap of this framing scheme; exceeding
	/// it fails loudly rather than truncating the count.
	pub fn build(args: &[&dyn Encode]) -> Self {
		let mut buf = BytesMut::with_capacity(64);
		buf.put_slice(b"*0\r\n");

		let mut total = 0;
		for arg in args {
			total += arg.encode(&mut buf);
		}

		if total <= 9 {
			buf[1] = b'0' + total as u8;
		} else {
			assert!(
				total <= 99,
				"{total} top-level elements exceeds the 99-element frame cap"
			);
			trace!(total, "re-framing command with a two-digit element count");

			let mut wide = BytesMut::with_capacity(buf.len() + 1);
			wide.put_u8(b'*');
			wide.put_slice(total.to_string().as_bytes());
			wide.put_slice(b"\r\n");
			wide.put_slice(&buf[4..]);
			buf = wide;
		}

		Self(buf.freeze())
	}

	/// The framed wire bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	/// Consume the command, returning its wire bytes.
	pub fn into_bytes(self) -> Bytes {
		self.0
	}
}

/// Macro to build a [Command] from a variadic argument list.
///
/// Changes:
/// ```rust
/// # use redwire_resp::{Command, Encode};
/// Command::build(&[&"SET" as &dyn Encode, &"k", &"v"]);
/// ```
/// into
/// ```rust
/// # use redwire_resp::cmd;
/// cmd!["SET", "k", "v"];
/// ```
#[macro_export]
macro_rules! cmd {
	($($args:expr),+ $(,)?) => {
		$crate::Command::build(&[$(&$args as &dyn $crate::Encode),+])
	};
}

#[cfg(test)]
mod test {
	use crate::{Encode, Flag, Labeled};

	use super::Command;

	fn trivial(n: usize) -> Command {
		let args = vec!["a"; n];
		let refs: Vec<&dyn Encode> = args.iter().map(|arg| arg as &dyn Encode).collect();
		Command::build(&refs)
	}

	#[test]
	fn empty_command() {
		assert_eq!(trivial(0).as_bytes(), b"*0\r\n");
	}

	#[test]
	fn header_count_matches_arguments() {
		for n in [1, 9, 10, 50, 99] {
			let cmd = trivial(n);
			let expected: Vec<u8> = format!("*{n}\r\n{}", "$1\r\na\r\n".repeat(n)).into_bytes();

			assert_eq!(cmd.as_bytes(), expected, "count {n}");
		}
	}

	#[test]
	fn ten_arguments_reframed_exactly() {
		// crosses the single-digit placeholder, exercising the re-layout path
		let cmd = trivial(10);

		let mut reference = b"*10\r\n".to_vec();
		for _ in 0..10 {
			reference.extend_from_slice(b"$1\r\na\r\n");
		}

		assert_eq!(cmd.as_bytes(), reference);
	}

	#[test]
	#[should_panic(expected = "99-element frame cap")]
	fn hundred_arguments_panics() {
		trivial(100);
	}

	#[test]
	fn omitted_optionals_keep_count_exact() {
		let cmd = Command::build(&[
			&"SET",
			&"k",
			&"v",
			&Flag("NX", false),
			&Labeled("EX", None::<i64>),
		]);

		assert_eq!(cmd.as_bytes(), b"*3\r\n$3\r\nSET\r\n$1\r\nk\r\n$1\r\nv\r\n");
	}

	#[test]
	fn included_optionals_keep_count_exact() {
		let cmd = Command::build(&[&"SET", &"k", &"v", &Flag("NX", true), &Labeled("EX", Some(5i64))]);

		assert_eq!(
			cmd.as_bytes(),
			b"*6\r\n$3\r\nSET\r\n$1\r\nk\r\n$1\r\nv\r\n$2\r\nNX\r\n$2\r\nEX\r\n$1\r\n5\r\n"
		);
	}

	#[test]
	fn macro_matches_build() {
		let built = Command::build(&[&"GET" as &dyn Encode, &"k"]);

		assert_eq!(cmd!["GET", "k"], built);
		assert_eq!(built.as_bytes(), b"*2\r\n$3\r\nGET\r\n$1\r\nk\r\n");
	}
}
