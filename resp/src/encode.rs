use std::time::{SystemTime, UNIX_EPOCH};

use bytes::{BufMut, Bytes, BytesMut};

/// A value that can append itself to a command buffer as zero or more
/// top-level RESP arguments.
///
/// Encoding is total over the types implemented here: it never fails, it only
/// writes bytes. The returned element count feeds the array header of
/// [Command::build](crate::Command::build) and must equal the number of
/// top-level elements actually written — wrappers like [Flag] and [Labeled]
/// contribute 0 when they write nothing.
pub trait Encode {
	/// Write this value into `dst`, returning the number of top-level
	/// elements contributed.
	fn encode(&self, dst: &mut BytesMut) -> usize;
}

/// Write one bulk string: `$<len>\r\n<bytes>\r\n`.
pub(crate) fn put_bulk(dst: &mut BytesMut, bytes: &[u8]) {
	dst.put_u8(b'$');
	dst.put_slice(bytes.len().to_string().as_bytes());
	dst.put_slice(b"\r\n");
	dst.put_slice(bytes);
	dst.put_slice(b"\r\n");
}

impl<T: Encode + ?Sized> Encode for &T {
	fn encode(&self, dst: &mut BytesMut) -> usize {
		(**self).encode(dst)
	}
}

impl Encode for str {
	fn encode(&self, dst: &mut BytesMut) -> usize {
		put_bulk(dst, self.as_bytes());
		1
	}
}

impl Encode for String {
	fn encode(&self, dst: &mut BytesMut) -> usize {
		self.as_str().encode(dst)
	}
}

impl Encode for [u8] {
	fn encode(&self, dst: &mut BytesMut) -> usize {
		put_bulk(dst, self);
		1
	}
}

impl<const N: usize> Encode for [u8; N] {
	fn encode(&self, dst: &mut BytesMut) -> usize {
		put_bulk(dst, self);
		1
	}
}

impl Encode for Vec<u8> {
	fn encode(&self, dst: &mut BytesMut) -> usize {
		put_bulk(dst, self);
		1
	}
}

impl Encode for Bytes {
	fn encode(&self, dst: &mut BytesMut) -> usize {
		put_bulk(dst, self);
		1
	}
}

macro_rules! encode_int {
	($($ty:ty),+) => {
		$(impl Encode for $ty {
			fn encode(&self, dst: &mut BytesMut) -> usize {
				put_bulk(dst, self.to_string().as_bytes());
				1
			}
		})+
	};
}

encode_int!(i32, i64, isize, u32, u64, usize);

impl Encode for f64 {
	fn encode(&self, dst: &mut BytesMut) -> usize {
		put_bulk(dst, self.to_string().as_bytes());
		1
	}
}

/// Encoded as seconds since the Unix epoch, fractional when the time is not
/// on a whole second. Times before the epoch clamp to 0.
impl Encode for SystemTime {
	fn encode(&self, dst: &mut BytesMut) -> usize {
		let elapsed = self.duration_since(UNIX_EPOCH).unwrap_or_default();
		if elapsed.subsec_nanos() == 0 {
			put_bulk(dst, elapsed.as_secs().to_string().as_bytes());
		} else {
			put_bulk(dst, elapsed.as_secs_f64().to_string().as_bytes());
		}

		1
	}
}

/// A Redis key. Encodes as a single bulk string, like any other byte
/// argument; the newtype keeps key positions visible at call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub Bytes);

impl Encode for Key {
	fn encode(&self, dst: &mut BytesMut) -> usize {
		put_bulk(dst, &self.0);
		1
	}
}

impl From<&str> for Key {
	fn from(str: &str) -> Self {
		Self(Bytes::copy_from_slice(str.as_bytes()))
	}
}

impl From<String> for Key {
	fn from(str: String) -> Self {
		Self(str.into_bytes().into())
	}
}

impl From<Bytes> for Key {
	fn from(bytes: Bytes) -> Self {
		Self(bytes)
	}
}

/// A pure flag argument like `NX` or `REPLACE`: emits its keyword when
/// enabled, otherwise nothing at all.
#[derive(Debug, Clone, Copy)]
pub struct Flag(pub &'static str, pub bool);

impl Encode for Flag {
	fn encode(&self, dst: &mut BytesMut) -> usize {
		if self.1 {
			put_bulk(dst, self.0.as_bytes());
			1
		} else {
			0
		}
	}
}

/// An optional argument introduced by a label, like `EX <seconds>` or
/// `MATCH <pattern>`.
///
/// When the value is absent nothing is written. When the value is present but
/// itself encodes to zero elements (an empty [List], a nested `None`), the
/// label is rolled back too: a label must never reach the wire with no
/// following argument.
#[derive(Debug, Clone)]
pub struct Labeled<T>(pub &'static str, pub Option<T>);

impl<T: Encode> Encode for Labeled<T> {
	fn encode(&self, dst: &mut BytesMut) -> usize {
		let value = match &self.1 {
			None => return 0,
			Some(value) => value,
		};

		let mark = dst.len();
		put_bulk(dst, self.0.as_bytes());

		match value.encode(dst) {
			0 => {
				dst.truncate(mark);
				0
			}
			n => n + 1,
		}
	}
}

impl<T: Encode> Encode for Option<T> {
	fn encode(&self, dst: &mut BytesMut) -> usize {
		match self {
			None => 0,
			Some(value) => value.encode(dst),
		}
	}
}

/// A count-prefixed argument list: emits its own length as one argument,
/// then each element in order. Used by commands whose grammar declares the
/// number of following values, e.g. `numkeys` in EVAL.
#[derive(Debug, Clone)]
pub struct Counted<T>(pub Vec<T>);

impl<T: Encode> Encode for Counted<T> {
	fn encode(&self, dst: &mut BytesMut) -> usize {
		put_bulk(dst, self.0.len().to_string().as_bytes());

		let mut count = 1;
		for element in &self.0 {
			count += element.encode(dst);
		}

		count
	}
}

/// A flat argument list: each element spliced in iteration order, no length
/// prefix. An empty list contributes nothing — it is not the same as a
/// single empty string.
#[derive(Debug, Clone)]
pub struct List<T>(pub Vec<T>);

impl<T: Encode> Encode for List<T> {
	fn encode(&self, dst: &mut BytesMut) -> usize {
		self.0.iter().map(|element| element.encode(dst)).sum()
	}
}
