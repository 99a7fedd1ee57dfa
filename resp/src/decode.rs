use std::{
	collections::{HashMap, HashSet},
	hash::Hash,
	time::{Duration, SystemTime, UNIX_EPOCH},
};

use bytes::Bytes;

use crate::{
	error::{Error, Result},
	Key, Kind, Token,
};

/// A type that can be reconstructed from a single reply [Token].
///
/// Conversions are strict: numeric and boolean targets require their exact
/// wire kind, while the byte-bearing kinds (simple, blob, verbatim, big
/// number) are interchangeable sources for byte and string targets. The
/// error kind satisfies no target, so converting an error reply always
/// fails — detect it first with [Token::is_error].
pub trait FromToken: Sized {
	fn from_token(token: Token) -> Result<Self>;
}

/// Convert a reply token into `T`.
pub fn from_token<T: FromToken>(token: Token) -> Result<T> {
	T::from_token(token)
}

impl FromToken for Bytes {
	fn from_token(token: Token) -> Result<Self> {
		match token {
			Token::Simple(str) => Ok(str.into_bytes().into()),
			Token::Blob(bytes) | Token::Verbatim(bytes) | Token::BigNumber(bytes) => Ok(bytes),
			other => Err(Error::unexpected(Kind::Blob, other)),
		}
	}
}

impl FromToken for Vec<u8> {
	fn from_token(token: Token) -> Result<Self> {
		Bytes::from_token(token).map(|bytes| bytes.to_vec())
	}
}

impl FromToken for String {
	fn from_token(token: Token) -> Result<Self> {
		match token {
			Token::Simple(str) => Ok(str),
			Token::Blob(bytes) | Token::Verbatim(bytes) | Token::BigNumber(bytes) => {
				String::from_utf8(bytes.to_vec())
					.map_err(|err| Error::unexpected(Kind::Simple, Token::Blob(err.into_bytes().into())))
			}
			other => Err(Error::unexpected(Kind::Simple, other)),
		}
	}
}

impl FromToken for Key {
	fn from_token(token: Token) -> Result<Self> {
		Bytes::from_token(token).map(Key)
	}
}

/// Decoded from any byte-bearing kind carrying decimal seconds since the
/// Unix epoch, fractional allowed — the same text the
/// [Encode](crate::Encode) impl for [SystemTime] produces.
impl FromToken for SystemTime {
	fn from_token(token: Token) -> Result<Self> {
		let bytes = Bytes::from_token(token)?;
		let seconds = std::str::from_utf8(&bytes)
			.ok()
			.and_then(|str| str.parse::<f64>().ok())
			.filter(|secs| secs.is_finite() && *secs >= 0.0);

		match seconds {
			Some(secs) => Ok(UNIX_EPOCH + Duration::from_secs_f64(secs)),
			None => Err(Error::unexpected(Kind::Blob, Token::Blob(bytes))),
		}
	}
}

impl FromToken for i64 {
	fn from_token(token: Token) -> Result<Self> {
		match token {
			Token::Integer(int) => Ok(int),
			other => Err(Error::unexpected(Kind::Integer, other)),
		}
	}
}

impl FromToken for f64 {
	fn from_token(token: Token) -> Result<Self> {
		match token {
			Token::Double(double) => Ok(double),
			other => Err(Error::unexpected(Kind::Double, other)),
		}
	}
}

impl FromToken for bool {
	fn from_token(token: Token) -> Result<Self> {
		match token {
			Token::Boolean(bool) => Ok(bool),
			other => Err(Error::unexpected(Kind::Boolean, other)),
		}
	}
}

impl FromToken for () {
	fn from_token(token: Token) -> Result<Self> {
		match token {
			Token::Null => Ok(()),
			other => Err(Error::unexpected(Kind::Null, other)),
		}
	}
}

impl<T: FromToken> FromToken for Option<T> {
	fn from_token(token: Token) -> Result<Self> {
		match token {
			Token::Null => Ok(None),
			other => T::from_token(other).map(Some),
		}
	}
}

impl<T: FromToken> FromToken for Vec<T> {
	fn from_token(token: Token) -> Result<Self> {
		match token {
			Token::Array(items) | Token::Push(items) => {
				items.into_iter().map(T::from_token).collect()
			}
			other => Err(Error::unexpected(Kind::Array, other)),
		}
	}
}

impl<T: FromToken + Eq + Hash> FromToken for HashSet<T> {
	fn from_token(token: Token) -> Result<Self> {
		match token {
			Token::Set(items) => items.into_iter().map(T::from_token).collect(),
			other => Err(Error::unexpected(Kind::Set, other)),
		}
	}
}

impl<K, V> FromToken for HashMap<K, V>
where
	K: FromToken + Eq + Hash,
	V: FromToken,
{
	fn from_token(token: Token) -> Result<Self> {
		match token {
			Token::Map(entries) | Token::Attribute(entries) => {
				let mut map = HashMap::with_capacity(entries.len());
				// inserted in wire order: a repeated key keeps its last value
				for (key, value) in entries {
					map.insert(K::from_token(key)?, V::from_token(value)?);
				}

				Ok(map)
			}
			other => Err(Error::unexpected(Kind::Map, other)),
		}
	}
}
