use bytes::Bytes;

/// A decoded RESP3 reply element. Read the
/// [Redis documentation](https://redis.io/commands) for details on which kind
/// to expect as a response to a given command.
///
/// Tokens arrive already parsed from an external decoder and are immutable:
/// conversion into typed values (see [from_token](crate::from_token)) only
/// projects them, it never rewrites them.
///
/// Unlike command arguments, replies can carry the error kind. Use
/// [Token::is_error] to detect it before attempting a typed conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
	/// `+` — a short line of text, e.g. `OK`.
	Simple(String),
	/// `-` — the server's error message, verbatim.
	Error(String),
	/// `:` — a signed 64-bit integer.
	Integer(i64),
	/// `,` — a double-precision float.
	Double(f64),
	/// `#` — a boolean.
	Boolean(bool),
	/// `(` — an arbitrary-precision integer, kept as its decimal digits.
	BigNumber(Bytes),
	/// `$` — a length-prefixed byte string.
	Blob(Bytes),
	/// `=` — a blob string with a declared text format.
	Verbatim(Bytes),
	/// `_` — the RESP3 null.
	Null,
	/// `*` — an ordered sequence of further tokens.
	Array(Vec<Token>),
	/// `%` — key/value pairs in wire order.
	Map(Vec<(Token, Token)>),
	/// `~` — an unordered collection.
	Set(Vec<Token>),
	/// `>` — a server-initiated message, e.g. PubSub.
	Push(Vec<Token>),
	/// `|` — auxiliary key/value pairs attached to a reply.
	Attribute(Vec<(Token, Token)>),
}

/// The kind of a [Token], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
	Simple,
	Error,
	Integer,
	Double,
	Boolean,
	BigNumber,
	Blob,
	Verbatim,
	Null,
	Array,
	Map,
	Set,
	Push,
	Attribute,
}

impl Token {
	/// The kind of this token.
	pub fn kind(&self) -> Kind {
		match self {
			Self::Simple(_) => Kind::Simple,
			Self::Error(_) => Kind::Error,
			Self::Integer(_) => Kind::Integer,
			Self::Double(_) => Kind::Double,
			Self::Boolean(_) => Kind::Boolean,
			Self::BigNumber(_) => Kind::BigNumber,
			Self::Blob(_) => Kind::Blob,
			Self::Verbatim(_) => Kind::Verbatim,
			Self::Null => Kind::Null,
			Self::Array(_) => Kind::Array,
			Self::Map(_) => Kind::Map,
			Self::Set(_) => Kind::Set,
			Self::Push(_) => Kind::Push,
			Self::Attribute(_) => Kind::Attribute,
		}
	}

	/// Whether this token carries a server error. Checkable without knowing
	/// which type the reply was going to be converted into.
	pub fn is_error(&self) -> bool {
		matches!(self, Self::Error(_))
	}

	/// Convenience method to create a [Token::Simple].
	pub fn simple<T>(str: &T) -> Self
	where
		T: AsRef<str> + ?Sized,
	{
		Self::Simple(str.as_ref().to_owned())
	}

	/// Convenience method to create a [Token::Blob].
	pub fn blob<T>(bytes: &T) -> Self
	where
		T: AsRef<[u8]> + ?Sized,
	{
		Self::Blob(Bytes::copy_from_slice(bytes.as_ref()))
	}
}

impl PartialEq<str> for Token {
	fn eq(&self, other: &str) -> bool {
		matches!(self, Token::Simple(str) if str == other)
	}
}

impl PartialEq<&str> for Token {
	fn eq(&self, other: &&str) -> bool {
		matches!(self, Token::Simple(str) if str == other)
	}
}

impl PartialEq<[u8]> for Token {
	fn eq(&self, other: &[u8]) -> bool {
		matches!(self, Token::Blob(bytes) if bytes.as_ref() == other)
	}
}

impl PartialEq<&[u8]> for Token {
	fn eq(&self, other: &&[u8]) -> bool {
		matches!(self, Token::Blob(bytes) if bytes == other)
	}
}

impl<const N: usize> PartialEq<[u8; N]> for Token {
	fn eq(&self, other: &[u8; N]) -> bool {
		matches!(self, Token::Blob(bytes) if bytes.as_ref() == other)
	}
}

impl<const N: usize> PartialEq<&[u8; N]> for Token {
	fn eq(&self, other: &&[u8; N]) -> bool {
		matches!(self, Token::Blob(bytes) if bytes.as_ref() == *other)
	}
}

impl PartialEq<i64> for Token {
	fn eq(&self, other: &i64) -> bool {
		matches!(self, Token::Integer(i) if *i == *other)
	}
}
