use thiserror::Error;

use crate::{Kind, Token};

/// An error that can occur when converting a [Token] into a typed value.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("expected {expected:?} but got {found:?}")]
pub struct Error {
	/// The token kind the target type required.
	pub expected: Kind,
	/// The token which was found.
	pub found: Token,
}

impl Error {
	pub fn unexpected(expected: Kind, found: Token) -> Self {
		Self { expected, found }
	}
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
