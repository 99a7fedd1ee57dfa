pub use command::Command;
pub use decode::{from_token, FromToken};
pub use encode::{Counted, Encode, Flag, Key, Labeled, List};
pub use error::{Error, Result};
pub use token::{Kind, Token};

/// Command framing.
mod command;
/// Token conversion.
mod decode;
/// Argument encoding.
mod encode;
/// Conversion errors.
mod error;
/// General form of RESP3 reply data.
mod token;
