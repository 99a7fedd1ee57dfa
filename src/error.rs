use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("IO error")]
	Io(#[from] std::io::Error),
	/// The inbound source ended while a reply was still owed.
	#[error("connection closed with replies outstanding")]
	Closed,
	/// The server replied with an error; carries its message verbatim.
	#[error("server error: {0}")]
	Redis(String),
	#[error("{0}")]
	Type(#[from] redwire_resp::Error),
}

pub type Result<T, E = Error> = ::std::result::Result<T, E>;
