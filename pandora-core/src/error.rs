use std::{error, fmt, io};

use crate::protocol::{Fault, ProtocolError};

#[derive(Debug)]
pub enum Error {
    /// Network or HTTP failure, surfaced immediately; this layer never
    /// retries.
    TransportError(Box<dyn error::Error + Send>),
    /// Malformed or unexpected response document; no partial result escapes.
    DecodeError(Box<dyn error::Error + Send>),
    /// Remote-reported status, surfaced verbatim.  Whether it is worth a
    /// retry (e.g. after re-authenticating) is the caller's decision.
    Fault(Fault),
    /// A rating can never be reverted to `None`; rejected before any I/O.
    InvalidRating,
    /// The rated song is not part of the current playlist snapshot, so its
    /// seeds are unavailable for the request.
    TrackNotFound,
    IoError(io::Error),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransportError(err) => write!(f, "Transport failed: {err}"),
            Self::DecodeError(err) => write!(f, "Unreadable server response: {err}"),
            Self::Fault(fault) => write!(f, "Remote fault: {fault}"),
            Self::InvalidRating => write!(f, "A rating cannot be reverted to none"),
            Self::TrackNotFound => write!(f, "Song is not in the current playlist"),
            Self::IoError(err) => err.fmt(f),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::IoError(err)
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Error {
        Error::TransportError(Box::new(err))
    }
}

impl From<ProtocolError> for Error {
    fn from(err: ProtocolError) -> Error {
        match err {
            ProtocolError::Fault(fault) => Error::Fault(fault),
            other => Error::DecodeError(Box::new(other)),
        }
    }
}
