pub mod builder;
pub mod decode;
pub mod fault;
pub mod model;
pub mod parser;

pub use builder::{MethodCall, Param};
pub use fault::Fault;
pub use model::{Rating, SearchArtist, SearchResult, SearchSong, Song, Station, UserInfo};
pub use parser::Value;

/// Error raised while building or interpreting an XML-RPC document.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("XML parse error: {0}")]
    Xml(#[from] xmltree::ParseError),

    #[error("XML write error: {0}")]
    Emit(#[from] xmltree::Error),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("remote fault: {0}")]
    Fault(#[from] Fault),
}
