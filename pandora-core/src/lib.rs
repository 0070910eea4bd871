pub mod connection;
pub mod crypt;
pub mod error;
pub mod session;
pub mod util;

pub use pandora_protocol as protocol;
