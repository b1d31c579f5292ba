pub mod error;
pub mod hash;
pub mod types;

pub use error::Error;
pub use hash::{digest, LabelHasher, Sha256Hasher};
pub use types::{ServiceConfig, Status, StatusResponse, Variant};

pub type Result<T> = std::result::Result<T, Error>;
