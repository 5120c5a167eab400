//! Gateway credentials, the Basic credential encoder, and bearer-token models.

pub mod credentials;
pub mod token;

pub use credentials::*;
pub use token::{cache::*, record::*, secret::*};
