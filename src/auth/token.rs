//! Bearer-token secret wrapper, cached token record, and the single-slot token cache.

pub mod cache;
pub mod record;
pub mod secret;
