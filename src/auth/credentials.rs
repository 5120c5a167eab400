//! Client credentials and the HTTP Basic credential encoder used by the token exchange.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Merchant credentials supplied at construction; the secret never appears in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
	/// Gateway-issued client identifier.
	pub client_id: String,
	/// Gateway-issued client secret.
	pub client_secret: TokenSecret,
}
impl ClientCredentials {
	/// Creates credentials from a client identifier and secret.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self { client_id: client_id.into(), client_secret: TokenSecret::new(client_secret) }
	}

	/// Encodes `"<client_id>:<client_secret>"` for the `Basic` scheme.
	///
	/// The UTF-8 bytes are encoded with the standard, padded base64 alphabet. The credentials
	/// are not validated; malformed values surface later as [`Error::AuthFailed`].
	pub fn basic_credentials(&self) -> TokenSecret {
		encode_basic(&self.client_id, self.client_secret.expose())
	}

	/// Full `Authorization` header value (`Basic <encoded>`) for the token endpoint.
	pub fn basic_authorization(&self) -> TokenSecret {
		TokenSecret::new(format!("Basic {}", self.basic_credentials().expose()))
	}
}
impl Debug for ClientCredentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.finish()
	}
}

/// Base64-encodes `"<client_id>:<client_secret>"` as UTF-8 bytes.
pub fn encode_basic(client_id: &str, client_secret: &str) -> TokenSecret {
	let mut raw = String::with_capacity(client_id.len() + client_secret.len() + 1);

	raw.push_str(client_id);
	raw.push(':');
	raw.push_str(client_secret);

	TokenSecret::new(STANDARD.encode(raw.as_bytes()))
}
