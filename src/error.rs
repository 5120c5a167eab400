//! Client-level error types shared by the token pipeline, the dispatcher, and operations.

// self
use crate::{_prelude::*, gateway::ResourceKind};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Terminal, classified failure handed to callers once retry logic is exhausted.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; raised before any request is built.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// Caller input was rejected before touching the network.
	#[error("Invalid input: {reason}.")]
	Validation {
		/// Which input failed and why.
		reason: String,
	},
	/// Token exchange failed or the gateway kept answering 401.
	#[error("Authentication failed: {message}.")]
	AuthFailed {
		/// Gateway- or client-supplied message.
		message: String,
		/// HTTP status code, when a response was received.
		status: Option<u16>,
		/// Raw response payload, when a response was received.
		body: Option<String>,
	},
	/// Looked-up order or payment does not exist.
	#[error("{kind} `{id}` was not found.")]
	NotFound {
		/// Resource family that was looked up.
		kind: ResourceKind,
		/// Identifier taken from the original request parameters.
		id: String,
		/// Raw response payload returned with the 404.
		body: Option<String>,
	},
	/// Request deadline elapsed; never retried automatically.
	#[error("Request to `{endpoint}` timed out after {timeout:?}.")]
	Timeout {
		/// Endpoint path that was being called.
		endpoint: &'static str,
		/// Deadline that elapsed.
		timeout: StdDuration,
	},
	/// Any other non-2xx status or transport failure.
	#[error("{message}")]
	Generic {
		/// Gateway message when present, otherwise a synthesized description.
		message: String,
		/// HTTP status code, when a response was received.
		status: Option<u16>,
		/// Raw response payload, when a response was received.
		body: Option<String>,
		/// Underlying failure, if any.
		#[source]
		source: Option<BoxError>,
	},
}
impl Error {
	/// Builds a [`Error::Validation`] for the provided reason.
	pub fn validation(reason: impl Into<String>) -> Self {
		Self::Validation { reason: reason.into() }
	}

	/// Wraps a failure that happened before any response was received.
	pub fn generic(
		message: impl Into<String>,
		source: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Generic {
			message: message.into(),
			status: None,
			body: None,
			source: Some(Box::new(source)),
		}
	}

	/// HTTP status code attached to the failure, if one was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::AuthFailed { status, .. } | Self::Generic { status, .. } => *status,
			Self::NotFound { .. } => Some(404),
			Self::Config(_) | Self::Validation { .. } | Self::Timeout { .. } => None,
		}
	}

	/// Raw response payload attached to the failure, if one was received.
	pub fn body(&self) -> Option<&str> {
		match self {
			Self::AuthFailed { body, .. }
			| Self::NotFound { body, .. }
			| Self::Generic { body, .. } => body.as_deref(),
			Self::Config(_) | Self::Validation { .. } | Self::Timeout { .. } => None,
		}
	}

	/// Returns `true` for failures raised before any network traffic.
	pub fn is_local(&self) -> bool {
		matches!(self, Self::Config(_) | Self::Validation { .. })
	}
}

/// Configuration failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot carry endpoint paths.
	#[error("Base URL `{url}` cannot be used as a base.")]
	InvalidBaseUrl {
		/// Offending URL.
		url: String,
	},
	/// Endpoint path could not be joined onto the base URL.
	#[error("Endpoint `{path}` could not be joined onto the base URL.")]
	InvalidEndpoint {
		/// Endpoint path.
		path: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Per-request timeout must be positive.
	#[error("Request timeout must be greater than zero.")]
	ZeroTimeout,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn accessors_expose_status_and_body() {
		let err = Error::Generic {
			message: "Insufficient balance".into(),
			status: Some(422),
			body: Some("{\"message\":\"Insufficient balance\"}".into()),
			source: None,
		};

		assert_eq!(err.status(), Some(422));
		assert_eq!(err.body(), Some("{\"message\":\"Insufficient balance\"}"));
		assert_eq!(err.to_string(), "Insufficient balance");
		assert!(!err.is_local());
	}

	#[test]
	fn not_found_reports_kind_and_id() {
		let err = Error::NotFound { kind: ResourceKind::Order, id: "ord-7".into(), body: None };

		assert_eq!(err.status(), Some(404));
		assert_eq!(err.to_string(), "Order `ord-7` was not found.");
	}

	#[test]
	fn validation_is_local_without_status() {
		let err = Error::validation("amount must be greater than zero");

		assert!(err.is_local());
		assert_eq!(err.status(), None);
		assert_eq!(err.body(), None);
		assert_eq!(err.to_string(), "Invalid input: amount must be greater than zero.");
	}

	#[test]
	fn generic_keeps_source_chain() {
		let io = std::io::Error::other("connection reset");
		let err = Error::generic("Network error occurred while calling `v1/TransFer`.", io);
		let source =
			StdError::source(&err).expect("Generic errors should expose the wrapped cause.");

		assert_eq!(source.to_string(), "connection reset");
		assert_eq!(err.status(), None);
	}
}
