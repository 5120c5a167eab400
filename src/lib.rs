//! Async payment-gateway client with cached client-credentials tokens, bounded 401 recovery, and
//! a closed error taxonomy for payment creation, lookups, and transfers.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod obs;
pub mod payment;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::ClientCredentials,
		client::ReqwestPaymentClient,
		config::ClientConfig,
		gateway::Environment,
		http::ReqwestHttpClient,
	};

	/// Client identifier shared by integration tests.
	pub const TEST_CLIENT_ID: &str = "merchant-test";
	/// Client secret shared by integration tests.
	pub const TEST_CLIENT_SECRET: &str = "merchant-secret";

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Sandbox configuration pointed at `base_url` with the shared test credentials.
	pub fn test_config(base_url: &str) -> ClientConfig {
		ClientConfig::builder(
			ClientCredentials::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET),
			Environment::Sandbox,
		)
		.base_url(Url::parse(base_url).expect("Mock gateway URL should parse."))
		.build()
		.expect("Test configuration should be valid.")
	}

	/// Constructs a reqwest-backed [`ReqwestPaymentClient`] for the mock gateway at `base_url`.
	pub fn build_reqwest_test_client(base_url: &str) -> ReqwestPaymentClient {
		ReqwestPaymentClient::with_reqwest(test_config(base_url), test_reqwest_http_client())
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};

pub use auth::ClientCredentials;
pub use client::PaymentClient;
#[cfg(feature = "reqwest")] pub use client::ReqwestPaymentClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use gateway::Environment;
