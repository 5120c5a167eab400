//! Client configuration and its validating builder.

// self
use crate::{
	_prelude::*,
	auth::{ClientCredentials, TokenPolicy},
	error::ConfigError,
	gateway::{Endpoint, Environment},
};

/// Validated settings consumed by [`PaymentClient`](crate::client::PaymentClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Merchant credentials used for the token exchange.
	pub credentials: ClientCredentials,
	/// Gateway deployment.
	pub environment: Environment,
	/// Base URL every endpoint path is joined onto; always ends in `/`.
	pub base_url: Url,
	/// Ceiling on 401-triggered token refresh + retry cycles per operation.
	pub max_retries: u32,
	/// Deadline applied to each individual HTTP call.
	pub timeout: StdDuration,
	/// Token lifetime floor and safety margin.
	pub token_policy: TokenPolicy,
}
impl ClientConfig {
	/// Default retry ceiling.
	pub const DEFAULT_MAX_RETRIES: u32 = 3;
	/// Default per-request deadline.
	pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

	/// Starts a builder for the provided credentials and environment.
	pub fn builder(credentials: ClientCredentials, environment: Environment) -> ClientConfigBuilder {
		ClientConfigBuilder::new(credentials, environment)
	}

	/// Absolute URL for `endpoint`.
	pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, ConfigError> {
		endpoint.url(&self.base_url)
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	credentials: ClientCredentials,
	environment: Environment,
	base_url: Option<Url>,
	max_retries: u32,
	timeout: StdDuration,
	token_policy: TokenPolicy,
}
impl ClientConfigBuilder {
	fn new(credentials: ClientCredentials, environment: Environment) -> Self {
		Self {
			credentials,
			environment,
			base_url: None,
			max_retries: ClientConfig::DEFAULT_MAX_RETRIES,
			timeout: ClientConfig::DEFAULT_TIMEOUT,
			token_policy: TokenPolicy::default(),
		}
	}

	/// Overrides the environment's default base URL.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Sets the 401 retry ceiling; `0` disables automatic recovery.
	pub fn max_retries(mut self, max_retries: u32) -> Self {
		self.max_retries = max_retries;

		self
	}

	/// Sets the per-request deadline.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the token lifetime floor and safety margin.
	pub fn token_policy(mut self, policy: TokenPolicy) -> Self {
		self.token_policy = policy;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		if self.timeout.is_zero() {
			return Err(ConfigError::ZeroTimeout);
		}

		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(self.environment.base_url())
				.map_err(|_| ConfigError::InvalidBaseUrl { url: self.environment.base_url().into() })?,
		};
		let base_url = normalize_base(base_url)?;

		Ok(ClientConfig {
			credentials: self.credentials,
			environment: self.environment,
			base_url,
			max_retries: self.max_retries,
			timeout: self.timeout,
			token_policy: self.token_policy,
		})
	}
}

fn normalize_base(mut url: Url) -> Result<Url, ConfigError> {
	if url.cannot_be_a_base() {
		return Err(ConfigError::InvalidBaseUrl { url: url.to_string() });
	}
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	url.set_query(None);
	url.set_fragment(None);

	Ok(url)
}
