//! Gateway environments, endpoint paths, and lookup resource kinds.

// self
use crate::{_prelude::*, error::ConfigError};

/// Gateway deployment the client talks to; fixed once a client is built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
	/// Production gateway; moves real money.
	Live,
	/// Test gateway.
	#[default]
	Sandbox,
}
impl Environment {
	/// Default base URL for the environment.
	///
	/// Both defaults live under the reserved `.example` TLD and never resolve; point the client
	/// at the real gateway with
	/// [`ClientConfigBuilder::base_url`](crate::config::ClientConfigBuilder::base_url).
	pub const fn base_url(self) -> &'static str {
		match self {
			Environment::Live => "https://api.paygate.example/",
			Environment::Sandbox => "https://sandbox.api.paygate.example/",
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Environment::Live => "live",
			Environment::Sandbox => "sandbox",
		}
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Resource families that lookups can fail to find.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
	/// Merchant order looked up by `orderId`.
	Order,
	/// Payment looked up by `transactionId`.
	Payment,
}
impl ResourceKind {
	/// Returns a stable label.
	pub const fn as_str(self) -> &'static str {
		match self {
			ResourceKind::Order => "Order",
			ResourceKind::Payment => "Payment",
		}
	}
}
impl Display for ResourceKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Gateway endpoints, relative to the environment's base URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// Client-credentials token exchange.
	Token,
	/// Creates a payment token for an order.
	CreatePayment,
	/// Looks up a payment by merchant order identifier.
	RetrieveOrderPayment,
	/// Looks up a payment by gateway transaction identifier.
	RetrieveTransactionPayment,
	/// Sends money to a receiver.
	Transfer,
}
impl Endpoint {
	/// Path joined onto the base URL.
	pub const fn path(self) -> &'static str {
		match self {
			Endpoint::Token => "oauth/token",
			Endpoint::CreatePayment => "v1/CreatePayment",
			Endpoint::RetrieveOrderPayment => "v1/RetrieveOrderPayment",
			Endpoint::RetrieveTransactionPayment => "v1/RetrieveTransactionPayment",
			Endpoint::Transfer => "v1/TransFer",
		}
	}

	/// Resource kind and the request-body field holding its identifier, for lookup endpoints.
	pub const fn lookup(self) -> Option<(ResourceKind, &'static str)> {
		match self {
			Endpoint::RetrieveOrderPayment => Some((ResourceKind::Order, "orderId")),
			Endpoint::RetrieveTransactionPayment => Some((ResourceKind::Payment, "transactionId")),
			Endpoint::Token | Endpoint::CreatePayment | Endpoint::Transfer => None,
		}
	}

	/// Absolute URL for this endpoint under `base`.
	pub fn url(self, base: &Url) -> Result<Url, ConfigError> {
		base.join(self.path())
			.map_err(|source| ConfigError::InvalidEndpoint { path: self.path(), source })
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.path())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn endpoints_join_under_base_path() {
		let base = Url::parse("https://gateway.example/api/").expect("Base URL should parse.");

		assert_eq!(
			Endpoint::Token.url(&base).expect("Token URL should join.").as_str(),
			"https://gateway.example/api/oauth/token"
		);
		assert_eq!(
			Endpoint::Transfer.url(&base).expect("Transfer URL should join.").as_str(),
			"https://gateway.example/api/v1/TransFer"
		);
	}

	#[test]
	fn lookups_name_their_identifier_field() {
		assert_eq!(Endpoint::RetrieveOrderPayment.lookup(), Some((ResourceKind::Order, "orderId")));
		assert_eq!(
			Endpoint::RetrieveTransactionPayment.lookup(),
			Some((ResourceKind::Payment, "transactionId"))
		);
		assert_eq!(Endpoint::CreatePayment.lookup(), None);
	}

	#[test]
	fn environments_have_distinct_https_bases() {
		let live = Url::parse(Environment::Live.base_url()).expect("Live URL should parse.");
		let sandbox = Url::parse(Environment::Sandbox.base_url()).expect("Sandbox URL should parse.");

		assert_eq!(live.scheme(), "https");
		assert_eq!(sandbox.scheme(), "https");
		assert_ne!(live, sandbox);
	}

	#[test]
	fn default_hosts_are_reserved_names() {
		for environment in [Environment::Live, Environment::Sandbox] {
			let url = Url::parse(environment.base_url()).expect("Default URL should parse.");
			let host = url.host_str().expect("Default URL should carry a host.");

			assert!(host.ends_with(".example"), "{environment} default host `{host}` must not resolve.");
		}
	}
}
