//! Single-slot bearer-token cache with a lifetime floor and an expiry safety margin.
//!
//! The cache is a pure in-memory state machine: it never blocks and never talks to the
//! network. [`PaymentClient`](crate::client::PaymentClient) owns exactly one instance behind a
//! mutex and is its only writer.

// self
use crate::{
	_prelude::*,
	auth::{CachedToken, TokenSecret},
};

/// Timing rules applied when storing and validating cached tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenPolicy {
	/// Floor applied to the gateway's `expires_in` when computing the expiry instant.
	pub minimum_ttl: Duration,
	/// Time subtracted from the expiry instant when deciding validity.
	pub safety_margin: Duration,
}
impl TokenPolicy {
	/// Default lifetime floor.
	pub const DEFAULT_MINIMUM_TTL: Duration = Duration::seconds(30);
	/// Default safety margin.
	pub const DEFAULT_SAFETY_MARGIN: Duration = Duration::seconds(10);

	/// Creates a policy from explicit values.
	pub const fn new(minimum_ttl: Duration, safety_margin: Duration) -> Self {
		Self { minimum_ttl, safety_margin }
	}

	/// Effective lifetime for a token the gateway says lives for `expires_in`.
	pub fn lifetime_for(&self, expires_in: Duration) -> Duration {
		expires_in.max(self.minimum_ttl)
	}

	/// Returns `true` when a token stored under this policy is valid the instant it is set.
	pub fn fresh_tokens_are_valid(&self) -> bool {
		self.safety_margin < self.minimum_ttl
	}
}
impl Default for TokenPolicy {
	fn default() -> Self {
		Self::new(Self::DEFAULT_MINIMUM_TTL, Self::DEFAULT_SAFETY_MARGIN)
	}
}

/// Holds at most one bearer token and decides whether it is still usable.
#[derive(Clone, Debug, Default)]
pub struct TokenCache {
	slot: Option<CachedToken>,
	policy: TokenPolicy,
}
impl TokenCache {
	/// Creates an empty cache governed by `policy`.
	pub fn new(policy: TokenPolicy) -> Self {
		Self { slot: None, policy }
	}

	/// Policy applied by this cache.
	pub fn policy(&self) -> TokenPolicy {
		self.policy
	}

	/// Current slot contents, valid or not.
	pub fn get(&self) -> Option<&CachedToken> {
		self.slot.as_ref()
	}

	/// Returns `true` if a token is present and usable right now.
	pub fn is_valid(&self) -> bool {
		self.is_valid_at(OffsetDateTime::now_utc())
	}

	/// Returns `true` if a token is present and `instant < expires_at - safety_margin`.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		self.slot.as_ref().is_some_and(|token| token.is_fresh_at(instant, self.policy.safety_margin))
	}

	/// Returns the bearer token if it is valid at `instant`.
	pub fn valid_token_at(&self, instant: OffsetDateTime) -> Option<TokenSecret> {
		self.slot
			.as_ref()
			.filter(|token| token.is_fresh_at(instant, self.policy.safety_margin))
			.map(|token| token.access_token.clone())
	}

	/// Stores `token`, expiring `max(expires_in, minimum_ttl)` from now.
	pub fn set(&mut self, token: TokenSecret, expires_in: Duration) -> &CachedToken {
		self.set_at(token, expires_in, OffsetDateTime::now_utc())
	}

	/// Stores `token`, expiring `max(expires_in, minimum_ttl)` after `instant`.
	pub fn set_at(
		&mut self,
		token: TokenSecret,
		expires_in: Duration,
		instant: OffsetDateTime,
	) -> &CachedToken {
		let lifetime = self.policy.lifetime_for(expires_in);

		self.slot.insert(CachedToken::new(token, instant, lifetime))
	}

	/// Clears the slot and returns what was there; calling it on an empty cache is a no-op.
	pub fn invalidate(&mut self) -> Option<CachedToken> {
		self.slot.take()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	const T0: OffsetDateTime = macros::datetime!(2025-06-01 12:00 UTC);

	#[test]
	fn empty_cache_is_invalid() {
		let cache = TokenCache::default();

		assert!(!cache.is_valid());
		assert!(cache.get().is_none());
		assert!(cache.valid_token_at(T0).is_none());
	}

	#[test]
	fn lifetime_shorter_than_margin_is_invalid_immediately() {
		let mut cache = TokenCache::new(TokenPolicy::new(Duration::ZERO, Duration::seconds(10)));

		cache.set_at("short".into(), Duration::seconds(5), T0);

		assert!(cache.get().is_some());
		assert!(!cache.is_valid_at(T0));
		assert!(cache.valid_token_at(T0).is_none());
	}

	#[test]
	fn floor_lifts_short_lifetimes_above_margin() {
		let mut cache = TokenCache::default();
		let stored = cache.set_at("short".into(), Duration::seconds(5), T0).clone();

		assert_eq!(stored.expires_at, T0 + TokenPolicy::DEFAULT_MINIMUM_TTL);
		assert!(cache.is_valid_at(T0));
		assert!(cache.is_valid_at(T0 + Duration::seconds(19)));
		assert!(!cache.is_valid_at(T0 + Duration::seconds(20)));
	}

	#[test]
	fn hour_long_token_valid_until_lifetime_minus_margin() {
		let mut cache = TokenCache::default();

		cache.set_at("hourly".into(), Duration::seconds(3600), T0);

		assert!(cache.is_valid_at(T0));
		assert!(cache.is_valid_at(T0 + Duration::seconds(3589)));
		assert!(!cache.is_valid_at(T0 + Duration::seconds(3590)));
		assert!(!cache.is_valid_at(T0 + Duration::seconds(3600)));
		assert_eq!(
			cache.valid_token_at(T0 + Duration::minutes(30)).map(|t| t.expose().to_owned()),
			Some("hourly".to_owned())
		);
	}

	#[test]
	fn freshly_set_token_is_valid_now() {
		let mut cache = TokenCache::default();

		cache.set("now".into(), Duration::seconds(3600));

		assert!(cache.is_valid());
	}

	#[test]
	fn set_replaces_previous_token() {
		let mut cache = TokenCache::default();

		cache.set_at("first".into(), Duration::seconds(60), T0);
		cache.set_at("second".into(), Duration::seconds(60), T0);

		assert_eq!(
			cache.get().map(|t| t.access_token.expose().to_owned()),
			Some("second".to_owned())
		);
	}

	#[test]
	fn invalidate_is_idempotent() {
		let mut cache = TokenCache::default();

		cache.set_at("gone".into(), Duration::seconds(3600), T0);

		assert!(cache.invalidate().is_some());
		assert!(cache.invalidate().is_none());
		assert!(!cache.is_valid_at(T0));
	}

	#[test]
	fn default_policy_keeps_margin_below_floor() {
		let policy = TokenPolicy::default();

		assert!(policy.fresh_tokens_are_valid());
		assert_eq!(policy.lifetime_for(Duration::seconds(-4)), policy.minimum_ttl);
		assert_eq!(policy.lifetime_for(Duration::seconds(900)), Duration::seconds(900));
		assert!(!TokenPolicy::new(Duration::seconds(5), Duration::seconds(10)).fresh_tokens_are_valid());
	}
}
