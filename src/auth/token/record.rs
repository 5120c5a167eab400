//! Cached bearer-token record.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Bearer token plus the instant it stops being usable.
#[derive(Clone, PartialEq, Eq)]
pub struct CachedToken {
	/// Bearer token presented on every gateway call.
	pub access_token: TokenSecret,
	/// Instant the token was stored.
	pub issued_at: OffsetDateTime,
	/// Expiry instant after the minimum-TTL floor was applied.
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Longest lifetime a record accepts; longer gateway lifetimes are capped to it.
	pub const MAX_LIFETIME: Duration = Duration::days(365);

	/// Builds a record expiring `lifetime` after `issued_at`, capped at [`Self::MAX_LIFETIME`].
	///
	/// An expiry that falls outside the representable date range collapses to `issued_at`, so
	/// the record is immediately stale instead of panicking.
	pub fn new(access_token: TokenSecret, issued_at: OffsetDateTime, lifetime: Duration) -> Self {
		let lifetime = lifetime.min(Self::MAX_LIFETIME);
		let expires_at = issued_at.checked_add(lifetime).unwrap_or(issued_at);

		Self { access_token, issued_at, expires_at }
	}

	/// Time left before `expires_at`, negative once expired.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		self.expires_at - instant
	}

	/// Returns `true` while `instant` is strictly before `expires_at - margin`.
	pub fn is_fresh_at(&self, instant: OffsetDateTime, margin: Duration) -> bool {
		instant < self.expires_at - margin
	}
}
impl Debug for CachedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachedToken")
			.field("access_token", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
