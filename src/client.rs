//! The payment client: token acquisition, authenticated dispatch, and payment operations.

mod dispatch;
mod metrics;
mod payments;
mod token;

pub use metrics::*;

// std
use std::time::Instant;
// self
use crate::{
	_prelude::*,
	auth::{CachedToken, TokenCache},
	classify::TransportErrorMapper,
	config::ClientConfig,
	gateway::Environment,
	http::GatewayHttpClient,
	obs::{self, OperationKind, OperationSpan, Outcome},
};
#[cfg(feature = "reqwest")]
use crate::{classify::ReqwestTransportErrorMapper, http::ReqwestHttpClient};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestPaymentClient = PaymentClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Calls the payment gateway on behalf of one merchant account.
///
/// The client owns the transport, the validated configuration, and exactly one bearer-token
/// slot. The slot starts empty, is filled lazily by the first call that needs it, replaced on
/// every successful exchange, and cleared whenever the gateway answers 401. Concurrent callers
/// that find the slot empty or stale queue on a singleflight guard so only one of them
/// performs the token exchange; the rest reuse its result.
///
/// Tokens are never shared between client instances; wrap the client in an [`Arc`] to share
/// one slot across tasks.
pub struct PaymentClient<C, M>
where
	C: ?Sized + GatewayHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound gateway request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	config: ClientConfig,
	token_cache: Mutex<TokenCache>,
	acquire_guard: AsyncMutex<()>,
	metrics: TokenMetrics,
}
impl<C, M> PaymentClient<C, M>
where
	C: ?Sized + GatewayHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		config: ClientConfig,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		let token_cache = Mutex::new(TokenCache::new(config.token_policy));

		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			config,
			token_cache,
			acquire_guard: AsyncMutex::new(()),
			metrics: TokenMetrics::default(),
		}
	}

	/// Validated configuration this client was built with.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Gateway environment; fixed for the client's lifetime.
	pub fn environment(&self) -> Environment {
		self.config.environment
	}

	/// Token pipeline counters.
	pub fn metrics(&self) -> &TokenMetrics {
		&self.metrics
	}

	/// Snapshot of the token slot, valid or not.
	pub fn cached_token(&self) -> Option<CachedToken> {
		self.token_cache.lock().get().cloned()
	}

	/// Clears the token slot; returns `true` if a token was present.
	pub fn invalidate_token(&self) -> bool {
		let cleared = self.token_cache.lock().invalidate().is_some();

		self.metrics.record_invalidation();

		cleared
	}
}
#[cfg(feature = "reqwest")]
impl PaymentClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by a fresh reqwest transport.
	pub fn new(config: ClientConfig) -> Result<Self> {
		Ok(Self::with_reqwest(config, ReqwestHttpClient::try_new()?))
	}

	/// Creates a client backed by the provided reqwest transport.
	pub fn with_reqwest(config: ClientConfig, http_client: ReqwestHttpClient) -> Self {
		Self::with_http_client(config, http_client, ReqwestTransportErrorMapper)
	}
}
impl<C, M> Debug for PaymentClient<C, M>
where
	C: ?Sized + GatewayHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PaymentClient")
			.field("environment", &self.config.environment)
			.field("base_url", &self.config.base_url.as_str())
			.field("client_id", &self.config.credentials.client_id)
			.field("token_cached", &self.token_cache.lock().get().is_some())
			.finish()
	}
}

/// Runs `fut` inside an operation span and records the attempt, final outcome, and latency.
pub(crate) async fn observe<T, Fut>(
	kind: OperationKind,
	stage: &'static str,
	fut: Fut,
) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = OperationSpan::new(kind, stage);
	let started = Instant::now();

	obs::record_outcome(kind, Outcome::Attempt);

	let result = span.instrument(fut).await;
	let outcome = match &result {
		Ok(_) => Outcome::Success,
		Err(err) => {
			obs::failure_event(kind, err);

			Outcome::Failure
		},
	};

	obs::record_outcome(kind, outcome);
	obs::record_latency(kind, outcome, started.elapsed());

	result
}
