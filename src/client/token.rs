//! Client-credentials token acquisition with a singleflight guard.

// self
use crate::{
	_prelude::*,
	auth::{CachedToken, TokenSecret},
	classify::{RequestAttempt, TransportErrorMapper, gateway_message},
	client::{PaymentClient, observe},
	gateway::Endpoint,
	http::{GatewayHttpClient, HttpRequest, HttpResponse, Method},
	obs::OperationKind,
};

/// Scope requested on every token exchange.
pub(crate) const TOKEN_SCOPE: &str = "read,write";

#[derive(Debug, Deserialize)]
struct TokenResponse {
	#[serde(default)]
	access_token: Option<String>,
	#[serde(default)]
	expires_in: Option<Value>,
}

impl<C, M> PaymentClient<C, M>
where
	C: ?Sized + GatewayHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Returns a usable bearer token, exchanging credentials when the slot is empty or stale.
	///
	/// Callers that miss the cache queue on the singleflight guard and re-check the slot once
	/// they hold it, so a burst of concurrent misses costs one token exchange.
	pub(crate) async fn access_token(&self) -> Result<TokenSecret> {
		if let Some(token) = self.cached_access_token() {
			return Ok(token);
		}

		let _singleflight = self.acquire_guard.lock().await;

		if let Some(token) = self.cached_access_token() {
			return Ok(token);
		}

		self.acquire_token().await
	}

	/// Performs the client-credentials exchange and stores the result in the token slot.
	///
	/// The freshly issued token is returned even when the configured policy already deems it
	/// stale, so a call that just paid for an exchange always gets to use it. No retries happen
	/// here; 401 recovery belongs to the dispatcher.
	pub async fn acquire_token(&self) -> Result<TokenSecret> {
		self.metrics.record_acquisition();

		observe(OperationKind::TokenAcquire, "acquire_token", async move {
			let request = self.token_request()?;
			let attempt = RequestAttempt::new(Endpoint::Token, Method::Post, None);
			let response = self.http_client.execute(request).await.map_err(|err| {
				self.transport_mapper.map_transport_error(&attempt, self.config.timeout, err)
			})?;
			let (token, expires_in) = parse_token_response(&response)?;

			self.token_cache.lock().set(token.clone(), expires_in);

			Ok(token)
		})
		.await
	}

	fn cached_access_token(&self) -> Option<TokenSecret> {
		let token = self.token_cache.lock().valid_token_at(OffsetDateTime::now_utc());

		if token.is_some() {
			self.metrics.record_cache_hit();
		}

		token
	}

	fn token_request(&self) -> Result<HttpRequest> {
		let url = self.config.endpoint_url(Endpoint::Token)?;
		let body = url::form_urlencoded::Serializer::new(String::new())
			.append_pair("grant_type", "client_credentials")
			.append_pair("scope", TOKEN_SCOPE)
			.finish();

		Ok(HttpRequest {
			method: Method::Post,
			url,
			authorization: self.config.credentials.basic_authorization(),
			content_type: HttpRequest::FORM,
			body: Some(body.into_bytes()),
			timeout: self.config.timeout,
		})
	}
}

/// Turns a token-endpoint response into a bearer token and its advertised lifetime.
fn parse_token_response(response: &HttpResponse) -> Result<(TokenSecret, Duration)> {
	let status = response.status;

	if !response.is_success() {
		return Err(Error::AuthFailed {
			message: gateway_message(response)
				.unwrap_or_else(|| format!("Token endpoint returned HTTP {status}")),
			status: Some(status),
			body: response.body_text(),
		});
	}

	let deserializer = &mut serde_json::Deserializer::from_slice(&response.body);
	let payload: TokenResponse =
		serde_path_to_error::deserialize(deserializer).map_err(|err| Error::AuthFailed {
			message: format!("Token endpoint returned malformed JSON at `{}`", err.path()),
			status: Some(status),
			body: response.body_text(),
		})?;
	let access_token = payload.access_token.filter(|token| !token.trim().is_empty()).ok_or_else(
		|| Error::AuthFailed {
			message: "Token endpoint response is missing access_token".into(),
			status: Some(status),
			body: response.body_text(),
		},
	)?;
	let expires_in = payload.expires_in.as_ref().and_then(expires_in_seconds).unwrap_or(0);
	let expires_in =
		Duration::seconds(expires_in).clamp(Duration::ZERO, CachedToken::MAX_LIFETIME);

	Ok((TokenSecret::new(access_token), expires_in))
}

/// Reads `expires_in` whether the gateway sends it as an integer, a float, or a string.
fn expires_in_seconds(value: &Value) -> Option<i64> {
	match value {
		Value::Number(number) => number
			.as_i64()
			.or_else(|| number.as_f64().filter(|secs| secs.is_finite()).map(|secs| secs as i64)),
		Value::String(text) => text.trim().parse().ok(),
		_ => None,
	}
}
