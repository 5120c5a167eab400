//! Authenticated request dispatch with bounded 401 recovery.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	classify::{RequestAttempt, TransportErrorMapper, Verdict, classify_response},
	client::PaymentClient,
	gateway::Endpoint,
	http::{GatewayHttpClient, HttpRequest, HttpResponse, Method},
	obs::{self, OperationKind, Outcome},
};

impl<C, M> PaymentClient<C, M>
where
	C: ?Sized + GatewayHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Sends one logical call to `endpoint` and returns the parsed JSON body of the 2xx reply.
	///
	/// Each pass obtains a token (cached or freshly exchanged), sends the request under the
	/// configured deadline, and hands any non-2xx reply to the classifier. A 401 clears the
	/// token slot and starts over until `max_retries` refresh cycles have been spent; every
	/// other failure, timeouts included, is returned immediately and leaves the slot untouched.
	pub async fn dispatch(
		&self,
		endpoint: Endpoint,
		method: Method,
		body: Option<Value>,
	) -> Result<Value> {
		let url = self.config.endpoint_url(endpoint)?;
		let encoded = body
			.as_ref()
			.map(serde_json::to_vec)
			.transpose()
			.map_err(|err| body_encoding_error(endpoint, err))?;
		let mut attempt = RequestAttempt::new(endpoint, method, body);

		loop {
			let token = self.access_token().await?;

			obs::debug_event(OperationKind::from(endpoint), "dispatching request", attempt.attempt);

			let request = HttpRequest {
				method,
				url: url.clone(),
				authorization: token.bearer_authorization(),
				content_type: HttpRequest::JSON,
				body: encoded.clone(),
				timeout: self.config.timeout,
			};
			let response = self.http_client.execute(request).await.map_err(|err| {
				self.transport_mapper.map_transport_error(&attempt, self.config.timeout, err)
			})?;

			if response.is_success() {
				return parse_success_body(&response, endpoint);
			}

			match classify_response(&response, &attempt, self.config.max_retries) {
				Verdict::Retry => {
					self.invalidate_token();

					attempt.attempt += 1;

					obs::record_outcome(OperationKind::from(endpoint), Outcome::Retry);
				},
				Verdict::Fail(err) => return Err(err),
			}
		}
	}

	/// Serializes `body`, dispatches it with `POST`, and decodes the reply into `T`.
	pub(crate) async fn post_json<B, T>(&self, endpoint: Endpoint, body: &B) -> Result<T>
	where
		B: Serialize,
		T: DeserializeOwned,
	{
		let body = encode_body(endpoint, body)?;
		let reply = self.dispatch(endpoint, Method::Post, Some(body)).await?;

		decode_reply(endpoint, reply)
	}
}

fn encode_body<B>(endpoint: Endpoint, body: &B) -> Result<Value>
where
	B: Serialize,
{
	serde_json::to_value(body).map_err(|err| body_encoding_error(endpoint, err))
}

fn body_encoding_error(endpoint: Endpoint, err: serde_json::Error) -> Error {
	Error::generic(format!("Request body for `{endpoint}` could not be serialized"), err)
}

fn parse_success_body(response: &HttpResponse, endpoint: Endpoint) -> Result<Value> {
	if response.body.iter().all(u8::is_ascii_whitespace) {
		return Ok(Value::Null);
	}

	serde_json::from_slice(&response.body).map_err(|err| Error::Generic {
		message: format!("Gateway returned malformed JSON for `{endpoint}`"),
		status: Some(response.status),
		body: response.body_text(),
		source: Some(Box::new(err)),
	})
}

fn decode_reply<T>(endpoint: Endpoint, reply: Value) -> Result<T>
where
	T: DeserializeOwned,
{
	let raw = reply.to_string();

	serde_path_to_error::deserialize(reply).map_err(|err| Error::Generic {
		message: format!(
			"Gateway returned an unexpected `{endpoint}` response at `{}`",
			err.path()
		),
		status: None,
		body: Some(raw),
		source: Some(Box::new(err.into_inner())),
	})
}
