//! Retry decisions and error classification for gateway responses.
//!
//! [`classify_response`] is a pure decision over `(response, attempt, ceiling)`: a 401 below
//! the ceiling asks the dispatcher to invalidate the cached token and try again, every other
//! non-2xx status becomes a terminal [`Error`]. Transport failures never reach it; they are
//! turned into [`Error::Timeout`] or [`Error::Generic`] by a [`TransportErrorMapper`] and
//! surfaced without retry.

// self
use crate::{
	_prelude::*,
	gateway::Endpoint,
	http::{HttpResponse, Method},
};

/// Maps transport failures into client [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts a failure that prevented any response from arriving.
	fn map_transport_error(&self, attempt: &RequestAttempt, timeout: StdDuration, error: E) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		attempt: &RequestAttempt,
		timeout: StdDuration,
		err: ReqwestError,
	) -> Error {
		if err.is_timeout() {
			return Error::Timeout { endpoint: attempt.endpoint.path(), timeout };
		}
		if err.is_builder() {
			return Error::generic(
				format!("Request to `{}` could not be built", attempt.endpoint),
				err,
			);
		}

		Error::generic(format!("Network error occurred while calling `{}`", attempt.endpoint), err)
	}
}

/// One logical call in flight: what is being sent and how many 401 retries it has used.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestAttempt {
	/// Endpoint being called.
	pub endpoint: Endpoint,
	/// Verb.
	pub method: Method,
	/// JSON body, when the endpoint takes one.
	pub body: Option<Value>,
	/// Number of 401-triggered retries already performed; starts at 0.
	pub attempt: u32,
}
impl RequestAttempt {
	/// First attempt for `endpoint`.
	pub fn new(endpoint: Endpoint, method: Method, body: Option<Value>) -> Self {
		Self { endpoint, method, body, attempt: 0 }
	}

	/// Identifier of the looked-up resource, taken from the request body.
	pub fn lookup_id(&self) -> Option<&str> {
		let (_, field) = self.endpoint.lookup()?;

		self.body.as_ref()?.get(field)?.as_str()
	}
}

/// Outcome of classifying a non-2xx response.
#[derive(Debug)]
pub enum Verdict {
	/// Invalidate the cached token, bump the attempt counter, and dispatch again.
	Retry,
	/// Surface this error to the caller.
	Fail(Error),
}

/// Classifies a non-2xx `response` for `attempt` against the retry ceiling `max_retries`.
pub fn classify_response(
	response: &HttpResponse,
	attempt: &RequestAttempt,
	max_retries: u32,
) -> Verdict {
	let status = response.status;
	let body = response.body_text();

	match status {
		401 if attempt.attempt < max_retries => Verdict::Retry,
		401 => Verdict::Fail(Error::AuthFailed {
			message: gateway_message(response).unwrap_or_else(|| {
				format!(
					"Gateway rejected the access token after {} refresh attempt(s)",
					attempt.attempt
				)
			}),
			status: Some(status),
			body,
		}),
		404 => match (attempt.endpoint.lookup(), attempt.lookup_id()) {
			(Some((kind, _)), Some(id)) =>
				Verdict::Fail(Error::NotFound { kind, id: id.to_owned(), body }),
			_ => Verdict::Fail(generic_status_error(response, attempt)),
		},
		_ => Verdict::Fail(generic_status_error(response, attempt)),
	}
}

/// Builds the [`Error::Generic`] for a status that has no dedicated classification.
pub fn generic_status_error(response: &HttpResponse, attempt: &RequestAttempt) -> Error {
	Error::Generic {
		message: gateway_message(response).unwrap_or_else(|| {
			format!("Gateway returned HTTP {} for `{}`", response.status, attempt.endpoint)
		}),
		status: Some(response.status),
		body: response.body_text(),
		source: None,
	}
}

/// Extracts the gateway's own error message from a JSON error body, if there is one.
pub fn gateway_message(response: &HttpResponse) -> Option<String> {
	const FIELDS: [&str; 4] = ["message", "error_description", "error", "detail"];

	let body = response.json()?;

	FIELDS.iter().find_map(|field| match body.get(*field)? {
		Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_owned()),
		Value::Object(inner) => inner
			.get("message")
			.and_then(Value::as_str)
			.filter(|text| !text.trim().is_empty())
			.map(|text| text.trim().to_owned()),
		_ => None,
	})
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::gateway::ResourceKind;

	fn order_lookup(order_id: &str) -> RequestAttempt {
		RequestAttempt::new(
			Endpoint::RetrieveOrderPayment,
			Method::Post,
			Some(json!({ "orderId": order_id })),
		)
	}

	#[test]
	fn unauthorized_below_ceiling_retries() {
		let response = HttpResponse::new(401, "{\"message\":\"token expired\"}");
		let mut attempt = order_lookup("ord-1");

		assert!(matches!(classify_response(&response, &attempt, 3), Verdict::Retry));

		attempt.attempt = 2;

		assert!(matches!(classify_response(&response, &attempt, 3), Verdict::Retry));
	}

	#[test]
	fn unauthorized_at_ceiling_fails_auth() {
		let response = HttpResponse::new(401, "{\"message\":\"token expired\"}");
		let mut attempt = order_lookup("ord-1");

		attempt.attempt = 3;

		match classify_response(&response, &attempt, 3) {
			Verdict::Fail(Error::AuthFailed { message, status, body }) => {
				assert_eq!(message, "token expired");
				assert_eq!(status, Some(401));
				assert_eq!(body.as_deref(), Some("{\"message\":\"token expired\"}"));
			},
			other => panic!("Unexpected verdict: {other:?}."),
		}
	}

	#[test]
	fn zero_ceiling_never_retries() {
		let response = HttpResponse::new(401, Vec::new());

		match classify_response(&response, &order_lookup("ord-1"), 0) {
			Verdict::Fail(Error::AuthFailed { status, body, .. }) => {
				assert_eq!(status, Some(401));
				assert_eq!(body, None);
			},
			other => panic!("Unexpected verdict: {other:?}."),
		}
	}

	#[test]
	fn not_found_uses_request_identifier() {
		let response = HttpResponse::new(404, "{\"orderId\":\"something-else\",\"message\":\"nope\"}");

		match classify_response(&response, &order_lookup("ord-42"), 3) {
			Verdict::Fail(Error::NotFound { kind, id, .. }) => {
				assert_eq!(kind, ResourceKind::Order);
				assert_eq!(id, "ord-42");
			},
			other => panic!("Unexpected verdict: {other:?}."),
		}
	}

	#[test]
	fn transaction_not_found_is_payment() {
		let attempt = RequestAttempt::new(
			Endpoint::RetrieveTransactionPayment,
			Method::Post,
			Some(json!({ "transactionId": "tx-9" })),
		);

		match classify_response(&HttpResponse::new(404, "not json"), &attempt, 3) {
			Verdict::Fail(Error::NotFound { kind, id, body }) => {
				assert_eq!(kind, ResourceKind::Payment);
				assert_eq!(id, "tx-9");
				assert_eq!(body.as_deref(), Some("not json"));
			},
			other => panic!("Unexpected verdict: {other:?}."),
		}
	}

	#[test]
	fn not_found_on_mutation_is_generic() {
		let attempt = RequestAttempt::new(
			Endpoint::Transfer,
			Method::Post,
			Some(json!({ "amount": 10, "receiver": "r", "description": "d" })),
		);

		match classify_response(&HttpResponse::new(404, Vec::new()), &attempt, 3) {
			Verdict::Fail(Error::Generic { status, message, .. }) => {
				assert_eq!(status, Some(404));
				assert_eq!(message, "Gateway returned HTTP 404 for `v1/TransFer`");
			},
			other => panic!("Unexpected verdict: {other:?}."),
		}
	}

	#[test]
	fn other_statuses_prefer_gateway_message() {
		let attempt = RequestAttempt::new(Endpoint::CreatePayment, Method::Post, None);
		let response = HttpResponse::new(422, "{\"error\":{\"message\":\"amount too large\"}}");

		match classify_response(&response, &attempt, 3) {
			Verdict::Fail(Error::Generic { message, status, body, source }) => {
				assert_eq!(message, "amount too large");
				assert_eq!(status, Some(422));
				assert!(body.is_some());
				assert!(source.is_none());
			},
			other => panic!("Unexpected verdict: {other:?}."),
		}
	}

	#[test]
	fn unparseable_error_body_keeps_status() {
		let attempt = RequestAttempt::new(Endpoint::CreatePayment, Method::Post, None);

		match classify_response(&HttpResponse::new(500, "<html>oops</html>"), &attempt, 3) {
			Verdict::Fail(err) => {
				assert_eq!(err.status(), Some(500));
				assert_eq!(err.body(), Some("<html>oops</html>"));
				assert_eq!(err.to_string(), "Gateway returned HTTP 500 for `v1/CreatePayment`");
			},
			Verdict::Retry => panic!("Server errors must not be retried."),
		}
	}

	#[test]
	fn gateway_message_skips_blank_fields() {
		let response = HttpResponse::new(400, "{\"message\":\"  \",\"error_description\":\"bad scope\"}");

		assert_eq!(gateway_message(&response).as_deref(), Some("bad scope"));
		assert_eq!(gateway_message(&HttpResponse::new(400, "{\"code\":7}")), None);
	}
}
