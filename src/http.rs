//! Transport primitives for gateway calls.
//!
//! [`GatewayHttpClient`] is the client's only dependency on an HTTP stack. The dispatcher and
//! the token acquirer build fully-formed [`HttpRequest`] values (URL, headers, encoded body,
//! deadline) and expect an [`HttpResponse`] carrying the raw status and body back, whatever the
//! status. Implementations must enforce [`HttpRequest::timeout`] by aborting the in-flight call
//! and report that through their transport error so a
//! [`TransportErrorMapper`](crate::classify::TransportErrorMapper) can classify it as a timeout.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Boxed future returned by [`GatewayHttpClient::execute`].
pub type HttpFuture<'a, E> = Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of reaching the payment gateway.
pub trait GatewayHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and resolves with the response, whatever its status.
	///
	/// Only failures that prevent a response from being received (DNS, TLS, connection
	/// resets, deadline expiry) resolve to `Err`.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// HTTP verbs used against the gateway.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Method {
	/// `POST`; every gateway endpoint uses it.
	#[default]
	Post,
}
impl Method {
	/// Returns the verb as sent on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Post => "POST",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
#[cfg(feature = "reqwest")]
impl From<Method> for reqwest::Method {
	fn from(method: Method) -> Self {
		match method {
			Method::Post => reqwest::Method::POST,
		}
	}
}

/// Fully-formed outbound request.
#[derive(Clone)]
pub struct HttpRequest {
	/// Verb.
	pub method: Method,
	/// Absolute endpoint URL.
	pub url: Url,
	/// `Authorization` header value (`Basic ...` or `Bearer ...`).
	pub authorization: TokenSecret,
	/// `Content-Type` of `body`.
	pub content_type: &'static str,
	/// Encoded request body.
	pub body: Option<Vec<u8>>,
	/// Deadline for the whole call, including reading the body.
	pub timeout: StdDuration,
}
impl HttpRequest {
	/// Content type for JSON bodies.
	pub const JSON: &'static str = "application/json";
	/// Content type for form-encoded bodies.
	pub const FORM: &'static str = "application/x-www-form-urlencoded";

	/// Request body as UTF-8 text, when it is valid UTF-8.
	pub fn body_text(&self) -> Option<&str> {
		self.body.as_deref().and_then(|bytes| std::str::from_utf8(bytes).ok())
	}
}
impl Debug for HttpRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("HttpRequest")
			.field("method", &self.method)
			.field("url", &self.url.as_str())
			.field("authorization", &"<redacted>")
			.field("content_type", &self.content_type)
			.field("body_len", &self.body.as_ref().map(Vec::len))
			.field("timeout", &self.timeout)
			.finish()
	}
}

/// Raw response handed back by a transport.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Builds a response from a status and body.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Body decoded lossily as UTF-8, or `None` when empty.
	pub fn body_text(&self) -> Option<String> {
		if self.body.is_empty() {
			None
		} else {
			Some(String::from_utf8_lossy(&self.body).into_owned())
		}
	}

	/// Best-effort JSON parse of the body; `None` when empty or malformed.
	pub fn json(&self) -> Option<Value> {
		if self.body.is_empty() {
			return None;
		}

		serde_json::from_slice(&self.body).ok()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Gateway calls should not follow redirects; build the wrapper through
/// [`ReqwestHttpClient::try_new`], which disables them, or hand a configured client to
/// [`ReqwestHttpClient::with_client`].
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds the default client: no redirects.
	pub fn try_new() -> Result<Self, crate::error::ConfigError> {
		let client = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl GatewayHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut builder = client
				.request(request.method.into(), request.url)
				.timeout(request.timeout)
				.header(reqwest::header::AUTHORIZATION, request.authorization.expose())
				.header(reqwest::header::ACCEPT, HttpRequest::JSON);

			if let Some(body) = request.body {
				builder = builder.header(reqwest::header::CONTENT_TYPE, request.content_type).body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(HttpResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	#[cfg(feature = "reqwest")] use httpmock::prelude::*;
	// self
	use super::*;
	use super::Method;

	#[cfg(feature = "reqwest")]
	#[tokio::test]
	async fn reqwest_transport_surfaces_redirects_without_following() {
		let server = MockServer::start_async().await;
		let redirect = server
			.mock_async(|when, then| {
				when.method(POST).path("/v1/TransFer");
				then.status(302).header("location", "/elsewhere");
			})
			.await;
		let elsewhere = server
			.mock_async(|when, then| {
				when.path("/elsewhere");
				then.status(200);
			})
			.await;
		let transport = ReqwestHttpClient::try_new().expect("Default transport should build.");
		let response = transport
			.execute(HttpRequest {
				method: Method::Post,
				url: Url::parse(&server.url("/v1/TransFer")).expect("Mock URL should parse."),
				authorization: TokenSecret::new("Bearer gateway-bearer"),
				content_type: HttpRequest::JSON,
				body: Some(b"{}".to_vec()),
				timeout: StdDuration::from_secs(5),
			})
			.await
			.expect("Redirect responses should be returned as-is.");

		assert_eq!(response.status, 302);
		assert_eq!(Method::Post.to_string(), "POST");

		redirect.assert_async().await;
		elsewhere.assert_calls_async(0).await;
	}

	#[test]
	fn request_debug_redacts_authorization() {
		let request = HttpRequest {
			method: Method::Post,
			url: Url::parse("https://gateway.example/oauth/token").expect("URL should parse."),
			authorization: TokenSecret::new("Basic bWVyY2hhbnQ6c2VjcmV0"),
			content_type: HttpRequest::FORM,
			body: Some(b"grant_type=client_credentials".to_vec()),
			timeout: StdDuration::from_secs(30),
		};
		let rendered = format!("{request:?}");

		assert!(!rendered.contains("bWVyY2hhbnQ6c2VjcmV0"));
		assert!(rendered.contains("<redacted>"));
		assert_eq!(request.body_text(), Some("grant_type=client_credentials"));
	}

	#[test]
	fn response_json_is_best_effort() {
		assert_eq!(HttpResponse::new(200, "{\"ok\":true}").json(), Some(serde_json::json!({"ok": true})));
		assert_eq!(HttpResponse::new(502, "<html>Bad Gateway</html>").json(), None);
		assert_eq!(HttpResponse::new(204, Vec::new()).json(), None);
		assert_eq!(HttpResponse::new(204, Vec::new()).body_text(), None);
	}

	#[test]
	fn success_covers_2xx_only() {
		assert!(HttpResponse::new(200, "").is_success());
		assert!(HttpResponse::new(299, "").is_success());
		assert!(!HttpResponse::new(301, "").is_success());
		assert!(!HttpResponse::new(401, "").is_success());
	}
}
