//! Creates a payment and looks it up again against a mock gateway, reusing one cached bearer
//! token for both calls.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use paygate::{
	ClientConfig, ClientCredentials, Environment, ReqwestPaymentClient, http::ReqwestHttpClient,
	reqwest::Client,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-bearer\",\"expires_in\":900}");
		})
		.await;
	let _create_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/CreatePayment").header("authorization", "Bearer demo-bearer");
			then.status(200).header("content-type", "application/json").body(
				"{\"payment_token\":{\"token\":\"pt-demo\"},\"status\":201,\"mode\":\"sandbox\"}",
			);
		})
		.await;
	let _order_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/RetrieveOrderPayment");
			then.status(200).header("content-type", "application/json").body(
				"{\"payment\":{\"reference\":\"order-42\",\"transaction_id\":\"tx-42\",\"message\":\"successful\"}}",
			);
		})
		.await;
	let config = ClientConfig::builder(
		ClientCredentials::new("demo-merchant", "super-secret"),
		Environment::Sandbox,
	)
	.base_url(Url::parse(&server.url("/"))?)
	.build()?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client = ReqwestPaymentClient::with_reqwest(config, http_client);
	let created = client.create_payment(4_200, "order-42").await?;
	let lookup = client.get_order("order-42").await?;

	println!("Payment token: {}.", created.payment_token.token);
	println!(
		"Transaction {} settled: {}.",
		lookup.payment.transaction_id,
		lookup.payment.is_successful()
	);

	token_mock.assert_calls_async(1).await;

	Ok(())
}
