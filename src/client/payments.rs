//! Payment operations: input validation and body shaping in front of the dispatcher.

// self
use crate::{
	_prelude::*,
	classify::TransportErrorMapper,
	client::{PaymentClient, observe},
	gateway::Endpoint,
	http::GatewayHttpClient,
	obs::OperationKind,
	payment::{
		CreatePaymentRequest, CreatePaymentResponse, OrderLookupRequest, PaymentLookupResponse,
		TransactionLookupRequest, TransferRequest, TransferResponse,
	},
};

impl<C, M> PaymentClient<C, M>
where
	C: ?Sized + GatewayHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a payment token for `order_id` worth `amount`.
	///
	/// `amount` is forwarded unchanged as the gateway's `amount` field; no currency conversion
	/// happens here.
	pub async fn create_payment(
		&self,
		amount: u64,
		order_id: &str,
	) -> Result<CreatePaymentResponse> {
		observe(OperationKind::CreatePayment, "create_payment", async move {
			let body = CreatePaymentRequest {
				amount: require_amount(amount)?,
				order_id: require_id("order_id", order_id)?,
			};

			self.post_json(Endpoint::CreatePayment, &body).await
		})
		.await
	}

	/// Looks up the payment attached to a merchant order.
	///
	/// A 404 surfaces as [`Error::NotFound`] tagged with `order_id`.
	pub async fn get_order(&self, order_id: &str) -> Result<PaymentLookupResponse> {
		observe(OperationKind::GetOrder, "get_order", async move {
			let body = OrderLookupRequest { order_id: require_id("order_id", order_id)? };

			self.post_json(Endpoint::RetrieveOrderPayment, &body).await
		})
		.await
	}

	/// Looks up a payment by gateway transaction identifier.
	///
	/// A 404 surfaces as [`Error::NotFound`] tagged with `transaction_id`.
	pub async fn get_transaction(&self, transaction_id: &str) -> Result<PaymentLookupResponse> {
		observe(OperationKind::GetTransaction, "get_transaction", async move {
			let body = TransactionLookupRequest {
				transaction_id: require_id("transaction_id", transaction_id)?,
			};

			self.post_json(Endpoint::RetrieveTransactionPayment, &body).await
		})
		.await
	}

	/// Sends `amount` to `receiver` with a free-form `description`.
	pub async fn transfer(
		&self,
		amount: u64,
		receiver: &str,
		description: &str,
	) -> Result<TransferResponse> {
		observe(OperationKind::Transfer, "transfer", async move {
			let body = TransferRequest {
				amount: require_amount(amount)?,
				receiver: require_id("receiver", receiver)?,
				description: description.to_owned(),
			};

			self.post_json(Endpoint::Transfer, &body).await
		})
		.await
	}
}

fn require_amount(amount: u64) -> Result<u64> {
	if amount == 0 {
		return Err(Error::validation("`amount` must be greater than zero"));
	}

	Ok(amount)
}

fn require_id(field: &'static str, value: &str) -> Result<String> {
	if value.trim().is_empty() {
		return Err(Error::validation(format!("`{field}` must not be empty")));
	}

	Ok(value.to_owned())
}
