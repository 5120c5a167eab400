//! Request and response payloads for the gateway's payment endpoints.
//!
//! Only fields the client relies on are typed strictly. `status`, `timestamp`, and other values
//! whose shape the gateway does not pin down are kept as raw JSON.

// self
use crate::_prelude::*;

/// Body of `POST v1/CreatePayment`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
	/// Amount as sent in the gateway's `amount` field, in the gateway's own unit.
	pub amount: u64,
	/// Merchant order identifier.
	pub order_id: String,
}

/// Body of `POST v1/RetrieveOrderPayment`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLookupRequest {
	/// Merchant order identifier.
	pub order_id: String,
}

/// Body of `POST v1/RetrieveTransactionPayment`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLookupRequest {
	/// Gateway transaction identifier.
	pub transaction_id: String,
}

/// Body of `POST v1/TransFer`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
	/// Amount as sent in the gateway's `amount` field, in the gateway's own unit.
	pub amount: u64,
	/// Receiving account.
	pub receiver: String,
	/// Free-form description shown to the receiver.
	pub description: String,
}

/// Payment token minted by `CreatePayment`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentToken {
	/// Token the payer uses to complete the payment.
	pub token: String,
	/// Creation timestamp as reported by the gateway.
	#[serde(default)]
	pub created: Option<String>,
	/// Expiry timestamp as reported by the gateway.
	#[serde(default)]
	pub expired: Option<String>,
}

/// Response of `CreatePayment`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatePaymentResponse {
	/// Minted payment token.
	pub payment_token: PaymentToken,
	/// Gateway status field.
	#[serde(default)]
	pub status: Value,
	/// Gateway timestamp field.
	#[serde(default)]
	pub timestamp: Value,
	/// Gateway mode (`live`/`sandbox`), when reported.
	#[serde(default)]
	pub mode: Option<String>,
}

/// Settlement state reported in a payment's `message` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
	/// Payment went through.
	Successful,
	/// Payment was declined or abandoned.
	Failed,
	/// Any value this client does not recognize.
	#[serde(other)]
	Unknown,
}

/// Payment details returned by the lookup endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
	/// Merchant reference (usually the order identifier).
	#[serde(default)]
	pub reference: Option<String>,
	/// Gateway transaction identifier.
	pub transaction_id: String,
	/// Charged amount.
	#[serde(default)]
	pub cost: Value,
	/// Settlement state.
	pub message: PaymentStatus,
	/// Payer details as reported by the gateway.
	#[serde(default)]
	pub payer: Value,
}
impl PaymentRecord {
	/// Returns `true` if the gateway reports the payment as successful.
	pub fn is_successful(&self) -> bool {
		matches!(self.message, PaymentStatus::Successful)
	}
}

/// Response of `RetrieveOrderPayment` and `RetrieveTransactionPayment`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentLookupResponse {
	/// Payment details.
	pub payment: PaymentRecord,
	/// Gateway status field.
	#[serde(default)]
	pub status: Value,
	/// Gateway timestamp field.
	#[serde(default)]
	pub timestamp: Value,
}

/// Transfer details returned by `TransFer`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
	/// Gateway transaction identifier.
	pub transaction_id: String,
	/// Transferred amount.
	#[serde(default)]
	pub amount: Value,
	/// Receiving account.
	#[serde(default)]
	pub receiver: Option<String>,
	/// Settlement state.
	pub message: PaymentStatus,
	/// Description echoed back by the gateway.
	#[serde(default)]
	pub desc: Option<String>,
}

/// Response of `TransFer`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransferResponse {
	/// Transfer details.
	pub transfer: TransferRecord,
	/// Gateway status field.
	#[serde(default)]
	pub status: Value,
	/// Gateway timestamp field.
	#[serde(default)]
	pub timestamp: Value,
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn requests_use_gateway_field_names() {
		let create = serde_json::to_value(CreatePaymentRequest { amount: 1500, order_id: "ord-1".into() })
			.expect("Create request should serialize.");
		let lookup = serde_json::to_value(TransactionLookupRequest { transaction_id: "tx-1".into() })
			.expect("Lookup request should serialize.");

		assert_eq!(create, json!({ "amount": 1500, "orderId": "ord-1" }));
		assert_eq!(lookup, json!({ "transactionId": "tx-1" }));
	}

	#[test]
	fn lookup_response_tolerates_unknown_status_values() {
		let response: PaymentLookupResponse = serde_json::from_value(json!({
			"payment": {
				"reference": "ord-1",
				"transaction_id": "tx-1",
				"cost": 1500,
				"message": "pending",
				"payer": { "phone": "+22900000000" }
			},
			"status": 200,
			"timestamp": "2025-06-01T12:00:00Z"
		}))
		.expect("Lookup response should deserialize.");

		assert_eq!(response.payment.message, PaymentStatus::Unknown);
		assert!(!response.payment.is_successful());
		assert_eq!(response.status, json!(200));
	}

	#[test]
	fn create_response_allows_missing_optional_fields() {
		let response: CreatePaymentResponse = serde_json::from_value(json!({
			"payment_token": { "token": "pt-1" }
		}))
		.expect("Minimal create response should deserialize.");

		assert_eq!(response.payment_token.token, "pt-1");
		assert_eq!(response.mode, None);
		assert_eq!(response.status, Value::Null);
	}
}
