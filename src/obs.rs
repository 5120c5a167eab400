//! Optional observability helpers for gateway operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `paygate.operation` with the `operation`
//!   and `stage` (call site) fields.
//! - Enable `metrics` to increment the `paygate_operation_total` counter for every
//!   attempt/retry/success/failure, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, gateway::Endpoint};

/// Operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Client-credentials token exchange.
	TokenAcquire,
	/// `create_payment`.
	CreatePayment,
	/// `get_order`.
	GetOrder,
	/// `get_transaction`.
	GetTransaction,
	/// `transfer`.
	Transfer,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::TokenAcquire => "token_acquire",
			OperationKind::CreatePayment => "create_payment",
			OperationKind::GetOrder => "get_order",
			OperationKind::GetTransaction => "get_transaction",
			OperationKind::Transfer => "transfer",
		}
	}
}
impl From<Endpoint> for OperationKind {
	fn from(endpoint: Endpoint) -> Self {
		match endpoint {
			Endpoint::Token => OperationKind::TokenAcquire,
			Endpoint::CreatePayment => OperationKind::CreatePayment,
			Endpoint::RetrieveOrderPayment => OperationKind::GetOrder,
			Endpoint::RetrieveTransactionPayment => OperationKind::GetTransaction,
			Endpoint::Transfer => OperationKind::Transfer,
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to an operation.
	Attempt,
	/// A 401 triggered a token refresh and another dispatch.
	Retry,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Retry => "retry",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
