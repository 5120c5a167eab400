// self
use crate::{_prelude::*, obs::OperationKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// Span wrapping one operation, from input validation to the decoded reply.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Opens a span tagged with the operation and the call site that started it.
	pub fn new(kind: OperationKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("paygate.operation", operation = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event inside the current span (when tracing is enabled).
pub fn debug_event(kind: OperationKind, message: &'static str, attempt: u32) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(operation = kind.as_str(), attempt, "{message}");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, message, attempt);
	}
}

/// Emits a warning for an operation that ended in `err` (when tracing is enabled).
///
/// Only the error class, status, and message are logged; response bodies may carry payer data.
pub fn failure_event(kind: OperationKind, err: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			operation = kind.as_str(),
			status = ?err.status(),
			local = err.is_local(),
			"{err}"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, err);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = OperationSpan::new(OperationKind::GetOrder, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);

		debug_event(OperationKind::GetOrder, "instrumented future resolved", 0);
		failure_event(OperationKind::GetOrder, &Error::validation("`order_id` must not be empty"));
	}
}
