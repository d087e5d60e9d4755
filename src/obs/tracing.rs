// self
use crate::{_prelude::*, ext::RateLimitRemaining, obs::RequestKind};

/// Future returned by [`RequestSpan::instrument`]; a plain passthrough without `tracing`.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Future returned by [`RequestSpan::instrument`]; a plain passthrough without `tracing`.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// `pinterest.request` span covering one accessor call or token exchange.
///
/// The `status` and `remaining` fields start empty and are filled in by [`record_response`]
/// once the API answers.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Opens a span for `operation` on the `kind` resource group.
	pub fn new(kind: RequestKind, operation: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"pinterest.request",
				kind = kind.as_str(),
				operation,
				status = tracing::field::Empty,
				remaining = tracing::field::Empty
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, operation);

			Self {}
		}
	}

	/// Runs `fut` inside the span.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
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

/// Fills the current request span's `status` and `remaining` fields.
pub fn record_response(status: u16, remaining: RateLimitRemaining) {
	#[cfg(feature = "tracing")]
	{
		let span = tracing::Span::current();

		span.record("status", status);

		if let RateLimitRemaining::Known(remaining) = remaining {
			span.record("remaining", remaining);
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (status, remaining);
	}
}
