//! Optional observability helpers for API calls.
//!
//! # Feature Flags
//!
//! - `tracing`: each call runs in a `pinterest.request` span carrying `kind` (resource group)
//!   and `operation` (accessor method). The response status and `X-RateLimit-Remaining` value
//!   land in its `status` and `remaining` fields.
//! - `metrics`: `pinterest_request_total{kind, outcome}` counts attempts, successes, and
//!   failures; `pinterest_rate_limit_remaining` tracks the last advertised budget.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{_prelude::*, endpoints::Endpoint, ext::RateLimit, http::HeaderMap};

/// Request groups observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
	/// Users accessor calls.
	Users,
	/// Boards accessor calls.
	Boards,
	/// Following accessor calls.
	Following,
	/// Pins accessor calls.
	Pins,
	/// Token endpoint exchanges.
	OAuth,
}
impl RequestKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestKind::Users => "users",
			RequestKind::Boards => "boards",
			RequestKind::Following => "following",
			RequestKind::Pins => "pins",
			RequestKind::OAuth => "oauth",
		}
	}
}
impl From<Endpoint> for RequestKind {
	fn from(endpoint: Endpoint) -> Self {
		match endpoint {
			Endpoint::Users => RequestKind::Users,
			Endpoint::Boards => RequestKind::Boards,
			Endpoint::Following => RequestKind::Following,
			Endpoint::Pins => RequestKind::Pins,
		}
	}
}
impl Display for RequestKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to an accessor or exchange.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside a request span and records attempt plus success/failure outcomes.
pub(crate) async fn observe<T, Fut>(
	kind: RequestKind,
	operation: &'static str,
	fut: Fut,
) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = RequestSpan::new(kind, operation);

	record_request_outcome(kind, RequestOutcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => record_request_outcome(kind, RequestOutcome::Success),
		Err(_) => record_request_outcome(kind, RequestOutcome::Failure),
	}

	result
}

/// Records what a response said about itself on the current span and in the gauge.
pub(crate) fn record_api_response(status: u16, headers: &HeaderMap) {
	let remaining = RateLimit::from_headers(headers).remaining;

	record_response(status, remaining);

	if let Some(remaining) = remaining.known() {
		record_rate_limit_remaining(remaining);
	}
}
