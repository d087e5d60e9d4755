// self
use crate::obs::{RequestKind, RequestOutcome};

/// Bumps `pinterest_request_total{kind, outcome}`.
pub fn record_request_outcome(kind: RequestKind, outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"pinterest_request_total",
			"kind" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Publishes the last advertised call budget as the `pinterest_rate_limit_remaining` gauge.
pub fn record_rate_limit_remaining(remaining: u64) {
	#[cfg(feature = "metrics")]
	{
		metrics::gauge!("pinterest_rate_limit_remaining").set(remaining as f64);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = remaining;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_are_noops_without_an_installed_recorder() {
		record_request_outcome(RequestKind::OAuth, RequestOutcome::Failure);
		record_rate_limit_remaining(0);
	}
}
