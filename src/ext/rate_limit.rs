//! Rate-limit budget parsing from API response headers.
//!
//! The client only reports what the server advertises; it never throttles or delays calls.

// crates.io
use oauth2::http::HeaderMap;
// self
use crate::_prelude::*;

/// Header carrying the request budget for the current window.
pub const RATE_LIMIT_HEADER: &str = "X-RateLimit-Limit";
/// Header carrying the requests left in the current window.
pub const RATE_LIMIT_REMAINING_HEADER: &str = "X-RateLimit-Remaining";
/// Budget reported when no response has advertised one yet.
///
/// The API publishes no contract for this value; it is a fixed fallback that callers can
/// override through [`ApiQuirks::default_rate_limit`](crate::provider::ApiQuirks).
pub const DEFAULT_RATE_LIMIT: u64 = 1000;

/// Remaining request budget as advertised by the last response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitRemaining {
	/// The server reported this many remaining calls.
	Known(u64),
	/// No response has reported a remaining budget.
	#[default]
	Unknown,
}
impl RateLimitRemaining {
	/// Returns the remaining count when known.
	pub fn known(self) -> Option<u64> {
		match self {
			RateLimitRemaining::Known(value) => Some(value),
			RateLimitRemaining::Unknown => None,
		}
	}
}
impl Display for RateLimitRemaining {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			RateLimitRemaining::Known(value) => write!(f, "{value}"),
			RateLimitRemaining::Unknown => f.write_str("unknown"),
		}
	}
}

/// Rate-limit headers extracted from one response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
	/// Advertised budget, if the header was present and numeric.
	pub limit: Option<u64>,
	/// Advertised remaining calls.
	pub remaining: RateLimitRemaining,
}
impl RateLimit {
	/// Reads both rate-limit headers; absent or non-numeric values count as missing.
	pub fn from_headers(headers: &HeaderMap) -> Self {
		let limit = parse_header(headers, RATE_LIMIT_HEADER);
		let remaining = parse_header(headers, RATE_LIMIT_REMAINING_HEADER)
			.map_or(RateLimitRemaining::Unknown, RateLimitRemaining::Known);

		Self { limit, remaining }
	}

	/// Returns the advertised budget or `fallback` when none was advertised.
	pub fn limit_or(&self, fallback: u64) -> u64 {
		self.limit.unwrap_or(fallback)
	}
}

fn parse_header(headers: &HeaderMap, name: &str) -> Option<u64> {
	headers.get(name)?.to_str().ok()?.trim().parse().ok()
}
