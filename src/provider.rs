//! API descriptor: the URLs and provider quirks every client instance is configured with.
//!
//! [`ApiDescriptor::pinterest`] yields the production values; the builder lets hosts point the
//! client at a proxy, a sandbox, or a local mock server.

/// Builder API for assembling API descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::{_prelude::*, ext::DEFAULT_RATE_LIMIT};

/// Provider-specific quirks that influence how requests are built and reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiQuirks {
	/// Character used to join scopes in the authorization URL.
	pub scope_delimiter: char,
	/// Budget reported by rate-limit introspection before any response advertises one.
	pub default_rate_limit: u64,
}
impl Default for ApiQuirks {
	fn default() -> Self {
		Self { scope_delimiter: ',', default_rate_limit: DEFAULT_RATE_LIMIT }
	}
}

/// Immutable API descriptor consumed by the transport and the authorizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDescriptor {
	/// Base URL every resource path is joined onto. Always ends with `/`.
	pub base_url: Url,
	/// Authorization endpoint users are redirected to.
	pub authorization_endpoint: Url,
	/// Token endpoint used for authorization-code exchanges.
	pub token_endpoint: Url,
	/// Provider-specific quirks.
	pub quirks: ApiQuirks,
}
impl ApiDescriptor {
	/// Production API base URL.
	pub const PINTEREST_BASE_URL: &'static str = "https://api.pinterest.com/v1/";
	/// Production authorization endpoint.
	pub const PINTEREST_AUTHORIZATION_URL: &'static str = "https://api.pinterest.com/oauth/";
	/// Token endpoint path relative to the base URL.
	pub const TOKEN_PATH: &'static str = "oauth/token";

	/// Creates a new builder seeded with the production URLs.
	pub fn builder() -> ApiDescriptorBuilder {
		ApiDescriptorBuilder::new()
	}

	/// Returns the production descriptor.
	pub fn pinterest() -> Result<Self, ApiDescriptorError> {
		Self::builder().build()
	}
}
