// self
use crate::{
	_prelude::*,
	provider::{ApiDescriptor, ApiQuirks},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ApiDescriptorError {
	/// A built-in or derived URL failed to parse.
	#[error("The {endpoint} URL is invalid: {reason}.")]
	InvalidUrl {
		/// Which URL failed to parse.
		endpoint: &'static str,
		/// Parser message.
		reason: String,
	},
	/// Endpoints must use HTTPS unless they point at a loopback host.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Relative joins drop the last path segment unless the base ends with `/`.
	#[error("The base URL must end with `/`: {url}.")]
	BaseUrlWithoutTrailingSlash {
		/// Base URL that failed validation.
		url: String,
	},
	/// Reject scope delimiters that are control characters.
	#[error("Scope delimiter must be a printable character.")]
	InvalidScopeDelimiter {
		/// Invalid delimiter that was supplied.
		delimiter: char,
	},
}

/// Builder for [`ApiDescriptor`] values.
#[derive(Debug, Default)]
pub struct ApiDescriptorBuilder {
	/// Base URL override; production when unset.
	pub base_url: Option<Url>,
	/// Authorization endpoint override; production when unset.
	pub authorization_endpoint: Option<Url>,
	/// Token endpoint override; `{base_url}oauth/token` when unset.
	pub token_endpoint: Option<Url>,
	/// Provider-specific quirks.
	pub quirks: ApiQuirks,
}
impl ApiDescriptorBuilder {
	/// Creates a new builder with production defaults.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the base URL resource paths are joined onto.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Overrides the provider quirks.
	pub fn quirks(mut self, quirks: ApiQuirks) -> Self {
		self.quirks = quirks;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ApiDescriptor, ApiDescriptorError> {
		let base_url = match self.base_url {
			Some(url) => url,
			None => parse_url("base", ApiDescriptor::PINTEREST_BASE_URL)?,
		};
		let authorization_endpoint = match self.authorization_endpoint {
			Some(url) => url,
			None => parse_url("authorization", ApiDescriptor::PINTEREST_AUTHORIZATION_URL)?,
		};
		let token_endpoint = match self.token_endpoint {
			Some(url) => url,
			None => base_url.join(ApiDescriptor::TOKEN_PATH).map_err(|e| {
				ApiDescriptorError::InvalidUrl { endpoint: "token", reason: e.to_string() }
			})?,
		};
		let descriptor =
			ApiDescriptor { base_url, authorization_endpoint, token_endpoint, quirks: self.quirks };

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl ApiDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), ApiDescriptorError> {
		validate_endpoint("base", &self.base_url)?;
		validate_endpoint("authorization", &self.authorization_endpoint)?;
		validate_endpoint("token", &self.token_endpoint)?;

		if !self.base_url.path().ends_with('/') {
			return Err(ApiDescriptorError::BaseUrlWithoutTrailingSlash {
				url: self.base_url.to_string(),
			});
		}

		validate_scope_delimiter(self.quirks.scope_delimiter)?;

		Ok(())
	}
}

fn parse_url(endpoint: &'static str, raw: &str) -> Result<Url, ApiDescriptorError> {
	Url::parse(raw).map_err(|e| ApiDescriptorError::InvalidUrl { endpoint, reason: e.to_string() })
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), ApiDescriptorError> {
	let loopback = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));

	if url.scheme() == "https" || (url.scheme() == "http" && loopback) {
		Ok(())
	} else {
		Err(ApiDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	}
}

fn validate_scope_delimiter(delimiter: char) -> Result<(), ApiDescriptorError> {
	if delimiter.is_control() {
		Err(ApiDescriptorError::InvalidScopeDelimiter { delimiter })
	} else {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("Test URL should parse successfully.")
	}

	#[test]
	fn rejects_insecure_remote_endpoints() {
		let err = ApiDescriptor::builder()
			.base_url(url("http://api.example.com/v1/"))
			.build()
			.expect_err("Plain HTTP must be rejected for remote hosts.");

		assert!(matches!(err, ApiDescriptorError::InsecureEndpoint { endpoint: "base", .. }));
	}

	#[test]
	fn loopback_hosts_may_use_http() {
		let descriptor = ApiDescriptor::builder()
			.base_url(url("http://127.0.0.1:8080/v1/"))
			.authorization_endpoint(url("http://localhost:8080/oauth/"))
			.build()
			.expect("Loopback endpoints should be accepted.");

		assert_eq!(descriptor.token_endpoint.as_str(), "http://127.0.0.1:8080/v1/oauth/token");
	}

	#[test]
	fn base_url_requires_trailing_slash() {
		let err = ApiDescriptor::builder()
			.base_url(url("https://api.example.com/v1"))
			.build()
			.expect_err("Base URL without trailing slash must be rejected.");

		assert!(matches!(err, ApiDescriptorError::BaseUrlWithoutTrailingSlash { .. }));
	}

	#[test]
	fn control_scope_delimiter_is_rejected() {
		let quirks = ApiQuirks { scope_delimiter: '\n', ..ApiQuirks::default() };
		let err = ApiDescriptor::builder()
			.quirks(quirks)
			.build()
			.expect_err("Control delimiters must be rejected.");

		assert_eq!(err, ApiDescriptorError::InvalidScopeDelimiter { delimiter: '\n' });
	}

	#[test]
	fn explicit_token_endpoint_wins() {
		let descriptor = ApiDescriptor::builder()
			.token_endpoint(url("https://auth.example.com/token"))
			.build()
			.expect("Descriptor with explicit token endpoint should build.");

		assert_eq!(descriptor.token_endpoint.as_str(), "https://auth.example.com/token");
	}
}
