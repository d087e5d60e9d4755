//! Client-level error types shared across the transport, authorizer, and endpoint accessors.

// self
use crate::{
	_prelude::*,
	auth::{IdentifierError, ScopeValidationError},
	provider::ApiDescriptorError,
};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Resource name does not match any known endpoint accessor.
	#[error(transparent)]
	UnknownEndpoint(#[from] UnknownEndpointError),
	/// A required path identifier was empty or malformed.
	#[error(transparent)]
	InvalidIdentifier(#[from] IdentifierError),
	/// A requested scope cannot be joined unambiguously.
	#[error(transparent)]
	InvalidScope(#[from] ScopeValidationError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token exchange failed.
	#[error(transparent)]
	Auth(#[from] AuthError),

	/// Remote API answered with a non-success status.
	#[error("API returned HTTP {status}: {body}")]
	Api {
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// A success response carried a body that is not valid JSON.
	#[error("API returned malformed JSON (HTTP {status}).")]
	Decode {
		/// Structured parsing failure, including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code of the response.
		status: u16,
	},
}
impl Error {
	/// Returns the HTTP status associated with the failure, when one was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api { status, .. } | Self::Decode { status, .. } => Some(*status),
			Self::Auth(AuthError::TokenRejected { status, .. }) => Some(*status),
			_ => None,
		}
	}
}

/// Raised when an endpoint accessor is requested by a name outside the known set.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unknown endpoint `{name}`; expected one of users, boards, following, pins.")]
pub struct UnknownEndpointError {
	/// The rejected endpoint name.
	pub name: String,
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Header value contains characters HTTP does not allow.
	#[error("Header value is invalid.")]
	InvalidHeaderValue(#[from] oauth2::http::header::InvalidHeaderValue),
	/// Request path could not be resolved against the base URL.
	#[error("Request path `{path}` cannot be resolved.")]
	InvalidPath {
		/// The offending path.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// API descriptor failed validation.
	#[error(transparent)]
	Descriptor(#[from] ApiDescriptorError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
	/// HTTP client failed without a structured error.
	#[error("HTTP client error occurred while calling the API: {message}")]
	Other {
		/// Client-supplied description.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Authorization-code exchange failures.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// The authorization code was empty.
	#[error("Authorization code cannot be empty.")]
	MissingCode,
	/// Token endpoint answered with a non-success status.
	#[error("Token endpoint rejected the exchange with HTTP {status}: {body}")]
	TokenRejected {
		/// HTTP status code.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Token endpoint succeeded but the payload is not a token response.
	#[error("Token endpoint response is malformed.")]
	MalformedTokenResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Token endpoint returned an empty access token.
	#[error("Token endpoint returned an empty access token.")]
	EmptyAccessToken,
	/// The `state` returned on the redirect does not match the one that was issued.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}
