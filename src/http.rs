//! HTTP primitives shared by the transport.
//!
//! The module exposes [`ApiHttpClient`] alongside [`ResponseMetadata`] and
//! [`ResponseMetadataSlot`] so downstream crates can plug in custom HTTP clients while the
//! transport keeps recording the status and headers of the most recent response.

pub use oauth2::{
	HttpClientError, HttpRequest, HttpResponse,
	http::{HeaderMap, HeaderValue, StatusCode},
};

// self
use crate::_prelude::*;

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type HttpFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, HttpClientError<E>>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing a single API request.
///
/// This trait is the client's only dependency on an HTTP implementation. The transport
/// builds a fully formed [`HttpRequest`] (URL, method, headers, bearer credential, body) and
/// hands it over; implementations perform exactly one round trip and return the raw
/// [`HttpResponse`] regardless of its status. Non-success statuses are classified by the
/// transport, so implementations must only fail for transport-level problems.
///
/// Implementations must be `Send + Sync + 'static` so they can be shared behind `Arc`.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Executes `request` and resolves once the full response body is available.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// Status and headers captured from one HTTP response.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadata {
	/// HTTP status code.
	pub status: u16,
	/// Response headers as received.
	pub headers: HeaderMap,
}

/// Thread-safe slot holding the metadata of the most recent response.
///
/// The slot is last-writer-wins: every call overwrites it, so readers that need per-call
/// attribution should use the headers returned with each response instead.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadataSlot(Arc<Mutex<Option<ResponseMetadata>>>);
impl ResponseMetadataSlot {
	/// Stores new metadata, replacing whatever the previous call left behind.
	pub fn store(&self, meta: ResponseMetadata) {
		*self.0.lock() = Some(meta);
	}

	/// Returns the captured metadata, if any, consuming it from the slot.
	pub fn take(&self) -> Option<ResponseMetadata> {
		self.0.lock().take()
	}

	/// Returns a copy of the captured metadata without clearing the slot.
	pub fn snapshot(&self) -> Option<ResponseMetadata> {
		self.0.lock().clone()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
