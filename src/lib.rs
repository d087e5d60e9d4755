//! Pinterest REST API client: OAuth 2.0 authorization, lazily cached endpoint accessors, and
//! rate-limit introspection over a pluggable HTTP transport.
//!
//! ```no_run
//! # async fn demo() -> pinterest_client::error::Result<()> {
//! use pinterest_client::{client::Pinterest, transport::RequestParams};
//!
//! let client = Pinterest::new("client-id", "client-secret")?;
//!
//! client.auth().set_access_token("token-from-a-previous-exchange");
//!
//! let boards = client.boards().list(RequestParams::new()).await?;
//!
//! println!("{boards}");
//! println!("{} of {} calls remaining", client.rate_limit_remaining(), client.rate_limit());
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod ext;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod provider;
pub mod transport;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// crates.io
	use oauth2::http::{HeaderMap, Response as HttpResponseBuilder, StatusCode};
	// self
	use crate::{
		client::Pinterest,
		http::{ApiHttpClient, HttpClientError, HttpFuture, HttpRequest, HttpResponse},
		provider::ApiDescriptor,
	};
	#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

	/// Client identifier shared by test fixtures.
	pub const TEST_CLIENT_ID: &str = "client-it";
	/// Client secret shared by test fixtures.
	pub const TEST_CLIENT_SECRET: &str = "secret-it";

	/// Snapshot of a request observed by [`StubHttpClient`].
	#[derive(Clone, Debug)]
	pub struct RecordedRequest {
		/// HTTP method in upper case.
		pub method: String,
		/// Fully resolved request URI.
		pub uri: String,
		/// Request headers, including any bearer credential.
		pub headers: HeaderMap,
		/// Raw request body.
		pub body: Vec<u8>,
	}
	impl RecordedRequest {
		/// Returns the `Authorization` header as a string, if present.
		pub fn authorization(&self) -> Option<&str> {
			self.headers.get("authorization").and_then(|value| value.to_str().ok())
		}

		/// Returns the body as UTF-8 text.
		pub fn body_text(&self) -> String {
			String::from_utf8_lossy(&self.body).into_owned()
		}
	}

	/// Transport error emitted by [`StubHttpClient`] when a failure is scripted.
	#[derive(Debug, ThisError)]
	#[error("Stub transport failure: {0}.")]
	pub struct StubTransportError(pub String);

	enum StubReply {
		Response { status: u16, headers: Vec<(String, String)>, body: String },
		Failure(String),
	}

	/// In-process [`ApiHttpClient`] that replays scripted replies in FIFO order and records every
	/// request it receives. Clones share the same script and log.
	#[derive(Clone, Default)]
	pub struct StubHttpClient {
		replies: Arc<Mutex<VecDeque<StubReply>>>,
		requests: Arc<Mutex<Vec<RecordedRequest>>>,
	}
	impl StubHttpClient {
		/// Queues a response with the provided status, headers, and body.
		pub fn reply(self, status: u16, headers: &[(&str, &str)], body: &str) -> Self {
			let headers =
				headers.iter().map(|(name, value)| ((*name).to_owned(), (*value).to_owned())).collect();

			self.replies.lock().push_back(StubReply::Response {
				status,
				headers,
				body: body.to_owned(),
			});

			self
		}

		/// Queues a network-level failure.
		pub fn fail(self, message: &str) -> Self {
			self.replies.lock().push_back(StubReply::Failure(message.to_owned()));

			self
		}

		/// Returns every request observed so far.
		pub fn requests(&self) -> Vec<RecordedRequest> {
			self.requests.lock().clone()
		}

		/// Returns the most recent request, if any.
		pub fn last_request(&self) -> Option<RecordedRequest> {
			self.requests.lock().last().cloned()
		}
	}
	impl ApiHttpClient for StubHttpClient {
		type TransportError = StubTransportError;

		fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
			let (parts, body) = request.into_parts();

			self.requests.lock().push(RecordedRequest {
				method: parts.method.as_str().to_owned(),
				uri: parts.uri.to_string(),
				headers: parts.headers,
				body,
			});

			let reply = self.replies.lock().pop_front();
			let outcome = match reply {
				Some(StubReply::Response { status, headers, body }) =>
					build_response(status, &headers, body),
				Some(StubReply::Failure(message)) =>
					Err(HttpClientError::Reqwest(Box::new(StubTransportError(message)))),
				None => Err(HttpClientError::Other("No stub reply was scripted.".into())),
			};

			Box::pin(async move { outcome })
		}
	}

	fn build_response(
		status: u16,
		headers: &[(String, String)],
		body: String,
	) -> Result<HttpResponse, HttpClientError<StubTransportError>> {
		let mut builder = HttpResponseBuilder::builder()
			.status(StatusCode::from_u16(status).expect("Stub status code should be valid."));

		for (name, value) in headers {
			builder = builder.header(name.as_str(), value.as_str());
		}

		Ok(builder.body(body.into_bytes())?)
	}

	/// Builds a [`Pinterest`] client that talks to the provided stub, using production URLs.
	pub fn build_stub_client(stub: &StubHttpClient) -> Pinterest<StubHttpClient> {
		let descriptor =
			ApiDescriptor::pinterest().expect("Production descriptor should always build.");

		Pinterest::with_http_client(descriptor, TEST_CLIENT_ID, TEST_CLIENT_SECRET, stub.clone())
	}

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	#[cfg(feature = "reqwest")]
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds a descriptor whose base URL and endpoints point at a mock server root.
	pub fn mock_descriptor(server_root: &str) -> ApiDescriptor {
		let root = server_root.trim_end_matches('/');

		ApiDescriptor::builder()
			.base_url(
				Url::parse(&format!("{root}/v1/")).expect("Mock base URL should parse successfully."),
			)
			.authorization_endpoint(
				Url::parse(&format!("{root}/oauth/"))
					.expect("Mock authorization URL should parse successfully."),
			)
			.build()
			.expect("Mock descriptor should build successfully.")
	}

	/// Constructs a reqwest-backed [`Pinterest`] client whose URLs point at `server_root`.
	#[cfg(feature = "reqwest")]
	pub fn build_reqwest_test_client(server_root: &str) -> Pinterest<ReqwestHttpClient> {
		Pinterest::with_http_client(
			mock_descriptor(server_root),
			TEST_CLIENT_ID,
			TEST_CLIENT_SECRET,
			test_reqwest_http_client(),
		)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::{Arc, OnceLock},
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use {serde_json, url};
#[cfg(test)] use {color_eyre as _, httpmock as _};
