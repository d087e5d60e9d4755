//! Plugs a canned, in-process HTTP client into the facade.
//!
//! 1. Implement [`ApiHttpClient`] for any type that can execute one [`HttpRequest`].
//! 2. Hand it to [`Pinterest::with_http_client`]; the transport signs requests, records the
//!    response headers, and decodes JSON on top of it.
//! 3. Failures wrapped in `HttpClientError::Reqwest` surface as `Error::Transport`, whatever the
//!    boxed type is.

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use color_eyre::Result;
// self
use pinterest_client::{
	client::Pinterest,
	http::{
		ApiHttpClient, HeaderValue, HttpClientError, HttpFuture, HttpRequest, HttpResponse,
		StatusCode,
	},
	provider::ApiDescriptor,
	transport::RequestParams,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let descriptor = ApiDescriptor::pinterest()?;
	let client: Pinterest<CannedHttpClient> = Pinterest::with_http_client(
		descriptor.clone(),
		"demo-client",
		"demo-secret",
		Arc::new(CannedHttpClient::Online { remaining: 998 }),
	);

	client.auth().set_access_token("demo-token");

	let cached =
		client.endpoint("users")?.as_users().is_some_and(|users| std::ptr::eq(users, client.users()));

	println!("Accessor is cached: {cached}.");

	let me = client.users().get_me(RequestParams::new().with("fields", "id,username")).await?;

	println!("Profile: {me}.");
	println!("Budget: {} of {} calls remaining.", client.rate_limit_remaining(), client.rate_limit());

	let offline: Pinterest<CannedHttpClient> = Pinterest::with_http_client(
		descriptor,
		"demo-client",
		"demo-secret",
		CannedHttpClient::Offline { host: "api.pinterest.com" },
	);

	match offline.boards().list(RequestParams::new()).await {
		Ok(body) => println!("Offline transport unexpectedly answered: {body}."),
		Err(e) => println!("Transport failure surfaced as: {e}."),
	}

	println!("Remaining after the failure: {}.", offline.rate_limit_remaining());

	Ok(())
}

#[derive(Debug)]
struct DnsFailure {
	host: &'static str,
}
impl Display for DnsFailure {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "DNS lookup failed for {}", self.host)
	}
}
impl StdError for DnsFailure {}

enum CannedHttpClient {
	Online { remaining: u64 },
	Offline { host: &'static str },
}
impl ApiHttpClient for CannedHttpClient {
	type TransportError = DnsFailure;

	fn execute(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		Box::pin(async move {
			match self {
				Self::Online { remaining } => {
					let signed = request.headers().contains_key("authorization");
					let body = format!(
						"{{\"data\":{{\"id\":\"1\",\"username\":\"demo\",\"path\":\"{}\",\"signed\":{signed}}}}}",
						request.uri().path()
					);
					let mut response = HttpResponse::new(body.into_bytes());
					let headers = response.headers_mut();

					headers.insert("x-ratelimit-limit", HeaderValue::from_static("1000"));
					headers.insert("x-ratelimit-remaining", HeaderValue::from(*remaining));
					*response.status_mut() = StatusCode::OK;

					Ok(response)
				},
				Self::Offline { host } =>
					Err(HttpClientError::Reqwest(Box::new(DnsFailure { host: *host }))),
			}
		})
	}
}
