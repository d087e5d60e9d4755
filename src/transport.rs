//! Request dispatch shared by the authorizer and every endpoint accessor.
//!
//! [`Transport::send`] resolves a path against the descriptor's base URL, encodes parameters
//! according to the method, signs the request, performs exactly one round trip through the
//! injected [`ApiHttpClient`], and decodes the JSON body. No retries, no pagination.

// crates.io
use oauth2::http::{
	HeaderMap, HeaderValue, Method as HttpMethod, Request as HttpRequestBuilder,
	header::{ACCEPT, CONTENT_TYPE},
};
use url::form_urlencoded::Serializer as FormSerializer;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	ext::RequestSigner,
	http::{ApiHttpClient, HttpClientError, HttpRequest, ResponseMetadata, ResponseMetadataSlot},
	obs,
};

const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// HTTP methods used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
	/// Read a resource.
	Get,
	/// Create a resource.
	Post,
	/// Replace a resource.
	Put,
	/// Partially update a resource.
	Patch,
	/// Remove a resource.
	Delete,
}
impl Method {
	/// Returns the upper-case method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
		}
	}

	/// Returns true when parameters travel in the request body instead of the query string.
	pub const fn carries_body(self) -> bool {
		matches!(self, Method::Post | Method::Put | Method::Patch)
	}

	fn as_http(self) -> HttpMethod {
		match self {
			Method::Get => HttpMethod::GET,
			Method::Post => HttpMethod::POST,
			Method::Put => HttpMethod::PUT,
			Method::Patch => HttpMethod::PATCH,
			Method::Delete => HttpMethod::DELETE,
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Request parameters encoded as a query string or a form body depending on the method.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParams(BTreeMap<String, String>);
impl RequestParams {
	/// Creates an empty parameter set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces a parameter, returning the updated set.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(key, value);

		self
	}

	/// Adds or replaces a parameter.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.0.insert(key.into(), value.into());
	}

	/// Returns the value stored for `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true when no parameters are set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterator over parameters in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
	}

	/// Encodes the parameters as `application/x-www-form-urlencoded`.
	pub fn to_form(&self) -> String {
		FormSerializer::new(String::new()).extend_pairs(self.iter()).finish()
	}
}
impl<K, V> FromIterator<(K, V)> for RequestParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}
impl<K, V, const N: usize> From<[(K, V); N]> for RequestParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from(pairs: [(K, V); N]) -> Self {
		pairs.into_iter().collect()
	}
}

/// Result of one successful API call.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Headers of this specific response.
	pub headers: HeaderMap,
	/// Decoded JSON body; `Value::Null` when the body was empty.
	pub body: Value,
}

/// Shared HTTP dispatcher bound to one base URL, one signer, and one HTTP client.
pub struct Transport<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	base_url: Url,
	signer: Arc<dyn RequestSigner>,
	last_response: ResponseMetadataSlot,
}
impl<C> Transport<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a transport that resolves paths against `base_url`.
	pub fn new(
		base_url: Url,
		http_client: impl Into<Arc<C>>,
		signer: Arc<dyn RequestSigner>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			base_url,
			signer,
			last_response: ResponseMetadataSlot::default(),
		}
	}

	/// Base URL resource paths are joined onto.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Injected HTTP client.
	pub fn http_client(&self) -> &Arc<C> {
		&self.http_client
	}

	/// Status and headers of the most recent response, across every caller of this transport.
	pub fn last_response(&self) -> Option<ResponseMetadata> {
		self.last_response.snapshot()
	}

	/// Sends a request without extra headers.
	pub async fn request(
		&self,
		method: Method,
		path: &str,
		params: &RequestParams,
	) -> Result<ApiResponse> {
		self.send(method, path, params, &HeaderMap::new()).await
	}

	/// Performs one HTTP call and decodes its JSON body.
	///
	/// `path` is joined onto the base URL unless it is already absolute. The shared
	/// last-response slot is cleared before dispatch and overwritten once a response arrives,
	/// including non-success responses.
	pub async fn send(
		&self,
		method: Method,
		path: &str,
		params: &RequestParams,
		headers: &HeaderMap,
	) -> Result<ApiResponse> {
		let request = self.build_request(method, path, params, headers)?;

		#[cfg(feature = "tracing")]
		tracing::debug!(method = method.as_str(), uri = %request.uri(), "dispatching API request");

		self.last_response.take();

		let response = self.http_client.execute(request).await.map_err(map_http_client_error)?;
		let status = response.status().as_u16();
		let headers = response.headers().clone();

		self.last_response.store(ResponseMetadata { status, headers: headers.clone() });
		obs::record_api_response(status, &headers);

		if !response.status().is_success() {
			#[cfg(feature = "tracing")]
			tracing::warn!(status, path, "API returned a non-success status");

			return Err(Error::Api {
				status,
				body: String::from_utf8_lossy(response.body()).into_owned(),
			});
		}

		let body = decode_body(status, response.body())?;

		Ok(ApiResponse { status, headers, body })
	}

	fn resolve(&self, path: &str) -> Result<Url> {
		match Url::parse(path) {
			Ok(url) => Ok(url),
			Err(url::ParseError::RelativeUrlWithoutBase) => self
				.base_url
				.join(path.trim_start_matches('/'))
				.map_err(|source| ConfigError::InvalidPath { path: path.to_owned(), source }.into()),
			Err(source) => Err(ConfigError::InvalidPath { path: path.to_owned(), source }.into()),
		}
	}

	fn build_request(
		&self,
		method: Method,
		path: &str,
		params: &RequestParams,
		headers: &HeaderMap,
	) -> Result<HttpRequest> {
		let mut url = self.resolve(path)?;
		let body = if method.carries_body() {
			params.to_form().into_bytes()
		} else {
			if !params.is_empty() {
				url.query_pairs_mut().extend_pairs(params.iter());
			}

			Vec::new()
		};
		let mut request = HttpRequestBuilder::builder()
			.method(method.as_http())
			.uri(url.as_str())
			.header(ACCEPT, HeaderValue::from_static(JSON))
			.body(body)
			.map_err(ConfigError::from)?;

		if method.carries_body() {
			request.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(FORM));
		}
		for name in headers.keys() {
			request.headers_mut().remove(name);
		}
		for (name, value) in headers {
			request.headers_mut().append(name.clone(), value.clone());
		}

		self.signer.sign(&mut request)?;

		Ok(request)
	}
}
impl<C> Debug for Transport<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Transport")
			.field("base_url", &self.base_url.as_str())
			.field("last_status", &self.last_response.snapshot().map(|meta| meta.status))
			.finish()
	}
}

fn decode_body(status: u16, bytes: &[u8]) -> Result<Value> {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(Value::Null);
	}

	let mut deserializer = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::Decode { source, status })
}

fn map_http_client_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::network(*inner).into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		_ => TransportError::Other { message: "unrecognized HTTP client failure".into() }.into(),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::StubHttpClient,
		auth::{TokenSecret, TokenSlot},
	};

	fn transport(stub: &StubHttpClient, token: &TokenSlot) -> Transport<StubHttpClient> {
		Transport::new(
			Url::parse("https://api.example.com/v1/").expect("Base URL should parse."),
			stub.clone(),
			Arc::new(token.clone()),
		)
	}

	#[tokio::test]
	async fn get_params_go_to_the_query_string() {
		let stub = StubHttpClient::default().reply(200, &[], "{\"data\":[]}");
		let transport = transport(&stub, &TokenSlot::default());
		let params = RequestParams::new().with("fields", "id,name");
		let response = transport
			.request(Method::Get, "me/boards/", &params)
			.await
			.expect("GET should succeed.");
		let sent = stub.last_request().expect("A request should be recorded.");

		assert_eq!(response.status, 200);
		assert_eq!(sent.method, "GET");
		assert_eq!(sent.uri, "https://api.example.com/v1/me/boards/?fields=id%2Cname");
		assert!(sent.body.is_empty());
		assert!(sent.authorization().is_none());
	}

	#[tokio::test]
	async fn body_methods_send_form_encoded_params_with_bearer() {
		let stub = StubHttpClient::default().reply(201, &[], "{\"data\":{\"id\":\"1\"}}");
		let token = TokenSlot::default();

		token.set(TokenSecret::new("tok"));

		let transport = transport(&stub, &token);
		let params = RequestParams::from([("name", "Recipes"), ("description", "Food & drink")]);

		transport.request(Method::Post, "/boards/", &params).await.expect("POST should succeed.");

		let sent = stub.last_request().expect("A request should be recorded.");

		assert_eq!(sent.uri, "https://api.example.com/v1/boards/");
		assert_eq!(sent.body_text(), "description=Food+%26+drink&name=Recipes");
		assert_eq!(sent.authorization(), Some("Bearer tok"));
		assert_eq!(
			sent.headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok()),
			Some(FORM)
		);
	}

	#[tokio::test]
	async fn non_success_status_becomes_api_error_and_updates_metadata() {
		let stub = StubHttpClient::default().reply(
			404,
			&[("X-RateLimit-Remaining", "3")],
			"{\"message\":\"not found\"}",
		);
		let transport = transport(&stub, &TokenSlot::default());
		let err = transport
			.request(Method::Get, "pins/1/", &RequestParams::new())
			.await
			.expect_err("404 should surface as an API error.");

		assert!(matches!(err, Error::Api { status: 404, ref body } if body.contains("not found")));

		let meta = transport.last_response().expect("Metadata should be recorded on errors.");

		assert_eq!(meta.status, 404);
		assert!(meta.headers.contains_key("x-ratelimit-remaining"));
	}

	#[tokio::test]
	async fn network_failure_clears_metadata() {
		let stub = StubHttpClient::default().reply(200, &[], "{}").fail("connection reset");
		let transport = transport(&stub, &TokenSlot::default());

		transport.request(Method::Get, "me/", &RequestParams::new()).await.expect("First call.");

		assert!(transport.last_response().is_some());

		let err = transport
			.request(Method::Get, "me/", &RequestParams::new())
			.await
			.expect_err("Second call should fail.");

		assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
		assert!(transport.last_response().is_none());
	}

	#[tokio::test]
	async fn empty_and_malformed_bodies() {
		let stub = StubHttpClient::default().reply(204, &[], "").reply(200, &[], "{\"data\": [1,");
		let transport = transport(&stub, &TokenSlot::default());
		let empty = transport
			.request(Method::Delete, "boards/1/", &RequestParams::new())
			.await
			.expect("Empty body should decode.");

		assert_eq!(empty.body, Value::Null);

		let err = transport
			.request(Method::Get, "boards/1/", &RequestParams::new())
			.await
			.expect_err("Truncated JSON should fail to decode.");

		assert!(matches!(err, Error::Decode { status: 200, .. }));
	}

	#[tokio::test]
	async fn absolute_paths_bypass_the_base_url() {
		let stub = StubHttpClient::default().reply(200, &[], "{}");
		let transport = transport(&stub, &TokenSlot::default());

		transport
			.request(Method::Post, "https://auth.example.com/token", &RequestParams::new())
			.await
			.expect("Absolute URL should be accepted.");

		assert_eq!(
			stub.last_request().map(|request| request.uri),
			Some("https://auth.example.com/token".into())
		);
	}

	#[tokio::test]
	async fn caller_headers_keep_every_value_and_replace_defaults() {
		let stub = StubHttpClient::default().reply(200, &[], "{}");
		let transport = transport(&stub, &TokenSlot::default());
		let mut headers = HeaderMap::new();

		headers.append("x-pinterest-tag", HeaderValue::from_static("first"));
		headers.append("x-pinterest-tag", HeaderValue::from_static("second"));
		headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.pinterest+json"));

		transport
			.send(Method::Get, "me/", &RequestParams::new(), &headers)
			.await
			.expect("Call with extra headers should succeed.");

		let sent = stub.last_request().expect("A request should be recorded.");
		let tags = sent
			.headers
			.get_all("x-pinterest-tag")
			.iter()
			.filter_map(|value| value.to_str().ok())
			.collect::<Vec<_>>();
		let accept = sent
			.headers
			.get_all(ACCEPT)
			.iter()
			.filter_map(|value| value.to_str().ok())
			.collect::<Vec<_>>();

		assert_eq!(tags, ["first", "second"]);
		assert_eq!(accept, ["application/vnd.pinterest+json"]);
	}

	#[test]
	fn method_metadata() {
		assert!(Method::Patch.carries_body());
		assert!(!Method::Delete.carries_body());
		assert_eq!(Method::Put.to_string(), "PUT");
	}
}
