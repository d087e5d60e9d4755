//! Client facade: owns the transport and authorizer and hands out lazily built accessors.

// self
#[cfg(feature = "reqwest")] use crate::{error::ConfigError, http::ReqwestHttpClient};
use crate::{
	_prelude::*,
	auth::TokenSlot,
	endpoints::{Boards, Endpoint, EndpointCache, EndpointRef, Following, Pins, Users},
	ext::{RateLimit, RateLimitRemaining},
	http::{ApiHttpClient, ResponseMetadata},
	oauth::Authorizer,
	provider::ApiDescriptor,
	transport::Transport,
};

/// [`Pinterest`] client backed by reqwest.
#[cfg(feature = "reqwest")]
pub type ReqwestPinterest = Pinterest<ReqwestHttpClient>;

/// Entry point: one transport, one authorizer, and at most one accessor per resource group.
///
/// Accessors share the client's transport, so [`rate_limit`](Self::rate_limit) and
/// [`rate_limit_remaining`](Self::rate_limit_remaining) describe whichever call finished last.
pub struct Pinterest<C>
where
	C: ?Sized + ApiHttpClient,
{
	descriptor: ApiDescriptor,
	transport: Arc<Transport<C>>,
	auth: Authorizer<C>,
	endpoints: EndpointCache<C>,
}
#[cfg(feature = "reqwest")]
impl Pinterest<ReqwestHttpClient> {
	/// Creates a client for the production API using a default reqwest client.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
		let descriptor = ApiDescriptor::pinterest().map_err(ConfigError::from)?;

		Self::with_descriptor(descriptor, client_id, client_secret)
	}

	/// Creates a client for `descriptor` using a default reqwest client.
	pub fn with_descriptor(
		descriptor: ApiDescriptor,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self> {
		let http_client = ReqwestClient::builder().build().map_err(ConfigError::from)?;

		Ok(Self::with_http_client(
			descriptor,
			client_id,
			client_secret,
			ReqwestHttpClient::with_client(http_client),
		))
	}
}
impl<C> Pinterest<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a client that sends every request through `http_client`.
	pub fn with_http_client(
		descriptor: ApiDescriptor,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		let token = TokenSlot::default();
		let signer = Arc::new(token.clone());
		let transport = Arc::new(Transport::new(descriptor.base_url.clone(), http_client, signer));
		let auth = Authorizer::new(client_id, client_secret, &descriptor, transport.clone(), token);

		Self { descriptor, transport, auth, endpoints: EndpointCache::default() }
	}

	/// Descriptor the client was configured with.
	pub fn descriptor(&self) -> &ApiDescriptor {
		&self.descriptor
	}

	/// Authorizer holding the client credentials and the current access token.
	pub fn auth(&self) -> &Authorizer<C> {
		&self.auth
	}

	/// Transport shared by the authorizer and every accessor.
	pub fn transport(&self) -> &Arc<Transport<C>> {
		&self.transport
	}

	/// Looks an accessor up by resource name (`users`, `boards`, `following`, `pins`).
	///
	/// Names are matched case-insensitively. The first lookup of a resource builds its accessor;
	/// later lookups return the same instance.
	pub fn endpoint(&self, name: &str) -> Result<EndpointRef<'_, C>> {
		let endpoint = name.parse::<Endpoint>()?;

		Ok(self.endpoint_for(endpoint))
	}

	/// Returns the accessor for `endpoint`, building it on first use.
	pub fn endpoint_for(&self, endpoint: Endpoint) -> EndpointRef<'_, C> {
		match endpoint {
			Endpoint::Users => EndpointRef::Users(self.users()),
			Endpoint::Boards => EndpointRef::Boards(self.boards()),
			Endpoint::Following => EndpointRef::Following(self.following()),
			Endpoint::Pins => EndpointRef::Pins(self.pins()),
		}
	}

	/// Users accessor.
	pub fn users(&self) -> &Users<C> {
		self.endpoints.users.get_or_init(|| Users::new(self.transport.clone()))
	}

	/// Boards accessor.
	pub fn boards(&self) -> &Boards<C> {
		self.endpoints.boards.get_or_init(|| Boards::new(self.transport.clone()))
	}

	/// Following accessor.
	pub fn following(&self) -> &Following<C> {
		self.endpoints.following.get_or_init(|| Following::new(self.transport.clone()))
	}

	/// Pins accessor.
	pub fn pins(&self) -> &Pins<C> {
		self.endpoints.pins.get_or_init(|| Pins::new(self.transport.clone()))
	}

	/// Resource groups whose accessor has been built so far.
	pub fn initialized_endpoints(&self) -> Vec<Endpoint> {
		self.endpoints.initialized()
	}

	/// Status and headers of the most recent response.
	pub fn last_response(&self) -> Option<ResponseMetadata> {
		self.transport.last_response()
	}

	/// Request budget advertised by the most recent response.
	///
	/// Falls back to the descriptor's default (1000 unless overridden) when no response has
	/// been received or the header was absent.
	pub fn rate_limit(&self) -> u64 {
		let fallback = self.descriptor.quirks.default_rate_limit;

		self.last_rate_limit().map_or(fallback, |rate_limit| rate_limit.limit_or(fallback))
	}

	/// Remaining calls advertised by the most recent response, or
	/// [`RateLimitRemaining::Unknown`].
	pub fn rate_limit_remaining(&self) -> RateLimitRemaining {
		self.last_rate_limit().map_or(RateLimitRemaining::Unknown, |rate_limit| rate_limit.remaining)
	}

	fn last_rate_limit(&self) -> Option<RateLimit> {
		self.transport.last_response().map(|meta| RateLimit::from_headers(&meta.headers))
	}
}
impl<C> Debug for Pinterest<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Pinterest")
			.field("base_url", &self.descriptor.base_url.as_str())
			.field("auth", &self.auth)
			.field("endpoints", &self.endpoints.initialized())
			.finish()
	}
}
