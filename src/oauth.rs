//! OAuth 2.0 authorization-code support: authorize URL, CSRF state, and token exchange.
//!
//! The [`Authorizer`] shares a [`TokenSlot`] with the transport, so a token stored by
//! [`Authorizer::exchange_code`] or [`Authorizer::set_access_token`] is attached as a bearer
//! credential to every subsequent request. Until then, requests go out unauthenticated.

// crates.io
use rand::{Rng, distr::Alphanumeric};
use serde::{Deserializer, de::Error as DeError};
// self
use crate::{
	_prelude::*,
	auth::{ScopeList, TokenSecret, TokenSlot},
	error::AuthError,
	http::ApiHttpClient,
	obs::{self, RequestKind},
	provider::ApiDescriptor,
	transport::{Method, RequestParams, Transport},
};

const STATE_LEN: usize = 32;
const RESPONSE_TYPE: &str = "code";
const GRANT_TYPE: &str = "authorization_code";

/// Successful token endpoint payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
	/// Bearer token to attach to API calls.
	pub access_token: TokenSecret,
	/// Token type reported by the server (typically `bearer`).
	#[serde(default)]
	pub token_type: Option<String>,
	/// Granted scopes; accepts either a JSON array or a delimited string.
	#[serde(default, deserialize_with = "deserialize_scope")]
	pub scope: Vec<String>,
}

/// Holds client credentials and the current access token.
pub struct Authorizer<C>
where
	C: ?Sized + ApiHttpClient,
{
	client_id: String,
	client_secret: TokenSecret,
	authorization_endpoint: Url,
	token_endpoint: Url,
	scope_delimiter: char,
	transport: Arc<Transport<C>>,
	token: TokenSlot,
	state: RwLock<String>,
}
impl<C> Authorizer<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates an authorizer that exchanges codes through `transport` and publishes tokens
	/// into `token`, which the transport's signer must share.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		descriptor: &ApiDescriptor,
		transport: Arc<Transport<C>>,
		token: TokenSlot,
	) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: TokenSecret::new(client_secret),
			authorization_endpoint: descriptor.authorization_endpoint.clone(),
			token_endpoint: descriptor.token_endpoint.clone(),
			scope_delimiter: descriptor.quirks.scope_delimiter,
			transport,
			token,
			state: RwLock::new(random_state()),
		}
	}

	/// OAuth client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// CSRF state embedded in authorization URLs; generated once per authorizer.
	pub fn state(&self) -> String {
		self.state.read().clone()
	}

	/// Replaces the CSRF state, e.g. to restore one persisted across a redirect.
	pub fn set_state(&self, state: impl Into<String>) {
		*self.state.write() = state.into();
	}

	/// Validates the `state` returned on the redirect against the stored one.
	pub fn verify_state(&self, returned: &str) -> Result<(), AuthError> {
		if *self.state.read() == returned { Ok(()) } else { Err(AuthError::StateMismatch) }
	}

	/// Builds the URL users visit to grant access.
	///
	/// Query pairs appear in a fixed order (`response_type`, `redirect_uri`, `client_id`,
	/// `scope`, `state`) and scopes keep the caller's order, so the result is deterministic for
	/// a given state. An empty scope list requests `read_public`. A scope containing the
	/// descriptor's delimiter is refused with [`Error::InvalidScope`].
	pub fn authorization_url(&self, redirect_uri: &Url, scopes: &ScopeList) -> Result<Url> {
		let scope = if scopes.is_empty() {
			ScopeList::read_public().join(self.scope_delimiter)
		} else {
			scopes.join_checked(self.scope_delimiter)?
		};
		let state = self.state();
		let mut url = self.authorization_endpoint.clone();
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("response_type", RESPONSE_TYPE);
		pairs.append_pair("redirect_uri", redirect_uri.as_str());
		pairs.append_pair("client_id", &self.client_id);
		pairs.append_pair("scope", &scope);
		pairs.append_pair("state", &state);

		drop(pairs);

		Ok(url)
	}

	/// Exchanges an authorization code for an access token and stores it.
	///
	/// Performs exactly one call to the token endpoint. Any failure leaves the previously
	/// stored token untouched.
	pub async fn exchange_code(&self, code: &str, redirect_uri: &Url) -> Result<TokenResponse> {
		obs::observe(RequestKind::OAuth, "exchange_code", async move {
			if code.is_empty() {
				return Err(AuthError::MissingCode.into());
			}

			let params = RequestParams::from([
				("grant_type", GRANT_TYPE),
				("client_id", self.client_id.as_str()),
				("client_secret", self.client_secret.expose()),
				("code", code),
				("redirect_uri", redirect_uri.as_str()),
			]);
			let response = self
				.transport
				.request(Method::Post, self.token_endpoint.as_str(), &params)
				.await
				.map_err(map_exchange_error)?;
			let token: TokenResponse = serde_path_to_error::deserialize(response.body)
				.map_err(|source| AuthError::MalformedTokenResponse { source })?;

			if token.access_token.expose().is_empty() {
				return Err(AuthError::EmptyAccessToken.into());
			}

			self.token.set(token.access_token.clone());

			Ok(token)
		})
		.await
	}

	/// Stores a token obtained elsewhere (e.g. persisted from an earlier session).
	pub fn set_access_token(&self, token: impl Into<String>) {
		self.token.set(TokenSecret::new(token));
	}

	/// Drops the stored token; subsequent calls go out unauthenticated.
	pub fn clear_access_token(&self) {
		self.token.clear();
	}

	/// Returns the stored token, if any.
	pub fn access_token(&self) -> Option<TokenSecret> {
		self.token.get()
	}

	/// Returns true once a token is stored.
	pub fn is_authorized(&self) -> bool {
		self.token.is_set()
	}
}
impl<C> Debug for Authorizer<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authorizer")
			.field("client_id", &self.client_id)
			.field("authorization_endpoint", &self.authorization_endpoint.as_str())
			.field("token_set", &self.token.is_set())
			.finish()
	}
}

fn map_exchange_error(err: Error) -> Error {
	match err {
		Error::Api { status, body } => AuthError::TokenRejected { status, body }.into(),
		Error::Decode { source, .. } => AuthError::MalformedTokenResponse { source }.into(),
		other => other,
	}
}

fn random_state() -> String {
	rand::rng().sample_iter(Alphanumeric).take(STATE_LEN).map(char::from).collect()
}

fn deserialize_scope<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum RawScope {
		List(Vec<String>),
		Joined(String),
		Missing(()),
	}

	match RawScope::deserialize(deserializer)
		.map_err(|_| D::Error::custom("scope must be a string or an array of strings"))?
	{
		RawScope::List(list) => Ok(list),
		RawScope::Joined(joined) => Ok(joined
			.split([',', ' '])
			.filter(|part| !part.is_empty())
			.map(str::to_owned)
			.collect()),
		RawScope::Missing(()) => Ok(Vec::new()),
	}
}
