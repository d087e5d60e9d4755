//! Account and profile routes.

// self
use crate::{
	_prelude::*,
	auth::Username,
	endpoints::{self, Endpoint},
	http::ApiHttpClient,
	transport::{Method, RequestParams, Transport},
};

/// Accessor for the authenticated account and public profiles.
pub struct Users<C>
where
	C: ?Sized + ApiHttpClient,
{
	transport: Arc<Transport<C>>,
}
impl<C> Users<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates an accessor bound to `transport`.
	pub fn new(transport: Arc<Transport<C>>) -> Self {
		Self { transport }
	}

	/// Transport this accessor dispatches through.
	pub fn transport(&self) -> &Arc<Transport<C>> {
		&self.transport
	}

	/// Profile of the authenticated account.
	pub async fn get_me(&self, params: RequestParams) -> Result<Value> {
		self.get("get_me", "me/".into(), params).await
	}

	/// Public profile of `username`.
	pub async fn get_by_username(
		&self,
		username: impl AsRef<str>,
		params: RequestParams,
	) -> Result<Value> {
		let username = Username::new(username)?;

		self.get("get_by_username", format!("users/{username}/"), params).await
	}

	/// Boards owned by the authenticated account.
	pub async fn my_boards(&self, params: RequestParams) -> Result<Value> {
		self.get("my_boards", "me/boards/".into(), params).await
	}

	/// Pins saved by the authenticated account.
	pub async fn my_pins(&self, params: RequestParams) -> Result<Value> {
		self.get("my_pins", "me/pins/".into(), params).await
	}

	/// Pins liked by the authenticated account.
	pub async fn my_likes(&self, params: RequestParams) -> Result<Value> {
		self.get("my_likes", "me/likes/".into(), params).await
	}

	/// Followers of the authenticated account.
	pub async fn my_followers(&self, params: RequestParams) -> Result<Value> {
		self.get("my_followers", "me/followers/".into(), params).await
	}

	/// Searches the authenticated account's pins.
	pub async fn search_my_pins(
		&self,
		query: impl Into<String>,
		params: RequestParams,
	) -> Result<Value> {
		self.get("search_my_pins", "me/search/pins/".into(), params.with("query", query)).await
	}

	/// Searches the authenticated account's boards.
	pub async fn search_my_boards(
		&self,
		query: impl Into<String>,
		params: RequestParams,
	) -> Result<Value> {
		self.get("search_my_boards", "me/search/boards/".into(), params.with("query", query)).await
	}

	async fn get(
		&self,
		operation: &'static str,
		path: String,
		params: RequestParams,
	) -> Result<Value> {
		endpoints::dispatch(&*self.transport, Endpoint::Users, operation, Method::Get, path, &params)
			.await
	}
}
impl<C> Debug for Users<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Users").field("base_url", &self.transport.base_url().as_str()).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::StubHttpClient,
		auth::{IdentifierError, TokenSlot},
	};

	fn users(stub: &StubHttpClient) -> Users<StubHttpClient> {
		let base = Url::parse("https://api.example.com/v1/").expect("Base URL should parse.");

		Users::new(Arc::new(Transport::new(base, stub.clone(), Arc::new(TokenSlot::default()))))
	}

	#[tokio::test]
	async fn get_me_returns_the_body_unchanged() {
		let stub = StubHttpClient::default()
			.reply(200, &[], "{\"data\":{\"id\":\"1\",\"first_name\":\"Ada\"}}");
		let body = users(&stub)
			.get_me(RequestParams::new().with("fields", "id,first_name"))
			.await
			.expect("get_me should succeed.");
		let sent = stub.last_request().expect("A request should be recorded.");

		assert_eq!(body, serde_json::json!({ "data": { "id": "1", "first_name": "Ada" } }));
		assert_eq!(sent.method, "GET");
		assert_eq!(sent.uri, "https://api.example.com/v1/me/?fields=id%2Cfirst_name");
	}

	#[tokio::test]
	async fn search_adds_the_query_parameter() {
		let stub = StubHttpClient::default().reply(200, &[], "{\"data\":[]}");

		users(&stub)
			.search_my_boards("garden ideas", RequestParams::new())
			.await
			.expect("search_my_boards should succeed.");

		assert_eq!(
			stub.last_request().map(|request| request.uri),
			Some("https://api.example.com/v1/me/search/boards/?query=garden+ideas".into())
		);
	}

	#[tokio::test]
	async fn invalid_username_is_rejected_before_any_request() {
		let stub = StubHttpClient::default();
		let err = users(&stub)
			.get_by_username("", RequestParams::new())
			.await
			.expect_err("Empty usernames must be rejected.");

		assert!(matches!(err, Error::InvalidIdentifier(_)));
		assert!(stub.requests().is_empty());
	}

	#[tokio::test]
	async fn profile_routes_map_to_their_paths() {
		let stub = StubHttpClient::default()
			.reply(200, &[], "{}")
			.reply(200, &[], "{}")
			.reply(200, &[], "{}")
			.reply(200, &[], "{}")
			.reply(200, &[], "{}");
		let users = users(&stub);

		users.get_by_username("ada", RequestParams::new()).await.expect("Profile lookup.");
		users.my_boards(RequestParams::new()).await.expect("Boards listing.");
		users.my_pins(RequestParams::new()).await.expect("Pins listing.");
		users.my_likes(RequestParams::new()).await.expect("Likes listing.");
		users.my_followers(RequestParams::new()).await.expect("Followers listing.");

		let uris = stub.requests().into_iter().map(|request| request.uri).collect::<Vec<_>>();

		assert_eq!(
			uris,
			[
				"https://api.example.com/v1/users/ada/",
				"https://api.example.com/v1/me/boards/",
				"https://api.example.com/v1/me/pins/",
				"https://api.example.com/v1/me/likes/",
				"https://api.example.com/v1/me/followers/",
			]
		);
	}

	#[tokio::test]
	async fn usernames_cannot_climb_out_of_the_profile_route() {
		let stub = StubHttpClient::default();
		let users = users(&stub);
		let err = users
			.get_by_username("..", RequestParams::new())
			.await
			.expect_err("A dot-dot username must be rejected.");

		assert!(matches!(err, Error::InvalidIdentifier(IdentifierError::InvalidSegment { .. })));
		assert!(users.get_by_username("ada/boards", RequestParams::new()).await.is_err());
		assert!(stub.requests().is_empty());
	}
}
