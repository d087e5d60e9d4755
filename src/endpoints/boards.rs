//! Board routes.

// self
use crate::{
	_prelude::*,
	auth::BoardId,
	endpoints::{self, Endpoint},
	http::ApiHttpClient,
	transport::{Method, RequestParams, Transport},
};

/// Accessor for boards.
///
/// Board identifiers are either numeric ids or `username/board-slug` pairs; both are spliced
/// into the path as given.
pub struct Boards<C>
where
	C: ?Sized + ApiHttpClient,
{
	transport: Arc<Transport<C>>,
}
impl<C> Boards<C>
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

	/// Boards owned by the authenticated account.
	pub async fn list(&self, params: RequestParams) -> Result<Value> {
		self.call("list", Method::Get, "me/boards/".into(), params).await
	}

	/// Fetches one board.
	pub async fn get(&self, board: impl AsRef<str>, params: RequestParams) -> Result<Value> {
		let board = BoardId::new(board)?;

		self.call("get", Method::Get, format!("boards/{board}/"), params).await
	}

	/// Pins saved on one board.
	pub async fn pins(&self, board: impl AsRef<str>, params: RequestParams) -> Result<Value> {
		let board = BoardId::new(board)?;

		self.call("pins", Method::Get, format!("boards/{board}/pins/"), params).await
	}

	/// Creates a board; `params` typically carries `name` and `description`.
	pub async fn create(&self, params: RequestParams) -> Result<Value> {
		self.call("create", Method::Post, "boards/".into(), params).await
	}

	/// Updates the fields present in `params`.
	pub async fn update(&self, board: impl AsRef<str>, params: RequestParams) -> Result<Value> {
		let board = BoardId::new(board)?;

		self.call("update", Method::Patch, format!("boards/{board}/"), params).await
	}

	/// Deletes one board.
	pub async fn delete(&self, board: impl AsRef<str>, params: RequestParams) -> Result<Value> {
		let board = BoardId::new(board)?;

		self.call("delete", Method::Delete, format!("boards/{board}/"), params).await
	}

	async fn call(
		&self,
		operation: &'static str,
		method: Method,
		path: String,
		params: RequestParams,
	) -> Result<Value> {
		endpoints::dispatch(&*self.transport, Endpoint::Boards, operation, method, path, &params)
			.await
	}
}
impl<C> Debug for Boards<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Boards").field("base_url", &self.transport.base_url().as_str()).finish()
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

	fn boards(stub: &StubHttpClient) -> Boards<StubHttpClient> {
		let base = Url::parse("https://api.example.com/v1/").expect("Base URL should parse.");

		Boards::new(Arc::new(Transport::new(base, stub.clone(), Arc::new(TokenSlot::default()))))
	}

	#[tokio::test]
	async fn list_returns_the_exact_payload() {
		let payload = "{\"data\":[{\"id\":\"1\",\"name\":\"Recipes\"},{\"id\":\"2\",\"name\":\"Travel\"}]}";
		let stub = StubHttpClient::default().reply(200, &[], payload);
		let body = boards(&stub).list(RequestParams::new()).await.expect("list should succeed.");
		let expected: Value = serde_json::from_str(payload).expect("Fixture should parse.");

		assert_eq!(body, expected);
		assert_eq!(
			stub.last_request().map(|request| request.uri),
			Some("https://api.example.com/v1/me/boards/".into())
		);
	}

	#[tokio::test]
	async fn create_posts_a_form_body() {
		let stub = StubHttpClient::default().reply(201, &[], "{\"data\":{\"id\":\"3\"}}");

		boards(&stub)
			.create(RequestParams::from([("name", "Garden")]))
			.await
			.expect("create should succeed.");

		let sent = stub.last_request().expect("A request should be recorded.");

		assert_eq!(sent.method, "POST");
		assert_eq!(sent.uri, "https://api.example.com/v1/boards/");
		assert_eq!(sent.body_text(), "name=Garden");
	}

	#[tokio::test]
	async fn slug_ids_update_and_delete() {
		let stub = StubHttpClient::default().reply(200, &[], "{}").reply(200, &[], "");
		let boards = boards(&stub);

		boards
			.update("ada/recipes", RequestParams::from([("description", "Weeknight")]))
			.await
			.expect("update should succeed.");

		let deleted =
			boards.delete("ada/recipes", RequestParams::new()).await.expect("delete should succeed.");
		let requests = stub.requests();

		assert_eq!(deleted, Value::Null);
		assert_eq!(requests[0].method, "PATCH");
		assert_eq!(requests[0].uri, "https://api.example.com/v1/boards/ada/recipes/");
		assert_eq!(requests[0].body_text(), "description=Weeknight");
		assert_eq!(requests[1].method, "DELETE");
		assert_eq!(requests[1].uri, "https://api.example.com/v1/boards/ada/recipes/");
	}

	#[tokio::test]
	async fn board_pins_and_invalid_ids() {
		let stub = StubHttpClient::default().reply(200, &[], "{\"data\":[]}");
		let boards = boards(&stub);

		boards.pins("42", RequestParams::new()).await.expect("pins should succeed.");

		let err = boards
			.get("42?fields=id", RequestParams::new())
			.await
			.expect_err("Reserved characters must be rejected.");

		assert!(matches!(err, Error::InvalidIdentifier(_)));
		assert_eq!(stub.requests().len(), 1);
		assert_eq!(
			stub.last_request().map(|request| request.uri),
			Some("https://api.example.com/v1/boards/42/pins/".into())
		);
	}

	#[tokio::test]
	async fn board_ids_cannot_reach_other_routes() {
		let stub = StubHttpClient::default();
		let boards = boards(&stub);
		let err = boards
			.delete("../pins", RequestParams::new())
			.await
			.expect_err("A dot-dot board segment must be rejected.");

		assert!(matches!(err, Error::InvalidIdentifier(IdentifierError::InvalidSegment { .. })));
		assert!(boards.get("ada/recipes/pins", RequestParams::new()).await.is_err());
		assert!(boards.update("ada/", RequestParams::new()).await.is_err());
		assert!(stub.requests().is_empty());
	}
}
