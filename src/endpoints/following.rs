//! Follow-graph routes: followed users, boards, and interests.

// self
use crate::{
	_prelude::*,
	auth::{BoardId, InterestId, Username},
	endpoints::{self, Endpoint},
	http::ApiHttpClient,
	transport::{Method, RequestParams, Transport},
};

/// Accessor for what the authenticated account follows.
pub struct Following<C>
where
	C: ?Sized + ApiHttpClient,
{
	transport: Arc<Transport<C>>,
}
impl<C> Following<C>
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

	/// Users followed by the authenticated account.
	pub async fn users(&self, params: RequestParams) -> Result<Value> {
		self.call("users", Method::Get, "me/following/users/".into(), params).await
	}

	/// Boards followed by the authenticated account.
	pub async fn boards(&self, params: RequestParams) -> Result<Value> {
		self.call("boards", Method::Get, "me/following/boards/".into(), params).await
	}

	/// Interests followed by the authenticated account.
	pub async fn interests(&self, params: RequestParams) -> Result<Value> {
		self.call("interests", Method::Get, "me/following/interests/".into(), params).await
	}

	/// Starts following `user`.
	pub async fn follow_user(&self, user: impl AsRef<str>, params: RequestParams) -> Result<Value> {
		let user = Username::new(user)?;
		let params = params.with("user", user);

		self.call("follow_user", Method::Post, "me/following/users/".into(), params).await
	}

	/// Stops following `user`.
	pub async fn unfollow_user(
		&self,
		user: impl AsRef<str>,
		params: RequestParams,
	) -> Result<Value> {
		let user = Username::new(user)?;

		self.call("unfollow_user", Method::Delete, format!("me/following/users/{user}/"), params)
			.await
	}

	/// Starts following `board`.
	pub async fn follow_board(
		&self,
		board: impl AsRef<str>,
		params: RequestParams,
	) -> Result<Value> {
		let board = BoardId::new(board)?;
		let params = params.with("board", board);

		self.call("follow_board", Method::Post, "me/following/boards/".into(), params).await
	}

	/// Stops following `board`.
	pub async fn unfollow_board(
		&self,
		board: impl AsRef<str>,
		params: RequestParams,
	) -> Result<Value> {
		let board = BoardId::new(board)?;

		self.call("unfollow_board", Method::Delete, format!("me/following/boards/{board}/"), params)
			.await
	}

	/// Starts following `interest`.
	pub async fn follow_interest(
		&self,
		interest: impl AsRef<str>,
		params: RequestParams,
	) -> Result<Value> {
		let interest = InterestId::new(interest)?;
		let params = params.with("interest", interest);

		self.call("follow_interest", Method::Post, "me/following/interests/".into(), params).await
	}

	/// Stops following `interest`.
	pub async fn unfollow_interest(
		&self,
		interest: impl AsRef<str>,
		params: RequestParams,
	) -> Result<Value> {
		let interest = InterestId::new(interest)?;
		let path = format!("me/following/interests/{interest}/");

		self.call("unfollow_interest", Method::Delete, path, params).await
	}

	async fn call(
		&self,
		operation: &'static str,
		method: Method,
		path: String,
		params: RequestParams,
	) -> Result<Value> {
		endpoints::dispatch(&*self.transport, Endpoint::Following, operation, method, path, &params)
			.await
	}
}
impl<C> Debug for Following<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Following").field("base_url", &self.transport.base_url().as_str()).finish()
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

	fn following(stub: &StubHttpClient) -> Following<StubHttpClient> {
		let base = Url::parse("https://api.example.com/v1/").expect("Base URL should parse.");

		Following::new(Arc::new(Transport::new(base, stub.clone(), Arc::new(TokenSlot::default()))))
	}

	#[tokio::test]
	async fn listings_use_get() {
		let stub = StubHttpClient::default()
			.reply(200, &[], "{\"data\":[]}")
			.reply(200, &[], "{\"data\":[]}")
			.reply(200, &[], "{\"data\":[]}");
		let following = following(&stub);

		following.users(RequestParams::new()).await.expect("users should succeed.");
		following.boards(RequestParams::new()).await.expect("boards should succeed.");
		following.interests(RequestParams::new()).await.expect("interests should succeed.");

		let requests = stub.requests();

		assert!(requests.iter().all(|request| request.method == "GET"));
		assert_eq!(
			requests.into_iter().map(|request| request.uri).collect::<Vec<_>>(),
			[
				"https://api.example.com/v1/me/following/users/",
				"https://api.example.com/v1/me/following/boards/",
				"https://api.example.com/v1/me/following/interests/",
			]
		);
	}

	#[tokio::test]
	async fn follow_posts_the_target_in_the_form_body() {
		let stub = StubHttpClient::default()
			.reply(200, &[], "{}")
			.reply(200, &[], "{}")
			.reply(200, &[], "{}");
		let following = following(&stub);

		following.follow_user("ada", RequestParams::new()).await.expect("follow_user.");
		following.follow_board("ada/recipes", RequestParams::new()).await.expect("follow_board.");
		following.follow_interest("955", RequestParams::new()).await.expect("follow_interest.");

		let requests = stub.requests();

		assert!(requests.iter().all(|request| request.method == "POST"));
		assert_eq!(requests[0].uri, "https://api.example.com/v1/me/following/users/");
		assert_eq!(requests[0].body_text(), "user=ada");
		assert_eq!(requests[1].uri, "https://api.example.com/v1/me/following/boards/");
		assert_eq!(requests[1].body_text(), "board=ada%2Frecipes");
		assert_eq!(requests[2].uri, "https://api.example.com/v1/me/following/interests/");
		assert_eq!(requests[2].body_text(), "interest=955");
	}

	#[tokio::test]
	async fn unfollow_deletes_the_target_path() {
		let stub = StubHttpClient::default()
			.reply(200, &[], "")
			.reply(200, &[], "")
			.reply(200, &[], "");
		let following = following(&stub);

		following.unfollow_user("ada", RequestParams::new()).await.expect("unfollow_user.");
		following.unfollow_board("42", RequestParams::new()).await.expect("unfollow_board.");
		following.unfollow_interest("955", RequestParams::new()).await.expect("unfollow_interest.");

		let requests = stub.requests();

		assert!(requests.iter().all(|request| request.method == "DELETE"));
		assert_eq!(requests[0].uri, "https://api.example.com/v1/me/following/users/ada/");
		assert_eq!(requests[1].uri, "https://api.example.com/v1/me/following/boards/42/");
		assert_eq!(requests[2].uri, "https://api.example.com/v1/me/following/interests/955/");
	}

	#[tokio::test]
	async fn invalid_targets_never_reach_the_network() {
		let stub = StubHttpClient::default();
		let err = following(&stub)
			.follow_interest("", RequestParams::new())
			.await
			.expect_err("Empty interests must be rejected.");

		assert!(matches!(err, Error::InvalidIdentifier(_)));
		assert!(stub.requests().is_empty());
	}

	#[tokio::test]
	async fn follow_targets_cannot_reach_other_routes() {
		let stub = StubHttpClient::default();
		let following = following(&stub);
		let err = following
			.unfollow_user("../boards/1", RequestParams::new())
			.await
			.expect_err("A multi-segment username must be rejected.");

		assert!(matches!(err, Error::InvalidIdentifier(IdentifierError::TooManySegments { .. })));
		assert!(following.unfollow_interest("..", RequestParams::new()).await.is_err());
		assert!(following.unfollow_board("ada/..", RequestParams::new()).await.is_err());
		assert!(stub.requests().is_empty());
	}
}
