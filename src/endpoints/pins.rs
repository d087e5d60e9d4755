//! Pin routes.

// self
use crate::{
	_prelude::*,
	auth::{BoardId, PinId},
	endpoints::{self, Endpoint},
	http::ApiHttpClient,
	transport::{Method, RequestParams, Transport},
};

/// Accessor for pins.
pub struct Pins<C>
where
	C: ?Sized + ApiHttpClient,
{
	transport: Arc<Transport<C>>,
}
impl<C> Pins<C>
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

	/// Fetches one pin.
	pub async fn get(&self, pin: impl AsRef<str>, params: RequestParams) -> Result<Value> {
		let pin = PinId::new(pin)?;

		self.call("get", Method::Get, format!("pins/{pin}/"), params).await
	}

	/// Pins saved on `board`.
	pub async fn from_board(&self, board: impl AsRef<str>, params: RequestParams) -> Result<Value> {
		let board = BoardId::new(board)?;

		self.call("from_board", Method::Get, format!("boards/{board}/pins/"), params).await
	}

	/// Creates a pin; `params` typically carries `board`, `note`, and `image_url`.
	pub async fn create(&self, params: RequestParams) -> Result<Value> {
		self.call("create", Method::Post, "pins/".into(), params).await
	}

	/// Updates the fields present in `params`.
	pub async fn update(&self, pin: impl AsRef<str>, params: RequestParams) -> Result<Value> {
		let pin = PinId::new(pin)?;

		self.call("update", Method::Patch, format!("pins/{pin}/"), params).await
	}

	/// Deletes one pin.
	pub async fn delete(&self, pin: impl AsRef<str>, params: RequestParams) -> Result<Value> {
		let pin = PinId::new(pin)?;

		self.call("delete", Method::Delete, format!("pins/{pin}/"), params).await
	}

	async fn call(
		&self,
		operation: &'static str,
		method: Method,
		path: String,
		params: RequestParams,
	) -> Result<Value> {
		endpoints::dispatch(&*self.transport, Endpoint::Pins, operation, method, path, &params).await
	}
}
impl<C> Debug for Pins<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Pins").field("base_url", &self.transport.base_url().as_str()).finish()
	}
}
