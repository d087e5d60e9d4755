//! Resource-group accessors and the tag enum that names them.
//!
//! Each accessor is a thin path-template layer: it validates identifiers, performs exactly one
//! [`Transport`] call, and returns the decoded body unchanged.

pub mod boards;
pub mod following;
pub mod pins;
pub mod users;

pub use boards::Boards;
pub use following::Following;
pub use pins::Pins;
pub use users::Users;

// self
use crate::{
	_prelude::*,
	error::UnknownEndpointError,
	http::ApiHttpClient,
	obs::{self, RequestKind},
	transport::{Method, RequestParams, Transport},
};

/// Known resource groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
	/// Account and profile routes.
	Users,
	/// Board routes.
	Boards,
	/// Follow-graph routes.
	Following,
	/// Pin routes.
	Pins,
}
impl Endpoint {
	/// Every known resource group.
	pub const ALL: [Endpoint; 4] =
		[Endpoint::Users, Endpoint::Boards, Endpoint::Following, Endpoint::Pins];

	/// Returns the resource identifier.
	pub const fn as_str(self) -> &'static str {
		match self {
			Endpoint::Users => "users",
			Endpoint::Boards => "boards",
			Endpoint::Following => "following",
			Endpoint::Pins => "pins",
		}
	}
}
impl Display for Endpoint {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for Endpoint {
	type Err = UnknownEndpointError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = s.trim();

		Endpoint::ALL
			.into_iter()
			.find(|endpoint| endpoint.as_str().eq_ignore_ascii_case(normalized))
			.ok_or_else(|| UnknownEndpointError { name: s.to_owned() })
	}
}

/// Borrowed accessor returned by name-based lookup on the client.
pub enum EndpointRef<'a, C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Users accessor.
	Users(&'a Users<C>),
	/// Boards accessor.
	Boards(&'a Boards<C>),
	/// Following accessor.
	Following(&'a Following<C>),
	/// Pins accessor.
	Pins(&'a Pins<C>),
}
impl<'a, C> EndpointRef<'a, C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Resource group of the wrapped accessor.
	pub fn endpoint(&self) -> Endpoint {
		match self {
			EndpointRef::Users(_) => Endpoint::Users,
			EndpointRef::Boards(_) => Endpoint::Boards,
			EndpointRef::Following(_) => Endpoint::Following,
			EndpointRef::Pins(_) => Endpoint::Pins,
		}
	}

	/// Returns the Users accessor, if that is what this reference wraps.
	pub fn as_users(&self) -> Option<&'a Users<C>> {
		match *self {
			EndpointRef::Users(users) => Some(users),
			_ => None,
		}
	}

	/// Returns the Boards accessor, if that is what this reference wraps.
	pub fn as_boards(&self) -> Option<&'a Boards<C>> {
		match *self {
			EndpointRef::Boards(boards) => Some(boards),
			_ => None,
		}
	}

	/// Returns the Following accessor, if that is what this reference wraps.
	pub fn as_following(&self) -> Option<&'a Following<C>> {
		match *self {
			EndpointRef::Following(following) => Some(following),
			_ => None,
		}
	}

	/// Returns the Pins accessor, if that is what this reference wraps.
	pub fn as_pins(&self) -> Option<&'a Pins<C>> {
		match *self {
			EndpointRef::Pins(pins) => Some(pins),
			_ => None,
		}
	}

	/// Returns true when both references point at the same accessor instance.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		match (self, other) {
			(EndpointRef::Users(lhs), EndpointRef::Users(rhs)) => std::ptr::eq(*lhs, *rhs),
			(EndpointRef::Boards(lhs), EndpointRef::Boards(rhs)) => std::ptr::eq(*lhs, *rhs),
			(EndpointRef::Following(lhs), EndpointRef::Following(rhs)) => std::ptr::eq(*lhs, *rhs),
			(EndpointRef::Pins(lhs), EndpointRef::Pins(rhs)) => std::ptr::eq(*lhs, *rhs),
			_ => false,
		}
	}
}
impl<C> Clone for EndpointRef<'_, C>
where
	C: ?Sized + ApiHttpClient,
{
	fn clone(&self) -> Self {
		*self
	}
}
impl<C> Copy for EndpointRef<'_, C> where C: ?Sized + ApiHttpClient {}
impl<C> Debug for EndpointRef<'_, C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("EndpointRef").field(&self.endpoint()).finish()
	}
}

/// Lazily built accessors; each slot is initialized at most once.
pub(crate) struct EndpointCache<C>
where
	C: ?Sized + ApiHttpClient,
{
	pub(crate) users: OnceLock<Users<C>>,
	pub(crate) boards: OnceLock<Boards<C>>,
	pub(crate) following: OnceLock<Following<C>>,
	pub(crate) pins: OnceLock<Pins<C>>,
}
impl<C> EndpointCache<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Resource groups whose accessor has been built.
	pub(crate) fn initialized(&self) -> Vec<Endpoint> {
		let flags = [
			self.users.get().is_some(),
			self.boards.get().is_some(),
			self.following.get().is_some(),
			self.pins.get().is_some(),
		];

		Endpoint::ALL.into_iter().zip(flags).filter(|(_, set)| *set).map(|(tag, _)| tag).collect()
	}
}
impl<C> Default for EndpointCache<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn default() -> Self {
		Self {
			users: OnceLock::new(),
			boards: OnceLock::new(),
			following: OnceLock::new(),
			pins: OnceLock::new(),
		}
	}
}

/// Performs one observed call for an accessor operation and returns the decoded body.
pub(crate) async fn dispatch<C>(
	transport: &Transport<C>,
	endpoint: Endpoint,
	operation: &'static str,
	method: Method,
	path: String,
	params: &RequestParams,
) -> Result<Value>
where
	C: ?Sized + ApiHttpClient,
{
	obs::observe(RequestKind::from(endpoint), operation, async move {
		transport.request(method, &path, params).await.map(|response| response.body)
	})
	.await
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn names_parse_case_insensitively() {
		assert_eq!("users".parse::<Endpoint>(), Ok(Endpoint::Users));
		assert_eq!(" Boards ".parse::<Endpoint>(), Ok(Endpoint::Boards));
		assert_eq!("FOLLOWING".parse::<Endpoint>(), Ok(Endpoint::Following));
		assert_eq!("pins".parse::<Endpoint>(), Ok(Endpoint::Pins));
	}

	#[test]
	fn unknown_names_are_rejected() {
		let err = "comments".parse::<Endpoint>().expect_err("Unknown names must fail.");

		assert_eq!(err.name, "comments");
		assert!("".parse::<Endpoint>().is_err());
	}

	#[test]
	fn display_round_trips_through_from_str() {
		for endpoint in Endpoint::ALL {
			assert_eq!(endpoint.to_string().parse::<Endpoint>(), Ok(endpoint));
		}
	}
}
