//! OAuth scope modeling for the authorization URL.

// self
use crate::_prelude::*;

/// Errors emitted when validating scopes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ScopeValidationError {
	/// Empty scope entries are not allowed.
	#[error("Scope entries cannot be empty.")]
	Empty,
	/// Scopes cannot contain whitespace or list delimiters.
	#[error("Scope contains whitespace or a delimiter: {scope}.")]
	ContainsDelimiter {
		/// The offending scope string.
		scope: String,
	},
}

/// Well-known permission scopes accepted by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
	/// Read public boards, pins, and profile data.
	ReadPublic,
	/// Create and edit boards and pins.
	WritePublic,
	/// Read following lists.
	ReadRelationships,
	/// Follow and unfollow users, boards, and interests.
	WriteRelationships,
}
impl Scope {
	/// Returns the wire identifier for the scope.
	pub const fn as_str(self) -> &'static str {
		match self {
			Scope::ReadPublic => "read_public",
			Scope::WritePublic => "write_public",
			Scope::ReadRelationships => "read_relationships",
			Scope::WriteRelationships => "write_relationships",
		}
	}
}
impl Display for Scope {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Ordered, de-duplicated list of scope strings.
///
/// Order is preserved as supplied because it is reproduced verbatim in the authorization URL;
/// duplicates keep their first position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ScopeList(Vec<String>);
impl ScopeList {
	/// Creates a validated scope list from any iterator of strings.
	pub fn new<I, S>(scopes: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut list = Vec::new();

		for scope in scopes {
			let scope = scope.into();

			validate_scope(&scope)?;

			if !list.contains(&scope) {
				list.push(scope);
			}
		}

		Ok(Self(list))
	}

	/// Scope list requested when callers supply none.
	pub fn read_public() -> Self {
		Self::from([Scope::ReadPublic])
	}

	/// Number of distinct scopes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if no scopes are defined.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns true if the list contains the provided scope.
	pub fn contains(&self, scope: &str) -> bool {
		self.0.iter().any(|candidate| candidate == scope)
	}

	/// Iterator over scopes in request order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	/// Joins the scopes with `delimiter`, refusing scopes that contain it.
	pub fn join_checked(&self, delimiter: char) -> Result<String, ScopeValidationError> {
		match self.0.iter().find(|scope| scope.contains(delimiter)) {
			Some(scope) => Err(ScopeValidationError::ContainsDelimiter { scope: scope.clone() }),
			None => Ok(self.join(delimiter)),
		}
	}

	/// Joins the scopes with `delimiter`.
	pub fn join(&self, delimiter: char) -> String {
		let mut buf = String::new();

		for (idx, value) in self.0.iter().enumerate() {
			if idx > 0 {
				buf.push(delimiter);
			}

			buf.push_str(value);
		}

		buf
	}
}
impl<const N: usize> From<[Scope; N]> for ScopeList {
	fn from(scopes: [Scope; N]) -> Self {
		scopes.into_iter().collect()
	}
}
impl FromIterator<Scope> for ScopeList {
	fn from_iter<I: IntoIterator<Item = Scope>>(iter: I) -> Self {
		let mut list: Vec<String> = Vec::new();

		for scope in iter {
			if !list.iter().any(|existing| existing == scope.as_str()) {
				list.push(scope.as_str().to_owned());
			}
		}

		Self(list)
	}
}
impl TryFrom<Vec<String>> for ScopeList {
	type Error = ScopeValidationError;

	fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl From<ScopeList> for Vec<String> {
	fn from(value: ScopeList) -> Self {
		value.0
	}
}
impl FromStr for ScopeList {
	type Err = ScopeValidationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.trim().is_empty() {
			return Ok(Self::default());
		}

		Self::new(s.split([',', ' ']).filter(|part| !part.is_empty()))
	}
}
impl Display for ScopeList {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.join(','))
	}
}

fn validate_scope(scope: &str) -> Result<(), ScopeValidationError> {
	if scope.is_empty() {
		return Err(ScopeValidationError::Empty);
	}
	if scope.chars().any(|c| c.is_whitespace() || c == ',') {
		return Err(ScopeValidationError::ContainsDelimiter { scope: scope.to_owned() });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn scope_order_is_preserved_and_duplicates_dropped() {
		let scopes = ScopeList::new(["write_public", "read_public", "write_public"])
			.expect("Scope list should build successfully.");

		assert_eq!(scopes.iter().collect::<Vec<_>>(), vec!["write_public", "read_public"]);
		assert_eq!(scopes.join(','), "write_public,read_public");
		assert_eq!(scopes.join(' '), "write_public read_public");
	}

	#[test]
	fn invalid_scopes_error() {
		assert_eq!(ScopeList::new([""]), Err(ScopeValidationError::Empty));
		assert!(ScopeList::new(["read public"]).is_err());
		assert!(ScopeList::new(["read,write"]).is_err());
	}

	#[test]
	fn checked_join_refuses_scopes_containing_the_delimiter() {
		let scopes = ScopeList::new(["read_public", "pins+boards"]).expect("Scopes should build.");

		assert_eq!(
			scopes.join_checked('+'),
			Err(ScopeValidationError::ContainsDelimiter { scope: "pins+boards".into() })
		);
		assert_eq!(scopes.join_checked(','), Ok("read_public,pins+boards".into()));
	}

	#[test]
	fn parses_comma_or_space_separated_input() {
		let scopes = ScopeList::from_str("read_public,write_relationships read_relationships")
			.expect("Scope string should parse successfully.");

		assert_eq!(scopes.len(), 3);
		assert!(scopes.contains("write_relationships"));
		assert!(ScopeList::from_str("  ").expect("Blank input is an empty list.").is_empty());
	}

	#[test]
	fn typed_scopes_convert_to_wire_names() {
		let scopes = ScopeList::from([Scope::ReadPublic, Scope::WriteRelationships]);

		assert_eq!(scopes.to_string(), "read_public,write_relationships");
		assert_eq!(ScopeList::read_public().join(','), "read_public");
	}
}
