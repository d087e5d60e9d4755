//! Path identifiers checked before they are spliced into a route template.
//!
//! An identifier fills exactly the slot its route reserves for it: it may neither add nor
//! climb path segments. Only board ids span two segments (`username/board-slug`).

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($(#[$meta:meta])* $name:ident => $kind:expr) => {
		$(#[$meta])*
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Resource this identifier names.
			pub const KIND: IdentifierKind = $kind;

			/// Validates `value` and wraps it.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				Self::try_from(value.as_ref().to_owned())
			}

			/// Identifier text as it appears in the request path.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				Self::KIND.validate(&value).map(|()| Self(value))
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &str {
				self.as_str()
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				self.as_str()
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				self.as_str()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.as_str())
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&self.0).finish()
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 256;
// `\` separates path segments in http(s) URLs.
const RESERVED_CHARS: [char; 4] = ['?', '#', '%', '\\'];

/// Resource an identifier names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
	/// Board id or `username/board-slug`.
	Board,
	/// Pin id.
	Pin,
	/// Username.
	User,
	/// Interest id.
	Interest,
}
impl IdentifierKind {
	/// Lower-case label used in error messages.
	pub const fn as_str(self) -> &'static str {
		match self {
			IdentifierKind::Board => "board",
			IdentifierKind::Pin => "pin",
			IdentifierKind::User => "user",
			IdentifierKind::Interest => "interest",
		}
	}

	/// Number of `/`-separated path segments an identifier of this kind may occupy.
	pub const fn max_segments(self) -> usize {
		match self {
			IdentifierKind::Board => 2,
			_ => 1,
		}
	}

	fn validate(self, view: &str) -> Result<(), IdentifierError> {
		if view.is_empty() {
			return Err(IdentifierError::Empty { kind: self });
		}
		if view.len() > IDENTIFIER_MAX_LEN {
			return Err(IdentifierError::TooLong { kind: self, max: IDENTIFIER_MAX_LEN });
		}
		if view.chars().any(|c| c.is_whitespace() || c.is_control()) {
			return Err(IdentifierError::ContainsWhitespace { kind: self });
		}
		if let Some(character) = view.chars().find(|c| RESERVED_CHARS.contains(c)) {
			return Err(IdentifierError::ReservedCharacter { kind: self, character });
		}

		let max = self.max_segments();

		if view.split('/').count() > max {
			return Err(IdentifierError::TooManySegments { kind: self, max });
		}
		if let Some(segment) = view.split('/').find(|segment| matches!(*segment, "" | "." | "..")) {
			return Err(IdentifierError::InvalidSegment { kind: self, segment: segment.to_owned() });
		}

		Ok(())
	}
}
impl Display for IdentifierKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Why an identifier was refused.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// Nothing to put in the path.
	#[error("The {kind} identifier cannot be empty.")]
	Empty {
		/// Resource the identifier names.
		kind: IdentifierKind,
	},
	/// Whitespace or control characters.
	#[error("The {kind} identifier contains whitespace or control characters.")]
	ContainsWhitespace {
		/// Resource the identifier names.
		kind: IdentifierKind,
	},
	/// A character that would change how the URL is parsed.
	#[error("The {kind} identifier contains the reserved character `{character}`.")]
	ReservedCharacter {
		/// Resource the identifier names.
		kind: IdentifierKind,
		/// Offending character.
		character: char,
	},
	/// Over the length cap.
	#[error("The {kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Resource the identifier names.
		kind: IdentifierKind,
		/// Maximum permitted length in bytes.
		max: usize,
	},
	/// More `/`-separated segments than the route slot holds.
	#[error("The {kind} identifier may span at most {max} path segment(s).")]
	TooManySegments {
		/// Resource the identifier names.
		kind: IdentifierKind,
		/// Segments the route slot holds.
		max: usize,
	},
	/// An empty, `.`, or `..` segment, which URL resolution would collapse.
	#[error("The {kind} identifier contains the path segment `{segment}`.")]
	InvalidSegment {
		/// Resource the identifier names.
		kind: IdentifierKind,
		/// Offending segment.
		segment: String,
	},
}

def_id! {
	/// Board identifier: a numeric id or a `username/board-slug` pair.
	BoardId => IdentifierKind::Board
}
def_id! {
	/// Pin identifier.
	PinId => IdentifierKind::Pin
}
def_id! {
	/// Account username.
	Username => IdentifierKind::User
}
def_id! {
	/// Interest (topic) identifier.
	InterestId => IdentifierKind::Interest
}
