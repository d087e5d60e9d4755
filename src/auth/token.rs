//! Redacted secrets and the shared slot that carries the current access token.

// self
use crate::_prelude::*;

/// Redacted secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Access token shared between the authorizer (writer) and the transport (reader).
///
/// Clones point at the same storage, so a token stored by the authorizer is visible to the
/// very next request the transport signs.
#[derive(Clone, Default)]
pub struct TokenSlot(Arc<RwLock<Option<TokenSecret>>>);
impl TokenSlot {
	/// Replaces the stored token.
	pub fn set(&self, token: TokenSecret) {
		*self.0.write() = Some(token);
	}

	/// Removes the stored token so subsequent calls go out unauthenticated.
	pub fn clear(&self) {
		*self.0.write() = None;
	}

	/// Returns a copy of the stored token, if any.
	pub fn get(&self) -> Option<TokenSecret> {
		self.0.read().clone()
	}

	/// Returns true when a token is stored.
	pub fn is_set(&self) -> bool {
		self.0.read().is_some()
	}
}
impl Debug for TokenSlot {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenSlot").field("token_set", &self.is_set()).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn slot_clones_observe_updates() {
		let slot = TokenSlot::default();
		let reader = slot.clone();

		assert!(!reader.is_set());

		slot.set(TokenSecret::new("abc"));

		assert_eq!(reader.get().as_ref().map(TokenSecret::expose), Some("abc"));
		assert_eq!(format!("{reader:?}"), "TokenSlot { token_set: true }");

		slot.clear();

		assert!(reader.get().is_none());
	}
}
