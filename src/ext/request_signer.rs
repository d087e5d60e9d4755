//! Request signing contract used by the transport to attach credentials.

// crates.io
use oauth2::http::{HeaderValue, header::AUTHORIZATION};
// self
use crate::{_prelude::*, auth::TokenSlot, error::ConfigError, http::HttpRequest};

/// Attaches credentials to an outbound request right before it is dispatched.
///
/// The transport calls [`sign`](RequestSigner::sign) exactly once per request. Signers that have
/// nothing to attach must leave the request untouched so it goes out unauthenticated.
pub trait RequestSigner
where
	Self: Send + Sync,
{
	/// Mutates `request` in place to carry credentials.
	fn sign(&self, request: &mut HttpRequest) -> Result<()>;
}

/// Adds `Authorization: Bearer <token>` whenever the slot holds a token.
impl RequestSigner for TokenSlot {
	fn sign(&self, request: &mut HttpRequest) -> Result<()> {
		let Some(token) = self.get() else {
			return Ok(());
		};
		let mut value = HeaderValue::try_from(format!("Bearer {}", token.expose()))
			.map_err(ConfigError::from)?;

		value.set_sensitive(true);
		request.headers_mut().insert(AUTHORIZATION, value);

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::TokenSecret;

	fn request() -> HttpRequest {
		HttpRequest::new(Vec::new())
	}

	#[test]
	fn empty_slot_leaves_request_unsigned() {
		let slot = TokenSlot::default();
		let mut request = request();

		slot.sign(&mut request).expect("Signing without a token should succeed.");

		assert!(request.headers().get(AUTHORIZATION).is_none());
	}

	#[test]
	fn stored_token_becomes_bearer_header() {
		let slot = TokenSlot::default();
		let mut request = request();

		slot.set(TokenSecret::new("abc123"));
		slot.sign(&mut request).expect("Signing with a token should succeed.");

		let header = request.headers().get(AUTHORIZATION).expect("Bearer header should be set.");

		assert_eq!(header.to_str().ok(), Some("Bearer abc123"));
		assert!(header.is_sensitive());
	}

	#[test]
	fn control_characters_in_token_are_rejected() {
		let slot = TokenSlot::default();

		slot.set(TokenSecret::new("bad\ntoken"));

		let err = slot.sign(&mut request()).expect_err("Newlines cannot appear in headers.");

		assert!(matches!(err, Error::Config(ConfigError::InvalidHeaderValue(_))));
	}
}
