//! Immutable bearer token model with its acquisition instant.

// self
use crate::{_prelude::*, auth::Secret};

/// Bearer token issued by the login endpoint.
///
/// A refresh never mutates a token in place; the cache swaps in a new value.
///
/// Tokens only live in memory and cannot be serialized:
///
/// ```compile_fail
/// fn persist(token: &harness_access::auth::Token) -> String {
/// 	serde_json::to_string(token).unwrap()
/// }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
	/// Token value; callers must avoid logging it.
	pub value: Secret,
	/// Instant the login response was received.
	pub acquired_at: OffsetDateTime,
}
impl Token {
	/// HTTP authentication scheme prepended by [`Token::authorization_header`].
	pub const BEARER_SCHEME: &'static str = "Bearer";

	/// Creates a token acquired at `acquired_at`.
	pub fn new(value: Secret, acquired_at: OffsetDateTime) -> Self {
		Self { value, acquired_at }
	}

	/// Raw token value.
	pub fn expose(&self) -> &str {
		self.value.expose()
	}

	/// Age of the token at `instant`. Negative when the clock moved backwards.
	pub fn age_at(&self, instant: OffsetDateTime) -> Duration {
		instant - self.acquired_at
	}

	/// Returns `true` while the token is younger than `ttl` at `instant`.
	pub fn is_fresh_at(&self, instant: OffsetDateTime, ttl: Duration) -> bool {
		self.age_at(instant) < ttl
	}

	/// Value for an `Authorization` header.
	///
	/// Some login APIs already return `Bearer <jwt>`; such values are used verbatim instead of
	/// gaining a second scheme prefix.
	pub fn authorization_header(&self) -> String {
		let raw = self.expose();
		let prefixed = raw
			.get(..Self::BEARER_SCHEME.len() + 1)
			.is_some_and(|head| head.eq_ignore_ascii_case("bearer "));

		if prefixed { raw.to_owned() } else { format!("{} {raw}", Self::BEARER_SCHEME) }
	}
}
impl Debug for Token {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Token")
			.field("value", &"<redacted>")
			.field("acquired_at", &self.acquired_at)
			.finish()
	}
}
