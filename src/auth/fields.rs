//! Ordered token-field table applied to login responses.

// crates.io
use serde_json::Value;
// self
use crate::{_prelude::*, auth::Secret, error::AuthError};

/// Ordered list of response fields that may carry the token, plus the minimum length a value
/// must have to be accepted.
///
/// Fields are probed in order; the first one holding a non-empty string after trimming wins,
/// even when a later field would also match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFields {
	candidates: Vec<Cow<'static, str>>,
	min_length: usize,
}
impl TokenFields {
	/// Candidate fields probed when no override is configured.
	pub const DEFAULT_CANDIDATES: [&'static str; 3] = ["authorization", "token", "accessToken"];
	/// Minimum accepted token length when no override is configured.
	pub const DEFAULT_MIN_LENGTH: usize = 10;

	/// Creates a table from the provided candidates, keeping the default minimum length.
	pub fn new<I, S>(candidates: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Cow<'static, str>>,
	{
		Self {
			candidates: candidates.into_iter().map(Into::into).collect(),
			min_length: Self::DEFAULT_MIN_LENGTH,
		}
	}

	/// Overrides the minimum accepted length.
	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = min_length;

		self
	}

	/// Candidate field names in probe order.
	pub fn candidates(&self) -> impl Iterator<Item = &str> {
		self.candidates.iter().map(AsRef::as_ref)
	}

	/// Minimum accepted length.
	pub fn min_length(&self) -> usize {
		self.min_length
	}

	/// Extracts the token from a parsed login response.
	pub fn extract(&self, body: &Value) -> Result<Secret, AuthError> {
		let (field, value) = self
			.candidates()
			.find_map(|field| {
				body.get(field)
					.and_then(Value::as_str)
					.map(str::trim)
					.filter(|value| !value.is_empty())
					.map(|value| (field, value))
			})
			.ok_or_else(|| AuthError::TokenFieldMissing {
				candidates: self.candidates().collect::<Vec<_>>().join(", "),
			})?;
		let length = value.chars().count();

		if length < self.min_length {
			return Err(AuthError::TokenTooShort {
				field: field.to_owned(),
				length,
				minimum: self.min_length,
			});
		}

		Ok(Secret::new(value))
	}
}
impl Default for TokenFields {
	fn default() -> Self {
		Self::new(Self::DEFAULT_CANDIDATES)
	}
}
