//! Optional observability helpers for the credential cache and throttler.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to emit spans named `harness_access.operation` with the
//!   `operation` and `stage` fields, plus events describing login failures and throttle waits.
//! - Enable `metrics` to increment the `harness_access_operation_total` counter for every
//!   outcome, labeled by `operation` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Token lookup, including any login it triggers.
	Login,
	/// Throttle admission.
	Throttle,
}
impl Operation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::Login => "login",
			Operation::Throttle => "throttle",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to an operation.
	Attempt,
	/// Served from the cached token without a login.
	CacheHit,
	/// Completed, either by a fresh login or an immediate admission.
	Success,
	/// Login failed; no token available.
	Failure,
	/// Admission had to wait for the next window.
	Delayed,
	/// Wait was cancelled before the window reopened.
	Interrupted,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::CacheHit => "cache_hit",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
			Outcome::Delayed => "delayed",
			Outcome::Interrupted => "interrupted",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
