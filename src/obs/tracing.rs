// self
use crate::{_prelude::*, error::AuthError, obs::Operation};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type Instrumented<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type Instrumented<F> = F;

/// A span builder used by the cache and throttler.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the provided operation + stage.
	pub fn new(operation: Operation, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"harness_access.operation",
				operation = operation.as_str(),
				stage
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (operation, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> Instrumented<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs why a login produced no token. The token itself is never logged.
pub(crate) fn log_login_failure(err: &AuthError) {
	#[cfg(feature = "tracing")]
	{
		match err {
			AuthError::RequestFailed(source) => tracing::warn!(
				error = %err,
				cause = %source,
				"Login request failed; no token available."
			),
			AuthError::Rejected { status } =>
				tracing::warn!(status, "Login rejected; check the configured credentials."),
			_ => tracing::warn!(error = %err, "Login response carried no usable token."),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = err;
	}
}

/// Logs a freshly stored token without exposing its value.
pub(crate) fn log_login_success(length: usize) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(length, "Stored new login token.");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = length;
	}
}

/// Logs a throttle wait before it starts.
pub(crate) fn log_throttle_wait(wait: Duration, limit: u32) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(
			wait_ms = wait.whole_milliseconds() as i64,
			limit,
			"Rate window full; waiting."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (wait, limit);
	}
}

/// Logs a backwards clock jump detected by the throttler.
pub(crate) fn log_clock_skew(elapsed: Duration) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			elapsed_ms = elapsed.whole_milliseconds() as i64,
			"Clock moved behind the rate window start; restarting the window."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = elapsed;
	}
}

/// Logs a cancelled throttle wait.
pub(crate) fn log_throttle_interrupted() {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!("Throttle wait cancelled; the rate window is unchanged.");
	}
}
