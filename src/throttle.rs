//! Fixed-window request throttle.
//!
//! [`RequestThrottler::acquire`] admits at most [`ThrottlePolicy::limit`] callers per
//! [`ThrottlePolicy::window`]. The caller that finds the window full sleeps until it rolls over,
//! then opens a new one. The whole check, wait and increment sequence runs under one async lock,
//! so later callers queue behind the sleeper on the lock.

// self
use crate::{
	_prelude::*,
	clock::{Clock, SystemClock},
	error::{ConfigError, ThrottleError},
	obs::{self, Operation, OperationSpan, Outcome},
};

/// Admission budget for a [`RequestThrottler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottlePolicy {
	/// Requests admitted per window.
	pub limit: u32,
	/// Window length.
	pub window: Duration,
}
impl ThrottlePolicy {
	/// Requests per window used when no override is configured.
	pub const DEFAULT_LIMIT: u32 = 100;
	/// Window length used when no override is configured.
	pub const DEFAULT_WINDOW: Duration = Duration::milliseconds(60_000);

	/// Creates a policy admitting `limit` requests per `window`.
	pub const fn new(limit: u32, window: Duration) -> Self {
		Self { limit, window }
	}

	/// Rejects a zero limit or a non-positive window.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.limit == 0 {
			return Err(ConfigError::ZeroLimit);
		}
		if !self.window.is_positive() {
			return Err(ConfigError::NonPositiveDuration { name: "rate window" });
		}

		Ok(())
	}
}
impl Default for ThrottlePolicy {
	fn default() -> Self {
		Self::new(Self::DEFAULT_LIMIT, Self::DEFAULT_WINDOW)
	}
}

/// Counter for the current fixed window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateWindow {
	/// Instant the window opened.
	pub start: OffsetDateTime,
	/// Admissions granted in this window.
	pub count: u32,
}
impl RateWindow {
	/// Opens an empty window at `start`.
	pub fn new(start: OffsetDateTime) -> Self {
		Self { start, count: 0 }
	}

	fn restart(&mut self, start: OffsetDateTime) {
		*self = Self::new(start);
	}
}

/// Blocks callers so no more than `limit` requests are admitted per window.
pub struct RequestThrottler {
	policy: ThrottlePolicy,
	clock: Arc<dyn Clock>,
	window: AsyncMutex<RateWindow>,
}
impl RequestThrottler {
	/// Creates a throttler driven by the system clock.
	pub fn new(policy: ThrottlePolicy) -> Self {
		Self::with_clock(policy, Arc::new(SystemClock))
	}

	/// Creates a throttler driven by `clock`. The first window opens immediately.
	///
	/// The policy is not validated here; see [`ThrottlePolicy::validate`]. A zero limit or a
	/// non-positive window admits every caller without waiting.
	pub fn with_clock(policy: ThrottlePolicy, clock: Arc<dyn Clock>) -> Self {
		let window = AsyncMutex::new(RateWindow::new(clock.now()));

		Self { policy, clock, window }
	}

	/// Policy enforced by this throttler.
	pub fn policy(&self) -> ThrottlePolicy {
		self.policy
	}

	/// Snapshot of the current window.
	pub async fn window(&self) -> RateWindow {
		*self.window.lock().await
	}

	/// Waits until the caller may issue exactly one request.
	///
	/// Never fails. Dropping the returned future abandons the wait and leaves the window as it
	/// was.
	pub async fn acquire(&self) {
		let admitted = self.admit(None).await;

		debug_assert!(admitted.is_ok(), "Uncancellable admission cannot be interrupted.");
	}

	/// Like [`acquire`](Self::acquire), but gives up as soon as `cancel` fires while waiting.
	///
	/// An interrupted call grants no admission and leaves the window untouched. `cancel` stays
	/// cancelled, so the caller's own shutdown handling still observes it.
	pub async fn acquire_or_cancel(&self, cancel: &CancellationToken) -> Result<()> {
		Ok(self.admit(Some(cancel)).await?)
	}

	async fn admit(&self, cancel: Option<&CancellationToken>) -> Result<(), ThrottleError> {
		let span = OperationSpan::new(Operation::Throttle, "acquire");

		span.instrument(async move {
			let ThrottlePolicy { limit, window: length } = self.policy;
			let mut window = self.window.lock().await;
			let now = self.clock.now();
			let elapsed = now - window.start;

			if elapsed.is_negative() {
				obs::log_clock_skew(elapsed);
			} else if elapsed >= length {
				window.restart(now);
			}

			if window.count >= limit {
				let wait = remaining_wait(length, now - window.start);

				if wait.is_positive() {
					obs::log_throttle_wait(wait, limit);
					obs::record_outcome(Operation::Throttle, Outcome::Delayed);

					match cancel {
						Some(cancel) => tokio::select! {
							biased;

							_ = cancel.cancelled() => {
								obs::log_throttle_interrupted();
								obs::record_outcome(Operation::Throttle, Outcome::Interrupted);

								return Err(ThrottleError::Interrupted);
							},
							_ = self.clock.sleep(wait) => {},
						},
						None => self.clock.sleep(wait).await,
					}
				}

				window.restart(self.clock.now());
			}

			window.count += 1;

			obs::record_outcome(Operation::Throttle, Outcome::Success);

			Ok(())
		})
		.await
	}
}
impl Debug for RequestThrottler {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestThrottler").field("policy", &self.policy).finish()
	}
}

/// Time left in a window of `length` once `elapsed` has passed.
///
/// Never negative and never longer than the window, even for a negative `elapsed` (clock skew) or
/// a policy that skipped validation.
fn remaining_wait(length: Duration, elapsed: Duration) -> Duration {
	if elapsed.is_negative() {
		return Duration::ZERO;
	}

	(length - elapsed).max(Duration::ZERO).min(length.max(Duration::ZERO))
}
