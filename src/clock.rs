//! Injectable time source used for token expiry and throttle windows.

// self
use crate::_prelude::*;

/// Boxed future returned by [`Clock::sleep`].
pub type SleepFuture<'a> = Pin<Box<dyn Future<Output = ()> + 'a + Send>>;

/// Wall-clock reader plus timer.
///
/// Production code uses [`SystemClock`]; tests swap in [`ManualClock`] to simulate TTL expiry
/// and window rollover without waiting.
pub trait Clock
where
	Self: Send + Sync,
{
	/// Current instant.
	fn now(&self) -> OffsetDateTime;

	/// Suspends the calling task for `duration`. Non-positive durations complete immediately.
	fn sleep(&self, duration: Duration) -> SleepFuture<'_>;
}

/// UTC wall clock backed by the tokio timer.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl Clock for SystemClock {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc()
	}

	fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
		let duration = std::time::Duration::try_from(duration).unwrap_or_default();

		Box::pin(tokio::time::sleep(duration))
	}
}

/// Deterministic clock for tests and demos.
///
/// A polled `sleep` advances the clock by the requested duration and completes immediately;
/// every polled duration is recorded so callers can assert on it.
#[derive(Debug)]
pub struct ManualClock {
	now: Mutex<OffsetDateTime>,
	sleeps: Mutex<Vec<Duration>>,
}
impl ManualClock {
	/// Creates a clock frozen at `start`.
	pub fn new(start: OffsetDateTime) -> Self {
		Self { now: Mutex::new(start), sleeps: Mutex::default() }
	}

	/// Moves the clock forward (or backward, for negative values) by `delta`.
	pub fn advance(&self, delta: Duration) {
		*self.now.lock() += delta;
	}

	/// Jumps the clock to `instant`.
	pub fn set(&self, instant: OffsetDateTime) {
		*self.now.lock() = instant;
	}

	/// Durations requested through [`Clock::sleep`], oldest first.
	pub fn sleeps(&self) -> Vec<Duration> {
		self.sleeps.lock().clone()
	}
}
impl Default for ManualClock {
	fn default() -> Self {
		Self::new(time::macros::datetime!(2025-01-01 00:00 UTC))
	}
}
impl Clock for ManualClock {
	fn now(&self) -> OffsetDateTime {
		*self.now.lock()
	}

	fn sleep(&self, duration: Duration) -> SleepFuture<'_> {
		// Nothing happens until the future is polled, so an abandoned sleep leaves no trace.
		Box::pin(async move {
			self.sleeps.lock().push(duration);

			if duration.is_positive() {
				self.advance(duration);
			}
		})
	}
}
