// std
use std::sync::Arc;
// crates.io
use time::Duration;
// self
use harness_access::{
	CancellationToken,
	clock::{Clock, ManualClock, SystemClock},
	error::{Error, ThrottleError},
	throttle::{RequestThrottler, ThrottlePolicy},
};

fn manual_throttler(policy: ThrottlePolicy) -> (Arc<RequestThrottler>, Arc<ManualClock>) {
	let clock = Arc::new(ManualClock::default());
	let shared: Arc<dyn Clock> = clock.clone();

	(Arc::new(RequestThrottler::with_clock(policy, shared)), clock)
}

#[tokio::test]
async fn hundred_and_first_call_waits_for_next_window() {
	let (throttler, clock) = manual_throttler(ThrottlePolicy::default());

	for _ in 0..100 {
		throttler.acquire().await;
	}

	assert!(clock.sleeps().is_empty(), "The first 100 admissions must not wait.");

	clock.advance(Duration::milliseconds(12_500));
	throttler.acquire().await;

	assert_eq!(clock.sleeps(), [Duration::milliseconds(47_500)]);
	assert_eq!(throttler.window().await.count, 1);

	throttler.acquire().await;

	assert_eq!(throttler.window().await.count, 2);
	assert_eq!(clock.sleeps().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_never_exceed_the_limit() {
	let (throttler, clock) = manual_throttler(ThrottlePolicy::new(3, Duration::seconds(60)));
	let handles = (0..10)
		.map(|_| {
			let throttler = throttler.clone();

			tokio::spawn(async move { throttler.acquire().await })
		})
		.collect::<Vec<_>>();

	for handle in handles {
		handle.await.expect("Acquire task should not panic.");
	}

	// Ten admissions at three per window fill three windows and open a fourth.
	assert_eq!(clock.sleeps(), [Duration::seconds(60); 3]);
	assert_eq!(throttler.window().await.count, 1);
}

#[tokio::test]
async fn cancellation_interrupts_a_real_wait_promptly() {
	let throttler = Arc::new(RequestThrottler::with_clock(
		ThrottlePolicy::new(1, Duration::seconds(60)),
		Arc::new(SystemClock),
	));
	let cancel = CancellationToken::new();

	throttler.acquire_or_cancel(&cancel).await.expect("First admission should not wait.");

	let canceller = {
		let cancel = cancel.clone();

		tokio::spawn(async move {
			tokio::time::sleep(std::time::Duration::from_millis(50)).await;
			cancel.cancel();
		})
	};
	let before = throttler.window().await;
	let wait = throttler.acquire_or_cancel(&cancel);
	let outcome = tokio::time::timeout(std::time::Duration::from_secs(5), wait)
		.await
		.expect("Cancelled wait should return well before the window reopens.");

	canceller.await.expect("Cancel task should not panic.");

	assert!(matches!(outcome, Err(Error::Throttle(ThrottleError::Interrupted))));
	assert!(cancel.is_cancelled(), "Cancellation must remain observable to the caller.");
	assert_eq!(throttler.window().await, before);
}

#[tokio::test]
async fn dropped_wait_releases_the_window() {
	let throttler = RequestThrottler::with_clock(
		ThrottlePolicy::new(1, Duration::seconds(60)),
		Arc::new(SystemClock),
	);

	throttler.acquire().await;

	let abandoned =
		tokio::time::timeout(std::time::Duration::from_millis(50), throttler.acquire()).await;

	assert!(abandoned.is_err(), "Second admission should still be waiting.");

	let window = tokio::time::timeout(std::time::Duration::from_secs(1), throttler.window())
		.await
		.expect("Window lock should be free once the waiting future is dropped.");

	assert_eq!(window.count, 1);
}

#[tokio::test]
async fn skewed_clock_never_resets_a_window_with_room() {
	let (throttler, clock) = manual_throttler(ThrottlePolicy::new(3, Duration::seconds(60)));

	throttler.acquire().await;
	throttler.acquire().await;
	clock.advance(Duration::minutes(-10));
	throttler.acquire().await;

	assert_eq!(throttler.window().await.count, 3, "A backwards step must not grant extra slots.");

	// Full window under skew: no negative or oversized wait, just a fresh window.
	throttler.acquire().await;

	assert!(clock.sleeps().is_empty());
	assert_eq!(throttler.window().await.count, 1);

	throttler.acquire().await;
	throttler.acquire().await;
	throttler.acquire().await;

	assert_eq!(clock.sleeps(), [Duration::seconds(60)]);
}
