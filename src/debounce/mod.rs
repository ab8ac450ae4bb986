use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle and give
/// another to the code under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed_nanos: Arc<AtomicU64>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos.fetch_add(nanos, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + Duration::from_nanos(self.elapsed_nanos.load(Ordering::SeqCst))
    }
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    due: Instant,
}

/// Holds at most one pending value and the deadline at which it commits.
///
/// Feeding a new value cancels the pending one: the superseded value is
/// dropped and can never be delivered later, even out of order.
///
/// # Examples
///
/// ```
/// use recipe_catalog::debounce::{Debouncer, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let mut debouncer = Debouncer::new(Duration::from_millis(300), clock.clone());
///
/// debouncer.feed("cho");
/// clock.advance(Duration::from_millis(200));
/// debouncer.feed("choc");
/// clock.advance(Duration::from_millis(200));
/// assert_eq!(debouncer.poll(), None);
///
/// clock.advance(Duration::from_millis(100));
/// assert_eq!(debouncer.poll(), Some("choc"));
/// ```
#[derive(Debug)]
pub struct Debouncer<T, C = SystemClock> {
    delay: Duration,
    clock: C,
    pending: Option<Pending<T>>,
}

impl<T, C: Clock> Debouncer<T, C> {
    pub fn new(delay: Duration, clock: C) -> Self {
        Self {
            delay,
            clock,
            pending: None,
        }
    }

    /// Schedules `value`, replacing and cancelling any pending value.
    pub fn feed(&mut self, value: T) {
        let due = self.clock.now() + self.delay;
        self.pending = Some(Pending { value, due });
    }

    /// Returns the pending value if its quiet period has elapsed.
    pub fn poll(&mut self) -> Option<T> {
        let due = self.pending.as_ref()?.due;
        if self.clock.now() >= due {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }

    /// Returns the pending value immediately, ignoring the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Cancels the pending value, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending value commits, if any.
    pub fn remaining(&self) -> Option<Duration> {
        let due = self.pending.as_ref()?.due;
        Some(due.saturating_duration_since(self.clock.now()))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(300);

    fn setup() -> (ManualClock, Debouncer<String, ManualClock>) {
        let clock = ManualClock::new();
        let debouncer = Debouncer::new(DELAY, clock.clone());
        (clock, debouncer)
    }

    #[test]
    fn test_commits_after_quiet_period() {
        let (clock, mut debouncer) = setup();
        debouncer.feed("leche".to_string());
        assert_eq!(debouncer.poll(), None);

        clock.advance(Duration::from_millis(299));
        assert_eq!(debouncer.poll(), None);

        clock.advance(Duration::from_millis(1));
        assert_eq!(debouncer.poll(), Some("leche".to_string()));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(), None);
    }

    #[test]
    fn test_each_feed_resets_the_deadline() {
        let (clock, mut debouncer) = setup();
        for text in ["l", "le", "lec", "lech", "leche"] {
            debouncer.feed(text.to_string());
            clock.advance(Duration::from_millis(250));
            assert_eq!(debouncer.poll(), None);
        }
        clock.advance(Duration::from_millis(50));
        assert_eq!(debouncer.poll(), Some("leche".to_string()));
    }

    #[test]
    fn test_superseded_value_is_never_delivered() {
        let (clock, mut debouncer) = setup();
        debouncer.feed("old".to_string());
        clock.advance(Duration::from_millis(100));
        debouncer.feed("new".to_string());

        clock.advance(Duration::from_secs(5));
        assert_eq!(debouncer.poll(), Some("new".to_string()));
        assert_eq!(debouncer.poll(), None);
    }

    #[test]
    fn test_flush_and_cancel() {
        let (_clock, mut debouncer) = setup();
        debouncer.feed("flan".to_string());
        assert_eq!(debouncer.flush(), Some("flan".to_string()));
        assert!(!debouncer.is_pending());

        debouncer.feed("flan".to_string());
        assert_eq!(debouncer.cancel(), Some("flan".to_string()));
        assert_eq!(debouncer.poll(), None);
        assert_eq!(debouncer.flush(), None);
    }

    #[test]
    fn test_remaining() {
        let (clock, mut debouncer) = setup();
        assert_eq!(debouncer.remaining(), None);

        debouncer.feed("pan".to_string());
        assert_eq!(debouncer.remaining(), Some(DELAY));

        clock.advance(Duration::from_millis(120));
        assert_eq!(debouncer.remaining(), Some(Duration::from_millis(180)));

        clock.advance(Duration::from_secs(1));
        assert_eq!(debouncer.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn test_zero_delay_commits_on_next_poll() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(Duration::ZERO, clock);
        debouncer.feed(1);
        assert_eq!(debouncer.poll(), Some(1));
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let start = other.now();
        clock.advance(Duration::from_millis(40));
        assert_eq!(other.now() - start, Duration::from_millis(40));
    }
}
