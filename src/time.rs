use chrono::Utc;

/// Millisecond clock used by the session.
///
/// Injected as a dependency so tests can simulate arbitrary elapsed
/// time without real delays.
pub(crate) trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall-clock implementation used in production.
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Return a `MM:SS.mmm` representation of a millisecond duration
pub(crate) fn format_elapsed_time(duration_ms: i64) -> String {
    let duration_ms = duration_ms.max(0);
    let milliseconds = duration_ms % 1000;
    let seconds = (duration_ms / 1000) % 60;
    let minutes = (duration_ms / 1000) / 60;

    format!("{:02}:{:02}.{:03}", minutes, seconds, milliseconds)
}
