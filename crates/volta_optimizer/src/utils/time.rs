#[macro_export]
macro_rules! timer_debug {
    ($msg:literal,$block:expr) => {{
        let now = jiff::Timestamp::now();
        let result = $block;
        let elapsed = jiff::Timestamp::now().duration_since(now);

        tracing::debug!(elapsed = %elapsed, "{} done", $msg);

        result
    }};
}

/// Elapsed wall-clock time since `start`, never negative.
pub fn elapsed_since(start: jiff::Timestamp) -> jiff::SignedDuration {
    jiff::Timestamp::now().duration_since(start).abs()
}
