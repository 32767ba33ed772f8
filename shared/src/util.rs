//! Small shared utilities

/// Current time as Unix milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Whole minutes elapsed since `start_millis` (floored, never negative)
pub fn elapsed_minutes(start_millis: i64, now_millis: i64) -> i64 {
    ((now_millis - start_millis) / 60_000).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_minutes_floors() {
        let start = 0;
        assert_eq!(elapsed_minutes(start, 59_999), 0);
        assert_eq!(elapsed_minutes(start, 60_000), 1);
        assert_eq!(elapsed_minutes(start, 19 * 60_000 + 59_000), 19);
    }

    #[test]
    fn elapsed_minutes_clamps_clock_skew() {
        assert_eq!(elapsed_minutes(100_000, 40_000), 0);
    }
}
