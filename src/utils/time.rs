use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as epoch milliseconds.
///
/// Liveness timestamps are persisted as decimal millisecond strings, matching
/// the durable format of the records this crate manages. A clock before the
/// epoch reports 0, which downstream checks treat as "stale".
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_is_recent() {
        // 2020-01-01 in epoch milliseconds; any sane clock is past this.
        assert!(now_millis() > 1_577_836_800_000);
    }

    #[test]
    fn test_now_millis_monotonic_enough() {
        let a = now_millis();
        let b = now_millis();
        assert!(b >= a);
    }
}
