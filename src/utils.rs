use std::time::Duration;

use rand::Rng;

/// Calculate exponential backoff with jitter
pub fn calculate_backoff_with_jitter(
    attempt: usize,
    base_delay_ms: u64,
    max_delay_ms: u64,
) -> Duration {
    // Exponential backoff: delay = base * 3^attempt
    let exponential_delay = base_delay_ms.saturating_mul(3u64.saturating_pow(attempt as u32));

    // Cap at max delay
    let capped_delay = exponential_delay.min(max_delay_ms);

    // Add jitter (±25% of the delay)
    let mut rng = rand::rng();
    let jitter_range = (capped_delay as f64 * 0.25) as u64;
    let jitter = rng.random_range(0..=jitter_range * 2);
    let final_delay = capped_delay.saturating_add(jitter).saturating_sub(jitter_range);

    Duration::from_millis(final_delay)
}

/// Check if an error message indicates a rate limit or timeout that should be retried
pub fn is_retryable_error(error_msg: &str) -> bool {
    error_msg.contains("429") // Rate limit
        || error_msg.contains("Max rate limit reached")
        || error_msg.contains("rate limit")
        || error_msg.contains("timed out")
        || error_msg.contains("timeout")
        || error_msg.contains("connection reset")
        || error_msg.contains("connection refused")
        || error_msg.contains("Too Many Requests")
}

/// First `head` and last `tail` characters joined with `...`
pub fn shorten(
    value: &str,
    head: usize,
    tail: usize,
) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= head + tail {
        return value.to_string();
    }
    let start: String = chars[..head].iter().collect();
    let end: String = chars[chars.len() - tail..].iter().collect();
    format!("{}...{}", start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_stays_within_cap_plus_jitter() {
        for attempt in 0..10 {
            let delay = calculate_backoff_with_jitter(attempt, 500, 30_000);
            assert!(delay <= Duration::from_millis(30_000 + 7_500));
        }
    }

    #[test]
    fn first_attempt_is_near_base_delay() {
        let delay = calculate_backoff_with_jitter(0, 400, 30_000).as_millis();
        assert!((300..=500).contains(&delay), "delay was {}", delay);
    }

    #[test]
    fn retryable_messages() {
        assert!(is_retryable_error("HTTP status 429 Too Many Requests"));
        assert!(is_retryable_error("Max rate limit reached, please use API Key for higher rate limit"));
        assert!(is_retryable_error("operation timed out"));
        assert!(!is_retryable_error("Invalid API Key"));
    }

    #[test]
    fn shorten_keeps_head_and_tail() {
        assert_eq!(shorten("0x1234567890abcdef", 6, 4), "0x1234...cdef");
        assert_eq!(shorten("short", 6, 4), "short");
    }
}
