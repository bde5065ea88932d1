use chrono::{DateTime, Duration, Utc};

/// Turn clock policy: a fixed allowance per action, enforced lazily.
///
/// There is no background timer. A deadline is stamped whenever a new actor
/// is seated, and expiry is detected the next time any request touches the
/// hand; a table nobody touches after a deadline passes stays as it is until
/// the next request arrives.
#[derive(Debug, Clone)]
pub struct DeadlinePolicy {
    timeout: Duration,
}

impl DeadlinePolicy {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn next_deadline(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + self.timeout
    }

    pub fn expired(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        deadline.is_some_and(|d| now > d)
    }
}

impl Default for DeadlinePolicy {
    fn default() -> Self {
        Self::new(Duration::seconds(30))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_is_a_fixed_offset_from_now() {
        let policy = DeadlinePolicy::new(Duration::seconds(20));
        let now = Utc::now();
        assert_eq!(policy.next_deadline(now), now + Duration::seconds(20));
    }

    #[test]
    fn expiry_is_strictly_after_the_deadline() {
        let now = Utc::now();
        assert!(!DeadlinePolicy::expired(None, now));
        assert!(!DeadlinePolicy::expired(Some(now), now));
        assert!(DeadlinePolicy::expired(
            Some(now - Duration::seconds(1)),
            now
        ));
        assert!(!DeadlinePolicy::expired(
            Some(now + Duration::seconds(30)),
            now
        ));
    }
}
