//! Time source for new items.

use chrono::{DateTime, Duration, DurationRound, Utc};
use parking_lot::Mutex;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock truncated to microseconds, the precision storage keeps.
///
/// Successive readings from one instance are strictly increasing: when the
/// wall clock has not advanced (or stepped back) since the last reading,
/// the previous reading plus one microsecond is returned instead.
#[derive(Default)]
pub struct SystemClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let wall = Utc::now();
        let wall = wall
            .duration_trunc(Duration::microseconds(1))
            .unwrap_or(wall);

        let mut last = self.last.lock();
        let next = match *last {
            Some(previous) if wall <= previous => previous + Duration::microseconds(1),
            _ => wall,
        };
        *last = Some(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readings_strictly_increase() {
        let clock = SystemClock::new();
        let readings: Vec<_> = (0..1000).map(|_| clock.now()).collect();
        assert!(readings.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn readings_have_microsecond_precision() {
        let now = SystemClock::new().now();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000, 0);
    }
}
