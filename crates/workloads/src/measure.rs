//! Measurement wrapper
//!
//! Times a unit of work on the monotonic clock. The wrapper never inspects the
//! work's output, so a `Result` returned by the work comes back untouched and
//! the caller decides whether to `?` it.

use std::future::Future;
use std::time::{Duration, Instant};

/// Output of a unit of work together with how long it took
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Elapsed time in whole milliseconds
    pub fn elapsed_ms(&self) -> u64 {
        duration_to_ms(self.elapsed)
    }

    /// Split into value and elapsed duration
    pub fn into_parts(self) -> (T, Duration) {
        (self.value, self.elapsed)
    }
}

impl<T, E> Timed<Result<T, E>> {
    /// Move the `Result` outward so failures can be propagated with `?`
    pub fn transpose(self) -> Result<Timed<T>, E> {
        let elapsed = self.elapsed;
        self.value.map(|value| Timed { value, elapsed })
    }
}

/// Run `work` and record how long it took
pub fn measure<T, F>(work: F) -> Timed<T>
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let value = work();
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}

/// Await `work` and record how long it took, including time spent suspended
pub async fn measure_async<T, F>(work: F) -> Timed<T>
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let value = work.await;
    Timed {
        value,
        elapsed: start.elapsed(),
    }
}

/// Whole milliseconds, saturating at `u64::MAX`
pub fn duration_to_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Serde support for `Duration` rendered as `"<ms>ms"`
pub mod ms_string {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}ms", super::duration_to_ms(*duration)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let millis = raw
            .strip_suffix("ms")
            .ok_or_else(|| de::Error::custom(format!("expected \"<n>ms\", got {raw:?}")))?
            .parse::<u64>()
            .map_err(de::Error::custom)?;
        Ok(Duration::from_millis(millis))
    }
}
