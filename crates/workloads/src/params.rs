//! Workload parameter coercion
//!
//! Parameters are never rejected. Anything that does not yield a positive
//! integer falls back to the workload's default.

/// Default recursion depth for the compute workload
pub const DEFAULT_FIB_N: u64 = 35;
/// Default allocation size in megabytes for the memory workload
pub const DEFAULT_MEMORY_MB: u64 = 10;
/// Default per-task delay in milliseconds for the concurrency workload
pub const DEFAULT_DELAY_MS: u64 = 100;
/// Default response size in kilobytes for the payload workload
pub const DEFAULT_PAYLOAD_KB: u64 = 100;

/// Which workload a parameter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadKind {
    Compute,
    Memory,
    Concurrency,
    Payload,
}

impl WorkloadKind {
    /// The value used when the parameter is absent or unusable
    pub fn default_parameter(self) -> u64 {
        match self {
            WorkloadKind::Compute => DEFAULT_FIB_N,
            WorkloadKind::Memory => DEFAULT_MEMORY_MB,
            WorkloadKind::Concurrency => DEFAULT_DELAY_MS,
            WorkloadKind::Payload => DEFAULT_PAYLOAD_KB,
        }
    }

    /// Coerce a raw parameter for this workload
    pub fn parameter(self, raw: Option<&str>) -> u64 {
        coerce_parameter(raw, self.default_parameter())
    }
}

impl std::fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkloadKind::Compute => write!(f, "compute"),
            WorkloadKind::Memory => write!(f, "memory"),
            WorkloadKind::Concurrency => write!(f, "concurrency"),
            WorkloadKind::Payload => write!(f, "payload"),
        }
    }
}

/// Lenient integer parse with a default
///
/// Leading whitespace is skipped and the leading run of ASCII digits is used,
/// so `"12abc"` is 12. Zero, negative input, no digits, and values that do not
/// fit in `u64` all yield `default`.
pub fn coerce_parameter(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(leading_integer)
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn leading_integer(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits_end == 0 || negative {
        return None;
    }

    unsigned[..digits_end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_integer() {
        assert_eq!(coerce_parameter(Some("42"), 7), 42);
    }

    #[test]
    fn test_missing_uses_default() {
        assert_eq!(coerce_parameter(None, 7), 7);
    }

    #[test]
    fn test_non_numeric_uses_default() {
        assert_eq!(coerce_parameter(Some("abc"), 7), 7);
        assert_eq!(coerce_parameter(Some(""), 7), 7);
        assert_eq!(coerce_parameter(Some("   "), 7), 7);
    }

    #[test]
    fn test_leading_digits_are_used() {
        assert_eq!(coerce_parameter(Some("12abc"), 7), 12);
        assert_eq!(coerce_parameter(Some("  30"), 7), 30);
        assert_eq!(coerce_parameter(Some("+5"), 7), 5);
        assert_eq!(coerce_parameter(Some("3.9"), 7), 3);
    }

    #[test]
    fn test_zero_and_negative_use_default() {
        assert_eq!(coerce_parameter(Some("0"), 7), 7);
        assert_eq!(coerce_parameter(Some("-5"), 7), 7);
    }

    #[test]
    fn test_out_of_range_uses_default() {
        assert_eq!(coerce_parameter(Some("99999999999999999999999"), 7), 7);
    }

    #[test]
    fn test_workload_defaults() {
        assert_eq!(WorkloadKind::Compute.parameter(Some("nope")), 35);
        assert_eq!(WorkloadKind::Memory.parameter(None), 10);
        assert_eq!(WorkloadKind::Concurrency.parameter(None), 100);
        assert_eq!(WorkloadKind::Payload.parameter(None), 100);
        assert_eq!(WorkloadKind::Payload.parameter(Some("3")), 3);
    }
}
