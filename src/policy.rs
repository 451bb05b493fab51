use std::time::Duration;

const HOUR_SECS: u64 = 60 * 60;

/// Fixed period between rotations, chosen once at init and immutable for
/// the life of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPolicy {
    Hourly,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl RotationPolicy {
    /// Parses a frequency selector; unrecognized values fall back to daily.
    pub fn parse(value: &str) -> Self {
        match value {
            "hourly" => RotationPolicy::Hourly,
            "daily" => RotationPolicy::Daily,
            "weekly" => RotationPolicy::Weekly,
            "monthly" => RotationPolicy::Monthly,
            _ => RotationPolicy::Daily,
        }
    }

    pub fn period(self) -> Duration {
        match self {
            RotationPolicy::Hourly => Duration::from_secs(HOUR_SECS),
            RotationPolicy::Daily => Duration::from_secs(24 * HOUR_SECS),
            RotationPolicy::Weekly => Duration::from_secs(7 * 24 * HOUR_SECS),
            // Calendar months are approximated as 30 days.
            RotationPolicy::Monthly => Duration::from_secs(30 * 24 * HOUR_SECS),
        }
    }
}
