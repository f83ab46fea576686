//! Remaining-time estimation and the fixed-width ETA field.

use std::fmt;

/// A duration split into hours, minutes and seconds.
///
/// `minutes` and `seconds` are always below 60. Hours do not roll over into days, so
/// very long runs print more than two hour digits and widen the ETA field.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeComponents {
    /// Whole hours.
    pub hours: u64,
    /// Minutes past the hour, `0..60`.
    pub minutes: u64,
    /// Seconds past the minute, `0..60`.
    pub seconds: u64,
}

impl TimeComponents {
    /// Decomposes a number of seconds.
    #[must_use]
    pub const fn from_secs(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: total % 3600 / 60,
            seconds: total % 60,
        }
    }

    /// Recombines the components into seconds.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

/// Formats as the ETA field, `ETA:%2dh%02dm%02ds`.
impl fmt::Display for TimeComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ETA:{:2}h{:02}m{:02}s",
            self.hours, self.minutes, self.seconds
        )
    }
}

/// Linear extrapolation of the time left: average time per step so far, times the
/// steps still to go.
///
/// With no completed steps or no elapsed time there is nothing to extrapolate from,
/// and the estimate is zero.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn remaining_secs(elapsed_secs: u64, current: u64, maximum: u64) -> u64 {
    if current == 0 || elapsed_secs == 0 {
        return 0;
    }
    let per_step = elapsed_secs as f64 / current as f64;
    (per_step * maximum.saturating_sub(current) as f64) as u64
}

/// Seconds shown in the ETA slot: the total elapsed time once complete, otherwise the
/// remaining estimate.
#[must_use]
pub fn eta_secs(elapsed_secs: u64, current: u64, maximum: u64) -> u64 {
    if current >= maximum {
        elapsed_secs
    } else {
        remaining_secs(elapsed_secs, current, maximum)
    }
}
