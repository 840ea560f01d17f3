//! Time sources: the monotonic activity clock and the calendar shown on
//! the clock face.

use crate::{Error, Result};

const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Broken-down local time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallClock {
    /// Days since Sunday (0 = Sunday .. 6 = Saturday).
    pub weekday: u8,
    /// Day of month, 1-based.
    pub day: u8,
    /// Month, 1-based.
    pub month: u8,
    pub year: u16,
    pub hour: u8,
    pub minute: u8,
}

impl WallClock {
    /// Three-letter weekday. The name table starts on Monday, so Sunday (0)
    /// lands on its last entry. Out-of-range values wrap.
    pub fn weekday_name(&self) -> &'static str {
        WEEKDAY_NAMES[(usize::from(self.weekday) + 6) % 7]
    }

    /// Three-letter month. Out-of-range values wrap (0 → "Dec", 13 → "Jan").
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(usize::from(self.month) + 11) % 12]
    }

    /// Convert seconds since 1970-01-01T00:00:00 to a calendar date.
    pub fn from_unix_secs(secs: u64) -> Self {
        let days = secs / 86_400;
        let rem = secs % 86_400;
        let (year, month, day) = civil_from_days(days);

        Self {
            // 1970-01-01 was a Thursday.
            weekday: ((days + 4) % 7) as u8,
            day,
            month,
            year,
            hour: (rem / 3_600) as u8,
            minute: (rem % 3_600 / 60) as u8,
        }
    }
}

/// Days since the Unix epoch → (year, month, day), proleptic Gregorian.
fn civil_from_days(days: u64) -> (u16, u8, u8) {
    // Shift the epoch to 0000-03-01 so leap days fall at the end of a year.
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z % 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year as u16, month as u8, day as u8)
}

/// Monotonic and calendar time for the control loop.
pub trait ClockSource {
    /// Monotonic milliseconds; only differences are meaningful.
    fn now(&self) -> u64;
    fn wall_clock(&self) -> Result<WallClock>;
}

/// Calendar clock that counts up from a fixed start time.
///
/// There is no RTC: the firmware seeds it with the build time. A clock
/// with no usable seed reports [`Error::Clock`] instead of a bogus date.
#[derive(Clone, Copy, Debug)]
pub struct SoftClock {
    /// Local Unix time at uptime zero, `None` when never set.
    epoch_secs: Option<u64>,
}

impl SoftClock {
    /// `epoch_secs` is the Unix time at uptime zero, `utc_offset_secs` the
    /// local zone offset.
    pub const fn new(epoch_secs: u64, utc_offset_secs: i64) -> Self {
        Self {
            epoch_secs: Some(epoch_secs.saturating_add_signed(utc_offset_secs)),
        }
    }

    /// A calendar with no start time.
    pub const fn unset() -> Self {
        Self { epoch_secs: None }
    }

    /// Seed from a decimal Unix-time stamp (as emitted by the build
    /// script). Anything that is not a plain decimal number leaves the
    /// clock unset.
    pub const fn from_stamp(stamp: &str, utc_offset_secs: i64) -> Self {
        let bytes = stamp.as_bytes();
        if bytes.is_empty() {
            return Self::unset();
        }
        let mut secs: u64 = 0;
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            if !b.is_ascii_digit() {
                return Self::unset();
            }
            secs = secs.saturating_mul(10).saturating_add((b - b'0') as u64);
            i += 1;
        }
        Self::new(secs, utc_offset_secs)
    }

    pub fn at(&self, uptime_ms: u64) -> Result<WallClock> {
        let epoch = self.epoch_secs.ok_or(Error::Clock)?;
        Ok(WallClock::from_unix_secs(
            epoch.saturating_add(uptime_ms / 1000),
        ))
    }
}

/// [`ClockSource`] backed by `embassy-time` uptime.
#[cfg(feature = "embedded")]
pub struct UptimeClock {
    calendar: SoftClock,
}

#[cfg(feature = "embedded")]
impl UptimeClock {
    pub const fn new(calendar: SoftClock) -> Self {
        Self { calendar }
    }
}

#[cfg(feature = "embedded")]
impl ClockSource for UptimeClock {
    fn now(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }

    fn wall_clock(&self) -> Result<WallClock> {
        self.calendar.at(self.now())
    }
}
