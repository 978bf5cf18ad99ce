//! Relative time-window filtering.
//!
//! Listing pages offer a "created" dropdown with a fixed set of windows. The
//! tokens are persisted in URL query parameters, so they are kept verbatim:
//! `""`, `last24h`, `last7d`, `last28d`, `thisWeek`, `thisMonth`, `thisYear`
//! and `all`.
//!
//! Rolling windows (`last*`) compare elapsed time: `now - ts <= N days`.
//! Timestamps in the future give a negative difference and therefore pass.
//! Calendar windows (`this*`) compare against the start of the current week,
//! month or year in the timezone of `now`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, LocalResult, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{QueryError, Result};
use crate::value::{Timestamp, Value};

/// Milliseconds in one day.
pub const DAY_MS: i64 = 86_400_000;

/// A named relative date range.
///
/// [`TimeWindow::None`] (no filter selected) and [`TimeWindow::All`] (an
/// explicit "no restriction") filter identically but are distinct states:
/// only an active window asks the UI for an aggregate summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindow {
    /// No window selected (`""`).
    #[default]
    None,
    /// The last 24 hours.
    Last24h,
    /// The last 7 days.
    Last7d,
    /// The last 28 days.
    Last28d,
    /// Since the start of the current week.
    ThisWeek,
    /// Since the first of the current month.
    ThisMonth,
    /// Since January 1st of the current year.
    ThisYear,
    /// Everything, selected explicitly.
    All,
}

impl TimeWindow {
    /// Every window, in the order a dropdown lists them.
    pub const VARIANTS: [TimeWindow; 8] = [
        TimeWindow::None,
        TimeWindow::Last24h,
        TimeWindow::Last7d,
        TimeWindow::Last28d,
        TimeWindow::ThisWeek,
        TimeWindow::ThisMonth,
        TimeWindow::ThisYear,
        TimeWindow::All,
    ];

    /// The interop token for this window.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::None => "",
            TimeWindow::Last24h => "last24h",
            TimeWindow::Last7d => "last7d",
            TimeWindow::Last28d => "last28d",
            TimeWindow::ThisWeek => "thisWeek",
            TimeWindow::ThisMonth => "thisMonth",
            TimeWindow::ThisYear => "thisYear",
            TimeWindow::All => "all",
        }
    }

    /// Human label for dropdowns and summaries.
    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::None => "Any time",
            TimeWindow::Last24h => "Last 24 hours",
            TimeWindow::Last7d => "Last 7 days",
            TimeWindow::Last28d => "Last 28 days",
            TimeWindow::ThisWeek => "This week",
            TimeWindow::ThisMonth => "This month",
            TimeWindow::ThisYear => "This year",
            TimeWindow::All => "All time",
        }
    }

    /// Parses a token, treating anything unrecognized as no restriction.
    pub fn parse(token: &str) -> TimeWindow {
        token.parse().unwrap_or_else(|_| {
            tracing::debug!(token, "unknown time window, ignoring");
            TimeWindow::None
        })
    }

    /// Returns `true` for every window except [`TimeWindow::None`].
    pub fn is_active(self) -> bool {
        !matches!(self, TimeWindow::None)
    }

    /// Whether a listing should show its aggregate-total banner.
    pub fn shows_aggregate(self) -> bool {
        self.is_active()
    }

    /// The elapsed-time limit of a rolling window.
    pub fn rolling_limit_ms(self) -> Option<i64> {
        match self {
            TimeWindow::Last24h => Some(DAY_MS),
            TimeWindow::Last7d => Some(7 * DAY_MS),
            TimeWindow::Last28d => Some(28 * DAY_MS),
            _ => None,
        }
    }

    /// Resolves this window against `now` once, for testing many records.
    pub fn resolve<Tz: TimeZone>(self, now: &DateTime<Tz>, week_start: WeekStart) -> WindowBounds {
        if let Some(limit_ms) = self.rolling_limit_ms() {
            return WindowBounds::Elapsed {
                now: Timestamp(now.timestamp_millis()),
                limit_ms,
            };
        }
        let today = now.date_naive();
        let start = match self {
            TimeWindow::ThisWeek => {
                let back = week_start.days_since(today);
                today.checked_sub_days(Days::new(back)).unwrap_or(today)
            }
            TimeWindow::ThisMonth => today.with_day(1).unwrap_or(today),
            TimeWindow::ThisYear => NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
            _ => return WindowBounds::Unbounded,
        };
        WindowBounds::Since(local_midnight(&now.timezone(), start))
    }

    /// Tests a timestamp against this window with weeks starting on Sunday.
    pub fn contains<Tz: TimeZone>(self, ts: Timestamp, now: &DateTime<Tz>) -> bool {
        self.resolve(now, WeekStart::default()).contains(ts)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        TimeWindow::VARIANTS
            .into_iter()
            .find(|window| window.as_str() == s)
            .ok_or_else(|| QueryError::UnknownTimeWindow(s.to_string()))
    }
}

impl Serialize for TimeWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TimeWindow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(TimeWindow::parse(&token))
    }
}

/// First day of the week for [`TimeWindow::ThisWeek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    fn days_since(self, date: NaiveDate) -> u64 {
        let weekday = date.weekday();
        let days = match self {
            WeekStart::Sunday => weekday.num_days_from_sunday(),
            WeekStart::Monday => weekday.num_days_from_monday(),
        };
        u64::from(days)
    }
}

impl FromStr for WeekStart {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            _ => Err(QueryError::UnknownWeekStart(s.to_string())),
        }
    }
}

/// A time window resolved against a fixed "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowBounds {
    /// Every timestamp passes.
    Unbounded,
    /// `now - ts <= limit_ms`.
    Elapsed { now: Timestamp, limit_ms: i64 },
    /// `ts >= start`.
    Since(Timestamp),
}

impl WindowBounds {
    /// Tests a record timestamp against the bounds.
    pub fn contains(self, ts: Timestamp) -> bool {
        match self {
            WindowBounds::Unbounded => true,
            // Future timestamps give a negative difference and pass.
            WindowBounds::Elapsed { now, limit_ms } => {
                now.as_millis().saturating_sub(ts.as_millis()) <= limit_ms
            }
            WindowBounds::Since(start) => ts >= start,
        }
    }

    /// The earliest timestamp inside the bounds, if there is one.
    pub fn start(self) -> Option<Timestamp> {
        match self {
            WindowBounds::Unbounded => None,
            WindowBounds::Elapsed { now, limit_ms } => {
                Some(Timestamp(now.as_millis().saturating_sub(limit_ms)))
            }
            WindowBounds::Since(start) => Some(start),
        }
    }
}

/// Returns the first instant of a window, or `None` for unbounded windows.
pub fn window_start<Tz: TimeZone>(
    window: TimeWindow,
    now: &DateTime<Tz>,
    week_start: WeekStart,
) -> Option<Timestamp> {
    window.resolve(now, week_start).start()
}

/// Tests the timestamp stored under `timestamp_field` against `window`.
///
/// Missing or unparseable timestamps count as the epoch.
pub fn matches_time_window<T, F, Tz>(
    item: &T,
    window: TimeWindow,
    timestamp_field: &str,
    now: &DateTime<Tz>,
    accessor: F,
) -> bool
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    Tz: TimeZone,
{
    window.contains(accessor(item, timestamp_field).to_timestamp(), now)
}

// Midnight may fall in a DST gap; the earliest valid instant after it wins.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Timestamp {
    let naive = date.and_time(Default::default());
    let instant = match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.timestamp_millis(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
        LocalResult::None => tz.from_utc_datetime(&naive).timestamp_millis(),
    };
    Timestamp(instant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[test]
    fn tokens_round_trip() {
        for window in TimeWindow::VARIANTS {
            assert_eq!(window.as_str().parse::<TimeWindow>(), Ok(window));
        }
        assert_eq!(TimeWindow::ThisWeek.to_string(), "thisWeek");
    }

    #[test]
    fn strict_and_lenient_parsing() {
        assert_eq!(
            "lastWeek".parse::<TimeWindow>(),
            Err(QueryError::UnknownTimeWindow("lastWeek".to_string()))
        );
        // Tokens are case-sensitive
        assert!("ThisWeek".parse::<TimeWindow>().is_err());
        assert_eq!(TimeWindow::parse("lastWeek"), TimeWindow::None);
        assert_eq!(TimeWindow::parse("last7d"), TimeWindow::Last7d);
    }

    #[test]
    fn none_and_all_are_distinct() {
        assert!(!TimeWindow::None.is_active());
        assert!(TimeWindow::All.is_active());
        assert!(TimeWindow::All.shows_aggregate());
        assert!(!TimeWindow::None.shows_aggregate());

        let now = utc("2024-06-15T12:00:00Z");
        assert!(TimeWindow::None.contains(Timestamp::EPOCH, &now));
        assert!(TimeWindow::All.contains(Timestamp::EPOCH, &now));
    }

    #[test]
    fn serde_uses_tokens() {
        assert_eq!(
            serde_json::to_string(&TimeWindow::Last28d).unwrap(),
            r#""last28d""#
        );
        assert_eq!(serde_json::to_string(&TimeWindow::None).unwrap(), r#""""#);
        let window: TimeWindow = serde_json::from_str(r#""thisMonth""#).unwrap();
        assert_eq!(window, TimeWindow::ThisMonth);
        let window: TimeWindow = serde_json::from_str(r#""bogus""#).unwrap();
        assert_eq!(window, TimeWindow::None);
    }

    #[test]
    fn rolling_windows_use_elapsed_time() {
        let now = utc("2024-06-15T12:00:00Z");
        assert!(TimeWindow::Last24h.contains(ts("2024-06-14T12:00:00Z"), &now));
        assert!(!TimeWindow::Last24h.contains(ts("2024-06-14T11:59:59Z"), &now));
        assert!(TimeWindow::Last7d.contains(ts("2024-06-08T12:00:00Z"), &now));
        assert!(!TimeWindow::Last7d.contains(ts("2024-06-08T11:00:00Z"), &now));
        assert!(TimeWindow::Last28d.contains(ts("2024-05-18T12:00:00Z"), &now));
        assert!(!TimeWindow::Last28d.contains(ts("2024-05-17T12:00:00Z"), &now));
    }

    #[test]
    fn rolling_windows_include_future_records() {
        let now = utc("2024-06-15T12:00:00Z");
        assert!(TimeWindow::Last24h.contains(ts("2030-01-01T00:00:00Z"), &now));
        assert!(TimeWindow::Last7d.contains(ts("2024-06-16T00:00:00Z"), &now));
    }

    #[test]
    fn this_year_boundary() {
        let now = utc("2024-06-15T00:00:00Z");
        assert!(TimeWindow::ThisYear.contains(ts("2024-01-01T00:00:00Z"), &now));
        assert!(!TimeWindow::ThisYear.contains(ts("2023-12-31T00:00:00Z"), &now));
    }

    #[test]
    fn this_month_boundary() {
        let now = utc("2024-06-15T09:30:00Z");
        assert!(TimeWindow::ThisMonth.contains(ts("2024-06-01T00:00:00Z"), &now));
        assert!(!TimeWindow::ThisMonth.contains(ts("2024-05-31T23:59:59Z"), &now));
    }

    #[test]
    fn this_week_starts_sunday_by_default() {
        // 2024-06-15 is a Saturday; the week began Sunday 2024-06-09.
        let now = utc("2024-06-15T18:00:00Z");
        let bounds = TimeWindow::ThisWeek.resolve(&now, WeekStart::Sunday);
        assert_eq!(bounds.start(), Some(ts("2024-06-09T00:00:00Z")));
        assert!(bounds.contains(ts("2024-06-09T00:00:00Z")));
        assert!(!bounds.contains(ts("2024-06-08T23:59:59Z")));

        let monday = TimeWindow::ThisWeek.resolve(&now, WeekStart::Monday);
        assert_eq!(monday.start(), Some(ts("2024-06-10T00:00:00Z")));
    }

    #[test]
    fn this_week_on_sunday_starts_today() {
        let now = utc("2024-06-09T08:00:00Z");
        assert_eq!(
            window_start(TimeWindow::ThisWeek, &now, WeekStart::Sunday),
            Some(ts("2024-06-09T00:00:00Z"))
        );
    }

    #[test]
    fn calendar_windows_follow_now_timezone() {
        // 01:00 on Jan 1st at +05:00 is still Dec 31st in UTC.
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2024, 1, 1, 1, 0, 0).unwrap();
        assert_eq!(
            window_start(TimeWindow::ThisYear, &now, WeekStart::Sunday),
            Some(ts("2023-12-31T19:00:00Z"))
        );
    }

    #[test]
    fn unbounded_windows_have_no_start() {
        let now = utc("2024-06-15T00:00:00Z");
        assert_eq!(window_start(TimeWindow::None, &now, WeekStart::Sunday), None);
        assert_eq!(window_start(TimeWindow::All, &now, WeekStart::Sunday), None);
        assert_eq!(
            window_start(TimeWindow::Last24h, &now, WeekStart::Sunday),
            Some(ts("2024-06-14T00:00:00Z"))
        );
    }

    #[test]
    fn missing_timestamp_is_epoch() {
        struct Item;
        fn accessor<'a>(_: &'a Item, _: &str) -> Value<'a> {
            Value::None
        }
        let now = utc("2024-06-15T00:00:00Z");
        assert!(!matches_time_window(&Item, TimeWindow::Last28d, "createdAt", &now, accessor));
        assert!(matches_time_window(&Item, TimeWindow::None, "createdAt", &now, accessor));

        // An epoch-era "now" still admits the epoch.
        let early = utc("1970-01-03T00:00:00Z");
        assert!(matches_time_window(&Item, TimeWindow::Last7d, "createdAt", &early, accessor));
    }

    #[test]
    fn week_start_parse() {
        assert_eq!("Monday".parse::<WeekStart>(), Ok(WeekStart::Monday));
        assert!("friday".parse::<WeekStart>().is_err());
    }
}
