//! Command-line arguments.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset};
use clap::{Parser, ValueEnum, ValueHint};
use rollcall::{EqualityFilter, WeekStart, DEFAULT_TIMESTAMP_FIELD};

/// Command-line arguments for the rollcall binary.
#[derive(Debug, Parser)]
#[command(
    name = "rollcall",
    version,
    about = "Search, filter, sort and page through a JSON collection"
)]
pub struct Cli {
    /// JSON file holding an array of records; stdin when omitted.
    #[arg(long, short = 'f', value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Case-insensitive text to look for in the search fields.
    #[arg(long, short = 's', default_value = "")]
    pub search: String,

    /// Field the search text is matched against (repeatable).
    #[arg(long = "search-field", value_name = "FIELD")]
    pub search_fields: Vec<String>,

    /// Keep records whose field equals a value (repeatable).
    #[arg(long = "filter", value_name = "FIELD=VALUE")]
    pub filters: Vec<EqualityFilter>,

    /// Compare filter values without regard to case.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub ignore_case: bool,

    /// Time window: last24h, last7d, last28d, thisWeek, thisMonth, thisYear or all.
    #[arg(long, short = 'w', default_value = "", value_name = "WINDOW")]
    pub window: String,

    /// Field holding each record's timestamp.
    #[arg(long, default_value = DEFAULT_TIMESTAMP_FIELD, value_name = "FIELD")]
    pub timestamp_field: String,

    /// First day of the week for thisWeek.
    #[arg(long, default_value = "sunday", value_name = "DAY")]
    pub week_start: WeekStart,

    /// Field to sort by.
    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,

    /// Sort direction: asc or desc.
    #[arg(long, default_value = "asc", value_name = "DIR")]
    pub order: String,

    /// Page to show, clamped into range.
    #[arg(long, short = 'p', default_value_t = 1, allow_negative_numbers = true)]
    pub page: i64,

    /// Records per page.
    #[arg(
        long,
        env = "ROLLCALL_PAGE_SIZE",
        default_value_t = 10,
        allow_negative_numbers = true
    )]
    pub page_size: i64,

    /// Comma-separated columns for text output; defaults to the first record's keys.
    #[arg(long, value_delimiter = ',', value_name = "FIELD,...")]
    pub columns: Vec<String>,

    /// Output format.
    #[arg(long, short = 'o', value_enum, env = "ROLLCALL_OUTPUT", default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Evaluate time windows against this instant instead of the clock.
    #[arg(long, value_name = "RFC3339", value_parser = parse_now)]
    pub now: Option<DateTime<FixedOffset>>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table, summary line and page control.
    Text,
    /// The serialized page view.
    Json,
}

fn parse_now(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["rollcall"]).unwrap();
        assert_eq!(cli.page, 1);
        assert_eq!(cli.timestamp_field, "createdAt");
        assert_eq!(cli.week_start, WeekStart::Sunday);
        assert!(cli.filters.is_empty());
        assert!(cli.now.is_none());
    }

    #[test]
    fn repeatable_and_delimited() {
        let cli = Cli::try_parse_from([
            "rollcall",
            "--filter",
            "status=open",
            "--filter",
            "branch=CS",
            "--search-field",
            "name",
            "--search-field",
            "email",
            "--columns",
            "name,status",
            "--page",
            "-3",
            "--now",
            "2024-06-15T12:00:00+02:00",
        ])
        .unwrap();
        assert_eq!(cli.filters.len(), 2);
        assert_eq!(cli.filters[1], EqualityFilter::new("branch", "CS"));
        assert_eq!(cli.search_fields, ["name", "email"]);
        assert_eq!(cli.columns, ["name", "status"]);
        assert_eq!(cli.page, -3);
        assert!(cli.now.is_some());
    }

    #[test]
    fn rejects_malformed_filter_and_now() {
        assert!(Cli::try_parse_from(["rollcall", "--filter", "status"]).is_err());
        assert!(Cli::try_parse_from(["rollcall", "--now", "yesterday"]).is_err());
        assert!(Cli::try_parse_from(["rollcall", "--week-start", "friday"]).is_err());
    }
}
