//! The `rollcall` command.
//!
//! Reads a JSON array of records from a file or stdin, runs it through a
//! [`ListQuery`] built from the flags and prints one page as a text table or
//! as the serialized [`PageView`](rollcall::PageView).
//!
//! ```text
//! rollcall --file students.json --search ada --search-field name \
//!     --filter branch=CS --window last7d --sort createdAt --order desc \
//!     --page 2 --page-size 20 --columns name,branch,createdAt
//! ```

pub mod args;
pub mod render;

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::Local;
use rollcall::{paginate_records, Dir, ListQuery, PageRequest, TimeWindow};
use serde_json::Value as Json;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub use args::{Cli, OutputFormat};

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Installs the global tracing subscriber, writing to stderr.
pub fn init_tracing(json: bool) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let fmt_layer = if json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("failed to install tracing subscriber")
}

/// Runs one invocation, reading records from `stdin` unless `--file` is set.
pub fn run<R: Read, W: Write>(cli: &Cli, stdin: R, out: &mut W) -> Result<()> {
    let records = load_records(cli.file.as_deref(), stdin)?;
    let query = build_query(cli);
    let request = PageRequest::new(cli.page, cli.page_size);

    let view = match &cli.now {
        Some(now) => paginate_records(&records, &query, request, now),
        None => paginate_records(&records, &query, request, &Local::now()),
    };
    tracing::info!(
        records = records.len(),
        matched = view.total_items,
        page = view.page,
        "listed records"
    );

    match cli.output {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &view).context("failed to write JSON output")?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            let columns = render::resolve_columns(&cli.columns, &view.items);
            render::write_text(&view, &columns, out).context("failed to write output")?;
        }
    }
    Ok(())
}

/// Builds the list query from the command-line flags.
///
/// Unknown window and order tokens do not fail: they fall back to no window
/// and ascending order.
pub fn build_query(cli: &Cli) -> ListQuery {
    let mut query = ListQuery::new()
        .search(cli.search.as_str())
        .search_fields(cli.search_fields.iter().cloned())
        .time_window(TimeWindow::parse(&cli.window))
        .timestamp_field(cli.timestamp_field.as_str())
        .week_start(cli.week_start);

    for filter in &cli.filters {
        let filter = if cli.ignore_case {
            filter.clone().ignore_case()
        } else {
            filter.clone()
        };
        query = query.equality(filter);
    }

    if let Some(field) = &cli.sort {
        query = query.sort_by(field.as_str(), Dir::parse(&cli.order));
    }
    query.build()
}

/// Reads records from a file, or from `stdin` when no path is given.
///
/// The input is a JSON array of records or an object wrapping one under
/// `data`, the shape REST list endpoints return.
pub fn load_records<R: Read>(path: Option<&Path>, mut stdin: R) -> Result<Vec<Json>> {
    let (source, text) = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            (path.display().to_string(), text)
        }
        None => {
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            ("stdin".to_string(), text)
        }
    };

    let parsed: Json =
        serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", source))?;

    let records = match parsed {
        Json::Array(records) => records,
        Json::Object(mut map) => match map.remove("data") {
            Some(Json::Array(records)) => records,
            _ => bail!("{} must hold a JSON array of records", source),
        },
        _ => bail!("{} must hold a JSON array of records", source),
    };
    tracing::debug!(source = %source, records = records.len(), "loaded records");
    Ok(records)
}
