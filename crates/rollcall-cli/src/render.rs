//! Text rendering for a page of JSON records.

use std::io::{self, Write};

use rollcall::{PageItem, PageView, Record};
use serde_json::Value as Json;
use unicode_width::UnicodeWidthStr;

const PREV: &str = "‹ Prev";
const NEXT: &str = "Next ›";

/// Picks the columns to print: the requested ones, or the scalar keys of
/// the first record on the page.
pub fn resolve_columns(requested: &[String], items: &[&Json]) -> Vec<String> {
    if !requested.is_empty() {
        return requested.to_vec();
    }
    match items.first() {
        Some(Json::Object(map)) => map
            .iter()
            .filter(|(_, value)| !value.is_object() && !value.is_array())
            .map(|(key, _)| key.clone())
            .collect(),
        _ => Vec::new(),
    }
}

/// Text shown in one table cell.
pub fn cell(record: &Json, column: &str) -> String {
    record
        .field_value(column)
        .search_text()
        .map(|text| text.into_owned())
        .unwrap_or_default()
}

/// The page control, e.g. `‹ Prev 1 … 4 [5] 6 … 20 Next ›`.
pub fn page_control(pages: &[PageItem], current: usize) -> String {
    let mut parts = Vec::with_capacity(pages.len() + 2);
    parts.push(PREV.to_string());
    for item in pages {
        parts.push(match item {
            PageItem::Page(page) if *page == current => format!("[{}]", page),
            PageItem::Page(page) => page.to_string(),
            PageItem::Ellipsis => "…".to_string(),
        });
    }
    parts.push(NEXT.to_string());
    parts.join(" ")
}

/// Writes the table, the aggregate banner, the summary and the page control.
pub fn write_text<W: Write>(view: &PageView<'_, Json>, columns: &[String], out: &mut W) -> io::Result<()> {
    if view.is_empty() {
        writeln!(out, "No records match.")?;
    } else if !columns.is_empty() {
        let rows: Vec<Vec<String>> = view
            .items
            .iter()
            .map(|record| columns.iter().map(|column| cell(record, column)).collect())
            .collect();
        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                rows.iter()
                    .map(|row| row[i].width())
                    .chain(std::iter::once(column.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write_row(out, columns, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_row(out, &rule, &widths)?;
        for row in &rows {
            write_row(out, row, &widths)?;
        }
    }

    writeln!(out)?;
    if view.show_aggregate {
        writeln!(
            out,
            "{}: {} of {} records",
            view.time_window.label(),
            view.total_items,
            view.source_count
        )?;
    }
    writeln!(out, "{}", view.summary())?;
    writeln!(out, "{}", page_control(&view.pages, view.page))
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            // Display columns, so wide glyphs take two
            let pad = width.saturating_sub(cell.width());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    writeln!(out, "{}", padded.join("  ").trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall::{paginate_records, ListQuery, PageRequest, TimeWindow};
    use serde_json::json;

    fn records() -> Vec<Json> {
        (1..=45)
            .map(|i| json!({"id": i, "name": format!("Student {i}"), "tags": ["x"], "createdAt": "2024-06-14"}))
            .collect()
    }

    fn now() -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::parse_from_rfc3339("2024-06-15T00:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc)
    }

    #[test]
    fn control_marks_current_page() {
        let pages = rollcall::page_range(5, 20, 1);
        assert_eq!(page_control(&pages, 5), "‹ Prev 1 … 4 [5] 6 … 20 Next ›");
        let pages = rollcall::page_range(1, 3, 1);
        assert_eq!(page_control(&pages, 1), "‹ Prev [1] 2 3 Next ›");
    }

    #[test]
    fn default_columns_skip_nested_values() {
        let records = records();
        let items: Vec<&Json> = records.iter().collect();
        let columns = resolve_columns(&[], &items);
        assert_eq!(columns, ["createdAt", "id", "name"]);

        let requested = vec!["name".to_string()];
        assert_eq!(resolve_columns(&requested, &items), requested);
    }

    #[test]
    fn renders_table_and_footer() {
        let records = records();
        let query = ListQuery::new().sort_desc("id");
        let view = paginate_records(&records, &query, PageRequest::new(2, 20), &now());
        let columns = vec!["id".to_string(), "name".to_string()];

        let mut out = Vec::new();
        write_text(&view, &columns, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "id  name");
        assert_eq!(lines[1], "--  ----------");
        assert_eq!(lines[2], "25  Student 25");
        assert!(text.contains("Showing 21–40 of 45\n"));
        assert!(text.ends_with("‹ Prev 1 [2] 3 Next ›\n"));
        assert!(!text.contains("records\n"));
    }

    #[test]
    fn wide_characters_keep_columns_aligned() {
        let records = vec![
            json!({"name": "王小明", "branch": "CS"}),
            json!({"name": "Ada", "branch": "EE"}),
        ];
        let view = paginate_records(&records, &ListQuery::new(), PageRequest::default(), &now());
        let columns = vec!["name".to_string(), "branch".to_string()];

        let mut out = Vec::new();
        write_text(&view, &columns, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().take(4).collect();

        assert_eq!(lines[0], "name    branch");
        assert_eq!(lines[1], "------  ------");
        assert_eq!(lines[2], "王小明  CS");
        assert_eq!(lines[3], "Ada     EE");
        // The branch column starts at the same display offset on every row
        for line in &lines {
            let offset = line.rfind("  ").map(|i| line[..i + 2].width());
            assert_eq!(offset, Some(8));
        }
    }

    #[test]
    fn renders_aggregate_banner_and_empty_result() {
        let records = records();
        let query = ListQuery::new()
            .search("nobody")
            .search_field("name")
            .time_window(TimeWindow::Last7d);
        let view = paginate_records(&records, &query, PageRequest::default(), &now());

        let mut out = Vec::new();
        write_text(&view, &[], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("No records match.\n"));
        assert!(text.contains("Last 7 days: 0 of 45 records\n"));
        assert!(text.contains("Showing 0–0 of 0\n"));
    }
}
