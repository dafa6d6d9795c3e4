//! Result formatter - renders a [`QueryResult`] as a pipe table.
//!
//! ```text
//! | python_version | download_count |
//! | -------------- | -------------: |
//! | 3.11           |          1,200 |
//! | 3.10           |            800 |
//! | Total          |          2,000 |
//! ```
//!
//! When `download_count` is the first column, a blank leading column is
//! added to hold the `Total` label.

use thiserror::Error;

use crate::builder::DOWNLOAD_COUNT;
use crate::result::{group_thousands, QueryResult, Value};

/// Result type for formatting.
pub type TabulateResult<T> = Result<T, TabulateError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabulateError {
    /// Rows do not match the expected columns.
    #[error("malformed result: {0}")]
    MalformedResult(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Format rows into a table with a trailing total row.
pub fn tabulate(result: &QueryResult) -> TabulateResult<String> {
    let columns = &result.columns;
    if !columns.iter().any(|c| c == DOWNLOAD_COUNT) {
        return Err(TabulateError::MalformedResult(format!(
            "missing `{}` column",
            DOWNLOAD_COUNT
        )));
    }

    let mut body: Vec<Vec<String>> = Vec::with_capacity(result.rows.len() + 1);
    let mut aligns: Vec<Option<Align>> = columns
        .iter()
        .map(|c| (c == DOWNLOAD_COUNT).then_some(Align::Right))
        .collect();
    let mut total: i64 = 0;

    for (i, row) in result.rows.iter().enumerate() {
        let mut cells = Vec::with_capacity(columns.len());
        for (j, column) in columns.iter().enumerate() {
            let value = row.get(column).ok_or_else(|| {
                TabulateError::MalformedResult(format!("row {} has no `{}` column", i, column))
            })?;

            if column == DOWNLOAD_COUNT {
                total += match value {
                    Value::Integer(n) => *n,
                    Value::Null => 0,
                    other => {
                        return Err(TabulateError::MalformedResult(format!(
                            "row {} has a non-integer download count: {:?}",
                            i, other
                        )))
                    }
                };
            } else if aligns[j].is_none() && *value != Value::Null {
                aligns[j] = Some(if value.is_numeric() {
                    Align::Right
                } else {
                    Align::Left
                });
            }

            cells.push(value.to_string());
        }
        body.push(cells);
    }

    let mut headers = columns.clone();
    let mut aligns: Vec<Align> = aligns
        .into_iter()
        .map(|a| a.unwrap_or(Align::Left))
        .collect();

    if headers.first().map(String::as_str) == Some(DOWNLOAD_COUNT) {
        headers.insert(0, String::new());
        aligns.insert(0, Align::Left);
        for cells in &mut body {
            cells.insert(0, String::new());
        }
    }

    body.push(total_row(&headers, total));

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(j, header)| {
            body.iter()
                .map(|cells| cells[j].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&render_line(&headers, &widths, &aligns));
    out.push('\n');

    let separator: Vec<String> = widths
        .iter()
        .zip(&aligns)
        .map(|(w, align)| match align {
            Align::Left => "-".repeat(*w),
            Align::Right => format!("{}:", "-".repeat(w.saturating_sub(1))),
        })
        .collect();
    out.push_str(&format!("| {} |", separator.join(" | ")));

    for cells in &body {
        out.push('\n');
        out.push_str(&render_line(cells, &widths, &aligns));
    }

    Ok(out)
}

fn total_row(columns: &[String], total: i64) -> Vec<String> {
    columns
        .iter()
        .enumerate()
        .map(|(j, column)| {
            if column == DOWNLOAD_COUNT {
                group_thousands(total)
            } else if j == 0 {
                "Total".to_string()
            } else {
                String::new()
            }
        })
        .collect()
}

fn render_line(cells: &[String], widths: &[usize], aligns: &[Align]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .zip(aligns)
        .map(|((cell, w), align)| match align {
            Align::Left => format!("{:<w$}", cell, w = *w),
            Align::Right => format!("{:>w$}", cell, w = *w),
        })
        .collect();
    format!("| {} |", padded.join(" | "))
}
