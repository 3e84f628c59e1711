use std::error::Error;

use serde::Serialize;

/// Display width for a label column: the longest label, kept within
/// `min..=max`.
pub fn label_width<'a>(labels: impl Iterator<Item = &'a str>, min: usize, max: usize) -> usize {
    labels
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(min)
        .clamp(min, max)
}

/// Shorten `label` to `width` chars, keeping the tail behind a `...`.
pub fn truncate_label(label: &str, width: usize) -> String {
    let len = label.chars().count();
    if len <= width || width <= 3 {
        return label.to_string();
    }
    let tail: String = label.chars().skip(len - (width - 3)).collect();
    format!("...{tail}")
}

/// Table rule of `width` box-drawing chars.
pub fn rule(width: usize) -> String {
    "\u{2500}".repeat(width)
}

/// Write a report as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(report: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Print the first `top` rows, as JSON when `json` is set.
pub fn print_top<T>(
    rows: &[T],
    top: usize,
    json: bool,
    as_json: impl FnOnce(&[T]) -> Result<(), Box<dyn Error>>,
    as_table: impl FnOnce(&[T]),
) -> Result<(), Box<dyn Error>> {
    let shown = &rows[..top.min(rows.len())];
    if json {
        as_json(shown)
    } else {
        as_table(shown);
        Ok(())
    }
}

#[cfg(test)]
#[path = "report_helpers_test.rs"]
mod tests;
