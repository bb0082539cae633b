//! Box-drawn text tables

use std::fmt;

/// A table of string cells with an optional head row
#[derive(Debug, Clone, Default)]
pub struct Table {
    head: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_head<I, S>(head: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            head: Some(head.into_iter().map(Into::into).collect()),
            rows: Vec::new(),
        }
    }

    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = Vec::new();
        for row in self.head.iter().chain(self.rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                let width = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(width),
                    None => widths.push(width),
                }
            }
        }
        widths
    }
}

fn rule(f: &mut fmt::Formatter<'_>, widths: &[usize], left: &str, mid: &str, right: &str) -> fmt::Result {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    writeln!(f, "{left}{}{right}", segments.join(mid))
}

fn row(f: &mut fmt::Formatter<'_>, widths: &[usize], cells: &[String]) -> fmt::Result {
    write!(f, "│")?;
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let pad = width - cell.chars().count();
        write!(f, " {cell}{} │", " ".repeat(pad))?;
    }
    writeln!(f)
}

impl fmt::Display for Table {
    /// Renders the table; the output always ends with a newline
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();
        if widths.is_empty() {
            return Ok(());
        }

        rule(f, &widths, "┌", "┬", "┐")?;
        if let Some(head) = &self.head {
            row(f, &widths, head)?;
            if !self.rows.is_empty() {
                rule(f, &widths, "├", "┼", "┤")?;
            }
        }
        for cells in &self.rows {
            row(f, &widths, cells)?;
        }
        rule(f, &widths, "└", "┴", "┘")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_head() {
        let mut table = Table::with_head(["index", "name"]);
        table.push(["0", "Cube"]);
        table.push(["1", "Suzanne"]);

        let expected = "\
┌───────┬─────────┐
│ index │ name    │
├───────┼─────────┤
│ 0     │ Cube    │
│ 1     │ Suzanne │
└───────┴─────────┘
";
        assert_eq!(table.to_string(), expected);
    }

    #[test]
    fn test_render_key_value_rows() {
        let mut table = Table::new();
        table.push(["version", "2.0"]);
        let rendered = table.to_string();
        assert!(rendered.contains("│ version │ 2.0 │"));
        assert!(!rendered.contains('┼'));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = Table::with_head(["a", "b"]);
        table.push(["1"]);
        assert!(table.to_string().contains("│ 1 │   │"));
    }

    #[test]
    fn test_empty_table_renders_nothing() {
        assert_eq!(Table::new().to_string(), "");
    }
}
