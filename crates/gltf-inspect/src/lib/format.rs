//! Text formatting helpers shared by the reports

const BYTE_UNITS: [&str; 5] = ["KB", "MB", "GB", "TB", "PB"];

/// Width that paragraphs are wrapped to
pub const PARAGRAPH_WIDTH: usize = 80;

/// Human-readable byte count using decimal (1000-based) units
///
/// Values below 1000 are printed as whole bytes, everything else with two
/// decimals, e.g. `999 B`, `1.02 KB`, `1.05 MB`.
pub fn format_bytes(bytes: usize) -> String {
    if bytes < 1000 {
        return format!("{bytes} B");
    }

    // The unit is picked from the rounded value so 999_999 reads `1.00 MB`
    let mut value = bytes as f64 / 1000.0;
    let mut unit = 0;
    while unit + 1 < BYTE_UNITS.len() && !rounds_below_thousand(value) {
        value /= 1000.0;
        unit += 1;
    }
    format!("{value:.2} {}", BYTE_UNITS[unit])
}

fn rounds_below_thousand(value: f64) -> bool {
    format!("{value:.2}")
        .parse::<f64>()
        .map_or(false, |rounded| rounded < 1000.0)
}

/// Section title, upper-cased and underlined
pub fn format_header(title: &str) -> String {
    let title = title.to_uppercase();
    let underline = "─".repeat(title.chars().count());
    format!(" {title}\n {underline}")
}

/// Word-wrap `text` to [`PARAGRAPH_WIDTH`] columns
pub fn format_paragraph(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > PARAGRAPH_WIDTH && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}
