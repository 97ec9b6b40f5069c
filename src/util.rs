//! Text helpers for page rendering.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

/// Render a stored date (`YYYY-MM`, `YYYY-MM-DD` or RFC 3339) as `Jan 2022`.
///
/// Unparseable input is returned unchanged.
pub fn format_month(date: &str) -> String {
    let date = date.trim();
    let parsed = NaiveDate::parse_from_str(&format!("{date}-01"), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
        .or_else(|_| DateTime::parse_from_rfc3339(date).map(|dt| dt.date_naive()));

    match parsed {
        Ok(day) => day.format("%b %Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// `Jan 2022 - Mar 2024`, or `Jan 2022 - Present` when there is no end date
pub fn format_date_range(start: &str, end: Option<&str>) -> String {
    match end.filter(|e| !e.trim().is_empty()) {
        Some(end) => format!("{} - {}", format_month(start), format_month(end)),
        None => format!("{} - Present", format_month(start)),
    }
}

fn slug_patterns() -> &'static (Regex, Regex, Regex) {
    static PATTERNS: OnceLock<(Regex, Regex, Regex)> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        (
            Regex::new(r"[^\w\s-]").expect("static regex"),
            Regex::new(r"[\s_-]+").expect("static regex"),
            Regex::new(r"^-+|-+$").expect("static regex"),
        )
    })
}

/// URL- and anchor-safe slug: `"Hello, World!"` becomes `"hello-world"`
pub fn slugify(text: &str) -> String {
    let (strip, collapse, trim) = slug_patterns();
    let lower = text.to_lowercase();
    let stripped = strip.replace_all(&lower, "");
    let collapsed = collapse.replace_all(&stripped, "-");
    trim.replace_all(&collapsed, "").into_owned()
}

/// Cut to `max_chars` characters, appending `...` when shortened
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

/// Escape text for HTML element and attribute content
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_month() {
        assert_eq!(format_month("2022-01"), "Jan 2022");
        assert_eq!(format_month("2020-06-15"), "Jun 2020");
        assert_eq!(format_month("2019-12-01T00:00:00Z"), "Dec 2019");
        assert_eq!(format_month("sometime"), "sometime");
    }

    #[test]
    fn test_format_date_range() {
        assert_eq!(
            format_date_range("2022-01", Some("2024-01")),
            "Jan 2022 - Jan 2024"
        );
        assert_eq!(format_date_range("2022-01", None), "Jan 2022 - Present");
        assert_eq!(format_date_range("2022-01", Some("")), "Jan 2022 - Present");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("E-Commerce Platform"), "e-commerce-platform");
        assert_eq!(slugify("  Hello, World!  "), "hello-world");
        assert_eq!(slugify("snake_case  and--dashes"), "snake-case-and-dashes");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("a longer sentence", 8), "a longer...");
        assert_eq!(truncate_text("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }
}
