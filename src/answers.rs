//! Formatting for the `written_answers.txt` report.
//!
//! Each selected column becomes a block: the column name centered in a
//! dashed banner, the value, then a closing rule.

use regex::Regex;

/// Extra dashes added around the longest column name.
const BANNER_PADDING: usize = 20;

/// Matches the id column (anywhere in a header) or a `Question N[.M] Response` header.
pub fn column_pattern(id_column: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?:^Question \d\d?(?:\.\d\d?)? Response$)|(?:{})",
        regex::escape(id_column)
    ))
}

pub fn banner_width<'a>(columns: impl IntoIterator<Item = &'a str>) -> usize {
    columns
        .into_iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        + BANNER_PADDING
}

pub fn build_header(column_name: &str, width: usize) -> String {
    let num_dashes = width.saturating_sub(column_name.chars().count());
    let first = num_dashes / 2;
    let second = num_dashes - first;
    format!("{}{}{}\n", "-".repeat(first), column_name, "-".repeat(second))
}

/// Renders one submission. `fields` pairs column names with values, in header order.
pub fn render<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>, width: usize) -> String {
    let mut out = String::new();
    for (name, value) in fields {
        out.push_str(&build_header(name, width));
        out.push_str(value);
        out.push('\n');
        out.push_str(&"-".repeat(width));
        out.push_str("\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_even_split() {
        assert_eq!(build_header("ab", 6), "--ab--\n");
    }

    #[test]
    fn test_header_odd_split_puts_extra_dash_right() {
        assert_eq!(build_header("abc", 6), "-abc--\n");
    }

    #[test]
    fn test_header_wider_name_than_width() {
        assert_eq!(build_header("abcdef", 4), "abcdef\n");
    }

    #[test]
    fn test_banner_width_uses_longest_name() {
        let width = banner_width(["Submission ID", "Question 1 Response"]);
        assert_eq!(width, "Question 1 Response".len() + 20);
        assert_eq!(banner_width(std::iter::empty()), 20);
    }

    #[test]
    fn test_column_pattern() {
        let re = column_pattern("Submission ID").unwrap();
        assert!(re.is_match("Submission ID"));
        assert!(re.is_match("Question 1 Response"));
        assert!(re.is_match("Question 12.3 Response"));
        assert!(!re.is_match("Question 1 Score"));
        assert!(!re.is_match("Question 123 Response"));
        assert!(!re.is_match("Email"));
    }

    #[test]
    fn test_column_pattern_escapes_id() {
        let re = column_pattern("ID (raw)").unwrap();
        assert!(re.is_match("ID (raw)"));
        assert!(!re.is_match("ID raw"));
    }

    #[test]
    fn test_render_blocks() {
        let text = render([("ID", "7"), ("Q", "yes\nno")], 4);
        assert_eq!(text, "-ID-\n7\n----\n\n-Q--\nyes\nno\n----\n\n");
    }
}
