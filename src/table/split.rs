// src/table/split.rs

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\r\n]+").expect("line regex should compile"));

/// Split `text` into its non-empty lines. Any run of `\r`/`\n` is a
/// boundary, so blank lines are dropped rather than kept as `""`.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    LINE_RE.find_iter(text).map(|m| m.as_str())
}

/// Split one line on every literal occurrence of `delimiter`.
///
/// There is no quoting or escaping: a field that itself contains the
/// delimiter comes back as two fields.
pub fn parse_row(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_blank_lines_and_mixed_endings() {
        let lines: Vec<_> = split_lines("a\r\nb\n\n\rc\r\r\n").collect();
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(split_lines("").count(), 0);
        assert_eq!(split_lines("\n\r\n").count(), 0);
    }

    #[test]
    fn lines_keep_inner_whitespace() {
        let lines: Vec<_> = split_lines("  x y \n\t").collect();
        assert_eq!(lines, vec!["  x y ", "\t"]);
    }

    #[test]
    fn non_blank_content_survives_rejoin() {
        let text = "first\r\n\r\nsecond\nthird";
        let joined = split_lines(text).collect::<Vec<_>>().join("\n");
        assert_eq!(joined, "first\nsecond\nthird");
    }

    #[test]
    fn row_rejoins_to_line() {
        let line = "1,,three, four";
        let fields = parse_row(line, ',');
        assert_eq!(fields, vec!["1", "", "three", " four"]);
        assert_eq!(fields.join(","), line);
    }

    #[test]
    fn tab_delimiter_ignores_commas() {
        assert_eq!(parse_row("a,b\tc", '\t'), vec!["a,b", "c"]);
    }

    #[test]
    fn quoted_delimiter_is_still_split() {
        assert_eq!(parse_row(r#""x,y",z"#, ','), vec![r#""x"#, r#"y""#, "z"]);
    }
}
