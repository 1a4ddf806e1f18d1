//! Completion parsing for candidate generation and filtering.
//!
//! These functions turn free-form model output into the line-oriented shape
//! the output logs expect. No I/O, no validation of split quality.

/// Replacement for embedded line breaks in a candidate.
const LINE_BREAK_REPLACEMENT: &str = ". ";

/// Collapse a completion into a single line.
///
/// Leading and trailing whitespace is stripped and every embedded line break
/// (`\n` or `\r\n`) becomes `". "`.
///
/// # Examples
///
/// ```
/// use atoss_domain::split::single_line;
///
/// assert_eq!(single_line("  The food was great\nThe service was slow \n"),
///            "The food was great. The service was slow");
/// ```
pub fn single_line(text: &str) -> String {
    text.trim()
        .replace("\r\n", "\n")
        .replace('\n', LINE_BREAK_REPLACEMENT)
}

/// Parse a filter response into its selected candidates.
///
/// Splits on line breaks, trims each line and drops blank ones. No
/// truncation: every non-blank line is returned in order.
pub fn parse_selections(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_trims_and_joins() {
        assert_eq!(single_line("  a\nb\n\nc  "), "a. b. . c");
    }

    #[test]
    fn single_line_handles_crlf() {
        assert_eq!(single_line("a\r\nb"), "a. b");
    }

    #[test]
    fn single_line_noop_on_single_line() {
        let s = "The food was great. The service was slow.";
        assert_eq!(single_line(s), s);
    }

    #[test]
    fn parse_selections_drops_blank_lines() {
        let response = "\n  first split  \n\n   \nsecond split\n";
        assert_eq!(
            parse_selections(response),
            vec!["first split".to_string(), "second split".to_string()]
        );
    }

    #[test]
    fn parse_selections_keeps_every_line() {
        let response = "one\ntwo\nthree";
        assert_eq!(parse_selections(response).len(), 3);
    }

    #[test]
    fn parse_selections_empty_response() {
        assert!(parse_selections("  \n\n").is_empty());
    }
}
