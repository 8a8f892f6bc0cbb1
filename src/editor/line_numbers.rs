//! Line counting utilities for the editor core

/// Count the number of lines in the given text.
///
/// Every `\n` starts a new line, so empty text is one line and a trailing
/// newline adds an empty last line.
pub fn count_lines(text: &str) -> usize {
    text.matches('\n').count() + 1
}

/// Clamp a zero-based line index to the last line of `text`.
pub fn clamp_line(text: &str, line: usize) -> usize {
    line.min(count_lines(text) - 1)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_lines_empty() {
        assert_eq!(count_lines(""), 1);
    }

    #[test]
    fn test_count_lines_multiple_lines() {
        assert_eq!(count_lines("Line 1\nLine 2\nLine 3"), 3);
    }

    #[test]
    fn test_count_lines_trailing_newline() {
        assert_eq!(count_lines("Line 1\n"), 2);
        assert_eq!(count_lines("\n\n\n"), 4);
    }

    #[test]
    fn test_clamp_line() {
        assert_eq!(clamp_line("a\nb", 0), 0);
        assert_eq!(clamp_line("a\nb", 1), 1);
        assert_eq!(clamp_line("a\nb", 7), 1);
        assert_eq!(clamp_line("", 3), 0);
    }
}
