//! Text width, truncation and wrapping for event labels.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Visual width of a string in terminal cells.
pub fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within a maximum visual width.
///
/// Appends "…" when anything was cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if visual_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result.push('…');
    result
}

/// Wrap `text` into at most `max_lines` lines of `width` cells.
///
/// The last line is truncated when the text does not fit.
pub fn wrap_to_box(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let wrapped: Vec<String> = textwrap::wrap(text, width)
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect();

    if wrapped.len() <= max_lines {
        return wrapped;
    }

    let mut lines: Vec<String> = wrapped[..max_lines - 1].to_vec();
    let rest = wrapped[max_lines - 1..].join(" ");
    lines.push(truncate_to_width(&rest, width));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_width() {
        assert_eq!(visual_width("standup"), 7);
        assert_eq!(visual_width("会议"), 4);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("Planning review", 8), "Plannin…");
        assert_eq!(truncate_to_width("会议室", 4), "会…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_wrap_to_box_fits() {
        assert_eq!(wrap_to_box("Design sync", 6, 3), vec!["Design", "sync"]);
    }

    #[test]
    fn test_wrap_to_box_truncates_last_line() {
        let lines = wrap_to_box("one two three four", 5, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "one");
        assert!(lines[1].ends_with('…'));
        assert!(visual_width(&lines[1]) <= 5);
    }

    #[test]
    fn test_wrap_to_box_degenerate_sizes() {
        assert!(wrap_to_box("anything", 0, 3).is_empty());
        assert!(wrap_to_box("anything", 5, 0).is_empty());
    }
}
