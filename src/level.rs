//! Indentation level of a line of text.
//!
//! A level is the width of the line's leading horizontal whitespace measured
//! in space-equivalents. Blank lines always have level 0.

/// Number of space-equivalents a tab contributes to the indentation width.
pub const TAB_WIDTH: usize = 4;

/// Returns true if `text` is empty or made only of whitespace (tabs and
/// no-break spaces included) and NUL.
///
/// # Examples
///
/// ```
/// # use indentnav::level::is_blank;
/// assert!(is_blank(""));
/// assert!(is_blank("   \r\n"));
/// assert!(is_blank("\t"));
/// assert!(!is_blank("  x"));
/// ```
pub fn is_blank(text: &str) -> bool {
    text.chars().all(|c| c.is_whitespace() || c == '\0')
}

/// Indentation width of `text`, with tabs expanded to [`TAB_WIDTH`].
///
/// # Examples
///
/// ```
/// # use indentnav::level::indent_level;
/// assert_eq!(indent_level("  a=1"), 2);
/// assert_eq!(indent_level("\tx"), 4);
/// assert_eq!(indent_level("    "), 0);
/// ```
pub fn indent_level(text: &str) -> usize {
    if is_blank(text) {
        return 0;
    }
    text.chars()
        .take_while(|&c| is_indent_char(c))
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

// Horizontal whitespace only: line breaks, vertical tab and form feed end the indent.
fn is_indent_char(c: char) -> bool {
    c.is_whitespace() && !matches!(c, '\n' | '\r' | '\u{0b}' | '\u{0c}')
}
