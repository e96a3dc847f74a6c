use std::borrow::Cow;

/// Ellipsis appended when a string is cut short.
const ELLIPSIS: char = '…';

/// Truncates a string to at most `max_chars` characters, appending an
/// ellipsis when anything was cut off.
///
/// Counts characters rather than bytes, so multi-byte text is never split
/// mid-codepoint. Returns `Cow::Borrowed` when the string already fits
/// (no allocation).
///
/// # Examples
///
/// ```
/// use tally::util::truncate_string;
///
/// assert_eq!(truncate_string("Short", 30), "Short");
/// assert_eq!(truncate_string("Hello World", 5), "Hello…");
/// ```
pub fn truncate_string(s: &str, max_chars: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max_chars) {
        None => Cow::Borrowed(s),
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len_utf8());
            out.push_str(&s[..cut]);
            out.push(ELLIPSIS);
            Cow::Owned(out)
        }
    }
}
