//! HTML escaping for untrusted text.
//!
//! Every server-sourced string that ends up in markup goes through
//! [`escape_html`]. The node builder in [`crate::node`] is the only caller in
//! the crate; surfaces that insert text nodes directly never interpolate markup.

use std::borrow::Cow;

/// Escape the five HTML-significant characters.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
