/// HTML entity encoding
pub struct XssEncoder;

impl XssEncoder {
    /// Replace `&`, `<`, `>`, `"` and `'` with their character references.
    ///
    /// Every other character passes through untouched. Not idempotent:
    /// `&amp;` becomes `&amp;amp;`.
    pub fn escape_html(text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => output.push_str("&amp;"),
                '<' => output.push_str("&lt;"),
                '>' => output.push_str("&gt;"),
                '"' => output.push_str("&quot;"),
                '\'' => output.push_str("&#39;"),
                _ => output.push(c),
            }
        }
        output
    }

    /// Check whether `text` contains a character `escape_html` would replace.
    pub fn needs_escaping(text: &str) -> bool {
        text.contains(['&', '<', '>', '"', '\''])
    }
}

/// Escape markup-significant characters. See [`XssEncoder::escape_html`].
pub fn escape(text: &str) -> String {
    XssEncoder::escape_html(text)
}
