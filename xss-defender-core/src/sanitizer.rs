use ammonia::{Builder, UrlRelative};
use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Tags kept by the basic allow-list.
pub const BASIC_TAGS: &[&str] = &[
    "a", "b", "blockquote", "br", "cite", "code", "dd", "dl", "dt", "em", "i", "li", "ol", "p",
    "pre", "q", "small", "span", "strike", "strong", "sub", "sup", "u", "ul",
];

/// URL schemes accepted in `a[href]`.
pub const LINK_SCHEMES: &[&str] = &["ftp", "http", "https", "mailto"];

/// URL schemes accepted in `blockquote[cite]` and `q[cite]`.
pub const CITE_SCHEMES: &[&str] = &["http", "https"];

// Sanitized markup settles after one or two extra passes.
const MAX_PASSES: usize = 8;

static BASIC: Lazy<XssSanitizer> = Lazy::new(XssSanitizer::basic);

/// Allow-list HTML sanitizer
pub struct XssSanitizer {
    builder: Builder<'static>,
}

impl XssSanitizer {
    /// Create the basic sanitizer: inline formatting, lists, quotes and
    /// links with safe schemes. Links are forced to `rel="nofollow"`.
    pub fn basic() -> Self {
        let mut builder = Builder::default();

        builder
            .tags(BASIC_TAGS.iter().copied().collect())
            .generic_attributes(HashSet::new())
            .tag_attributes(HashMap::from([
                ("a", HashSet::from(["href"])),
                ("blockquote", HashSet::from(["cite"])),
                ("q", HashSet::from(["cite"])),
            ]))
            .url_schemes(LINK_SCHEMES.iter().copied().collect())
            .url_relative(UrlRelative::Deny)
            .link_rel(Some("nofollow"))
            .strip_comments(true)
            .attribute_filter(filter_cite);

        Self { builder }
    }

    /// Remove every tag, attribute and script body outside the allow-list.
    ///
    /// Never fails: malformed markup is repaired by the parser.
    ///
    /// Unwrapping a disallowed element can leave a tree the parser would
    /// build differently (an `li` or `a` nested through a table cell), so the
    /// output is cleaned again until it stops changing.
    pub fn clean(&self, text: &str) -> String {
        let mut cleaned = self.clean_once(text);
        for _ in 1..MAX_PASSES {
            let again = self.clean_once(&cleaned);
            if again == cleaned {
                break;
            }
            cleaned = again;
        }
        cleaned
    }

    fn clean_once(&self, text: &str) -> String {
        keep_pre_newline(self.builder.clean(text).to_string())
    }

    /// Check whether cleaning would leave `text` exactly as it is.
    pub fn is_clean(&self, text: &str) -> bool {
        self.clean(text) == text
    }
}

impl Default for XssSanitizer {
    fn default() -> Self {
        Self::basic()
    }
}

impl fmt::Debug for XssSanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XssSanitizer")
            .field("tags", &BASIC_TAGS)
            .field("link_schemes", &LINK_SCHEMES)
            .finish_non_exhaustive()
    }
}

// `cite` is narrower than `href`: web links only.
fn filter_cite<'u>(element: &str, attribute: &str, value: &'u str) -> Option<Cow<'u, str>> {
    if attribute != "cite" || !matches!(element, "blockquote" | "q") {
        return Some(Cow::Borrowed(value));
    }

    let scheme = value.split_once(':').map(|(scheme, _)| scheme.trim().to_lowercase());
    match scheme {
        Some(scheme) if CITE_SCHEMES.contains(&scheme.as_str()) => Some(Cow::Borrowed(value)),
        _ => None,
    }
}

// The parser drops the first newline after `<pre>` and the serializer does
// not write it back, so a leading newline is doubled to survive the next
// parse. Text `<` is always escaped in the output and attribute values are
// double-quoted, which keeps the scan to tag boundaries.
fn keep_pre_newline(html: String) -> String {
    const PRE_NEWLINE: &str = "<pre>\n";

    if !html.contains(PRE_NEWLINE) {
        return html;
    }

    let mut output = String::with_capacity(html.len() + 1);
    let mut in_tag = false;
    let mut in_value = false;
    let mut rest = html.as_str();

    while let Some(c) = rest.chars().next() {
        if !in_tag && rest.starts_with(PRE_NEWLINE) {
            output.push_str("<pre>\n\n");
            rest = &rest[PRE_NEWLINE.len()..];
            continue;
        }

        match c {
            '<' if !in_tag => in_tag = true,
            '"' if in_tag => in_value = !in_value,
            '>' if in_tag && !in_value => in_tag = false,
            _ => {}
        }
        output.push(c);
        rest = &rest[c.len_utf8()..];
    }

    output
}

/// Clean `text` with the shared basic sanitizer.
pub fn clean(text: &str) -> String {
    BASIC.clean(text)
}

/// Check `text` against the shared basic sanitizer.
pub fn is_clean(text: &str) -> bool {
    BASIC.is_clean(text)
}
