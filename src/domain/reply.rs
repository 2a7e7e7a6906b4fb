use serde::{Deserialize, Serialize};

/// One comment on a topic page, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub author: String,
    pub relative_time: String,
    pub content: String,
    /// Floor label as shown on the page, e.g. "3".
    pub number: String,
    /// Handle from a leading "@handle" mention. Not verified against other
    /// replies' authors.
    pub reply_to: Option<String>,
    /// Number of replies in the same topic whose `reply_to` equals `author`.
    pub reply_count: usize,
}

impl Reply {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let reply_to = parse_mention(&content);
        Self {
            author: author.into(),
            content,
            reply_to,
            ..Self::default()
        }
    }
}

/// Returns the handle of a leading `@handle` mention.
///
/// Leading whitespace is skipped; the handle runs up to the next whitespace.
/// A bare `"@"` (or `"@"` followed by whitespace) is not a mention.
pub fn parse_mention(content: &str) -> Option<String> {
    let rest = content.trim_start().strip_prefix('@')?;
    let handle = rest.split(char::is_whitespace).next().unwrap_or_default();
    if handle.is_empty() {
        None
    } else {
        Some(handle.to_string())
    }
}
