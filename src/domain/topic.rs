use serde::{Deserialize, Serialize};

use crate::domain::defaults;
use crate::domain::Reply;

/// One row of the topic list page. Identity is the absolute `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSummary {
    pub title: String,
    pub author: String,
    pub comment_count: u32,
    /// Relative time as displayed by the site ("3 分钟前", "2 hours ago").
    pub relative_time: String,
    pub url: String,
}

impl TopicSummary {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: defaults::AUTHOR.to_string(),
            comment_count: defaults::COMMENT_COUNT,
            relative_time: defaults::TIMESTAMP.to_string(),
            url: url.into(),
        }
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            defaults::DISPLAY_TITLE
        } else {
            &self.title
        }
    }
}

/// A fully loaded topic page: header, body and the threaded replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDetail {
    pub title: String,
    pub author: String,
    /// Absolute timestamp taken from the header's `title` attribute.
    pub created_at: String,
    pub url: String,
    pub content: String,
    pub replies: Vec<Reply>,
}

impl TopicDetail {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            defaults::DISPLAY_TITLE
        } else {
            &self.title
        }
    }
}
