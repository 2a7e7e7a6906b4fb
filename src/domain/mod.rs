pub mod reply;
pub mod topic;

pub use reply::{parse_mention, Reply};
pub use topic::{TopicDetail, TopicSummary};

/// Values used when a field is missing from the scraped markup.
///
/// Extraction never fails on a missing field; it substitutes these instead.
pub mod defaults {
    pub const TITLE: &str = "";
    pub const AUTHOR: &str = "";
    pub const COMMENT_COUNT: u32 = 0;
    pub const TIMESTAMP: &str = "";
    pub const CONTENT: &str = "";
    pub const REPLY_NUMBER: &str = "";
    pub const DISPLAY_TITLE: &str = "(Untitled)";
}
