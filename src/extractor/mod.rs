use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::app::{Result, V2exError};
use crate::domain::{defaults, parse_mention, Reply, TopicDetail, TopicSummary};

/// Separator between the fields of a list cell's `.topic_info` line.
const INFO_SEPARATOR: char = '•';
/// Position of the relative time within `.topic_info`.
const INFO_TIME_SEGMENT: usize = 2;

struct Selectors {
    topic_cell: Selector,
    topic_link: Selector,
    author_link: Selector,
    comment_count: Selector,
    topic_info: Selector,
    heading: Selector,
    header_author: Selector,
    header_time: Selector,
    topic_content: Selector,
    reply_cell: Selector,
    reply_time: Selector,
    reply_content: Selector,
    reply_number: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            topic_cell: selector(".cell.item")?,
            topic_link: selector(".item_title a")?,
            author_link: selector("strong a")?,
            comment_count: selector(".count_livid")?,
            topic_info: selector(".topic_info")?,
            heading: selector("h1")?,
            header_author: selector(".header small a")?,
            header_time: selector(".header small span")?,
            topic_content: selector(".topic_content")?,
            reply_cell: selector(".cell[id^='r_']")?,
            reply_time: selector(".ago")?,
            reply_content: selector(".reply_content")?,
            reply_number: selector(".no")?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| V2exError::Parse(format!("bad selector {css}: {e}")))
}

/// Turns raw forum pages into domain values.
///
/// Missing fields fall back to the values in [`defaults`]; only markup that
/// is not a document at all is reported as an error.
pub struct Extractor {
    origin: Url,
    selectors: Selectors,
}

impl Extractor {
    pub fn new(origin: &str) -> Result<Self> {
        Ok(Self {
            origin: Url::parse(origin)?,
            selectors: Selectors::new()?,
        })
    }

    pub fn extract_topic_list(&self, markup: &[u8]) -> Result<Vec<TopicSummary>> {
        let document = parse_document(markup)?;
        let s = &self.selectors;

        let topics = document
            .select(&s.topic_cell)
            .map(|cell| {
                let link = cell.select(&s.topic_link).next();
                let title = link.map(element_text).unwrap_or_else(|| defaults::TITLE.into());
                let href = link.and_then(|a| a.value().attr("href")).unwrap_or_default();

                TopicSummary {
                    title,
                    author: first_text(cell, &s.author_link)
                        .unwrap_or_else(|| defaults::AUTHOR.into()),
                    comment_count: first_text(cell, &s.comment_count)
                        .and_then(|count| count.parse().ok())
                        .unwrap_or(defaults::COMMENT_COUNT),
                    relative_time: first_text(cell, &s.topic_info)
                        .and_then(|info| info_time(&info))
                        .unwrap_or_else(|| defaults::TIMESTAMP.into()),
                    url: self.absolutize(href),
                }
            })
            .collect();

        Ok(topics)
    }

    pub fn extract_topic_detail(&self, markup: &[u8], source_url: &str) -> Result<TopicDetail> {
        let document = parse_document(markup)?;
        let s = &self.selectors;
        let root = document.root_element();

        let content = document
            .select(&s.topic_content)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");

        let replies = document
            .select(&s.reply_cell)
            .map(|cell| {
                let content = first_text(cell, &s.reply_content)
                    .unwrap_or_else(|| defaults::CONTENT.into());
                Reply {
                    author: first_text(cell, &s.author_link)
                        .unwrap_or_else(|| defaults::AUTHOR.into()),
                    relative_time: first_text(cell, &s.reply_time)
                        .unwrap_or_else(|| defaults::TIMESTAMP.into()),
                    number: first_text(cell, &s.reply_number)
                        .unwrap_or_else(|| defaults::REPLY_NUMBER.into()),
                    reply_to: parse_mention(&content),
                    content,
                    reply_count: 0,
                }
            })
            .collect();

        Ok(TopicDetail {
            title: first_text(root, &s.heading).unwrap_or_else(|| defaults::TITLE.into()),
            author: first_text(root, &s.header_author).unwrap_or_else(|| defaults::AUTHOR.into()),
            created_at: root
                .select(&s.header_time)
                .next()
                .and_then(|span| span.value().attr("title"))
                .map(|t| t.trim().to_string())
                .unwrap_or_else(|| defaults::TIMESTAMP.into()),
            url: source_url.to_string(),
            content: if content.is_empty() {
                defaults::CONTENT.into()
            } else {
                content
            },
            replies,
        })
    }

    /// Resolves a link found in the page against the site origin.
    pub fn absolutize(&self, href: &str) -> String {
        let href = href.trim();
        if href.is_empty() || href.starts_with("http://") || href.starts_with("https://") {
            return href.to_string();
        }
        match self.origin.join(href) {
            Ok(url) => url.to_string(),
            Err(_) => href.to_string(),
        }
    }
}

fn parse_document(markup: &[u8]) -> Result<Html> {
    let text = std::str::from_utf8(markup)
        .map_err(|e| V2exError::Parse(format!("page is not valid UTF-8: {e}")))?;
    if text.trim().is_empty() {
        return Err(V2exError::Parse("page is empty".into()));
    }
    Ok(Html::parse_document(text))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

fn info_time(info: &str) -> Option<String> {
    info.split(INFO_SEPARATOR)
        .nth(INFO_TIME_SEGMENT)
        .map(|segment| segment.trim().to_string())
        .filter(|segment| !segment.is_empty())
}
