use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::domain::{Reply, TopicDetail};
use crate::tui::app::{App, View};
use crate::tui::detail_view::{DetailState, DetailView};
use crate::tui::list_view::ListView;
use crate::tui::status::StatusKind;

pub fn render(frame: &mut Frame, app: &mut App, colors: &ColorConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Active view
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    match app.view {
        View::List => render_list(frame, &mut app.list, chunks[0], colors),
        View::Detail => render_detail(frame, &mut app.detail, chunks[0], colors),
    }
    render_status_bar(frame, app, chunks[1], colors);
}

fn render_list(frame: &mut Frame, list: &mut ListView, area: Rect, colors: &ColorConfig) {
    let title = match list.selected_index() {
        Some(index) => format!(" V2EX [{}/{}] ", index + 1, list.topics().len()),
        None => " V2EX ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let inner = block.inner(area);
    list.set_viewport(inner);

    if list.topics().is_empty() {
        let message = if list.is_loading() {
            Line::from("Loading topics...")
        } else if let Some(error) = list.error() {
            Line::from(Span::styled(
                format!("Failed to load topics: {}  (r to retry)", error),
                Style::default().fg(colors.error),
            ))
        } else {
            Line::from("No topics")
        };
        frame.render_widget(Paragraph::new(message).block(block), area);
        return;
    }

    let selected = list.selected_index();
    let items: Vec<ListItem> = list
        .visible()
        .map(|(index, topic)| {
            let line = Line::from(vec![
                Span::styled(
                    format!("{:>4} ", topic.comment_count),
                    Style::default().fg(colors.comment_count),
                ),
                Span::raw(topic.display_title().to_string()),
                Span::styled(
                    format!("  {}", topic.author),
                    Style::default().fg(colors.author),
                ),
                Span::styled(
                    format!("  {}", topic.relative_time),
                    Style::default().fg(colors.timestamp),
                ),
            ]);

            let item = ListItem::new(line);
            if Some(index) == selected {
                item.style(
                    Style::default()
                        .bg(colors.selection_bg)
                        .fg(colors.selection_fg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_detail(frame: &mut Frame, detail: &mut DetailView, area: Rect, colors: &ColorConfig) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));
    let inner = block.inner(area);

    let (title, text) = match detail.state() {
        DetailState::Empty => (" Topic ".to_string(), Text::from("No topic loaded")),
        DetailState::Loading { url } => (
            " Loading ".to_string(),
            Text::from(format!("Loading {} ...", url)),
        ),
        DetailState::Failed { url, message } => (
            " Error ".to_string(),
            Text::from(vec![
                Line::from(Span::styled(
                    format!("Failed to load {}", url),
                    Style::default().fg(colors.error),
                )),
                Line::from(Span::styled(message.clone(), Style::default().fg(colors.error))),
                Line::from(""),
                Line::from("Backspace to go back, r to retry"),
            ]),
        ),
        DetailState::Loaded(topic) => (
            format!(" {} ", topic.display_title()),
            topic_text(topic, inner.width, colors),
        ),
    };

    // Scrolling counts rows after wrapping, so measure at the inner width.
    let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
    let row_count = u16::try_from(paragraph.line_count(inner.width)).unwrap_or(u16::MAX);
    detail.set_viewport(row_count, inner.height);

    let paragraph = paragraph
        .block(block.title(title))
        .scroll((detail.scroll(), 0));
    frame.render_widget(paragraph, area);
}

fn topic_text(topic: &TopicDetail, width: u16, colors: &ColorConfig) -> Text<'static> {
    let mut lines = vec![
        Line::from(Span::styled(
            topic.display_title().to_string(),
            Style::default().fg(colors.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(topic.author.clone(), Style::default().fg(colors.author)),
            Span::raw("  "),
            Span::styled(topic.created_at.clone(), Style::default().fg(colors.timestamp)),
        ]),
        Line::from(Span::styled(topic.url.clone(), Style::default().fg(colors.mention))),
        Line::from("─".repeat(usize::from(width))),
    ];

    lines.extend(topic.content.lines().map(|l| Line::from(l.to_string())));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("{} replies", topic.replies.len()),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    for reply in &topic.replies {
        lines.push(Line::from(""));
        lines.push(reply_header(reply, colors));
        lines.extend(reply.content.lines().map(|l| Line::from(format!("  {}", l))));
    }

    Text::from(lines)
}

fn reply_header(reply: &Reply, colors: &ColorConfig) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("#{} ", reply.number.trim_start_matches('#')),
            Style::default().fg(colors.timestamp),
        ),
        Span::styled(reply.author.clone(), Style::default().fg(colors.author)),
        Span::styled(
            format!(" · {}", reply.relative_time),
            Style::default().fg(colors.timestamp),
        ),
    ];
    if let Some(to) = &reply.reply_to {
        spans.push(Span::styled(
            format!("  → @{}", to),
            Style::default().fg(colors.mention),
        ));
    }
    if reply.reply_count > 0 {
        spans.push(Span::styled(
            format!("  ↩ {}", reply.reply_count),
            Style::default().fg(colors.reply_count).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect, colors: &ColorConfig) {
    let base = Style::default().fg(colors.status_fg).bg(colors.status_bg);

    let (text, style) = match app.status.current() {
        Some(status) => {
            let style = match status.kind {
                StatusKind::Info => base,
                StatusKind::Error => base.fg(colors.error),
            };
            (status.text.clone(), style)
        }
        None => {
            let mouse = if app.mouse_enabled { "on" } else { "off" };
            let hint = match app.view {
                View::List => "j/k:Move  Enter:Open  f:Copy URL  o:Browser  r:Refresh",
                View::Detail => "j/k:Scroll  Backspace:Back  o:Browser  r:Reload",
            };
            (format!("{}  m:Mouse({})  q:Quit", hint, mouse), base)
        }
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}
