mod layout;

use layout::{Rows, Section};

use crate::convert::markdown::display_heading;
use crate::resolve::Document;
use crate::tui::app::{App, AppMode, Focus, RowKind};
use crate::tui::help_text;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
    ScrollbarState, Wrap,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;

pub fn render(frame: &mut Frame, app: &mut App) {
    app.clear_expired_status_message();

    let area = frame.area();
    let show_search_bar = app.mode == AppMode::Search || !app.search_query.is_empty();
    let screen = Rows::split(
        area,
        &[
            (Section::Title, Constraint::Length(2), true),
            (Section::Search, Constraint::Length(3), show_search_bar),
            (Section::Body, Constraint::Min(0), true),
            (Section::Status, Constraint::Length(1), true),
        ],
    );

    render_title_bar(frame, app, screen.area(Section::Title));

    if let Some(search_area) = screen.get(Section::Search) {
        render_search_bar(frame, app, search_area);
    }

    let body = screen.area(Section::Body);
    if app.show_sidebar {
        let [sidebar, content] = Layout::horizontal([
            Constraint::Percentage(app.sidebar_width),
            Constraint::Percentage(100 - app.sidebar_width),
        ])
        .areas(body);
        render_sidebar(frame, app, sidebar);
        render_content(frame, app, content);
    } else {
        render_content(frame, app, body);
    }

    render_status_bar(frame, app, screen.area(Section::Status));

    if app.show_help {
        render_help_popup(frame, app, area);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let nodes = app.visible_nodes();
    let count = crate::catalog::flatten(&nodes).len();
    let title_text = format!("mastery - {count} guides");

    let title = Paragraph::new(title_text)
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let query = if app.mode == AppMode::Search {
        format!("{}_", app.search_query)
    } else {
        app.search_query.clone()
    };
    let hint = if app.mode == AppMode::Search {
        "  (Enter: keep, Esc: clear)"
    } else {
        "  (/: edit, Esc: clear)"
    };

    let line = Line::from(vec![
        Span::raw("Search: "),
        Span::styled(
            query,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(hint, Style::default().fg(MUTED)),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Filter Guides "),
    );
    frame.render_widget(paragraph, area);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

fn render_sidebar(frame: &mut Frame, app: &mut App, area: Rect) {
    let current = app.current_id().map(str::to_string);

    let items: Vec<ListItem> = app
        .rows
        .iter()
        .map(|row| {
            let indent = "  ".repeat(row.depth);
            let mut spans = Vec::new();
            match &row.kind {
                RowKind::Group { expanded, empty } => {
                    let marker = match (*empty, *expanded) {
                        (true, _) => "  ",
                        (false, true) => "▼ ",
                        (false, false) => "▶ ",
                    };
                    spans.push(Span::styled(
                        format!("{indent}{marker}{}", row.title),
                        Style::default().add_modifier(Modifier::BOLD),
                    ));
                }
                RowKind::Leaf { badge } => {
                    let style = if current.as_deref() == Some(row.id.as_str()) {
                        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    spans.push(Span::styled(format!("{indent}• {}", row.title), style));
                    if let Some(badge) = badge {
                        spans.push(Span::styled(
                            format!(" [{badge}]"),
                            Style::default().fg(Color::Green),
                        ));
                    }
                }
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = if app.rows.is_empty() && !app.search_query.is_empty() {
        " No matches "
    } else {
        " Learning Guides "
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(app.focus == Focus::Sidebar))
                .title(title),
        )
        .highlight_style(Style::default().bg(Color::Rgb(40, 50, 70)))
        .highlight_symbol("► ");

    frame.render_stateful_widget(list, area, &mut app.sidebar_state);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .style(Style::default().fg(MUTED));
    frame.render_stateful_widget(
        scrollbar,
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut app.sidebar_scroll_state,
    );
}

fn render_content(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app.focus == Focus::Content));

    let Some(document) = &app.document else {
        let message = if app.is_loading() {
            vec![Line::from("Loading content...")]
        } else {
            welcome_lines()
        };
        let inner = block.inner(area);
        frame.render_widget(block.title(" Content "), area);
        let [middle] = Layout::vertical([Constraint::Length(message.len() as u16)])
            .flex(Flex::Center)
            .areas(inner);
        frame.render_widget(
            Paragraph::new(message).alignment(Alignment::Center),
            middle,
        );
        return;
    };

    let title = if app.is_loading() {
        format!(" {} (loading...) ", document.title)
    } else {
        format!(" {} ", document.title)
    };
    let inner = block.inner(area);
    frame.render_widget(block.title(title), area);

    let header = header_lines(document);
    let viewer = Rows::split(
        inner,
        &[
            (Section::Header, Constraint::Length(header.len() as u16), true),
            (Section::Text, Constraint::Min(0), true),
            (Section::Footer, Constraint::Length(2), true),
        ],
    );

    frame.render_widget(
        Paragraph::new(header).wrap(Wrap { trim: true }),
        viewer.area(Section::Header),
    );

    let text_area = viewer.area(Section::Text);
    let body = match &document.content {
        Some(content) => render_markdown(content),
        None => Text::from(Line::styled(
            "This is a group. Pick a guide inside it from the sidebar.",
            Style::default().fg(MUTED),
        )),
    };
    frame.render_widget(
        Paragraph::new(body)
            .wrap(Wrap { trim: false })
            .scroll((app.content_scroll, 0)),
        text_area,
    );

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .style(Style::default().fg(MUTED));
    frame.render_stateful_widget(scrollbar, text_area, &mut app.content_scroll_state.clone());

    render_footer(frame, app, viewer.area(Section::Footer));
}

fn welcome_lines() -> Vec<Line<'static>> {
    vec![
        Line::styled(
            "Welcome to Tech Mastery",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(
            "Select a guide from the sidebar to start learning",
            Style::default().fg(MUTED),
        ),
    ]
}

fn header_lines(document: &Document) -> Vec<Line<'static>> {
    let mut lines = vec![Line::styled(
        document.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(description) = &document.description {
        lines.push(Line::styled(
            description.clone(),
            Style::default().fg(Color::Gray),
        ));
    }

    let mut meta = Vec::new();
    if let Some(category) = &document.category {
        meta.push(category.clone());
    }
    if let Some(minutes) = document.read_time {
        meta.push(format!("{minutes} min read"));
    }
    if !meta.is_empty() {
        lines.push(Line::styled(meta.join(" · "), Style::default().fg(MUTED)));
    }
    lines.push(Line::from(""));
    lines
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let (prev, next) = app.neighbor_titles();
    let half = (area.width / 2).saturating_sub(2) as usize;

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(MUTED));

    let prev_line = prev
        .map(|title| format!("← p: {}", truncate(&title, half.saturating_sub(6))))
        .unwrap_or_default();
    let next_line = next
        .map(|title| format!("{} :n →", truncate(&title, half.saturating_sub(6))))
        .unwrap_or_default();

    frame.render_widget(
        Paragraph::new(prev_line)
            .style(Style::default().fg(ACCENT))
            .block(block.clone()),
        left,
    );
    frame.render_widget(
        Paragraph::new(next_line)
            .style(Style::default().fg(ACCENT))
            .alignment(Alignment::Right)
            .block(block),
        right,
    );
}

/// Cut `text` to at most `max` display columns, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

fn heading_style(level: usize) -> Style {
    let color = match level {
        1 => Color::Cyan,
        2 => Color::LightBlue,
        3 => Color::LightGreen,
        _ => Color::Yellow,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Light markdown styling for the viewer: headings, code fences, quotes.
fn render_markdown(content: &str) -> Text<'static> {
    let mut lines = Vec::new();
    let mut in_code = false;

    for raw in content.lines() {
        // Replace tabs with spaces to avoid terminal rendering artifacts
        let line = raw.replace('\t', "    ");
        let trimmed = line.trim_start();

        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_code = !in_code;
            lines.push(Line::styled(line, Style::default().fg(MUTED)));
            continue;
        }
        if in_code {
            lines.push(Line::styled(line, Style::default().fg(Color::LightYellow)));
            continue;
        }

        let level = line.chars().take_while(|&c| c == '#').count();
        if (1..=6).contains(&level) && line[level..].starts_with([' ', '\t']) {
            let shown = display_heading(&line).into_owned();
            lines.push(Line::styled(shown, heading_style(level)));
        } else if trimmed.starts_with('>') {
            lines.push(Line::styled(
                line,
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            ));
        } else {
            lines.push(Line::from(line));
        }
    }

    Text::from(lines)
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = &app.status_message {
        let status = Paragraph::new(msg.clone()).style(
            Style::default()
                .bg(Color::Rgb(0, 80, 120))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status, area);
        return;
    }

    let hints = match app.mode {
        AppMode::Search => " Type to filter | Enter: keep filter | Esc: clear",
        AppMode::Normal => " ?: help | /: search | Enter: open | n/p: next/prev | Tab: focus | q: quit",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(MUTED)),
        area,
    );
}

fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(vertical);
    popup
}

fn render_help_popup(frame: &mut Frame, app: &App, area: Rect) {
    let popup = popup_area(area, 70, 80);
    frame.render_widget(Clear, popup);

    let help_lines = help_text::build_help_text();
    let help_len = help_lines.len();

    let paragraph = Paragraph::new(help_lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.help_scroll, 0));
    frame.render_widget(paragraph, popup);

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .style(Style::default().fg(ACCENT));
    let mut state = ScrollbarState::new(help_len).position(app.help_scroll as usize);
    frame.render_stateful_widget(
        scrollbar,
        popup.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut state,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Group, Leaf};
    use crate::config::Config;
    use crate::convert::ConvertOptions;
    use crate::resolve::Resolver;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app(dir: &TempDir) -> App {
        std::fs::write(dir.path().join("intro.md"), "# Intro {#start}\n\nHello there").unwrap();
        let catalog = Catalog::new(vec![
            Leaf::new("readme", "Intro", "intro.md").into(),
            Group::new(
                "programming",
                "Programming",
                vec![Leaf::new("py", "Python", "py.md").into()],
            )
            .into(),
        ])
        .unwrap();
        App::new(
            Arc::new(catalog),
            Resolver::new(dir.path(), ConvertOptions::default()),
            Config::default(),
        )
    }

    #[test]
    fn test_welcome_screen() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Learning Guides"));
        assert!(text.contains("Programming"));
        assert!(text.contains("Welcome to Tech Mastery"));
    }

    #[test]
    fn test_document_rendered_with_footer() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.open("readme");
        for _ in 0..500 {
            if app.poll_loader() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("Hello there"));
        assert!(text.contains("# Intro"));
        assert!(!text.contains("{#start}"));
        assert!(text.contains(":n"));
    }

    #[test]
    fn test_help_popup() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.toggle_help();
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();
        assert!(screen(&terminal).contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long title", 6), "a lon…");
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
    }
}
