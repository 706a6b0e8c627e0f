use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Key column width for keybindings
const KEY_COLUMN_WIDTH: usize = 11;

#[derive(Debug, Clone, Copy)]
pub enum HelpLine {
    Title(&'static str),
    Description(&'static str),
    SectionHeader(&'static str),
    KeyBinding { key: &'static str, desc: &'static str },
    Blank,
}

impl HelpLine {
    pub fn to_line(&self) -> Line<'static> {
        match self {
            HelpLine::Title(text) => Line::from(Span::styled(
                *text,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            HelpLine::Description(text) => Line::from(Span::styled(
                *text,
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )),
            HelpLine::SectionHeader(text) => Line::from(Span::styled(
                *text,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            HelpLine::KeyBinding { key, desc } => Line::from(vec![
                Span::styled(
                    format!("  {:<width$}", key, width = KEY_COLUMN_WIDTH),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(*desc),
            ]),
            HelpLine::Blank => Line::from(""),
        }
    }
}

const fn title(text: &'static str) -> HelpLine {
    HelpLine::Title(text)
}

const fn description(text: &'static str) -> HelpLine {
    HelpLine::Description(text)
}

const fn section(text: &'static str) -> HelpLine {
    HelpLine::SectionHeader(text)
}

const fn keybinding(key: &'static str, desc: &'static str) -> HelpLine {
    HelpLine::KeyBinding { key, desc }
}

const fn blank() -> HelpLine {
    HelpLine::Blank
}

pub const HELP_LINES: &[HelpLine] = &[
    title("mastery - Keyboard Shortcuts"),
    description("Use j/k or ↓/↑ to scroll | Press Esc or ? to close"),
    blank(),

    section("Sidebar"),
    keybinding("j/↓", "Move down"),
    keybinding("k/↑", "Move up"),
    keybinding("g", "Jump to top"),
    keybinding("G", "Jump to bottom"),
    keybinding("Enter", "Open guide / toggle group"),
    keybinding("l/→", "Expand group or open guide"),
    keybinding("h/←", "Collapse group (or jump to parent)"),
    blank(),

    section("Reading"),
    keybinding("n", "Next guide"),
    keybinding("p", "Previous guide"),
    keybinding("d", "Page down"),
    keybinding("u", "Page up"),
    blank(),

    section("Search"),
    keybinding("/", "Filter guides by title"),
    keybinding("Enter", "Keep filter, back to navigation"),
    keybinding("Esc", "Clear filter"),
    blank(),

    section("Layout"),
    keybinding("Tab", "Switch between sidebar and content"),
    keybinding("b", "Toggle sidebar"),
    keybinding("[ ]", "Narrow/widen sidebar"),
    keybinding("w", "Save sidebar width to config"),
    blank(),

    section("General"),
    keybinding("?", "Toggle this help"),
    keybinding("q", "Quit"),
];

pub fn build_help_text() -> Vec<Line<'static>> {
    HELP_LINES.iter().map(HelpLine::to_line).collect()
}
