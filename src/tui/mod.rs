//! Interactive terminal browser: a sidebar with the guide tree and a
//! viewer for the selected guide.

pub mod app;
mod help_text;
pub mod loader;
mod ui;

pub use app::App;

use app::AppMode;
use color_eyre::Result;
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{DefaultTerminal, Terminal};
use std::io::stdout;
use std::time::Duration;

/// Set up the terminal, run the browser, and restore the terminal even
/// when the loop fails.
pub fn launch(app: App) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen).inspect_err(|_| {
        disable_raw_mode().ok();
    })?;

    let backend = CrosstermBackend::new(stdout());
    let result = Terminal::new(backend)
        .map_err(Into::into)
        .and_then(|mut terminal| run(&mut terminal, app));

    stdout().execute(LeaveAlternateScreen).ok();
    disable_raw_mode().ok();

    result
}

/// Run the event loop until the user quits.
///
/// Keyboard input is polled with a short timeout so finished background
/// loads are picked up between keystrokes.
pub fn run(terminal: &mut DefaultTerminal, mut app: App) -> Result<()> {
    app.open_start_page();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        if !event::poll(Duration::from_millis(100))? {
            app.poll_loader();
            continue;
        }

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            handle_key(&mut app, key);
        }
        app.poll_loader();
    }

    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.show_help {
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc => app.toggle_help(),
            KeyCode::Char('j') | KeyCode::Down => app.scroll_help_down(),
            KeyCode::Char('k') | KeyCode::Up => app.scroll_help_up(),
            KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        }
        return;
    }

    if app.mode == AppMode::Search {
        match key.code {
            KeyCode::Esc => app.clear_search(),
            KeyCode::Enter => app.finish_search(),
            KeyCode::Backspace => app.search_backspace(),
            KeyCode::Down => app.next(),
            KeyCode::Up => app.previous(),
            KeyCode::Char(c) => app.search_input(c),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc if !app.search_query.is_empty() => app.clear_search(),
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.previous(),
        KeyCode::Char('g') | KeyCode::Home => app.first(),
        KeyCode::Char('G') | KeyCode::End => app.last(),
        KeyCode::Char('d') | KeyCode::PageDown => app.scroll_page_down(),
        KeyCode::Char('u') | KeyCode::PageUp => app.scroll_page_up(),
        KeyCode::Enter => app.activate(),
        KeyCode::Char('l') | KeyCode::Right => app.expand(),
        KeyCode::Char('h') | KeyCode::Left => app.collapse(),
        KeyCode::Char('n') => app.go_next(),
        KeyCode::Char('p') => app.go_prev(),
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Char('b') => app.toggle_sidebar(),
        KeyCode::Char('[') => app.resize_sidebar(false),
        KeyCode::Char(']') => app.resize_sidebar(true),
        KeyCode::Char('w') => app.save_sidebar_width(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Leaf};
    use crate::config::Config;
    use crate::convert::ConvertOptions;
    use crate::resolve::Resolver;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let catalog = Catalog::new(vec![
            Leaf::new("alpha", "Alpha", "a.md").into(),
            Leaf::new("beta", "Beta", "b.md").into(),
        ])
        .unwrap();
        App::new(
            Arc::new(catalog),
            Resolver::new(".", ConvertOptions::default()),
            Config::default(),
        )
    }

    #[test]
    fn test_search_mode_captures_letters() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Char('/')));
        assert_eq!(app.mode, AppMode::Search);

        // 'q' is text while searching, not quit
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.search_query, "q");

        handle_key(&mut app, key(KeyCode::Backspace));
        handle_key(&mut app, key(KeyCode::Char('b')));
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.rows.len(), 1);

        handle_key(&mut app, key(KeyCode::Esc));
        assert!(app.search_query.is_empty());
        assert_eq!(app.rows.len(), 2);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = self::app();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_swallows_navigation() {
        let mut app = app();
        handle_key(&mut app, key(KeyCode::Char('?')));
        handle_key(&mut app, key(KeyCode::Char('j')));
        assert!(app.show_help);
        assert_eq!(app.help_scroll, 1);
        assert_eq!(app.sidebar_state.selected(), Some(0));
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.show_help);
    }
}
