use crate::catalog::{self, Catalog, Leaf, Node};
use crate::config::{self, Config};
use crate::resolve::{Document, Resolver};
use crate::tui::help_text;
use crate::tui::loader::Loader;
use ratatui::widgets::{ListState, ScrollbarState};
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Groups open when the browser starts.
const DEFAULT_EXPANDED: &[&str] = &[
    "programming",
    "ai-ml",
    "devops",
    "infrastructure-notebooks",
    "system-design",
    "programming-challenges",
    "career",
    "teaching",
];

const STATUS_TIMEOUT: Duration = Duration::from_secs(3);
const SIDEBAR_STEP: u16 = 5;
const PAGE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Sidebar,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMode {
    Normal,
    /// Typing into the sidebar filter
    Search,
}

/// One visible line of the sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarRow {
    pub id: String,
    pub title: String,
    pub depth: usize,
    pub kind: RowKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    Group { expanded: bool, empty: bool },
    Leaf { badge: Option<String> },
}

pub struct App {
    catalog: Arc<Catalog>,
    loader: Loader,
    config: Config,
    expanded: HashSet<String>,
    pub rows: Vec<SidebarRow>,
    pub sidebar_state: ListState,
    pub sidebar_scroll_state: ScrollbarState,
    pub focus: Focus,
    pub mode: AppMode,
    pub search_query: String,
    /// Document on screen
    pub document: Option<Document>,
    /// Id of the newest request, while it is loading
    pub loading: Option<String>,
    pub content_scroll: u16,
    pub content_scroll_state: ScrollbarState,
    pub content_height: u16,
    pub show_help: bool,
    pub help_scroll: u16,
    pub show_sidebar: bool,
    pub sidebar_width: u16, // Percentage, 20..=60
    pub status_message: Option<String>,
    status_set_at: Option<Instant>,
    pub should_quit: bool,
}

impl App {
    pub fn new(catalog: Arc<Catalog>, resolver: Resolver, config: Config) -> Self {
        let loader = Loader::new(Arc::clone(&catalog), resolver);
        let expanded: HashSet<String> = DEFAULT_EXPANDED.iter().map(|id| id.to_string()).collect();
        let rows = build_rows(catalog.nodes(), &expanded, false);

        let mut sidebar_state = ListState::default();
        if !rows.is_empty() {
            sidebar_state.select(Some(0));
        }

        let sidebar_width = config::clamp_sidebar_width(config.ui.sidebar_width);

        Self {
            catalog,
            loader,
            config,
            expanded,
            sidebar_scroll_state: ScrollbarState::new(rows.len()),
            rows,
            sidebar_state,
            focus: Focus::Sidebar,
            mode: AppMode::Normal,
            search_query: String::new(),
            document: None,
            loading: None,
            content_scroll: 0,
            content_scroll_state: ScrollbarState::new(0),
            content_height: 0,
            show_help: false,
            help_scroll: 0,
            show_sidebar: true,
            sidebar_width,
            status_message: None,
            status_set_at: None,
            should_quit: false,
        }
    }

    /// Open the configured start page, if the catalog has it.
    pub fn open_start_page(&mut self) {
        let start = self.config.ui.start_page.clone();
        if self.catalog.find(&start).is_some() {
            info!(id = %start, "opening start page");
            self.open(&start);
        }
    }

    /// The tree currently shown in the sidebar.
    pub fn visible_nodes(&self) -> Cow<'_, [Node]> {
        catalog::filter(self.catalog.nodes(), &self.search_query)
    }

    fn rebuild_rows(&mut self) {
        let selected_id = self.selected_row().map(|row| row.id.clone());
        let searching = !self.search_query.trim().is_empty();
        let rows = {
            let nodes = self.visible_nodes();
            build_rows(&nodes, &self.expanded, searching)
        };
        self.rows = rows;

        let index = selected_id
            .and_then(|id| self.rows.iter().position(|row| row.id == id))
            .or(if self.rows.is_empty() { None } else { Some(0) });
        self.select_row(index);
    }

    fn select_row(&mut self, index: Option<usize>) {
        self.sidebar_state.select(index);
        self.sidebar_scroll_state =
            ScrollbarState::new(self.rows.len()).position(index.unwrap_or(0));
    }

    pub fn selected_row(&self) -> Option<&SidebarRow> {
        self.sidebar_state.selected().and_then(|i| self.rows.get(i))
    }

    /// Id of the document on screen, or of the one being loaded.
    pub fn current_id(&self) -> Option<&str> {
        self.loading
            .as_deref()
            .or(self.document.as_ref().map(|doc| doc.id.as_str()))
    }

    /// Previous and next leaf titles around the current document in the
    /// active (possibly filtered) tree.
    pub fn neighbor_titles(&self) -> (Option<String>, Option<String>) {
        let Some(id) = self.current_id() else {
            return (None, None);
        };
        let nodes = self.visible_nodes();
        let leaves = catalog::flatten(&nodes);
        let around = catalog::neighbors(&leaves, id);
        (
            around.prev.map(|leaf| leaf.title.clone()),
            around.next.map(|leaf| leaf.title.clone()),
        )
    }

    // Resolution

    pub fn open(&mut self, id: &str) {
        self.loader.request(id);
        self.loading = Some(id.to_string());
    }

    /// Pick up a finished load. Returns true when the screen changed.
    pub fn poll_loader(&mut self) -> bool {
        let Some(loaded) = self.loader.poll() else {
            return false;
        };
        self.loading = None;

        match loaded.result {
            Ok(document) => {
                debug!(id = %document.id, "content loaded");
                self.document = Some(document);
                self.content_scroll = 0;
                self.update_content_metrics();
            }
            Err(err) => self.set_status(format!("✗ {err}")),
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_pending()
    }

    pub fn update_content_metrics(&mut self) {
        let lines = self
            .document
            .as_ref()
            .and_then(|doc| doc.content.as_deref())
            .map_or(0, |content| content.lines().count());
        self.content_height = lines as u16;
        self.content_scroll = self.content_scroll.min(self.content_height.saturating_sub(1));
        self.content_scroll_state =
            ScrollbarState::new(lines).position(self.content_scroll as usize);
    }

    // Sidebar and content movement

    pub fn next(&mut self) {
        if self.focus == Focus::Sidebar {
            let i = match self.sidebar_state.selected() {
                Some(i) if i + 1 < self.rows.len() => i + 1,
                Some(i) => i,
                None => 0,
            };
            if !self.rows.is_empty() {
                self.select_row(Some(i));
            }
        } else {
            let new_scroll = self.content_scroll.saturating_add(1);
            if new_scroll < self.content_height {
                self.content_scroll = new_scroll;
                self.content_scroll_state = self.content_scroll_state.position(new_scroll as usize);
            }
        }
    }

    pub fn previous(&mut self) {
        if self.focus == Focus::Sidebar {
            let i = self.sidebar_state.selected().map_or(0, |i| i.saturating_sub(1));
            if !self.rows.is_empty() {
                self.select_row(Some(i));
            }
        } else {
            self.content_scroll = self.content_scroll.saturating_sub(1);
            self.content_scroll_state = self
                .content_scroll_state
                .position(self.content_scroll as usize);
        }
    }

    pub fn first(&mut self) {
        if self.focus == Focus::Sidebar && !self.rows.is_empty() {
            self.select_row(Some(0));
        } else {
            self.content_scroll = 0;
            self.content_scroll_state = self.content_scroll_state.position(0);
        }
    }

    pub fn last(&mut self) {
        if self.focus == Focus::Sidebar && !self.rows.is_empty() {
            self.select_row(Some(self.rows.len() - 1));
        } else {
            let last = self.content_height.saturating_sub(1);
            self.content_scroll = last;
            self.content_scroll_state = self.content_scroll_state.position(last as usize);
        }
    }

    pub fn scroll_page_down(&mut self) {
        self.content_scroll = self
            .content_scroll
            .saturating_add(PAGE)
            .min(self.content_height.saturating_sub(1));
        self.content_scroll_state = self
            .content_scroll_state
            .position(self.content_scroll as usize);
    }

    pub fn scroll_page_up(&mut self) {
        self.content_scroll = self.content_scroll.saturating_sub(PAGE);
        self.content_scroll_state = self
            .content_scroll_state
            .position(self.content_scroll as usize);
    }

    /// Enter on a sidebar row: groups toggle, leaves open.
    pub fn activate(&mut self) {
        let Some(row) = self.selected_row().cloned() else {
            return;
        };
        match row.kind {
            RowKind::Group { .. } => self.toggle_group(&row.id),
            RowKind::Leaf { .. } => {
                self.open(&row.id);
                self.focus = Focus::Content;
            }
        }
    }

    fn toggle_group(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
        self.rebuild_rows();
    }

    pub fn expand(&mut self) {
        if let Some(row) = self.selected_row().cloned() {
            match row.kind {
                RowKind::Group { expanded: false, .. } => self.toggle_group(&row.id),
                RowKind::Group { .. } => {}
                RowKind::Leaf { .. } => self.activate(),
            }
        }
    }

    /// Collapse the selected group, or move to the parent row.
    pub fn collapse(&mut self) {
        let Some(index) = self.sidebar_state.selected() else {
            return;
        };
        let Some(row) = self.rows.get(index).cloned() else {
            return;
        };
        if let RowKind::Group { expanded: true, .. } = row.kind
            && self.search_query.trim().is_empty()
        {
            self.toggle_group(&row.id);
            return;
        }
        let parent = (0..index)
            .rev()
            .find(|&i| self.rows[i].depth < row.depth);
        if parent.is_some() {
            self.select_row(parent);
        }
    }

    /// Step to the next leaf in traversal order.
    pub fn go_next(&mut self) {
        self.step(|around| around.next);
    }

    /// Step to the previous leaf in traversal order.
    pub fn go_prev(&mut self) {
        self.step(|around| around.prev);
    }

    fn step(&mut self, pick: impl for<'a> Fn(catalog::Neighbors<'a>) -> Option<&'a Leaf>) {
        let Some(id) = self.current_id().map(str::to_string) else {
            return;
        };
        let target = {
            let nodes = self.visible_nodes();
            let leaves = catalog::flatten(&nodes);
            pick(catalog::neighbors(&leaves, &id)).map(|leaf| leaf.id.clone())
        };
        if let Some(target) = target {
            self.open(&target);
            if let Some(index) = self.rows.iter().position(|row| row.id == target) {
                self.select_row(Some(index));
            }
        }
    }

    pub fn toggle_focus(&mut self) {
        if self.show_sidebar {
            self.focus = match self.focus {
                Focus::Sidebar => Focus::Content,
                Focus::Content => Focus::Sidebar,
            };
        }
    }

    pub fn toggle_sidebar(&mut self) {
        self.show_sidebar = !self.show_sidebar;
        self.focus = if self.show_sidebar {
            Focus::Sidebar
        } else {
            Focus::Content
        };
    }

    pub fn resize_sidebar(&mut self, increase: bool) {
        let width = if increase {
            self.sidebar_width.saturating_add(SIDEBAR_STEP)
        } else {
            self.sidebar_width.saturating_sub(SIDEBAR_STEP)
        };
        self.sidebar_width = config::clamp_sidebar_width(width);
    }

    pub fn save_sidebar_width(&mut self) {
        match self.config.set_sidebar_width(self.sidebar_width) {
            Ok(()) => self.set_status(format!("✓ Sidebar width {}% saved", self.sidebar_width)),
            Err(err) => self.set_status(format!("✗ Could not save config: {err}")),
        }
    }

    // Search

    pub fn start_search(&mut self) {
        self.mode = AppMode::Search;
        self.focus = Focus::Sidebar;
        self.show_sidebar = true;
    }

    /// Leave typing mode; the filter stays applied.
    pub fn finish_search(&mut self) {
        self.mode = AppMode::Normal;
    }

    pub fn clear_search(&mut self) {
        self.mode = AppMode::Normal;
        self.search_query.clear();
        self.rebuild_rows();
    }

    /// Maximum search query length to prevent performance issues
    const MAX_SEARCH_LEN: usize = 256;

    pub fn search_input(&mut self, c: char) {
        if self.search_query.len() >= Self::MAX_SEARCH_LEN || c.is_control() {
            return;
        }
        self.search_query.push(c);
        self.rebuild_rows();
    }

    pub fn search_backspace(&mut self) {
        self.search_query.pop();
        self.rebuild_rows();
    }

    // Help and status

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0;
        }
    }

    pub fn scroll_help_down(&mut self) {
        let new_scroll = self.help_scroll.saturating_add(1);
        if new_scroll < help_text::HELP_LINES.len() as u16 {
            self.help_scroll = new_scroll;
        }
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_set_at = Some(Instant::now());
    }

    pub fn clear_expired_status_message(&mut self) {
        if let Some(set_at) = self.status_set_at
            && set_at.elapsed() >= STATUS_TIMEOUT
        {
            self.status_message = None;
            self.status_set_at = None;
        }
    }
}

/// Flatten the tree into sidebar rows, honouring collapsed groups.
///
/// While a search is active every group is shown open so matches are
/// never hidden behind a collapsed parent.
fn build_rows(nodes: &[Node], expanded: &HashSet<String>, open_all: bool) -> Vec<SidebarRow> {
    let mut rows = Vec::new();

    fn walk(
        nodes: &[Node],
        depth: usize,
        expanded: &HashSet<String>,
        open_all: bool,
        rows: &mut Vec<SidebarRow>,
    ) {
        for node in nodes {
            match node {
                Node::Group(group) => {
                    let is_open = open_all || expanded.contains(&group.id);
                    rows.push(SidebarRow {
                        id: group.id.clone(),
                        title: group.title.clone(),
                        depth,
                        kind: RowKind::Group {
                            expanded: is_open,
                            empty: group.children.is_empty(),
                        },
                    });
                    if is_open {
                        walk(&group.children, depth + 1, expanded, open_all, rows);
                    }
                }
                Node::Leaf(leaf) => rows.push(SidebarRow {
                    id: leaf.id.clone(),
                    title: leaf.title.clone(),
                    depth,
                    kind: RowKind::Leaf {
                        badge: leaf.meta.badge.clone(),
                    },
                }),
            }
        }
    }

    walk(nodes, 0, expanded, open_all, &mut rows);
    rows
}
