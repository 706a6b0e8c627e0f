//! Named rows of a vertical split.
//!
//! Rows can be shown or hidden per frame; a hidden row takes no space and
//! has no area.

use ratatui::layout::{Constraint, Layout, Rect};

/// Section identifiers for layout areas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Title,
    Search,
    Body,
    Status,
    /// Document header inside the viewer
    Header,
    Text,
    /// Prev/next links under the document
    Footer,
}

/// One row of a split: its section, its height rule, and whether it is shown
pub type Row = (Section, Constraint, bool);

/// Areas produced by [`Rows::split`], in top to bottom order
pub struct Rows {
    areas: Vec<(Section, Rect)>,
}

impl Rows {
    pub fn split(area: Rect, rows: &[Row]) -> Self {
        let shown: Vec<&Row> = rows.iter().filter(|(_, _, shown)| *shown).collect();
        let rects = Layout::vertical(shown.iter().map(|(_, constraint, _)| *constraint)).split(area);

        let areas = shown
            .iter()
            .map(|(section, _, _)| *section)
            .zip(rects.iter().copied())
            .collect();

        Self { areas }
    }

    /// Area of a shown section
    pub fn get(&self, section: Section) -> Option<Rect> {
        self.areas
            .iter()
            .find(|(id, _)| *id == section)
            .map(|(_, rect)| *rect)
    }

    /// Area of a section, empty if it is hidden
    pub fn area(&self, section: Section) -> Rect {
        self.get(section).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::new(0, 0, 100, 50)
    }

    #[test]
    fn test_rows_stack_top_to_bottom() {
        let rows = Rows::split(
            screen(),
            &[
                (Section::Title, Constraint::Length(2), true),
                (Section::Body, Constraint::Min(0), true),
                (Section::Status, Constraint::Length(1), true),
            ],
        );

        assert_eq!(rows.area(Section::Title).height, 2);
        assert_eq!(rows.area(Section::Body).height, 47);
        assert_eq!(rows.area(Section::Status).y, 49);
    }

    #[test]
    fn test_hidden_row_takes_no_space() {
        let rows = Rows::split(
            screen(),
            &[
                (Section::Title, Constraint::Length(2), true),
                (Section::Search, Constraint::Length(3), false),
                (Section::Body, Constraint::Min(0), true),
            ],
        );

        assert!(rows.get(Section::Search).is_none());
        assert_eq!(rows.area(Section::Search), Rect::default());
        assert_eq!(rows.area(Section::Body).height, 48);
    }

    #[test]
    fn test_shown_row_pushes_later_rows_down() {
        let rows = Rows::split(
            screen(),
            &[
                (Section::Title, Constraint::Length(2), true),
                (Section::Search, Constraint::Length(3), true),
                (Section::Body, Constraint::Min(0), true),
            ],
        );

        assert_eq!(rows.area(Section::Search).y, 2);
        assert_eq!(rows.area(Section::Body).y, 5);
    }

    #[test]
    fn test_section_not_listed_has_empty_area() {
        let rows = Rows::split(screen(), &[(Section::Text, Constraint::Min(0), true)]);
        assert_eq!(rows.area(Section::Footer), Rect::default());
        assert_eq!(rows.area(Section::Text), screen());
    }
}
