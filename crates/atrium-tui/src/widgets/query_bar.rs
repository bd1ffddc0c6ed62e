//! Query bar widget — the search box at the bottom of the screen.
//!
//! The bar has no state of its own: it renders the active view's
//! [`TextInput`] together with the filtered/total count. Views that cannot
//! be searched render a dimmed placeholder instead.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.

use crate::theme::Theme;
use crate::widgets::text_input::TextInput;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

pub struct QueryBar<'a> {
    /// `None` when the active view has no search.
    input: Option<&'a TextInput>,
    /// `(matched, total)` for the active view.
    counts: (usize, usize),
    focused: bool,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(
        input: Option<&'a TextInput>,
        counts: (usize, usize),
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            input,
            counts,
            focused,
            theme,
        }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        // The block adds 1-cell borders; text starts at (area.x+1, area.y+1).
        let col = self.input.map(TextInput::cursor_col).unwrap_or(0);
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        let y = area.y + 1;
        (x, y)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Search")
            .border_style(self.theme.border(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        // Split inner area: query text (fill) | match count (fixed width)
        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(14)])
            .split(inner);

        let dim = Style::default().add_modifier(Modifier::DIM);
        let Some(input) = self.input else {
            Paragraph::new(Line::from(Span::styled("this page has no search", dim)))
                .render(chunks[0], buf);
            return;
        };

        let query_line = if input.is_empty() && !self.focused {
            Line::from(Span::styled("press / to search", dim))
        } else {
            Line::from(input.value().to_string())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        let (matched, total) = self.counts;
        Paragraph::new(Line::from(Span::styled(format!("{matched}/{total}"), dim)))
            .right_aligned()
            .render(chunks[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(bar: QueryBar<'_>) -> String {
        let area = Rect::new(0, 0, 50, 3);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn shows_placeholder_and_counts() {
        let theme = Theme::load_dark();
        let input = TextInput::default();
        let text = render(QueryBar::new(Some(&input), (8, 8), false, &theme));
        assert!(text.contains("press / to search"));
        assert!(text.contains("8/8"));
    }

    #[test]
    fn shows_query_text() {
        let theme = Theme::load_dark();
        let input = TextInput::new("555-10");
        let text = render(QueryBar::new(Some(&input), (1, 8), true, &theme));
        assert!(text.contains("555-10"));
        assert!(text.contains("1/8"));
    }

    #[test]
    fn unsearchable_view() {
        let theme = Theme::load_dark();
        let text = render(QueryBar::new(None, (0, 0), false, &theme));
        assert!(text.contains("this page has no search"));
    }

    #[test]
    fn cursor_follows_input() {
        let theme = Theme::load_dark();
        let input = TextInput::new("abc");
        let bar = QueryBar::new(Some(&input), (0, 0), true, &theme);
        assert_eq!(bar.cursor_position(Rect::new(0, 10, 50, 3)), (4, 11));
    }
}
