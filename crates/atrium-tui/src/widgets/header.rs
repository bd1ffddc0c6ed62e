//! Header widget — the 1-line strip at the top of the screen with the active
//! view's title and subtitle.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Renders `TITLE  subtitle` on the left and keybinding hints
/// (`q:quit  ?:help`) right-aligned in the same row.
pub struct Header<'a> {
    title: &'a str,
    subtitle: &'a str,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, subtitle: &'a str, theme: &'a Theme) -> Self {
        Self { title, subtitle, theme }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(format!(" {} ", self.title.to_uppercase()), self.theme.header_title),
            Span::raw(" "),
            Span::styled(self.subtitle.to_string(), self.theme.header_subtitle),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);

        let hint = " q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_and_hint_share_the_row() {
        let theme = Theme::load_dark();
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        Header::new("Invoices", "List of Invoice Balances", &theme).render(area, &mut buf);
        let row: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(row.starts_with(" INVOICES  List of Invoice Balances"));
        assert!(row.trim_end().ends_with("?:help"));
    }
}
