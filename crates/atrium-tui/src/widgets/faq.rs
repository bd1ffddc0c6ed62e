//! FAQ accordion — searchable questions with a collapsible answer.
//!
//! Enter toggles the answer under the focused question. Only one answer is
//! open at a time. The open item is tracked by its index in the full
//! collection, so it stays open while the query changes around it.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::{data_table::segment_spans, text_input::TextInput};
use atrium_core::FilterableList;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

#[derive(Debug)]
pub struct FaqState {
    pub list: FilterableList,
    /// Index into the filtered questions.
    pub cursor: usize,
    /// Source index of the expanded question.
    pub open: Option<usize>,
    pub query: TextInput,
}

impl FaqState {
    pub fn new(list: FilterableList) -> Self {
        Self {
            list,
            cursor: 0,
            open: None,
            query: TextInput::default(),
        }
    }

    pub fn apply_query(&mut self) {
        self.list.set_query(self.query.value());
        self.cursor = self.cursor.min(self.list.len().saturating_sub(1));
    }

    pub fn is_open(&self, n: usize) -> bool {
        self.open.is_some() && self.list.source_index(n) == self.open
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.list.len();
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) if self.cursor + 1 < total => {
                self.cursor += 1;
            }
            AppEvent::Enter => {
                let Some(source) = self.list.source_index(self.cursor) else {
                    return;
                };
                self.open = if self.open == Some(source) { None } else { Some(source) };
                tracing::debug!(item = source, open = self.open.is_some(), "faq: toggled");
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct Faq<'a> {
    state: &'a FaqState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> Faq<'a> {
    pub fn new(state: &'a FaqState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for Faq<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Frequently Asked Questions ")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.state.list.is_empty() {
            let msg = format!("No questions match \"{}\"", self.state.list.query());
            Paragraph::new(Line::styled(msg, self.theme.status_muted)).render(inner, buf);
            return;
        }

        let mut lines: Vec<Line<'static>> = Vec::new();
        for (n, record) in self.state.list.filtered().into_iter().enumerate() {
            let open = self.state.is_open(n);
            let marker = if open { "▼ " } else { "▶ " };
            let category = record.text("category").unwrap_or_default();
            let question = record.get("question").map(|q| self.state.list.highlight_value(q));

            let mut spans = vec![Span::raw(marker)];
            spans.push(Span::styled(
                format!(" {category} "),
                self.theme.category_style(&category),
            ));
            spans.push(Span::raw(" "));
            spans.extend(segment_spans(
                question.unwrap_or_default(),
                Style::default().add_modifier(Modifier::BOLD),
                self.theme.search_highlight,
            ));

            let mut line = Line::from(spans);
            if self.focused && n == self.state.cursor {
                line = line.patch_style(Style::default().add_modifier(Modifier::REVERSED));
            }
            lines.push(line);

            if open {
                let answer = record.text("answer").unwrap_or_default();
                lines.push(Line::from(format!("    {answer}")));
            }
            lines.push(Line::default());
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
