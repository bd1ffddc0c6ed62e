//! "Create User" profile form.
//!
//! `↑`/`↓` move between fields, typing edits the focused field and
//! Enter submits. A failed submit shows each failing field's message under
//! it; a successful one logs the profile, resets the form and shows a banner
//! until the next edit.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::text_input::TextInput;
use atrium_core::form::{FieldError, FormField, ProfileForm};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

const LABEL_WIDTH: usize = 12;

#[derive(Debug, Default)]
pub struct ProfileFormState {
    inputs: [TextInput; 5],
    pub focused: usize,
    pub errors: Vec<FieldError>,
    pub submitted: bool,
}

impl ProfileFormState {
    pub fn field(&self) -> FormField {
        FormField::ALL[self.focused]
    }

    pub fn input(&self, field: FormField) -> &TextInput {
        &self.inputs[index_of(field)]
    }

    pub fn error_for(&self, field: FormField) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// True when any field holds text that has not been submitted.
    pub fn is_dirty(&self) -> bool {
        self.inputs.iter().any(|i| !i.is_empty())
    }

    /// Snapshot the inputs as a [`ProfileForm`].
    pub fn form(&self) -> ProfileForm {
        let mut form = ProfileForm::default();
        for field in FormField::ALL {
            *form.value_mut(field) = self.input(field).value().to_string();
        }
        form
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let n = FormField::ALL.len();
        match event {
            AppEvent::Nav(Direction::Up) => self.focused = (self.focused + n - 1) % n,
            AppEvent::Nav(Direction::Down) => self.focused = (self.focused + 1) % n,
            AppEvent::Enter => self.submit(),
            other => {
                if self.inputs[self.focused].handle(other) {
                    self.submitted = false;
                    let field = self.field();
                    // Re-check a field that already has an error so it clears as the user fixes it.
                    if self.error_for(field).is_some() {
                        self.errors.retain(|e| e.field != field);
                        if let Some(err) = self.form().check(field) {
                            self.errors.push(err);
                        }
                    }
                }
            }
        }
    }

    fn submit(&mut self) {
        match self.form().validate() {
            Ok(()) => {
                let form = self.form();
                tracing::info!(
                    first_name = %form.first_name,
                    last_name = %form.last_name,
                    email = %form.email,
                    "profile: submitted"
                );
                *self = Self {
                    submitted: true,
                    ..Self::default()
                };
            }
            Err(errors) => {
                tracing::debug!(failures = errors.len(), "profile: validation failed");
                self.errors = errors;
                self.submitted = false;
            }
        }
    }

    /// Column of the text cursor for the focused field, relative to the
    /// form's inner area.
    pub fn cursor_offset(&self) -> (u16, u16) {
        let col = LABEL_WIDTH as u16 + 2 + self.inputs[self.focused].cursor_col();
        let row = 2 + self.focused as u16 * 2;
        (col, row)
    }
}

fn index_of(field: FormField) -> usize {
    FormField::ALL.iter().position(|f| *f == field).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ProfileFormView<'a> {
    state: &'a ProfileFormState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ProfileFormView<'a> {
    pub fn new(state: &'a ProfileFormState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for ProfileFormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Create User ")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let banner = if self.state.submitted {
            Line::styled("Profile created.", self.theme.status_success)
        } else {
            Line::styled("Enter to submit", self.theme.status_muted)
        };
        let mut lines = vec![banner, Line::default()];

        for (i, field) in FormField::ALL.into_iter().enumerate() {
            let active = self.focused && i == self.state.focused;
            let label_style = if active {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
                Span::raw(if active { "› " } else { "  " }),
                Span::raw(self.state.input(field).value().to_string()),
            ]));
            lines.push(match self.state.error_for(field) {
                Some(err) => Line::styled(
                    format!("{:LABEL_WIDTH$}  {}", "", err.message),
                    self.theme.status_error,
                ),
                None => Line::default(),
            });
        }

        Paragraph::new(lines).render(inner, buf);
    }
}
