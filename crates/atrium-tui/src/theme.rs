//! Colour theme for the atrium TUI.
//!
//! Themes are defined as TOML files embedded in the binary via
//! [`include_str!`], so the application works without any files on disk.
//! Resolve one with [`Theme::by_name`] at startup and pass it through the
//! application as a shared reference.
//!
//! # Category chips
//!
//! FAQ category names are hashed to a stable index into the palette so the
//! same category always gets the same colour, regardless of the order in
//! which categories appear.

use atrium_core::calendar::EventCategory;
use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DARK_THEME_SRC: &str = include_str!("themes/dark.toml");
const LIGHT_THEME_SRC: &str = include_str!("themes/light.toml");

/// Names accepted by [`Theme::by_name`].
pub const THEME_NAMES: [&str; 2] = ["dark", "light"];

// ---------------------------------------------------------------------------
// Raw (serde) types, mirroring the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawHeader {
    title: RawStyle,
    subtitle: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawSearch {
    highlight: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    header: RawStyle,
    selected: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawAccess {
    admin: RawStyle,
    manager: RawStyle,
    user: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawEvents {
    meeting: RawStyle,
    task: RawStyle,
    deadline: RawStyle,
    general: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    success: RawStyle,
    error: RawStyle,
    muted: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawCategories {
    palette: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    header: RawHeader,
    borders: RawBorders,
    search: RawSearch,
    table: RawTable,
    access: RawAccess,
    events: RawEvents,
    status: RawStatus,
    categories: RawCategories,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]
/// values, no allocation at render time.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Name the theme was loaded under.
    pub name: &'static str,

    pub header_title: Style,
    pub header_subtitle: Style,

    /// Border style for the currently focused pane.
    pub border_focused: Style,
    /// Border style for the command bar pane.
    pub border_command_bar: Style,
    /// Border style for unfocused panes.
    pub border_unfocused: Style,

    /// Inline highlight applied to matched search spans.
    pub search_highlight: Style,

    pub table_header: Style,
    pub table_selected: Style,

    access_admin: Style,
    access_manager: Style,
    access_user: Style,

    event_meeting: Style,
    event_task: Style,
    event_deadline: Style,
    event_general: Style,

    pub status_success: Style,
    pub status_error: Style,
    pub status_muted: Style,

    /// Ordered colour palette used for category chips.
    category_palette: Vec<Color>,
}

impl Theme {
    /// Load and parse the embedded dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed, which the unit tests rule out.
    pub fn load_dark() -> Self {
        Self::from_toml_str("dark", DARK_THEME_SRC).expect("embedded dark theme must be valid TOML")
    }

    /// Load and parse the embedded light theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_light() -> Self {
        Self::from_toml_str("light", LIGHT_THEME_SRC)
            .expect("embedded light theme must be valid TOML")
    }

    /// Resolve an embedded theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::load_dark()),
            "light" => Some(Self::load_light()),
            _ => None,
        }
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(name: &'static str, src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            name,
            header_title: raw.header.title.into_style(),
            header_subtitle: raw.header.subtitle.into_style(),
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            search_highlight: raw.search.highlight.into_style(),
            table_header: raw.table.header.into_style(),
            table_selected: raw.table.selected.into_style(),
            access_admin: raw.access.admin.into_style(),
            access_manager: raw.access.manager.into_style(),
            access_user: raw.access.user.into_style(),
            event_meeting: raw.events.meeting.into_style(),
            event_task: raw.events.task.into_style(),
            event_deadline: raw.events.deadline.into_style(),
            event_general: raw.events.general.into_style(),
            status_success: raw.status.success.into_style(),
            status_error: raw.status.error.into_style(),
            status_muted: raw.status.muted.into_style(),
            category_palette: raw
                .categories
                .palette
                .iter()
                .filter_map(|s| parse_color(s))
                .collect(),
        })
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }

    /// Style for a team member's access level.
    pub fn access_style(&self, access: &str) -> Style {
        match access {
            "admin" => self.access_admin,
            "manager" => self.access_manager,
            "user" => self.access_user,
            _ => Style::default(),
        }
    }

    /// Accent for a calendar event category. Anything that is not a meeting,
    /// task or deadline gets the general accent.
    pub fn event_style(&self, category: EventCategory) -> Style {
        match category {
            EventCategory::Meeting => self.event_meeting,
            EventCategory::Task => self.event_task,
            EventCategory::Deadline => self.event_deadline,
            EventCategory::General => self.event_general,
        }
    }

    /// A stable chip style for a free-form category name.
    pub fn category_style(&self, category: &str) -> Style {
        if self.category_palette.is_empty() {
            return Style::default().add_modifier(Modifier::BOLD);
        }
        let idx = stable_hash(category) % self.category_palette.len();
        Style::default()
            .fg(Color::White)
            .bg(self.category_palette[idx])
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load_dark()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// djb2-style hash, stable across Rust versions and process restarts.
fn stable_hash(s: &str) -> usize {
    s.bytes().fold(5381usize, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(b as usize)
    })
}

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_themes_load() {
        for name in THEME_NAMES {
            let theme = Theme::by_name(name).unwrap();
            assert_eq!(theme.name, name);
            assert_ne!(theme.search_highlight, Style::default());
            assert_ne!(theme.border_focused, Style::default());
            assert!(!theme.category_palette.is_empty());
        }
    }

    #[test]
    fn unknown_theme_name() {
        assert!(Theme::by_name("solarized").is_none());
        assert!(Theme::by_name("LIGHT").is_some());
    }

    #[test]
    fn event_categories_have_distinct_accents() {
        let theme = Theme::load_dark();
        let styles: std::collections::HashSet<_> = EventCategory::ALL
            .iter()
            .map(|c| theme.event_style(*c))
            .collect();
        assert_eq!(styles.len(), EventCategory::ALL.len());
    }

    #[test]
    fn category_style_is_stable() {
        let theme = Theme::load_dark();
        assert_eq!(theme.category_style("Account"), theme.category_style("Account"));
    }

    #[test]
    fn unknown_access_level_is_unstyled() {
        let theme = Theme::load_dark();
        assert_eq!(theme.access_style("root"), Style::default());
        assert_ne!(theme.access_style("admin"), Style::default());
    }

    #[test]
    fn parse_hex_color() {
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
    }

    #[test]
    fn parse_indexed_color() {
        assert_eq!(parse_color("indexed:42"), Some(Color::Indexed(42)));
    }

    #[test]
    fn parse_unknown_color_returns_none() {
        assert_eq!(parse_color("chartreuse"), None);
    }
}
