// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{
    app::{AppState, View},
    theme::{Theme, THEME_NAMES},
};
use std::path::PathBuf;

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Quit, unless the profile form holds unsubmitted input
    Quit,
    // Quit regardless
    Exit,
    // Display help
    Help,
    // Change theme
    Theme(String),
    // Collapse or expand the sidebar
    Sidebar,
    // Switch the active view
    View(View),
    // Empty the active view's search query
    Clear,
    // Write the active view's rows to a CSV file
    Export(Option<String>),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "q!" | "quit!" => Ok(Command::Exit),
            "help" => Ok(Command::Help),
            "sidebar" => Ok(Command::Sidebar),
            "clear" => Ok(Command::Clear),
            "export" => Ok(Command::Export((!rest.is_empty()).then(|| rest.to_string()))),
            "theme" => {
                if rest.is_empty() {
                    Err(format!("usage: theme <{}>", THEME_NAMES.join("|")))
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "view" => match View::from_key(rest) {
                Some(view) => Ok(Command::View(view)),
                None => Err(format!(
                    "usage: view <{}>",
                    View::ALL.map(View::key).join("|")
                )),
            },
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
///
/// Returns `Err(message)` when the command is valid but cannot run now.
pub fn execute_command(s: &mut AppState, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Quit => {
            if s.profile.is_dirty() {
                return Err("profile form has unsaved input (add ! to override)".to_string());
            }
            s.quit = true;
        }
        Command::Exit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            s.theme = Theme::by_name(&name).ok_or_else(|| format!("unknown theme: {name}"))?;
            tracing::info!(theme = s.theme.name, "theme changed");
        }
        Command::Sidebar => {
            s.sidebar.toggle_rail();
        }
        Command::View(view) => {
            s.switch_view(view);
        }
        Command::Clear => {
            if let Some(search) = s.searchable_mut() {
                search.query_input_mut().clear();
                search.apply_query();
            }
        }
        Command::Export(path) => {
            let path = match path {
                Some(p) => PathBuf::from(p),
                None => s
                    .view
                    .export_file()
                    .map(PathBuf::from)
                    .ok_or_else(|| format!("nothing to export on {}", s.view.key()))?,
            };
            let rows = s.export(&path)?;
            s.notice = Some(format!("exported {rows} rows to {}", path.display()));
        }
    }
    Ok(())
}
