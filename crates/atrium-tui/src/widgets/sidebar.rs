//! Sidebar widget — collapsible navigation tree in the left pane.
//!
//! Top-level nodes are sections ("Data", "Pages"); their children are the
//! views. In the narrow rail only the first letter of each view is shown.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor up and down the visible list.
//! - `→`/`l` expands the focused section; `←`/`h` collapses it.
//! - `Enter` on a section toggles it; on a view it opens that view.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

/// Width of the collapsed rail, borders included.
pub const RAIL_WIDTH: u16 = 5;

// ---------------------------------------------------------------------------
// Tree node
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Stable identifier; for leaves this is the view key.
    pub id: String,
    pub label: String,
    pub expanded: bool,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            expanded: true,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct SidebarState {
    pub nodes: Vec<TreeNode>,
    /// Index into the currently-visible (flattened) list.
    pub cursor: usize,
    /// Full width when true, the narrow rail otherwise.
    pub expanded: bool,
    /// Id of the leaf whose view is on screen.
    pub active: String,
}

impl SidebarState {
    pub fn new(nodes: Vec<TreeNode>, active: impl Into<String>, expanded: bool) -> Self {
        let active = active.into();
        let cursor = flatten(&nodes, 0)
            .iter()
            .position(|(_, n)| n.id == active)
            .unwrap_or(0);
        Self {
            nodes,
            cursor,
            expanded,
            active,
        }
    }

    fn cursor_id(&self) -> Option<String> {
        self.visible()
            .into_iter()
            .nth(self.cursor)
            .map(|(_, n)| n.id.clone())
    }

    /// Flatten the tree into `(depth, &node)` pairs, respecting expanded state.
    pub fn visible(&self) -> Vec<(usize, &TreeNode)> {
        flatten(&self.nodes, 0)
    }

    pub fn toggle_rail(&mut self) {
        self.expanded = !self.expanded;
        tracing::debug!(expanded = self.expanded, "sidebar: toggled");
    }

    /// Mark `id` as the view on screen and move the cursor onto it if visible.
    pub fn set_active(&mut self, id: &str) {
        self.active = id.to_string();
        if let Some(pos) = self.visible().iter().position(|(_, n)| n.id == id) {
            self.cursor = pos;
        }
    }

    /// Handle an [`AppEvent`]. Returns the id of a view the user opened.
    pub fn handle(&mut self, event: &AppEvent) -> Option<String> {
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "sidebar: cursor up");
            }
            AppEvent::Nav(Direction::Down) => {
                let max = self.visible().len().saturating_sub(1);
                if self.cursor < max {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "sidebar: cursor down");
            }
            AppEvent::Nav(Direction::Right) => {
                let id = self.cursor_id()?;
                set_expanded(&mut self.nodes, &id, true);
            }
            AppEvent::Nav(Direction::Left) => {
                let id = self.cursor_id()?;
                set_expanded(&mut self.nodes, &id, false);
                self.clamp_cursor();
            }
            AppEvent::Enter => {
                let id = self.cursor_id()?;
                if is_leaf(&self.nodes, &id) {
                    tracing::debug!(node = %id, "sidebar: open view");
                    self.active = id.clone();
                    return Some(id);
                }
                tracing::debug!(node = %id, "sidebar: toggle section");
                toggle_expanded(&mut self.nodes, &id);
                self.clamp_cursor();
            }
            _ => {}
        }
        None
    }

    fn clamp_cursor(&mut self) {
        let max = self.visible().len().saturating_sub(1);
        if self.cursor > max {
            self.cursor = max;
        }
    }
}

// ---------------------------------------------------------------------------
// Recursive tree helpers
// ---------------------------------------------------------------------------

fn flatten(nodes: &[TreeNode], depth: usize) -> Vec<(usize, &TreeNode)> {
    let mut out = Vec::new();
    for node in nodes {
        out.push((depth, node));
        if node.expanded {
            out.extend(flatten(&node.children, depth + 1));
        }
    }
    out
}

/// Set the `expanded` flag on the node with `id`. Returns `true` if found.
fn set_expanded(nodes: &mut [TreeNode], id: &str, expanded: bool) -> bool {
    for node in nodes.iter_mut() {
        if node.id == id {
            node.expanded = expanded;
            return true;
        }
        if set_expanded(&mut node.children, id, expanded) {
            return true;
        }
    }
    false
}

/// Flip the `expanded` flag on the node with `id`. Returns `true` if found.
fn toggle_expanded(nodes: &mut [TreeNode], id: &str) -> bool {
    for node in nodes.iter_mut() {
        if node.id == id {
            node.expanded = !node.expanded;
            return true;
        }
        if toggle_expanded(&mut node.children, id) {
            return true;
        }
    }
    false
}

/// Returns `Some(true)` if the node with `id` is a leaf, `Some(false)` if it
/// has children, or `None` if the id is not found in the subtree.
fn find_is_leaf(nodes: &[TreeNode], id: &str) -> Option<bool> {
    for node in nodes {
        if node.id == id {
            return Some(node.children.is_empty());
        }
        if let Some(result) = find_is_leaf(&node.children, id) {
            return Some(result);
        }
    }
    None
}

fn is_leaf(nodes: &[TreeNode], id: &str) -> bool {
    find_is_leaf(nodes, id).unwrap_or(true)
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct Sidebar<'a> {
    state: &'a SidebarState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> Sidebar<'a> {
    pub fn new(state: &'a SidebarState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(if self.state.expanded { "Navigate" } else { "" })
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let visible = self.state.visible();
        let items: Vec<ListItem> = visible
            .iter()
            .map(|(depth, node)| {
                let leaf = node.children.is_empty();
                let active = leaf && node.id == self.state.active;
                let style = match (leaf, active) {
                    (false, _) => self.theme.status_muted,
                    (true, true) => self.theme.header_title,
                    (true, false) => Style::default(),
                };
                let text = if !self.state.expanded {
                    // Rail: one glyph per row
                    let glyph = node.label.chars().next().unwrap_or(' ');
                    if leaf {
                        format!(" {glyph}")
                    } else {
                        "──".to_string()
                    }
                } else {
                    let indent = "  ".repeat(*depth);
                    let expand = match (leaf, node.expanded) {
                        (true, _) => "  ",
                        (false, true) => "▼ ",
                        (false, false) => "▶ ",
                    };
                    format!("{indent}{expand}{}", node.label)
                };
                ListItem::new(Line::styled(text, style))
            })
            .collect();

        let list =
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let selected = self.focused.then_some(self.state.cursor);
        let mut list_state = ListState::default().with_selected(selected);
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
