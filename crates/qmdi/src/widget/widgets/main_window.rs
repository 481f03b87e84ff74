//! The main window that realized menus and toolbars land in.
//!
//! [`MainWindow`] owns the menu bar and the toolbar docking areas. The merge
//! engine talks to it through the [`ToolBarHost`] trait so that a rendering
//! backend can supply its own window type.
//!
//! # Layout
//!
//! ```text
//! +------------------------------------------+
//! |                Menu Bar                  |
//! +------------------------------------------+
//! |   Top toolbars (rows split by breaks)    |
//! +--------+------------------------+--------+
//! |  Left  |                        | Right  |
//! |  bars  |     Central widget     |  bars  |
//! +--------+------------------------+--------+
//! |            Bottom toolbars               |
//! +------------------------------------------+
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use qmdi_core::{Object, ObjectBase, ObjectId, Signal};

use super::menu_bar::MenuBar;
use super::tool_bar::{SharedToolBar, ToolBarArea};

// ============================================================================
// ToolBarHost
// ============================================================================

/// A window that can receive realized chrome.
pub trait ToolBarHost {
    /// Dock a toolbar into an area, after the toolbars already there.
    fn add_tool_bar(&mut self, area: ToolBarArea, toolbar: SharedToolBar);

    /// Start a new toolbar row in an area.
    fn add_tool_bar_break(&mut self, area: ToolBarArea);

    /// The window's menu bar.
    fn menu_bar_mut(&mut self) -> &mut MenuBar;

    /// Suspend or resume repainting around a batch of changes.
    fn set_updates_enabled(&mut self, enabled: bool);

    fn updates_enabled(&self) -> bool;
}

/// A window shared between a host that realizes into it and the application
/// that owns it.
pub type SharedToolBarHost = Arc<RwLock<dyn ToolBarHost + Send + Sync>>;

// ============================================================================
// Toolbar area bookkeeping
// ============================================================================

#[derive(Default)]
struct ToolBarAreaContainer {
    toolbars: Vec<SharedToolBar>,
    /// Whether a row break follows each toolbar.
    breaks: Vec<bool>,
}

impl ToolBarAreaContainer {
    fn add_toolbar(&mut self, toolbar: SharedToolBar) {
        self.toolbars.push(toolbar);
        self.breaks.push(false);
    }

    fn add_toolbar_break(&mut self) {
        if let Some(last_break) = self.breaks.last_mut() {
            *last_break = true;
        }
    }

    fn remove_toolbar(&mut self, id: ObjectId) -> bool {
        match self
            .toolbars
            .iter()
            .position(|tb| tb.read().object_id() == id)
        {
            Some(pos) => {
                self.toolbars.remove(pos);
                self.breaks.remove(pos);
                true
            }
            None => false,
        }
    }

    fn rows(&self) -> Vec<Vec<SharedToolBar>> {
        let mut rows = vec![Vec::new()];
        for (toolbar, &brk) in self.toolbars.iter().zip(&self.breaks) {
            if let Some(row) = rows.last_mut() {
                row.push(toolbar.clone());
            }
            if brk {
                rows.push(Vec::new());
            }
        }
        rows.retain(|row| !row.is_empty());
        rows
    }
}

// ============================================================================
// MainWindow
// ============================================================================

/// The primary application window.
///
/// # Signals
///
/// - [`updated`](MainWindow::updated): Emitted each time updates are
///   re-enabled after a batch, i.e. once per realization pass
pub struct MainWindow {
    object_base: ObjectBase,
    title: String,
    menu_bar: MenuBar,
    toolbar_areas: HashMap<ToolBarArea, ToolBarAreaContainer>,
    updates_enabled: bool,
    repaint_count: u64,

    /// Signal emitted when a batch of changes is flushed.
    pub updated: Signal<()>,
}

impl MainWindow {
    pub fn new() -> Self {
        Self {
            object_base: ObjectBase::new(),
            title: String::new(),
            menu_bar: MenuBar::new(),
            toolbar_areas: ToolBarArea::all()
                .map(|area| (area, ToolBarAreaContainer::default()))
                .collect(),
            updates_enabled: true,
            repaint_count: 0,
            updated: Signal::new(),
        }
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        let mut window = Self::new();
        window.title = title.into();
        window
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    // =========================================================================
    // Menu bar
    // =========================================================================

    pub fn menu_bar(&self) -> &MenuBar {
        &self.menu_bar
    }

    // =========================================================================
    // Toolbars
    // =========================================================================

    /// Remove a toolbar from whichever area holds it.
    pub fn remove_tool_bar(&mut self, toolbar: &SharedToolBar) {
        let id = toolbar.read().object_id();
        for container in self.toolbar_areas.values_mut() {
            container.remove_toolbar(id);
        }
        toolbar.write().set_area(None);
    }

    /// Get the area containing a toolbar.
    pub fn tool_bar_area(&self, toolbar: &SharedToolBar) -> Option<ToolBarArea> {
        let id = toolbar.read().object_id();
        self.toolbar_areas
            .iter()
            .find(|(_, c)| c.toolbars.iter().any(|tb| tb.read().object_id() == id))
            .map(|(area, _)| *area)
    }

    /// All toolbars docked in an area, in order.
    pub fn tool_bars_in_area(&self, area: ToolBarArea) -> Vec<SharedToolBar> {
        self.toolbar_areas
            .get(&area)
            .map(|c| c.toolbars.clone())
            .unwrap_or_default()
    }

    /// Titles of the toolbars in an area, grouped into rows by breaks.
    pub fn tool_bar_rows(&self, area: ToolBarArea) -> Vec<Vec<String>> {
        self.toolbar_areas
            .get(&area)
            .map(|c| {
                c.rows()
                    .into_iter()
                    .map(|row| row.iter().map(|tb| tb.read().title().to_string()).collect())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of times a batch of changes has been flushed.
    pub fn repaint_count(&self) -> u64 {
        self.repaint_count
    }
}

impl ToolBarHost for MainWindow {
    fn add_tool_bar(&mut self, area: ToolBarArea, toolbar: SharedToolBar) {
        self.remove_tool_bar(&toolbar);
        toolbar.write().set_area(Some(area));
        if let Some(container) = self.toolbar_areas.get_mut(&area) {
            container.add_toolbar(toolbar);
        }
    }

    fn add_tool_bar_break(&mut self, area: ToolBarArea) {
        if let Some(container) = self.toolbar_areas.get_mut(&area) {
            container.add_toolbar_break();
        }
    }

    fn menu_bar_mut(&mut self) -> &mut MenuBar {
        &mut self.menu_bar
    }

    fn set_updates_enabled(&mut self, enabled: bool) {
        let resumed = enabled && !self.updates_enabled;
        self.updates_enabled = enabled;
        if resumed {
            self.repaint_count += 1;
            self.updated.emit(());
        }
    }

    fn updates_enabled(&self) -> bool {
        self.updates_enabled
    }
}

impl Object for MainWindow {
    fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }
}

impl Default for MainWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MainWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainWindow")
            .field("title", &self.title)
            .field("menu_bar", &self.menu_bar)
            .field("updates_enabled", &self.updates_enabled)
            .finish()
    }
}
