//! Tabbed Editor Example
//!
//! Walks a host window through a short editing session and prints the
//! realized menu bar and toolbars after every step:
//! - Opening two documents merges each one's menus in turn
//! - Switching tabs swaps the merged chrome
//! - A document with unsaved changes refuses to close
//!
//! Run with: RUST_LOG=qmdi=debug cargo run -p qmdi --example tabbed_editor

use std::sync::Arc;

use qmdi::prelude::*;
use tracing_subscriber::EnvFilter;

/// A text document with its own File and Edit entries.
struct Document {
    base: ClientBase,
    modified: bool,
}

impl Document {
    fn open(path: &str) -> Box<Self> {
        let name = path.rsplit('/').next().unwrap_or(path);
        let mut base = ClientBase::new(name).with_file_name(path);

        let file = base.menus.get_action_group("&File");
        file.add_action(Arc::new(Action::new("&Save").with_shortcut_str("Ctrl+S")));
        file.add_action(Arc::new(Action::new("Save &As...")));
        file.add_separator();
        file.add_action(Arc::new(Action::new("&Close").with_shortcut_str("Ctrl+W")));

        let edit = base.menus.get_action_group("&Edit");
        let undo = Arc::new(Action::new("&Undo").with_shortcut_str("Ctrl+Z"));
        let redo = Arc::new(Action::new("&Redo").with_shortcut_str("Ctrl+Shift+Z"));
        edit.add_action(undo.clone());
        edit.add_action(redo.clone());

        let toolbar = base.toolbars.get_action_group("Edit");
        toolbar.add_action(undo);
        toolbar.add_action(redo);

        Box::new(Self {
            base,
            modified: false,
        })
    }
}

impl MdiClient for Document {
    fn client_base(&self) -> &ClientBase {
        &self.base
    }

    fn client_base_mut(&mut self) -> &mut ClientBase {
        &mut self.base
    }

    fn can_close_client(&mut self) -> bool {
        if self.modified {
            println!("  {} has unsaved changes, keeping it open", self.base.name());
        }
        !self.modified
    }
}

impl Object for Document {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

impl MdiWidget for Document {
    fn as_client(&self) -> Option<&dyn MdiClient> {
        Some(self)
    }

    fn as_client_mut(&mut self) -> Option<&mut dyn MdiClient> {
        Some(self)
    }
}

fn build_host() -> MdiHost {
    let mut host = MdiHost::new();

    let file = host.menus.get_action_group("&File");
    file.add_action(Arc::new(Action::new("&New").with_shortcut_str("Ctrl+N")));
    file.add_action(Arc::new(Action::new("&Open...").with_shortcut_str("Ctrl+O")));
    file.add_separator();
    file.set_merge_point();
    file.add_separator();
    file.add_action(Arc::new(Action::new("&Quit").with_shortcut_str("Ctrl+Q")));

    host.menus
        .get_action_group("&Help")
        .add_action(Arc::new(Action::new("&About")));

    let main = host.toolbars.get_action_group("Main");
    main.add_action(Arc::new(Action::new("New")));
    main.add_action(Arc::new(Action::new("Open")));

    host.update_gui();
    host
}

fn print_chrome(step: &str, host: &MdiHost, tabs: &MdiTabServer) {
    println!("== {step}");
    let Some(window) = host.window() else {
        return;
    };
    for title in window.menu_bar().titles() {
        let labels = window.menu_bar().menu_labels(&title).unwrap_or_default();
        println!("  {title:<6} {}", labels.join(" | "));
    }
    for row in window.tool_bar_rows(ToolBarArea::Top) {
        println!("  toolbars: {}", row.join(", "));
    }
    let tabs_text: Vec<&str> = (0..tabs.count()).filter_map(|i| tabs.tab_text(i)).collect();
    println!(
        "  tabs: [{}] current={:?} tab bar visible={}",
        tabs_text.join(", "),
        tabs.current_index(),
        tabs.is_tab_bar_visible()
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut host = build_host();
    let mut tabs = MdiTabServer::new();
    print_chrome("empty window", &host, &tabs);

    tabs.add_client(&mut host, Document::open("/src/main.rs"));
    print_chrome("opened main.rs", &host, &tabs);

    let mut notes = Document::open("/doc/notes.md");
    notes.modified = true;
    let notes = tabs.add_client(&mut host, notes);
    print_chrome("opened notes.md", &host, &tabs);

    tabs.set_current_index(&mut host, 0);
    print_chrome("switched back to main.rs", &host, &tabs);

    let closed = tabs.try_close_all_clients(&mut host);
    println!("  closed {closed} client(s)");
    print_chrome("closed everything that could be closed", &host, &tabs);

    if let Some(doc) = tabs.client_mut(notes) {
        doc.client_base_mut().set_name("notes.md (saved)");
    }
    tabs.refresh_tab(0);
    print_chrome("notes.md saved", &host, &tabs);
}
