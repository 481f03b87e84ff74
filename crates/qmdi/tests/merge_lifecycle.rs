//! Integration tests for the merge lifecycle: a host, a tab server and
//! several editor clients switching back and forth.

use std::io;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use qmdi::prelude::*;
use slotmap::KeyData;

// ============================================================================
// Fixtures
// ============================================================================

struct Editor {
    base: ClientBase,
    dirty: bool,
    save: Arc<Action>,
}

impl Editor {
    fn new(name: &str) -> Self {
        let save = Arc::new(Action::new("&Save").with_shortcut_str("Ctrl+S"));
        let close = Arc::new(Action::new("&Close"));
        let find = Arc::new(Action::new("&Find"));

        let mut base = ClientBase::new(name).with_file_name(format!("/work/{name}"));
        let file = base.menus.get_action_group("&File");
        file.add_action(save.clone());
        file.add_action(close);
        base.menus.get_action_group("&Search").add_action(find.clone());
        base.toolbars.get_action_group("Search").add_action(find);

        Self {
            base,
            dirty: false,
            save,
        }
    }
}

impl MdiClient for Editor {
    fn client_base(&self) -> &ClientBase {
        &self.base
    }

    fn client_base_mut(&mut self) -> &mut ClientBase {
        &mut self.base
    }

    fn can_close_client(&mut self) -> bool {
        !self.dirty
    }
}

impl Object for Editor {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

impl MdiWidget for Editor {
    fn as_client(&self) -> Option<&dyn MdiClient> {
        Some(self)
    }

    fn as_client_mut(&mut self) -> Option<&mut dyn MdiClient> {
        Some(self)
    }
}

fn host() -> MdiHost {
    let mut host = MdiHost::new();
    let file = host.menus.get_action_group("&File");
    file.add_action(Arc::new(Action::new("&Open")));
    file.set_merge_point();
    file.add_action(Arc::new(Action::new("&Quit")));
    host.menus
        .get_action_group("&Help")
        .add_action(Arc::new(Action::new("&About")));
    host.toolbars
        .get_action_group("Main")
        .add_action(Arc::new(Action::new("New")));
    host.update_gui();
    host
}

fn menu(host: &MdiHost, title: &str) -> Vec<String> {
    host.window()
        .and_then(|w| w.menu_bar().menu_labels(title))
        .unwrap_or_default()
}

fn menu_titles(host: &MdiHost) -> Vec<String> {
    host.window()
        .map(|w| w.menu_bar().titles())
        .unwrap_or_default()
}

/// Collects formatted log output so tests can look for diagnostics.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

fn with_logs(f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter("qmdi=debug")
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buffer.contents()
}

// ============================================================================
// Scenario
// ============================================================================

#[test]
fn test_file_menu_scenario() {
    let mut host = host();
    let mut tabs = MdiTabServer::new();
    assert_eq!(menu(&host, "File"), vec!["Open", "Quit"]);

    let a = tabs.add_client(&mut host, Box::new(Editor::new("a.rs")));
    assert_eq!(menu(&host, "File"), vec!["Open", "Save", "Close", "Quit"]);
    assert_eq!(menu_titles(&host), vec!["File", "Help", "Search"]);

    tabs.activate(&mut host, None);
    assert_eq!(menu(&host, "File"), vec!["Open", "Quit"]);
    assert_eq!(menu_titles(&host), vec!["File", "Help"]);

    tabs.activate(&mut host, Some(a));
    assert_eq!(menu(&host, "File"), vec!["Open", "Save", "Close", "Quit"]);
}

#[test]
fn test_activation_exclusivity() {
    let mut host = host();
    let mut tabs = MdiTabServer::new();
    let a = tabs.add_client(&mut host, Box::new(Editor::new("a.rs")));
    let b = tabs.add_client(&mut host, Box::new(Editor::new("b.rs")));

    tabs.activate(&mut host, Some(a));
    tabs.activate(&mut host, Some(b));

    let host_actions = host.menus.all_actions();
    let a_actions = tabs.client(a).unwrap().menus().all_actions();
    let b_actions = tabs.client(b).unwrap().menus().all_actions();
    let contains = |action: &Arc<Action>| {
        host_actions
            .iter()
            .any(|h| h.object_id() == action.object_id())
    };
    assert!(b_actions.iter().all(contains));
    assert!(!a_actions.iter().any(contains));
    // Baseline (Open, Quit, About) plus b's three actions.
    assert_eq!(host_actions.len(), 6);
}

#[test]
fn test_switching_back_and_forth_is_stable() {
    let mut host = host();
    let mut tabs = MdiTabServer::new();
    tabs.add_client(&mut host, Box::new(Editor::new("a.rs")));
    tabs.add_client(&mut host, Box::new(Editor::new("b.rs")));

    for _ in 0..5 {
        tabs.set_current_index(&mut host, 0);
        tabs.set_current_index(&mut host, 1);
    }
    assert_eq!(menu(&host, "File"), vec!["Open", "Save", "Close", "Quit"]);
    assert_eq!(menu(&host, "Search"), vec!["Find"]);

    let toolbars = host.tool_bar_list();
    assert_eq!(toolbars.titles(), vec!["Main", "Search"]);
    let rows = host.window().unwrap().tool_bar_rows(ToolBarArea::Top);
    assert_eq!(rows, vec![vec!["Main".to_string(), "Search".to_string()]]);
}

#[test]
fn test_closing_active_client_returns_to_baseline() {
    let mut host = host();
    let mut tabs = MdiTabServer::new();
    tabs.add_client(&mut host, Box::new(Editor::new("a.rs")));

    assert!(tabs.try_close_client(&mut host, 0));
    assert_eq!(tabs.active_client(), None);
    assert_eq!(menu(&host, "File"), vec!["Open", "Quit"]);
    assert!(host.tool_bar_list().visible_titles() == vec!["Main"]);
}

#[test]
fn test_refused_close_keeps_client_active() {
    let mut host = host();
    let mut tabs = MdiTabServer::new();
    let mut editor = Editor::new("dirty.rs");
    editor.dirty = true;
    let dirty = tabs.add_client(&mut host, Box::new(editor));

    tabs.exec_client_menu(&mut host, 0, Some(LocalAction::CloseThis));
    assert!(tabs.contains(dirty));
    assert_eq!(tabs.active_client(), Some(dirty));
    assert_eq!(menu(&host, "File"), vec!["Open", "Save", "Close", "Quit"]);
}

#[test]
fn test_local_actions_menu() {
    let mut host = host();
    let mut tabs = MdiTabServer::new();
    tabs.add_client(&mut host, Box::new(Editor::new("a.rs")));
    tabs.add_client(&mut host, Box::new(Editor::new("b.rs")));
    let c = tabs.add_client(&mut host, Box::new(Editor::new("c.rs")));

    let popup = tabs
        .handle_tab_mouse_press(&mut host, 2, MouseButton::Right)
        .unwrap();
    let chosen = popup.menu().find_action("Close other windows").unwrap();
    let local = popup.local_action(&chosen);
    tabs.exec_client_menu(&mut host, 2, local);

    assert_eq!(tabs.count(), 1);
    assert_eq!(tabs.active_client(), Some(c));

    tabs.exec_client_menu(&mut host, 0, Some(LocalAction::CloseAll));
    assert!(tabs.is_empty());
    assert_eq!(menu(&host, "File"), vec!["Open", "Quit"]);
}

#[test]
fn test_shortcuts_follow_the_active_client() {
    let mut host = host();
    let mut tabs = MdiTabServer::new();
    let a = tabs.add_client(&mut host, Box::new(Editor::new("a.rs")));
    let b = tabs.add_client(&mut host, Box::new(Editor::new("b.rs")));

    let ctrl_s: KeySequence = "Ctrl+S".parse().unwrap();
    let registered = |tabs: &MdiTabServer, id| {
        tabs.client(id)
            .map(|c| c.client_base().widget_actions().len())
            .unwrap_or_default()
    };
    // Find sits in both a menu and a toolbar but registers once.
    assert_eq!(registered(&tabs, a), 0);
    assert_eq!(registered(&tabs, b), 3);
    assert!(tabs
        .client(b)
        .unwrap()
        .client_base()
        .widget_actions()
        .dispatch_shortcut(&ctrl_s));
    assert!(!tabs
        .client(a)
        .unwrap()
        .client_base()
        .widget_actions()
        .dispatch_shortcut(&ctrl_s));
}

#[test]
fn test_save_action_identity_survives_merge() {
    let mut host = host();
    let mut tabs = MdiTabServer::new();
    let editor = Editor::new("a.rs");
    let save = editor.save.clone();
    tabs.add_client(&mut host, Box::new(editor));

    let triggered = Arc::new(Mutex::new(0));
    let triggered_clone = triggered.clone();
    save.triggered.connect(move |_| *triggered_clone.lock() += 1);

    assert!(host.window().unwrap().menu_bar().trigger("File", "Save"));
    assert_eq!(*triggered.lock(), 1);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_disabled_merging_keeps_baseline() {
    let config = MdiConfig::from_toml_str("update_menus_and_toolbars = false").unwrap();
    let mut host = host().with_config(config);
    let mut tabs = MdiTabServer::new();
    tabs.add_client(&mut host, Box::new(Editor::new("a.rs")));
    assert_eq!(menu(&host, "File"), vec!["Open", "Quit"]);
}

#[test]
fn test_tab_bar_always_visible_without_auto_hide() {
    let config = MdiConfig::from_toml_str("auto_hide_tab_bar = false").unwrap();
    let mut host = host();
    let mut tabs = MdiTabServer::new().with_config(config);
    assert!(tabs.is_tab_bar_visible());
    tabs.add_client(&mut host, Box::new(Editor::new("a.rs")));
    assert!(tabs.is_tab_bar_visible());
}

#[test]
fn test_middle_click_can_be_disabled() {
    let config = MdiConfig::from_toml_str("close_tab_on_middle_click = false").unwrap();
    let mut host = host();
    let mut tabs = MdiTabServer::new().with_config(config);
    tabs.add_client(&mut host, Box::new(Editor::new("a.rs")));
    tabs.handle_tab_mouse_press(&mut host, 0, MouseButton::Middle);
    assert_eq!(tabs.count(), 1);
}

#[test]
fn test_custom_local_action_labels() {
    let config = MdiConfig::from_toml_str(
        r#"
        [local_actions]
        title = "Tab"
        close_this = "Close"
        "#,
    )
    .unwrap();
    let tabs = MdiTabServer::new().with_config(config);
    let popup = tabs.client_menu();
    assert_eq!(popup.menu().title(), "Tab");
    assert_eq!(
        popup.menu().item_labels(),
        vec!["Close", "Close other windows", "Close all windows"]
    );
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_unknown_client_is_logged_and_ignored() {
    let mut host = host();
    let mut tabs = MdiTabServer::new();
    let a = tabs.add_client(&mut host, Box::new(Editor::new("a.rs")));
    let bogus = ClientId::from(KeyData::from_ffi(u64::MAX));

    let logs = with_logs(|| {
        tabs.activate(&mut host, Some(bogus));
        tabs.client_deleted(&mut host, bogus);
    });

    assert!(logs.contains("activate called with an unknown client"));
    assert!(logs.contains("client_deleted called for an unknown client"));
    assert_eq!(tabs.active_client(), Some(a));
    assert_eq!(menu(&host, "File"), vec!["Open", "Save", "Close", "Quit"]);
}

#[test]
fn test_host_without_window_warns() {
    let logs = with_logs(|| {
        let mut host = MdiHost::without_window();
        host.update_gui();
    });
    assert!(logs.contains("WARN"));
    assert!(logs.contains("without a window"));
}

#[test]
fn test_shared_window_tracks_tab_activation() {
    let window = Arc::new(RwLock::new(MainWindow::new()));
    let mut host = MdiHost::with_shared_window(window.clone());
    host.menus
        .get_action_group("&File")
        .add_action(Arc::new(Action::new("&Open")));
    host.update_gui();
    assert_eq!(window.read().menu_bar().menu_labels("File"), Some(vec!["Open".to_string()]));

    let mut tabs = MdiTabServer::new();
    tabs.add_client(&mut host, Box::new(Editor::new("notes")));

    let labels = window.read().menu_bar().menu_labels("File");
    assert_eq!(labels, Some(vec!["Open".into(), "Save".into(), "Close".into()]));
    assert_eq!(window.read().menu_bar().titles(), vec!["File", "Search"]);

    assert!(tabs.remove_tab(&mut host, 0).is_some());
    assert_eq!(window.read().menu_bar().menu_labels("File"), Some(vec!["Open".to_string()]));
    assert_eq!(window.read().menu_bar().titles(), vec!["File"]);
}
