//! Scriptable in-memory host for driver tests.
//!
//! [`StubHost`] plays the part of the native runtime: getters return
//! scripted values, every mutator call is recorded in order, and tests emit
//! [`HostEvent`]s through the built-in hub to drive sources.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use crate::event::HostEvent;
use crate::hub::EventHub;
use crate::{Dock, Host};
use crosswire_types::{BounceKind, DockMenu, NativeBounceId, PathName, UserTask};

/// One recorded mutator invocation, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    SetPath(PathName, PathBuf),
    AddRecentDocument(PathBuf),
    ClearRecentDocuments,
    SetUserTasks(Vec<UserTask>),
    AllowNtlmForNonIntranet(bool),
    SetAppUserModelId(String),
    AppendSwitch(String, Option<String>),
    AppendArgument(String),
    Quit,
    Exit(i32),
    Show,
    Hide,
    DockBounce(BounceKind),
    DockCancelBounce(NativeBounceId),
    DockSetBadge(String),
    DockShow,
    DockHide,
    DockSetMenu(DockMenu),
    DockSetIcon(PathBuf),
}

#[derive(Debug, Default)]
struct Scripted {
    name: String,
    version: String,
    locale: String,
    app_path: PathBuf,
    paths: HashMap<PathName, PathBuf>,
}

/// Recording host double. Mutators append to a shared call log; getters
/// return whatever the test scripted beforehand.
#[derive(Debug)]
pub struct StubHost {
    hub: EventHub,
    calls: Arc<Mutex<Vec<HostCall>>>,
    scripted: Mutex<Scripted>,
    aero_glass: AtomicBool,
    another_instance: AtomicBool,
    dock: StubDock,
}

impl Default for StubHost {
    fn default() -> Self {
        Self::new()
    }
}

impl StubHost {
    #[must_use]
    pub fn new() -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        Self {
            hub: EventHub::new(),
            calls: Arc::clone(&calls),
            scripted: Mutex::new(Scripted::default()),
            aero_glass: AtomicBool::new(false),
            another_instance: AtomicBool::new(false),
            dock: StubDock::new(calls),
        }
    }

    /// Emit an event to every subscribed driver. Returns the number of
    /// receivers it reached.
    pub fn emit(&self, event: HostEvent) -> usize {
        self.hub.emit(event)
    }

    /// Snapshot of every mutator call recorded so far, host and dock alike.
    #[must_use]
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().expect("call log poisoned").clone()
    }

    pub fn script_metadata(&self, name: &str, version: &str, locale: &str) {
        let mut scripted = self.scripted.lock().expect("script state poisoned");
        scripted.name = name.to_string();
        scripted.version = version.to_string();
        scripted.locale = locale.to_string();
    }

    pub fn script_app_path(&self, path: impl Into<PathBuf>) {
        self.scripted.lock().expect("script state poisoned").app_path = path.into();
    }

    pub fn script_path(&self, name: PathName, path: impl Into<PathBuf>) {
        self.scripted
            .lock()
            .expect("script state poisoned")
            .paths
            .insert(name, path.into());
    }

    pub fn script_badge(&self, label: &str) {
        *self.dock.badge.lock().expect("badge poisoned") = label.to_string();
    }

    pub fn script_aero_glass(&self, enabled: bool) {
        self.aero_glass.store(enabled, Ordering::SeqCst);
    }

    /// Script whether another process already holds the single-instance
    /// lock, i.e. whether `make_single_instance` tells the caller to quit.
    pub fn script_another_instance(&self, running: bool) {
        self.another_instance.store(running, Ordering::SeqCst);
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().expect("call log poisoned").push(call);
    }
}

impl Host for StubHost {
    fn name(&self) -> String {
        self.scripted.lock().expect("script state poisoned").name.clone()
    }

    fn version(&self) -> String {
        self.scripted
            .lock()
            .expect("script state poisoned")
            .version
            .clone()
    }

    fn locale(&self) -> String {
        self.scripted
            .lock()
            .expect("script state poisoned")
            .locale
            .clone()
    }

    fn app_path(&self) -> PathBuf {
        self.scripted
            .lock()
            .expect("script state poisoned")
            .app_path
            .clone()
    }

    fn path(&self, name: PathName) -> PathBuf {
        self.scripted
            .lock()
            .expect("script state poisoned")
            .paths
            .get(&name)
            .cloned()
            .unwrap_or_default()
    }

    fn set_path(&self, name: PathName, path: PathBuf) {
        self.record(HostCall::SetPath(name, path.clone()));
        self.scripted
            .lock()
            .expect("script state poisoned")
            .paths
            .insert(name, path);
    }

    fn add_recent_document(&self, path: PathBuf) {
        self.record(HostCall::AddRecentDocument(path));
    }

    fn clear_recent_documents(&self) {
        self.record(HostCall::ClearRecentDocuments);
    }

    fn set_user_tasks(&self, tasks: Vec<UserTask>) {
        self.record(HostCall::SetUserTasks(tasks));
    }

    fn allow_ntlm_for_non_intranet(&self, allow: bool) {
        self.record(HostCall::AllowNtlmForNonIntranet(allow));
    }

    fn set_app_user_model_id(&self, id: &str) {
        self.record(HostCall::SetAppUserModelId(id.to_string()));
    }

    fn append_switch(&self, name: &str, value: Option<&str>) {
        self.record(HostCall::AppendSwitch(
            name.to_string(),
            value.map(str::to_string),
        ));
    }

    fn append_argument(&self, arg: &str) {
        self.record(HostCall::AppendArgument(arg.to_string()));
    }

    fn is_aero_glass_enabled(&self) -> bool {
        self.aero_glass.load(Ordering::SeqCst)
    }

    fn make_single_instance(&self) -> bool {
        self.another_instance.load(Ordering::SeqCst)
    }

    fn quit(&self) {
        self.record(HostCall::Quit);
    }

    fn exit(&self, code: i32) {
        self.record(HostCall::Exit(code));
    }

    fn show(&self) {
        self.record(HostCall::Show);
    }

    fn hide(&self) {
        self.record(HostCall::Hide);
    }

    fn dock(&self) -> &dyn Dock {
        &self.dock
    }

    fn events(&self) -> broadcast::Receiver<HostEvent> {
        self.hub.subscribe()
    }
}

/// Dock half of the stub. Shares the host's call log so dock and host calls
/// interleave in one recorded sequence.
#[derive(Debug)]
pub struct StubDock {
    calls: Arc<Mutex<Vec<HostCall>>>,
    badge: Mutex<String>,
    next_bounce: AtomicU64,
}

impl StubDock {
    fn new(calls: Arc<Mutex<Vec<HostCall>>>) -> Self {
        Self {
            calls,
            badge: Mutex::new(String::new()),
            next_bounce: AtomicU64::new(1),
        }
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().expect("call log poisoned").push(call);
    }
}

impl Dock for StubDock {
    fn bounce(&self, kind: BounceKind) -> NativeBounceId {
        self.record(HostCall::DockBounce(kind));
        NativeBounceId::new(self.next_bounce.fetch_add(1, Ordering::SeqCst))
    }

    fn cancel_bounce(&self, id: NativeBounceId) {
        self.record(HostCall::DockCancelBounce(id));
    }

    fn badge(&self) -> String {
        self.badge.lock().expect("badge poisoned").clone()
    }

    fn set_badge(&self, label: &str) {
        self.record(HostCall::DockSetBadge(label.to_string()));
        *self.badge.lock().expect("badge poisoned") = label.to_string();
    }

    fn show(&self) {
        self.record(HostCall::DockShow);
    }

    fn hide(&self) {
        self.record(HostCall::DockHide);
    }

    fn set_menu(&self, menu: DockMenu) {
        self.record(HostCall::DockSetMenu(menu));
    }

    fn set_icon(&self, icon: PathBuf) {
        self.record(HostCall::DockSetIcon(icon));
    }
}
