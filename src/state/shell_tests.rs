//! Tests for the viewport shell wiring.

use super::*;
use crate::model::{ToastIntent, OFFLINE_TOAST_MESSAGE};
use crate::state::connectivity::ConnectivitySignal::{Offline, Online};
use crate::state::layout_channel::{VirtualList, VirtualListHandle};
use crate::store::MemoryStore;
use std::cell::RefCell;
use std::rc::Rc;

// ===== Test Helpers =====

/// Store that records every action it receives.
#[derive(Debug, Default)]
struct RecordingStore {
    inner: MemoryStore,
    dimension_writes: Vec<ViewportDimensions>,
    toast_adds: Vec<Toast>,
    toast_removals: Vec<String>,
    scroll_writes: Vec<(u32, RoutePath)>,
    stop_watchers_calls: usize,
    /// Store writes in call order.
    actions: Vec<&'static str>,
}

impl ShellStore for RecordingStore {
    fn set_dimensions(&mut self, dimensions: ViewportDimensions) {
        self.dimension_writes.push(dimensions);
        self.inner.set_dimensions(dimensions);
    }
    fn toggle_offline(&mut self, offline: bool) {
        self.inner.toggle_offline(offline);
    }
    fn add_toast(&mut self, toast: Toast) {
        self.toast_adds.push(toast.clone());
        self.inner.add_toast(toast);
    }
    fn remove_toast(&mut self, key: &str) {
        self.toast_removals.push(key.to_string());
        self.inner.remove_toast(key);
    }
    fn clear_toasts(&mut self) {
        self.inner.clear_toasts();
    }
    fn set_scroll_position(&mut self, offset: u32, path: &RoutePath) {
        self.scroll_writes.push((offset, path.clone()));
        self.actions.push("set_scroll_position");
        self.inner.set_scroll_position(offset, path);
    }
    fn stop_watchers(&mut self) {
        self.stop_watchers_calls += 1;
        self.actions.push("stop_watchers");
        self.inner.stop_watchers();
    }
    fn scroll_position(&self, path: &RoutePath) -> Option<u32> {
        self.inner.scroll_position(path)
    }
    fn is_offline(&self) -> bool {
        self.inner.is_offline()
    }
    fn is_loaded(&self) -> bool {
        self.inner.is_loaded()
    }
    fn loading_error(&self) -> Option<&str> {
        self.inner.loading_error()
    }
    fn toasts(&self) -> &[Toast] {
        self.inner.toasts()
    }
    fn dimensions(&self) -> Option<ViewportDimensions> {
        self.inner.dimensions()
    }
}

/// Container that echoes every command back as a scroll event, like a
/// real scroll region does.
#[derive(Default)]
struct EchoContainer {
    offset: u32,
    commands: Vec<u32>,
    echoes: Vec<u32>,
}

impl ScrollContainer for EchoContainer {
    fn scroll_to(&mut self, offset: u32) {
        self.offset = offset;
        self.commands.push(offset);
        self.echoes.push(offset);
    }
}

#[derive(Default)]
struct FakeList {
    offsets: Vec<u32>,
}

impl VirtualList for FakeList {
    fn scroll_to(&mut self, offset: u32) {
        self.offsets.push(offset);
    }
}

fn path(raw: &str) -> RoutePath {
    RoutePath::new(raw).expect("valid path")
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn mounted_shell() -> (ViewportShell<RecordingStore>, MemoryHistory) {
    let mut history = MemoryHistory::new(RoutePath::root());
    let mut shell = ViewportShell::new(RecordingStore::default(), ShellTiming::default());
    shell.mount(&mut history);
    (shell, history)
}

/// Run frames until the guard releases, replaying container echoes as
/// scroll events in between.
fn settle(shell: &mut ViewportShell<RecordingStore>, container: &mut EchoContainer, now: Instant) {
    for _ in 0..4 {
        shell.frame(Some(&mut *container));
        for offset in std::mem::take(&mut container.echoes) {
            shell.handle_scroll(offset, now);
        }
    }
}

// ===== Lifecycle =====

#[test]
fn mount_takes_current_location_and_subscribes() {
    let mut history = MemoryHistory::new(path("/album/3"));
    let mut shell = ViewportShell::new(RecordingStore::default(), ShellTiming::default());

    shell.mount(&mut history);

    assert!(shell.is_mounted());
    assert_eq!(shell.current_path(), &path("/album/3"));
    assert_eq!(history.listener_count(), 1);
}

#[test]
fn unmount_stops_watchers_and_detaches() {
    let (mut shell, mut history) = mounted_shell();

    shell.unmount();
    history.push(path("/a"));

    assert!(!shell.is_mounted());
    assert_eq!(shell.store().stop_watchers_calls, 1);
    assert_eq!(history.listener_count(), 0);
}

#[test]
fn unmount_stops_watchers_after_final_write() {
    let t0 = Instant::now();
    let (mut shell, _history) = mounted_shell();
    shell.handle_scroll(12, t0);

    shell.unmount();

    assert_eq!(
        shell.store().actions,
        vec!["set_scroll_position", "stop_watchers"]
    );
}

#[test]
fn unmount_twice_is_noop() {
    let (mut shell, _history) = mounted_shell();
    shell.unmount();
    shell.unmount();
    assert_eq!(shell.store().stop_watchers_calls, 1);
}

#[test]
fn unmount_without_mount_is_noop() {
    let mut shell = ViewportShell::new(RecordingStore::default(), ShellTiming::default());
    shell.unmount();
    assert_eq!(shell.store().stop_watchers_calls, 0);
}

#[test]
fn unmount_flushes_queued_scroll_write() {
    let t0 = Instant::now();
    let (mut shell, _history) = mounted_shell();

    shell.handle_scroll(77, t0);
    shell.unmount();

    assert_eq!(shell.store().scroll_writes, vec![(77, RoutePath::root())]);
}

#[test]
fn no_timer_fires_after_unmount() {
    let t0 = Instant::now();
    let (mut shell, _history) = mounted_shell();

    shell.handle_resize(ViewportDimensions::new(80, 24), t0);
    shell.handle_resize(ViewportDimensions::new(90, 24), t0 + ms(10));
    shell.unmount();
    shell.tick(t0 + ms(5_000));
    shell.handle_scroll(5, t0 + ms(5_000));
    shell.tick(t0 + ms(10_000));

    assert_eq!(shell.store().dimension_writes, vec![ViewportDimensions::new(80, 24)]);
    assert!(shell.store().scroll_writes.is_empty());
    assert_eq!(shell.next_deadline(), None);
}

#[test]
fn events_before_mount_are_ignored() {
    let t0 = Instant::now();
    let mut shell = ViewportShell::new(RecordingStore::default(), ShellTiming::default());

    shell.handle_connectivity(Offline);
    shell.handle_resize(ViewportDimensions::new(80, 24), t0);
    shell.handle_scroll(10, t0);
    shell.tick(t0 + ms(1000));

    assert!(!shell.store().is_offline());
    assert!(shell.store().dimension_writes.is_empty());
    assert!(shell.store().scroll_writes.is_empty());
}

// ===== Connectivity =====

#[test]
fn offline_online_scenario_adds_and_removes_toast_once() {
    let (mut shell, _history) = mounted_shell();

    shell.handle_connectivity(Offline);
    assert_eq!(shell.store().toast_adds.len(), 1);
    let toast = &shell.store().toast_adds[0];
    assert_eq!(toast.key, "offline");
    assert_eq!(toast.message, OFFLINE_TOAST_MESSAGE);
    assert_eq!(toast.intent, ToastIntent::Primary);

    shell.handle_connectivity(Offline);
    assert_eq!(shell.store().toast_adds.len(), 1, "no duplicate toast");

    shell.handle_connectivity(Online);
    assert_eq!(shell.store().toast_removals, vec!["offline".to_string()]);
    assert!(shell.store().toasts().is_empty());

    shell.handle_connectivity(Online);
    assert_eq!(shell.store().toast_removals.len(), 1);
}

#[test]
fn direct_store_change_is_diffed_on_tick() {
    let t0 = Instant::now();
    let (mut shell, _history) = mounted_shell();

    shell.store_mut().toggle_offline(true);
    shell.tick(t0);
    shell.tick(t0 + ms(1));

    assert_eq!(shell.store().toast_adds.len(), 1);
}

#[test]
fn store_already_offline_at_mount_is_not_an_edge() {
    let mut history = MemoryHistory::new(RoutePath::root());
    let mut store = RecordingStore::default();
    store.inner.toggle_offline(true);
    let mut shell = ViewportShell::new(store, ShellTiming::default());
    shell.mount(&mut history);

    shell.handle_connectivity(Offline);
    assert!(shell.store().toast_adds.is_empty());

    shell.handle_connectivity(Online);
    assert_eq!(shell.store().toast_removals.len(), 1);
}

// ===== Resize =====

#[test]
fn resize_burst_publishes_first_then_final_rectangle() {
    let t0 = Instant::now();
    let (mut shell, _history) = mounted_shell();

    for i in 0..10u16 {
        shell.handle_resize(ViewportDimensions::new(80 + i, 24), t0 + ms(u64::from(i) * 30));
        shell.tick(t0 + ms(u64::from(i) * 30));
    }
    let last = t0 + ms(9 * 30);
    assert_eq!(shell.next_deadline(), Some(last + ms(500)));
    shell.tick(last + ms(500));

    assert_eq!(
        shell.store().dimension_writes,
        vec![ViewportDimensions::new(80, 24), ViewportDimensions::new(89, 24)]
    );
    assert_eq!(shell.view().dimensions, Some(ViewportDimensions::new(89, 24)));
}

#[test]
fn single_resize_publishes_exactly_once() {
    let t0 = Instant::now();
    let (mut shell, _history) = mounted_shell();

    shell.handle_resize(ViewportDimensions::new(100, 30), t0);
    shell.tick(t0 + ms(1000));

    assert_eq!(shell.store().dimension_writes, vec![ViewportDimensions::new(100, 30)]);
}

// ===== Scroll restoration =====

#[test]
fn pop_restores_recorded_offset_for_target_path() {
    let t0 = Instant::now();
    let (mut shell, mut history) = mounted_shell();
    let mut container = EchoContainer::default();
    shell.store_mut().inner.set_scroll_position(240, &path("/p"));

    history.push(path("/p"));
    history.push(path("/q"));
    shell.tick(t0);
    history.back();
    shell.tick(t0);

    assert!(shell.is_restoring());
    settle(&mut shell, &mut container, t0);

    assert_eq!(container.commands, vec![240]);
    assert!(!shell.is_restoring());
    shell.tick(t0 + ms(1000));
    assert_eq!(shell.store().scroll_position(&path("/p")), Some(240));
}

#[test]
fn push_issues_no_scroll_command() {
    let t0 = Instant::now();
    let (mut shell, mut history) = mounted_shell();
    let mut container = EchoContainer::default();
    shell.store_mut().inner.set_scroll_position(300, &path("/album/1"));

    history.push(path("/album/1"));
    shell.tick(t0);
    settle(&mut shell, &mut container, t0);

    assert!(container.commands.is_empty());
    assert!(!shell.is_restoring());
}

#[test]
fn restoration_echo_never_records_intermediate_offset() {
    let t0 = Instant::now();
    let (mut shell, mut history) = mounted_shell();
    let mut container = EchoContainer::default();
    shell.store_mut().inner.set_scroll_position(240, &path("/p"));

    history.push(path("/p"));
    history.push(path("/x"));
    history.back();
    shell.tick(t0);
    shell.frame(Some(&mut container));
    // Smooth-scrolling container reports transient offsets before landing.
    shell.handle_scroll(60, t0);
    shell.handle_scroll(180, t0 + ms(5));
    shell.handle_scroll(240, t0 + ms(10));
    shell.frame(Some(&mut container));
    shell.tick(t0 + ms(1000));

    assert!(!shell.is_restoring());
    assert!(
        shell.store().scroll_writes.iter().all(|(offset, p)| p != &path("/p") || *offset == 240),
        "unexpected writes: {:?}",
        shell.store().scroll_writes
    );
    assert_eq!(shell.store().scroll_position(&path("/p")), Some(240));
}

#[test]
fn scroll_burst_writes_once_for_current_path() {
    let t0 = Instant::now();
    let (mut shell, mut history) = mounted_shell();
    history.push(path("/q"));
    shell.tick(t0);

    for i in 0..20u32 {
        let now = t0 + Duration::from_micros(u64::from(i) * 2_500);
        shell.handle_scroll(i * 25, now);
        shell.tick(now);
    }
    shell.tick(t0 + ms(50) + ms(100));

    assert_eq!(shell.store().scroll_writes, vec![(475, path("/q"))]);
}

#[test]
fn navigating_away_flushes_write_under_previous_path() {
    let t0 = Instant::now();
    let (mut shell, mut history) = mounted_shell();

    history.push(path("/album/1"));
    shell.tick(t0);
    shell.handle_scroll(500, t0 + ms(1));
    history.push(path("/album/2"));
    shell.tick(t0 + ms(2));

    assert_eq!(shell.store().scroll_writes, vec![(500, path("/album/1"))]);
    assert_eq!(shell.current_path(), &path("/album/2"));
}

#[test]
fn back_navigation_end_to_end() {
    let t0 = Instant::now();
    let (mut shell, mut history) = mounted_shell();
    let mut container = EchoContainer::default();

    history.push(path("/album/1"));
    shell.tick(t0);
    settle(&mut shell, &mut container, t0);
    assert!(container.commands.is_empty(), "PUSH does not restore");

    shell.handle_scroll(500, t0 + ms(10));
    shell.tick(t0 + ms(200));
    history.push(path("/album/1/track/4"));
    shell.tick(t0 + ms(300));
    shell.handle_scroll(0, t0 + ms(310));
    history.back();
    shell.tick(t0 + ms(320));
    settle(&mut shell, &mut container, t0 + ms(320));

    assert_eq!(container.commands, vec![500]);
}

#[test]
fn missing_container_skips_restoration() {
    let t0 = Instant::now();
    let (mut shell, mut history) = mounted_shell();

    history.push(path("/a"));
    history.back();
    shell.tick(t0);
    shell.frame(None);

    assert!(!shell.is_restoring());
}

#[test]
fn push_before_frame_cancels_pending_restoration() {
    let t0 = Instant::now();
    let (mut shell, mut history) = mounted_shell();
    let mut container = EchoContainer::default();
    shell.store_mut().inner.set_scroll_position(240, &path("/a"));
    history.push(path("/a"));
    history.push(path("/b"));
    shell.tick(t0);

    history.back();
    history.push(path("/z"));
    shell.tick(t0);
    settle(&mut shell, &mut container, t0);

    assert_eq!(shell.current_path(), &path("/z"));
    assert!(container.commands.is_empty(), "pushed view got {:?}", container.commands);
    assert!(!shell.is_restoring());
}

#[test]
fn two_backs_in_one_drain_restore_the_final_path() {
    let t0 = Instant::now();
    let (mut shell, mut history) = mounted_shell();
    let mut container = EchoContainer::default();
    shell.store_mut().inner.set_scroll_position(7, &RoutePath::root());
    shell.store_mut().inner.set_scroll_position(240, &path("/a"));
    history.push(path("/a"));
    history.push(path("/b"));
    shell.tick(t0);

    history.back();
    history.back();
    shell.tick(t0);
    settle(&mut shell, &mut container, t0);

    assert_eq!(shell.current_path(), &RoutePath::root());
    assert_eq!(container.commands, vec![7]);
    shell.tick(t0 + ms(1000));
    assert_eq!(shell.store().scroll_position(&path("/a")), Some(240));
}

// ===== Channel =====

#[test]
fn scroll_is_forwarded_to_registered_list() {
    let t0 = Instant::now();
    let (mut shell, _history) = mounted_shell();
    let list = Rc::new(RefCell::new(FakeList::default()));
    let handle: VirtualListHandle = list.clone();
    shell.register_accessor(VirtualizationAccessor::from_weak(Rc::downgrade(&handle)));

    shell.handle_scroll(33, t0);

    assert_eq!(list.borrow().offsets, vec![33]);
    assert!(shell.view().has_virtual_list);
}

#[test]
fn scroll_without_accessor_still_records() {
    let t0 = Instant::now();
    let (mut shell, _history) = mounted_shell();

    shell.handle_scroll(12, t0);
    shell.tick(t0 + ms(100));

    assert_eq!(shell.store().scroll_writes, vec![(12, RoutePath::root())]);
    assert!(!shell.view().has_virtual_list);
}

#[test]
fn merge_settings_is_visible_in_view() {
    let (mut shell, _history) = mounted_shell();
    let before = shell.view().revision;

    shell.merge_settings(LayoutSettings::empty().with("compact", true));

    let view = shell.view();
    assert_eq!(view.settings.get_bool("compact"), Some(true));
    assert_eq!(view.settings.get_bool("has_image"), Some(false));
    assert!(view.revision > before);
}

// ===== View =====

#[test]
fn spinner_shows_only_while_loading_online_without_error() {
    let (mut shell, _history) = mounted_shell();
    assert!(shell.view().show_spinner);

    shell.store_mut().inner.toggle_offline(true);
    assert!(!shell.view().show_spinner, "offline hides spinner");

    shell.store_mut().inner.toggle_offline(false);
    shell.store_mut().inner.set_loading_error(Some("boom".to_string()));
    assert!(!shell.view().show_spinner, "error hides spinner");
    assert_eq!(shell.view().loading_error, Some("boom"));

    shell.store_mut().inner.set_loading_error(None);
    shell.store_mut().inner.set_loaded(true);
    assert!(!shell.view().show_spinner);
}

#[test]
fn next_deadline_is_earliest_pending_timer() {
    let t0 = Instant::now();
    let (mut shell, _history) = mounted_shell();
    assert_eq!(shell.next_deadline(), None);

    shell.handle_resize(ViewportDimensions::new(80, 24), t0);
    shell.handle_resize(ViewportDimensions::new(81, 24), t0 + ms(10));
    shell.handle_scroll(5, t0 + ms(20));

    assert_eq!(shell.next_deadline(), Some(t0 + ms(120)));
}
