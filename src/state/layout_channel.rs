//! Settings and virtualization registration shared with descendant views.

use crate::model::LayoutSettings;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::debug;

/// A windowed list that renders only the rows around an offset.
pub trait VirtualList {
    /// Align the list's window with the outer container's scroll offset.
    fn scroll_to(&mut self, offset: u32);
}

/// Shared handle to a registered virtual list.
pub type VirtualListHandle = Rc<RefCell<dyn VirtualList>>;

/// Callback returning the list currently owned by a descendant view.
///
/// Returning `None` is valid: the descendant may have torn down its list.
/// Built with [`VirtualizationAccessor::from_weak`], the accessor goes
/// dead on its own when the owning view drops the list.
pub struct VirtualizationAccessor {
    get: Box<dyn Fn() -> Option<VirtualListHandle>>,
}

impl VirtualizationAccessor {
    /// Wrap an arbitrary lookup.
    pub fn new(get: impl Fn() -> Option<VirtualListHandle> + 'static) -> Self {
        Self { get: Box::new(get) }
    }

    /// Accessor that resolves while the owner keeps its `Rc` alive.
    pub fn from_weak(list: Weak<RefCell<dyn VirtualList>>) -> Self {
        Self::new(move || list.upgrade())
    }

    /// Resolve the list, if it still exists.
    pub fn list(&self) -> Option<VirtualListHandle> {
        (self.get)()
    }

    /// Forward an offset to the list. Returns whether a list received it.
    ///
    /// A list that is mid-borrow (re-entrant call from its own render) is
    /// skipped rather than waited on.
    pub fn scroll_to(&self, offset: u32) -> bool {
        let Some(list) = self.list() else {
            debug!(offset, "Scroll not forwarded: no live list");
            return false;
        };
        let Ok(mut list) = list.try_borrow_mut() else {
            debug!(offset, "Scroll not forwarded: list busy");
            return false;
        };
        list.scroll_to(offset);
        true
    }
}

impl fmt::Debug for VirtualizationAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualizationAccessor")
            .field("live", &self.list().is_some())
            .finish()
    }
}

/// Settings record plus the single virtualization slot.
///
/// # Registration
/// The slot holds at most one accessor. The last registration wins; an
/// earlier one is silently superseded. There is no explicit unregister:
/// a torn-down descendant leaves behind an accessor that resolves to `None`.
///
/// # Revisions
/// Every registration or merge bumps [`revision`](Self::revision), which
/// the render tree compares to decide whether channel consumers redraw.
#[derive(Debug, Default)]
pub struct LayoutSettingsChannel {
    settings: LayoutSettings,
    accessor: Option<VirtualizationAccessor>,
    revision: u64,
}

impl LayoutSettingsChannel {
    /// Channel seeded with the given settings and an empty slot.
    pub fn new(settings: LayoutSettings) -> Self {
        Self {
            settings,
            accessor: None,
            revision: 0,
        }
    }

    /// Current settings.
    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// The registered accessor, if any.
    pub fn accessor(&self) -> Option<&VirtualizationAccessor> {
        self.accessor.as_ref()
    }

    /// True when an accessor is registered and its list is still alive.
    pub fn has_live_list(&self) -> bool {
        self.accessor.as_ref().is_some_and(|a| a.list().is_some())
    }

    /// Put `accessor` in the slot, superseding any previous registration.
    pub fn register_accessor(&mut self, accessor: VirtualizationAccessor) {
        if self.accessor.is_some() {
            debug!("Virtualization accessor superseded");
        }
        self.accessor = Some(accessor);
        self.revision += 1;
    }

    /// Shallow-merge `partial` into the settings.
    pub fn merge_settings(&mut self, partial: LayoutSettings) {
        self.settings.merge(partial);
        self.revision += 1;
    }

    /// Change counter for consumers.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::settings::{COMPACT, HAS_IMAGE};

    #[derive(Default)]
    struct RecordingList {
        offsets: Vec<u32>,
    }

    impl VirtualList for RecordingList {
        fn scroll_to(&mut self, offset: u32) {
            self.offsets.push(offset);
        }
    }

    fn register(channel: &mut LayoutSettingsChannel, list: &Rc<RefCell<RecordingList>>) {
        let handle: VirtualListHandle = list.clone();
        channel.register_accessor(VirtualizationAccessor::from_weak(Rc::downgrade(&handle)));
    }

    #[test]
    fn starts_with_default_settings_and_no_accessor() {
        let channel = LayoutSettingsChannel::default();
        assert_eq!(channel.settings().get_bool(HAS_IMAGE), Some(false));
        assert!(channel.accessor().is_none());
        assert_eq!(channel.revision(), 0);
    }

    #[test]
    fn merge_settings_shallow_merges_and_bumps_revision() {
        let mut channel = LayoutSettingsChannel::default();
        channel.merge_settings(LayoutSettings::empty().with(COMPACT, true));

        assert_eq!(channel.settings().get_bool(COMPACT), Some(true));
        assert_eq!(channel.settings().get_bool(HAS_IMAGE), Some(false));
        assert_eq!(channel.revision(), 1);
    }

    #[test]
    fn accessor_forwards_to_live_list() {
        let mut channel = LayoutSettingsChannel::default();
        let list = Rc::new(RefCell::new(RecordingList::default()));
        register(&mut channel, &list);

        assert!(channel.accessor().unwrap().scroll_to(42));
        assert_eq!(list.borrow().offsets, vec![42]);
    }

    #[test]
    fn last_registration_wins() {
        let mut channel = LayoutSettingsChannel::default();
        let first = Rc::new(RefCell::new(RecordingList::default()));
        let second = Rc::new(RefCell::new(RecordingList::default()));
        register(&mut channel, &first);
        register(&mut channel, &second);

        channel.accessor().unwrap().scroll_to(7);
        assert!(first.borrow().offsets.is_empty());
        assert_eq!(second.borrow().offsets, vec![7]);
        assert_eq!(channel.revision(), 2);
    }

    #[test]
    fn dropped_list_makes_forwarding_a_noop() {
        let mut channel = LayoutSettingsChannel::default();
        let list = Rc::new(RefCell::new(RecordingList::default()));
        register(&mut channel, &list);
        drop(list);

        assert!(!channel.has_live_list());
        assert!(!channel.accessor().unwrap().scroll_to(10));
    }

    #[test]
    fn busy_list_is_skipped() {
        let mut channel = LayoutSettingsChannel::default();
        let list = Rc::new(RefCell::new(RecordingList::default()));
        register(&mut channel, &list);

        let _guard = list.borrow_mut();
        assert!(!channel.accessor().unwrap().scroll_to(10));
    }

    #[test]
    fn closure_accessor_can_resolve_to_none() {
        let accessor = VirtualizationAccessor::new(|| None);
        assert!(accessor.list().is_none());
        assert!(!accessor.scroll_to(1));
    }
}
