//! Scrollable content region and the virtualized track list inside it.
//!
//! [`ContentPane`] plays the scroll container: it owns the offset, clamps
//! it to the content extent and queues a scroll event whenever the offset
//! changes, whether from a key press or from an imperative `scroll_to`.
//! [`TrackList`] is the virtual list: it only learns the offset through
//! the layout channel and windows its rows from there.

use crate::state::{ScrollContainer, VirtualList};

/// The scroll container. Offsets are in rows.
#[derive(Debug, Default)]
pub struct ContentPane {
    offset: u32,
    max_offset: u32,
    viewport_rows: u32,
    scroll_events: Vec<u32>,
}

impl ContentPane {
    /// Empty pane at the top.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current offset.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Largest reachable offset.
    pub fn max_offset(&self) -> u32 {
        self.max_offset
    }

    /// Rows that fit on screen.
    pub fn viewport_rows(&self) -> u32 {
        self.viewport_rows
    }

    /// Update the extent after a layout change. An offset past the new end
    /// is clamped and reported like any other scroll.
    pub fn set_extent(&mut self, total_rows: u32, viewport_rows: u32) {
        self.viewport_rows = viewport_rows;
        self.max_offset = total_rows.saturating_sub(viewport_rows);
        if self.offset > self.max_offset {
            self.move_to(self.max_offset);
        }
    }

    /// A new view was mounted: back to the top without a scroll event.
    pub fn reset(&mut self) {
        self.offset = 0;
        self.scroll_events.clear();
    }

    /// Scroll by `delta` rows, clamped.
    pub fn scroll_by(&mut self, delta: i64) {
        let target = (i64::from(self.offset) + delta).clamp(0, i64::from(self.max_offset));
        self.move_to(u32::try_from(target).unwrap_or(self.max_offset));
    }

    /// Scroll by one page in either direction.
    pub fn page(&mut self, down: bool) {
        let page = i64::from(self.viewport_rows.max(1));
        self.scroll_by(if down { page } else { -page });
    }

    /// Jump to the top.
    pub fn scroll_to_top(&mut self) {
        self.move_to(0);
    }

    /// Jump to the last reachable offset.
    pub fn scroll_to_end(&mut self) {
        self.move_to(self.max_offset);
    }

    /// Scroll events produced since the last call, oldest first.
    pub fn take_scroll_events(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.scroll_events)
    }

    fn move_to(&mut self, offset: u32) {
        let offset = offset.min(self.max_offset);
        if offset != self.offset {
            self.offset = offset;
            self.scroll_events.push(offset);
        }
    }
}

impl ScrollContainer for ContentPane {
    fn scroll_to(&mut self, offset: u32) {
        self.move_to(offset);
    }
}

/// The virtualized list. Renders from whatever offset it was last told.
#[derive(Debug, Default)]
pub struct TrackList {
    first_visible: u32,
}

impl TrackList {
    /// List at the top.
    pub fn new() -> Self {
        Self::default()
    }

    /// First row to render.
    pub fn first_visible(&self) -> u32 {
        self.first_visible
    }

    /// Index range of rows to render for `visible` rows out of `total`.
    pub fn window(&self, visible: usize, total: usize) -> std::ops::Range<usize> {
        let start = (self.first_visible as usize).min(total);
        start..(start + visible).min(total)
    }
}

impl VirtualList for TrackList {
    fn scroll_to(&mut self, offset: u32) {
        self.first_visible = offset;
    }
}
