//! In-page table of contents with scroll-spy.
//!
//! [`ScrollSpy`] owns a fixed list of [`TocEntry`] items and a
//! [`ScrollState`]. While mounted it listens on the page's
//! [`ScrollSignal`](crate::signal::ScrollSignal) and recomputes which section
//! is active and whether the floating list should be shown.

use std::cell::RefCell;
use std::rc::Rc;

use crate::signal::{AnchorLookup, ScrollEvent, ScrollSignal, Subscription};

/// Scroll offset (px) below which the navigator renders nothing.
pub const VISIBILITY_THRESHOLD_PX: u32 = 300;

/// Margin (px) added to the scroll offset before comparing against section
/// tops, so a section activates slightly before it reaches the top edge.
pub const LOOKAHEAD_PX: u32 = 100;

/// One navigable section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Section anchor id, unique within the page
    pub id: String,
    /// Display title (already translated)
    pub title: String,
    /// Nesting depth
    pub level: u8,
}

impl TocEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            level: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub active_section_id: Option<String>,
    pub visible: bool,
}

/// Index of the active entry for a given scroll offset.
///
/// Scans from the last entry to the first and returns the first one whose
/// anchor top is at or above `scroll_y + lookahead`. Entries without an
/// anchor on the page are skipped. When two sections share an offset the
/// later one wins.
pub fn active_entry(
    entries: &[TocEntry],
    anchors: &dyn AnchorLookup,
    scroll_y: u32,
    lookahead: u32,
) -> Option<usize> {
    let adjusted = scroll_y.saturating_add(lookahead);
    entries
        .iter()
        .enumerate()
        .rev()
        .find(|(_, entry)| {
            anchors
                .anchor_top(&entry.id)
                .is_some_and(|top| top <= adjusted)
        })
        .map(|(idx, _)| idx)
}

/// Whether the navigator is shown at this raw scroll offset.
pub const fn is_visible(scroll_y: u32, threshold: u32) -> bool {
    scroll_y >= threshold
}

/// Tunables for the scroll-spy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpyConfig {
    pub visibility_threshold: u32,
    pub lookahead: u32,
}

impl Default for SpyConfig {
    fn default() -> Self {
        Self {
            visibility_threshold: VISIBILITY_THRESHOLD_PX,
            lookahead: LOOKAHEAD_PX,
        }
    }
}

/// The floating scroll-spy navigator.
#[derive(Debug, Default)]
pub struct ScrollSpy {
    entries: Rc<[TocEntry]>,
    state: Rc<RefCell<ScrollState>>,
    config: SpyConfig,
    subscription: Option<Subscription>,
}

impl ScrollSpy {
    pub fn new(entries: Vec<TocEntry>) -> Self {
        Self::with_config(entries, SpyConfig::default())
    }

    pub fn with_config(entries: Vec<TocEntry>, config: SpyConfig) -> Self {
        Self {
            entries: entries.into(),
            state: Rc::new(RefCell::new(ScrollState::default())),
            config,
            subscription: None,
        }
    }

    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    /// Snapshot of the current scroll state.
    pub fn state(&self) -> ScrollState {
        self.state.borrow().clone()
    }

    pub const fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Start listening for scroll events. Mounting twice keeps a single
    /// subscription.
    pub fn mount(&mut self, signal: &ScrollSignal) {
        if self.subscription.is_some() {
            return;
        }
        let entries = Rc::clone(&self.entries);
        let state = Rc::clone(&self.state);
        let config = self.config;
        self.subscription = Some(signal.subscribe(move |event: &ScrollEvent<'_>| {
            let next = compute_state(&entries, event, config);
            let mut current = state.borrow_mut();
            if *current != next {
                crate::perf::log_event(
                    "toc.state",
                    format!(
                        "scroll_y={} active={:?} visible={}",
                        event.scroll_y, next.active_section_id, next.visible
                    ),
                );
                *current = next;
            }
        }));
        tracing::debug!(entries = self.entries.len(), "scroll-spy mounted");
    }

    /// Stop listening. The last computed state is kept but never updated
    /// again until the next mount.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
            tracing::debug!("scroll-spy unmounted");
        }
    }

    /// Entries to render with their active flag, or `None` while hidden.
    pub fn visible_items(&self) -> Option<Vec<(&TocEntry, bool)>> {
        let state = self.state.borrow();
        if !state.visible {
            return None;
        }
        Some(
            self.entries
                .iter()
                .map(|entry| {
                    let active = state.active_section_id.as_deref() == Some(entry.id.as_str());
                    (entry, active)
                })
                .collect(),
        )
    }

    /// Section id for a click on the entry at `index`.
    pub fn section_for_click(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|entry| entry.id.as_str())
    }
}

impl Drop for ScrollSpy {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn compute_state(entries: &[TocEntry], event: &ScrollEvent<'_>, config: SpyConfig) -> ScrollState {
    let active = active_entry(entries, event.anchors, event.scroll_y, config.lookahead);
    ScrollState {
        active_section_id: active.map(|idx| entries[idx].id.clone()),
        visible: is_visible(event.scroll_y, config.visibility_threshold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn three_sections() -> Vec<TocEntry> {
        vec![
            TocEntry::new("intro", "Introduction"),
            TocEntry::new("middle", "Middle"),
            TocEntry::new("end", "End"),
        ]
    }

    const ANCHORS: [(&str, u32); 3] = [("intro", 0), ("middle", 300), ("end", 600)];

    fn scroll(signal: &ScrollSignal, scroll_y: u32) {
        signal.emit(&ScrollEvent {
            scroll_y,
            anchors: &ANCHORS,
        });
    }

    #[test]
    fn test_active_section_uses_lookahead() {
        let entries = three_sections();
        let idx = active_entry(&entries, &ANCHORS, 350, LOOKAHEAD_PX);
        assert_eq!(idx, Some(1));
    }

    #[test]
    fn test_section_activates_before_reaching_top() {
        let entries = three_sections();
        assert_eq!(active_entry(&entries, &ANCHORS, 500, LOOKAHEAD_PX), Some(2));
        assert_eq!(active_entry(&entries, &ANCHORS, 499, LOOKAHEAD_PX), Some(1));
    }

    #[test]
    fn test_nothing_active_above_first_section() {
        let entries = three_sections();
        let anchors = [("intro", 400_u32), ("middle", 800), ("end", 1200)];
        assert_eq!(active_entry(&entries, &anchors, 0, LOOKAHEAD_PX), None);
    }

    #[test]
    fn test_tie_resolves_to_later_section() {
        let entries = three_sections();
        let anchors = [("intro", 0_u32), ("middle", 200), ("end", 200)];
        assert_eq!(active_entry(&entries, &anchors, 150, LOOKAHEAD_PX), Some(2));
    }

    #[test]
    fn test_missing_anchor_is_skipped() {
        let entries = three_sections();
        let anchors = [("intro", 0_u32), ("middle", 300)];
        assert_eq!(active_entry(&entries, &anchors, 2000, LOOKAHEAD_PX), Some(1));
    }

    #[test]
    fn test_hidden_below_threshold() {
        let signal = ScrollSignal::new();
        let mut spy = ScrollSpy::new(three_sections());
        spy.mount(&signal);

        scroll(&signal, 299);
        assert!(spy.visible_items().is_none());
        assert!(!spy.state().visible);
    }

    #[test]
    fn test_visible_at_threshold_with_one_active_entry() {
        let signal = ScrollSignal::new();
        let mut spy = ScrollSpy::new(three_sections());
        spy.mount(&signal);

        scroll(&signal, 350);
        let items = spy.visible_items().expect("visible at 350");
        assert_eq!(items.len(), 3);
        let active: Vec<_> = items.iter().filter(|(_, a)| *a).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].0.id, "middle");
    }

    #[test]
    fn test_mount_twice_keeps_single_subscription() {
        let signal = ScrollSignal::new();
        let mut spy = ScrollSpy::new(three_sections());
        spy.mount(&signal);
        spy.mount(&signal);
        assert_eq!(signal.listener_count(), 1);
    }

    #[test]
    fn test_unmount_releases_subscription_and_freezes_state() {
        let signal = ScrollSignal::new();
        let mut spy = ScrollSpy::new(three_sections());
        spy.mount(&signal);
        scroll(&signal, 350);
        let before = spy.state();

        spy.unmount();
        assert_eq!(signal.listener_count(), 0);
        assert!(!spy.is_mounted());

        scroll(&signal, 900);
        assert_eq!(spy.state(), before);
    }

    #[test]
    fn test_dropping_spy_releases_subscription() {
        let signal = ScrollSignal::new();
        {
            let mut spy = ScrollSpy::new(three_sections());
            spy.mount(&signal);
            assert_eq!(signal.listener_count(), 1);
        }
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn test_reflowed_layout_is_used_on_next_event() {
        let signal = ScrollSignal::new();
        let mut spy = ScrollSpy::new(three_sections());
        spy.mount(&signal);
        scroll(&signal, 350);
        assert_eq!(spy.state().active_section_id.as_deref(), Some("middle"));

        let reflowed = [("intro", 0_u32), ("middle", 700), ("end", 1400)];
        signal.emit(&ScrollEvent {
            scroll_y: 350,
            anchors: &reflowed,
        });
        assert_eq!(spy.state().active_section_id.as_deref(), Some("intro"));
    }

    proptest! {
        #[test]
        fn hidden_for_all_offsets_below_threshold(scroll_y in 0..VISIBILITY_THRESHOLD_PX) {
            let signal = ScrollSignal::new();
            let mut spy = ScrollSpy::new(three_sections());
            spy.mount(&signal);
            scroll(&signal, scroll_y);
            prop_assert!(spy.visible_items().is_none());
        }

        #[test]
        fn full_list_with_at_most_one_active(scroll_y in VISIBILITY_THRESHOLD_PX..100_000u32) {
            let signal = ScrollSignal::new();
            let mut spy = ScrollSpy::new(three_sections());
            spy.mount(&signal);
            scroll(&signal, scroll_y);
            let items = spy.visible_items().unwrap();
            prop_assert_eq!(items.len(), 3);
            prop_assert!(items.iter().filter(|(_, active)| *active).count() <= 1);
        }
    }
}
