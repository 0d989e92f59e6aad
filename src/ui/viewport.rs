//! Viewport management for scrolling.
//!
//! The [`Viewport`] tracks the visible rows of the page body. Offsets are
//! kept in lines; [`Viewport::scroll_y_px`] converts to the pixel space the
//! section anchors live in.

use std::ops::Range;

use crate::site::line_to_px;

/// Fraction of the remaining distance covered per animation step.
const SMOOTH_SCROLL_DIVISOR: usize = 3;

/// Manages the visible portion of a page.
///
/// # Example
///
/// ```
/// use contextsite::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 24, 100);
/// assert_eq!(vp.visible_range(), 0..24);
///
/// vp.scroll_down(10);
/// assert_eq!(vp.visible_range(), 10..34);
/// assert_eq!(vp.scroll_y_px(), 200);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    /// Create a viewport `width` columns wide showing `height` rows of a
    /// page that is `total_lines` long.
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
        }
    }

    /// First visible line.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Vertical scroll offset in layout pixels.
    pub fn scroll_y_px(&self) -> u32 {
        line_to_px(self.offset)
    }

    /// Range of visible lines, clamped to the page.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset;
        let end = (self.offset + self.height as usize).min(self.total_lines);
        start..end
    }

    /// Scroll percentage (0-100).
    pub fn scroll_percent(&self) -> u8 {
        let max_offset = self.max_offset();
        if self.total_lines == 0 || max_offset == 0 {
            return 100;
        }

        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            ((self.offset as f64 / max_offset as f64) * 100.0).round() as u8
        }
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    pub const fn half_page_up(&mut self) {
        self.scroll_up(self.height as usize / 2);
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down(self.height as usize / 2);
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Put `line` at the top of the viewport, as far as the page allows.
    pub fn go_to_line(&mut self, line: usize) {
        self.offset = self.clamp_line(line);
    }

    /// The offset the viewport would settle at for `line`.
    pub fn clamp_line(&self, line: usize) -> usize {
        line.min(self.max_offset())
    }

    /// Advance one smooth-scroll step toward `target`.
    ///
    /// Each step covers a third of the remaining distance (at least one
    /// line). Returns `true` while the target has not been reached.
    pub fn step_toward(&mut self, target: usize) -> bool {
        let target = self.clamp_line(target);
        let distance = self.offset.abs_diff(target);
        if distance == 0 {
            return false;
        }
        let step = (distance / SMOOTH_SCROLL_DIVISOR).max(1);
        if target > self.offset {
            self.offset += step;
        } else {
            self.offset -= step;
        }
        self.offset != target
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the page length after a reflow.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_viewport_starts_at_top() {
        let vp = Viewport::new(80, 24, 100);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.scroll_y_px(), 0);
    }

    #[test]
    fn test_visible_range_at_bottom() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.go_to_bottom();
        assert_eq!(vp.visible_range(), 76..100);
    }

    #[test]
    fn test_visible_range_with_short_page() {
        let vp = Viewport::new(80, 24, 10);
        assert_eq!(vp.visible_range(), 0..10);
        assert!(!vp.can_scroll_down());
    }

    #[test]
    fn test_scroll_y_tracks_offset_in_pixels() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.scroll_down(15);
        assert_eq!(vp.scroll_y_px(), 300);
    }

    #[test]
    fn test_scroll_down_clamps_to_max() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.scroll_down(1000);
        assert_eq!(vp.offset(), 76);
    }

    #[test]
    fn test_scroll_up_clamps_to_zero() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.scroll_down(10);
        vp.scroll_up(100);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_page_and_half_page() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.page_down();
        assert_eq!(vp.offset(), 24);
        vp.half_page_down();
        assert_eq!(vp.offset(), 36);
        vp.half_page_up();
        vp.page_up();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_go_to_line_clamps() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.go_to_line(50);
        assert_eq!(vp.offset(), 50);
        vp.go_to_line(1000);
        assert_eq!(vp.offset(), 76);
    }

    #[test]
    fn test_scroll_percent() {
        let mut vp = Viewport::new(80, 24, 100);
        assert_eq!(vp.scroll_percent(), 0);
        vp.go_to_bottom();
        assert_eq!(vp.scroll_percent(), 100);
        assert_eq!(Viewport::new(80, 24, 0).scroll_percent(), 100);
    }

    #[test]
    fn test_step_toward_reaches_target() {
        let mut vp = Viewport::new(80, 24, 100);
        let mut steps = 0;
        while vp.step_toward(40) {
            steps += 1;
            assert!(steps < 100, "animation never settled");
        }
        assert_eq!(vp.offset(), 40);
        assert!(steps > 1, "should animate over several steps");
    }

    #[test]
    fn test_step_toward_scrolls_back_up() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.go_to_line(60);
        while vp.step_toward(3) {}
        assert_eq!(vp.offset(), 3);
    }

    #[test]
    fn test_step_toward_unreachable_target_settles_at_bottom() {
        let mut vp = Viewport::new(80, 24, 100);
        while vp.step_toward(99) {}
        assert_eq!(vp.offset(), 76);
        assert!(!vp.step_toward(99));
    }

    #[test]
    fn test_resize_keeps_valid_offset() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.scroll_down(50);
        vp.resize(80, 60);
        assert_eq!(vp.offset(), 40);
    }

    #[test]
    fn test_set_total_lines_adjusts_offset() {
        let mut vp = Viewport::new(80, 24, 100);
        vp.scroll_down(80);
        vp.set_total_lines(50);
        assert_eq!(vp.offset(), 26);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scroll_never_exceeds_bounds(
                total_lines in 1..10000usize,
                height in 1..100u16,
                scroll_amount in 0..10000usize,
            ) {
                let mut vp = Viewport::new(80, height, total_lines);
                vp.scroll_down(scroll_amount);

                let max = total_lines.saturating_sub(height as usize);
                prop_assert!(vp.offset() <= max);
            }

            #[test]
            fn visible_range_within_bounds(
                total_lines in 0..10000usize,
                height in 1..100u16,
                offset in 0..10000usize,
            ) {
                let mut vp = Viewport::new(80, height, total_lines);
                vp.scroll_down(offset);

                let range = vp.visible_range();
                prop_assert!(range.start <= range.end);
                prop_assert!(range.end <= total_lines);
            }

            #[test]
            fn smooth_scroll_always_settles(
                total_lines in 0..2000usize,
                height in 1..60u16,
                start in 0..2000usize,
                target in 0..4000usize,
            ) {
                let mut vp = Viewport::new(80, height, total_lines);
                vp.go_to_line(start);
                let mut steps = 0;
                while vp.step_toward(target) {
                    steps += 1;
                    prop_assert!(steps < 200);
                }
                prop_assert_eq!(vp.offset(), vp.clamp_line(target));
            }
        }
    }
}
