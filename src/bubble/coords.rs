//! Conversions between the three coordinate spaces.
//!
//! - Screen space: logical window pixels, y grows downward.
//! - Panel space: `0..100` across the panel's on-screen box. Overlays are
//!   stored in this space.
//! - Shape space: `0..100` across one bubble's box, fed to the generator.
//!
//! Every conversion that divides by a size goes through a constructor or
//! method that returns `None` for zero sizes.

use bevy::math::Vec2;

/// The on-screen box of a panel for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelBounds {
    origin: Vec2,
    size: Vec2,
}

impl PanelBounds {
    /// `None` while the panel has no usable size (not laid out yet).
    pub fn new(origin: Vec2, size: Vec2) -> Option<Self> {
        let usable = origin.is_finite() && size.is_finite() && size.x > 0.0 && size.y > 0.0;
        usable.then_some(Self { origin, size })
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn contains(&self, screen: Vec2) -> bool {
        let max = self.origin + self.size;
        screen.x >= self.origin.x && screen.x <= max.x && screen.y >= self.origin.y && screen.y <= max.y
    }

    pub fn screen_to_percent(&self, screen: Vec2) -> Vec2 {
        (screen - self.origin) / self.size * 100.0
    }

    /// A pointer movement in pixels as a movement in panel percent.
    pub fn delta_to_percent(&self, delta: Vec2) -> Vec2 {
        delta / self.size * 100.0
    }

    pub fn percent_to_screen(&self, percent: Vec2) -> Vec2 {
        self.origin + percent / 100.0 * self.size
    }
}

/// An overlay's box in panel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl BubbleRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn has_area(&self) -> bool {
        self.w != 0.0 && self.h != 0.0 && self.w.is_finite() && self.h.is_finite()
    }

    /// Panel-space point to shape space. `None` for a zero-sized box.
    pub fn panel_to_local(&self, panel: Vec2) -> Option<Vec2> {
        self.has_area()
            .then(|| (panel - self.origin()) / self.size() * 100.0)
    }

    pub fn local_to_panel(&self, local: Vec2) -> Vec2 {
        self.origin() + local / 100.0 * self.size()
    }

    pub fn contains(&self, panel: Vec2) -> bool {
        panel.x >= self.x && panel.x <= self.x + self.w && panel.y >= self.y && panel.y <= self.y + self.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    fn bounds() -> PanelBounds {
        PanelBounds::new(Vec2::new(100.0, 50.0), Vec2::new(400.0, 200.0)).unwrap()
    }

    #[test]
    fn test_panel_bounds_rejects_zero_size() {
        assert!(PanelBounds::new(Vec2::ZERO, Vec2::new(0.0, 100.0)).is_none());
        assert!(PanelBounds::new(Vec2::ZERO, Vec2::new(100.0, 0.0)).is_none());
        assert!(PanelBounds::new(Vec2::ZERO, Vec2::new(-5.0, 100.0)).is_none());
        assert!(PanelBounds::new(Vec2::ZERO, Vec2::new(f32::INFINITY, 100.0)).is_none());
    }

    #[test]
    fn test_screen_to_percent() {
        let b = bounds();
        assert!(approx(b.screen_to_percent(Vec2::new(100.0, 50.0)), Vec2::ZERO));
        assert!(approx(b.screen_to_percent(Vec2::new(300.0, 150.0)), Vec2::new(50.0, 50.0)));
        assert!(approx(b.screen_to_percent(Vec2::new(500.0, 250.0)), Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_percent_to_screen() {
        let b = bounds();
        assert!(approx(b.percent_to_screen(Vec2::new(25.0, 10.0)), Vec2::new(200.0, 70.0)));
        let back = b.screen_to_percent(b.percent_to_screen(Vec2::new(33.0, 71.0)));
        assert!(approx(back, Vec2::new(33.0, 71.0)));
    }

    #[test]
    fn test_delta_ignores_origin() {
        let b = bounds();
        assert!(approx(b.delta_to_percent(Vec2::new(40.0, -20.0)), Vec2::new(10.0, -10.0)));
    }

    #[test]
    fn test_panel_contains_border() {
        let b = bounds();
        assert!(b.contains(Vec2::new(100.0, 50.0)));
        assert!(b.contains(Vec2::new(500.0, 250.0)));
        assert!(!b.contains(Vec2::new(99.0, 60.0)));
    }

    #[test]
    fn test_panel_to_local() {
        let rect = BubbleRect::new(20.0, 20.0, 60.0, 30.0);
        assert!(approx(rect.panel_to_local(Vec2::new(50.0, 65.0)).unwrap(), Vec2::new(50.0, 150.0)));
        assert!(approx(rect.panel_to_local(Vec2::new(20.0, 20.0)).unwrap(), Vec2::ZERO));
    }

    #[test]
    fn test_local_to_panel() {
        let rect = BubbleRect::new(20.0, 20.0, 60.0, 30.0);
        assert!(approx(rect.local_to_panel(Vec2::new(50.0, 85.0)), Vec2::new(50.0, 45.5)));
    }

    #[test]
    fn test_zero_size_bubble_has_no_local_space() {
        let rect = BubbleRect::new(20.0, 20.0, 0.0, 30.0);
        assert!(rect.panel_to_local(Vec2::new(50.0, 65.0)).is_none());
    }
}
