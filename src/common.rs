//! Common types shared across multiple modules.
//!
//! Drag handles are used by the editor's input, controller and render
//! systems, and by the cursor feedback in the UI.

use bevy::window::{CursorIcon, SystemCursorIcon};

/// Corner of a bubble's bounding box.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Corner {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Corner {
    pub fn all() -> &'static [Corner] {
        &[Corner::Nw, Corner::Ne, Corner::Sw, Corner::Se]
    }

    /// Whether dragging this corner moves the left edge.
    pub fn touches_west(&self) -> bool {
        matches!(self, Corner::Nw | Corner::Sw)
    }

    pub fn touches_east(&self) -> bool {
        !self.touches_west()
    }

    /// Whether dragging this corner moves the top edge.
    pub fn touches_north(&self) -> bool {
        matches!(self, Corner::Nw | Corner::Ne)
    }

    pub fn touches_south(&self) -> bool {
        !self.touches_north()
    }
}

/// Which part of a bubble a drag started on.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum DragHandle {
    /// The body: translate the whole bubble
    Move,
    Resize(Corner),
    /// The tail tip
    Tail,
    /// The notch where the tail leaves the body
    TailBase,
}

impl DragHandle {
    /// Get the appropriate cursor icon for this handle.
    pub fn cursor_icon(&self) -> CursorIcon {
        let icon = match self {
            DragHandle::Move => SystemCursorIcon::Move,
            DragHandle::Resize(Corner::Ne | Corner::Sw) => SystemCursorIcon::NeswResize,
            DragHandle::Resize(Corner::Nw | Corner::Se) => SystemCursorIcon::NwseResize,
            DragHandle::Tail => SystemCursorIcon::Crosshair,
            DragHandle::TailBase => SystemCursorIcon::EwResize,
        };
        CursorIcon::System(icon)
    }

    pub fn is_resize(&self) -> bool {
        matches!(self, DragHandle::Resize(_))
    }
}
