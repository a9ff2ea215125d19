//! Tuning constants for the docking system.

use fenestra_core::geometry::Size;

/// How close to a window edge the pointer must be for border detection.
pub const BORDER_DETECTION_THRESHOLD: f32 = 25.0;

/// Minimum size of a window panel.
pub const MIN_WINDOW_SIZE: Size<f32> = Size {
    width: 300.0,
    height: 150.0,
};

/// Size given to a freshly created floating window.
pub const DEFAULT_FLOATING_SIZE: Size<f32> = Size {
    width: 400.0,
    height: 400.0,
};

/// Lower clamp for a split ratio, in percent of the first child's share.
pub const RATIO_MIN: f32 = 10.0;

/// Upper clamp for a split ratio, in percent of the first child's share.
pub const RATIO_MAX: f32 = 90.0;

/// Ratio assigned to a freshly created split.
pub const RATIO_DEFAULT: f32 = 50.0;

/// Height of the tab strip band at the top of a leaf panel.
pub const TAB_STRIP_HEIGHT: f32 = 22.0;

/// Coarse drag-snap grid for floating windows.
pub const SNAP_GRID_COARSE: f32 = 25.0;

/// Fine drag-snap grid for floating windows.
pub const SNAP_GRID_FINE: f32 = 10.0;

/// Height reserved for the menu bar above the docked area.
pub const MENU_BAR_HEIGHT: f32 = 40.0;
