//! Fenestra Dock - dockable, tab-based window management.
//!
//! This crate provides the split-tree docking model behind a window
//! manager UI:
//! - Windows float or dock into a binary split tree
//! - Tabs drag between strips, merge into groups, or split windows
//! - Shared split borders drag to resize, clamped to a sane band
//! - The whole forest persists as named, versioned binary layouts
//!
//! Rendering, input delivery and the content inside a panel are out of
//! scope: embedders feed pointer positions in and read rects back out.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fenestra_dock::{DockManager, ManagerConfig};
//!
//! let mut manager = DockManager::new(ManagerConfig::default()).unwrap();
//! // manager.register_content(...) for each panel type, then:
//! // let hierarchy = manager.create_window("hierarchy")?;
//! // manager.pointer_moved(...); manager.tick(dt);
//! ```

pub mod border;
pub mod constants;
pub mod content;
pub mod dirty;
pub mod drag;
pub mod gesture;
pub mod manager;
pub mod node;
pub mod ops;
pub mod snapshot;
pub mod store;
pub mod tabs;
pub mod tree;

pub use border::{closest_border, draggable_split};
pub use content::{ContentError, ContentHandle, ContentId, ContentPrototype, ContentRegistry};
pub use dirty::DirtyFlags;
pub use drag::{DragKind, DragSession, SnapMode, TabDrag};
pub use manager::{DockManager, ManagerConfig, ManagerError};
pub use node::{Border, DockKind, DockNode, LayoutType};
pub use ops::{DockError, DockResult};
pub use snapshot::{Layout, LayoutSnapshot, ManagerIndex, TabSnapshot, SCHEMA_VERSION};
pub use store::{LayoutStore, StoreError};
pub use tabs::{Tab, TabStrip};
pub use tree::{DockTree, NodeId};

// Re-export the geometry types the public surface speaks in.
pub use fenestra_core::geometry::{Rect, Size};
pub use fenestra_core::math::Vec2;
