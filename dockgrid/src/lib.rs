//! Docking grid layout.
//!
//! Regions dock on the top, bottom, left or right side of a container, or
//! fill what remains in the center. [`DockLayout::compute_layout`] negotiates
//! their sizes: it settles the margins claimed by side regions, then the
//! paddings shared by all regions, growing its own client size when a region
//! does not fit.

pub mod child;
pub mod convergence;
pub mod engine;
pub mod error;
pub mod options;
pub mod panel;
pub mod region;

pub use child::{ChildConstraints, DockChild};
pub use convergence::{ConvergenceTracker, LayoutChanges, LayoutDiagnostics};
pub use dockgrid_common::{Alignment, Anchor, Axis, Inset, Position, Rect, Side, Size};
pub use engine::{DockLayout, DockLayoutResult};
pub use error::DockLayoutError;
pub use options::{LayoutConstraints, LayoutOptions};
pub use panel::DockPanel;
pub use region::{RegionSpec, StaticRegion};
