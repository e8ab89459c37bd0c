pub mod anchor;
pub mod types;

pub use anchor::{Alignment, Anchor, Axis, Side};
pub use types::{Inset, InsetKey, Position, Rect, Size};
