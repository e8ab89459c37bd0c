use dockgrid_common::{Alignment, Anchor, Inset, Position, Size};

/// Constraints handed to a child with each `layout` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildConstraints {
    /// Paddings the child must leave free. Side children only receive the
    /// sides along the axis they share with their siblings.
    pub paddings: Inset,

    /// Size that percentages in the child's own configuration resolve against
    pub size_reference: Size,

    /// When `false`, requests for more space or padding are ignored, so the
    /// child should settle for what it is given
    pub can_change: bool,
}

/// A region laid out by the docking engine.
///
/// The engine never owns its children: it calls `layout` repeatedly, reads
/// back the outcome and finally calls `set_position`.
pub trait DockChild {
    /// Docking slot, `None` opts out of layout
    fn anchor(&self) -> Option<Anchor>;

    fn alignment(&self) -> Alignment {
        Alignment::default()
    }

    /// May change as a result of `layout`
    fn is_visible(&self) -> bool {
        true
    }

    fn layout(&mut self, available: Size, constraints: &ChildConstraints);

    /// Size resolved by the last `layout` call. A size larger than what was
    /// available asks the container for more room.
    fn resolved_size(&self) -> Size;

    /// Shared paddings the child needs after the last `layout` call
    fn requested_paddings(&self) -> Option<Inset> {
        None
    }

    /// Content the child lets spill beyond its own box after the last
    /// `layout` call
    fn requested_optional_overflow(&self) -> Option<Inset> {
        None
    }

    fn set_position(&mut self, position: Position);
}

impl<T: DockChild + ?Sized> DockChild for Box<T> {
    fn anchor(&self) -> Option<Anchor> {
        (**self).anchor()
    }

    fn alignment(&self) -> Alignment {
        (**self).alignment()
    }

    fn is_visible(&self) -> bool {
        (**self).is_visible()
    }

    fn layout(&mut self, available: Size, constraints: &ChildConstraints) {
        (**self).layout(available, constraints)
    }

    fn resolved_size(&self) -> Size {
        (**self).resolved_size()
    }

    fn requested_paddings(&self) -> Option<Inset> {
        (**self).requested_paddings()
    }

    fn requested_optional_overflow(&self) -> Option<Inset> {
        (**self).requested_optional_overflow()
    }

    fn set_position(&mut self, position: Position) {
        (**self).set_position(position)
    }
}

impl<T: DockChild + ?Sized> DockChild for &mut T {
    fn anchor(&self) -> Option<Anchor> {
        (**self).anchor()
    }

    fn alignment(&self) -> Alignment {
        (**self).alignment()
    }

    fn is_visible(&self) -> bool {
        (**self).is_visible()
    }

    fn layout(&mut self, available: Size, constraints: &ChildConstraints) {
        (**self).layout(available, constraints)
    }

    fn resolved_size(&self) -> Size {
        (**self).resolved_size()
    }

    fn requested_paddings(&self) -> Option<Inset> {
        (**self).requested_paddings()
    }

    fn requested_optional_overflow(&self) -> Option<Inset> {
        (**self).requested_optional_overflow()
    }

    fn set_position(&mut self, position: Position) {
        (**self).set_position(position)
    }
}
