use dockgrid_common::{Alignment, Anchor, Inset, Position, Size};
use tracing::error;

use crate::child::{ChildConstraints, DockChild};
use crate::engine::{DockLayout, DockLayoutResult};
use crate::error::DockLayoutError;
use crate::options::{LayoutConstraints, LayoutOptions};

/// A docking container that can itself be docked in another one.
///
/// When laid out as a child, the panel runs the engine over its own
/// children inside the offered box minus the offered paddings. A client
/// size grown by its children becomes the panel's resolved size, and
/// overflow its corners could not absorb becomes its padding request, so
/// both reach the parent container.
#[derive(Debug, Clone)]
pub struct DockPanel<C> {
    engine: DockLayout,
    children: Vec<C>,
    anchor: Option<Anchor>,
    alignment: Alignment,
    visible: bool,
    fill_size_minimum: Option<Size>,
    resolved_size: Size,
    position: Position,
    last_layout: Option<DockLayoutResult>,
}

impl<C: DockChild> DockPanel<C> {
    pub fn new(anchor: Anchor, children: Vec<C>) -> Self {
        Self {
            engine: DockLayout::default(),
            children,
            anchor: Some(anchor),
            alignment: Alignment::default(),
            visible: true,
            fill_size_minimum: None,
            resolved_size: Size::ZERO,
            position: Position::default(),
            last_layout: None,
        }
    }

    pub fn with_options(mut self, options: LayoutOptions) -> Result<Self, DockLayoutError> {
        self.engine = DockLayout::new(options)?;
        Ok(self)
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_fill_size_minimum(mut self, minimum: Size) -> Self {
        self.fill_size_minimum = Some(minimum);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn children(&self) -> &[C] {
        &self.children
    }

    pub fn last_layout(&self) -> Option<&DockLayoutResult> {
        self.last_layout.as_ref()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Lays the panel out as the outermost container
    pub fn layout_root(
        &mut self,
        client_size: Size,
        constraints: &LayoutConstraints,
    ) -> Result<&DockLayoutResult, DockLayoutError> {
        let constraints = LayoutConstraints {
            fill_size_minimum: constraints.fill_size_minimum.or(self.fill_size_minimum),
            ..*constraints
        };
        let result = self
            .engine
            .compute_layout(&mut self.children, client_size, &constraints)?;
        self.resolved_size = result.client_size;
        Ok(self.last_layout.insert(result))
    }
}

impl<C: DockChild> DockChild for DockPanel<C> {
    fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    fn alignment(&self) -> Alignment {
        self.alignment
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn layout(&mut self, available: Size, constraints: &ChildConstraints) {
        let client_size = available.shrink(&constraints.paddings);
        let layout_constraints = LayoutConstraints {
            can_change: constraints.can_change,
            fill_size_minimum: self.fill_size_minimum,
        };
        match self
            .engine
            .compute_layout(&mut self.children, client_size, &layout_constraints)
        {
            Ok(result) => {
                self.resolved_size = result.client_size.expand(&constraints.paddings);
                self.last_layout = Some(result);
            }
            Err(err) => {
                error!(%err, "nested dock layout failed");
                self.resolved_size = available;
                self.last_layout = None;
            }
        }
    }

    fn resolved_size(&self) -> Size {
        self.resolved_size
    }

    fn requested_paddings(&self) -> Option<Inset> {
        self.last_layout
            .as_ref()
            .and_then(|layout| layout.requested_own_padding)
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}
