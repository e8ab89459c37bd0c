use std::str::FromStr;

use dockgrid_common::{Alignment, Anchor, Axis, Inset, Position, Size};
use serde::{Deserialize, Serialize};

use crate::child::{ChildConstraints, DockChild};
use crate::error::DockLayoutError;

/// Declarative description of a [`StaticRegion`], e.g. from a chart config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RegionSpec {
    #[serde(default)]
    pub anchor: Option<String>,
    #[serde(default)]
    pub alignment: Option<String>,
    pub width: f32,
    pub height: f32,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub paddings: Option<Inset>,
    #[serde(default)]
    pub overflow: Option<Inset>,
}

fn default_visible() -> bool {
    true
}

/// A region with a fixed natural size, such as a title or a legend that
/// was measured beforehand.
///
/// Along an axis where it fills, the region takes whatever it is offered
/// but never less than its natural length.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticRegion {
    anchor: Option<Anchor>,
    alignment: Alignment,
    visible: bool,
    natural_size: Size,
    paddings: Option<Inset>,
    overflow: Option<Inset>,
    resolved_size: Size,
    position: Position,
    last_constraints: Option<ChildConstraints>,
    layout_calls: usize,
}

impl StaticRegion {
    pub fn new(anchor: Anchor, width: f32, height: f32) -> Self {
        Self {
            anchor: Some(anchor),
            alignment: Alignment::default(),
            visible: true,
            natural_size: Size::new(width, height),
            paddings: None,
            overflow: None,
            resolved_size: Size::ZERO,
            position: Position::default(),
            last_constraints: None,
            layout_calls: 0,
        }
    }

    /// A region that opts out of layout
    pub fn unanchored(width: f32, height: f32) -> Self {
        Self {
            anchor: None,
            ..Self::new(Anchor::Fill, width, height)
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_paddings(mut self, paddings: Inset) -> Self {
        self.paddings = Some(paddings);
        self
    }

    pub fn with_overflow(mut self, overflow: Inset) -> Self {
        self.overflow = Some(overflow);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn natural_size(&self) -> Size {
        self.natural_size
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn last_constraints(&self) -> Option<&ChildConstraints> {
        self.last_constraints.as_ref()
    }

    pub fn layout_calls(&self) -> usize {
        self.layout_calls
    }

    fn fills(&self, axis: Axis) -> bool {
        match self.anchor {
            None => false,
            // Side regions keep their natural thickness
            Some(anchor) if anchor.orthogonal_axis() == Some(axis) => false,
            Some(_) => self.alignment == Alignment::Fill,
        }
    }
}

impl TryFrom<RegionSpec> for StaticRegion {
    type Error = DockLayoutError;

    fn try_from(spec: RegionSpec) -> Result<Self, Self::Error> {
        let anchor = spec
            .anchor
            .as_deref()
            .map(|name| {
                Anchor::from_str(name).map_err(|_| DockLayoutError::UnknownAnchor(name.to_string()))
            })
            .transpose()?;
        let alignment = spec
            .alignment
            .as_deref()
            .map(|name| {
                Alignment::from_str(name)
                    .map_err(|_| DockLayoutError::UnknownAlignment(name.to_string()))
            })
            .transpose()?
            .unwrap_or_default();

        let mut region = match anchor {
            Some(anchor) => StaticRegion::new(anchor, spec.width, spec.height),
            None => StaticRegion::unanchored(spec.width, spec.height),
        };
        region.alignment = alignment;
        region.visible = spec.visible;
        region.paddings = spec.paddings;
        region.overflow = spec.overflow;
        Ok(region)
    }
}

impl DockChild for StaticRegion {
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
        self.layout_calls += 1;
        self.last_constraints = Some(*constraints);

        let length = |axis: Axis| {
            let natural = self.natural_size.get(axis);
            if self.fills(axis) {
                natural.max(available.get(axis))
            } else {
                natural
            }
        };
        let resolved = Size::new(length(Axis::Width), length(Axis::Height));
        self.resolved_size = resolved;
    }

    fn resolved_size(&self) -> Size {
        self.resolved_size
    }

    fn requested_paddings(&self) -> Option<Inset> {
        self.paddings
    }

    fn requested_optional_overflow(&self) -> Option<Inset> {
        self.overflow
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}
