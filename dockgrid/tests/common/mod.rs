#![allow(dead_code)]

use dockgrid::{Alignment, Anchor, Axis, ChildConstraints, DockChild, Inset, Position, Size};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// How a scripted child answers padding negotiation
#[derive(Debug, Clone, Copy)]
pub enum PaddingBehavior {
    Quiet,
    Fixed(Inset),
    /// Always asks for `delta` more on every side than it was given
    GrowBy(f32),
    /// Asks for `delta` times the call count more than it was given
    Accelerate(f32),
}

/// A child that records every call and can script its answers
#[derive(Debug, Clone)]
pub struct ScriptedChild {
    anchor: Option<Anchor>,
    alignment: Alignment,
    natural: Size,
    thicknesses: Vec<f32>,
    paddings: PaddingBehavior,
    overflow: Option<Inset>,
    hide_after: Option<usize>,
    resolved: Size,
    requested: Option<Inset>,
    pub calls: Vec<(Size, ChildConstraints)>,
    pub position: Option<Position>,
}

impl ScriptedChild {
    pub fn new(anchor: Anchor, width: f32, height: f32) -> Self {
        Self {
            anchor: Some(anchor),
            alignment: Alignment::Fill,
            natural: Size::new(width, height),
            thicknesses: vec![],
            paddings: PaddingBehavior::Quiet,
            overflow: None,
            hide_after: None,
            resolved: Size::ZERO,
            requested: None,
            calls: vec![],
            position: None,
        }
    }

    pub fn side(anchor: Anchor, thickness: f32) -> Self {
        let natural = match anchor.orthogonal_axis() {
            Some(Axis::Width) => Size::new(thickness, 0.0),
            _ => Size::new(0.0, thickness),
        };
        Self::new(anchor, natural.width, natural.height)
    }

    pub fn fill() -> Self {
        Self::new(Anchor::Fill, 0.0, 0.0)
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Thickness answered on successive calls, the last one repeats
    pub fn thicknesses(mut self, thicknesses: Vec<f32>) -> Self {
        self.thicknesses = thicknesses;
        self
    }

    pub fn paddings(mut self, behavior: PaddingBehavior) -> Self {
        self.paddings = behavior;
        self
    }

    pub fn overflow(mut self, overflow: Inset) -> Self {
        self.overflow = Some(overflow);
        self
    }

    pub fn hide_after(mut self, calls: usize) -> Self {
        self.hide_after = Some(calls);
        self
    }

    pub fn given_paddings(&self) -> Vec<Inset> {
        self.calls.iter().map(|(_, c)| c.paddings).collect()
    }

    pub fn bounds_in(&self, client_size: Size) -> dockgrid::Rect {
        self.position
            .expect("child was positioned")
            .resolve(self.resolved, client_size)
    }
}

impl DockChild for ScriptedChild {
    fn anchor(&self) -> Option<Anchor> {
        self.anchor
    }

    fn alignment(&self) -> Alignment {
        self.alignment
    }

    fn is_visible(&self) -> bool {
        self.hide_after.map_or(true, |n| self.calls.len() <= n)
    }

    fn layout(&mut self, available: Size, constraints: &ChildConstraints) {
        self.calls.push((available, *constraints));

        let mut resolved = Size::new(
            self.natural.width.max(available.width),
            self.natural.height.max(available.height),
        );
        if let Some(axis) = self.anchor.and_then(Anchor::orthogonal_axis) {
            let scripted = self
                .thicknesses
                .get(self.calls.len() - 1)
                .or(self.thicknesses.last())
                .copied();
            resolved.set(axis, scripted.unwrap_or(self.natural.get(axis)));
            if self.alignment != Alignment::Fill {
                let parallel = axis.other();
                resolved.set(parallel, self.natural.get(parallel));
            }
        }
        self.resolved = resolved;

        self.requested = match self.paddings {
            PaddingBehavior::Quiet => None,
            PaddingBehavior::Fixed(inset) => Some(inset),
            PaddingBehavior::GrowBy(delta) => Some(constraints.paddings + Inset::uniform(delta)),
            PaddingBehavior::Accelerate(delta) => {
                let step = delta * self.calls.len() as f32;
                Some(constraints.paddings + Inset::uniform(step))
            }
        };
    }

    fn resolved_size(&self) -> Size {
        self.resolved
    }

    fn requested_paddings(&self) -> Option<Inset> {
        self.requested
    }

    fn requested_optional_overflow(&self) -> Option<Inset> {
        self.overflow
    }

    fn set_position(&mut self, position: Position) {
        self.position = Some(position);
    }
}
