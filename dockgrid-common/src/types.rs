use std::ops::Add;

use ordered_float::OrderedFloat;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::anchor::{Axis, Side};

/// Four-sided inset used for margins, paddings and overflow
///
/// `width` and `height` are derived (`left + right`, `top + bottom`) and
/// therefore always consistent with the side values.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Inset {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Inset {
    pub const ZERO: Inset = Inset {
        top: 0.0,
        bottom: 0.0,
        left: 0.0,
        right: 0.0,
    };

    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }

    pub fn width(&self) -> f32 {
        self.left + self.right
    }

    pub fn height(&self) -> f32 {
        self.top + self.bottom
    }

    /// Total inset along an axis
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Width => self.width(),
            Axis::Height => self.height(),
        }
    }

    pub fn get(&self, side: Side) -> f32 {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn set(&mut self, side: Side, value: f32) {
        match side {
            Side::Top => self.top = value,
            Side::Bottom => self.bottom = value,
            Side::Left => self.left = value,
            Side::Right => self.right = value,
        }
    }

    pub fn with(mut self, side: Side, value: f32) -> Self {
        self.set(side, value);
        self
    }

    /// Copy keeping only the given sides, every other side is zero
    pub fn only(&self, sides: [Side; 2]) -> Self {
        sides
            .into_iter()
            .fold(Inset::ZERO, |inset, side| inset.with(side, self.get(side)))
    }

    /// Negative and NaN sides become zero
    pub fn clamped(self) -> Self {
        let clamp = |v: f32| if v > 0.0 { v } else { 0.0 };
        Self {
            top: clamp(self.top),
            bottom: clamp(self.bottom),
            left: clamp(self.left),
            right: clamp(self.right),
        }
    }

    /// Side-wise maximum
    pub fn max(self, other: Inset) -> Self {
        Self {
            top: self.top.max(other.top),
            bottom: self.bottom.max(other.bottom),
            left: self.left.max(other.left),
            right: self.right.max(other.right),
        }
    }

    pub fn approx_eq(&self, other: &Inset, tolerance: f32) -> bool {
        Side::ALL
            .into_iter()
            .all(|side| (self.get(side) - other.get(side)).abs() <= tolerance)
    }

    pub fn is_zero(&self) -> bool {
        Side::ALL.into_iter().all(|side| self.get(side) == 0.0)
    }

    /// Hashable key with every side rounded to `precision` decimal digits
    pub fn quantized(&self, precision: u32) -> InsetKey {
        let factor = 10f32.powi(precision as i32);
        let round = |v: f32| OrderedFloat::from((v * factor).round() / factor);
        InsetKey([
            round(self.top),
            round(self.bottom),
            round(self.left),
            round(self.right),
        ])
    }
}

impl Add for Inset {
    type Output = Inset;

    fn add(self, rhs: Inset) -> Self::Output {
        Self {
            top: self.top + rhs.top,
            bottom: self.bottom + rhs.bottom,
            left: self.left + rhs.left,
            right: self.right + rhs.right,
        }
    }
}

/// Quantized inset, in top, bottom, left, right order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InsetKey([OrderedFloat<f32>; 4]);

/// Width and height of a box
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Width => self.width,
            Axis::Height => self.height,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::Width => self.width = value,
            Axis::Height => self.height = value,
        }
    }

    pub fn with(mut self, axis: Axis, value: f32) -> Self {
        self.set(axis, value);
        self
    }

    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Both dimensions finite and non-negative
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    /// How much this size exceeds `given` on each axis, ignoring excesses of
    /// at most `epsilon`. `None` when it fits.
    pub fn excess_over(&self, given: &Size, epsilon: f32) -> Option<Size> {
        let excess = |axis: Axis| {
            let delta = self.get(axis) - given.get(axis);
            if delta > epsilon {
                delta
            } else {
                0.0
            }
        };
        let result = Size::new(excess(Axis::Width), excess(Axis::Height));
        if result == Size::ZERO {
            None
        } else {
            Some(result)
        }
    }

    /// Size left after removing an inset
    pub fn shrink(&self, inset: &Inset) -> Self {
        Self {
            width: (self.width - inset.width()).max(0.0),
            height: (self.height - inset.height()).max(0.0),
        }
    }

    /// Size of a box holding this one plus an inset
    pub fn expand(&self, inset: &Inset) -> Self {
        Self {
            width: self.width + inset.width(),
            height: self.height + inset.height(),
        }
    }
}

/// Partial inset: a region is positioned by one offset per axis at most
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub top: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
    pub right: Option<f32>,
}

impl Position {
    pub fn get(&self, side: Side) -> Option<f32> {
        match side {
            Side::Top => self.top,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Sets one side, clearing its opposite
    pub fn set(&mut self, side: Side, value: f32) {
        let (slot, opposite) = match side {
            Side::Top => (&mut self.top, &mut self.bottom),
            Side::Bottom => (&mut self.bottom, &mut self.top),
            Side::Left => (&mut self.left, &mut self.right),
            Side::Right => (&mut self.right, &mut self.left),
        };
        *slot = Some(value);
        *opposite = None;
    }

    pub fn with(mut self, side: Side, value: f32) -> Self {
        self.set(side, value);
        self
    }

    /// Resolves the box of a region of `size` inside a container of
    /// `container` size. A missing axis resolves to the start.
    pub fn resolve(&self, size: Size, container: Size) -> Rect {
        let offset = |axis: Axis| {
            let [start, end] = axis.sides();
            match (self.get(start), self.get(end)) {
                (Some(v), _) => v,
                (None, Some(v)) => container.get(axis) - v - size.get(axis),
                (None, None) => 0.0,
            }
        };
        Rect::new(offset(Axis::Width), offset(Axis::Height), size.width, size.height)
    }
}

/// Represents a rectangular area with position and size
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}
