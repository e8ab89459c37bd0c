//! Anchor names and the lookup tables that relate them to sides and axes.
//!
//! A side anchor shares its *parallel* length with its siblings (a top region
//! is as wide as the fill area) and controls its *orthogonal* length (its
//! height, or "thickness"). These tables are read-only and may be shared
//! freely between layout invocations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantNames};

/// One of the four sides of a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// The axis a region docked on this side shares with its siblings
    pub fn parallel_axis(self) -> Axis {
        match self {
            Side::Top | Side::Bottom => Axis::Width,
            Side::Left | Side::Right => Axis::Height,
        }
    }

    /// The axis a region docked on this side controls
    pub fn orthogonal_axis(self) -> Axis {
        self.parallel_axis().other()
    }
}

/// A dimension of a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::Width => Axis::Height,
            Axis::Height => Axis::Width,
        }
    }

    /// The two sides bounding this axis, start side first
    pub fn sides(self) -> [Side; 2] {
        match self {
            Axis::Width => [Side::Left, Side::Right],
            Axis::Height => [Side::Top, Side::Bottom],
        }
    }

    pub fn start_side(self) -> Side {
        self.sides()[0]
    }
}

/// The docking slot a region occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Anchor {
    Top,
    Bottom,
    Left,
    Right,
    Fill,
}

impl Anchor {
    /// The side this anchor docks on, `None` for the fill slot
    pub fn side(self) -> Option<Side> {
        match self {
            Anchor::Top => Some(Side::Top),
            Anchor::Bottom => Some(Side::Bottom),
            Anchor::Left => Some(Side::Left),
            Anchor::Right => Some(Side::Right),
            Anchor::Fill => None,
        }
    }

    pub fn parallel_axis(self) -> Option<Axis> {
        self.side().map(Side::parallel_axis)
    }

    pub fn orthogonal_axis(self) -> Option<Axis> {
        self.side().map(Side::orthogonal_axis)
    }

    pub fn opposite(self) -> Option<Anchor> {
        self.side().map(|side| side.opposite().into())
    }
}

impl From<Side> for Anchor {
    fn from(side: Side) -> Self {
        match side {
            Side::Top => Anchor::Top,
            Side::Bottom => Anchor::Bottom,
            Side::Left => Anchor::Left,
            Side::Right => Anchor::Right,
        }
    }
}

/// Placement of a region along the axis its anchor does not fix
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, VariantNames,
)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Alignment {
    Start,
    #[strum(to_string = "center", serialize = "middle")]
    #[cfg_attr(feature = "serde", serde(alias = "middle"))]
    Center,
    End,
    #[default]
    Fill,
}
