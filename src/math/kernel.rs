//! Predicate kernels.
//!
//! Boolean operations, orientation and membership tests need predicates that
//! never disagree with each other, so they default to [`KernelKind::Exact`]
//! (adaptive-precision orientation from `geo`'s robust kernel). Metrics,
//! offsetting and bounding boxes only produce numbers and default to
//! [`KernelKind::Inexact`].

use geo::algorithm::kernels::{Kernel, Orientation as GeoOrientation, RobustKernel, SimpleKernel};
use geo::Coord;

use super::Point2;

/// Orientation of an ordered point triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

impl Orientation {
    /// Returns the opposite orientation; collinear stays collinear.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::CounterClockwise => Self::Clockwise,
            Self::Clockwise => Self::CounterClockwise,
            Self::Collinear => Self::Collinear,
        }
    }
}

impl From<GeoOrientation> for Orientation {
    fn from(value: GeoOrientation) -> Self {
        match value {
            GeoOrientation::CounterClockwise => Self::CounterClockwise,
            GeoOrientation::Clockwise => Self::Clockwise,
            GeoOrientation::Collinear => Self::Collinear,
        }
    }
}

/// Selects the arithmetic used by geometric predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelKind {
    /// Exact predicates: the sign of every orientation test is correct.
    #[default]
    Exact,
    /// Plain floating-point predicates.
    Inexact,
}

impl KernelKind {
    /// Orientation of `c` relative to the directed line `a -> b`.
    #[must_use]
    pub fn orient2d(self, a: &Point2, b: &Point2, c: &Point2) -> Orientation {
        let (p, q, r) = (coord(a), coord(b), coord(c));
        match self {
            Self::Exact => <RobustKernel as Kernel<f64>>::orient2d(p, q, r).into(),
            Self::Inexact => <SimpleKernel as Kernel<f64>>::orient2d(p, q, r).into(),
        }
    }
}

fn coord(p: &Point2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}
