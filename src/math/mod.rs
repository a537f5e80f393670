pub mod distance_2d;
pub mod hull;
pub mod intersect_2d;
pub mod kernel;
pub mod polygon_2d;

pub use kernel::{KernelKind, Orientation};

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Coordinate tolerance used when de-duplicating vertices of result faces.
pub const DEDUP_TOLERANCE: f64 = 1e-5;

/// Projects a 3D point onto the XY plane.
#[must_use]
pub fn to_2d(p: &Point3) -> Point2 {
    Point2::new(p.x, p.y)
}

/// Lifts a 2D point back to 3D at `z = 0`.
#[must_use]
pub fn to_3d(p: &Point2) -> Point3 {
    Point3::new(p.x, p.y, 0.0)
}

/// Returns `true` if both planar coordinates differ by at most `tol`.
#[must_use]
pub fn compare_2d(a: &Point2, b: &Point2, tol: f64) -> bool {
    (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol
}
