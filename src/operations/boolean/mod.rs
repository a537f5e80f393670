//! Boolean set operations on faces with holes.

mod assemble;
mod boolean_face;
mod clean_face;
mod engine;
mod faces_intersect;
mod select;

pub use assemble::{assemble_polygons, materialize};
pub use boolean_face::{BooleanFace, IntersectFace};
pub use clean_face::CleanFace;
pub use engine::{overlay, WELD_TOLERANCE};
pub use faces_intersect::FacesIntersect;
pub use select::{should_keep_edge, BooleanOp, EdgeClass, EdgeSource, KeepDecision};
