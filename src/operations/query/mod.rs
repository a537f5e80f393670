mod area;
mod bounding_box;
mod centroid;
mod contains;
mod orientation;

pub use area::Area2D;
pub use bounding_box::{MinBoundingBox, OrientedBox};
pub use centroid::{Centroid, Centroid2D};
pub use contains::NodeWithinFace;
pub use orientation::CheckOrientation;
