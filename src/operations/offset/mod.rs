//! Straight-skeleton offsetting.

mod polygon_offset;
mod skeleton;

pub use polygon_offset::OffsetPolygon;
pub use skeleton::StraightSkeleton;
