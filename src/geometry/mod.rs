pub mod polygon;
pub mod ring;

pub use polygon::PolygonWithHoles;
pub use ring::Ring;
