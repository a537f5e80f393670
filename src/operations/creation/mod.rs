mod shape_finder;

pub use shape_finder::{ShapeFinder, ShapeFinderOutput};
