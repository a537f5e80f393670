mod rotate;

pub use rotate::RotateNodes;
