pub mod boolean;
pub mod creation;
pub mod offset;
pub mod query;
pub mod transform;
