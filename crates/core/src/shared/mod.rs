pub mod censure;
pub mod constants;
pub mod draw;
pub mod geometry;
pub mod occurrence;
pub mod sequence_metadata;
pub mod surface;
