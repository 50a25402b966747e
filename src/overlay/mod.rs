pub mod geometry;
pub mod render;
