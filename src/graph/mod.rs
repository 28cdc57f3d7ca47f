pub mod graph;
pub mod matrix;
pub mod pathfinder;
pub mod vertices;
