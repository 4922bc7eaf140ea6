pub mod heuristics;

pub use heuristics::*;
