//! # dita
//!
//! 2D Delaunay triangulation via a divide-and-conquer algorithm, with a
//! message-passing parallel driver that produces results identical to the
//! sequential one.
#![forbid(unsafe_code)]
#![deny(unused, clippy::incompatible_msrv)]
#![warn(clippy::all, clippy::missing_const_for_fn)]

pub use eds::edge_data_structure::EdgeDataStructure;
pub use eds::edge_iterator::EdgeIterator;
pub use error::TriangulationError;
pub use point::Point;
pub use triangulation::Triangulation;

mod eds;
pub mod error;
mod merge;
mod parallel;
pub mod point;
mod predicates;
mod primitives;
pub mod triangulation;
mod utils;
