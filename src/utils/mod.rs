pub mod point_order;
pub mod split;
pub mod types;
