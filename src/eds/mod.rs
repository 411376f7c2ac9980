pub mod edge_data_structure;
pub mod edge_iterator;
