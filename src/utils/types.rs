// Type aliases for data values.
pub type Vertex2 = [f64; 2];

// Type aliases for data structure indices.
// This is to know, when a function accepts or returns a usize, what it is for.
pub type VertexIdx = usize;
pub type EdgeIdx = usize;
