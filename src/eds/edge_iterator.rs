use core::fmt;

use super::edge_data_structure::EdgeDataStructure;
use crate::utils::types::{EdgeIdx, VertexIdx};

/// A lightweight traversal handle over one directed edge of an
/// [`EdgeDataStructure`].
///
/// The navigation methods (`sym`, `onext`, `oprev`, `lnext`, `rprev`) return
/// fresh handles, so walks compose without mutating the arena.
#[derive(Clone, Copy)]
pub struct EdgeIterator<'a> {
    pub eds: &'a EdgeDataStructure,
    pub idx: EdgeIdx,
}

impl<'a> EdgeIterator<'a> {
    pub const fn new(eds: &'a EdgeDataStructure, idx: EdgeIdx) -> Self {
        Self { eds, idx }
    }

    /// The origin vertex of this edge.
    #[must_use]
    pub fn org(&self) -> VertexIdx {
        self.eds.org(self.idx)
    }

    /// The destination vertex of this edge.
    #[must_use]
    pub fn dest(&self) -> VertexIdx {
        self.eds.dest(self.idx)
    }

    /// The same edge in the reverse direction.
    #[must_use]
    pub fn sym(&self) -> Self {
        Self::new(self.eds, self.eds.sym(self.idx))
    }

    /// The next edge counter-clockwise around the origin vertex.
    #[must_use]
    pub fn onext(&self) -> Self {
        Self::new(self.eds, self.eds.onext(self.idx))
    }

    /// The previous edge counter-clockwise around the origin vertex.
    #[must_use]
    pub fn oprev(&self) -> Self {
        Self::new(self.eds, self.eds.oprev(self.idx))
    }

    /// The next edge counter-clockwise around the face left of this edge.
    #[must_use]
    pub fn lnext(&self) -> Self {
        Self::new(self.eds, self.eds.lnext(self.idx))
    }

    /// The previous edge around the face right of this edge.
    #[must_use]
    pub fn rprev(&self) -> Self {
        Self::new(self.eds, self.eds.rprev(self.idx))
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.eds.is_active(self.idx)
    }

    /// Whether this is the even-indexed representative of its undirected pair.
    #[must_use]
    pub const fn is_canonical(&self) -> bool {
        self.idx % 2 == 0
    }

    /// Check if this edge is sound, i.e. the ring links around its origin are
    /// mutually inverse and stay at one origin vertex.
    #[must_use]
    pub fn is_sound(&self) -> bool {
        let mut sound = true;

        let mut check = |cond: bool, msg: &str| {
            if !cond {
                log::error!("{self} is unsound: {msg}");
                sound = false;
            }
        };

        check(
            self.onext().oprev().idx == self.idx,
            "oprev does not invert onext",
        );
        check(
            self.oprev().onext().idx == self.idx,
            "onext does not invert oprev",
        );
        check(
            self.onext().org() == self.org(),
            "onext leaves the origin vertex",
        );
        check(self.onext().is_active(), "onext reaches an inactive edge");

        sound
    }
}

impl fmt::Display for EdgeIterator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge {}: {} -> {}", self.idx, self.org(), self.dest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> EdgeDataStructure {
        let mut eds = EdgeDataStructure::new();
        let a = eds.make_edge(0, 1);
        let b = eds.make_edge(1, 2);
        let sym_a = eds.sym(a);
        eds.splice(sym_a, b);
        eds.connect(b, a);
        eds
    }

    #[test]
    fn test_navigation() {
        let eds = triangle();
        let a = eds.edge(0).unwrap();
        assert_eq!(a.org(), 0);
        assert_eq!(a.dest(), 1);
        assert_eq!(a.sym().org(), 1);
        // lnext walks the triangle and comes back.
        assert_eq!(a.lnext().lnext().lnext().idx, a.idx);
        assert_eq!(a.lnext().org(), a.dest());
        assert_eq!(a.rprev().org(), a.dest());
    }

    #[test]
    fn test_canonical_parity() {
        let eds = triangle();
        let a = eds.edge(0).unwrap();
        assert!(a.is_canonical());
        assert!(!a.sym().is_canonical());
    }

    #[test]
    fn test_display() {
        let eds = triangle();
        let a = eds.edge(2).unwrap();
        assert_eq!(format!("{a}"), "Edge 2: 1 -> 2");
    }
}
