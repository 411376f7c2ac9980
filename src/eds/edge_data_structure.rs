use super::edge_iterator::EdgeIterator;
use crate::utils::types::{EdgeIdx, VertexIdx};

use anyhow::{Ok, Result};

/// A planar subdivision stored as an arena of directed edges.
///
/// Edges are created in symmetric pairs: `make_edge` appends the edge at an
/// even index `e` and its reverse at `e ^ 1`, so `sym` is pure index parity.
/// Consumers that want each undirected edge once filter on even indices.
///
/// Every directed edge knows the next (`onext`) and previous (`oprev`) edge
/// counter-clockwise around its origin vertex; these rings are the only
/// connectivity, faces are implicit.
///
/// Deactivated edges are tombstones: `deactivate` splices the pair out of
/// its origin rings and flips the active flags, but the slots are never
/// reused or compacted, so edge identifiers stay dereferenceable for the
/// lifetime of the arena. Ring traversal therefore only ever visits active
/// edges.
#[derive(Debug, Default)]
pub struct EdgeDataStructure {
    /// Origin vertex per directed edge; the destination is the origin of the symmetric edge.
    pub(crate) orgs: Vec<VertexIdx>,
    /// Next edge counter-clockwise around the origin vertex.
    pub(crate) onexts: Vec<EdgeIdx>,
    /// Previous edge counter-clockwise (i.e. next clockwise) around the origin vertex.
    pub(crate) oprevs: Vec<EdgeIdx>,
    pub(crate) actives: Vec<bool>,
    /// The number of deactivated directed edges.
    pub num_deactivated: usize,
}

impl EdgeDataStructure {
    pub const fn new() -> Self {
        Self {
            orgs: Vec::new(),
            onexts: Vec::new(),
            oprevs: Vec::new(),
            actives: Vec::new(),
            num_deactivated: 0,
        }
    }

    /// The number of directed edges ever created, active or not.
    pub fn num_edges(&self) -> usize {
        self.orgs.len()
    }

    /// The number of active directed edges.
    pub fn num_active_edges(&self) -> usize {
        self.num_edges() - self.num_deactivated
    }

    /// Create a new active edge pair `org -> dest` / `dest -> org`.
    ///
    /// Both edges start as singleton origin rings. Returns the even index of
    /// the `org -> dest` direction.
    pub fn make_edge(&mut self, org: VertexIdx, dest: VertexIdx) -> EdgeIdx {
        let e = self.orgs.len();
        self.orgs.push(org);
        self.orgs.push(dest);
        self.onexts.push(e);
        self.onexts.push(e + 1);
        self.oprevs.push(e);
        self.oprevs.push(e + 1);
        self.actives.push(true);
        self.actives.push(true);
        e
    }

    /// The reverse-direction edge.
    #[must_use]
    pub const fn sym(&self, e: EdgeIdx) -> EdgeIdx {
        e ^ 1
    }

    /// The origin vertex of `e`.
    #[must_use]
    pub fn org(&self, e: EdgeIdx) -> VertexIdx {
        self.orgs[e]
    }

    /// The destination vertex of `e`.
    #[must_use]
    pub fn dest(&self, e: EdgeIdx) -> VertexIdx {
        self.orgs[e ^ 1]
    }

    /// The next edge counter-clockwise around the origin of `e`.
    #[must_use]
    pub fn onext(&self, e: EdgeIdx) -> EdgeIdx {
        self.onexts[e]
    }

    /// The previous edge counter-clockwise around the origin of `e`.
    #[must_use]
    pub fn oprev(&self, e: EdgeIdx) -> EdgeIdx {
        self.oprevs[e]
    }

    /// The next edge counter-clockwise around the face left of `e`;
    /// its origin is the destination of `e`.
    #[must_use]
    pub fn lnext(&self, e: EdgeIdx) -> EdgeIdx {
        self.oprevs[e ^ 1]
    }

    /// The previous edge around the face right of `e`;
    /// its origin is the destination of `e`.
    #[must_use]
    pub fn rprev(&self, e: EdgeIdx) -> EdgeIdx {
        self.onexts[e ^ 1]
    }

    #[must_use]
    pub fn is_active(&self, e: EdgeIdx) -> bool {
        self.actives[e]
    }

    /// Exchange the origin rings of `a` and `b` at the position of each.
    ///
    /// If the two edges are in distinct rings, the rings are joined; if they
    /// are in the same ring, it is split in two. Both edges must share their
    /// origin vertex for the result to be a meaningful vertex ring.
    pub(crate) fn splice(&mut self, a: EdgeIdx, b: EdgeIdx) {
        if a == b {
            return;
        }
        let a_next = self.onexts[a];
        let b_next = self.onexts[b];
        self.onexts[a] = b_next;
        self.onexts[b] = a_next;
        self.oprevs[b_next] = a;
        self.oprevs[a_next] = b;
    }

    /// Create a new edge from the destination of `a` to the origin of `b`,
    /// spliced into both rings. Returns the new edge's even index.
    pub fn connect(&mut self, a: EdgeIdx, b: EdgeIdx) -> EdgeIdx {
        let e = self.make_edge(self.dest(a), self.org(b));
        self.splice(e, self.lnext(a));
        self.splice(self.sym(e), b);
        e
    }

    /// Deactivate the edge pair of `e`.
    ///
    /// The pair is spliced out of both origin rings, so active-only traversal
    /// holds structurally, and tombstoned in place: the identifiers stay
    /// valid and the arena is never compacted.
    pub fn deactivate(&mut self, e: EdgeIdx) {
        if !self.actives[e] {
            return;
        }
        let s = self.sym(e);
        self.splice(e, self.oprevs[e]);
        self.splice(s, self.oprevs[s]);
        self.actives[e] = false;
        self.actives[s] = false;
        self.num_deactivated += 2;
    }

    /// Rebase another arena into this one, as used by the parallel gather.
    ///
    /// The absorbed edges keep their relative order and activity; their
    /// vertex indices are shifted by `vertex_offset` and their ring links by
    /// the returned edge offset.
    pub fn absorb(&mut self, other: Self, vertex_offset: usize) -> EdgeIdx {
        let edge_offset = self.num_edges();
        self.orgs.extend(other.orgs.iter().map(|&v| v + vertex_offset));
        self.onexts.extend(other.onexts.iter().map(|&e| e + edge_offset));
        self.oprevs.extend(other.oprevs.iter().map(|&e| e + edge_offset));
        self.actives.extend_from_slice(&other.actives);
        self.num_deactivated += other.num_deactivated;
        edge_offset
    }

    /// Get a traversal handle for an edge index.
    pub fn edge(&self, e: EdgeIdx) -> Result<EdgeIterator<'_>> {
        if e >= self.num_edges() {
            return Err(anyhow::Error::msg("Edge index out of bounds!"));
        }
        Ok(EdgeIterator::new(self, e))
    }

    /// Check if the structure is sound, i.e. all active rings are
    /// consistently doubly linked and stay at one origin, and activity is
    /// symmetric within each edge pair.
    #[must_use]
    pub fn is_sound(&self) -> bool {
        let mut sound = true;
        for e in 0..self.num_edges() {
            if self.actives[e] != self.actives[self.sym(e)] {
                sound = false;
            }
            if !self.actives[e] {
                continue;
            }
            sound &= self.edge(e).is_ok_and(|edge| edge.is_sound());
        }
        sound
    }
}
