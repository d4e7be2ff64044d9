use std::fmt;

/// Handle of a super-vertex inside a [`Multigraph`](super::Multigraph).
///
/// Handles are handed out in creation order and never reused, so comparing two
/// handles also tells which super-vertex was created first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    /// Position of this super-vertex in creation order.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unordered pair of distinct super-vertices, stored lower handle first.
///
/// `PairKey::new(u, v)` and `PairKey::new(v, u)` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey(VertexId, VertexId);

impl PairKey {
    pub fn new(u: VertexId, v: VertexId) -> Self {
        debug_assert_ne!(u, v, "pair keys never join a vertex to itself");
        if u < v {
            PairKey(u, v)
        } else {
            PairKey(v, u)
        }
    }

    pub fn low(self) -> VertexId {
        self.0
    }

    pub fn high(self) -> VertexId {
        self.1
    }

    pub fn endpoints(self) -> (VertexId, VertexId) {
        (self.0, self.1)
    }
}

/// A vertex of the working graph standing for one or more original vertices.
///
/// Two super-vertices compare equal when their member lists are element-wise
/// equal. Object identity lives in the [`VertexId`] the graph assigns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SuperVertex {
    members: Vec<usize>,
}

impl SuperVertex {
    /// Wraps a single original vertex id.
    pub fn new(original: usize) -> Self {
        SuperVertex {
            members: vec![original],
        }
    }

    pub(crate) fn from_members(members: Vec<usize>) -> Self {
        SuperVertex { members }
    }

    /// Builds the merge product of `a` and `b`: `a`'s members followed by `b`'s.
    pub fn merge(a: &SuperVertex, b: &SuperVertex) -> SuperVertex {
        let mut members = Vec::with_capacity(a.members.len() + b.members.len());
        members.extend_from_slice(&a.members);
        members.extend_from_slice(&b.members);
        SuperVertex { members }
    }

    /// Original vertex ids, in merge order.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, original: usize) -> bool {
        self.members.contains(&original)
    }

    /// Releases the member list once the super-vertex has been merged away.
    pub(crate) fn retire(&mut self) {
        self.members = Vec::new();
    }
}

impl fmt::Display for SuperVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.members)
    }
}
