use std::collections::BTreeMap;

/// Disjoint-set forest over dense indices, with path compression and union by rank.
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let x_root = self.find(x);
        let y_root = self.find(y);
        if x_root == y_root {
            return false;
        }
        match self.rank[x_root].cmp(&self.rank[y_root]) {
            std::cmp::Ordering::Less => self.parent[x_root] = y_root,
            std::cmp::Ordering::Greater => self.parent[y_root] = x_root,
            std::cmp::Ordering::Equal => {
                self.parent[y_root] = x_root;
                self.rank[x_root] += 1;
            }
        }
        true
    }
}

/// Connected components of the graph described by `edges`.
///
/// Each component is a sorted list of original ids; components are ordered by
/// their smallest id. Vertices that only appear in self-loop records form
/// components of their own.
pub fn components(edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let mut index: BTreeMap<usize, usize> = BTreeMap::new();
    for &(u, v) in edges {
        for w in [u, v] {
            let next = index.len();
            index.entry(w).or_insert(next);
        }
    }

    let mut uf = UnionFind::new(index.len());
    for &(u, v) in edges {
        uf.union(index[&u], index[&v]);
    }

    // BTreeMap iteration is by ascending id, so the first id seen for a root is its smallest.
    let mut by_root: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    let mut order = Vec::new();
    for (&id, &i) in &index {
        let root = uf.find(i);
        by_root
            .entry(root)
            .or_insert_with(|| {
                order.push(root);
                Vec::new()
            })
            .push(id);
    }
    order
        .into_iter()
        .filter_map(|root| by_root.remove(&root))
        .collect()
}
