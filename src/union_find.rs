//! Disjoint-set forest used to track which rooms are connected.
//!
//! Union-by-size with path compression. Each class also remembers the smallest
//! element it contains, which is what callers see as the class label: merging two
//! classes always looks like the smaller label absorbing the larger one.

#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    /// Smallest member, valid at roots only
    min_member: Vec<usize>,
}

impl UnionFind {
    /// Create `count` singleton classes, `0..count`
    pub fn new(count: usize) -> Self {
        Self {
            parent: (0..count).collect(),
            size: vec![1; count],
            min_member: (0..count).collect(),
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Compress the walked path onto the root
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merge the classes of `a` and `b`. Returns false if they were already merged.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        let (big, small) = if self.size[root_a] >= self.size[root_b] {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };

        self.parent[small] = big;
        self.size[big] += self.size[small];
        self.min_member[big] = self.min_member[big].min(self.min_member[small]);
        true
    }

    pub fn same(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Label of the class containing `x`: its smallest member
    pub fn label(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.min_member[root]
    }
}
