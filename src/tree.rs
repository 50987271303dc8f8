//! Rooted, ordered tree built by the Newick parser.

/// Node identifier. Ids are dense: a tree of `n` nodes uses exactly `0..n`.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: NodeId,
    pub name: Option<String>,
    /// Branch length to the parent. `None` is read as zero.
    pub length: Option<f64>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            name: None,
            length: None,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Branch length with the missing case folded to zero.
    pub fn length_or_zero(&self) -> f64 {
        self.length.unwrap_or(0.0)
    }

    /// Name, if present and non-empty.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    root: TreeNode,
    node_count: usize,
}

impl Tree {
    pub(crate) fn new(root: TreeNode, node_count: usize) -> Self {
        Self { root, node_count }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// All nodes in document (pre-order, left to right) order.
    pub fn preorder(&self) -> Vec<&TreeNode> {
        let mut order = Vec::with_capacity(self.node_count);
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            order.push(node);
            stack.extend(node.children.iter().rev());
        }
        order
    }

    /// Leaves in left-to-right order.
    pub fn leaves(&self) -> Vec<&TreeNode> {
        self.preorder().into_iter().filter(|n| n.is_leaf()).collect()
    }

    /// Parent id for every node, indexed by id. The root maps to `None`.
    pub fn parents(&self) -> Vec<Option<NodeId>> {
        let mut parents = vec![None; self.node_count];
        for node in self.preorder() {
            for child in &node.children {
                parents[child.id] = Some(node.id);
            }
        }
        parents
    }
}
