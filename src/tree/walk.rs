use crate::{Node, NodeId};

/// A node visited by [`Walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEntry<'a> {
    pub id: NodeId,
    pub node: &'a Node,
    /// Depth from the root, the root being at depth 0.
    pub depth: usize,
    /// Whether the node sits in its parent's left slot. `false` for the root.
    pub is_left: bool,
}

/// Read-only traversal of a tree in render order: right subtree, node, left
/// subtree. Printing each entry on its own line indented by its depth draws
/// the tree rotated a quarter turn, root on the left.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    nodes: &'a [Node],
    stack: Vec<TreeEntry<'a>>,
    next: Option<(NodeId, usize, bool)>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(nodes: &'a [Node], root: Option<NodeId>) -> Self {
        Self {
            nodes,
            stack: Vec::new(),
            next: root.map(|root| (root, 0, false)),
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = TreeEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, depth, is_left)) = self.next.take() {
            let node = &self.nodes[id.index()];
            self.stack.push(TreeEntry {
                id,
                node,
                depth,
                is_left,
            });
            self.next = node.right().map(|right| (right, depth + 1, false));
        }
        let entry = self.stack.pop()?;
        self.next = entry.node.left().map(|left| (left, entry.depth + 1, true));
        Some(entry)
    }
}
