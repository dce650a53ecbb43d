//! Leaf depth discovery used to pick the leaf absorbing the next insertion.

use log::trace;

use crate::{Node, NodeId};

/// Returns every leaf under `root` with its depth, root being at depth 0.
///
/// Leaves come in left-biased pre-order: the right child is pushed before the
/// left one so the left subtree is always visited first.
///
/// ```text
///           O
///         /   \
///        O     C
///       / \
///      A   B
///
/// [(A, 2), (B, 2), (C, 1)]
/// ```
pub(crate) fn leaf_depths(nodes: &[Node], root: NodeId) -> Vec<(NodeId, usize)> {
    let mut stack = vec![(root, 0)];
    let mut depths = Vec::new();
    while let Some((id, depth)) = stack.pop() {
        match nodes[id.index()].children() {
            Some((left, right)) => {
                stack.push((right, depth + 1));
                stack.push((left, depth + 1));
            }
            None => depths.push((id, depth)),
        }
    }
    depths
}

/// Picks the first leaf strictly shallower than every leaf before it, i.e.
/// the leftmost leaf of minimum depth.
///
/// The strict comparison fixes the shape of every tree built so far: changing
/// the tie-break changes where future leaves land.
pub(crate) fn insertion_target(depths: &[(NodeId, usize)]) -> Option<NodeId> {
    let (mut target, mut target_depth) = *depths.first()?;
    for &(id, depth) in &depths[1..] {
        if depth < target_depth {
            target = id;
            target_depth = depth;
        }
    }
    trace!("insertion target {:?} at depth {}", target, target_depth);
    Some(target)
}

#[cfg(test)]
mod test {
    use super::{insertion_target, leaf_depths};
    use crate::{Node, NodeId};

    fn leaf(parent: usize) -> Node {
        let mut node = Node::new_leaf(vec![parent as u8], vec![1]).unwrap();
        node.set_parent(NodeId::new(parent));
        node
    }

    fn branch(left: usize, right: usize) -> Node {
        Node::new_branch(NodeId::new(left), NodeId::new(right), None, vec![1]).unwrap()
    }

    #[test]
    fn test_leaf_depths() {
        //          0
        //        /   \
        //       1     4
        //      / \
        //     2   3
        let nodes = vec![branch(1, 4), branch(2, 3), leaf(1), leaf(1), leaf(0)];
        assert_eq!(
            leaf_depths(&nodes, NodeId::new(0)),
            vec![
                (NodeId::new(2), 2),
                (NodeId::new(3), 2),
                (NodeId::new(4), 1)
            ]
        );
    }

    #[test]
    fn test_single_leaf_depth() {
        let nodes = vec![Node::new_leaf(vec![0], vec![1]).unwrap()];
        assert_eq!(leaf_depths(&nodes, NodeId::new(0)), vec![(NodeId::new(0), 0)]);
    }

    #[test]
    fn test_target_is_leftmost_shallowest() {
        let depths = vec![
            (NodeId::new(2), 2),
            (NodeId::new(3), 1),
            (NodeId::new(4), 2),
            (NodeId::new(5), 1),
        ];
        assert_eq!(insertion_target(&depths), Some(NodeId::new(3)));
    }

    #[test]
    fn test_target_on_equal_depths() {
        let depths = vec![
            (NodeId::new(7), 3),
            (NodeId::new(1), 3),
            (NodeId::new(4), 3),
        ];
        assert_eq!(insertion_target(&depths), Some(NodeId::new(7)));
        assert_eq!(insertion_target(&[]), None);
    }
}
