use std::mem;

use ts_data::datatypes::FeatureVector;

/// A node of a binary decision tree.  Each child is owned by exactly one parent, so a
/// tree is finite, acyclic and free of shared subtrees.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// Routes to `left` when the feature value is strictly below `split`, otherwise to
    /// `right`
    Internal {
        /// Feature index to look up
        feature: i64,
        /// Split threshold
        split: f64,
        /// Subtree for values below the threshold
        left: Box<TreeNode>,
        /// Subtree for values at or above the threshold
        right: Box<TreeNode>,
    },

    /// Score contribution
    Leaf(f64),
}

impl TreeNode {
    /// Builds an internal node
    pub fn split(feature: i64, split: f64, left: TreeNode, right: TreeNode) -> Self {
        TreeNode::Internal {
            feature: feature,
            split: split,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// A single immutable decision tree.
///
/// Traversal, shape queries, conversion to and from records and dropping all use an
/// explicit stack, so depth is bounded by memory only.  The derived `Clone`,
/// `PartialEq` and `Debug` still recurse once per level.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    root: TreeNode,
}

impl Tree {
    /// Wraps a root node
    pub fn new(root: TreeNode) -> Self {
        Tree { root: root }
    }

    /// Root node
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Walks from the root to a leaf and returns the leaf's value.  Absent features
    /// read as `0.0`; ties with the threshold route right.
    #[inline]
    pub fn predict(&self, data: &FeatureVector) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf(value) => return *value,
                TreeNode::Internal {
                    feature,
                    split,
                    left,
                    right,
                } => {
                    node = if data.get(*feature) < *split { &**left } else { &**right };
                }
            }
        }
    }

    /// Takes the root out, leaving a leaf behind for the drop
    pub(crate) fn into_root(mut self) -> TreeNode {
        mem::replace(&mut self.root, TreeNode::Leaf(0.))
    }

    /// Number of edges on the longest root to leaf path
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(&self.root, 0)];
        while let Some((node, level)) = stack.pop() {
            match node {
                TreeNode::Leaf(_) => deepest = deepest.max(level),
                TreeNode::Internal { left, right, .. } => {
                    stack.push((&**left, level + 1));
                    stack.push((&**right, level + 1));
                }
            }
        }
        deepest
    }

    /// Total number of nodes
    pub fn num_nodes(&self) -> usize {
        2 * self.num_leaves() - 1
    }

    /// Number of leaves
    pub fn num_leaves(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                TreeNode::Leaf(_) => count += 1,
                TreeNode::Internal { left, right, .. } => {
                    stack.push(left);
                    stack.push(right);
                }
            }
        }
        count
    }
}

impl Drop for Tree {
    fn drop(&mut self) {
        // Unlink one node at a time so long chains never recurse
        let mut stack = vec![mem::replace(&mut self.root, TreeNode::Leaf(0.))];
        while let Some(node) = stack.pop() {
            if let TreeNode::Internal { left, right, .. } = node {
                stack.push(*left);
                stack.push(*right);
            }
        }
    }
}

#[cfg(test)]
mod tree_base_tree {
    use super::*;

    fn build_tree() -> Tree {
        // Two levels
        Tree::new(TreeNode::split(
            0,
            0.5,
            TreeNode::split(1, 0.7, TreeNode::Leaf(0.1), TreeNode::Leaf(0.2)),
            TreeNode::split(1, 0.9, TreeNode::Leaf(0.3), TreeNode::Leaf(0.4)),
        ))
    }

    fn fv(data: &[f64]) -> FeatureVector {
        FeatureVector::from(data)
    }

    #[test]
    fn test_trees() {
        let tree = build_tree();

        // Should go left then right
        assert_eq!(0.2, tree.predict(&fv(&[0.4, 0.8])));

        // Should go right then left
        assert_eq!(0.3, tree.predict(&fv(&[6., 0.8])));

        // Should go right then right
        assert_eq!(0.4, tree.predict(&fv(&[5.5, 0.91])));

        // Should go left then left
        assert_eq!(0.1, tree.predict(&fv(&[0.4, 0.6])));
    }

    #[test]
    fn test_ties_route_right() {
        let tree = build_tree();
        assert_eq!(0.4, tree.predict(&fv(&[0.5, 0.9])));
        assert_eq!(0.2, tree.predict(&fv(&[0.4, 0.7])));
    }

    #[test]
    fn test_missing_features_read_zero() {
        let tree = build_tree();
        // Everything absent: 0.0 < 0.5 and 0.0 < 0.7
        assert_eq!(0.1, tree.predict(&FeatureVector::new()));

        // Unrelated features are ignored
        let mut data = FeatureVector::new();
        data.insert(99, 100.0);
        data.insert(-1, 100.0);
        assert_eq!(0.1, tree.predict(&data));

        // Negative thresholds send missing features right
        let tree = Tree::new(TreeNode::split(
            42,
            -1.0,
            TreeNode::Leaf(1.0),
            TreeNode::Leaf(2.0),
        ));
        assert_eq!(2.0, tree.predict(&FeatureVector::new()));
    }

    #[test]
    fn test_nan_routes_right() {
        let tree = build_tree();
        assert_eq!(0.4, tree.predict(&fv(&[std::f64::NAN, std::f64::NAN])));
    }

    #[test]
    fn test_shape() {
        let tree = build_tree();
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.num_leaves(), 4);
        assert_eq!(tree.num_nodes(), 7);

        let stump = Tree::new(TreeNode::Leaf(3.0));
        assert_eq!(stump.depth(), 0);
        assert_eq!(stump.num_nodes(), 1);
        assert_eq!(stump.predict(&fv(&[1.0, 2.0])), 3.0);

        let lopsided = Tree::new(TreeNode::split(
            0,
            0.0,
            TreeNode::Leaf(1.0),
            TreeNode::split(0, 1.0, TreeNode::Leaf(2.0), TreeNode::Leaf(3.0)),
        ));
        assert_eq!(lopsided.depth(), 2);
        assert_eq!(lopsided.num_leaves(), 3);
        assert_eq!(lopsided.num_nodes(), 5);
    }

    #[test]
    fn test_deep_chain() {
        // Far deeper than the thread stack could hold one frame per level
        let levels = 200_000;
        let mut node = TreeNode::Leaf(7.0);
        for i in 0..levels {
            node = TreeNode::split(0, i as f64, TreeNode::Leaf(-1.0), node);
        }
        let tree = Tree::new(node);

        assert_eq!(tree.depth(), levels);
        assert_eq!(tree.num_leaves(), levels + 1);
        assert_eq!(tree.predict(&fv(&[levels as f64])), 7.0);
        assert_eq!(tree.predict(&FeatureVector::new()), -1.0);
    }
}
