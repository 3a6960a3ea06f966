use std::convert::TryFrom;
use std::io::{Read, Write};

use ts_core::model::SerDe;
use ts_data::datatypes::FeatureVector;
use ts_data::load::read_forest;
use ts_data::schema::{ForestRecord, TreeNodeRecord};

use super::base::{Tree, TreeNode};
use crate::error::ForestError;

#[derive(Debug, Clone, Default, PartialEq)]
/// An ordered collection of independent trees whose contributions are summed.  An
/// empty forest scores `0.0` everywhere.
pub struct Forest {
    trees: Vec<Tree>,
}

impl Forest {
    /// Builds a forest from already-validated trees
    pub fn new(trees: Vec<Tree>) -> Self {
        Forest { trees: trees }
    }

    /// Validates a serialized forest.  Fails on the first node that is neither a leaf
    /// with a value nor an internal node with a feature, a split and both children.
    pub fn from_record(record: &ForestRecord) -> Result<Self, ForestError> {
        let trees = record
            .trees
            .iter()
            .enumerate()
            .map(|(i, root)| tree_from_record(root, i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Forest::new(trees))
    }

    /// Serializable form of this forest
    pub fn to_record(&self) -> ForestRecord {
        ForestRecord {
            trees: self
                .trees
                .iter()
                .map(|tree| node_to_record(tree.root()))
                .collect(),
        }
    }

    /// Trees in evaluation order
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// Number of trees
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// True when the forest holds no trees
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Sums each tree's contribution in forest order, starting from `0.0`.
    #[inline]
    pub fn predict(&self, data: &FeatureVector) -> f64 {
        let mut total = 0.0;
        for tree in self.trees.iter() {
            total += tree.predict(data);
        }
        total
    }
}

impl TryFrom<&ForestRecord> for Forest {
    type Error = ForestError;

    fn try_from(record: &ForestRecord) -> Result<Self, Self::Error> {
        Forest::from_record(record)
    }
}

fn tree_from_record(record: &TreeNodeRecord, tree: usize) -> Result<Tree, ForestError> {
    enum Step<'a> {
        Visit(&'a TreeNodeRecord, usize, &'static str),
        Join(i64, f64),
    }

    let malformed = |path: &[&'static str], reason: &'static str| ForestError::MalformedNode {
        tree: tree,
        path: path.join("."),
        reason: reason,
    };

    // Depth first, left before right, so `path` only ever needs truncating
    let mut path: Vec<&'static str> = Vec::new();
    let mut steps = vec![Step::Visit(record, 0, "root")];
    let mut done: Vec<Tree> = Vec::new();
    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(node, depth, side) => {
                path.truncate(depth);
                path.push(side);
                match node {
                    TreeNodeRecord {
                        leaf_value: Some(value),
                        feature: None,
                        split_value: None,
                        left: None,
                        right: None,
                    } => {
                        if value.is_nan() {
                            return Err(malformed(&path, "leaf value is NaN"));
                        }
                        done.push(Tree::new(TreeNode::Leaf(*value)));
                    }
                    TreeNodeRecord {
                        leaf_value: Some(_),
                        ..
                    } => return Err(malformed(&path, "leaf value alongside split fields")),
                    TreeNodeRecord {
                        leaf_value: None,
                        feature: Some(feature),
                        split_value: Some(split),
                        left: Some(left),
                        right: Some(right),
                    } => {
                        if split.is_nan() {
                            return Err(malformed(&path, "split value is NaN"));
                        }
                        steps.push(Step::Join(*feature, *split));
                        steps.push(Step::Visit(&**right, depth + 1, "right"));
                        steps.push(Step::Visit(&**left, depth + 1, "left"));
                    }
                    TreeNodeRecord { feature: None, .. } => {
                        return Err(malformed(&path, "missing feature index"))
                    }
                    TreeNodeRecord {
                        split_value: None, ..
                    } => return Err(malformed(&path, "missing split value")),
                    _ => return Err(malformed(&path, "missing child")),
                }
            }
            Step::Join(feature, split) => match (done.pop(), done.pop()) {
                (Some(right), Some(left)) => done.push(Tree::new(TreeNode::split(
                    feature,
                    split,
                    left.into_root(),
                    right.into_root(),
                ))),
                _ => break,
            },
        }
    }

    match done.pop() {
        Some(root) if done.is_empty() => Ok(root),
        _ => Err(malformed(&["root"], "incomplete tree")),
    }
}

fn node_to_record(root: &TreeNode) -> TreeNodeRecord {
    enum Step<'a> {
        Visit(&'a TreeNode),
        Join(i64, f64),
    }

    let mut steps = vec![Step::Visit(root)];
    let mut done: Vec<TreeNodeRecord> = Vec::new();
    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(TreeNode::Leaf(value)) => done.push(TreeNodeRecord::leaf(*value)),
            Step::Visit(TreeNode::Internal {
                feature,
                split,
                left,
                right,
            }) => {
                steps.push(Step::Join(*feature, *split));
                steps.push(Step::Visit(&**right));
                steps.push(Step::Visit(&**left));
            }
            Step::Join(feature, split) => {
                if let (Some(right), Some(left)) = (done.pop(), done.pop()) {
                    done.push(TreeNodeRecord::split(feature, split, left, right));
                }
            }
        }
    }
    done.pop().unwrap_or_default()
}

impl SerDe for Forest {
    type Error = ForestError;

    fn save<A: Write>(&self, writer: &mut A) -> Result<(), Self::Error> {
        serde_json::to_writer(writer, &self.to_record())?;
        Ok(())
    }

    fn load<A: Read>(reader: &mut A) -> Result<Self, Self::Error> {
        let record = read_forest(reader)?;
        Forest::from_record(&record)
    }
}
