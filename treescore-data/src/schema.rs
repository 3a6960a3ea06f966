//! Schema
//! ---
//!
//! The record types a forest is persisted and transmitted as.  Every field is optional
//! on the wire; whether a record describes a valid node is decided by the model that
//! consumes it, not here.

/// One node of a serialized tree.  Leaves carry `leaf_value`; internal nodes carry
/// `feature`, `split_value`, `left` and `right`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeNodeRecord {
    /// Feature index to split on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<i64>,

    /// Values strictly below this go left
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_value: Option<f64>,

    /// Left subtree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<TreeNodeRecord>>,

    /// Right subtree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<TreeNodeRecord>>,

    /// Score contribution of a leaf
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaf_value: Option<f64>,
}

impl TreeNodeRecord {
    /// A leaf record
    pub fn leaf(value: f64) -> Self {
        TreeNodeRecord {
            leaf_value: Some(value),
            ..Default::default()
        }
    }

    /// An internal record with both children
    pub fn split(feature: i64, split_value: f64, left: TreeNodeRecord, right: TreeNodeRecord) -> Self {
        TreeNodeRecord {
            feature: Some(feature),
            split_value: Some(split_value),
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
            leaf_value: None,
        }
    }
}

/// A serialized forest: the roots of its trees, in order.  Dropping it unlinks nodes
/// one at a time, so arbitrarily deep trees are released without recursion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForestRecord {
    /// Tree roots
    #[serde(default)]
    pub trees: Vec<TreeNodeRecord>,
}

impl Drop for ForestRecord {
    fn drop(&mut self) {
        let mut stack: Vec<TreeNodeRecord> = self.trees.drain(..).collect();
        while let Some(mut node) = stack.pop() {
            if let Some(left) = node.left.take() {
                stack.push(*left);
            }
            if let Some(right) = node.right.take() {
                stack.push(*right);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_omits_split_fields() {
        let json = serde_json::to_string(&TreeNodeRecord::leaf(0.25)).expect("should serialize");
        assert_eq!(json, r#"{"leaf_value":0.25}"#);
    }

    #[test]
    fn test_parse_nested() {
        let json = r#"{
            "trees": [
                {"feature": 3, "split_value": 0.5,
                 "left": {"leaf_value": 1.0},
                 "right": {"leaf_value": -1.0}},
                {"leaf_value": 2.0}
            ]
        }"#;
        let forest: ForestRecord = serde_json::from_str(json).expect("should parse");
        assert_eq!(forest.trees.len(), 2);
        assert_eq!(
            forest.trees[0],
            TreeNodeRecord::split(3, 0.5, TreeNodeRecord::leaf(1.0), TreeNodeRecord::leaf(-1.0))
        );
        assert_eq!(forest.trees[1], TreeNodeRecord::leaf(2.0));
    }

    #[test]
    fn test_missing_fields_parse_as_none() {
        // Shape validation happens on conversion, not parsing
        let node: TreeNodeRecord = serde_json::from_str(r#"{"feature": 1}"#).expect("should parse");
        assert_eq!(node.feature, Some(1));
        assert!(node.split_value.is_none());
        assert!(node.left.is_none());

        let forest: ForestRecord = serde_json::from_str("{}").expect("should parse");
        assert!(forest.trees.is_empty());
    }

    #[test]
    fn test_drop_deep_forest() {
        let mut node = TreeNodeRecord::leaf(0.0);
        for _ in 0..200_000 {
            node = TreeNodeRecord::split(0, 0.5, TreeNodeRecord::leaf(1.0), node);
        }
        let forest = ForestRecord { trees: vec![node] };
        assert_eq!(forest.trees.len(), 1);
        drop(forest);
    }
}
