use std::collections::VecDeque;
use std::convert::TryFrom;
use std::ops::Range;

use hashbrown::HashMap;
use log::debug;

use ts_core::error::EvalError;
use ts_core::model::Evaluator;
use ts_data::datatypes::FeatureVector;

use crate::error::ForestError;
use crate::trees::{Forest, TreeNode};

/// Child offset marking a leaf.  Offset 0 is the first tree's root, which is never
/// anyone's child.
const LEAF: u32 = 0;

// Forests reading at most this many distinct features gather them into a stack
// array; larger ones fall back to the heap.
const STACK_FEATURES: usize = 400;

#[derive(Debug, Clone, Default)]
/// A whole forest flattened into one arena of parallel arrays, addressed by `u32`
/// offsets.  Siblings are stored next to each other, so an internal node only records
/// where its left child lives.
pub struct CompiledForest {
    /// Dense feature slot read by each internal node
    slots: Vec<u32>,

    /// Split threshold for internal nodes, payload for leaves
    values: Vec<f64>,

    /// Offset of the left child; the right child follows it.  `LEAF` on leaves.
    children: Vec<u32>,

    /// Offset of each tree's root, in forest order
    roots: Vec<u32>,

    /// Feature index behind each dense slot
    feature_ids: Vec<i64>,
}

impl CompiledForest {
    /// Compiles every tree of `forest`.  Routing and leaf values are copied verbatim.
    pub fn new(forest: &Forest) -> Result<Self, ForestError> {
        let mut compiler = Compiler::default();
        for tree in forest.trees() {
            compiler.push_tree(tree.root())?;
        }
        let compiled = compiler.out;
        debug!(
            "Compiled {} trees into {} nodes reading {} features",
            compiled.roots.len(),
            compiled.values.len(),
            compiled.feature_ids.len()
        );
        Ok(compiled)
    }

    /// Number of trees
    pub fn num_trees(&self) -> usize {
        self.roots.len()
    }

    /// Number of nodes across all trees
    pub fn num_nodes(&self) -> usize {
        self.values.len()
    }

    /// Distinct feature indices read by the forest, in slot order
    pub fn feature_ids(&self) -> &[i64] {
        &self.feature_ids
    }

    /// Looks up every feature the forest reads exactly once and hands the dense values
    /// to `f`.  Missing features read as `0.0`.
    pub fn with_gathered<T, F>(&self, data: &FeatureVector, f: F) -> T
    where
        F: FnOnce(&[f64]) -> T,
    {
        let n = self.feature_ids.len();
        if n <= STACK_FEATURES {
            let mut buf = [0f64; STACK_FEATURES];
            self.gather(data, &mut buf[..n]);
            f(&buf[..n])
        } else {
            let mut buf = vec![0f64; n];
            self.gather(data, &mut buf);
            f(&buf)
        }
    }

    #[inline]
    fn gather(&self, data: &FeatureVector, out: &mut [f64]) {
        for (slot, &id) in out.iter_mut().zip(self.feature_ids.iter()) {
            *slot = data.get(id);
        }
    }

    /// Scores the whole forest
    pub fn predict(&self, data: &FeatureVector) -> f64 {
        self.with_gathered(data, |values| self.predict_trees(values, 0..self.roots.len()))
    }

    /// Sums the trees in `trees`, in order and starting from `0.0`, over features
    /// already gathered by [`with_gathered`](Self::with_gathered).
    #[inline]
    pub fn predict_trees(&self, values: &[f64], trees: Range<usize>) -> f64 {
        let mut total = 0.0;
        for &root in self.roots[trees].iter() {
            total += self.predict_tree(root, values);
        }
        total
    }

    #[inline]
    fn predict_tree(&self, root: u32, values: &[f64]) -> f64 {
        let mut idx = root as usize;
        loop {
            let left = self.children[idx];
            if left == LEAF {
                return self.values[idx];
            }
            // Same predicate as the node walk: strictly less goes left, everything
            // else (ties, NaN) goes right
            let go_right = !(values[self.slots[idx] as usize] < self.values[idx]);
            idx = left as usize + go_right as usize;
        }
    }
}

/// Lays trees out breadth first so both children of a node are adjacent.
#[derive(Default)]
struct Compiler {
    out: CompiledForest,
    slot_of: HashMap<i64, u32>,
}

impl Compiler {
    fn alloc(&mut self) -> Result<u32, ForestError> {
        let idx = u32::try_from(self.out.values.len()).map_err(|_| ForestError::TooLarge)?;
        self.out.slots.push(0);
        self.out.values.push(0.);
        self.out.children.push(LEAF);
        Ok(idx)
    }

    fn slot(&mut self, feature: i64) -> u32 {
        let ids = &mut self.out.feature_ids;
        *self.slot_of.entry(feature).or_insert_with(|| {
            ids.push(feature);
            (ids.len() - 1) as u32
        })
    }

    fn push_tree(&mut self, root: &TreeNode) -> Result<(), ForestError> {
        let root_idx = self.alloc()?;
        self.out.roots.push(root_idx);

        let mut queue = VecDeque::new();
        queue.push_back((root, root_idx as usize));
        while let Some((node, idx)) = queue.pop_front() {
            match node {
                TreeNode::Leaf(value) => {
                    self.out.values[idx] = *value;
                }
                TreeNode::Internal {
                    feature,
                    split,
                    left,
                    right,
                } => {
                    let l = self.alloc()?;
                    let r = self.alloc()?;
                    debug_assert_eq!(l + 1, r);
                    self.out.slots[idx] = self.slot(*feature);
                    self.out.values[idx] = *split;
                    self.out.children[idx] = l;
                    queue.push_back((&**left, l as usize));
                    queue.push_back((&**right, r as usize));
                }
            }
        }
        Ok(())
    }
}

/// Single-threaded evaluator over a [`CompiledForest`].
#[derive(Debug, Clone)]
pub struct CompiledEvaluator {
    forest: CompiledForest,
}

impl CompiledEvaluator {
    /// Compiles `forest` once; every later call only reads the arena
    pub fn new(forest: &Forest) -> Result<Self, ForestError> {
        Ok(CompiledEvaluator {
            forest: CompiledForest::new(forest)?,
        })
    }

    /// The compiled arena
    pub fn compiled(&self) -> &CompiledForest {
        &self.forest
    }
}

impl Evaluator<FeatureVector, f64> for CompiledEvaluator {
    fn evaluate(&self, payload: &FeatureVector) -> Result<f64, EvalError> {
        Ok(self.forest.predict(payload))
    }
}
