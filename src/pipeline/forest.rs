use serde::{Deserialize, Serialize};

use super::error::PipelineError;

/// One node of an array-encoded decision tree.
///
/// Interior nodes route on `feature`: the `left` child is taken when the
/// value is `<= threshold`, the `right` child otherwise. A node with a
/// negative `left` index is a leaf and `value` holds its per-class sample
/// counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub feature: i32,
    pub threshold: f32,
    pub left: i32,
    pub right: i32,
    pub value: [f32; 2],
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.left < 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walks the tree for one feature row and returns the normalized
    /// class distribution at the reached leaf.
    fn class_distribution(&self, features: &[f32]) -> Result<[f32; 2], PipelineError> {
        if self.nodes.is_empty() {
            return Err(PipelineError::Prediction("tree has no nodes".to_string()));
        }

        let mut index = 0usize;
        // A well-formed tree reaches a leaf in at most nodes.len() steps.
        for _ in 0..self.nodes.len() {
            let node = &self.nodes[index];
            if node.is_leaf() {
                let total = node.value[0] + node.value[1];
                if total <= 0.0 {
                    return Err(PipelineError::Prediction(format!(
                        "leaf node {} has an empty class distribution",
                        index
                    )));
                }
                return Ok([node.value[0] / total, node.value[1] / total]);
            }

            let feature = node.feature as usize;
            let value = *features.get(feature).ok_or_else(|| {
                PipelineError::Prediction(format!(
                    "node {} routes on feature {} but the vector has {} columns",
                    index,
                    feature,
                    features.len()
                ))
            })?;
            let child = if value <= node.threshold { node.left } else { node.right };
            index = usize::try_from(child).map_err(|_| {
                PipelineError::Prediction(format!("node {} has an invalid child index {}", index, child))
            })?;
            if index >= self.nodes.len() {
                return Err(PipelineError::Prediction(format!(
                    "child index {} is out of bounds for a tree of {} nodes",
                    index,
                    self.nodes.len()
                )));
            }
        }

        Err(PipelineError::Prediction("tree traversal did not reach a leaf".to_string()))
    }
}

/// The trained classifier artifact: a random forest over a fixed,
/// ordered feature column list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestModel {
    feature_names: Vec<String>,
    trees: Vec<DecisionTree>,
    importances: Vec<f32>,
}

impl ForestModel {
    pub fn new(feature_names: Vec<String>, trees: Vec<DecisionTree>, importances: Vec<f32>) -> Self {
        Self { feature_names, trees, importances }
    }

    /// The exact column order the model was fit on.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Relative importance scores, aligned to `feature_names`.
    pub fn importances(&self) -> &[f32] {
        &self.importances
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Probability estimates `[P(class 0), P(class 1)]`, averaged over
    /// the per-tree leaf distributions.
    pub fn predict_proba(&self, features: &[f32]) -> Result<[f32; 2], PipelineError> {
        if features.len() != self.feature_names.len() {
            return Err(PipelineError::Prediction(format!(
                "feature vector has {} columns, model expects {}",
                features.len(),
                self.feature_names.len()
            )));
        }
        if self.trees.is_empty() {
            return Err(PipelineError::Prediction("model has no trees".to_string()));
        }

        let mut sums = [0.0f32, 0.0f32];
        for tree in &self.trees {
            let dist = tree.class_distribution(features)?;
            sums[0] += dist[0];
            sums[1] += dist[1];
        }
        let n = self.trees.len() as f32;
        Ok([sums[0] / n, sums[1] / n])
    }

    /// The decided class: 1 when the positive class wins the averaged
    /// distribution, 0 otherwise (ties go to class 0).
    pub fn predict(&self, features: &[f32]) -> Result<u8, PipelineError> {
        let proba = self.predict_proba(features)?;
        Ok(if proba[1] > proba[0] { 1 } else { 0 })
    }

    /// Structural validation run once at predictor build time, so that a
    /// malformed artifact fails construction instead of every request.
    pub(crate) fn validate(&self) -> Result<(), PipelineError> {
        if self.feature_names.is_empty() {
            return Err(PipelineError::Build("model has no feature columns".to_string()));
        }
        if self.trees.is_empty() {
            return Err(PipelineError::Build("model has no trees".to_string()));
        }
        if self.importances.len() != self.feature_names.len() {
            return Err(PipelineError::Build(format!(
                "model has {} importance scores for {} feature columns",
                self.importances.len(),
                self.feature_names.len()
            )));
        }

        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(PipelineError::Build(format!("tree {} has no nodes", t)));
            }
            for (n, node) in tree.nodes.iter().enumerate() {
                if node.is_leaf() {
                    continue;
                }
                let feature = node.feature as usize;
                if node.feature < 0 || feature >= self.feature_names.len() {
                    return Err(PipelineError::Build(format!(
                        "tree {} node {} routes on unknown feature index {}",
                        t, n, node.feature
                    )));
                }
                for child in [node.left, node.right] {
                    if child < 0 || child as usize >= tree.nodes.len() {
                        return Err(PipelineError::Build(format!(
                            "tree {} node {} has child index {} out of bounds",
                            t, n, child
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}
