use std::sync::Arc;

use log::{info, warn};

use super::error::PipelineError;
use super::forest::ForestModel;
use super::predictor::Predictor;
use super::registry::EncoderRegistry;
use super::schema::SCHEMA;
use crate::artifacts::{self, ArtifactManager};
use crate::models::BuiltinArtifact;

/// A builder for constructing a Predictor with a fluent interface.
#[derive(Default, Debug)]
pub struct PredictorBuilder {
    model_path: Option<String>,
    encoders_path: Option<String>,
    model: Option<ForestModel>,
    registry: Option<EncoderRegistry>,
}

impl PredictorBuilder {
    pub fn new() -> Self {
        Self {
            model_path: None,
            encoders_path: None,
            model: None,
            registry: None,
        }
    }

    /// Loads a built-in artifact pair from the default artifact cache.
    ///
    /// # Errors
    /// Fails with a `Build` error if artifacts are already set, the pair
    /// is not downloaded yet, or either file fails to load or parse.
    pub fn with_builtin(mut self, artifact: BuiltinArtifact) -> Result<Self, PipelineError> {
        if self.model.is_some() || self.registry.is_some() {
            return Err(PipelineError::Build("Artifacts already set".to_string()));
        }

        let manager = ArtifactManager::new_default()
            .map_err(|e| PipelineError::Build(format!("Failed to create artifact manager: {}", e)))?;

        if !manager.is_downloaded(artifact) {
            return Err(PipelineError::Build(format!(
                "Artifact '{:?}' is not downloaded. Please download it first using ArtifactManager::download_artifact()",
                artifact
            )));
        }

        let model_path = manager.get_model_path(artifact);
        let encoders_path = manager.get_encoders_path(artifact);

        let model = manager
            .load_model(artifact)
            .map_err(|e| PipelineError::Build(format!("Failed to load model artifact: {}", e)))?;
        info!("Model artifact loaded successfully");

        let registry = manager
            .load_encoders(artifact)
            .map_err(|e| PipelineError::Build(format!("Failed to load encoder artifact: {}", e)))?;
        info!("Encoder artifact loaded successfully");

        self.model_path = Some(model_path.to_string_lossy().to_string());
        self.encoders_path = Some(encoders_path.to_string_lossy().to_string());
        self.model = Some(model);
        self.registry = Some(registry);
        Ok(self)
    }

    /// Loads the artifact pair from explicit file paths.
    ///
    /// # Errors
    /// Fails with a `Build` error if the paths are empty, artifacts are
    /// already set, either file does not exist, or parsing fails.
    pub fn with_artifact_files(
        mut self,
        model_path: &str,
        encoders_path: &str,
    ) -> Result<Self, PipelineError> {
        if model_path.is_empty() || encoders_path.is_empty() {
            return Err(PipelineError::Build("Artifact paths cannot be empty".to_string()));
        }
        if self.model.is_some() || self.registry.is_some() {
            return Err(PipelineError::Build("Artifacts already set".to_string()));
        }
        if !std::path::Path::new(model_path).exists() {
            return Err(PipelineError::Build(format!("Model file not found: {}", model_path)));
        }
        if !std::path::Path::new(encoders_path).exists() {
            return Err(PipelineError::Build(format!("Encoder file not found: {}", encoders_path)));
        }

        let model = artifacts::load_model_file(model_path)
            .map_err(|e| PipelineError::Build(format!("Failed to load model artifact: {}", e)))?;
        info!("Model artifact loaded successfully");

        let registry = artifacts::load_encoders_file(encoders_path)
            .map_err(|e| PipelineError::Build(format!("Failed to load encoder artifact: {}", e)))?;
        info!("Encoder artifact loaded successfully");

        self.model_path = Some(model_path.to_string());
        self.encoders_path = Some(encoders_path.to_string());
        self.model = Some(model);
        self.registry = Some(registry);
        Ok(self)
    }

    /// Injects already-constructed artifacts, bypassing the filesystem.
    /// This is how tests exercise the pipeline with fakes.
    pub fn with_artifacts(
        mut self,
        model: ForestModel,
        registry: EncoderRegistry,
    ) -> Result<Self, PipelineError> {
        if self.model.is_some() || self.registry.is_some() {
            return Err(PipelineError::Build("Artifacts already set".to_string()));
        }
        self.model = Some(model);
        self.registry = Some(registry);
        Ok(self)
    }

    /// Builds and returns the final Predictor instance.
    ///
    /// Validates the model structure (trees present, importances aligned,
    /// node indices in range) so a malformed artifact fails here rather
    /// than on every request.
    pub fn build(self) -> Result<Predictor, PipelineError> {
        let model = self
            .model
            .ok_or_else(|| PipelineError::Build("No model artifact set".to_string()))?;
        let registry = self
            .registry
            .ok_or_else(|| PipelineError::Build("No encoder artifact set".to_string()))?;

        model.validate()?;
        info!("Model structure validated successfully");

        for spec in SCHEMA.iter().filter(|s| s.is_categorical()) {
            if !registry.contains(spec.name) {
                warn!("No encoder registered for categorical field '{}'", spec.name);
            }
        }
        for column in model.feature_names() {
            if super::schema::field(column).is_none() {
                warn!("Model expects column '{}' outside the input schema", column);
            }
        }

        Ok(Predictor {
            model_path: self.model_path,
            encoders_path: self.encoders_path,
            registry: Arc::new(registry),
            model: Arc::new(model),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::forest::{DecisionTree, TreeNode};

    fn tiny_model() -> ForestModel {
        ForestModel::new(
            vec!["age".to_string()],
            vec![DecisionTree {
                nodes: vec![
                    TreeNode { feature: 0, threshold: 40.0, left: 1, right: 2, value: [0.0, 0.0] },
                    TreeNode { feature: -2, threshold: 0.0, left: -1, right: -1, value: [1.0, 3.0] },
                    TreeNode { feature: -2, threshold: 0.0, left: -1, right: -1, value: [3.0, 1.0] },
                ],
            }],
            vec![1.0],
        )
    }

    #[test]
    fn test_build_requires_both_artifacts() {
        let result = PredictorBuilder::new().build();
        assert!(matches!(result, Err(PipelineError::Build(_))));
    }

    #[test]
    fn test_artifacts_cannot_be_set_twice() {
        let result = PredictorBuilder::new()
            .with_artifacts(tiny_model(), EncoderRegistry::new())
            .unwrap()
            .with_artifacts(tiny_model(), EncoderRegistry::new());
        assert!(matches!(result, Err(PipelineError::Build(_))));
    }

    #[test]
    fn test_build_validates_model_structure() {
        let no_trees = ForestModel::new(vec!["age".to_string()], vec![], vec![1.0]);
        let result = PredictorBuilder::new()
            .with_artifacts(no_trees, EncoderRegistry::new())
            .unwrap()
            .build();
        assert!(matches!(result, Err(PipelineError::Build(_))));
    }

    #[test]
    fn test_build_succeeds_with_valid_artifacts() {
        let predictor = PredictorBuilder::new()
            .with_artifacts(tiny_model(), EncoderRegistry::new())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(predictor.info().tree_count, 1);
    }
}
