/// Represents the available built-in artifact bundles in the library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinArtifact {
    /// Random forest trained on the bank marketing campaign dataset
    ///
    /// Characteristics:
    /// - 16 feature columns (7 numeric, 9 label-encoded)
    /// - 100 trees
    /// - Size: ~12MB
    BankMarketing,
}

/// Download locations and content hashes for one artifact pair
#[derive(Debug, Clone)]
pub struct ArtifactInfo {
    pub name: &'static str,
    pub model_url: &'static str,
    pub model_hash: &'static str,
    pub encoders_url: &'static str,
    pub encoders_hash: &'static str,
}

/// Characteristics of an artifact pair including its shape and size
#[derive(Debug, Clone)]
pub struct ArtifactCharacteristics {
    /// Number of feature columns the model was fit on
    pub feature_count: usize,
    /// Number of trees in the forest
    pub tree_count: usize,
    /// Approximate size of the model artifact on disk
    pub artifact_size_mb: usize,
}

impl BuiltinArtifact {
    /// Get the characteristics of the artifact pair
    pub fn characteristics(&self) -> ArtifactCharacteristics {
        match self {
            Self::BankMarketing => ArtifactCharacteristics {
                feature_count: 16,
                tree_count: 100,
                artifact_size_mb: 12,
            },
        }
    }

    /// Get the download locations and hashes for the artifact pair
    pub fn get_artifact_info(&self) -> ArtifactInfo {
        match self {
            Self::BankMarketing => ArtifactInfo {
                name: "bank-marketing",
                model_url: "https://huggingface.co/axar-ai/bank-marketing-forest/resolve/main/model.json",
                model_hash: "5c7d9a1f2e0b83d46c1a9e7f05b2d8a34f6e1c09b7a85d23e4f0c6a19d8b3e72",
                encoders_url: "https://huggingface.co/axar-ai/bank-marketing-forest/resolve/main/encoders.json",
                encoders_hash: "a31f08c5d2e97b64f0a8c3d15e6b29f748d0a1c6e3b57f92d84a0e6c1b39f508",
            },
        }
    }
}
