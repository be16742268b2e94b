use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::models::{ArtifactInfo, BuiltinArtifact};
use crate::pipeline::{EncoderRegistry, ForestModel};

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not downloaded: {0}")]
    NotDownloaded(String),
    #[error("Download error: {0}")]
    DownloadError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Artifact verification failed")]
    VerificationFailed,
    #[error("Hash mismatch: expected {expected}, got {actual} for {file_type} file")]
    HashMismatch {
        file_type: String,
        expected: String,
        actual: String,
    },
}

/// Parses a model artifact file (`model.json`).
pub fn load_model_file<P: AsRef<Path>>(path: P) -> Result<ForestModel, ArtifactError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Parses an encoder artifact file (`encoders.json`): a map from field
/// name to its ordered vocabulary.
pub fn load_encoders_file<P: AsRef<Path>>(path: P) -> Result<EncoderRegistry, ArtifactError> {
    let bytes = fs::read(path)?;
    let vocabularies: HashMap<String, Vec<String>> = serde_json::from_slice(&bytes)?;
    Ok(EncoderRegistry::from_vocabularies(vocabularies))
}

/// Acquires, verifies, and loads the persisted artifact pairs the
/// predictor is built from.
#[derive(Clone)]
pub struct ArtifactManager {
    artifacts_dir: PathBuf,
    download_lock: Arc<Mutex<()>>,
}

impl ArtifactManager {
    /// Creates a new ArtifactManager with the default artifacts directory
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::get_default_artifacts_dir())
    }

    /// Returns the default artifacts directory path
    pub fn get_default_artifacts_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("TELLER_CACHE") {
            return PathBuf::from(path).join("artifacts");
        }

        // 2. Use platform-specific cache directory
        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("teller").join("artifacts");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("teller").join("artifacts");
        }

        // 4. If all else fails, use system temp directory (platform agnostic)
        env::temp_dir().join("teller").join("artifacts")
    }

    pub fn new<P: AsRef<Path>>(artifacts_dir: P) -> io::Result<Self> {
        let artifacts_dir = artifacts_dir.as_ref().to_path_buf();
        fs::create_dir_all(&artifacts_dir)?;
        Ok(Self {
            artifacts_dir,
            download_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn get_model_path(&self, artifact: BuiltinArtifact) -> PathBuf {
        let info = artifact.get_artifact_info();
        self.artifacts_dir.join(info.name).join("model.json")
    }

    pub fn get_encoders_path(&self, artifact: BuiltinArtifact) -> PathBuf {
        let info = artifact.get_artifact_info();
        self.artifacts_dir.join(info.name).join("encoders.json")
    }

    pub fn is_downloaded(&self, artifact: BuiltinArtifact) -> bool {
        let model_path = self.get_model_path(artifact);
        let encoders_path = self.get_encoders_path(artifact);
        log::info!("Checking if artifact pair is downloaded:");
        log::info!("  Model path: {:?} (exists: {})", model_path, model_path.exists());
        log::info!("  Encoders path: {:?} (exists: {})", encoders_path, encoders_path.exists());
        model_path.exists() && encoders_path.exists()
    }

    pub async fn download_artifact(&self, artifact: BuiltinArtifact) -> Result<(), ArtifactError> {
        let info = artifact.get_artifact_info();
        let _lock = self.download_lock.lock().await;

        // Create directory
        let artifact_dir = self.artifacts_dir.join(info.name);
        log::info!("Creating artifact directory at {:?}", artifact_dir);
        fs::create_dir_all(&artifact_dir)?;

        // Handle model file
        let model_path = self.get_model_path(artifact);
        log::info!("Model path: {:?}", model_path);
        let model_result = if model_path.exists() {
            log::info!("Model file exists at {:?}, verifying...", model_path);
            if !self.verify_file(&model_path, info.model_hash)? {
                log::warn!("Model file verification failed, redownloading");
                self.download_and_verify_model(&info, &model_path).await
            } else {
                log::info!("Existing model file verified successfully");
                Ok(())
            }
        } else {
            log::info!("Model file does not exist, downloading...");
            self.download_and_verify_model(&info, &model_path).await
        };

        // Handle encoders file
        let encoders_path = self.get_encoders_path(artifact);
        log::info!("Encoders path: {:?}", encoders_path);
        let encoders_result = if encoders_path.exists() {
            log::info!("Encoders file exists at {:?}, verifying...", encoders_path);
            if !self.verify_file(&encoders_path, info.encoders_hash)? {
                log::warn!("Encoders file verification failed, redownloading");
                self.download_and_verify_encoders(&info, &encoders_path).await
            } else {
                log::info!("Existing encoders file verified successfully");
                Ok(())
            }
        } else {
            log::info!("Encoders file does not exist, downloading...");
            self.download_and_verify_encoders(&info, &encoders_path).await
        };

        // Handle results
        match (model_result, encoders_result) {
            (Ok(()), Ok(())) => {
                log::info!("Model and encoders ready to use");
                Ok(())
            }
            (Err(e), _) => {
                log::error!("Failed to setup model file: {}", e);
                // Cleanup on failure
                let _ = self.remove_download(artifact);
                Err(e)
            }
            (_, Err(e)) => {
                log::error!("Failed to setup encoders file: {}", e);
                // Cleanup on failure
                let _ = self.remove_download(artifact);
                Err(e)
            }
        }
    }

    fn verify_file(&self, path: &Path, expected_hash: &str) -> Result<bool, ArtifactError> {
        log::info!("Verifying file: {:?}", path);
        let bytes = fs::read(path)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = format!("{:x}", hasher.finalize());
        log::info!("Calculated hash: {}", hash);
        log::info!("Expected hash:   {}", expected_hash);
        Ok(hash == expected_hash)
    }

    pub fn verify_artifact(&self, artifact: BuiltinArtifact) -> Result<bool, ArtifactError> {
        let info = artifact.get_artifact_info();
        let model_path = self.get_model_path(artifact);
        let encoders_path = self.get_encoders_path(artifact);

        if !model_path.exists() || !encoders_path.exists() {
            log::info!("One or both artifact files do not exist");
            return Ok(false);
        }

        let model_ok = self.verify_file(&model_path, info.model_hash)?;
        let encoders_ok = self.verify_file(&encoders_path, info.encoders_hash)?;

        log::info!("Verification results:");
        log::info!("  Model hash verification: {}", model_ok);
        log::info!("  Encoders hash verification: {}", encoders_ok);

        Ok(model_ok && encoders_ok)
    }

    async fn download_and_verify_file(
        &self,
        url: &str,
        path: &Path,
        expected_hash: &str,
        file_type: &str,
    ) -> Result<(), ArtifactError> {
        log::info!("Downloading {} file from {} to {:?}", file_type, url, path);
        let response = reqwest::get(url).await?;
        log::info!("Download response status: {}", response.status());
        let bytes = response.bytes().await?;
        log::info!("Downloaded {} bytes", bytes.len());

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = format!("{:x}", hasher.finalize());

        if hash != expected_hash {
            log::error!("{} hash mismatch: expected {}, got {}", file_type, expected_hash, hash);
            return Err(ArtifactError::HashMismatch {
                file_type: file_type.to_string(),
                expected: expected_hash.to_string(),
                actual: hash,
            });
        }

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        log::info!("Writing {} bytes to {:?}", bytes.len(), path);
        fs::write(path, bytes)?;

        // Verify after writing
        if !self.verify_file(path, expected_hash)? {
            return Err(ArtifactError::VerificationFailed);
        }

        log::info!("{} file downloaded and verified successfully", file_type);
        Ok(())
    }

    async fn download_and_verify_model(&self, info: &ArtifactInfo, path: &Path) -> Result<(), ArtifactError> {
        self.download_and_verify_file(info.model_url, path, info.model_hash, "model").await
    }

    async fn download_and_verify_encoders(&self, info: &ArtifactInfo, path: &Path) -> Result<(), ArtifactError> {
        self.download_and_verify_file(info.encoders_url, path, info.encoders_hash, "encoders").await
    }

    pub fn remove_download(&self, artifact: BuiltinArtifact) -> Result<(), ArtifactError> {
        let model_path = self.get_model_path(artifact);
        let encoders_path = self.get_encoders_path(artifact);

        if model_path.exists() {
            fs::remove_file(&model_path)?;
        }
        if encoders_path.exists() {
            fs::remove_file(&encoders_path)?;
        }
        Ok(())
    }

    /// Ensures that an artifact pair is downloaded and verified.
    /// If the pair doesn't exist, it will be downloaded.
    /// If verification fails, it will be re-downloaded.
    pub async fn ensure_downloaded(&self, artifact: BuiltinArtifact) -> Result<(), ArtifactError> {
        log::info!("Checking if artifact {:?} is downloaded...", artifact);
        if !self.is_downloaded(artifact) {
            log::info!("Artifact not found, downloading...");
            self.download_artifact(artifact).await?;
        } else {
            log::info!("Artifact exists, verifying...");
            if !self.verify_artifact(artifact)? {
                log::info!("Artifact verification failed, re-downloading...");
                self.remove_download(artifact)?;
                self.download_artifact(artifact).await?;
            } else {
                log::info!("Artifact verification successful");
            }
        }
        Ok(())
    }

    /// Loads and parses the model artifact for a downloaded pair.
    pub fn load_model(&self, artifact: BuiltinArtifact) -> Result<ForestModel, ArtifactError> {
        let path = self.get_model_path(artifact);
        if !path.exists() {
            return Err(ArtifactError::NotDownloaded(format!("{:?}", artifact)));
        }
        load_model_file(path)
    }

    /// Loads and parses the encoder artifact for a downloaded pair.
    pub fn load_encoders(&self, artifact: BuiltinArtifact) -> Result<EncoderRegistry, ArtifactError> {
        let path = self.get_encoders_path(artifact);
        if !path.exists() {
            return Err(ArtifactError::NotDownloaded(format!("{:?}", artifact)));
        }
        load_encoders_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_artifacts_dir() {
        // Test with environment variable
        env::set_var("TELLER_CACHE", "/tmp/test-cache");
        let path = ArtifactManager::get_default_artifacts_dir();
        assert!(path.to_str().unwrap().contains("/tmp/test-cache/artifacts"));
        env::remove_var("TELLER_CACHE");

        // Test without environment variable
        let path = ArtifactManager::get_default_artifacts_dir();
        assert!(path.to_str().unwrap().contains("teller/artifacts"));
    }

    #[test]
    fn test_artifact_paths() {
        let dir = env::temp_dir().join("teller-test-paths");
        let manager = ArtifactManager::new(&dir).unwrap();
        let model_path = manager.get_model_path(BuiltinArtifact::BankMarketing);
        let encoders_path = manager.get_encoders_path(BuiltinArtifact::BankMarketing);
        assert!(model_path.ends_with("bank-marketing/model.json"));
        assert!(encoders_path.ends_with("bank-marketing/encoders.json"));
    }

    #[test]
    fn test_verify_file_rejects_corrupted_bytes() {
        let dir = env::temp_dir().join("teller-test-verify");
        let manager = ArtifactManager::new(&dir).unwrap();
        let path = dir.join("scratch.json");
        fs::write(&path, b"{}").unwrap();

        let mut hasher = Sha256::new();
        hasher.update(b"{}");
        let expected = format!("{:x}", hasher.finalize());

        assert!(manager.verify_file(&path, &expected).unwrap());

        fs::write(&path, b"corrupted data").unwrap();
        assert!(!manager.verify_file(&path, &expected).unwrap());
    }
}
