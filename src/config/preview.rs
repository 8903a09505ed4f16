//! Preview document configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::preview::ArtifactNaming;

/// Preview document configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewConfig {
    /// Extension of source documents, without the dot
    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    /// Extension of rendered artifacts, without the dot
    #[serde(default = "default_artifact_extension")]
    pub artifact_extension: String,

    /// Viewer page loaded by the bootstrap document
    #[serde(default = "default_viewer_path")]
    pub viewer_path: PathBuf,

    /// URI scheme the host tracks previews under
    #[serde(default = "default_uri_scheme")]
    pub uri_scheme: String,

    /// Title of the preview tab
    #[serde(default = "default_title")]
    pub title: String,
}

impl PreviewConfig {
    /// Extension pair for artifact derivation.
    pub fn naming(&self) -> ArtifactNaming {
        ArtifactNaming::new(&self.source_extension, &self.artifact_extension)
    }

    /// Validate preview configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for ext in [&self.source_extension, &self.artifact_extension] {
            if ext.is_empty() || ext.contains('.') || ext.contains('/') {
                return Err(ValidationError::InvalidExtension(ext.clone()));
            }
        }
        if self.uri_scheme.is_empty() {
            return Err(ValidationError::MissingRequired("preview.uri_scheme"));
        }
        Ok(())
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            source_extension: default_source_extension(),
            artifact_extension: default_artifact_extension(),
            viewer_path: default_viewer_path(),
            uri_scheme: default_uri_scheme(),
            title: default_title(),
        }
    }
}

fn default_source_extension() -> String {
    "tex".to_string()
}

fn default_artifact_extension() -> String {
    "pdf".to_string()
}

fn default_viewer_path() -> PathBuf {
    PathBuf::from("pdfjs/web/viewer.html")
}

fn default_uri_scheme() -> String {
    "latex-workshop-preview".to_string()
}

fn default_title() -> String {
    "Preview".to_string()
}
