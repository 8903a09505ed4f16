//! Source, artifact and preview identities.
//!
//! The artifact for a source document lives next to it: same directory, same
//! base name, artifact extension. Derivation is a pure function of the source
//! path and the configured extensions; nothing is stored.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::PreviewError;

/// An absolute path to a source document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceDocument(PathBuf);

impl SourceDocument {
    /// Creates a source document from an absolute path with a file name.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, PreviewError> {
        let path = path.into();
        if !path.is_absolute() {
            return Err(PreviewError::invalid_source(
                path.display().to_string(),
                "path must be absolute",
            ));
        }
        if path.file_name().is_none() {
            return Err(PreviewError::invalid_source(
                path.display().to_string(),
                "path has no file name",
            ));
        }
        Ok(Self(path))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for SourceDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Absolute path of the rendered artifact for a source document.
///
/// Used as the client registry key (in its string form).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactIdentity(PathBuf);

impl ArtifactIdentity {
    /// Wraps a path announced by a rendering surface.
    pub fn from_announced(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Registry key form of this identity.
    pub fn key(&self) -> String {
        self.0.to_string_lossy().into_owned()
    }
}

impl fmt::Display for ArtifactIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Extension pair used to derive artifact paths from source paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNaming {
    source_extension: String,
    artifact_extension: String,
}

impl ArtifactNaming {
    /// Extensions are given without the leading dot.
    pub fn new(source_extension: impl Into<String>, artifact_extension: impl Into<String>) -> Self {
        Self {
            source_extension: source_extension.into(),
            artifact_extension: artifact_extension.into(),
        }
    }

    /// Derives the artifact identity for a source document.
    ///
    /// Only a trailing source extension is stripped; any other file name keeps
    /// its full name and gains the artifact extension (`notes.md` becomes
    /// `notes.md.pdf`).
    pub fn derive(&self, source: &SourceDocument) -> ArtifactIdentity {
        let path = source.as_path();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let suffix = format!(".{}", self.source_extension);
        let stem = match file_name.strip_suffix(&suffix) {
            Some(stem) if !stem.is_empty() => stem,
            _ => file_name.as_str(),
        };

        let dir = path.parent().unwrap_or_else(|| Path::new("/"));
        ArtifactIdentity(dir.join(format!("{}.{}", stem, self.artifact_extension)))
    }
}

impl Default for ArtifactNaming {
    fn default() -> Self {
        Self::new("tex", "pdf")
    }
}

/// Identity under which the host tracks a displayed preview.
///
/// A preview URI is the source path under the preview scheme, so the source
/// document can always be recovered from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewUri {
    scheme: String,
    source: SourceDocument,
}

impl PreviewUri {
    pub fn new(scheme: impl Into<String>, source: SourceDocument) -> Self {
        Self {
            scheme: scheme.into(),
            source,
        }
    }

    /// Parses `scheme://<absolute path>`.
    pub fn parse(uri: &str) -> Result<Self, PreviewError> {
        let (scheme, path) = uri
            .split_once("://")
            .ok_or_else(|| PreviewError::invalid_source(uri, "missing scheme separator"))?;
        if scheme.is_empty() {
            return Err(PreviewError::invalid_source(uri, "empty scheme"));
        }
        Ok(Self::new(scheme, SourceDocument::new(path)?))
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn source(&self) -> &SourceDocument {
        &self.source
    }
}

impl fmt::Display for PreviewUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn source(path: &str) -> SourceDocument {
        SourceDocument::new(path).unwrap()
    }

    #[test]
    fn tex_source_derives_pdf_next_to_it() {
        let artifact = ArtifactNaming::default().derive(&source("/proj/main.tex"));
        assert_eq!(artifact.as_path(), Path::new("/proj/main.pdf"));
        assert_eq!(artifact.key(), "/proj/main.pdf");
    }

    #[test]
    fn foreign_extension_is_kept() {
        let artifact = ArtifactNaming::default().derive(&source("/proj/notes.md"));
        assert_eq!(artifact.as_path(), Path::new("/proj/notes.md.pdf"));
    }

    #[test]
    fn file_named_like_extension_is_kept_whole() {
        let artifact = ArtifactNaming::default().derive(&source("/proj/.tex"));
        assert_eq!(artifact.as_path(), Path::new("/proj/.tex.pdf"));
    }

    #[test]
    fn paths_with_spaces_survive() {
        let artifact = ArtifactNaming::default().derive(&source("/my proj/chapter one.tex"));
        assert_eq!(artifact.as_path(), Path::new("/my proj/chapter one.pdf"));
    }

    #[test]
    fn custom_extensions_are_honoured() {
        let naming = ArtifactNaming::new("typ", "pdf");
        let artifact = naming.derive(&source("/proj/paper.typ"));
        assert_eq!(artifact.as_path(), Path::new("/proj/paper.pdf"));
    }

    #[test]
    fn relative_source_is_rejected() {
        assert!(matches!(
            SourceDocument::new("main.tex"),
            Err(PreviewError::InvalidSource { .. })
        ));
    }

    #[test]
    fn preview_uri_round_trips_source() {
        let uri = PreviewUri::new("latex-workshop-preview", source("/proj/main.tex"));
        assert_eq!(uri.to_string(), "latex-workshop-preview:///proj/main.tex");

        let parsed = PreviewUri::parse(&uri.to_string()).unwrap();
        assert_eq!(parsed, uri);
        assert_eq!(parsed.source().as_path(), Path::new("/proj/main.tex"));
    }

    #[test]
    fn preview_uri_without_scheme_is_rejected() {
        assert!(PreviewUri::parse("/proj/main.tex").is_err());
        assert!(PreviewUri::parse("://proj/main.tex").is_err());
    }

    proptest! {
        #[test]
        fn derivation_is_deterministic(dir in "[a-z]{1,8}", name in "[a-zA-Z0-9 _-]{1,12}") {
            let doc = source(&format!("/{}/{}.tex", dir, name));
            let naming = ArtifactNaming::default();
            let first = naming.derive(&doc);
            let second = naming.derive(&doc);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.as_path().parent(), doc.as_path().parent());
            prop_assert!(first.key().ends_with(".pdf"));
        }
    }
}
