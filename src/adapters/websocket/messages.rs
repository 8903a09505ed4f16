//! Bridge wire protocol.
//!
//! Rendering surfaces talk to the bridge with JSON text frames carrying a
//! `type` discriminator:
//! - Client → Server: `open` (announce the displayed artifact), `click`
//!   (request a source lookup)
//! - Server → Client: `refresh` (artifact changed on disk)
//!
//! Inbound frames are decoded exactly once, here, into [`ClientMessage`].
//! Unrecognised types decode to [`ClientMessage::Unknown`] so newer viewers
//! keep working against an older bridge.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::preview::{ArtifactIdentity, MapperQuery};

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from a rendering surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// The surface is displaying an artifact.
    Open(OpenMessage),

    /// The user clicked a position in the artifact.
    Click(ClickMessage),

    /// Any type this bridge does not know about.
    #[serde(other)]
    Unknown,
}

/// Payload of an `open` message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpenMessage {
    pub path: String,
}

/// Payload of a `click` message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClickMessage {
    /// 1-based page number.
    pub page: u32,
    /// Position on the page, in the viewer's PDF coordinate space.
    pub pos: [f64; 2],
    /// URL-encoded path of the document the click belongs to.
    pub path: String,
}

impl ClickMessage {
    /// Builds the mapper query for this click.
    pub fn to_query(&self, artifact: Option<ArtifactIdentity>) -> Result<MapperQuery, MessageError> {
        let source_hint = urlencoding::decode(&self.path)
            .map_err(|_| MessageError::InvalidPath(self.path.clone()))?
            .into_owned();

        Ok(MapperQuery {
            artifact,
            page: self.page,
            x: self.pos[0],
            y: self.pos[1],
            source_hint,
        })
    }
}

/// Why an inbound frame was dropped.
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Page numbers start at 1")]
    InvalidPage,

    #[error("Coordinates must be finite")]
    InvalidPosition,

    #[error("Path is not valid percent-encoded UTF-8: {0}")]
    InvalidPath(String),
}

/// Decodes and validates one inbound text frame.
pub fn decode(text: &str) -> Result<ClientMessage, MessageError> {
    let message: ClientMessage = serde_json::from_str(text)?;

    if let ClientMessage::Click(click) = &message {
        if click.page == 0 {
            return Err(MessageError::InvalidPage);
        }
        if !click.pos.iter().all(|c| c.is_finite()) {
            return Err(MessageError::InvalidPosition);
        }
    }

    Ok(message)
}

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be pushed to a rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The displayed artifact was regenerated; the surface should reload it.
    Refresh { path: String },
}

impl ServerMessage {
    pub fn to_json(&self) -> String {
        // Only string fields; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_open() {
        let msg = decode(r#"{"type":"open","path":"/proj/main.pdf"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Open(OpenMessage {
                path: "/proj/main.pdf".to_string()
            })
        );
    }

    #[test]
    fn decodes_click() {
        let msg = decode(r#"{"type":"click","page":3,"pos":[100,200.5],"path":"%2Fproj%2Fmain.tex"}"#)
            .unwrap();
        let ClientMessage::Click(click) = msg else {
            panic!("expected click");
        };
        assert_eq!(click.page, 3);
        assert_eq!(click.pos, [100.0, 200.5]);
    }

    #[test]
    fn unknown_type_is_ignored_not_rejected() {
        let msg = decode(r#"{"type":"scroll","top":12}"#).unwrap();
        assert_eq!(msg, ClientMessage::Unknown);
    }

    #[test]
    fn missing_type_is_malformed() {
        assert!(matches!(
            decode(r#"{"path":"/proj/main.pdf"}"#),
            Err(MessageError::Malformed(_))
        ));
    }

    #[test]
    fn non_json_is_malformed() {
        assert!(matches!(decode("not json"), Err(MessageError::Malformed(_))));
    }

    #[test]
    fn open_without_path_is_malformed() {
        assert!(decode(r#"{"type":"open"}"#).is_err());
    }

    #[test]
    fn page_zero_is_rejected() {
        assert!(matches!(
            decode(r#"{"type":"click","page":0,"pos":[1,2],"path":"a"}"#),
            Err(MessageError::InvalidPage)
        ));
    }

    #[test]
    fn negative_page_is_malformed() {
        assert!(decode(r#"{"type":"click","page":-2,"pos":[1,2],"path":"a"}"#).is_err());
    }

    #[test]
    fn click_query_decodes_path_hint() {
        let click = ClickMessage {
            page: 3,
            pos: [100.0, 200.0],
            path: "%2Fmy%20proj%2Fmain.tex".to_string(),
        };
        let artifact = ArtifactIdentity::from_announced("/my proj/main.pdf");

        let query = click.to_query(Some(artifact.clone())).unwrap();

        assert_eq!(query.source_hint, "/my proj/main.tex");
        assert_eq!(query.artifact, Some(artifact));
        assert_eq!(query.edit_operand(), "3:100:200:/my proj/main.tex");
    }

    #[test]
    fn click_query_rejects_invalid_utf8_escape() {
        let click = ClickMessage {
            page: 1,
            pos: [0.0, 0.0],
            path: "%FF%FE".to_string(),
        };
        assert!(matches!(click.to_query(None), Err(MessageError::InvalidPath(_))));
    }

    #[test]
    fn refresh_serializes_with_type_tag() {
        let json = ServerMessage::Refresh {
            path: "/proj/main.pdf".to_string(),
        }
        .to_json();
        assert_eq!(json, r#"{"type":"refresh","path":"/proj/main.pdf"}"#);
    }
}
