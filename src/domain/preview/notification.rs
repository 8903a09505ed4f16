//! Change notifications emitted when a preview should be re-fetched.

use chrono::{DateTime, Utc};

use super::identity::PreviewUri;

/// Tells the host that the preview for `preview` is out of date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotification {
    pub preview: PreviewUri,
    pub emitted_at: DateTime<Utc>,
}

impl ChangeNotification {
    pub fn now(preview: PreviewUri) -> Self {
        Self {
            preview,
            emitted_at: Utc::now(),
        }
    }
}
