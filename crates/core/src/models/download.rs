//! Download entity model and DTOs.

use serde::Deserialize;
use validator::Validate;

use crate::types::{DbId, Timestamp};

/// Status assigned to every download created through the API.
pub const STATUS_PUBLISH: &str = "publish";

/// A persisted download, including the fields computed by storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub status: String,
    pub author: DbId,
    pub download_link: String,
    pub created_at: Timestamp,
}

/// A download that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewDownload {
    pub title: String,
    pub author: DbId,
    pub status: String,
}

impl NewDownload {
    /// A published download owned by `author`.
    pub fn published(title: impl Into<String>, author: DbId) -> Self {
        Self {
            title: title.into(),
            author,
            status: STATUS_PUBLISH.to_string(),
        }
    }
}

/// Filter for [`DownloadRepository::list`](crate::ports::DownloadRepository::list).
///
/// The default filter matches every download.
#[derive(Debug, Clone, Default)]
pub struct DownloadFilter {
    /// Exact title match.
    pub title: Option<String>,
}

impl DownloadFilter {
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }

    pub fn matches(&self, download: &Download) -> bool {
        self.title
            .as_deref()
            .is_none_or(|title| download.title == title)
    }
}

/// Body of `POST /downloads`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDownloadRequest {
    /// The download title, which storage converts into a slug.
    #[validate(custom(function = "super::not_blank"))]
    pub title: String,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::CoreError;
    use crate::models::validate_request;

    fn download(title: &str) -> Download {
        Download {
            id: 1,
            title: title.to_string(),
            slug: "x".to_string(),
            status: STATUS_PUBLISH.to_string(),
            author: 1,
            download_link: String::new(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn published_sets_status() {
        let new = NewDownload::published("Tool", 3);
        assert_eq!(new.status, "publish");
        assert_eq!(new.author, 3);
    }

    #[test]
    fn default_filter_matches_everything() {
        assert!(DownloadFilter::default().matches(&download("anything")));
    }

    #[test]
    fn title_filter_is_exact() {
        let filter = DownloadFilter::by_title("Tool");
        assert!(filter.matches(&download("Tool")));
        assert!(!filter.matches(&download("tool")));
        assert!(!filter.matches(&download("Tool 2")));
    }

    #[test]
    fn blank_title_fails_validation() {
        let request = CreateDownloadRequest {
            title: "   ".to_string(),
        };
        assert_matches!(validate_request(&request), Err(CoreError::Validation(_)));
    }

    #[test]
    fn title_deserializes_from_json() {
        let request: CreateDownloadRequest =
            serde_json::from_str(r#"{"title":"My Tool"}"#).unwrap();
        assert_eq!(request.title, "My Tool");
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn missing_title_fails_to_deserialize() {
        let result = serde_json::from_str::<CreateDownloadRequest>("{}");
        assert!(result.is_err());
    }
}
