use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;
use uuid::Uuid;

/// A video record as persisted by the record store.
///
/// The URL fields stay `None` until a publish step for that asset has
/// succeeded; this pipeline is the only writer of either URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Video {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub user_id: Uuid,
}

/// Which asset URL on a [`Video`] a pipeline writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlField {
    Thumbnail,
    Video,
}

impl Display for UrlField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UrlField::Thumbnail => write!(f, "thumbnail_url"),
            UrlField::Video => write!(f, "video_url"),
        }
    }
}

impl Video {
    /// A fresh record with no published assets.
    pub fn new(user_id: Uuid, title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title: title.into(),
            description: description.into(),
            thumbnail_url: None,
            video_url: None,
            user_id,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    pub fn set_url(&mut self, field: UrlField, url: String) {
        match field {
            UrlField::Thumbnail => self.thumbnail_url = Some(url),
            UrlField::Video => self.video_url = Some(url),
        }
    }

    pub fn url(&self, field: UrlField) -> Option<&str> {
        match field {
            UrlField::Thumbnail => self.thumbnail_url.as_deref(),
            UrlField::Video => self.video_url.as_deref(),
        }
    }
}
