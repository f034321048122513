//! Blob categories - where an uploaded file belongs

use std::fmt;

/// Logical category of a stored upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobCategory {
    Video,
    Thumbnail,
    Caption,
    Avatar,
}

impl BlobCategory {
    pub const ALL: [Self; 4] = [Self::Video, Self::Thumbnail, Self::Caption, Self::Avatar];

    /// Sub-directory of the upload root holding this category
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Video => "videos",
            Self::Thumbnail => "thumbnails",
            Self::Caption => "captions",
            Self::Avatar => "avatars",
        }
    }

    /// Map a multipart field name to its category
    pub fn from_field(field: &str) -> Option<Self> {
        match field {
            "video" => Some(Self::Video),
            "thumbnail" => Some(Self::Thumbnail),
            "caption" => Some(Self::Caption),
            "avatar" => Some(Self::Avatar),
            _ => None,
        }
    }

    /// Public path a stored file is served under
    pub fn public_path(self, filename: &str) -> String {
        format!("/uploads/{}/{}", self.dir_name(), filename)
    }
}

impl fmt::Display for BlobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}
