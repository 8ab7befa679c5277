//! Types accepted by the account service

/// Raster formats kept as avatars, keyed by MIME subtype
const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("png", "png"),
    ("jpeg", "jpg"),
    ("jpg", "jpg"),
    ("pjpeg", "jpg"),
    ("gif", "gif"),
    ("webp", "webp"),
];

/// One uploaded image as received from the client
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    /// Declared MIME type, e.g. `image/png`
    pub content_type: String,
    /// Client-side file name, when provided. Never used for the stored copy.
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

impl AvatarUpload {
    /// Extension for the stored copy, derived from the declared MIME type.
    /// `None` unless the type is one of the allowed raster formats.
    pub fn extension(&self) -> Option<&'static str> {
        let mime = self.content_type.trim().to_ascii_lowercase();
        let essence = mime.split(';').next().unwrap_or("").trim();
        let subtype = essence.strip_prefix("image/")?;

        ALLOWED_IMAGE_TYPES
            .iter()
            .find(|(allowed, _)| *allowed == subtype)
            .map(|(_, extension)| *extension)
    }
}
