use std::fmt;

/// Image formats this function knows how to resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ImageType {
    Jpg,
    Png,
}

impl ImageType {
    /// Classifies an object key by its extension, case-insensitively.
    ///
    /// Returns `None` when the key has no `.` or the extension is not supported.
    pub(crate) fn from_key(key: &str) -> Option<Self> {
        let (_, extension) = key.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "jpg" => Some(Self::Jpg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    pub(crate) fn extension(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
        }
    }

    // Mirrors the extension, so jpg maps to image/jpg rather than image/jpeg.
    pub(crate) fn content_type(self) -> String {
        format!("image/{}", self.extension())
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
