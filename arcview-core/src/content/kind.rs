//! Content kind classification
//!
//! Every tab carries exactly one of three kinds: `Code` (syntax-aware
//! display, eligible for pretty-printing), `Plaintext` (no syntax service),
//! or `Image` (shown through a media surface instead of the editor). The set
//! is closed; adding a kind is a deliberate API change, not open dispatch.

use std::fmt;

/// Extensions treated as images, matched case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];

/// The display kind of one content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Structured markup shown with syntax-aware display.
    Code,
    /// Plain text shown without syntax services.
    Plaintext,
    /// Binary image shown through a media surface.
    Image,
}

impl ContentKind {
    /// Classifies an archive entry path by its extension.
    ///
    /// `.xml` entries are `Code`; the image extensions (`.png`, `.jpg`,
    /// `.jpeg`, `.gif`, `.bmp`) are `Image`; everything else is `Plaintext`.
    #[must_use]
    pub fn detect(path: &str) -> Self {
        let ext = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if ext == "xml" {
            Self::Code
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Self::Image
        } else {
            Self::Plaintext
        }
    }

    /// Returns the kind name as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Plaintext => "plaintext",
            Self::Image => "image",
        }
    }

    /// Returns true for image content.
    #[must_use]
    pub const fn is_image(self) -> bool {
        matches!(self, Self::Image)
    }

    /// Returns true if content of this kind goes through the background
    /// transform (pretty-printing) before display.
    #[must_use]
    pub const fn needs_transform(self) -> bool {
        matches!(self, Self::Code)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_xml_as_code() {
        assert_eq!(ContentKind::detect("word/document.xml"), ContentKind::Code);
        assert_eq!(ContentKind::detect("[Content_Types].xml"), ContentKind::Code);
    }

    #[test]
    fn detect_images_case_insensitive() {
        assert_eq!(ContentKind::detect("word/media/image1.png"), ContentKind::Image);
        assert_eq!(ContentKind::detect("word/media/photo.JPEG"), ContentKind::Image);
        assert_eq!(ContentKind::detect("a.GIF"), ContentKind::Image);
    }

    #[test]
    fn detect_everything_else_as_plaintext() {
        assert_eq!(
            ContentKind::detect("word/_rels/document.xml.rels"),
            ContentKind::Plaintext
        );
        assert_eq!(ContentKind::detect("docProps/app.txt"), ContentKind::Plaintext);
        assert_eq!(ContentKind::detect("no_extension"), ContentKind::Plaintext);
    }

    #[test]
    fn transform_only_for_code() {
        assert!(ContentKind::Code.needs_transform());
        assert!(!ContentKind::Plaintext.needs_transform());
        assert!(!ContentKind::Image.needs_transform());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(ContentKind::Code.to_string(), "code");
        assert_eq!(ContentKind::Image.to_string(), "image");
    }
}
