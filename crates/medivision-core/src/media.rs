//! Image intake: extension allow-list plus a magic-byte check.

use std::path::Path;

use medivision_types::{ImageFormat, InputError};
use tracing::debug;

use crate::error::AppResult;

/// An image accepted for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

/// Container type from the leading bytes, for the formats we accept.
pub fn detect_from_bytes(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() >= 4 && bytes[..4] == [0x89, 0x50, 0x4E, 0x47] {
        return Some("image/png");
    }
    if bytes.len() >= 3 && bytes[..3] == [0xFF, 0xD8, 0xFF] {
        return Some("image/jpeg");
    }
    None
}

/// Check a named upload. The extension decides acceptance; the content must
/// still be PNG or JPEG.
pub fn check_image(file_name: &str, bytes: &[u8]) -> Result<ImageFormat, InputError> {
    let ext = Path::new(file_name).extension().and_then(|e| e.to_str()).unwrap_or_default();
    let format = ImageFormat::from_extension(ext)
        .ok_or_else(|| InputError::UnsupportedImageFormat { format: ext.to_string() })?;

    if bytes.is_empty() {
        return Err(InputError::EmptyImage);
    }

    match detect_from_bytes(bytes) {
        Some(detected) => {
            debug!(file = file_name, declared = %format, detected = detected, "Image accepted");
            Ok(format)
        },
        None => Err(InputError::UnsupportedImageFormat {
            format: format!("{} (content is not PNG or JPEG)", ext),
        }),
    }
}

/// Read and check an image file.
pub fn load_image(path: &Path) -> AppResult<ImageUpload> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    // Reject on extension before touching the file.
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    if ImageFormat::from_extension(ext).is_none() {
        return Err(InputError::UnsupportedImageFormat { format: ext.to_string() }.into());
    }

    let bytes = std::fs::read(path)?;
    let format = check_image(&file_name, &bytes)?;
    Ok(ImageUpload { file_name, format, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppError;
    use medivision_types::TypedError;

    const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10];

    #[test]
    fn test_check_image_accepts_known_formats() {
        assert_eq!(check_image("scan.PNG", PNG), Ok(ImageFormat::Png));
        assert_eq!(check_image("xray.jpg", JPEG), Ok(ImageFormat::Jpg));
        // Extension and content need not agree, both are accepted formats.
        assert_eq!(check_image("photo.jpeg", PNG), Ok(ImageFormat::Jpeg));
    }

    #[test]
    fn test_check_image_rejects() {
        assert!(matches!(check_image("scan.gif", b"GIF89a"), Err(InputError::UnsupportedImageFormat { .. })));
        assert!(matches!(check_image("noext", PNG), Err(InputError::UnsupportedImageFormat { .. })));
        assert_eq!(check_image("empty.png", &[]), Err(InputError::EmptyImage));
        assert!(matches!(check_image("fake.png", b"hello"), Err(InputError::UnsupportedImageFormat { .. })));
    }

    #[test]
    fn test_load_image_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chest.jpg");
        std::fs::write(&path, JPEG).unwrap();

        let upload = load_image(&path).unwrap();
        assert_eq!(upload.file_name, "chest.jpg");
        assert_eq!(upload.format, ImageFormat::Jpg);
        assert_eq!(upload.bytes, JPEG);
    }

    #[test]
    fn test_load_image_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_image(&dir.path().join("missing.png")),
            Err(AppError::Io(_))
        ));
        assert!(matches!(
            load_image(&dir.path().join("notes.txt")),
            Err(AppError::Typed(TypedError::Input(InputError::UnsupportedImageFormat { .. })))
        ));
    }
}
