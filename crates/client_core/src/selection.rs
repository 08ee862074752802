//! File chosen by the user for classification, plus the local checks run before upload.

use std::{fs, io, path::Path};

use mime_guess::mime::{self, Mime};
use shared::error::ValidationError;

const FALLBACK_FILE_NAME: &str = "upload.bin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    /// Media type declared for the file, if any. Validation only looks at this.
    pub media_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(
        file_name: impl Into<String>,
        media_type: Option<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type,
            bytes: bytes.into(),
        }
    }

    /// Reads `path` and declares its media type from the extension.
    pub fn load(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(FALLBACK_FILE_NAME)
            .to_string();
        let media_type = mime_guess::from_path(path).first_raw().map(str::to_string);
        Ok(Self {
            file_name,
            media_type,
            bytes,
        })
    }

    pub fn is_image(&self) -> bool {
        self.media_type.as_deref().is_some_and(is_image_media_type)
    }
}

/// True for a well-formed `image/<subtype>` media type.
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .trim()
        .to_ascii_lowercase()
        .parse::<Mime>()
        .is_ok_and(|mime| mime.type_() == mime::IMAGE && !mime.subtype().as_str().is_empty())
}

/// First failing check wins: a missing file is reported before a wrong type.
pub fn validate_selection(selected: Option<SelectedFile>) -> Result<SelectedFile, ValidationError> {
    let file = selected.ok_or(ValidationError::NoFileSelected)?;
    if !file.is_image() {
        return Err(ValidationError::NotAnImage);
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    #[test]
    fn missing_file_is_reported_first() {
        assert_eq!(
            validate_selection(None),
            Err(ValidationError::NoFileSelected)
        );
    }

    #[test]
    fn rejects_non_image_media_types() {
        let file = SelectedFile::new("notes.txt", Some("text/plain".to_string()), b"hi".to_vec());
        assert_eq!(validate_selection(Some(file)), Err(ValidationError::NotAnImage));

        let untyped = SelectedFile::new("blob", None, b"hi".to_vec());
        assert_eq!(
            validate_selection(Some(untyped)),
            Err(ValidationError::NotAnImage)
        );
    }

    #[test]
    fn rejects_malformed_image_media_types() {
        for media_type in ["image/", "image", "image/png/extra", "imagery/png"] {
            let file = SelectedFile::new("x", Some(media_type.to_string()), Vec::new());
            assert_eq!(
                validate_selection(Some(file)),
                Err(ValidationError::NotAnImage),
                "{media_type}"
            );
        }
    }

    #[test]
    fn accepts_image_media_types_regardless_of_case() {
        for media_type in ["image/png", "image/jpeg", "IMAGE/GIF", " image/webp"] {
            let file = SelectedFile::new("x", Some(media_type.to_string()), Vec::new());
            assert!(validate_selection(Some(file)).is_ok(), "{media_type}");
        }
    }

    #[test]
    fn load_declares_media_type_from_extension() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("classifier_selection_{suffix}.png"));
        fs::write(&path, b"\x89PNG").expect("write temp file");

        let file = SelectedFile::load(&path).expect("load");
        assert_eq!(file.media_type.as_deref(), Some("image/png"));
        assert_eq!(file.bytes, b"\x89PNG");
        assert!(file.file_name.ends_with(".png"));

        fs::remove_file(path).expect("cleanup");
    }
}
