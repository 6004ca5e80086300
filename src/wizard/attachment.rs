use serde::Serialize;
use thiserror::Error;

pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Metadata of the file picked in the CV input. The bytes stay in the
/// browser's `File` handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl Attachment {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error("El archivo es demasiado grande (máx. 5MB).")]
    TooLarge { size: u64 },
    #[error("Formato no válido. Solo se aceptan PDF, DOC y DOCX.")]
    UnsupportedType { mime_type: String },
}

/// Size is checked before type, so an oversized file is always reported as
/// too large.
pub fn validate_attachment(attachment: &Attachment) -> Result<(), AttachmentError> {
    if attachment.size > MAX_ATTACHMENT_BYTES {
        return Err(AttachmentError::TooLarge {
            size: attachment.size,
        });
    }
    if !ALLOWED_MIME_TYPES.contains(&attachment.mime_type.as_str()) {
        return Err(AttachmentError::UnsupportedType {
            mime_type: attachment.mime_type.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_file_is_rejected_whatever_the_type() {
        let pdf = Attachment::new("cv.pdf", 6_000_000, "application/pdf");
        assert_eq!(
            validate_attachment(&pdf),
            Err(AttachmentError::TooLarge { size: 6_000_000 })
        );
        let png = Attachment::new("cv.png", 6_000_000, "image/png");
        assert!(matches!(
            validate_attachment(&png),
            Err(AttachmentError::TooLarge { .. })
        ));
    }

    #[test]
    fn image_is_rejected() {
        let png = Attachment::new("foto.png", 1_000_000, "image/png");
        assert_eq!(
            validate_attachment(&png),
            Err(AttachmentError::UnsupportedType {
                mime_type: "image/png".into()
            })
        );
    }

    #[test]
    fn pdf_and_word_documents_are_accepted() {
        for mime in ALLOWED_MIME_TYPES {
            let file = Attachment::new("cv", 1_000_000, *mime);
            assert_eq!(validate_attachment(&file), Ok(()));
        }
    }

    #[test]
    fn exactly_five_megabytes_is_accepted() {
        let file = Attachment::new("cv.pdf", MAX_ATTACHMENT_BYTES, "application/pdf");
        assert!(validate_attachment(&file).is_ok());
        let file = Attachment::new("cv.pdf", MAX_ATTACHMENT_BYTES + 1, "application/pdf");
        assert!(validate_attachment(&file).is_err());
    }
}
