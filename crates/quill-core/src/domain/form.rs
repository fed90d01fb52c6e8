//! Post form binding - the validation contract between untrusted input and
//! a [`Post`](super::Post).

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;

/// A validated, decoded image attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostImage {
    /// Sniffed media type, e.g. `image/png`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Untrusted editable fields of a post: `text`, `group`, `image`.
///
/// `author` and `pub_date` are deliberately absent; they are never settable
/// through the form.
#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub text: String,
    /// Slug of the group the post should belong to, if any.
    pub group: Option<String>,
    /// Base64-encoded image payload, if any.
    pub image: Option<String>,
}

/// The structurally valid output of form binding. The group slug still
/// needs referential resolution against the group store.
#[derive(Debug, Clone)]
pub struct BoundPost {
    pub text: String,
    pub group: Option<String>,
    pub image: Option<PostImage>,
}

impl PostForm {
    /// Run the structural checks: text must not be empty or
    /// whitespace-only, and the image, if present, must decode from base64
    /// into a recognized image format.
    ///
    /// All failing fields are reported together.
    pub fn validate(self) -> Result<BoundPost, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.text.trim().is_empty() {
            errors.push("text", "text must not be empty");
        }

        let image = match self.image {
            Some(payload) => match decode_image(&payload) {
                Ok(image) => Some(image),
                Err(message) => {
                    errors.push("image", message);
                    None
                }
            },
            None => None,
        };

        // Blank group selection is treated as "no group".
        let group = self.group.filter(|slug| !slug.trim().is_empty());

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(BoundPost {
            text: self.text,
            group,
            image,
        })
    }
}

fn decode_image(payload: &str) -> Result<PostImage, String> {
    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|_| "image is not valid base64".to_string())?;

    let content_type = sniff_image(&bytes).ok_or_else(|| {
        "image format not recognized (expected PNG, JPEG or GIF)".to_string()
    })?;

    Ok(PostImage {
        content_type: content_type.to_string(),
        bytes,
    })
}

/// Identify the image format from its magic bytes.
fn sniff_image(bytes: &[u8]) -> Option<mime::Mime> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some(mime::IMAGE_PNG)
    } else if bytes.starts_with(b"\xff\xd8\xff") {
        Some(mime::IMAGE_JPEG)
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some(mime::IMAGE_GIF)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Smallest valid PNG signature plus filler; sniffing only reads the
    // magic bytes.
    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR";

    fn encode(bytes: &[u8]) -> String {
        BASE64.encode(bytes)
    }

    #[test]
    fn valid_text_only_form_binds() {
        let form = PostForm {
            text: "Тестовый пост".to_string(),
            group: None,
            image: None,
        };

        let bound = form.validate().unwrap();
        assert_eq!(bound.text, "Тестовый пост");
        assert!(bound.group.is_none());
        assert!(bound.image.is_none());
    }

    #[test]
    fn empty_text_is_rejected() {
        let form = PostForm {
            text: String::new(),
            ..Default::default()
        };

        let errors = form.validate().unwrap_err();
        assert!(errors.has_field("text"));
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        let form = PostForm {
            text: "   \n\t ".to_string(),
            ..Default::default()
        };

        let errors = form.validate().unwrap_err();
        assert!(errors.has_field("text"));
    }

    #[test]
    fn png_image_is_sniffed() {
        let form = PostForm {
            text: "with image".to_string(),
            group: None,
            image: Some(encode(PNG_MAGIC)),
        };

        let bound = form.validate().unwrap();
        let image = bound.image.unwrap();
        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.bytes, PNG_MAGIC);
    }

    #[test]
    fn jpeg_image_is_sniffed() {
        let form = PostForm {
            text: "jpeg".to_string(),
            group: None,
            image: Some(encode(b"\xff\xd8\xff\xe0rest-of-jpeg")),
        };

        let bound = form.validate().unwrap();
        assert_eq!(bound.image.unwrap().content_type, "image/jpeg");
    }

    #[test]
    fn invalid_base64_is_a_field_error() {
        let form = PostForm {
            text: "text".to_string(),
            group: None,
            image: Some("not-base64!!!".to_string()),
        };

        let errors = form.validate().unwrap_err();
        assert!(errors.has_field("image"));
        assert!(!errors.has_field("text"));
    }

    #[test]
    fn non_image_bytes_are_a_field_error() {
        let form = PostForm {
            text: "text".to_string(),
            group: None,
            image: Some(encode(b"plain text, not an image")),
        };

        let errors = form.validate().unwrap_err();
        assert!(errors.has_field("image"));
    }

    #[test]
    fn all_failing_fields_are_reported_together() {
        let form = PostForm {
            text: " ".to_string(),
            group: None,
            image: Some("###".to_string()),
        };

        let errors = form.validate().unwrap_err();
        assert!(errors.has_field("text"));
        assert!(errors.has_field("image"));
    }

    #[test]
    fn blank_group_is_treated_as_none() {
        let form = PostForm {
            text: "text".to_string(),
            group: Some("  ".to_string()),
            image: None,
        };

        let bound = form.validate().unwrap();
        assert!(bound.group.is_none());
    }
}
