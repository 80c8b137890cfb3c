//! `multipart/form-data` request bodies for handler tests

const BOUNDARY: &str = "bandoggie-test-boundary";

/// Builds a `multipart/form-data` body part by part.
///
/// # Example
///
/// ```
/// use test_utils::MultipartBody;
///
/// let (content_type, body) = MultipartBody::new()
///     .text("name", "Collar")
///     .file("image", "front.png", "image/png", &[1, 2, 3])
///     .build();
/// assert!(content_type.starts_with("multipart/form-data; boundary="));
/// assert!(!body.is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    /// Append a file field
    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Append `count` small PNG files under the same field name
    pub fn images(self, name: &str, count: usize) -> Self {
        (0..count).fold(self, |body, i| {
            body.file(name, &format!("{name}-{i}.png"), "image/png", &png_bytes())
        })
    }

    /// Returns the `Content-Type` header value and the encoded body
    pub fn build(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (
            format!("multipart/form-data; boundary={BOUNDARY}"),
            self.body,
        )
    }
}

/// PNG signature followed by a few payload bytes
pub fn png_bytes() -> Vec<u8> {
    vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x01]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_is_terminated() {
        let (_, body) = MultipartBody::new().text("comment", "Muy bonito").build();
        let text = String::from_utf8(body).unwrap();
        assert!(text.contains("name=\"comment\"\r\n\r\nMuy bonito\r\n"));
        assert!(text.ends_with("--bandoggie-test-boundary--\r\n"));
    }

    #[test]
    fn test_images_repeat_field_name() {
        let (_, body) = MultipartBody::new().images("designImages", 3).build();
        let text = String::from_utf8_lossy(&body);
        assert_eq!(text.matches("name=\"designImages\"").count(), 3);
        assert!(text.contains("filename=\"designImages-2.png\""));
    }
}
