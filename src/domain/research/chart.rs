//! Chart image selected for vision analysis.

use crate::domain::foundation::ValidationError;

/// An image file ready to upload.
///
/// Construction checks the media type guessed from the file name; anything
/// that is not `image/*` is rejected so no request is made for it.
#[derive(Clone, PartialEq, Eq)]
pub struct ChartImage {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl ChartImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ValidationError> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(ValidationError::empty_field("file_name"));
        }
        let mime = mime_guess::from_path(&file_name).first_or_octet_stream();
        if mime.type_().as_str() != "image" {
            return Err(ValidationError::invalid_format(
                "file",
                format!("{} is not an image ({})", file_name, mime.essence_str()),
            ));
        }
        if bytes.is_empty() {
            return Err(ValidationError::empty_field("file"));
        }
        Ok(Self {
            file_name,
            content_type: mime.essence_str().to_string(),
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ChartImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartImage")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_is_accepted() {
        let image = ChartImage::new("btc_4h.png", vec![0x89, 0x50]).unwrap();
        assert_eq!(image.content_type(), "image/png");
        assert_eq!(image.len(), 2);
    }

    #[test]
    fn uppercase_extension_is_accepted() {
        let image = ChartImage::new("CHART.JPG", vec![1]).unwrap();
        assert_eq!(image.content_type(), "image/jpeg");
    }

    #[test]
    fn pdf_is_rejected() {
        let err = ChartImage::new("report.pdf", vec![1]).unwrap_err();
        assert_eq!(err.field(), "file");
    }

    #[test]
    fn missing_extension_is_rejected() {
        assert!(ChartImage::new("chart", vec![1]).is_err());
    }

    #[test]
    fn empty_file_is_rejected() {
        assert_eq!(
            ChartImage::new("chart.png", Vec::new()).unwrap_err(),
            ValidationError::empty_field("file")
        );
    }

    #[test]
    fn debug_omits_bytes() {
        let image = ChartImage::new("a.png", vec![7; 64]).unwrap();
        assert!(format!("{:?}", image).contains("len: 64"));
    }
}
