//! Inspection of uploaded files.

use image::ImageFormat;

/// Image formats accepted by the `image` validation rule.
const ACCEPTED_IMAGE_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Gif,
    ImageFormat::WebP,
    ImageFormat::Bmp,
];

/// A file received in a multipart form, fully buffered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Size rounded up to whole KiB, the unit of the `max` rule.
    pub fn size_kib(&self) -> u64 {
        self.size_bytes().div_ceil(1024)
    }

    /// Format sniffed from magic bytes. The client-supplied name and
    /// content type are not trusted.
    pub fn image_format(&self) -> Option<ImageFormat> {
        image::guess_format(&self.bytes)
            .ok()
            .filter(|format| ACCEPTED_IMAGE_FORMATS.contains(format))
    }

    pub fn is_image(&self) -> bool {
        self.image_format().is_some()
    }

    /// Canonical extension for storing the file, derived from its content.
    pub fn image_extension(&self) -> Option<&'static str> {
        self.image_format()
            .and_then(|format| format.extensions_str().first().copied())
    }
}
