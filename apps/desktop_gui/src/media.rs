//! Decoding of the preview payload echoed back by the classification service.

use client_core::ResultsView;
use image::GenericImageView;

const PREVIEW_MAX_EDGE: u32 = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

pub fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = if dynamic.width() > PREVIEW_MAX_EDGE || dynamic.height() > PREVIEW_MAX_EDGE {
        dynamic.thumbnail(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE).to_rgba8()
    } else {
        dynamic.to_rgba8()
    };
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}

pub fn decode_results_preview(view: &ResultsView) -> Result<PreviewImage, String> {
    let bytes = view
        .preview_bytes()
        .map_err(|err| format!("preview is not valid base64: {err}"))?;
    decode_preview_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .expect("encode png");
        out.into_inner()
    }

    #[test]
    fn decodes_small_png_without_resizing() {
        let preview = decode_preview_image(&png_bytes(3, 2)).expect("decode");
        assert_eq!((preview.width, preview.height), (3, 2));
        assert_eq!(preview.rgba.len(), 3 * 2 * 4);
    }

    #[test]
    fn large_previews_are_bounded() {
        let preview = decode_preview_image(&png_bytes(1024, 256)).expect("decode");
        assert_eq!(preview.width, 512);
        assert_eq!(preview.height, 128);
    }

    #[test]
    fn garbage_is_reported_not_panicked() {
        assert!(decode_preview_image(b"definitely not an image").is_err());
    }
}
