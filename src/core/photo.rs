//! Photo handling: downscale, re-encode as JPEG and wrap in a base64 data URL.

use crate::errors::{AppError, AppResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::fs;
use std::path::Path;

pub const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Read a JPEG or PNG photo and turn it into a stored data URL.
pub fn encode_photo(path: &Path, max_dim: u32, quality: u8) -> AppResult<String> {
    let bytes = fs::read(path)
        .map_err(|e| AppError::Photo(format!("cannot read {}: {}", path.display(), e)))?;
    encode_photo_bytes(&bytes, max_dim, quality)
}

pub fn encode_photo_bytes(bytes: &[u8], max_dim: u32, quality: u8) -> AppResult<String> {
    let format = image::guess_format(bytes)
        .map_err(|_| AppError::Photo("unrecognized image data".into()))?;

    if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png) {
        return Err(AppError::Photo(format!(
            "unsupported format {:?}: only jpg, jpeg and png are accepted",
            format
        )));
    }

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| AppError::Photo(format!("cannot decode image: {}", e)))?;

    let img = shrink_to_fit(img, max_dim);

    let jpeg = to_jpeg(&img, quality)?;
    Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(jpeg)))
}

/// Fit inside `max_dim × max_dim`, keeping the aspect ratio. Never upscales.
fn shrink_to_fit(img: DynamicImage, max_dim: u32) -> DynamicImage {
    if img.width() <= max_dim && img.height() <= max_dim {
        return img;
    }
    img.thumbnail(max_dim, max_dim)
}

fn to_jpeg(img: &DynamicImage, quality: u8) -> AppResult<Vec<u8>> {
    // JPEG has no alpha channel
    let rgb = img.to_rgb8();

    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(&rgb)
        .map_err(|e| AppError::Photo(format!("cannot encode JPEG: {}", e)))?;
    Ok(buf)
}

/// Decode a stored data URL back into raw JPEG bytes.
pub fn decode_photo(data_url: &str) -> AppResult<Vec<u8>> {
    let payload = data_url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or_else(|| AppError::Photo("stored photo is not a JPEG data URL".into()))?;
    STANDARD
        .decode(payload)
        .map_err(|e| AppError::Photo(format!("invalid base64 payload: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};
    use std::io::Cursor;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_fn(w, h, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 90, 200]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn decoded_dims(data_url: &str) -> (u32, u32) {
        let jpeg = decode_photo(data_url).unwrap();
        let img = image::load_from_memory_with_format(&jpeg, ImageFormat::Jpeg).unwrap();
        (img.width(), img.height())
    }

    #[test]
    fn large_png_is_shrunk_to_fit_and_becomes_jpeg() {
        let url = encode_photo_bytes(&png_bytes(1600, 900), 800, 85).unwrap();
        assert!(url.starts_with(DATA_URL_PREFIX));
        assert_eq!(decoded_dims(&url), (800, 450));
    }

    #[test]
    fn small_image_is_not_upscaled() {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(120, 60, Rgb([10, 20, 30]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Jpeg)
            .unwrap();

        let url = encode_photo_bytes(out.get_ref(), 800, 85).unwrap();
        assert_eq!(decoded_dims(&url), (120, 60));
    }

    #[test]
    fn non_image_data_is_rejected() {
        let err = encode_photo_bytes(b"definitely not a picture", 800, 85).unwrap_err();
        assert!(matches!(err, AppError::Photo(_)));
    }

    #[test]
    fn decode_requires_jpeg_data_url() {
        assert!(decode_photo("data:image/png;base64,AAAA").is_err());
        assert!(decode_photo("data:image/jpeg;base64,!!!").is_err());
    }
}
