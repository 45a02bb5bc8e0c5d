use super::write_image_pfm::*;
use crate::core::error::*;
use crate::core::filmview::*;

use image::*;
use std::path::Path;

impl From<image::ImageError> for FilmViewError {
    fn from(value: image::ImageError) -> Self {
        let msg = value.to_string();
        return FilmViewError::io(&msg);
    }
}

fn to_byte(v: Float) -> u8 {
    Float::clamp(255.0 * gamma_correct(v), 0.0, 255.0) as u8
}

pub fn write_image_bytes(
    name: &str,
    rgb: &[Float],
    width: usize,
    height: usize,
) -> Result<(), FilmViewError> {
    let mut byte_img: Vec<u8> = vec![0; width * height * 3];
    for index in 0..width * height {
        byte_img[3 * index + 0] = to_byte(rgb[3 * index + 0]);
        byte_img[3 * index + 1] = to_byte(rgb[3 * index + 1]);
        byte_img[3 * index + 2] = to_byte(rgb[3 * index + 2]);
    }
    let img = RgbImage::from_vec(width as u32, height as u32, byte_img).unwrap();
    match img.save(name) {
        Ok(()) => {
            return Ok(());
        }
        Err(e) => {
            return Err(FilmViewError::from(e));
        }
    }
}

/// Writes an RGB float image, dispatching on the file extension: ".pfm"
/// keeps full float precision, anything else goes through the byte-image
/// path with gamma correction.
pub fn write_image(
    name: &str,
    rgb: &[Float],
    width: usize,
    height: usize,
) -> Result<(), FilmViewError> {
    if let Some(ext) = Path::new(name).extension() {
        if let Some(s) = ext.to_str() {
            match s {
                "pfm" => {
                    return write_image_pfm(Path::new(name), rgb, width, height, 3);
                }
                _ => return write_image_bytes(name, rgb, width, height),
            }
        }
    }
    return Err(FilmViewError::io(&format!(
        "write_image: no image format for \"{}\"",
        name
    )));
}
