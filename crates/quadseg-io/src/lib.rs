//! quadseg io - Reading and writing images
//!
//! Decoding and encoding are delegated to the `image` crate; this crate
//! only moves pixels between its buffers and [`Pix`].
//!
//! - 16-bit gray images (with or without alpha) load as 16 bpp
//! - Other gray images load as 8 bpp
//! - Everything else loads as 32 bpp RGB (alpha is dropped)
//!
//! The output format of [`write_image`] is chosen from the file extension.

mod error;

pub use error::{IoError, IoResult};

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, RgbImage};
use quadseg_core::{Pix, PixelDepth, color};
use std::path::Path;

type Gray16Image = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Read an image file into a [`Pix`].
///
/// # Errors
///
/// Returns [`IoError::Codec`] if the file cannot be decoded.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let img = image::open(path)?;
    log::debug!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    pix_from_dynamic(img)
}

/// Convert a decoded image into a [`Pix`].
pub fn pix_from_dynamic(img: DynamicImage) -> IoResult<Pix> {
    let color_type = img.color();
    if color_type.has_color() {
        pix_from_rgb(&img.into_rgb8())
    } else if matches!(color_type, image::ColorType::L16 | image::ColorType::La16) {
        pix_from_gray16(&img.into_luma16())
    } else {
        pix_from_gray(&img.into_luma8())
    }
}

fn pix_from_rgb(img: &RgbImage) -> IoResult<Pix> {
    let mut pm = Pix::new(img.width(), img.height(), PixelDepth::Bit32)?.to_mut();
    for (x, y, p) in img.enumerate_pixels() {
        let [r, g, b] = p.0;
        pm.set_pixel(x, y, color::compose_rgb(r, g, b))?;
    }
    Ok(pm.into())
}

fn pix_from_gray(img: &GrayImage) -> IoResult<Pix> {
    let mut pm = Pix::new(img.width(), img.height(), PixelDepth::Bit8)?.to_mut();
    for (x, y, p) in img.enumerate_pixels() {
        pm.set_pixel(x, y, p.0[0] as u32)?;
    }
    Ok(pm.into())
}

fn pix_from_gray16(img: &Gray16Image) -> IoResult<Pix> {
    let mut pm = Pix::new(img.width(), img.height(), PixelDepth::Bit16)?.to_mut();
    for (x, y, p) in img.enumerate_pixels() {
        pm.set_pixel(x, y, p.0[0] as u32)?;
    }
    Ok(pm.into())
}

/// Convert a [`Pix`] into an `image` buffer.
pub fn pix_to_dynamic(pix: &Pix) -> IoResult<DynamicImage> {
    let (w, h) = (pix.width(), pix.height());
    match pix.depth() {
        PixelDepth::Bit8 => {
            let img = GrayImage::from_fn(w, h, |x, y| {
                Luma([pix.get_pixel_unchecked(x, y) as u8])
            });
            Ok(DynamicImage::ImageLuma8(img))
        }
        PixelDepth::Bit16 => {
            let img = Gray16Image::from_fn(w, h, |x, y| {
                Luma([pix.get_pixel_unchecked(x, y) as u16])
            });
            Ok(DynamicImage::ImageLuma16(img))
        }
        PixelDepth::Bit32 => {
            let img = RgbImage::from_fn(w, h, |x, y| {
                let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                image::Rgb([r, g, b])
            });
            Ok(DynamicImage::ImageRgb8(img))
        }
    }
}

/// Write a [`Pix`] to a file; the format follows the extension.
///
/// # Errors
///
/// Returns [`IoError::InvalidData`] if the path has no extension, and
/// [`IoError::Codec`] if the format cannot encode the image (16 bpp to
/// JPEG, for one) or encoding fails.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P) -> IoResult<()> {
    let path = path.as_ref();
    if path.extension().is_none() {
        return Err(IoError::InvalidData(format!(
            "no file extension to choose a format: {}",
            path.display()
        )));
    }
    pix_to_dynamic(pix)?.save(path)?;
    log::debug!(
        "wrote {} ({}x{}, {} bpp)",
        path.display(),
        pix.width(),
        pix.height(),
        pix.depth().bits()
    );
    Ok(())
}
