//! Color space conversion
//!
//! Provides conversion between:
//! - RGB <-> XYZ (CIE XYZ, D65 white point, sRGB primaries)
//! - XYZ <-> LAB (CIE L*a*b*)
//! - RGB <-> LAB
//!
//! The image-level conversions store L\*a\*b\* in an ordinary 32 bpp
//! [`Pix`] using an 8-bit encoding per channel:
//!
//! | slot  | stored value          |
//! |-------|-----------------------|
//! | red   | `L * 255 / 100`       |
//! | green | `a + 128`             |
//! | blue  | `b + 128`             |

use crate::error::{ColorError, ColorResult};
use quadseg_core::{Pix, PixelDepth, color};

/// D65 reference white
const WHITE_X: f32 = 0.950_47;
const WHITE_Y: f32 = 1.0;
const WHITE_Z: f32 = 1.088_83;

/// Linear segment threshold of the L*a*b* transfer function, (6/29)^3
const LAB_EPSILON: f32 = 0.008_856;
/// Slope of the linear segment, (29/6)^2 / 3
const LAB_KAPPA: f32 = 7.787;

/// CIE L*a*b* color representation
///
/// - `l`: Lightness in range [0.0, 100.0]
/// - `a`: Green-Red component, typically [-128, 127]
/// - `b`: Blue-Yellow component, typically [-128, 127]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl Lab {
    /// Create a new LAB color
    pub fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Encode into three bytes (`L*255/100`, `a+128`, `b+128`), rounded
    /// and clamped.
    pub fn to_bytes(self) -> (u8, u8, u8) {
        (
            clamp_u8(self.l * 255.0 / 100.0),
            clamp_u8(self.a + 128.0),
            clamp_u8(self.b + 128.0),
        )
    }

    /// Decode the three-byte representation produced by [`Lab::to_bytes`].
    pub fn from_bytes(l: u8, a: u8, b: u8) -> Self {
        Self {
            l: l as f32 * 100.0 / 255.0,
            a: a as f32 - 128.0,
            b: b as f32 - 128.0,
        }
    }
}

/// CIE XYZ color representation (D65 illuminant, Y of white = 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Xyz {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Xyz {
    /// Create a new XYZ color
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[inline]
fn clamp_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[inline]
fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn linear_to_srgb(c: f32) -> u8 {
    let c = c.clamp(0.0, 1.0);
    let v = if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    clamp_u8(v * 255.0)
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_KAPPA * t + 16.0 / 116.0
    }
}

#[inline]
fn lab_f_inv(t: f32) -> f32 {
    let t3 = t * t * t;
    if t3 > LAB_EPSILON {
        t3
    } else {
        (t - 16.0 / 116.0) / LAB_KAPPA
    }
}

/// Convert gamma-encoded sRGB to XYZ.
pub fn rgb_to_xyz(r: u8, g: u8, b: u8) -> Xyz {
    let r = srgb_to_linear(r);
    let g = srgb_to_linear(g);
    let b = srgb_to_linear(b);
    Xyz {
        x: 0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b,
        y: 0.212_672_9 * r + 0.715_152_2 * g + 0.072_175_0 * b,
        z: 0.019_333_9 * r + 0.119_192_0 * g + 0.950_304_1 * b,
    }
}

/// Convert XYZ to gamma-encoded sRGB, clamping out-of-gamut values.
pub fn xyz_to_rgb(xyz: Xyz) -> (u8, u8, u8) {
    let Xyz { x, y, z } = xyz;
    let r = 3.240_454_2 * x - 1.537_138_5 * y - 0.498_531_4 * z;
    let g = -0.969_266_0 * x + 1.876_010_8 * y + 0.041_556_0 * z;
    let b = 0.055_643_4 * x - 0.204_025_9 * y + 1.057_225_2 * z;
    (linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b))
}

/// Convert XYZ to L*a*b*.
pub fn xyz_to_lab(xyz: Xyz) -> Lab {
    let fx = lab_f(xyz.x / WHITE_X);
    let fy = lab_f(xyz.y / WHITE_Y);
    let fz = lab_f(xyz.z / WHITE_Z);
    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Convert L*a*b* to XYZ.
pub fn lab_to_xyz(lab: Lab) -> Xyz {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = fy + lab.a / 500.0;
    let fz = fy - lab.b / 200.0;
    Xyz {
        x: WHITE_X * lab_f_inv(fx),
        y: WHITE_Y * lab_f_inv(fy),
        z: WHITE_Z * lab_f_inv(fz),
    }
}

/// Convert sRGB to L*a*b*.
pub fn rgb_to_lab(r: u8, g: u8, b: u8) -> Lab {
    xyz_to_lab(rgb_to_xyz(r, g, b))
}

/// Convert L*a*b* to sRGB.
pub fn lab_to_rgb(lab: Lab) -> (u8, u8, u8) {
    xyz_to_rgb(lab_to_xyz(lab))
}

fn map_rgb_pixels(pix: &Pix, f: impl Fn(u8, u8, u8) -> (u8, u8, u8)) -> ColorResult<Pix> {
    if pix.depth() != PixelDepth::Bit32 {
        return Err(ColorError::UnsupportedDepth {
            expected: "32 bpp",
            actual: pix.depth().bits(),
        });
    }

    let mut out = pix.create_template().to_mut();
    for y in 0..pix.height() {
        let src = pix.row_data(y);
        let dst = out.row_data_mut(y);
        for (d, &s) in dst.iter_mut().zip(src).take(pix.width() as usize) {
            let (r, g, b) = color::extract_rgb(s);
            let (c0, c1, c2) = f(r, g, b);
            *d = color::compose_rgb(c0, c1, c2);
        }
    }
    Ok(out.into())
}

/// Convert a 32 bpp RGB image to 8-bit encoded L*a*b*.
///
/// See the module docs for the channel encoding.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedDepth`] if the image is not 32 bpp.
pub fn pix_convert_rgb_to_lab(pix: &Pix) -> ColorResult<Pix> {
    map_rgb_pixels(pix, |r, g, b| rgb_to_lab(r, g, b).to_bytes())
}

/// Convert an 8-bit encoded L*a*b* image back to 32 bpp RGB.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedDepth`] if the image is not 32 bpp.
pub fn pix_convert_lab_to_rgb(pix: &Pix) -> ColorResult<Pix> {
    map_rgb_pixels(pix, |l, a, b| lab_to_rgb(Lab::from_bytes(l, a, b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_white_and_black() {
        let white = rgb_to_lab(255, 255, 255);
        assert!(close(white.l, 100.0, 0.05), "{:?}", white);
        assert!(close(white.a, 0.0, 0.05), "{:?}", white);
        assert!(close(white.b, 0.0, 0.05), "{:?}", white);

        let black = rgb_to_lab(0, 0, 0);
        assert!(close(black.l, 0.0, 1e-3), "{:?}", black);
        assert!(close(black.a, 0.0, 1e-3), "{:?}", black);
    }

    #[test]
    fn test_pure_red() {
        let red = rgb_to_lab(255, 0, 0);
        assert!(close(red.l, 53.24, 0.1), "{:?}", red);
        assert!(close(red.a, 80.09, 0.2), "{:?}", red);
        assert!(close(red.b, 67.20, 0.2), "{:?}", red);
    }

    #[test]
    fn test_gray_has_no_chroma() {
        for v in [17u8, 64, 128, 200] {
            let lab = rgb_to_lab(v, v, v);
            assert!(close(lab.a, 0.0, 0.05), "{:?}", lab);
            assert!(close(lab.b, 0.0, 0.05), "{:?}", lab);
        }
    }

    #[test]
    fn test_lab_rgb_inverse() {
        for (r, g, b) in [(255, 0, 0), (0, 255, 0), (0, 0, 255), (128, 64, 32), (10, 200, 90)] {
            let (rr, rg, rb) = lab_to_rgb(rgb_to_lab(r, g, b));
            assert!(
                (rr as i32 - r as i32).abs() <= 1
                    && (rg as i32 - g as i32).abs() <= 1
                    && (rb as i32 - b as i32).abs() <= 1,
                "({r},{g},{b}) came back as ({rr},{rg},{rb})"
            );
        }
    }

    #[test]
    fn test_byte_encoding() {
        assert_eq!(Lab::new(100.0, 0.0, 0.0).to_bytes(), (255, 128, 128));
        assert_eq!(Lab::new(0.0, -200.0, 200.0).to_bytes(), (0, 0, 255));
        let lab = Lab::from_bytes(255, 128, 0);
        assert!(close(lab.l, 100.0, 1e-4));
        assert_eq!(lab.a, 0.0);
        assert_eq!(lab.b, -128.0);
    }

    #[test]
    fn test_pix_conversion_requires_rgb() {
        let gray = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        assert!(matches!(
            pix_convert_rgb_to_lab(&gray),
            Err(ColorError::UnsupportedDepth { actual: 8, .. })
        ));
    }
}
