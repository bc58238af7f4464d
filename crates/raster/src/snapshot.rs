//! PNG output for a [`Raster`].
//!
//! Feature-gated behind `png` (default on) so the rasterizer itself can be
//! used without pulling in the `image` crate.

use backdrop_core::BackdropError;
use std::path::Path;

use crate::raster::Raster;

/// Writes the raster as an RGBA PNG.
///
/// Returns `BackdropError::InvalidDimensions` for an empty raster, or
/// `BackdropError::Io` on write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), BackdropError> {
    if raster.width() == 0 || raster.height() == 0 {
        return Err(BackdropError::InvalidDimensions);
    }
    let img = image::RgbaImage::from_raw(raster.width(), raster.height(), raster.pixels().to_vec())
        .ok_or_else(|| BackdropError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| BackdropError::Io(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::{DrawSurface, Rgb};
    use glam::DVec2;

    #[test]
    fn write_png_round_trip() {
        let mut raster = Raster::new(16, 12, Rgb::new(0, 0, 0).with_alpha(1.0)).unwrap();
        raster.fill_circle(DVec2::new(8.0, 6.0), 3.0, Rgb::new(59, 130, 246).with_alpha(1.0));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        write_png(&raster, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!((img.width(), img.height()), (16, 12));
        assert_eq!(img.get_pixel(8, 6).0, [59, 130, 246, 255]);
        assert_eq!(img.as_raw().as_slice(), raster.pixels());
    }

    #[test]
    fn write_png_rejects_empty_raster() {
        let raster = Raster::new(0, 10, Rgb::new(0, 0, 0).with_alpha(1.0)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let result = write_png(&raster, &dir.path().join("empty.png"));
        assert!(matches!(result, Err(BackdropError::InvalidDimensions)));
    }

    #[test]
    fn write_png_reports_io_failure() {
        let raster = Raster::new(4, 4, Rgb::new(0, 0, 0).with_alpha(1.0)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.png");
        assert!(matches!(write_png(&raster, &path), Err(BackdropError::Io(_))));
    }
}
