//! Image conversion and PNG export.
//!
//! The pixel grid is converted to an [`RgbImage`] in one bulk copy. The
//! display canvas and the entropy heatmap are sampled through
//! [`display_to_grid`] so they line up exactly with hover inspection.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use log::info;

use super::inspect::display_to_grid;
use crate::analysis::{BlockKey, EntropyMap};
use crate::bitmap::PixelGrid;
use crate::config::VisualizerConfig;
use crate::error::{Error, Result};
use crate::util::color::entropy_to_color;

/// Color of canvas areas with no data behind them.
const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

fn image_dimensions(grid: &PixelGrid) -> Result<(u32, u32)> {
    let too_large = || Error::ImageTooLarge {
        width: grid.width(),
        height: grid.height(),
    };
    let width = u32::try_from(grid.width()).map_err(|_| too_large())?;
    let height = u32::try_from(grid.height()).map_err(|_| too_large())?;
    Ok((width, height))
}

/// Convert the grid to an image at its native size (one pixel per byte).
pub fn to_image(grid: &PixelGrid) -> Result<RgbImage> {
    let (width, height) = image_dimensions(grid)?;
    // The grid buffer is width * height * 3 bytes by construction
    RgbImage::from_raw(width, height, grid.as_raw().to_vec()).ok_or(Error::ImageTooLarge {
        width: grid.width(),
        height: grid.height(),
    })
}

/// Nearest-neighbour upscale of the grid to the configured display canvas.
///
/// An empty grid yields a black canvas.
pub fn to_display_image(grid: &PixelGrid, config: &VisualizerConfig) -> RgbImage {
    RgbImage::from_fn(config.display_width, config.display_height, |x, y| {
        display_to_grid(x, y, grid.width(), grid.height(), config)
            .and_then(|(gx, gy)| grid.pixel(gx, gy))
            .map_or(BACKGROUND, |(r, g, b)| Rgb([r, g, b]))
    })
}

/// Block entropy heatmap on the display canvas.
///
/// Blocks without data are drawn black.
pub fn entropy_heatmap(
    grid: &PixelGrid,
    entropy: &EntropyMap,
    config: &VisualizerConfig,
) -> RgbImage {
    let span = entropy.span();
    RgbImage::from_fn(config.display_width, config.display_height, |x, y| {
        display_to_grid(x, y, grid.width(), grid.height(), config)
            .and_then(|(gx, gy)| entropy.get(BlockKey::from_pixel(gx, gy, span)))
            .map_or(BACKGROUND, |value| {
                let (r, g, b) = entropy_to_color(value);
                Rgb([r, g, b])
            })
    })
}

fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::Export {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        "Exported {}x{} PNG to {}",
        image.width(),
        image.height(),
        path.display()
    );
    Ok(())
}

/// Write the grid at native size as a PNG.
pub fn export_png(grid: &PixelGrid, path: impl AsRef<Path>) -> Result<()> {
    if grid.is_empty() {
        return Err(Error::EmptyImage);
    }
    save_png(&to_image(grid)?, path.as_ref())
}

/// Write the upscaled display canvas as a PNG.
pub fn export_display_png(
    grid: &PixelGrid,
    config: &VisualizerConfig,
    path: impl AsRef<Path>,
) -> Result<()> {
    if grid.is_empty() {
        return Err(Error::EmptyImage);
    }
    save_png(&to_display_image(grid, config), path.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::reduce;
    use crate::bitmap::build;
    use crate::util::color::byte_to_color;

    #[test]
    fn test_to_image_bulk_copy() {
        let config = VisualizerConfig::default().with_width(4);
        let (grid, _) = build(&[0, 1, 2, 3, 4], &config);
        let image = to_image(&grid).unwrap();
        assert_eq!(image.dimensions(), (4, 2));
        let (r, g, b) = byte_to_color(4);
        assert_eq!(image.get_pixel(0, 1), &Rgb([r, g, b]));
        assert_eq!(image.get_pixel(1, 1), &BACKGROUND);
    }

    #[test]
    fn test_display_image_nearest_neighbour() {
        let config = VisualizerConfig::default()
            .with_width(2)
            .with_display_size(4, 4);
        let (grid, _) = build(&[10, 20, 30, 40], &config);
        let image = to_display_image(&grid, &config);
        assert_eq!(image.dimensions(), (4, 4));

        let color = |b: u8| {
            let (r, g, bl) = byte_to_color(b);
            Rgb([r, g, bl])
        };
        assert_eq!(image.get_pixel(0, 0), &color(10));
        assert_eq!(image.get_pixel(1, 1), &color(10));
        assert_eq!(image.get_pixel(2, 0), &color(20));
        assert_eq!(image.get_pixel(3, 3), &color(40));
    }

    #[test]
    fn test_display_image_of_empty_grid_is_black() {
        let config = VisualizerConfig::default();
        let (grid, _) = build(&[], &config);
        let image = to_display_image(&grid, &config);
        assert_eq!(image.dimensions(), (512, 512));
        assert!(image.pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn test_heatmap_colors_blocks() {
        let config = VisualizerConfig::default().with_display_size(8, 8);
        let data: Vec<u8> = (0..=255).collect();
        let (grid, blocks) = build(&data, &config);
        let map = reduce(&blocks);
        let image = entropy_heatmap(&grid, &map, &config);

        let (r, g, b) = entropy_to_color(5.0);
        assert!(image.pixels().all(|p| *p == Rgb([r, g, b])));
    }

    #[test]
    fn test_export_empty_grid_rejected() {
        let (grid, _) = build(&[], &VisualizerConfig::default());
        let path = std::env::temp_dir().join("binscope-never-written.png");
        assert!(matches!(export_png(&grid, &path), Err(Error::EmptyImage)));
        assert!(!path.exists());
    }
}
