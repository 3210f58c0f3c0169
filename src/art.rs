//! Character and color grids.
//!
//! An [`ArtGrid`] pairs a 2D grid of characters with a color grid of the same
//! shape. Color grids are read from a plain text format, one row per line and
//! whitespace-separated hex colors per row:
//!
//! ```text
//! #000000 #202020 #404040
//! #606060 #808080 #a0a0a0
//! ```
//!
//! Blank lines and lines starting with `//` are ignored.
//!
//! A color grid can also be sampled from an image, resized to the grid shape
//! so that every pixel becomes one cell.

use crate::render::color::{ParseColorError, Rgb};
use image::imageops::{self, FilterType};
use image::RgbImage;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtError {
    #[error("Color grid is empty")]
    Empty,

    #[error("Row {row} has {got} colors, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Row {row}: {source}")]
    InvalidColor {
        row: usize,
        #[source]
        source: ParseColorError,
    },

    #[error("Cannot read image {path:?}: {message}")]
    Image { path: PathBuf, message: String },

    #[error("Text has no printable characters to lay out")]
    EmptyText,

    #[error("Character grid is {chars:?} but color grid is {colors:?}")]
    ShapeMismatch {
        chars: (usize, usize),
        colors: (usize, usize),
    },
}

/// Rectangular grid of background colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid {
    rows: Vec<Vec<Rgb>>,
}

impl ColorGrid {
    /// Build from rows; every row must have the same nonzero width
    pub fn new(rows: Vec<Vec<Rgb>>) -> Result<Self, ArtError> {
        let expected = rows.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(ArtError::Empty);
        }
        for (row, colors) in rows.iter().enumerate() {
            if colors.len() != expected {
                return Err(ArtError::RaggedRow {
                    row,
                    expected,
                    got: colors.len(),
                });
            }
        }
        Ok(ColorGrid { rows })
    }

    /// Parse the text format described in the module docs
    pub fn parse(text: &str) -> Result<Self, ArtError> {
        let mut rows = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            let row = rows.len();
            let colors = line
                .split_whitespace()
                .map(|hex| Rgb::from_hex(hex).map_err(|source| ArtError::InvalidColor { row, source }))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(colors);
        }
        ColorGrid::new(rows)
    }

    /// Sample the image at `path` into a `width` x `height` grid
    pub fn from_image(path: &Path, width: u32, height: u32) -> Result<Self, ArtError> {
        let image = image::open(path).map_err(|e| ArtError::Image {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        ColorGrid::from_rgb_image(&image.to_rgb8(), width, height)
    }

    /// Resize `image` to the grid shape and take one color per pixel.
    ///
    /// An image that already has the requested shape is used as is.
    pub fn from_rgb_image(image: &RgbImage, width: u32, height: u32) -> Result<Self, ArtError> {
        if width == 0 || height == 0 || image.width() == 0 || image.height() == 0 {
            return Err(ArtError::Empty);
        }

        let resized;
        let sampled = if image.dimensions() == (width, height) {
            image
        } else {
            debug!(
                from = ?image.dimensions(),
                to = ?(width, height),
                "resizing image"
            );
            resized = imageops::resize(image, width, height, FilterType::Triangle);
            &resized
        };

        let rows = sampled
            .rows()
            .map(|row| {
                row.map(|pixel| {
                    let [r, g, b] = pixel.0;
                    Rgb::new(r, g, b)
                })
                .collect()
            })
            .collect();
        ColorGrid::new(rows)
    }

    pub fn rows(&self) -> &[Vec<Rgb>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows[0].len()
    }
}

/// Characters laid over a [`ColorGrid`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtGrid {
    chars: Vec<Vec<char>>,
    colors: ColorGrid,
}

impl ArtGrid {
    pub fn new(chars: Vec<Vec<char>>, colors: ColorGrid) -> Result<Self, ArtError> {
        let shape = (chars.len(), chars.first().map(Vec::len).unwrap_or(0));
        let color_shape = (colors.height(), colors.width());
        if shape != color_shape || chars.iter().any(|row| row.len() != shape.1) {
            return Err(ArtError::ShapeMismatch {
                chars: shape,
                colors: color_shape,
            });
        }
        Ok(ArtGrid { chars, colors })
    }

    /// Fill the color grid row by row with `text`, repeating it as needed.
    ///
    /// Control characters such as newlines are dropped first so the art is
    /// a continuous stream of glyphs.
    pub fn from_text(text: &str, colors: ColorGrid) -> Result<Self, ArtError> {
        let glyphs: Vec<char> = text.chars().filter(|c| !c.is_control()).collect();
        if glyphs.is_empty() {
            return Err(ArtError::EmptyText);
        }

        let mut cycle = glyphs.iter().copied().cycle();
        let chars: Vec<Vec<char>> = (0..colors.height())
            .map(|_| cycle.by_ref().take(colors.width()).collect())
            .collect();

        ArtGrid::new(chars, colors)
    }

    pub fn height(&self) -> usize {
        self.chars.len()
    }

    pub fn width(&self) -> usize {
        self.colors.width()
    }

    /// Cells of one row as `(glyph, background)` pairs
    pub fn row(&self, index: usize) -> impl Iterator<Item = (char, Rgb)> + '_ {
        self.chars[index]
            .iter()
            .copied()
            .zip(self.colors.rows()[index].iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_skips_comments() {
        let grid = ColorGrid::parse("// art\n#000000 #ffffff\n\n  #ff0000 00ff00  \n").unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.rows()[1][1], Rgb::new(0, 255, 0));
    }

    #[test]
    fn rejects_ragged_rows() {
        assert_eq!(
            ColorGrid::parse("#000000 #000000\n#000000"),
            Err(ArtError::RaggedRow {
                row: 1,
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn rejects_empty_and_invalid() {
        assert_eq!(ColorGrid::parse("\n// nothing\n"), Err(ArtError::Empty));
        assert!(matches!(
            ColorGrid::parse("#000000 nope"),
            Err(ArtError::InvalidColor { row: 0, .. })
        ));
        assert!(matches!(
            ColorGrid::parse("#000000\n#+f+f+f"),
            Err(ArtError::InvalidColor { row: 1, .. })
        ));
    }

    #[test]
    fn image_pixels_become_cells() {
        let mut image = RgbImage::new(3, 2);
        image.put_pixel(0, 0, image::Rgb([255, 0, 0]));
        image.put_pixel(2, 1, image::Rgb([0, 0, 255]));

        let grid = ColorGrid::from_rgb_image(&image, 3, 2).unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.rows()[0][0], Rgb::new(255, 0, 0));
        assert_eq!(grid.rows()[0][1], Rgb::BLACK);
        assert_eq!(grid.rows()[1][2], Rgb::new(0, 0, 255));
    }

    #[test]
    fn image_is_resized_to_grid_shape() {
        let image = RgbImage::from_pixel(8, 6, image::Rgb([10, 20, 30]));
        let grid = ColorGrid::from_rgb_image(&image, 4, 3).unwrap();
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 4);
        assert!(grid.rows().iter().flatten().all(|&c| c == Rgb::new(10, 20, 30)));
    }

    #[test]
    fn image_grid_needs_cells() {
        let image = RgbImage::new(2, 2);
        assert_eq!(ColorGrid::from_rgb_image(&image, 0, 2), Err(ArtError::Empty));
    }

    #[test]
    fn missing_image_is_reported() {
        let path = Path::new("/nonexistent/bfart-missing.png");
        assert!(matches!(
            ColorGrid::from_image(path, 2, 2),
            Err(ArtError::Image { .. })
        ));
    }

    #[test]
    fn text_cycles_over_the_grid() {
        let colors = ColorGrid::parse("#000000 #000000 #000000\n#000000 #000000 #000000").unwrap();
        let art = ArtGrid::from_text("ab\nc", colors).unwrap();
        let first: String = art.row(0).map(|(c, _)| c).collect();
        let second: String = art.row(1).map(|(c, _)| c).collect();
        assert_eq!(first, "abc");
        assert_eq!(second, "abc");
    }

    #[test]
    fn text_must_have_glyphs() {
        let colors = ColorGrid::parse("#000000").unwrap();
        assert_eq!(ArtGrid::from_text("\n\t", colors), Err(ArtError::EmptyText));
    }

    #[test]
    fn shape_must_match() {
        let colors = ColorGrid::parse("#000000 #000000").unwrap();
        assert_eq!(
            ArtGrid::new(vec![vec!['x']], colors),
            Err(ArtError::ShapeMismatch {
                chars: (1, 1),
                colors: (1, 2)
            })
        );
    }
}
