use std::path::Path;

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{GraphDefect, SolveError};
use crate::grid::{Cell, PixelGrid, Point};

/// How image pixels are mapped onto wall / open cells. Alpha is ignored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelClassifier {
    /// pure black is a wall, pure white is open, anything else is rejected
    #[default]
    Exact,
    /// a pixel whose mean RGB value is below the threshold is a wall
    Threshold(u8),
}

impl PixelClassifier {
    pub fn classify(&self, rgb: [u8; 3]) -> Option<Cell> {
        match self {
            PixelClassifier::Exact => match rgb {
                [0, 0, 0] => Some(Cell::Wall),
                [255, 255, 255] => Some(Cell::Open),
                _ => None,
            },
            PixelClassifier::Threshold(threshold) => {
                let mean = rgb.iter().map(|c| *c as u16).sum::<u16>() / 3;
                if mean < *threshold as u16 {
                    Some(Cell::Wall)
                } else {
                    Some(Cell::Open)
                }
            }
        }
    }
}

pub fn load_img(path: &Path) -> Result<DynamicImage, SolveError> {
    image::open(path).map_err(|source| SolveError::ImageDecodeFailure {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_img(img: &DynamicImage, classifier: PixelClassifier) -> Result<PixelGrid, SolveError> {
    let width = img.width() as usize;
    let height = img.height() as usize;

    let mut cells = vec![vec![Cell::Wall; width]; height];

    for row in 0..height {
        for col in 0..width {
            let p = img.get_pixel(col as u32, row as u32);
            let rgb = [p.0[0], p.0[1], p.0[2]];

            cells[row][col] = classifier
                .classify(rgb)
                .ok_or(SolveError::AmbiguousPixel {
                    point: Point::new(col, row),
                    rgb,
                })?;
        }
    }

    Ok(PixelGrid {
        rows: height,
        columns: width,
        cells,
    })
}

/// Paint every pixel on the straight segments between consecutive path points.
pub fn draw_path(img: &mut RgbaImage, path: &[Point], color: Rgba<u8>) -> Result<(), SolveError> {
    if let [only] = path {
        img.put_pixel(only.x as u32, only.y as u32, color);
    }

    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        if from.x != to.x && from.y != to.y {
            return Err(GraphDefect::NotAxisAligned { from, to }.into());
        }

        for x in from.x.min(to.x)..=from.x.max(to.x) {
            for y in from.y.min(to.y)..=from.y.max(to.y) {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }

    Ok(())
}
