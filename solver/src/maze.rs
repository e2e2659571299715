use std::path::Path;

use image::{DynamicImage, Rgba, RgbaImage};
use log::info;

use crate::error::SolveError;
use crate::graph::reduce;
use crate::grid::Point;
use crate::problem::MazeProblem;
use crate::search::{solve, Algorithm, PathResult, SearchConfig};
use crate::util::{draw_path, load_img, parse_img, PixelClassifier};

pub const PATH_COLOR: Rgba<u8> = Rgba([46, 225, 87, 255]);

/// A maze image together with the graph reduced from it
pub struct Maze {
    image: DynamicImage,
    problem: MazeProblem,
}

impl Maze {
    pub fn open(path: impl AsRef<Path>, classifier: PixelClassifier) -> Result<Self, SolveError> {
        let path = path.as_ref();
        info!("opening {}", path.display());
        Self::from_image(load_img(path)?, classifier)
    }

    pub fn from_image(image: DynamicImage, classifier: PixelClassifier) -> Result<Self, SolveError> {
        let grid = parse_img(&image, classifier)?;
        let problem = MazeProblem::new(reduce(&grid)?);

        Ok(Self { image, problem })
    }

    pub fn problem(&self) -> &MazeProblem {
        &self.problem
    }

    pub fn solve(
        &self,
        algorithm: Algorithm,
        config: SearchConfig,
    ) -> Result<PathResult<Point>, SolveError> {
        solve(&self.problem, algorithm, config)
    }

    /// A copy of the maze image with `path` drawn on top
    pub fn render(&self, path: &[Point], color: Rgba<u8>) -> Result<RgbaImage, SolveError> {
        let mut img = self.image.to_rgba8();
        draw_path(&mut img, path, color)?;
        Ok(img)
    }

    pub fn save(
        &self,
        path: &[Point],
        color: Rgba<u8>,
        out: impl AsRef<Path>,
    ) -> Result<(), SolveError> {
        let out = out.as_ref();
        self.render(path, color)?
            .save(out)
            .map_err(|source| SolveError::ImageEncodeFailure {
                path: out.to_path_buf(),
                source,
            })?;
        info!("wrote solution to {}", out.display());
        Ok(())
    }
}
