//! Image resolution context used while loading a quiz.
//!
//! The model only records *where* a gap's image lives. Decoding and display
//! belong to the front end.

use relative_path::RelativePath;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("Image not found: {0}")]
    NotFound(PathBuf),
    #[error("Image path is not a file: {0}")]
    NotAFile(PathBuf),
}

/// A resolved gap image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapImage {
    path: PathBuf,
}

impl GapImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Turns the `img` attribute of a gap into a [`GapImage`].
pub trait ImageResolver {
    fn resolve(&self, img: &RelativePath) -> Result<GapImage, ImageError>;
}

impl<F> ImageResolver for F
where
    F: Fn(&RelativePath) -> Result<GapImage, ImageError>,
{
    fn resolve(&self, img: &RelativePath) -> Result<GapImage, ImageError> {
        self(img)
    }
}

/// Resolves images relative to a directory, usually the exercise file's own.
#[derive(Debug, Clone)]
pub struct DirImageResolver {
    root: PathBuf,
}

impl DirImageResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageResolver for DirImageResolver {
    fn resolve(&self, img: &RelativePath) -> Result<GapImage, ImageError> {
        let path = img.to_path(&self.root);
        if !path.exists() {
            return Err(ImageError::NotFound(path));
        }
        if !path.is_file() {
            return Err(ImageError::NotAFile(path));
        }
        Ok(GapImage::new(path))
    }
}
