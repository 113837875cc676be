//! Texture loading seam

use std::path::Path;

use super::image_loader::ImageData;
use super::AssetError;

/// Produces decoded pixels for a texture path
///
/// The asset manager memoises results, so a loader is asked at most once per
/// resolved path.
pub trait TextureLoader {
    /// Load and decode the image at `path`
    fn load(&mut self, path: &Path) -> Result<ImageData, AssetError>;
}

/// Loader reading image files from disk
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageTextureLoader;

impl TextureLoader for ImageTextureLoader {
    fn load(&mut self, path: &Path) -> Result<ImageData, AssetError> {
        if !path.exists() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }
        ImageData::from_file(path)
    }
}
