//! Asset management system
//!
//! Textures are decoded once per path and referenced everywhere else through
//! a small copyable [`TextureHandle`].

pub mod image_loader;
pub mod texture_loader;

pub use image_loader::ImageData;
pub use texture_loader::{ImageTextureLoader, TextureLoader};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::config::AssetSettings;
use crate::foundation::collections::{SlotMap, TextureId};
use crate::foundation::math::{Mat4, Vec3};

/// Asset system errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Reference to a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle {
    /// Id in the asset manager's texture table
    pub id: TextureId,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl TextureHandle {
    /// Scaling that stretches a unit quad to the texture's pixel size
    pub fn base_scale(&self) -> Mat4 {
        Mat4::new_nonuniform_scaling(&Vec3::new(self.width as f32, self.height as f32, 1.0))
    }
}

struct TextureRecord {
    path: PathBuf,
    image: ImageData,
}

/// Texture store memoised by resolved path
pub struct AssetManager {
    search_paths: Vec<PathBuf>,
    loader: Box<dyn TextureLoader>,
    textures: SlotMap<TextureId, TextureRecord>,
    by_path: HashMap<PathBuf, TextureId>,
}

impl AssetManager {
    /// Create an asset manager reading images from disk
    pub fn new(settings: &AssetSettings) -> Self {
        Self::with_loader(settings, Box::new(ImageTextureLoader))
    }

    /// Create an asset manager with a custom texture loader
    pub fn with_loader(settings: &AssetSettings, loader: Box<dyn TextureLoader>) -> Self {
        Self {
            search_paths: settings.search_paths.iter().map(PathBuf::from).collect(),
            loader,
            textures: SlotMap::with_key(),
            by_path: HashMap::new(),
        }
    }

    /// Append a directory to search when resolving relative paths
    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) {
        self.search_paths.push(path.into());
    }

    /// Directories searched in order
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Resolve `path` against the search paths
    ///
    /// The first search path containing the file wins; otherwise the path is
    /// used as given. Existing files resolve to their canonical path, so two
    /// spellings of the same file share one cache entry.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        let resolved = self
            .search_paths
            .iter()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.exists())
            .unwrap_or_else(|| path.to_path_buf());
        std::fs::canonicalize(&resolved).unwrap_or_else(|_| normalize_lexically(&resolved))
    }

    /// Load a texture, or return the handle of the copy already loaded
    pub fn load_texture(&mut self, path: impl AsRef<Path>) -> Result<TextureHandle, AssetError> {
        let resolved = self.resolve(path);
        if let Some(&id) = self.by_path.get(&resolved) {
            return self
                .handle(id)
                .ok_or_else(|| AssetError::NotFound(resolved.display().to_string()));
        }

        let image = self.loader.load(&resolved)?;
        log::debug!("Loaded texture {:?} ({}x{})", resolved, image.width, image.height);

        let id = self.textures.insert(TextureRecord {
            path: resolved.clone(),
            image,
        });
        self.by_path.insert(resolved.clone(), id);
        self.handle(id)
            .ok_or_else(|| AssetError::NotFound(resolved.display().to_string()))
    }

    /// Handle of an already loaded texture
    pub fn get_texture(&self, path: impl AsRef<Path>) -> Option<TextureHandle> {
        let id = *self.by_path.get(&self.resolve(path))?;
        self.handle(id)
    }

    /// Handle for a texture id
    pub fn handle(&self, id: TextureId) -> Option<TextureHandle> {
        self.textures.get(id).map(|record| TextureHandle {
            id,
            width: record.image.width,
            height: record.image.height,
        })
    }

    /// Decoded pixels of a loaded texture
    pub fn texture_data(&self, id: TextureId) -> Option<&ImageData> {
        self.textures.get(id).map(|record| &record.image)
    }

    /// Resolved path a texture was loaded from
    pub fn texture_path(&self, id: TextureId) -> Option<&Path> {
        self.textures.get(id).map(|record| record.path.as_path())
    }

    /// Number of distinct textures loaded
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

// Drop `.` components of a path that does not exist on disk
fn normalize_lexically(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|component| !matches!(component, std::path::Component::CurDir))
        .collect();
    if normalized.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        normalized
    }
}

impl std::fmt::Debug for AssetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetManager")
            .field("search_paths", &self.search_paths)
            .field("textures", &self.textures.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingLoader {
        loads: Rc<Cell<usize>>,
    }

    impl TextureLoader for CountingLoader {
        fn load(&mut self, path: &Path) -> Result<ImageData, AssetError> {
            self.loads.set(self.loads.get() + 1);
            if path.to_string_lossy().contains("missing") {
                return Err(AssetError::NotFound(path.display().to_string()));
            }
            Ok(ImageData::solid_color(16, 8, [255, 255, 255, 255]))
        }
    }

    fn manager() -> (AssetManager, Rc<Cell<usize>>) {
        let loads = Rc::new(Cell::new(0));
        let loader = CountingLoader { loads: loads.clone() };
        (AssetManager::with_loader(&AssetSettings::default(), Box::new(loader)), loads)
    }

    #[test]
    fn test_repeated_load_returns_same_handle() {
        let (mut assets, loads) = manager();
        let first = assets.load_texture("player.png").unwrap();
        let second = assets.load_texture("player.png").unwrap();

        assert_eq!(first, second);
        assert_eq!(loads.get(), 1);
        assert_eq!(assets.texture_count(), 1);
        assert_eq!((first.width, first.height), (16, 8));
    }

    #[test]
    fn test_get_texture_only_sees_loaded_paths() {
        let (mut assets, _) = manager();
        assert!(assets.get_texture("tiles.png").is_none());

        let handle = assets.load_texture("tiles.png").unwrap();
        assert_eq!(assets.get_texture("tiles.png"), Some(handle));
        assert_eq!(assets.texture_data(handle.id).map(|img| img.width), Some(16));
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let (mut assets, loads) = manager();
        assert!(assets.load_texture("missing.png").is_err());
        assert!(assets.load_texture("missing.png").is_err());

        assert_eq!(loads.get(), 2);
        assert_eq!(assets.texture_count(), 0);
    }

    #[test]
    fn test_equivalent_spellings_share_handle() {
        let (mut assets, loads) = manager();
        let plain = assets.load_texture("textures/a.png").unwrap();
        let dotted = assets.load_texture("./textures/./a.png").unwrap();

        assert_eq!(plain, dotted);
        assert_eq!(loads.get(), 1);
    }

    #[test]
    fn test_existing_file_cached_by_canonical_path() {
        let dir = std::env::temp_dir().join(format!("engine2d_assets_{}", std::process::id()));
        std::fs::create_dir_all(dir.join("sub")).unwrap();
        std::fs::write(dir.join("a.png"), b"").unwrap();

        let (mut assets, loads) = manager();
        let direct = assets.load_texture(dir.join("a.png")).unwrap();
        let roundabout = assets.load_texture(dir.join("sub").join("..").join("a.png")).unwrap();

        assert_eq!(direct, roundabout);
        assert_eq!(loads.get(), 1);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_base_scale_is_pixel_size() {
        let (mut assets, _) = manager();
        let handle = assets.load_texture("player.png").unwrap();
        let scale = handle.base_scale();

        assert_eq!(scale[(0, 0)], 16.0);
        assert_eq!(scale[(1, 1)], 8.0);
        assert_eq!(scale[(2, 2)], 1.0);
    }
}
