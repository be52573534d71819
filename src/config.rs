/// Runtime configuration, read from the environment
use std::path::{Path, PathBuf};

use crate::error::{CartError, Result};

/// Overrides the cart database location
pub const DB_ENV: &str = "CART_VIEW_DB";
/// Points at a seed JSON file used on first start
pub const SEED_ENV: &str = "CART_VIEW_SEED";
/// Base directory for relative product image paths
pub const ASSETS_ENV: &str = "CART_VIEW_ASSETS";

/// Assets shipped with the crate
const DEFAULT_ASSETS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Path of the SQLite cart database
    pub db_path: PathBuf,
    /// Optional seed file replacing the embedded default seed
    pub seed_path: Option<PathBuf>,
    /// Directory relative product images are resolved against
    pub assets_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = match var(DB_ENV).filter(|v| !v.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };
        let seed_path = var(SEED_ENV).filter(|v| !v.is_empty()).map(PathBuf::from);
        let assets_dir = var(ASSETS_ENV)
            .filter(|v| !v.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR), PathBuf::from);

        Ok(AppConfig {
            db_path,
            seed_path,
            assets_dir,
        })
    }
}

/// Absolute image paths are kept; relative ones are joined to `assets_dir`
pub fn resolve_image(assets_dir: &Path, image: &str) -> PathBuf {
    let path = Path::new(image);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        assets_dir.join(path)
    }
}

/// Default database location in the user's data directory:
/// - Linux: ~/.local/share/cart-view/cart.db
/// - macOS: ~/Library/Application Support/cart-view/cart.db
/// - Windows: %APPDATA%\cart-view\cart.db
fn default_db_path() -> Result<PathBuf> {
    let mut path = dirs::data_dir()
        .or_else(dirs::home_dir)
        .ok_or(CartError::NoDataDir)?;

    path.push("cart-view");
    path.push("cart.db");
    Ok(path)
}
