use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use url::Url;

use crate::canvas::ImageInfo;
use crate::error::{Result, ThemeError};
use crate::magick_canvas::read_wand;

/// Resolves a local path or an http(s) URL to a decodable image on disk.
///
/// Remote images are downloaded once into `cache_dir` and reused after that.
pub fn get_image_info(reference: &str, cache_dir: &Path) -> Result<ImageInfo> {
    let path = match Url::parse(reference) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => fetch_remote(&url, cache_dir)?,
        Ok(url) if url.scheme() == "file" => url
            .to_file_path()
            .map_err(|()| ThemeError::AssetNotFound(reference.to_string()))?,
        _ => PathBuf::from(reference),
    };
    let path = fs::canonicalize(&path)
        .map_err(|e| ThemeError::AssetNotFound(format!("{reference}: {e}")))?;

    let wand = read_wand(&path)?;
    let info = ImageInfo {
        width: wand.get_image_width() as u32,
        height: wand.get_image_height() as u32,
        path,
    };
    debug!("Resolved {reference} to {} ({}x{})", info.path.display(), info.width, info.height);
    Ok(info)
}

fn cache_path(url: &Url, cache_dir: &Path) -> PathBuf {
    let digest = Sha256::digest(url.as_str().as_bytes());
    cache_dir.join(hex::encode(digest))
}

fn fetch_remote(url: &Url, cache_dir: &Path) -> Result<PathBuf> {
    let target = cache_path(url, cache_dir);
    if target.is_file() {
        if read_wand(&target).is_ok() {
            debug!("Using cached copy of {url}");
            return Ok(target);
        }
        warn!("Discarding undecodable cached copy of {url}");
        fs::remove_file(&target)?;
    }

    info!("Downloading {url}");
    let not_found = |e: reqwest::Error| ThemeError::AssetNotFound(format!("{url}: {e}"));
    let bytes = reqwest::blocking::get(url.as_str())
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.bytes())
        .map_err(not_found)?;

    // Only complete, decodable downloads reach the cache path
    fs::create_dir_all(cache_dir)?;
    let mut partial = NamedTempFile::new_in(cache_dir)?;
    partial.write_all(&bytes)?;
    partial.flush()?;
    read_wand(partial.path())
        .map_err(|_| ThemeError::AssetNotFound(format!("{url}: response is not an image")))?;
    partial.persist(&target).map_err(|e| e.error)?;
    Ok(target)
}
