use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("model file {name} not found (searched: {searched}); pass --models-dir or --download-models")]
    NotFound { name: String, searched: String },
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("download of {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64)>;

/// A model file and the public location it can be fetched from.
#[derive(Clone, Copy, Debug)]
pub struct ModelSpec {
    pub name: &'static str,
    pub url: &'static str,
}

/// Locate a model file, downloading it only when explicitly allowed.
///
/// Resolution order:
/// 1. `search_dirs`, in order (explicit models dir, OpenCV data dirs)
/// 2. User cache directory (platform-specific)
/// 3. Download `spec.url` into the cache, if `allow_download`
pub fn resolve(
    spec: ModelSpec,
    search_dirs: &[PathBuf],
    allow_download: bool,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    if let Some(found) = find_in(spec.name, search_dirs) {
        return Ok(found);
    }

    let cache_dir = model_cache_dir()?;
    let cached_path = cache_dir.join(spec.name);
    if cached_path.exists() {
        return Ok(cached_path);
    }

    if !allow_download {
        let searched = search_dirs
            .iter()
            .chain(std::iter::once(&cache_dir))
            .map(|d| d.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(ModelResolveError::NotFound {
            name: spec.name.to_string(),
            searched,
        });
    }

    fs::create_dir_all(&cache_dir).map_err(ModelResolveError::CacheDir)?;
    log::info!("Downloading {} from {}", spec.name, spec.url);
    download(spec.url, &cached_path, progress)?;
    Ok(cached_path)
}

fn find_in(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter().map(|d| d.join(name)).find(|p| p.is_file())
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/facecam/models/`
/// - Linux: `$XDG_CACHE_HOME/facecam/models/` or `~/.cache/facecam/models/`
/// - Windows: `%LOCALAPPDATA%/facecam/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("facecam").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("facecam").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let response = reqwest::blocking::get(url).map_err(|e| ModelResolveError::Download {
        url: url.to_string(),
        source: e,
    })?;

    if !response.status().is_success() {
        return Err(ModelResolveError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let total = response.content_length().unwrap_or(0);
    let bytes = response.bytes().map_err(|e| ModelResolveError::Download {
        url: url.to_string(),
        source: e,
    })?;

    // Staged as `.part`; only a complete file is renamed into the cache.
    let temp_path = dest.with_extension("part");
    let mut file = fs::File::create(&temp_path).map_err(write_error(&temp_path))?;

    let mut downloaded: u64 = 0;
    for chunk in bytes.chunks(256 * 1024) {
        file.write_all(chunk).map_err(write_error(&temp_path))?;
        downloaded += chunk.len() as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }

    file.flush().map_err(write_error(&temp_path))?;
    drop(file);

    fs::rename(&temp_path, dest).map_err(write_error(dest))?;
    Ok(())
}

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> ModelResolveError {
    let path = path.to_path_buf();
    move |source| ModelResolveError::Write { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn spec(name: &'static str) -> ModelSpec {
        ModelSpec {
            name,
            url: "http://invalid.nonexistent.example.com/model",
        }
    }

    #[test]
    fn test_resolve_finds_file_in_search_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("facecam_test_cascade.xml");
        fs::write(&path, b"<opencv_storage/>").unwrap();

        let found = resolve(
            spec("facecam_test_cascade.xml"),
            &[tmp.path().to_path_buf()],
            false,
            None,
        )
        .unwrap();
        assert_eq!(found, path);
    }

    #[test]
    fn test_resolve_prefers_earlier_search_dir() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::write(first.path().join("facecam_test_model.yaml"), b"a").unwrap();
        fs::write(second.path().join("facecam_test_model.yaml"), b"b").unwrap();

        let found = resolve(
            spec("facecam_test_model.yaml"),
            &[first.path().to_path_buf(), second.path().to_path_buf()],
            false,
            None,
        )
        .unwrap();
        assert_eq!(fs::read(found).unwrap(), b"a");
    }

    #[test]
    fn test_resolve_skips_missing_dirs() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("facecam_test_eye.xml"), b"x").unwrap();

        let found = resolve(
            spec("facecam_test_eye.xml"),
            &[tmp.path().join("does-not-exist"), tmp.path().to_path_buf()],
            false,
            None,
        );
        assert!(found.is_ok());
    }

    #[test]
    fn test_resolve_missing_without_download_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = resolve(
            spec("facecam_definitely_missing_model.bin"),
            &[tmp.path().to_path_buf()],
            false,
            None,
        )
        .unwrap_err();

        match err {
            ModelResolveError::NotFound { name, searched } => {
                assert_eq!(name, "facecam_definitely_missing_model.bin");
                assert!(searched.contains(&tmp.path().display().to_string()));
            }
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_model_cache_dir_returns_path() {
        let path = model_cache_dir().unwrap();
        assert!(path.to_string_lossy().contains("facecam"));
        assert!(path.to_string_lossy().contains("models"));
    }

    #[test]
    fn test_download_invalid_url_returns_error() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("model.xml");
        let result = download("http://invalid.nonexistent.example.com/model", &dest, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_download_atomic_no_partial_on_failure() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("model.xml");
        let _ = download("http://invalid.nonexistent.example.com/model", &dest, None);
        assert!(!dest.exists());
        assert!(!dest.with_extension("part").exists());
    }
}
