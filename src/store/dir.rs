//! File-backed store: one labelled file per blob in a private directory
//!
//! File layout is a header of `key value\n` lines, a single NUL byte, then
//! the body. Saves go through `<name>.tmp` and a rename, so a listed name
//! always refers to a complete file.

use crate::error::{CacheError, CacheResult};
use crate::labels::Labels;
use crate::store::{MappedBlob, Store};
use memmap2::Mmap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

const TMP_SUFFIX: &str = ".tmp";

/// Directory of labelled blob files, bounded to `max_files` entries
#[derive(Debug)]
pub struct StorageDir {
    path: PathBuf,
    max_files: usize,
}

impl StorageDir {
    /// Open or create the storage directory.
    ///
    /// Leftover temporary files from interrupted saves are removed.
    pub fn open(path: impl Into<PathBuf>, max_files: usize) -> CacheResult<Self> {
        let path = path.into();

        fs::create_dir_all(&path).map_err(|e| CacheError::StoreOpen {
            path: path.clone(),
            source: e,
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o700);
            fs::set_permissions(&path, perms).map_err(|e| CacheError::StoreOpen {
                path: path.clone(),
                source: e,
            })?;
        }

        let dir = Self { path, max_files };
        dir.remove_stale_tmp_files()?;

        debug!(
            "Opened storage directory {} (max {} files)",
            dir.path.display(),
            dir.max_files
        );
        Ok(dir)
    }

    /// Directory holding the blobs
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Maximum number of blobs this directory accepts
    pub fn max_files(&self) -> usize {
        self.max_files
    }

    /// Number of stored blobs and their total size in bytes
    pub fn usage(&self) -> CacheResult<(usize, u64)> {
        let mut bytes = 0;
        let names = self.list_names()?;
        for name in &names {
            let path = self.path.join(name);
            let meta = fs::metadata(&path)
                .map_err(|e| CacheError::io(format!("reading metadata of {}", path.display()), e))?;
            bytes += meta.len();
        }
        Ok((names.len(), bytes))
    }

    fn remove_stale_tmp_files(&self) -> CacheResult<()> {
        let entries = fs::read_dir(&self.path).map_err(|e| CacheError::StoreOpen {
            path: self.path.clone(),
            source: e,
        })?;

        for entry in entries.flatten() {
            let path = entry.path();
            let is_tmp = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(TMP_SUFFIX));
            if is_tmp {
                match fs::remove_file(&path) {
                    Ok(()) => debug!("Removed interrupted save {}", path.display()),
                    Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
                }
            }
        }
        Ok(())
    }

    fn write_labelled(path: &Path, labels: &Labels, data: &[u8]) -> std::io::Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        for (key, value) in labels.iter() {
            writeln!(writer, "{} {}", key, value)?;
        }
        writer.write_all(&[0])?;
        writer.write_all(data)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    }
}

impl Store for StorageDir {
    fn save_labelled(&self, labels: &Labels, data: &[u8]) -> CacheResult<String> {
        labels.validate()?;

        let stored = self.list_names()?.len();
        if stored >= self.max_files {
            return Err(CacheError::StoreFull {
                path: self.path.clone(),
                max_files: self.max_files,
            });
        }

        let name = Uuid::new_v4().simple().to_string();
        let tmp_path = self.path.join(format!("{}{}", name, TMP_SUFFIX));
        let final_path = self.path.join(&name);

        let written = Self::write_labelled(&tmp_path, labels, data)
            .and_then(|()| fs::rename(&tmp_path, &final_path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(CacheError::Save { name, source: e });
        }

        debug!("Saved blob {} ({} bytes, {})", name, data.len(), labels);
        Ok(name)
    }

    fn list_names(&self) -> CacheResult<Vec<String>> {
        let entries = fs::read_dir(&self.path)
            .map_err(|e| CacheError::io(format!("listing {}", self.path.display()), e))?;

        let mut names = vec![];
        for entry in entries {
            let entry =
                entry.map_err(|e| CacheError::io(format!("listing {}", self.path.display()), e))?;
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') || name.ends_with(TMP_SUFFIX) {
                continue;
            }
            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    fn map_labelled(&self, name: &str) -> CacheResult<(Labels, MappedBlob)> {
        let path = self.path.join(name);
        let file = File::open(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CacheError::BlobNotFound(name.to_string()),
            _ => CacheError::Map {
                name: name.to_string(),
                source: e,
            },
        })?;

        let corrupt = |reason: &str| CacheError::CorruptBlob {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let len = file
            .metadata()
            .map_err(|e| CacheError::Map {
                name: name.to_string(),
                source: e,
            })?
            .len();
        if len == 0 {
            return Err(corrupt("file is empty"));
        }

        // SAFETY: blobs are written once under a temporary name and renamed
        // into place; nothing opens a listed blob for writing afterwards.
        let map = unsafe { Mmap::map(&file) }.map_err(|e| CacheError::Map {
            name: name.to_string(),
            source: e,
        })?;

        let sep = map
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| corrupt("missing label terminator"))?;
        let header =
            std::str::from_utf8(&map[..sep]).map_err(|_| corrupt("labels are not UTF-8"))?;

        let mut labels = Labels::new();
        for line in header.lines().filter(|l| !l.is_empty()) {
            match line.split_once(' ') {
                Some((key, value)) => labels.push(key, value),
                None => labels.push(line, ""),
            }
        }

        Ok((labels, MappedBlob::new(map, sep + 1)))
    }
}
