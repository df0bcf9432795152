// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Replace `path` with `contents` in one step: write a sibling temp file,
/// flush it to disk, then rename it over the target.
/// Readers never see a half-written file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let persist = |source| Error::Persist { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let tmp = tmp_path_for(path);
    let file = File::create(&tmp).map_err(persist)?; // truncate/overwrite
    let mut out = BufWriter::new(file);
    out.write_all(contents).map_err(persist)?;
    out.flush().map_err(persist)?;
    out.get_ref().sync_all().map_err(persist)?;
    drop(out);

    fs::rename(&tmp, path).map_err(persist)
}

/// `law_firms_data.json` → `.law_firms_data.json.tmp`, same directory.
pub fn tmp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| s!("out"));
    path.with_file_name(join!(".", &name, ".tmp"))
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::Persist {
            path: dir.to_path_buf(),
            source: std::io::Error::other("path exists but is not a directory"),
        });
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| Error::Persist { path: dir.to_path_buf(), source })?;
    }
    Ok(())
}
