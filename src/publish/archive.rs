//! Builds compressed module archives for upload

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::Builder;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::publish::error::PublishError;

/// A packaged module archive backed by a temporary file.
///
/// The temporary file is removed when the handle drops, on success and
/// error paths alike.
#[derive(Debug)]
pub struct ModuleArchive {
    file: NamedTempFile,
}

impl ModuleArchive {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Packages a directory tree into a gzip-compressed tarball.
///
/// The tree is walked recursively in deterministic (sorted) order;
/// directory entries are skipped and every regular file is stored under
/// its walked path, root prefix included. Entry names are not rebased, so
/// packaging `./mymodule` yields entries like `./mymodule/main.tf`. A
/// leading `/` is stripped for absolute inputs because tar entry names
/// must be relative.
pub fn package_dir(dir: &Path) -> Result<ModuleArchive, PublishError> {
    let file = NamedTempFile::with_suffix(".module.tar.gz")?;
    debug!("packaging {:?} into {:?}", dir, file.path());

    let encoder = GzEncoder::new(file.as_file().try_clone()?, Compression::default());
    let mut builder = Builder::new(encoder);
    append_dir(&mut builder, dir)?;
    let encoder = builder.into_inner()?;
    encoder.finish()?.flush()?;

    Ok(ModuleArchive { file })
}

fn append_dir<W: Write>(builder: &mut Builder<W>, dir: &Path) -> Result<(), PublishError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            append_dir(builder, &path)?;
        } else {
            let name = entry_name(&path);
            builder.append_path_with_name(&path, name)?;
        }
    }
    Ok(())
}

fn entry_name(path: &Path) -> PathBuf {
    match path.strip_prefix("/") {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}
