//! On-disk layout store.
//!
//! One binary file per named layout plus one index file recording the
//! known layouts and which one is current. Files carry an explicit
//! schema version so a future format change fails loudly instead of
//! decoding garbage.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::snapshot::{Layout, ManagerIndex, SCHEMA_VERSION};

/// Extension used by per-layout files.
const LAYOUT_EXT: &str = "layout";

/// Name of the manager index file.
const INDEX_FILE: &str = "manager.index";

/// Errors from the layout store.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Encode(bincode::Error),
    Decode(bincode::Error),
    /// No file exists for the requested layout name.
    UnknownLayout(String),
    /// The file was written by an incompatible schema.
    Version { found: u32, expected: u32 },
    /// The file decoded but violates the snapshot shape invariants.
    Malformed(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "layout store io error: {err}"),
            StoreError::Encode(err) => write!(f, "failed to encode layout: {err}"),
            StoreError::Decode(err) => write!(f, "failed to decode layout: {err}"),
            StoreError::UnknownLayout(name) => write!(f, "no layout named '{name}'"),
            StoreError::Version { found, expected } => {
                write!(f, "layout schema version {found}, expected {expected}")
            }
            StoreError::Malformed(reason) => write!(f, "malformed layout file: {reason}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Encode(err) | StoreError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

#[derive(Serialize, Deserialize)]
struct LayoutFile {
    version: u32,
    layout: Layout,
}

#[derive(Serialize, Deserialize)]
struct IndexFile {
    version: u32,
    index: ManagerIndex,
}

/// Directory-backed store of named layouts.
pub struct LayoutStore {
    root: PathBuf,
}

impl LayoutStore {
    /// Open (creating if necessary) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn layout_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{LAYOUT_EXT}"))
    }

    fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    /// Seed the store from a defaults directory if it holds no layouts
    /// yet. Returns whether seeding happened.
    pub fn seed_from(&self, defaults: &Path) -> Result<bool, StoreError> {
        if !self.scan_layouts()?.is_empty() {
            return Ok(false);
        }
        fenestra_core::fs::copy_dir_all(defaults, &self.root)?;
        debug!(src = %defaults.display(), dst = %self.root.display(), "seeded default layouts");
        Ok(true)
    }

    pub fn save_layout(&self, layout: &Layout) -> Result<(), StoreError> {
        let bytes = bincode::serialize(&LayoutFile {
            version: SCHEMA_VERSION,
            layout: layout.clone(),
        })
        .map_err(StoreError::Encode)?;
        fs::write(self.layout_path(&layout.name), bytes)?;
        debug!(name = %layout.name, windows = layout.windows.len(), "saved layout");
        Ok(())
    }

    pub fn load_layout(&self, name: &str) -> Result<Layout, StoreError> {
        let bytes = match fs::read(self.layout_path(name)) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::UnknownLayout(name.to_owned()));
            }
            Err(err) => return Err(err.into()),
        };

        let file: LayoutFile = bincode::deserialize(&bytes).map_err(StoreError::Decode)?;
        if file.version != SCHEMA_VERSION {
            return Err(StoreError::Version {
                found: file.version,
                expected: SCHEMA_VERSION,
            });
        }
        if !file.layout.is_well_formed() {
            return Err(StoreError::Malformed(
                "split with child count other than 0 or 2".into(),
            ));
        }
        Ok(file.layout)
    }

    /// Delete a layout file. Missing files are tolerated; the index is
    /// the source of truth for which layouts exist.
    pub fn remove_layout(&self, name: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.layout_path(name)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save_index(&self, index: &ManagerIndex) -> Result<(), StoreError> {
        let bytes = bincode::serialize(&IndexFile {
            version: SCHEMA_VERSION,
            index: index.clone(),
        })
        .map_err(StoreError::Encode)?;
        fs::write(self.index_path(), bytes)?;
        Ok(())
    }

    /// Load the index, or `None` on a first run.
    pub fn load_index(&self) -> Result<Option<ManagerIndex>, StoreError> {
        let bytes = match fs::read(self.index_path()) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let file: IndexFile = bincode::deserialize(&bytes).map_err(StoreError::Decode)?;
        if file.version != SCHEMA_VERSION {
            return Err(StoreError::Version {
                found: file.version,
                expected: SCHEMA_VERSION,
            });
        }
        Ok(Some(file.index))
    }

    /// Names of every `.layout` file on disk, for index recovery.
    pub fn scan_layouts(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(LAYOUT_EXT)
                && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
