//! Filesystem helpers.
//!
//! The only consumer today is first-run layout seeding: a bundled
//! directory of default `.layout` files is copied into the user's layout
//! directory before the manager opens it.

use std::fs;
use std::io;
use std::path::Path;

/// Recursively copy the contents of `src` into `dst`.
///
/// `dst` and any missing intermediate directories are created. Existing
/// files in `dst` are overwritten.
pub fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }

    Ok(())
}
