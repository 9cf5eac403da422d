use std::fs::{self, File, Permissions};
use std::io;
use std::path::Path;

/// Read the permission bits of a file. The handle is closed before returning.
pub fn read_permissions(path: &Path) -> io::Result<Permissions> {
    let file = File::open(path)?;
    let metadata = file.metadata()?;
    Ok(metadata.permissions())
}

/// Overwrite `path` with `content` in a single write and reapply `permissions`.
pub fn write_with_permissions(
    path: &Path,
    content: &[u8],
    permissions: Permissions,
) -> io::Result<()> {
    fs::write(path, content)?;
    fs::set_permissions(path, permissions)
}
