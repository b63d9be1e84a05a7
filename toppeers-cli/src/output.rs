//! Persist the peer list, replacing any previous content.

use std::io::Write;
use std::path::Path;

/// Truncate-and-write `contents` to `path`. New files get mode 0644 on Unix.
pub fn write_peer_list(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut opts = std::fs::OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o644);
    }
    let mut file = opts.open(path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()
}
