//! Copy fallback for when an atomic rename is not possible:
//! - Streams the source into a hidden temp file next to the destination
//!   (create-new, never clobbers), fsyncs it
//! - Copies permissions and sets atime/mtime to the source's modification time
//! - Renames temp -> destination, then deletes the original
//!
//! A failure before the rename removes the temp file. A failure deleting the
//! original is reported as `OrphanSourceAfterCopy`: the copy is complete.

use filetime::{FileTime, set_file_times};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::SystemTime;
use tracing::{debug, trace};

use super::atomic::try_atomic_move;
use super::helpers::transfer_error;
use crate::errors::OrganizeError;
use crate::platform::tmp_sibling_name;

const BUF_SIZE: usize = 1024 * 1024;

/// Copy `src` to `dest` preserving `modified`, then remove `src`.
pub fn move_by_copy(src: &Path, dest: &Path, modified: SystemTime) -> Result<u64, OrganizeError> {
    let bytes = copy_preserving_times(src, dest, modified)?;
    fs::remove_file(src).map_err(|source| OrganizeError::OrphanSourceAfterCopy {
        src: src.to_path_buf(),
        dest: dest.to_path_buf(),
        source,
    })?;
    debug!(src = %src.display(), dest = %dest.display(), bytes, "copied and removed original");
    Ok(bytes)
}

/// Copy `src` to `dest` via a temp sibling; `dest` ends up with mtime = atime = `modified`.
pub fn copy_preserving_times(
    src: &Path,
    dest: &Path,
    modified: SystemTime,
) -> Result<u64, OrganizeError> {
    let tmp = tmp_sibling_name(dest);
    match copy_into_temp(src, &tmp, modified) {
        Ok(bytes) => {
            if let Err(e) = try_atomic_move(&tmp, dest) {
                let _ = fs::remove_file(&tmp);
                return Err(transfer_error("rename temporary copy into place", dest)(e));
            }
            Ok(bytes)
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

fn copy_into_temp(src: &Path, tmp: &Path, modified: SystemTime) -> Result<u64, OrganizeError> {
    let src_f = File::open(src).map_err(transfer_error("open source", src))?;
    let perms = src_f
        .metadata()
        .map_err(transfer_error("stat source", src))?
        .permissions();
    let dst_f = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(tmp)
        .map_err(transfer_error("create temporary copy", tmp))?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer).map_err(transfer_error("copy data", tmp))?;
    writer.flush().map_err(transfer_error("flush copy", tmp))?;
    let dst_f = writer
        .into_inner()
        .map_err(|e| transfer_error("flush copy", tmp)(e.into_error()))?;
    dst_f.sync_all().map_err(transfer_error("fsync copy", tmp))?;
    // Both handles close here, before times are set.
    drop(dst_f);
    drop(reader);

    fs::set_permissions(tmp, perms).map_err(transfer_error("copy permissions", tmp))?;
    let mt = FileTime::from_system_time(modified);
    set_file_times(tmp, mt, mt).map_err(transfer_error("set modification time", tmp))?;
    trace!(tmp = %tmp.display(), bytes, "temporary copy complete");
    Ok(bytes)
}
