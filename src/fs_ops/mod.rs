//! Filesystem operations for relocating one file.

mod atomic;
pub mod collision;
mod copy;
mod helpers;
mod relocate;

pub use atomic::try_atomic_move;
pub use collision::{occupied_on_disk, uniquify};
pub use copy::{copy_preserving_times, move_by_copy};
pub use helpers::{io_error, is_cross_device, transfer_error};
pub use relocate::{RenameFn, Relocator};
