//! Output of particle state to disk.

pub mod snapshot;

pub use snapshot::{snapshot_path, write_time_step_to_file};
