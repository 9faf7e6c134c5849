//! Plain-text particle snapshots, one file per written step.

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::Particle;
use crate::error::{MpmError, Result};

pub const SNAPSHOT_HEADER: &str = "x, y, z, velocity magnitude";

/// `<base>.csv.<step>`
pub fn snapshot_path(base: &Path, step: usize) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(format!(".csv.{step}"));
    PathBuf::from(name)
}

fn write_rows(path: &Path, particles: &[Particle]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{SNAPSHOT_HEADER}")?;
    for p in particles {
        writeln!(
            out,
            "{}, {}, {}, {}",
            p.position.x,
            p.position.y,
            p.position.z,
            p.speed()
        )?;
    }
    out.flush()
}

/// Write particle positions and speeds for `step`, returning the file path.
pub fn write_time_step_to_file(base: &Path, step: usize, particles: &[Particle]) -> Result<PathBuf> {
    let path = snapshot_path(base, step);
    write_rows(&path, particles).map_err(|source| MpmError::Snapshot {
        path: path.clone(),
        source,
    })?;
    log::debug!("wrote {} particles to {}", particles.len(), path.display());
    Ok(path)
}
