use std::path::PathBuf;

use thiserror::Error;

/// Failures at the roster-loading boundary. The search itself cannot fail:
/// an unsatisfiable team size degrades to an empty result set.
#[derive(Error, Debug)]
pub enum RosterError {
    /// Roster file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Roster file contained no usable names.
    #[error("no candidate names found in {}", .path.display())]
    Empty { path: PathBuf },
}
