//! Finds fixed-size teams whose member names together cover as many letters
//! of the alphabet as possible.
//!
//! Raw names are normalized to lowercase letters and reduced to bitmasks,
//! candidates are ranked so rare letters come first, and a branch-and-bound
//! search enumerates every team of the requested size, pruning with a
//! precomputed suffix coverage table. All teams tying the best coverage are
//! reported, along with the letters each one is missing.

pub mod bitmask;
pub mod error;
pub mod roster;
pub mod scoring;
pub mod search;

pub use bitmask::{CanRepresentLetterBitmask, LetterBitmask, ALPHABET_MASK};
pub use error::RosterError;
pub use roster::{normalize, Candidate, CandidatePtr, Roster, DEFAULT_ROSTER};
pub use search::{SearchOutcome, SearchStats, Team, TeamFinder, Verbosity};
