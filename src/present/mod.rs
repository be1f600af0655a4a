//! User-facing presentation of scan results.
//!
//! Rendering is left to the UI; this module only decides which of the four
//! visual states applies and what text goes with it.

mod verdict;

pub use verdict::{Verdict, VerdictKind, SAFETY_TIP};
