//! Child-process plumbing.
//!
//! Includes:
//! - `probe`: looks up executables on the search path.
//! - `interrupt`: routes Ctrl-C either to the running child or to session exit.
//! - `runner`: runs an assembled command with inherited stdio.

mod interrupt;
mod probe;
mod runner;

pub use interrupt::*;
pub use probe::*;
pub use runner::*;
