//! Command line layer shared by the `lighthouse-scores` and `wave-scores`
//! binaries: argument parsing (`args`) and the startup/teardown flow
//! (`runner`). Fatal errors surface here; the binaries only print them and
//! set the exit status.
pub mod args;
pub mod runner;

pub use args::{LighthouseArgs, WaveArgs};
pub use runner::{run_lighthouse, run_wave};
