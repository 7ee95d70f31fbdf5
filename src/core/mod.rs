//! Core building blocks with no browser or process I/O: URL list parsing,
//! score normalization, and run parameters. Consumed by `io` and `api`.
pub mod input;
pub mod params;
pub mod score;
