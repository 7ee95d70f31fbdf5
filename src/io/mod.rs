//! I/O layer: the Chrome session, the two audit mechanisms (Lighthouse
//! subprocess and WAVE sidebar scraping), extension path resolution, and
//! the CSV emitter.
pub mod browser;
pub use browser::BrowserSession;

pub mod csv;
pub use csv::CsvEmitter;

pub mod extension;
pub mod lighthouse;
pub mod wave;
