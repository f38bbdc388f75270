//! Configuration locations.
//!
//! cwctl keeps its client-side state under a single config directory.
//! See [`ConfigPaths`] for how that directory is discovered.

pub mod paths;

pub use paths::{ConfigPaths, CONFIG_DIR_ENV, CONNECTIONS_FILE};
