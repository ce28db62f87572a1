//! # metascan
//!
//! Image metadata reporting: normalizes EXIF/IPTC/XMP tags, GPS
//! coordinates and basic file facts into a structured report, rendered
//! either as human-readable text or as a JSON document.
//!
//! Container decoding is delegated to a collaborator behind the
//! [`MetadataSource`] trait (the bundled [`probe::FileProbe`] uses
//! `nom-exif` and the `image` crate). The core of this crate is what
//! happens *after* decoding: category selection, value normalization
//! and deterministic report assembly.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use metascan::render::{Render, TextRenderer};
//! use metascan::{assemble, probe, ScanError, Selection};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ScanError> {
//!     let snapshot = probe::scan(Path::new("photo.jpg"))?;
//!     let report = assemble(&snapshot, Selection::all());
//!     TextRenderer.render(&report, &mut std::io::stdout().lock())?;
//!     Ok(())
//! }
//! ```
//!
//! Narrowing the report to one category and switching to JSON output
//! both go through the token fold:
//!
//! ```
//! use metascan::RunConfig;
//!
//! let config = RunConfig::from_args(&["--gps", "--json"]).unwrap();
//! assert!(config.json);
//! assert!(config.selection.gps && !config.selection.exif);
//!
//! // The last exclusive flag wins outright.
//! let config = RunConfig::from_args(&["--exif", "--iptc"]).unwrap();
//! assert!(config.selection.iptc && !config.selection.exif);
//! ```

// Public API
mod error;
mod report;
mod select;
mod snapshot;

pub use error::{GpsError, ScanError};
pub use report::{assemble, BasicInfo, FileStat, GpsInfo, Report};
pub use select::{Category, RunConfig, Selection, Token};
pub use snapshot::{FileFacts, LookupError, MetadataEntry, MetadataSnapshot, MetadataSource};

pub mod format;
pub mod probe;
pub mod render;
