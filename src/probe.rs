//! The production decoding collaborator: sniffs the container with the
//! `image` crate and reads EXIF through `nom-exif`.
//!
//! Everything leaving this module is an opaque string entry; the
//! reporting core never sees decoder types. Decode problems below the
//! "no usable metadata at all" threshold degrade to empty channels.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};
use image::ImageReader;
use nom_exif::{ExifIter, LatLng, MediaParser, MediaSource};

use crate::error::ScanError;
use crate::snapshot::{FileFacts, MetadataEntry, MetadataSnapshot, MetadataSource};

/// Metadata decoded from one image file.
#[derive(Debug)]
pub struct FileProbe {
    mime_type: String,
    width: u32,
    height: u32,
    exif: Vec<MetadataEntry>,
    comment: String,
}

impl FileProbe {
    /// Opens and decodes one file.
    ///
    /// Fatal only when the container format cannot be recognized at all
    /// or the file yields neither dimensions nor EXIF data; anything
    /// softer degrades and is logged.
    pub fn open(path: &Path) -> Result<Self, ScanError> {
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let Some(format) = reader.format() else {
            return Err(ScanError::UnrecognizedMimeType {
                path: path.to_path_buf(),
            });
        };
        let mime_type = format.to_mime_type().to_string();

        let exif = exif_entries(path);
        let (width, height) = match reader.into_dimensions() {
            Ok(dimensions) => dimensions,
            Err(err) if exif.is_empty() => {
                return Err(ScanError::UnsupportedFormat {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                });
            }
            Err(err) => {
                log::debug!("cannot read dimensions of {}: {err}", path.display());
                (0, 0)
            }
        };

        let comment = exif
            .iter()
            .find(|entry| entry.tag == "UserComment")
            .map(|entry| entry.value.clone())
            .unwrap_or_default();

        Ok(Self {
            mime_type,
            width,
            height,
            exif,
            comment,
        })
    }
}

impl MetadataSource for FileProbe {
    fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    fn pixel_width(&self) -> u32 {
        self.width
    }

    fn pixel_height(&self) -> u32 {
        self.height
    }

    fn exif_data(&self) -> Vec<MetadataEntry> {
        self.exif.clone()
    }

    // The EXIF decoder exposes neither IPTC nor XMP; these channels
    // read as "checked, nothing found" until a richer backend fills
    // them.
    fn iptc_data(&self) -> Vec<MetadataEntry> {
        Vec::new()
    }

    fn xmp_data(&self) -> Vec<MetadataEntry> {
        Vec::new()
    }

    fn comment(&self) -> String {
        self.comment.clone()
    }
}

/// Probes one file and captures its snapshot, including file facts.
pub fn scan(path: &Path) -> Result<MetadataSnapshot, ScanError> {
    let probe = FileProbe::open(path)?;
    let facts = file_facts(path);
    Ok(MetadataSnapshot::from_source(
        path.display().to_string(),
        &probe,
        facts,
    ))
}

/// Stat-level facts; failure degrades to `None` rather than aborting.
pub fn file_facts(path: &Path) -> Option<FileFacts> {
    match fs::metadata(path) {
        Ok(meta) => Some(FileFacts {
            size_bytes: meta.len(),
            modified: meta.modified().ok().map(DateTime::<Local>::from),
        }),
        Err(err) => {
            log::warn!("cannot stat {}: {err}", path.display());
            None
        }
    }
}

fn exif_entries(path: &Path) -> Vec<MetadataEntry> {
    let mut parser = MediaParser::new();
    let source = match MediaSource::file_path(path) {
        Ok(source) => source,
        Err(err) => {
            log::debug!("cannot open {} for EXIF: {err}", path.display());
            return Vec::new();
        }
    };

    let iter: ExifIter = match parser.parse(source) {
        Ok(iter) => iter,
        Err(err) => {
            log::debug!("no EXIF data in {}: {err}", path.display());
            return Vec::new();
        }
    };

    // GPS is re-parsed up front: the iterator gets consumed below, and
    // some containers only surface the GPS IFD through this path.
    let gps = iter.parse_gps_info().ok().flatten();

    let mut entries = Vec::new();
    for mut entry in iter {
        let Some(value) = entry.take_value() else {
            continue;
        };
        let tag = match entry.tag() {
            Some(tag) => format!("{tag:?}"),
            None => format!("0x{:04x}", entry.tag_code()),
        };
        entries.push(MetadataEntry::new(tag, clean_value(&value.to_string())));
    }

    if let Some(gps) = gps {
        if !entries.iter().any(|entry| entry.tag == "GPSLatitude") {
            entries.push(MetadataEntry::new(
                "GPSLatitudeRef",
                gps.latitude_ref.to_string(),
            ));
            entries.push(MetadataEntry::new("GPSLatitude", rationals(&gps.latitude)));
            entries.push(MetadataEntry::new(
                "GPSLongitudeRef",
                gps.longitude_ref.to_string(),
            ));
            entries.push(MetadataEntry::new(
                "GPSLongitude",
                rationals(&gps.longitude),
            ));
        }
    }

    entries
}

fn clean_value(raw: &str) -> String {
    raw.trim().trim_matches('"').to_string()
}

fn rationals(latlng: &LatLng) -> String {
    format!(
        "{}/{}, {}/{}, {}/{}",
        latlng.0 .0, latlng.0 .1, latlng.1 .0, latlng.1 .1, latlng.2 .0, latlng.2 .1
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    fn temp_png() -> tempfile::TempPath {
        let file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .expect("create temp file");
        let path = file.into_temp_path();
        image::RgbaImage::new(2, 1)
            .save(&path)
            .expect("write png");
        path
    }

    #[test]
    fn probes_a_plain_png() {
        let path = temp_png();
        let snapshot = scan(&path).unwrap();

        assert_eq!(snapshot.mime_type, "image/png");
        assert_eq!(snapshot.pixel_width, 2);
        assert_eq!(snapshot.pixel_height, 1);
        // No EXIF chunk in a bare PNG; the channel reads as empty.
        assert!(snapshot.exif.is_empty());
        assert!(snapshot.comment.is_empty());
        let facts = snapshot.facts.expect("stat succeeds");
        assert!(facts.size_bytes > 0);
    }

    #[test]
    fn rejects_unrecognizable_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not an image").unwrap();
        let result = FileProbe::open(file.path());
        assert_matches!(result, Err(ScanError::UnrecognizedMimeType { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = FileProbe::open(Path::new("no/such/file.jpg"));
        assert_matches!(result, Err(ScanError::Io(_)));
    }

    #[test]
    fn file_facts_none_for_missing_file() {
        assert!(file_facts(Path::new("no/such/file.jpg")).is_none());
    }
}
