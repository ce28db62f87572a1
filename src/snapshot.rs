//! The metadata snapshot: everything the decoding collaborator hands
//! over for one file, held immutably for the duration of one report.

use chrono::{DateTime, Local};

use crate::format;

/// One raw tag as supplied by the decoder. Tag names are not unique;
/// duplicates are preserved in supplied order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEntry {
    pub tag: String,
    pub value: String,
}

impl MetadataEntry {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }
}

/// Facts read from the filesystem rather than the image container.
#[derive(Debug, Clone)]
pub struct FileFacts {
    pub size_bytes: u64,
    pub modified: Option<DateTime<Local>>,
}

/// Outcome of a raw tag lookup. A tag can be absent outright, or
/// present with a value that does not parse as the expected shape —
/// the two must stay distinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    NotFound,
    Malformed,
}

/// The decoding collaborator boundary. Implementations parse the image
/// container; the reporting core only ever sees this surface.
pub trait MetadataSource {
    fn mime_type(&self) -> String;
    fn pixel_width(&self) -> u32;
    fn pixel_height(&self) -> u32;
    fn exif_data(&self) -> Vec<MetadataEntry>;
    fn iptc_data(&self) -> Vec<MetadataEntry>;
    fn xmp_data(&self) -> Vec<MetadataEntry>;
    fn comment(&self) -> String;
}

/// One file's metadata, captured once per invocation. The core never
/// mutates it.
#[derive(Debug, Clone, Default)]
pub struct MetadataSnapshot {
    pub file: String,
    pub mime_type: String,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub exif: Vec<MetadataEntry>,
    pub iptc: Vec<MetadataEntry>,
    pub xmp: Vec<MetadataEntry>,
    pub comment: String,
    /// `None` when the file could not be stat'ed.
    pub facts: Option<FileFacts>,
}

impl MetadataSnapshot {
    pub fn from_source(
        file: impl Into<String>,
        source: &dyn MetadataSource,
        facts: Option<FileFacts>,
    ) -> Self {
        Self {
            file: file.into(),
            mime_type: source.mime_type(),
            pixel_width: source.pixel_width(),
            pixel_height: source.pixel_height(),
            exif: source.exif_data(),
            iptc: source.iptc_data(),
            xmp: source.xmp_data(),
            comment: source.comment(),
            facts,
        }
    }

    /// Raw value of the first EXIF entry with the given tag name.
    pub fn exif_value(&self, tag: &str) -> Result<&str, LookupError> {
        self.exif
            .iter()
            .find(|entry| entry.tag == tag)
            .map(|entry| entry.value.as_str())
            .ok_or(LookupError::NotFound)
    }

    /// Numeric components of an EXIF tag value, e.g. a GPS triple.
    /// `Malformed` means the tag exists but yields no numbers.
    pub fn exif_components(&self, tag: &str) -> Result<Vec<f64>, LookupError> {
        let raw = self.exif_value(tag)?;
        let parts = format::components(raw);
        if parts.is_empty() {
            Err(LookupError::Malformed)
        } else {
            Ok(parts)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn snapshot_with_exif(entries: Vec<MetadataEntry>) -> MetadataSnapshot {
        MetadataSnapshot {
            exif: entries,
            ..MetadataSnapshot::default()
        }
    }

    #[test]
    fn exif_value_finds_first_occurrence() {
        let snapshot = snapshot_with_exif(vec![
            MetadataEntry::new("Make", "Huawei"),
            MetadataEntry::new("Make", "Canon"),
        ]);
        assert_eq!(snapshot.exif_value("Make"), Ok("Huawei"));
    }

    #[test]
    fn exif_value_reports_not_found() {
        let snapshot = snapshot_with_exif(vec![MetadataEntry::new("Make", "Huawei")]);
        assert_matches!(snapshot.exif_value("Model"), Err(LookupError::NotFound));
    }

    #[test]
    fn exif_components_distinguishes_malformed_from_missing() {
        let snapshot = snapshot_with_exif(vec![
            MetadataEntry::new("GPSLatitude", "40/1, 26/1, 46/1"),
            MetadataEntry::new("GPSLongitude", "no numbers here"),
        ]);
        assert_eq!(
            snapshot.exif_components("GPSLatitude"),
            Ok(vec![40.0, 26.0, 46.0])
        );
        assert_matches!(
            snapshot.exif_components("GPSLongitude"),
            Err(LookupError::Malformed)
        );
        assert_matches!(
            snapshot.exif_components("GPSAltitude"),
            Err(LookupError::NotFound)
        );
    }

    #[test]
    fn from_source_copies_every_channel() {
        struct Fixed;
        impl MetadataSource for Fixed {
            fn mime_type(&self) -> String {
                "image/jpeg".into()
            }
            fn pixel_width(&self) -> u32 {
                4032
            }
            fn pixel_height(&self) -> u32 {
                3024
            }
            fn exif_data(&self) -> Vec<MetadataEntry> {
                vec![MetadataEntry::new("Make", "Huawei")]
            }
            fn iptc_data(&self) -> Vec<MetadataEntry> {
                Vec::new()
            }
            fn xmp_data(&self) -> Vec<MetadataEntry> {
                Vec::new()
            }
            fn comment(&self) -> String {
                "hello".into()
            }
        }

        let snapshot = MetadataSnapshot::from_source("photo.jpg", &Fixed, None);
        assert_eq!(snapshot.file, "photo.jpg");
        assert_eq!(snapshot.mime_type, "image/jpeg");
        assert_eq!(snapshot.pixel_width, 4032);
        assert_eq!(snapshot.exif.len(), 1);
        assert_eq!(snapshot.comment, "hello");
        assert!(snapshot.facts.is_none());
    }
}
