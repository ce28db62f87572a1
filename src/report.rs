//! Report assembly: projects one snapshot plus one selection into the
//! renderer-agnostic report tree.
//!
//! Sections the user did not request are `None` and never rendered.
//! Requested sections always materialize, so "checked, nothing found"
//! and "derivation failed, here is why" stay observable in the output.

use crate::error::GpsError;
use crate::format;
use crate::select::Selection;
use crate::snapshot::{MetadataEntry, MetadataSnapshot};

/// File-level facts for the basic section. Stat failure degrades to an
/// explicit marker instead of dropping the section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStat {
    Known {
        size: String,
        modified: Option<String>,
    },
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasicInfo {
    pub mime_type: String,
    pub dimensions: Option<(u32, u32)>,
    pub aspect_ratio: Option<f64>,
    pub stat: FileStat,
}

/// The GPS section: either derived coordinates or the specific reason
/// they could not be derived. Never silently omitted when requested.
#[derive(Debug, Clone, PartialEq)]
pub enum GpsInfo {
    Located {
        latitude: f64,
        longitude: f64,
        altitude: Option<f64>,
        area: Option<String>,
    },
    Missing(GpsError),
}

/// The assembled report tree. Read-only; consumed by exactly one
/// renderer per invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub file: String,
    pub selection: Selection,
    /// Always computed; `selection.basic` gates display only.
    pub basic: BasicInfo,
    pub gps: Option<GpsInfo>,
    /// `Some` when requested; an empty list means "checked, nothing found".
    pub exif: Option<Vec<MetadataEntry>>,
    pub iptc: Option<Vec<MetadataEntry>>,
    pub xmp: Option<Vec<MetadataEntry>>,
    /// `Some` only when requested and the decoder supplied a comment.
    pub comment: Option<String>,
}

/// Builds the report tree for one snapshot.
pub fn assemble(snapshot: &MetadataSnapshot, selection: Selection) -> Report {
    Report {
        file: snapshot.file.clone(),
        selection,
        basic: basic_info(snapshot),
        gps: selection.gps.then(|| gps_info(snapshot)),
        exif: selection.exif.then(|| exif_entries(snapshot)),
        iptc: selection.iptc.then(|| snapshot.iptc.clone()),
        xmp: selection.xmp.then(|| snapshot.xmp.clone()),
        comment: (selection.comments && !snapshot.comment.is_empty())
            .then(|| snapshot.comment.clone()),
    }
}

fn basic_info(snapshot: &MetadataSnapshot) -> BasicInfo {
    let (width, height) = (snapshot.pixel_width, snapshot.pixel_height);
    BasicInfo {
        mime_type: snapshot.mime_type.clone(),
        dimensions: (width > 0 && height > 0).then_some((width, height)),
        aspect_ratio: format::aspect_ratio(width, height),
        stat: match &snapshot.facts {
            Some(facts) => FileStat::Known {
                size: format::file_size(facts.size_bytes),
                modified: facts
                    .modified
                    .map(|m| m.format("%Y-%m-%d %H:%M:%S").to_string()),
            },
            None => FileStat::Unavailable,
        },
    }
}

fn gps_info(snapshot: &MetadataSnapshot) -> GpsInfo {
    let lat_ref = snapshot.exif_value("GPSLatitudeRef").ok();
    let lon_ref = snapshot.exif_value("GPSLongitudeRef").ok();
    let lat = snapshot.exif_components("GPSLatitude").ok();
    let lon = snapshot.exif_components("GPSLongitude").ok();

    match format::gps_decimal(lat.as_deref(), lon.as_deref(), lat_ref, lon_ref) {
        Ok((latitude, longitude)) => GpsInfo::Located {
            latitude,
            longitude,
            altitude: altitude(snapshot),
            area: snapshot
                .exif_value("GPSAreaInformation")
                .ok()
                .map(str::to_string),
        },
        Err(reason) => GpsInfo::Missing(reason),
    }
}

fn altitude(snapshot: &MetadataSnapshot) -> Option<f64> {
    let raw = snapshot.exif_components("GPSAltitude").ok()?;
    let value = *raw.first()?;
    let reference = snapshot.exif_value("GPSAltitudeRef").ok();
    Some(format::signed_altitude(value, reference))
}

fn exif_entries(snapshot: &MetadataSnapshot) -> Vec<MetadataEntry> {
    snapshot
        .exif
        .iter()
        .map(|entry| {
            if entry.tag == "DateTime" || entry.tag == "DateTimeOriginal" {
                MetadataEntry::new(entry.tag.clone(), format::exif_date(&entry.value))
            } else {
                entry.clone()
            }
        })
        .collect()
}
