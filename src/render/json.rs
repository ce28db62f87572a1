use std::io::Write;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::ScanError;
use crate::report::{GpsInfo, Report};
use crate::snapshot::MetadataEntry;

use super::Render;

/// Machine-readable report: one JSON object, fixed key order, keys for
/// unrequested or absent categories omitted entirely.
pub struct JsonRenderer;

// Field order here is the output key order.
#[derive(serde::Serialize)]
struct JsonReport<'a> {
    file: &'a str,
    mime_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exif: Option<TagObject<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gps: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
    status: &'static str,
}

/// Serializes entries as a JSON object in supplied order.
struct TagObject<'a>(&'a [MetadataEntry]);

impl Serialize for TagObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.tag, &entry.value)?;
        }
        map.end()
    }
}

impl Render for JsonRenderer {
    fn render(&self, report: &Report, out: &mut dyn Write) -> Result<(), ScanError> {
        let doc = JsonReport {
            file: &report.file,
            mime_type: &report.basic.mime_type,
            width: report.basic.dimensions.map(|(w, _)| w),
            height: report.basic.dimensions.map(|(_, h)| h),
            exif: report
                .exif
                .as_deref()
                .filter(|entries| !entries.is_empty())
                .map(TagObject),
            gps: match &report.gps {
                Some(GpsInfo::Located {
                    latitude,
                    longitude,
                    ..
                }) => Some(format!("{latitude:.6}, {longitude:.6}")),
                _ => None,
            },
            comment: report.comment.as_deref(),
            status: "ok",
        };
        serde_json::to_writer_pretty(&mut *out, &doc)?;
        writeln!(out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::assemble;
    use crate::select::{Category, Selection};
    use crate::snapshot::{MetadataEntry, MetadataSnapshot};

    fn render_to_string(report: &Report) -> String {
        let mut out = Vec::new();
        JsonRenderer.render(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn snapshot() -> MetadataSnapshot {
        MetadataSnapshot {
            file: "photo.jpg".into(),
            mime_type: "image/jpeg".into(),
            pixel_width: 4032,
            pixel_height: 3024,
            ..MetadataSnapshot::default()
        }
    }

    #[test]
    fn full_document_has_fixed_key_order() {
        let mut snap = snapshot();
        snap.exif = vec![
            MetadataEntry::new("Make", "Huawei"),
            MetadataEntry::new("GPSLatitudeRef", "N"),
            MetadataEntry::new("GPSLatitude", "40/1, 26/1, 46/1"),
            MetadataEntry::new("GPSLongitudeRef", "W"),
            MetadataEntry::new("GPSLongitude", "79/1, 58/1, 56/1"),
        ];
        snap.comment = "hello".into();
        let report = assemble(&snap, Selection::all());

        let expected = r#"{
  "file": "photo.jpg",
  "mime_type": "image/jpeg",
  "width": 4032,
  "height": 3024,
  "exif": {
    "Make": "Huawei",
    "GPSLatitudeRef": "N",
    "GPSLatitude": "40/1, 26/1, 46/1",
    "GPSLongitudeRef": "W",
    "GPSLongitude": "79/1, 58/1, 56/1"
  },
  "gps": "40.446111, -79.982222",
  "comment": "hello",
  "status": "ok"
}
"#;
        assert_eq!(render_to_string(&report), expected);
    }

    #[test]
    fn empty_exif_is_omitted_not_marked() {
        let report = assemble(&snapshot(), Selection::all());
        let json = render_to_string(&report);
        assert!(!json.contains("\"exif\""));
        assert!(!json.contains("\"gps\""));
        assert!(!json.contains("\"comment\""));
        assert!(json.contains("\"status\": \"ok\""));
    }

    #[test]
    fn failed_gps_derivation_omits_the_key() {
        let mut snap = snapshot();
        // Reference tags missing: derivation fails, key omitted.
        snap.exif = vec![MetadataEntry::new("GPSLatitude", "40/1, 26/1, 46/1")];
        let report = assemble(&snap, Selection::all());
        assert!(!render_to_string(&report).contains("\"gps\""));
    }

    #[test]
    fn unrequested_exif_is_omitted_even_when_present() {
        let mut snap = snapshot();
        snap.exif = vec![MetadataEntry::new("Make", "Huawei")];
        let report = assemble(&snap, Selection::only(Category::Basic));
        let json = render_to_string(&report);
        assert!(!json.contains("\"exif\""));
        // file and mime_type are unconditional.
        assert!(json.contains("\"file\": \"photo.jpg\""));
        assert!(json.contains("\"mime_type\": \"image/jpeg\""));
    }

    #[test]
    fn zero_dimensions_omit_width_and_height() {
        let mut snap = snapshot();
        snap.pixel_width = 0;
        let report = assemble(&snap, Selection::all());
        let json = render_to_string(&report);
        assert!(!json.contains("\"width\""));
        assert!(!json.contains("\"height\""));
    }

    #[test]
    fn duplicate_tags_are_preserved_in_order() {
        let mut snap = snapshot();
        snap.exif = vec![
            MetadataEntry::new("Make", "Huawei"),
            MetadataEntry::new("Make", "Canon"),
        ];
        let report = assemble(&snap, Selection::all());
        let json = render_to_string(&report);
        let first = json.find("\"Make\": \"Huawei\"").unwrap();
        let second = json.find("\"Make\": \"Canon\"").unwrap();
        assert!(first < second);
    }
}
