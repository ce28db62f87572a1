//! Conversions from raw tag values to display values.
//!
//! Everything here is a pure function over strings and numbers; nothing
//! touches the filesystem or the decoder. Malformed input degrades (the
//! raw value is passed through, or a component is dropped) instead of
//! panicking — the decoder's output is not under our control.

use crate::error::GpsError;

/// Rewrites the fixed 19-character EXIF timestamp layout
/// `YYYY:MM:DD HH:MM:SS` as `YYYY-MM-DD HH:MM:SS`.
///
/// Input that is empty, shorter than 19 bytes, or not sliceable at the
/// expected offsets is returned verbatim.
pub fn exif_date(raw: &str) -> String {
    if raw.len() < 19 {
        return raw.to_string();
    }
    match (raw.get(0..4), raw.get(5..7), raw.get(8..10), raw.get(11..19)) {
        (Some(year), Some(month), Some(day), Some(time)) => {
            format!("{year}-{month}-{day} {time}")
        }
        _ => raw.to_string(),
    }
}

/// Formats a byte count with a binary unit, e.g. `"1.5 KB"`.
///
/// Scales through B, KB, MB, GB and caps at TB. Whole bytes print with
/// no decimals, every scaled unit with one.
pub fn file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value > 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let precision = if unit == 0 { 0 } else { 1 };
    format!("{value:.precision$} {}", UNITS[unit])
}

/// Extracts the numeric components of a raw tag value.
///
/// Components are separated by commas and/or whitespace; each one is
/// either a plain decimal or a `num/den` rational (the usual rendering
/// of EXIF rationals). Unparsable tokens are dropped — callers that
/// need a fixed arity check the length of the result.
pub fn components(raw: &str) -> Vec<f64> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(|token| token.trim_matches(|c| matches!(c, '(' | ')' | '[' | ']')))
        .filter(|token| !token.is_empty())
        .filter_map(number)
        .collect()
}

fn number(token: &str) -> Option<f64> {
    match token.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.parse().ok()?;
            let denominator: f64 = denominator.parse().ok()?;
            (denominator != 0.0).then(|| numerator / denominator)
        }
        None => token.parse().ok(),
    }
}

/// Converts two sexagesimal triples plus hemisphere references into
/// signed decimal degrees.
///
/// Fails with [`GpsError::Unavailable`] when either reference is
/// missing, and with [`GpsError::Incomplete`] when either tuple does
/// not have exactly three components. Out-of-range values are accepted
/// as supplied.
pub fn gps_decimal(
    latitude: Option<&[f64]>,
    longitude: Option<&[f64]>,
    latitude_ref: Option<&str>,
    longitude_ref: Option<&str>,
) -> Result<(f64, f64), GpsError> {
    let (lat_ref, lon_ref) = match (latitude_ref, longitude_ref) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => return Err(GpsError::Unavailable),
    };

    let mut lat = sexagesimal(latitude)?;
    let mut lon = sexagesimal(longitude)?;
    if lat_ref == "S" {
        lat = -lat;
    }
    if lon_ref == "W" {
        lon = -lon;
    }
    Ok((lat, lon))
}

fn sexagesimal(tuple: Option<&[f64]>) -> Result<f64, GpsError> {
    match tuple {
        Some(&[degrees, minutes, seconds]) => Ok(degrees + minutes / 60.0 + seconds / 3600.0),
        _ => Err(GpsError::Incomplete),
    }
}

/// Applies the `GPSAltitudeRef` sign convention: `1` (or the spelled-out
/// `Below sea level`) negates the altitude, anything else leaves it as
/// supplied.
pub fn signed_altitude(altitude: f64, reference: Option<&str>) -> f64 {
    match reference.map(str::trim) {
        Some("1") | Some("Below sea level") => -altitude,
        _ => altitude,
    }
}

/// Width over height, undefined when either dimension is zero.
pub fn aspect_ratio(width: u32, height: u32) -> Option<f64> {
    (width > 0 && height > 0).then(|| f64::from(width) / f64::from(height))
}
