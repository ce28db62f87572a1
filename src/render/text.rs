use std::io::Write;

use crate::error::ScanError;
use crate::report::{FileStat, GpsInfo, Report};
use crate::select::Category;
use crate::snapshot::MetadataEntry;

use super::Render;

// Tag name column width; longer names are clipped.
const NAME_WIDTH: usize = 35;
const BANNER_WIDTH: usize = 60;

const CYAN: &str = "\x1b[1;36m";
const BLUE: &str = "\x1b[1;34m";
const GREEN: &str = "\x1b[1;32m";
const RESET: &str = "\x1b[0m";

/// Human-readable ANSI report. Present sections get a `✓` header,
/// requested-but-empty sections a `✗` line, unrequested sections
/// nothing at all.
pub struct TextRenderer;

impl Render for TextRenderer {
    fn render(&self, report: &Report, out: &mut dyn Write) -> Result<(), ScanError> {
        let banner = "=".repeat(BANNER_WIDTH);
        writeln!(out)?;
        writeln!(out, "{CYAN}{banner}{RESET}")?;
        writeln!(
            out,
            "{CYAN}  IMAGE METADATA REPORT v{}{RESET}",
            env!("CARGO_PKG_VERSION")
        )?;
        writeln!(out, "{CYAN}{banner}{RESET}")?;

        if report.selection.basic {
            basic(report, out)?;
        }
        if let Some(gps) = &report.gps {
            gps_section(gps, out)?;
        }

        let selection = &report.selection;
        if selection.exif || selection.iptc || selection.xmp || selection.comments {
            writeln!(out)?;
            writeln!(out, "{BLUE}[Metadata]{RESET}")?;
            if let Some(entries) = &report.exif {
                tags(Category::Exif, entries, out)?;
            }
            if let Some(entries) = &report.iptc {
                tags(Category::Iptc, entries, out)?;
            }
            if let Some(entries) = &report.xmp {
                tags(Category::Xmp, entries, out)?;
            }
            if let Some(comment) = &report.comment {
                writeln!(out, "  ✓ Comments:")?;
                writeln!(out, "    {comment}")?;
            }
        }

        writeln!(out)?;
        writeln!(out, "{CYAN}{banner}{RESET}")?;
        writeln!(out, "{GREEN}Analysis completed successfully{RESET}")?;
        writeln!(out, "{CYAN}{banner}{RESET}")?;
        Ok(())
    }
}

fn basic(report: &Report, out: &mut dyn Write) -> Result<(), ScanError> {
    let info = &report.basic;
    writeln!(out)?;
    writeln!(out, "{BLUE}[Image Information]{RESET}")?;
    writeln!(out, "  File: {}", report.file)?;
    writeln!(out, "  Format: {}", info.mime_type)?;
    if let Some((width, height)) = info.dimensions {
        writeln!(out, "  Dimensions: {width} × {height} pixels")?;
    }
    if let Some(ratio) = info.aspect_ratio {
        writeln!(out, "  Aspect ratio: {ratio:.2}:1")?;
    }
    match &info.stat {
        FileStat::Known { size, modified } => {
            writeln!(out, "  File size: {size}")?;
            if let Some(modified) = modified {
                writeln!(out, "  Last modified: {modified}")?;
            }
        }
        FileStat::Unavailable => writeln!(out, "  File size: unavailable")?,
    }
    Ok(())
}

fn gps_section(gps: &GpsInfo, out: &mut dyn Write) -> Result<(), ScanError> {
    writeln!(out)?;
    writeln!(out, "{BLUE}[GPS Coordinates]{RESET}")?;
    match gps {
        GpsInfo::Located {
            latitude,
            longitude,
            altitude,
            area,
        } => {
            writeln!(out, "  Location: {latitude:.6}, {longitude:.6}")?;
            if let Some(area) = area {
                writeln!(out, "  Area: {area}")?;
            }
            if let Some(altitude) = altitude {
                writeln!(out, "  Altitude: {altitude:.2} meters")?;
            }
        }
        GpsInfo::Missing(reason) => writeln!(out, "  Location: {reason}")?,
    }
    Ok(())
}

fn tags(
    category: Category,
    entries: &[MetadataEntry],
    out: &mut dyn Write,
) -> Result<(), ScanError> {
    if entries.is_empty() {
        writeln!(out, "  ✗ {}: no data found", category.title())?;
        return Ok(());
    }
    writeln!(out, "  ✓ {}:", category.title())?;
    for entry in entries {
        writeln!(out, "    • {} : {}", pad_name(&entry.tag), entry.value)?;
    }
    Ok(())
}

fn pad_name(name: &str) -> String {
    let clipped: String = name.chars().take(NAME_WIDTH).collect();
    format!("{clipped:<width$}", width = NAME_WIDTH)
}
