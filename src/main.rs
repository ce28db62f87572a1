use std::path::Path;
use std::process::ExitCode;

use metascan::render::{JsonRenderer, Render, TextRenderer};
use metascan::{assemble, probe, RunConfig, ScanError};

const USAGE: &str = "\
Usage: metascan [OPTIONS] <file>

Options:
  -e, --exif        Show EXIF metadata only
  -i, --iptc        Show IPTC metadata only
  -x, --xmp         Show XMP metadata only
  -c, --comments    Show embedded comments only
  -g, --gps         Show GPS coordinates only
  -b, --basic       Show basic file information only
  -a, --all         Show everything (default)
  -v, --verbose     Verbose output
  -j, --json        Emit a JSON report
  -h, --help        Show this help
";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }
    // The last argument is always the file; everything before it is a flag.
    let Some((file, flags)) = args.split_last() else {
        eprint!("{USAGE}");
        return ExitCode::FAILURE;
    };

    match run(file, flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("\x1b[1;31merror: {err}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn run(file: &str, flags: &[String]) -> Result<(), ScanError> {
    let config = RunConfig::from_args(flags)?;

    let level = if config.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
    log::debug!("metascan v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("processing {file}");

    let snapshot = probe::scan(Path::new(file))?;
    let report = assemble(&snapshot, config.selection);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let renderer: Box<dyn Render> = if config.json {
        Box::new(JsonRenderer)
    } else {
        Box::new(TextRenderer)
    };
    renderer.render(&report, &mut out)
}
