//! voxview
//!
//! Headless asset viewer: classifies an asset by name, starts the matching
//! render session and drives its frame loop.

use clap::Parser;
use std::time::Duration;
use voxview_app::constants::{DEFAULT_SERVER_URL, DEFAULT_SNIFF_TIMEOUT};
use voxview_app::{AppBuilder, LoggingConfig, ServerConfig};

/// voxview - classify and view voxel, mesh and scene assets
#[derive(Parser, Debug)]
#[command(name = "voxview")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Asset file name, e.g. `scene.json` or `model.pb`
    name: String,

    /// Asset server base URL
    #[arg(short, long, default_value = DEFAULT_SERVER_URL)]
    server: String,

    /// Container fetch timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_SNIFF_TIMEOUT.as_millis() as u64)]
    timeout_ms: u64,

    /// Stop after this many frames (runs until Ctrl-C when omitted)
    #[arg(short, long)]
    frames: Option<u64>,

    /// Orbit the camera by this many pixels per frame
    #[arg(long)]
    spin: Option<f32>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Enable the Tracy profiler layer (needs the `tracy` feature)
    #[arg(long)]
    tracy: bool,

    /// Only classify the asset
    #[arg(long)]
    classify_only: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let app = AppBuilder::new()
        .with_server(
            ServerConfig::new(&args.server)
                .with_sniff_timeout(Duration::from_millis(args.timeout_ms)),
        )
        .with_logging(LoggingConfig {
            level: args.log_level.clone(),
            enable_tracy: args.tracy,
        })
        .with_frame_limit(args.frames)
        .with_spin(args.spin);

    let printed = if args.classify_only {
        app.run_classify(&args.name).and_then(|classification| {
            if args.json {
                Ok(serde_json::to_string_pretty(&classification)?)
            } else {
                Ok(format!("{}: {}", classification.name, classification.category))
            }
        })
    } else {
        app.run(&args.name).and_then(|report| {
            if args.json {
                Ok(serde_json::to_string_pretty(&report)?)
            } else {
                Ok(format!(
                    "{}: {} ({:?}, {} frames driven)",
                    report.name, report.category, report.status, report.host_frames
                ))
            }
        })
    };

    match printed {
        Ok(line) => println!("{line}"),
        Err(e) => {
            eprintln!("voxview error: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_library_constants() {
        let args = Args::try_parse_from(["voxview", "model.pb"]).unwrap();
        assert_eq!(args.server, DEFAULT_SERVER_URL);
        assert_eq!(
            Duration::from_millis(args.timeout_ms),
            DEFAULT_SNIFF_TIMEOUT
        );
    }

    #[test]
    fn test_timeout_override() {
        let args = Args::try_parse_from(["voxview", "model.pb", "--timeout-ms", "250"]).unwrap();
        assert_eq!(args.timeout_ms, 250);
    }
}
