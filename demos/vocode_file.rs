//! Example: vocode a voice recording to an output WAV
//!
//! Usage:
//!   cargo run --release --example vocode_file -- <modulator> <output.wav> [num_bands]

use std::env;
use std::process;

use vocode_dsp::{vocode_file, VocoderConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <modulator> <output.wav> [num_bands]", args[0]);
        process::exit(1);
    }

    let mut config = VocoderConfig::default();
    if let Some(bands) = args.get(3) {
        match bands.parse() {
            Ok(n) => config.num_bands = n,
            Err(_) => {
                eprintln!("Invalid band count: {}", bands);
                process::exit(1);
            }
        }
    }

    match vocode_file(&args[1], &args[2], &config) {
        Ok(report) => {
            println!(
                "Vocoded {:.2}s across {} bands in {:.1} ms -> {}",
                report.duration_seconds, report.num_bands, report.processing_time_ms, args[2]
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
