//! Command-line interface for season_scan
//!
//! Validates the lighting of an image and, given a palette name, runs the
//! garment color check. Prints JSON payloads matching the service boundary.

use season_scan::{check_garment, validate_lighting, PaletteSet};
use std::{env, path::PathBuf, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut image_path_arg = None;
    let mut palette_arg = None;
    let mut palette_file = None;
    let mut threshold = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--palette" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --palette requires a season name");
                    process::exit(1);
                }
                palette_arg = Some(args[i].clone());
            }
            "--palette-file" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --palette-file requires a path");
                    process::exit(1);
                }
                palette_file = Some(PathBuf::from(&args[i]));
            }
            "--threshold" => {
                i += 1;
                let parsed = args.get(i).and_then(|v| v.parse::<f32>().ok());
                match parsed {
                    Some(v) => threshold = Some(v),
                    None => {
                        eprintln!("Error: --threshold requires a number");
                        process::exit(1);
                    }
                }
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image_path_arg.is_none() {
                    image_path_arg = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple image paths provided");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("Error: Unknown option {other}");
                process::exit(1);
            }
        }
        i += 1;
    }

    let Some(image_path) = image_path_arg else {
        print_help(&args[0]);
        process::exit(1);
    };

    let image = match image::open(&image_path) {
        Ok(img) => img.to_rgb8(),
        Err(e) => {
            println!("{{\"error\": \"cannot open {image_path}: {e}\"}}");
            process::exit(1);
        }
    };

    match validate_lighting(&image) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: {e}"),
        },
        Err(e) => println!("{{\"error\": \"{e}\"}}"),
    }

    let Some(palette_name) = palette_arg else {
        return;
    };

    let palettes = match palette_file {
        Some(path) => match PaletteSet::from_json_file(&path) {
            Ok(p) => p,
            Err(e) => {
                println!("{{\"error\": \"{e}\"}}");
                process::exit(1);
            }
        },
        None => PaletteSet::builtin(),
    };

    match check_garment(&image, &palettes, &palette_name, threshold) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error: {e}"),
        },
        Err(e) => println!("{{\"error\": \"{}\"}}", e.user_message()),
    }
}

fn print_help(program: &str) {
    println!("Usage: {program} <image> [--palette <season>] [--palette-file <path>] [--threshold <n>]");
    println!();
    println!("Validates photo lighting, then optionally checks the garment color");
    println!("against a named palette (e.g. \"Deep Autumn\").");
}
