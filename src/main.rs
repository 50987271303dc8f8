use dylotree::layout::{LayoutMode, Projection, Scaling};
use dylotree::{RenderOptions, render_newick};
use std::env;
use std::fs;
use std::process;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <input.nwk> [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>    Output file (default: stdout)");
    eprintln!("  -l, --layout <kind>    Layout: rect, radial (default: rect)");
    eprintln!("  -s, --scaling <kind>   Scaling: length, uniform (default: length)");
    eprintln!("  -W, --width <px>       Viewport width (default: 800)");
    eprintln!("  -H, --height <px>      Viewport height (default: 600)");
    eprintln!("      --no-scale-bar     Omit the scale bar");
    eprintln!("      --no-lengths       Omit branch-length annotations");
    process::exit(1);
}

fn parse_dimension(flag: &str, value: &str) -> f64 {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => {
            eprintln!("Invalid {}: {}", flag, value);
            process::exit(1);
        }
    }
}

#[cfg(feature = "tracing")]
fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

#[cfg(not(feature = "tracing"))]
fn init_logging() {}

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
    }

    let input_path = &args[1];
    let mut output_path: Option<String> = None;
    let mut projection = Projection::Rectangular;
    let mut scaling = Scaling::LengthScaled;
    let mut options = RenderOptions::default();

    let mut i = 2;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--no-scale-bar" => options.features.scale_bar = false,
            "--no-lengths" => options.features.branch_lengths = false,
            "-o" | "--output" | "-l" | "--layout" | "-s" | "--scaling" | "-W" | "--width"
            | "-H" | "--height" => {
                i += 1;
                let Some(value) = args.get(i) else {
                    eprintln!("Missing value for {}", flag);
                    process::exit(1);
                };
                match flag {
                    "-o" | "--output" => output_path = Some(value.clone()),
                    "-l" | "--layout" => {
                        projection = Projection::from_str(value).unwrap_or_else(|| {
                            eprintln!("Invalid layout: {}", value);
                            process::exit(1);
                        })
                    }
                    "-s" | "--scaling" => {
                        scaling = Scaling::from_str(value).unwrap_or_else(|| {
                            eprintln!("Invalid scaling: {}", value);
                            process::exit(1);
                        })
                    }
                    "-W" | "--width" => options.width = parse_dimension("width", value),
                    _ => options.height = parse_dimension("height", value),
                }
            }
            "-h" | "--help" => usage(&args[0]),
            _ => {
                eprintln!("Unknown option: {}", flag);
                process::exit(1);
            }
        }
        i += 1;
    }
    options.mode = LayoutMode::new(projection, scaling);

    let input = match fs::read_to_string(input_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", input_path, e);
            process::exit(1);
        }
    };

    let svg = match render_newick(&input, &options) {
        Ok(svg) => svg,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &svg) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", svg),
    }
}
