//! Dashboard entry point — CLI wiring and headless render-pass output.

use std::path::Path;
use std::process;

use solar_dash::config::DashboardConfig;
use solar_dash::data::{Country, DatasetCache};
use solar_dash::view::selector::{ViewOptions, build_render_pass};

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    data_dir: Option<String>,
    country: Option<String>,
    heatmap: bool,
    #[cfg(feature = "tui")]
    tui: bool,
}

fn print_help() {
    eprintln!("solar-dash — Solar measurement dashboard for Benin, Sierra Leone, and Togo");
    eprintln!();
    eprintln!("Usage: solar-dash [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>     Load dashboard configuration from a TOML file");
    eprintln!("  --data-dir <path>   Directory holding the per-country CSV files");
    eprintln!("  --country <label>   Country to render (Benin, Sierra Leone, Togo)");
    eprintln!("  --heatmap           Enable the correlation heatmap section");
    #[cfg(feature = "tui")]
    eprintln!("  --tui               Launch the interactive terminal dashboard");
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("Without --country, the configured default country is rendered.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        data_dir: None,
        country: None,
        heatmap: false,
        #[cfg(feature = "tui")]
        tui: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                cli.config_path = Some(args[i].clone());
            }
            "--data-dir" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --data-dir requires a path argument");
                    process::exit(1);
                }
                cli.data_dir = Some(args[i].clone());
            }
            "--country" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --country requires a label argument");
                    process::exit(1);
                }
                cli.country = Some(args[i].clone());
            }
            "--heatmap" => {
                cli.heatmap = true;
            }
            #[cfg(feature = "tui")]
            "--tui" => {
                cli.tui = true;
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load config: --config takes priority over the built-in baseline
    let mut config = if let Some(ref path) = cli.config_path {
        match DashboardConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        DashboardConfig::baseline()
    };

    // Apply CLI overrides
    if let Some(ref dir) = cli.data_dir {
        config.data.dir = dir.clone();
    }
    if cli.heatmap {
        config.ui.show_heatmap = true;
    }

    // Validate
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let label = cli
        .country
        .clone()
        .unwrap_or_else(|| config.ui.default_country.clone());
    let country = match Country::from_label(&label) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    #[cfg(feature = "tui")]
    if cli.tui {
        solar_dash::tui::run(&config, country);
        return;
    }

    // Headless: one render pass, summary lines to stdout
    let mut cache = DatasetCache::new(&config.data.dir);
    let dataset = match cache.load(country) {
        Ok(ds) => ds,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let opts = ViewOptions::from_config(&config);
    let pass = build_render_pass(&dataset, &opts);

    println!(
        "{}: {} rows, {} eligible section(s)",
        pass.country,
        dataset.table.len(),
        pass.requests.len()
    );
    for request in &pass.requests {
        println!("{request}");
    }
    for warning in &pass.warnings {
        eprintln!("warning: {warning}");
    }
}
