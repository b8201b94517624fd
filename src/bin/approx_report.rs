use std::{fs::File, io::BufWriter, path::PathBuf};

use polyapprox::{
    config::RunConfig,
    degree::DegreeSelection,
    metrics::{format_metric, ErrorReport},
    pipeline::{BatchReport, Pipeline},
    sink::{JsonSink, MemorySink, ResultSink},
    taylor::DerivativeMethod,
};

const USAGE: &str = "Usage: approx_report <selector|all> [config=<path>] [output=<path>] [method=series|symbolic] [equations]";

fn main() {
    env_logger::init();

    //
    // First argument is the degree selector, 0 to 13, or `all`
    let Some(selector) = std::env::args().nth(1) else {
        eprintln!("{USAGE}");
        std::process::exit(1);
    };
    if selector == "help" || selector == "--help" || selector == "-h" {
        eprintln!("{USAGE}");
        std::process::exit(0);
    }

    let selections: Vec<DegreeSelection> = if selector == "all" {
        DegreeSelection::all().collect()
    } else {
        match selector.parse::<i64>() {
            Ok(value) => vec![DegreeSelection::from_selector(value)],
            Err(_) => {
                eprintln!("Invalid selector: {selector}");
                eprintln!("{USAGE}");
                std::process::exit(1);
            }
        }
    };

    let mut config_path = None;
    let mut output_path = None;
    let mut method = None;
    let mut equations = false;
    for arg in std::env::args().skip(2) {
        if let Some(option) = arg.strip_prefix("config=") {
            config_path = Some(PathBuf::from(option));
        } else if let Some(option) = arg.strip_prefix("output=") {
            output_path = Some(PathBuf::from(option));
        } else if arg == "equations" {
            equations = true;
        } else if let Some(option) = arg.strip_prefix("method=") {
            match option.parse::<DerivativeMethod>() {
                Ok(value) => method = Some(value),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        } else {
            eprintln!("Unknown argument: {arg}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    }

    let mut config = match &config_path {
        Some(path) => match RunConfig::from_json_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => RunConfig::default(),
    };
    if let Some(method) = method {
        config.derivative_method = method;
    }

    let pipeline = match Pipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    //
    // Results go to a JSON file if one was given, otherwise they are only printed
    let mut sink: Box<dyn ResultSink> = match &output_path {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(JsonSink::pretty(BufWriter::new(file))),
            Err(e) => {
                eprintln!("Failed to create {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => Box::new(MemorySink::default()),
    };

    let (a, b) = config.interval();
    println!(
        "Interval [{a}, {b}], {} grid points, {} fit samples, {} derivatives",
        config.grid_points, config.fit_samples, config.derivative_method
    );

    let mut failed = false;
    for selection in selections {
        if let Some(notice) = &selection.notice {
            println!("{notice}");
        }

        match pipeline.run_into(selection, &mut sink) {
            Ok(batch) => {
                print_batch(&batch, equations);
                failed |= batch.failures().next().is_some();
            }
            Err(e) => {
                eprintln!("Failed to write results: {e}");
                std::process::exit(1);
            }
        }
    }

    if let Some(path) = &output_path {
        println!("Results written to {}", path.display());
    }

    if failed {
        std::process::exit(2);
    }
}

fn print_batch(batch: &BatchReport, equations: bool) {
    println!();
    println!(
        "Selector {}, degree {}",
        batch.selection.selector, batch.selection.degree
    );
    println!(
        "{:<14} | {:>10} {:>10} {:>10} | {:>10} {:>10} {:>10}",
        "Function", "T RMSE", "T MAPE", "T R²", "C RMSE", "C MAPE", "C R²"
    );
    println!("{}", "-".repeat(14 + 3 + 32 + 3 + 32));

    for report in batch.completed() {
        let [t_rmse, t_mape, t_r2] = columns(&report.taylor_error);
        let [c_rmse, c_mape, c_r2] = columns(&report.chebyshev_error);
        println!(
            "{:<14} | {t_rmse:>10} {t_mape:>10} {t_r2:>10} | {c_rmse:>10} {c_mape:>10} {c_r2:>10}",
            report.expression
        );
    }

    for failure in batch.failures() {
        println!("{:<14} | failed: {}", failure.name, failure.error);
    }

    if equations {
        for report in batch.completed() {
            println!();
            println!("{}", report.expression);
            println!("  Taylor:    {}", report.taylor_equation);
            println!("  Chebyshev: {}", report.chebyshev_equation);
        }
    }
}

fn columns(error: &ErrorReport) -> [String; 3] {
    [
        format_metric(Some(error.rmse)),
        format_metric(error.mape),
        format_metric(error.r_squared),
    ]
}
