//! EA run-log CLI - Plot run-logs and build runner argument lines.
//!
//! ```text
//! ea-runlog plot logs/default.txt --column 0 --fit-name Length -w 250
//! ea-runlog args configs/default.json problems/problem1.txt
//! ```

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::path::PathBuf;
use std::process;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use log::error;

use ea_runlog::{
    analyze_files,
    schema::{AnalysisConfig, LogLayout, OptimizationDirection, RunnerConfig, load_json},
};

const PLOT_COMMAND: &str = "plot";
const ARGS_COMMAND: &str = "args";

const RESULT_FILES_ARG_NAME: &str = "RESULT_FILE";
const COLUMN_ARG_NAME: &str = "column";
const ADAPTIVE_ARG_NAME: &str = "adaptive";
const FIT_NAME_ARG_NAME: &str = "fit-name";
const WINDOW_SIZE_ARG_NAME: &str = "window-size";
const MINIMIZE_ARG_NAME: &str = "minimize";
const OUT_DIR_ARG_NAME: &str = "out-dir";
const CONFIG_ARG_NAME: &str = "config";
const EXPORT_JSON_ARG_NAME: &str = "export-json";
const NO_RENDER_ARG_NAME: &str = "no-render";

const RUNNER_CONFIG_ARG_NAME: &str = "CONFIG";
const PROBLEM_ARG_NAME: &str = "PROBLEM";

fn get_plot_command() -> Command {
    Command::new(PLOT_COMMAND)
        .about("Creates box and step plots for run-log files")
        .arg(
            Arg::new(RESULT_FILES_ARG_NAME)
                .help("Run-log files to analyze")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(COLUMN_ARG_NAME)
                .help("Selects the (average, best) column pair of a multi-objective log")
                .short('c')
                .long(COLUMN_ARG_NAME)
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new(ADAPTIVE_ARG_NAME)
                .help("Log lines carry a trailing adaptation average")
                .long(ADAPTIVE_ARG_NAME)
                .action(ArgAction::SetTrue)
                .conflicts_with(COLUMN_ARG_NAME),
        )
        .arg(
            Arg::new(FIT_NAME_ARG_NAME)
                .help("Name of the fitness objective used in plot labels")
                .short('n')
                .long(FIT_NAME_ARG_NAME),
        )
        .arg(
            Arg::new(WINDOW_SIZE_ARG_NAME)
                .help("Bucket size in evaluations")
                .short('w')
                .long(WINDOW_SIZE_ARG_NAME)
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(MINIMIZE_ARG_NAME)
                .help("Lower fitness is better")
                .long(MINIMIZE_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(OUT_DIR_ARG_NAME)
                .help("Directory for rendered plots")
                .short('o')
                .long(OUT_DIR_ARG_NAME)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(CONFIG_ARG_NAME)
                .help("JSON analysis configuration; command line flags override it")
                .long(CONFIG_ARG_NAME)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(EXPORT_JSON_ARG_NAME)
                .help("Also write the plot payloads as JSON")
                .long(EXPORT_JSON_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(NO_RENDER_ARG_NAME)
                .help("Skip image rendering")
                .long(NO_RENDER_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
}

fn get_args_command() -> Command {
    Command::new(ARGS_COMMAND)
        .about("Prints the runner argument line for an experiment configuration")
        .arg(
            Arg::new(RUNNER_CONFIG_ARG_NAME)
                .help("Runner JSON configuration")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new(PROBLEM_ARG_NAME)
                .help("Problem file handed to the runner")
                .required(true)
                .index(2),
        )
}

fn get_arg_matches() -> ArgMatches {
    Command::new("ea-runlog")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Analyzes evolutionary algorithm run-logs")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(get_plot_command())
        .subcommand(get_args_command())
        .get_matches()
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let matches = get_arg_matches();
    let result = match matches.subcommand() {
        Some((PLOT_COMMAND, plot_matches)) => run_plot(plot_matches),
        Some((ARGS_COMMAND, args_matches)) => run_args(args_matches),
        _ => Err("no subcommand was used, use -h to print help information".to_string()),
    };

    if let Err(err) = result {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run_plot(matches: &ArgMatches) -> Result<(), String> {
    let config = build_analysis_config(matches)?;
    config.validate().map_err(|err| err.to_string())?;

    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>(RESULT_FILES_ARG_NAME)
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let mut failed = 0;
    for (path, result) in analyze_files(&files, &config) {
        match result {
            Ok(report) => {
                println!(
                    "{}: runs={} observations={} buckets={} final_best={}",
                    path.display(),
                    report.runs,
                    report.observations,
                    report.bucket_count(),
                    report
                        .final_best()
                        .map_or_else(|| "-".to_string(), |best| best.to_string())
                );
                for artifact in &report.artifacts {
                    println!("  wrote {}", artifact.display());
                }
            }
            Err(err) => {
                error!("{}: {}", path.display(), err);
                eprintln!("{}: {}", path.display(), err);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} files failed", failed, files.len()));
    }
    Ok(())
}

/// Start from the config file (or defaults) and apply command line overrides.
fn build_analysis_config(matches: &ArgMatches) -> Result<AnalysisConfig, String> {
    let mut config = match matches.get_one::<PathBuf>(CONFIG_ARG_NAME) {
        Some(path) => load_json::<AnalysisConfig>(path).map_err(|err| err.to_string())?,
        None => AnalysisConfig::default(),
    };

    let column = matches.get_one::<usize>(COLUMN_ARG_NAME).copied();
    let adaptive = matches.get_flag(ADAPTIVE_ARG_NAME);
    if column.is_some() || adaptive {
        config.layout = LogLayout::from_switches(column, adaptive);
    }
    if let Some(fit_name) = matches.get_one::<String>(FIT_NAME_ARG_NAME) {
        config.fit_name = fit_name.clone();
    }
    if let Some(&window_size) = matches.get_one::<u64>(WINDOW_SIZE_ARG_NAME) {
        config.window_size = window_size;
    }
    if matches.get_flag(MINIMIZE_ARG_NAME) {
        config.direction = OptimizationDirection::Minimize;
    }
    if let Some(out_dir) = matches.get_one::<PathBuf>(OUT_DIR_ARG_NAME) {
        config.output_dir = out_dir.clone();
    }
    config.export_json |= matches.get_flag(EXPORT_JSON_ARG_NAME);
    config.skip_render |= matches.get_flag(NO_RENDER_ARG_NAME);

    Ok(config)
}

fn run_args(matches: &ArgMatches) -> Result<(), String> {
    let config_path = matches
        .get_one::<String>(RUNNER_CONFIG_ARG_NAME)
        .ok_or("missing runner configuration")?;
    let problem_path = matches
        .get_one::<String>(PROBLEM_ARG_NAME)
        .ok_or("missing problem file")?;

    let config: RunnerConfig = load_json(config_path).map_err(|err| err.to_string())?;
    println!("{}", config.command_line(config_path, problem_path));
    Ok(())
}
