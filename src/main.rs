// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

mod ast;
mod bindings;
mod config;
mod cow_yaml;
mod error;
mod generate;
mod interpreter;
mod parser;
mod process_template;
mod variable_arg;
mod yaml_utils;

use std::{path::PathBuf, process::ExitCode};

use clap::Parser as ClapParser;
use tracing::{debug, error, trace};

use crate::{
    config::{GenerateConfig, Mode, DEFAULT_TEMPLATES_DIR},
    error::GenerateError,
    generate::{generate, GenerateOutcome},
    variable_arg::{parse_variable_arg, VariableArg},
    yaml_utils::yaml_load_from_file,
};

/// Render the CI test-matrix template into a flattened workflow file
#[derive(ClapParser, Debug)]
#[command(name = "workflow-gen", version, about, long_about = None)]
struct Cli {
    /// Directory holding test.yml.erb; the output goes to its sibling `workflows` directory
    #[arg(short = 'd', long, default_value = DEFAULT_TEMPLATES_DIR)]
    templates_dir: PathBuf,

    /// Template path, overriding the one inside --templates-dir
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Output path, overriding the one derived from --templates-dir
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Bind a template variable (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_variable_arg)]
    vars: Vec<VariableArg>,

    /// YAML file mapping variable names to values
    #[arg(long = "vars", value_name = "FILE")]
    vars_file: Option<PathBuf>,

    /// Fail if the output file is not up to date instead of writing it
    #[arg(long)]
    check: bool,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .with_writer(std::io::stderr)
        .init();

    debug!("workflow-gen started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", cli);

    match run(cli) {
        Ok(GenerateOutcome::Written) | Ok(GenerateOutcome::UpToDate) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<GenerateOutcome, GenerateError> {
    let config = build_config(cli)?;
    generate(&config)
}

fn build_config(cli: Cli) -> Result<GenerateConfig, GenerateError> {
    let mut config = GenerateConfig::from_templates_dir(&cli.templates_dir);

    if let Some(template) = cli.template {
        config.template_path = template;
    }
    if let Some(output) = cli.output {
        config.output_path = output;
    }
    if cli.check {
        config.mode = Mode::Check;
    }

    // Defaults, then the vars file, then --var arguments.
    if let Some(vars_file) = &cli.vars_file {
        let docs = yaml_load_from_file(vars_file).map_err(|err| GenerateError::Vars(format!("{:#}", err)))?;
        for doc in &docs {
            config
                .bindings
                .extend_from_yaml(doc)
                .map_err(|err| GenerateError::Vars(format!("{}: {}", vars_file.display(), err)))?;
        }
    }
    for var in &cli.vars {
        config
            .bindings
            .insert(&var.name, &var.value)
            .map_err(|err| GenerateError::Vars(err.to_string()))?;
    }

    Ok(config)
}
