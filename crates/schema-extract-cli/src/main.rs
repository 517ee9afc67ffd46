use anyhow::Result;
use schema_extract_config::Config;
use schema_extract_engine::extract_schema;
use std::{env, path::PathBuf, process};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Extract {
        input: Option<PathBuf>,
        output: Option<PathBuf>,
    },
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut positional = Vec::new();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("Unknown option: {flag}"));
            }
            path => positional.push(PathBuf::from(path)),
        }
    }

    if positional.len() > 2 {
        return Err("Too many arguments".to_string());
    }
    let mut positional = positional.into_iter();
    Ok(Command::Extract {
        input: positional.next(),
        output: positional.next(),
    })
}

fn usage(program_name: &str) -> String {
    format!(
        "Usage: {program_name} [backup.sql [output.sql]]\n\
         Defaults to {} and {}, or the paths in {}",
        Config::DEFAULT_INPUT_PATH,
        Config::DEFAULT_OUTPUT_PATH,
        Config::config_path().display()
    )
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program_name = args
        .first()
        .cloned()
        .unwrap_or_else(|| "schema-extract".to_string());

    let (input, output) = match parse_args(&args) {
        Ok(Command::Help) => {
            println!("{}", usage(&program_name));
            return Ok(());
        }
        Ok(Command::Extract { input, output }) => (input, output),
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{}", usage(&program_name));
            process::exit(1);
        }
    };

    // CLI arguments override the config file, which overrides the defaults
    let config = match Config::load() {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", Config::config_path().display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let options = match config.filter_options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!(
                "Error: Config file '{}' is invalid: {e}",
                Config::config_path().display()
            );
            process::exit(1);
        }
    };

    let input = input.unwrap_or(config.input_path);
    let output = output.unwrap_or(config.output_path);

    extract_schema(&input, &output, &options)?;
    Ok(())
}
