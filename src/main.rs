use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::debug;

use coordlink::{
    CoordLinkConfig, CoordLinkError, CoordinateExtractor, FormatConverter, HttpResolver, MapLinks,
    VERSION, decode_until_stable, telemetry,
};

const USAGE: &str = "\
Usage: coordlink [--config <path>] [--json] <command> <input>
       coordlink --version

Commands:
  extract <input>    Extract coordinates from a map link or coordinate pair
  convert <coords>   Convert between decimal degrees and DMS
  links <coords>     Print Waze, Google Maps and Apple Maps share links
  decode <value>     Percent-decode a shared value until it stops changing";

/// Exit code when no coordinates could be extracted
const EXIT_NOT_FOUND: u8 = 2;

#[derive(Serialize)]
struct ExtractOutput<'a> {
    input: &'a str,
    coordinates: &'a str,
    dms: Option<String>,
}

#[derive(Serialize)]
struct ConvertOutput<'a> {
    input: &'a str,
    converted: &'a str,
}

#[derive(Serialize)]
struct DecodeOutput<'a> {
    input: &'a str,
    decoded: &'a str,
}

enum Invocation {
    Help,
    Version,
    Run(Cli),
}

struct Cli {
    config_path: Option<PathBuf>,
    json: bool,
    command: String,
    input: String,
}

fn parse_args() -> Result<Invocation> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(Invocation::Help);
    }
    if args.contains(["-V", "--version"]) {
        return Ok(Invocation::Version);
    }

    let config_path: Option<PathBuf> = args.opt_value_from_str("--config")?;
    let json = args.contains("--json");

    let Some(command) = args.subcommand()? else {
        return Ok(Invocation::Help);
    };

    let remaining = args.finish();
    let input = remaining
        .iter()
        .map(|arg| arg.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ");
    if input.trim().is_empty() {
        return Err(CoordLinkError::validation(format!("missing input for '{command}'")).into());
    }

    Ok(Invocation::Run(Cli {
        config_path,
        json,
        command,
        input,
    }))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

async fn run_extract(cli: &Cli, config: &CoordLinkConfig) -> Result<ExitCode> {
    let resolver = HttpResolver::new(&config.resolver)?;
    let extractor = CoordinateExtractor::new(resolver);

    let Some(coordinates) = extractor.extract_async(&cli.input).await else {
        eprintln!(
            "{}",
            CoordLinkError::network("no coordinates found").user_message()
        );
        return Ok(ExitCode::from(EXIT_NOT_FOUND));
    };

    if cli.json {
        let dms = if coordinates.contains('°') {
            Some(coordinates.clone())
        } else {
            FormatConverter::decimal_to_dms(&coordinates).ok()
        };
        print_json(&ExtractOutput {
            input: &cli.input,
            coordinates: &coordinates,
            dms,
        })?;
    } else {
        println!("{coordinates}");
    }

    Ok(ExitCode::SUCCESS)
}

fn run_convert(cli: &Cli) -> Result<ExitCode> {
    let converted = match FormatConverter::convert(&cli.input) {
        Ok(converted) => converted,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.json {
        print_json(&ConvertOutput {
            input: &cli.input,
            converted: &converted,
        })?;
    } else {
        println!("{converted}");
    }

    Ok(ExitCode::SUCCESS)
}

fn run_links(cli: &Cli) -> Result<ExitCode> {
    let links = match MapLinks::for_coordinates(&cli.input) {
        Ok(links) => links,
        Err(e) => {
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.json {
        print_json(&links)?;
    } else {
        println!("Coordinates: {}", links.decimal);
        println!("Converted:   {}", links.converted);
        println!("Waze:        {}", links.waze);
        println!("Google Maps: {}", links.google_maps);
        println!("Apple Maps:  {}", links.apple_maps);
    }

    Ok(ExitCode::SUCCESS)
}

fn run_decode(cli: &Cli, config: &CoordLinkConfig) -> Result<ExitCode> {
    let decoded = decode_until_stable(&cli.input, config.decode.max_iterations);

    if cli.json {
        print_json(&DecodeOutput {
            input: &cli.input,
            decoded: &decoded,
        })?;
    } else {
        println!("{decoded}");
    }

    Ok(ExitCode::SUCCESS)
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = CoordLinkConfig::load_from_path(cli.config_path.clone())
        .context("Failed to load configuration")?;
    telemetry::init(&config.logging);
    debug!("Running '{}' command", cli.command);

    match cli.command.as_str() {
        "extract" => run_extract(&cli, &config).await,
        "convert" => run_convert(&cli),
        "links" => run_links(&cli),
        "decode" => run_decode(&cli, &config),
        other => bail!("Unknown command '{other}'\n\n{USAGE}"),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    match parse_args()? {
        Invocation::Help => {
            println!("coordlink {VERSION}\n\n{USAGE}");
            Ok(ExitCode::SUCCESS)
        }
        Invocation::Version => {
            println!("coordlink {VERSION}");
            Ok(ExitCode::SUCCESS)
        }
        Invocation::Run(cli) => run(cli).await,
    }
}
