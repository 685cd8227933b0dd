#![warn(clippy::pedantic)]

mod config;

use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    thread,
};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::{eyre::WrapErr, owo_colors::OwoColorize};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, info};
use rubiks_core::{
    CubeState, Face, Outcome, RecordFormat, Tally,
    dataset::{self, GenerateOptions},
    decode, encode,
};

use crate::config::MarkerOverrides;

/// Generates, cleans and evaluates 3x3x3 cube prompt/response datasets
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    log_level: u8,

    /// A TOML file with `prompt_marker`, `response_marker` and `end_marker`
    #[arg(long, value_name = "FORMAT_CONFIG")]
    format: Option<PathBuf>,

    /// Text marking the start of a prompt
    #[arg(long)]
    prompt_marker: Option<String>,

    /// Text marking the start of a response
    #[arg(long)]
    response_marker: Option<String>,

    /// Text marking the end of a response
    #[arg(long)]
    end_marker: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate scrambled cubes paired with solving formulas
    Generate {
        /// Number of samples to generate
        #[arg(long, default_value_t = GenerateOptions::default().n_samples)]
        n_samples: usize,
        /// Shortest scramble, in face turns
        #[arg(long, default_value_t = GenerateOptions::default().min_length)]
        min_length: usize,
        /// Longest scramble, in face turns
        #[arg(long, default_value_t = GenerateOptions::default().max_length)]
        max_length: usize,
        /// Where to write the generated records
        #[arg(long, default_value = "rubiks_generated.txt")]
        output: PathBuf,
        /// Seed for reproducible scrambles
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Keep only the scramble/solution pairs that solve the cube
    Clean {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "rubiks_clean.txt")]
        output: PathBuf,
        /// Separates the scramble from the solution
        #[arg(long, default_value = "|")]
        delim: String,
    },
    /// Wrap prompt/response pairs in the record markers
    Reformat {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Separates the prompt from the response
        #[arg(long, default_value = "|")]
        delim: String,
    },
    /// Score model output records as correct, incorrect or invalid
    Evaluate {
        /// File of records, one per line
        #[arg(long)]
        model_output: PathBuf,
        /// Worker threads; defaults to the available parallelism
        #[arg(long)]
        threads: Option<NonZeroUsize>,
    },
    /// Print the config string of a solved cube after a formula
    Encode {
        /// e.g. "R U R' U'"
        formula: String,
    },
    /// Check a config string and report whether it is solved
    Decode { config: String },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.log_level {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let format = config::load_format(
        cli.format.as_deref(),
        MarkerOverrides {
            prompt_marker: cli.prompt_marker,
            response_marker: cli.response_marker,
            end_marker: cli.end_marker,
        },
    )?;

    match cli.command {
        Commands::Generate {
            n_samples,
            min_length,
            max_length,
            output,
            seed,
        } => {
            let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
            let options = GenerateOptions {
                n_samples,
                min_length,
                max_length,
            };
            let samples = dataset::generate_samples(&options, &mut rng)?;
            let text = samples.iter().map(|sample| sample.render(&format)).join("\n");
            fs::write(&output, text)
                .wrap_err_with(|| format!("Failed to write {}", output.display()))?;
            eprintln!("Wrote {} samples to {}", samples.len(), output.display());
        }
        Commands::Clean {
            input,
            output,
            delim,
        } => {
            let data = read(&input)?;
            let kept = dataset::clean_pairs(data.split('\n'), &delim);
            info!(target: "dataset", "Kept {} lines", kept.len());
            fs::write(&output, kept.join("\n"))
                .wrap_err_with(|| format!("Failed to write {}", output.display()))?;
        }
        Commands::Reformat {
            input,
            output,
            delim,
        } => {
            let data = read(&input)?;
            let records = dataset::reformat_pairs(data.lines(), &delim, &format);
            let text = records.iter().map(|record| format!("{record}\n")).collect::<String>();
            fs::write(&output, text)
                .wrap_err_with(|| format!("Failed to write {}", output.display()))?;
        }
        Commands::Evaluate {
            model_output,
            threads,
        } => {
            let data = read(&model_output)?;
            let lines = data.lines().collect_vec();
            let threads = threads
                .or_else(|| thread::available_parallelism().ok())
                .map_or(1, NonZeroUsize::get);
            let tally = evaluate_parallel(&format, &lines, threads);

            println!("Evaluating responses from {}.", model_output.display());
            print_outcome(&tally, Outcome::Correct);
            print_outcome(&tally, Outcome::Incorrect);
            print_outcome(&tally, Outcome::Invalid);
        }
        Commands::Encode { formula } => {
            let mut cube = CubeState::solved();
            cube.apply_str(&formula)?;
            println!("{}", encode(&cube)?);
        }
        Commands::Decode { config } => {
            let cube = decode(&config)?;
            for face in Face::ALL {
                println!("{face}: {}", cube.face(face).iter().join(" "));
            }
            if cube.is_solved() {
                println!("{}", "Solved".green());
            } else {
                println!("{}", "Not solved".red());
            }
        }
    }

    Ok(())
}

fn read(path: &Path) -> color_eyre::Result<String> {
    fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {}", path.display()))
}

/// Records are independent, so each worker scores its own chunk.
fn evaluate_parallel(format: &RecordFormat, lines: &[&str], threads: usize) -> Tally {
    let chunk_size = lines.len().div_ceil(threads).max(1);
    info!(
        target: "evaluate",
        "Evaluating {} records on {threads} threads",
        lines.len()
    );

    thread::scope(|scope| {
        let workers = lines
            .chunks(chunk_size)
            .map(|chunk| scope.spawn(move || format.evaluate_lines(chunk.iter().copied())))
            .collect_vec();

        let mut tally = Tally::default();
        for worker in workers {
            tally += worker
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
        }
        tally
    })
}

fn print_outcome(tally: &Tally, outcome: Outcome) {
    let line = format!(
        "{outcome}: {}/{} ~ {}",
        tally.count(outcome),
        tally.total(),
        tally.ratio(outcome)
    );

    match outcome {
        Outcome::Correct => println!("{}", line.green()),
        Outcome::Incorrect => println!("{}", line.yellow()),
        Outcome::Invalid => println!("{}", line.red()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallel_matches_sequential() {
        let format = RecordFormat::default();
        let samples = dataset::generate_samples(
            &GenerateOptions {
                n_samples: 30,
                min_length: 1,
                max_length: 5,
            },
            &mut fastrand::Rng::with_seed(8),
        )
        .unwrap();
        let mut lines = samples.iter().map(|s| s.render(&format)).collect_vec();
        lines.push("not a record".to_owned());
        let lines = lines.iter().map(String::as_str).collect_vec();

        let sequential = format.evaluate_lines(lines.iter().copied());
        for threads in [1, 3, 64] {
            assert_eq!(evaluate_parallel(&format, &lines, threads), sequential);
        }
        assert_eq!(sequential.correct, 30);
        assert_eq!(sequential.invalid, 1);
    }

    #[test]
    fn empty_input() {
        let tally = evaluate_parallel(&RecordFormat::default(), &[], 4);
        assert_eq!(tally, Tally::default());
    }

    #[test]
    fn cli_parses() {
        let cli = Cli::try_parse_from([
            "rubiks",
            "-ll",
            "--end-marker",
            "</s>",
            "evaluate",
            "--model-output",
            "out.txt",
        ])
        .unwrap();
        assert_eq!(cli.log_level, 2);
        assert_eq!(cli.end_marker.as_deref(), Some("</s>"));
        assert!(matches!(cli.command, Commands::Evaluate { threads: None, .. }));
    }

    #[test]
    fn generate_defaults() {
        let cli = Cli::try_parse_from(["rubiks", "generate"]).unwrap();
        let Commands::Generate {
            n_samples,
            min_length,
            max_length,
            seed,
            ..
        } = cli.command
        else {
            panic!("expected generate");
        };
        assert_eq!(
            GenerateOptions {
                n_samples,
                min_length,
                max_length,
            },
            GenerateOptions::default()
        );
        assert_eq!(seed, None);
    }
}
