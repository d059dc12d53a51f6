//! FastRsid CLI entry point
//!
//! Loads a genotype raw data file and answers rsID lookups as JSON.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use fast_rsid::core::{
    normalize_identifier, ActiveDataset, FastRsidError, IoStrategy, ParseStats,
    DEFAULT_BUFFER_SIZE, DEFAULT_PREFIX_LIMIT,
};
use fast_rsid::Response;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

/// I/O strategy for reading input files (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum IoStrategyArg {
    /// Pick buffered or memory-mapped reading by file size
    #[default]
    Auto,
    /// Always use buffered reading
    Buffered,
    /// Always memory-map the file
    Mmap,
}

impl From<IoStrategyArg> for IoStrategy {
    fn from(arg: IoStrategyArg) -> Self {
        match arg {
            IoStrategyArg::Auto => IoStrategy::Auto,
            IoStrategyArg::Buffered => IoStrategy::Buffered(DEFAULT_BUFFER_SIZE),
            IoStrategyArg::Mmap => IoStrategy::MemoryMapped,
        }
    }
}

#[derive(Parser)]
#[command(name = "fast-rsid")]
#[command(about = "Fast rsID lookup over genotype raw data files")]
#[command(version)]
#[command(author = "FastRsid Contributors")]
struct Cli {
    /// Pretty-print JSON responses
    #[arg(long, global = true)]
    pretty: bool,

    /// Input reading strategy
    #[arg(long = "io", global = true, default_value = "auto")]
    io_strategy: IoStrategyArg,

    /// Number of threads for batch lookups (0: number of CPUs)
    #[arg(short = 't', long, global = true, default_value = "0")]
    threads: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a single rsID
    Search {
        /// Genotype raw data file (plain, .gz or .bz2)
        input: PathBuf,
        /// rsID to look up ("rs" prefix optional)
        rsid: String,
        /// Live search: list identifiers starting with RSID
        #[arg(short = 'p', long)]
        partial: bool,
        /// Maximum number of live search matches
        #[arg(short = 'l', long, default_value_t = DEFAULT_PREFIX_LIMIT)]
        limit: usize,
    },
    /// Look up many rsIDs at once
    Batch {
        /// Genotype raw data file (plain, .gz or .bz2)
        input: PathBuf,
        /// rsIDs to look up (comma or whitespace separated)
        rsids: Vec<String>,
        /// Read additional rsIDs from a file
        #[arg(long = "ids")]
        ids_file: Option<PathBuf>,
    },
    /// Show dataset statistics
    Stats {
        /// Genotype raw data file (plain, .gz or .bz2)
        input: PathBuf,
    },
    /// Keep a dataset loaded and answer commands from stdin
    Shell {
        /// Genotype raw data file (plain, .gz or .bz2)
        input: PathBuf,
    },
}

/// Split comma/whitespace separated identifiers, dropping empties
fn split_id_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

fn load_dataset(dataset: &ActiveDataset, input: &Path, strategy: IoStrategy) -> anyhow::Result<ParseStats> {
    let start = Instant::now();
    eprintln!("Loading raw data file: {:?}", input);

    let stats = dataset
        .load_file(input, strategy)
        .map_err(FastRsidError::from)
        .context("Failed to parse DNA file")?;

    eprintln!(
        "Loaded {} SNPs in {:.2}s ({} malformed lines skipped)",
        stats.loaded,
        start.elapsed().as_secs_f64(),
        stats.skipped
    );
    Ok(stats)
}

fn exact_response(dataset: &ActiveDataset, rsid: &str) -> Response {
    let rsid = rsid.trim();
    if rsid.is_empty() {
        return Response::failure("Missing RSID parameter");
    }
    let rsid = normalize_identifier(rsid);
    Response::exact(&rsid, dataset.find_exact(&rsid))
}

fn partial_response(dataset: &ActiveDataset, rsid: &str, limit: usize) -> Response {
    let rsid = rsid.trim();
    if rsid.is_empty() {
        return Response::failure("Missing RSID parameter");
    }
    let rsid = normalize_identifier(rsid);
    Response::partial(dataset.find_prefix(&rsid, limit))
}

fn batch_response(dataset: &ActiveDataset, rsids: &[String]) -> Response {
    Response::batch(rsids.len(), dataset.find_many(rsids))
}

fn emit(out: &mut impl Write, response: &Response, pretty: bool) -> anyhow::Result<()> {
    writeln!(out, "{}", response.to_json(pretty)?)?;
    Ok(())
}

fn exit_code(response: &Response) -> ExitCode {
    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Interactive loop: one command per line, one JSON response per command
fn run_shell<R: BufRead, W: Write>(
    dataset: &ActiveDataset,
    strategy: IoStrategy,
    pretty: bool,
    input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        let response = match command {
            "find" | "search" => match words.next() {
                Some(rsid) => exact_response(dataset, rsid),
                None => Response::failure("Missing RSID parameter"),
            },
            "prefix" | "partial" => match words.next() {
                Some(rsid) => {
                    let limit = match words.next().map(str::parse::<usize>) {
                        None => DEFAULT_PREFIX_LIMIT,
                        Some(Ok(limit)) => limit,
                        Some(Err(_)) => {
                            emit(out, &Response::failure("Invalid limit"), pretty)?;
                            continue;
                        }
                    };
                    partial_response(dataset, rsid, limit)
                }
                None => Response::failure("Missing RSID parameter"),
            },
            "batch" => {
                let rest: Vec<String> = words.flat_map(split_id_list).map(String::from).collect();
                batch_response(dataset, &rest)
            }
            "stats" => Response::stats(dataset.stats()),
            "load" => match words.next() {
                Some(path) => match dataset.load_file(path, strategy) {
                    Ok(stats) => Response::loaded(&stats),
                    Err(e) => {
                        log::warn!("Reload of {} failed: {}", path, e);
                        Response::failure(format!("Failed to parse DNA file: {}", e))
                    }
                },
                None => Response::failure("Missing file path"),
            },
            "quit" | "exit" => break,
            other => Response::failure(format!("Unknown command: {}", other)),
        };

        emit(out, &response, pretty)?;
        out.flush()?;
    }

    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();
    let strategy: IoStrategy = cli.io_strategy.into();

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .map_err(|e| FastRsidError::ThreadPool(e.to_string()))?;
    }

    let dataset = ActiveDataset::new();
    let mut out = io::stdout().lock();

    let code = match cli.command {
        Commands::Search { input, rsid, partial, limit } => {
            load_dataset(&dataset, &input, strategy)?;
            let start = Instant::now();
            let response = if partial {
                partial_response(&dataset, &rsid, limit)
            } else {
                exact_response(&dataset, &rsid)
            };
            log::debug!("Lookup took {:?}", start.elapsed());
            emit(&mut out, &response, cli.pretty)?;
            exit_code(&response)
        }

        Commands::Batch { input, rsids, ids_file } => {
            let mut ids: Vec<String> = rsids
                .iter()
                .flat_map(|s| split_id_list(s))
                .map(String::from)
                .collect();
            if let Some(path) = ids_file {
                let text = std::fs::read_to_string(&path)
                    .map_err(|e| anyhow::anyhow!("Failed to read rsID list {:?}: {}", path, e))?;
                ids.extend(split_id_list(&text).map(String::from));
            }

            load_dataset(&dataset, &input, strategy)?;
            let start = Instant::now();
            let response = batch_response(&dataset, &ids);
            eprintln!("Batch of {} lookups in {:.3}s", ids.len(), start.elapsed().as_secs_f64());
            emit(&mut out, &response, cli.pretty)?;
            exit_code(&response)
        }

        Commands::Stats { input } => {
            let stats = load_dataset(&dataset, &input, strategy)?;

            eprintln!("\n=== Load Statistics ===");
            eprintln!("Header lines:    {}", stats.header_lines);
            eprintln!("Data lines:      {}", stats.data_lines);
            eprintln!("Loaded:          {}", stats.loaded);
            eprintln!("Skipped:         {}", stats.skipped);
            eprintln!("Bad positions:   {}", stats.bad_positions);

            let response = Response::stats(dataset.stats());
            emit(&mut out, &response, cli.pretty)?;
            exit_code(&response)
        }

        Commands::Shell { input } => {
            drop(out);
            load_dataset(&dataset, &input, strategy)?;
            eprintln!("Commands: find RSID | prefix TEXT [LIMIT] | batch RSID... | stats | load PATH | quit");
            run_shell(&dataset, strategy, cli.pretty, io::stdin().lock(), &mut io::stdout().lock())?;
            ExitCode::SUCCESS
        }
    };

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_split_id_list() {
        let ids: Vec<&str> = split_id_list(" rs1, 2 ,,rs3\nrs4 ").collect();
        assert_eq!(ids, vec!["rs1", "2", "rs3", "rs4"]);
        assert_eq!(split_id_list(" , ").count(), 0);
    }

    #[test]
    fn test_partial_response_normalizes() {
        let dataset = ActiveDataset::new();
        dataset.load_reader("rs10\t1\t1\tA\tA\nrs11\t1\t2\tC\tC\n".as_bytes()).unwrap();

        match partial_response(&dataset, "1", 10) {
            Response::Partial { matches, count, .. } => {
                assert_eq!(matches, vec!["rs10", "rs11"]);
                assert_eq!(count, 2);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[test]
    fn test_blank_rsid_is_missing_parameter() {
        let dataset = ActiveDataset::new();
        dataset.load_reader("rs10\t1\t1\tA\tA\n".as_bytes()).unwrap();

        for rsid in ["", "   "] {
            let exact = exact_response(&dataset, rsid).to_json(false).unwrap();
            assert!(exact.contains("Missing RSID parameter"), "{}", exact);
            let partial = partial_response(&dataset, rsid, 10).to_json(false).unwrap();
            assert!(partial.contains("Missing RSID parameter"), "{}", partial);
        }
    }

    fn shell_session(dataset: &ActiveDataset, script: &str) -> Vec<serde_json::Value> {
        let mut out = Vec::new();
        run_shell(dataset, IoStrategy::Auto, false, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_shell_session() {
        let dataset = ActiveDataset::new();
        dataset.load_reader("rs10\t1\t1\tA\tA\nrs11\t1\t2\tC\tC\n".as_bytes()).unwrap();

        let script = "\
find 10
prefix rs1 x
prefix rs1 1

load /no/such/genome.txt
stats
batch
batch 11, rs99
frobnicate
find
quit
find 11
";
        let responses = shell_session(&dataset, script);
        let messages: Vec<&str> = responses
            .iter()
            .map(|r| r["message"].as_str().unwrap_or(""))
            .collect();

        // Blank line skipped, nothing after quit
        assert_eq!(responses.len(), 9);
        assert_eq!(messages[0], "Found SNP: rs10");
        assert_eq!(messages[1], "Invalid limit");
        assert_eq!(responses[2]["matches"], serde_json::json!(["rs10"]));
        assert!(messages[3].starts_with("Failed to parse DNA file:"), "{}", messages[3]);
        // The failed load kept the previous dataset
        assert_eq!(responses[4]["totalSNPs"], 2);
        assert_eq!(messages[5], "No RSIDs provided");
        assert_eq!(messages[6], "Found 1 out of 2 requested SNPs");
        assert_eq!(messages[7], "Unknown command: frobnicate");
        assert_eq!(messages[8], "Missing RSID parameter");
        assert!(responses.iter().all(|r| r["success"].is_boolean()));
    }

    #[test]
    fn test_batch_response_no_data() {
        let dataset = ActiveDataset::new();
        let response = batch_response(&dataset, &["rs1".to_string()]);
        assert!(!response.is_success());
    }
}
