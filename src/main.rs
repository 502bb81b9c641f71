use clap::Parser;
use conflang_core::config::{DEFAULT_CONFIG_FILE, TranslatorConfig};
use conflang_core::{selftest, translate_with};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "conflang")]
#[command(about = "Translates the conflang configuration language to JSON", version, long_about = None)]
struct Cli {
    /// Source file to translate
    #[arg(long, value_name = "PATH", required_unless_present = "test")]
    input: Option<PathBuf>,

    /// Where to write the JSON (stdout if omitted)
    #[arg(long, value_name = "PATH", requires = "input")]
    output: Option<PathBuf>,

    /// Run the built-in scenarios and report pass/fail
    #[arg(long, conflicts_with = "input")]
    test: bool,

    /// Settings file (defaults to ./conflang.toml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Maximum nesting of objects and arrays
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Maximum number of nodes in the output, with references expanded
    #[arg(long, value_name = "N")]
    max_nodes: Option<usize>,

    /// Escape strings so the output is strict JSON
    #[arg(long)]
    escape_strings: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = load_config(cli)?;
    debug!("configuration: {:?}", config);

    if cli.test {
        return run_tests(&config);
    }

    match &cli.input {
        Some(input) => translate_file(input, cli.output.as_deref(), &config),
        None => Err("either --input <path> or --test is required".into()),
    }
}

fn load_config(cli: &Cli) -> Result<TranslatorConfig, String> {
    let mut config = match &cli.config {
        Some(path) => TranslatorConfig::load(path)?,
        None => TranslatorConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
    };

    if let Some(depth) = cli.max_depth {
        config.max_depth = depth;
    }
    if let Some(nodes) = cli.max_nodes {
        config.max_nodes = nodes;
    }
    if cli.escape_strings {
        config.escape_strings = true;
    }
    Ok(config)
}

fn translate_file(input: &Path, output: Option<&Path>, config: &TranslatorConfig) -> Result<(), String> {
    let source = fs::read_to_string(input)
        .map_err(|e| format!("Cannot read {}: {}", input.display(), e))?;
    info!("read {} bytes from {}", source.len(), input.display());

    let json = translate_with(&source, config)
        .map_err(|e| format!("{}: {}", input.display(), e))?;

    match output {
        Some(path) => {
            write_atomically(path, &json)?;
            info!("wrote {} bytes to {}", json.len(), path.display());
            println!("Translated {} to {}", input.display(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

// Write next to the target, then rename, so a failed write never leaves a
// truncated output file behind.
fn write_atomically(path: &Path, content: &str) -> Result<(), String> {
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, content).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        format!("Cannot write {}: {}", path.display(), e)
    })?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        format!("Cannot write {}: {}", path.display(), e)
    })
}

fn run_tests(config: &TranslatorConfig) -> Result<(), String> {
    println!("Running built-in scenarios...");

    let outcomes = selftest::run(config);
    let failed = outcomes.iter().filter(|o| !o.passed).count();

    for outcome in &outcomes {
        match (&outcome.output, outcome.passed) {
            (Ok(json), true) => println!("Test {} passed: {}", outcome.number, json),
            (Ok(json), false) => println!("Test {} failed ({}): unexpected output {}", outcome.number, outcome.name, json),
            (Err(e), _) => println!("Test {} failed ({}): {}", outcome.number, outcome.name, e),
        }
    }

    println!("\n--- RESULTS ---");
    println!("Total : {}", outcomes.len());
    println!("Passed: {}", outcomes.len() - failed);
    println!("Failed: {}", failed);

    if failed > 0 {
        return Err(format!("{} scenario(s) failed", failed));
    }
    Ok(())
}
