// src/main.rs
use clap::Parser;
use rst_extract::extractors::{ExtractedDocument, Extractor};
use rst_extract::runner::{ScriptRunner, SyntaxValidator};
use rst_extract::storage::{self, StorageManager};
use rst_extract::utils::{self, config::Settings, AppError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const MAGNIFYING_GLASS: &str = "\u{1f50d}";

/// Extract code blocks from reStructuredText files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// reStructuredText files to extract from
    files: Vec<PathBuf>,

    /// Write the extracted code to this file (single input only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write `<stem>.<ext>` for every input into this directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Also write a `<stem>_meta.json` file describing the blocks
    #[arg(long, requires = "output_dir")]
    metadata: bool,

    /// Run the extracted code instead of printing it
    #[arg(short = 'x', long)]
    execute: bool,

    /// With --execute, run every block as its own program
    #[arg(long, requires = "execute")]
    isolate_blocks: bool,

    /// Check that the extracted code is syntactically valid
    #[arg(long)]
    check: bool,

    /// Interpreter used by --execute and --check
    #[arg(long, env = "RST_EXTRACT_PYTHON")]
    python_bin: Option<String>,

    /// Language tag to extract (repeatable; overrides the settings file)
    #[arg(short, long)]
    language: Vec<String>,

    /// Timeout in seconds for --execute and --check
    #[arg(long)]
    timeout: Option<u64>,

    /// Keep processing remaining files after a failure
    #[arg(short, long)]
    keep_going: bool,

    /// Settings file (TOML)
    #[arg(short, long, env = "RST_EXTRACT_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RST_EXTRACT_LOGGING / RUST_LOG env vars)
    utils::logging::setup_logging(args.verbose);
    tracing::debug!("Starting processing for args: {:?}", args);

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<(), AppError> {
    if args.files.is_empty() {
        println!("{} No filename provided. Please provide a filename (or multiple).", MAGNIFYING_GLASS);
        return Ok(());
    }

    if args.output.is_some() && args.files.len() > 1 {
        return Err(AppError::Config(
            "--output accepts a single input file; use --output-dir for several".to_string(),
        ));
    }

    // 3. Load settings and apply command-line overrides
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(binary) = &args.python_bin {
        settings.runner.binary = binary.clone();
    }
    if !args.language.is_empty() {
        settings.extract.languages = args.language.clone();
    }
    if let Some(timeout) = args.timeout {
        settings.runner.timeout_secs = timeout;
    }

    // 4. Initialize extractor and storage
    let extractor = Extractor::new(&settings.extract_options())?;
    let storage = args
        .output_dir
        .as_ref()
        .map(|dir| StorageManager::new(dir, &settings.extract.output_extension))
        .transpose()?;

    // 5. Process each file, one at a time
    let mut success_count = 0;
    let mut failure_count = 0;

    for path in &args.files {
        tracing::info!("Processing {}", path.display());

        match process_file(path, args, &settings, &extractor, storage.as_ref()).await {
            Ok(()) => success_count += 1,
            Err(e) if args.keep_going => {
                tracing::debug!("Failed to process {}: {:?}", path.display(), e);
                eprintln!("{}: {}", path.display(), e);
                failure_count += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!("Processing finished. Success: {}, Failures: {}", success_count, failure_count);

    if failure_count > 0 {
        return Err(AppError::Processing(format!(
            "{} of {} documents failed",
            failure_count,
            args.files.len()
        )));
    }

    Ok(())
}

async fn process_file(
    path: &Path,
    args: &Args,
    settings: &Settings,
    extractor: &Extractor,
    storage: Option<&StorageManager>,
) -> Result<(), AppError> {
    let document = extractor.extract_document(path)?;
    let text = document.render(extractor.label_prefix());

    if let Some(output) = &args.output {
        storage::write_output(output, &text)?;
    }

    if let Some(storage) = storage {
        let saved = storage.save_output(&document, &text)?;
        tracing::info!("Saved extracted code to: {}", saved.display());
        if args.metadata {
            storage.save_metadata(&document)?;
        }
    }

    if !args.execute {
        print!("{}", text);
        std::io::stdout().flush()?;
    }

    if args.check {
        let validator = SyntaxValidator::from_settings(&settings.runner);
        let code = document.render(&settings.runner.label_prefix);
        if !validator.is_valid(&code).await? {
            return Err(AppError::Validation(format!(
                "{} contains code that does not parse",
                path.display()
            )));
        }
        tracing::info!("Syntax check passed for {}", path.display());
    }

    if args.execute {
        execute(&document, settings, args.isolate_blocks).await?;
    }

    Ok(())
}

/// Runs the document as one program, or each block separately when `isolate` is set.
/// Child output is forwarded to our stdout/stderr.
async fn execute(document: &ExtractedDocument, settings: &Settings, isolate: bool) -> Result<(), AppError> {
    let runner = ScriptRunner::from_settings(&settings.runner);

    let programs: Vec<(String, String)> = if isolate {
        document
            .blocks
            .iter()
            .map(|block| (format!("block {}", block.number), block.code()))
            .collect()
    } else {
        vec![("document".to_string(), document.render(&settings.runner.label_prefix))]
    };

    for (name, code) in programs {
        let output = runner.run(&code).await?;
        print!("{}", output.stdout);
        eprint!("{}", output.stderr);
        std::io::stdout().flush()?;

        if !output.success() {
            let status = output
                .exit_code
                .map_or_else(|| "a signal".to_string(), |code| format!("exit code {}", code));
            return Err(AppError::Execution(format!(
                "{} of {} failed under {} with {}",
                name,
                document.source_name,
                runner.binary(),
                status
            )));
        }
    }

    Ok(())
}
