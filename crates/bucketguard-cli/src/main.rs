//! CLI entry point for bucketguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `bucketguard-app` crate.

use anyhow::Context;
use bucketguard_app::{
    format_explanation, format_not_found, load_config, run_audit, run_check, run_explain,
    verdict_exit_code, AuditInput, ExplainOutput,
};
use bucketguard_render::{
    AccessBlockColumns, CollectSink, JsonLinesSink, ReportSink, TsvColumns, TsvSink,
};
use bucketguard_settings::{BucketguardConfigV1, Overrides};
use bucketguard_source::{BucketPolicySource, DirectorySource};
use bucketguard_types::AuditReport;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "bucketguard",
    version,
    about = "Audit S3 bucket policies for anonymous read access"
)]
struct Cli {
    /// Path to bucketguard config TOML. A missing file means defaults.
    #[arg(long, default_value = "bucketguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|report).
    #[arg(long)]
    profile: Option<String>,

    /// Where bucket policies come from.
    #[arg(long, value_enum, default_value_t = SourceKind::Dir)]
    source: SourceKind,

    /// Directory holding `<bucket>.json` policies and `access-block/<bucket>.json` access blocks.
    #[arg(long, default_value = ".")]
    policy_dir: Utf8PathBuf,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    /// Policy snapshot directory.
    Dir,
    /// Live GetBucketPolicy calls (requires the `aws` feature).
    S3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Tsv,
    Jsonl,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AccessBlockStyle {
    /// One column per flag.
    Flags,
    /// `PublicAccessBlock` (SET / NOT SET / ERROR) and `HasBucketPolicy` columns.
    Summary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SchemaKind {
    Config,
    Report,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify buckets and print one row per bucket.
    Audit {
        /// Buckets to audit. Defaults to every policy in --policy-dir.
        buckets: Vec<String>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Tsv)]
        format: Format,

        /// Also report each bucket's public access block flags.
        #[arg(long)]
        access_block: bool,

        /// How access block columns are shown in TSV output.
        #[arg(long, value_enum, default_value_t = AccessBlockStyle::Flags)]
        access_block_style: AccessBlockStyle,
    },

    /// Classify a single bucket and print a sentence.
    Check {
        bucket: String,
    },

    /// Explain a classification code.
    Explain {
        /// The code (e.g., "publicly_readable") to explain.
        identifier: String,
    },

    /// Print the JSON schema of the config file or the JSON report.
    Schema {
        #[arg(value_enum)]
        kind: SchemaKind,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let result = match &cli.cmd {
        Commands::Audit {
            buckets,
            format,
            access_block,
            access_block_style,
        } => cmd_audit(&cli, buckets, *format, *access_block, *access_block_style),
        Commands::Check { bucket } => cmd_check(&cli, bucket),
        Commands::Explain { identifier } => cmd_explain(identifier),
        Commands::Schema { kind } => cmd_schema(*kind),
    };

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("bucketguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn cmd_audit(
    cli: &Cli,
    buckets: &[String],
    format: Format,
    access_block: bool,
    access_block_style: AccessBlockStyle,
) -> anyhow::Result<i32> {
    let overrides = Overrides {
        profile: cli.profile.clone(),
        access_block: access_block.then_some(true),
    };
    let config = load_config(&read_config(cli)?, overrides)?;
    debug!(
        profile = %config.effective.profile,
        access_block = config.effective.access_block,
        allow = config.effective.allow.len(),
        "resolved config"
    );

    let buckets = if buckets.is_empty() {
        discover(cli)?
    } else {
        buckets.to_vec()
    };
    let source = open_source(cli)?;

    let columns = TsvColumns {
        access_block: match (config.effective.access_block, access_block_style) {
            (false, _) => AccessBlockColumns::Off,
            (true, AccessBlockStyle::Flags) => AccessBlockColumns::Flags,
            (true, AccessBlockStyle::Summary) => AccessBlockColumns::Summary,
        },
    };

    let stdout = io::stdout().lock();
    let mut sink: Box<dyn ReportSink> = match format {
        Format::Tsv => Box::new(TsvSink::new(stdout, columns)),
        Format::Jsonl => Box::new(JsonLinesSink::new(stdout)),
        Format::Json => Box::new(CollectSink::default()),
    };

    let output = run_audit(
        AuditInput {
            buckets: &buckets,
            config: &config,
        },
        source.as_ref(),
        &mut sink,
    )?;

    if format == Format::Json {
        print_report(&output.report)?;
    }

    Ok(verdict_exit_code(output.report.verdict))
}

fn cmd_check(cli: &Cli, bucket: &str) -> anyhow::Result<i32> {
    let source = open_source(cli)?;
    let output = run_check(bucket, source.as_ref());
    println!("{}", output.sentence);
    Ok(0)
}

fn cmd_explain(identifier: &str) -> anyhow::Result<i32> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(0)
        }
        ExplainOutput::NotFound {
            identifier,
            available_codes,
        } => {
            eprint!("{}", format_not_found(&identifier, available_codes));
            Ok(1)
        }
    }
}

fn cmd_schema(kind: SchemaKind) -> anyhow::Result<i32> {
    let schema = match kind {
        SchemaKind::Config => schemars::schema_for!(BucketguardConfigV1),
        SchemaKind::Report => schemars::schema_for!(AuditReport),
    };
    let text = serde_json::to_string_pretty(&schema).context("serialize schema")?;
    println!("{text}");
    Ok(0)
}

fn read_config(cli: &Cli) -> anyhow::Result<String> {
    match std::fs::read_to_string(&cli.config) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(err).with_context(|| format!("read config: {}", cli.config)),
    }
}

fn discover(cli: &Cli) -> anyhow::Result<Vec<String>> {
    match cli.source {
        SourceKind::Dir => {
            let source = DirectorySource::new(cli.policy_dir.clone());
            let buckets = source
                .discover_buckets()
                .with_context(|| format!("discover buckets in {}", source.root()))?;
            debug!(root = %source.root(), buckets = buckets.len(), "discovered buckets");
            Ok(buckets)
        }
        SourceKind::S3 => anyhow::bail!("--source s3 needs at least one bucket name"),
    }
}

fn open_source(cli: &Cli) -> anyhow::Result<Box<dyn BucketPolicySource>> {
    match cli.source {
        SourceKind::Dir => {
            if !cli.policy_dir.is_dir() {
                anyhow::bail!("policy directory does not exist: {}", cli.policy_dir);
            }
            debug!(root = %cli.policy_dir, "using policy directory");
            Ok(Box::new(DirectorySource::new(cli.policy_dir.clone())))
        }
        SourceKind::S3 => open_s3(),
    }
}

#[cfg(feature = "aws")]
fn open_s3() -> anyhow::Result<Box<dyn BucketPolicySource>> {
    let source = bucketguard_source::S3Source::from_env().context("initialise S3 client")?;
    Ok(Box::new(source))
}

#[cfg(not(feature = "aws"))]
fn open_s3() -> anyhow::Result<Box<dyn BucketPolicySource>> {
    anyhow::bail!("this build has no S3 support; rebuild with `--features aws`")
}

fn print_report(report: &AuditReport) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(report).context("serialize report")?;
    println!("{text}");
    Ok(())
}
