use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use posepilot::{app, ControlSender, NullSink, PosepilotConfig, SessionStats, SkeletonSource};

#[derive(Parser, Debug)]
#[command(name = "posepilot")]
#[command(about = "Body-motion flight controller streaming pose-driven wing and body commands")]
#[command(version)]
#[command(long_about = "Reads newline-delimited JSON skeleton frames from a pose-estimation \
pipeline, interprets jump and orientation gestures together with arm geometry, and streams \
six-field control records to a simulated actuator over a persistent TCP connection.")]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "posepilot.toml",
        help = "Path to TOML configuration file"
    )]
    config: String,

    /// Skeleton frame input (stdin when omitted)
    #[arg(short, long, help = "Skeleton frame file to read instead of stdin")]
    input: Option<String>,

    /// Enable debug logging (most verbose)
    #[arg(short, long, help = "Enable debug level logging")]
    debug: bool,

    /// Enable verbose logging (info level)
    #[arg(short, long, help = "Enable verbose info level logging")]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, help = "Enable quiet mode - only log errors")]
    quiet: bool,

    /// Validate configuration and exit
    #[arg(long, help = "Validate configuration file and exit without starting")]
    validate_config: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in TOML format and exit")]
    print_config: bool,

    /// Interpret frames but discard control records instead of sending
    #[arg(long, help = "Process frames without connecting to the actuator")]
    dry_run: bool,

    /// Override log format (json, pretty, compact)
    #[arg(
        long,
        value_name = "FORMAT",
        help = "Log output format: json, pretty, or compact"
    )]
    log_format: Option<String>,

    /// Append logs to a file instead of stderr
    #[arg(long, value_name = "PATH", help = "Write logs to the given file")]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Handle special modes that don't require full initialization
    if args.print_config {
        print_default_config()?;
        return Ok(());
    }

    // Initialize logging; the guard must live until exit so buffered file
    // logs are flushed.
    let _log_guard = init_logging(&args)?;

    info!("Starting posepilot v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration file: {}", args.config);

    // Load and validate configuration
    let config = match PosepilotConfig::load_from_file(&args.config) {
        Ok(config) => {
            info!("Configuration loaded successfully from: {}", args.config);
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Validate configuration if requested
    if args.validate_config {
        match config.validate() {
            Ok(()) => {
                info!("Configuration validation successful");
                println!("✓ Configuration is valid");
                return Ok(());
            }
            Err(e) => {
                error!("Configuration validation failed: {}", e);
                eprintln!("✗ Configuration validation failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    let stats = match args.input.as_deref() {
        Some(path) => {
            let mut source = SkeletonSource::open(path).await?;
            run_session(&config, &mut source, args.dry_run).await?
        }
        None => {
            let mut source = SkeletonSource::from_stdin();
            run_session(&config, &mut source, args.dry_run).await?
        }
    };

    info!(
        "Done: {} frames processed, {} control records sent",
        stats.frames_processed, stats.frames_sent
    );
    Ok(())
}

async fn run_session<R>(
    config: &PosepilotConfig,
    source: &mut SkeletonSource<R>,
    dry_run: bool,
) -> Result<SessionStats>
where
    R: tokio::io::AsyncRead + Unpin,
{
    if dry_run {
        info!("Dry run - control records will be discarded");
        let mut sink = NullSink::default();
        Ok(app::run(config, source, &mut sink).await?)
    } else {
        let mut sink = ControlSender::connect(config.sender.clone()).await;
        Ok(app::run(config, source, &mut sink).await?)
    }
}

fn init_logging(args: &Args) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    use tracing_subscriber::fmt::writer::BoxMakeWriter;
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    // Determine log level based on flags
    let log_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };

    // Create environment filter
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("posepilot={}", log_level)));

    // Route output to stderr or an appended log file
    let (writer, guard) = match args.log_file.as_deref() {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    // Configure format based on options
    let fmt_layer = match args.log_format.as_deref() {
        Some("json") => fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        Some("compact") => fmt::layer()
            .compact()
            .with_writer(writer)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed(),
        Some("pretty") | None => fmt::layer()
            .pretty()
            .with_writer(writer)
            .with_target(true)
            .with_thread_ids(args.debug)
            .with_file(args.debug)
            .with_line_number(args.debug)
            .boxed(),
        Some(format) => {
            eprintln!("Warning: Unknown log format '{}', using default", format);
            fmt::layer().with_writer(writer).boxed()
        }
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .init();

    Ok(guard)
}

/// Print default configuration in TOML format
fn print_default_config() -> Result<()> {
    let rendered = toml::to_string_pretty(&PosepilotConfig::default())?;
    println!("# Posepilot configuration file");
    println!("# Defaults shown; any field may be omitted");
    println!();
    println!("{}", rendered);
    Ok(())
}
