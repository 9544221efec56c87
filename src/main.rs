mod app;

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use app::{App, RunOptions};
use mazetree::generators::BranchPolicy;

/// Generate a perfect maze by randomized depth-first search and solve it.
#[derive(Debug, Parser)]
#[command(name = "mazetree", version, about)]
struct Cli {
    /// Barrier grid size n; the maze has n - 1 cells per side
    #[arg(short = 'n', long, default_value_t = 11)]
    size: usize,

    /// Branch point to resume from after a dead end: first, middle or last
    #[arg(short, long, default_value_t = BranchPolicy::Middle)]
    policy: BranchPolicy,

    /// Seed for reproducible mazes
    #[arg(short, long)]
    seed: Option<u64>,

    /// Safety bound on generation loop iterations (default: 4 per cell)
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Start cell id (1-based, row-major)
    #[arg(long, default_value_t = 1)]
    start: usize,

    /// End cell id (default: bottom-right cell)
    #[arg(long)]
    end: Option<usize>,

    /// Replay the generation on the terminal before drawing the result
    #[arg(short, long)]
    animate: bool,

    /// Take a generation snapshot every k-th step when animating
    #[arg(long, default_value_t = 2)]
    snapshot_every: usize,

    /// Delay between animation frames in milliseconds
    #[arg(long, default_value_t = 40)]
    frame_delay_ms: u64,

    /// File to write logs to
    #[arg(long, default_value = "mazetree.log")]
    log_file: PathBuf,

    /// Maximum log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = tracing::Level::INFO)]
    log_level: tracing::Level,
}

/// Send logs to a file so they do not interleave with the maze on the terminal.
/// The returned guard flushes the writer when dropped.
fn init_logging(cli: &Cli) -> std::io::Result<WorkerGuard> {
    let file_name = cli.log_file.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("log file path {:?} has no file name", cli.log_file),
        )
    })?;
    let directory = match cli.log_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(cli.log_level)
        .init();
    Ok(guard)
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli)?;

    let options = RunOptions {
        size: cli.size,
        policy: cli.policy,
        seed: cli.seed,
        max_iterations: cli.max_iterations,
        start: cli.start,
        end: cli.end,
        animate: cli.animate,
        snapshot_every: cli.snapshot_every,
    };
    let app = App::default().with_frame_delay(Duration::from_millis(cli.frame_delay_ms));

    let mut stdout = std::io::stdout();
    if let Err(err) = app.run(&mut stdout, &options) {
        tracing::error!("[main] {}", err);
        return Err(err);
    }
    Ok(())
}
