use std::time::{Duration, Instant};

use mazetree::{
    generators::{BranchPolicy, GeneratorConfig, generate, get_rng},
    maze::Grid,
    solvers::solve_corners,
};

const BARRIER_SIZE: usize = u8::MAX as usize;

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());

    let grid = Grid::from_barrier_size(BARRIER_SIZE)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    println!(
        "Profiling {} iteration(s) on a {}x{} cell grid",
        num_iters,
        grid.side(),
        grid.side()
    );

    for policy in BranchPolicy::ALL {
        let config = GeneratorConfig::with_policy(policy);
        let mut rng = get_rng(seed);
        let mut generate_time = Duration::ZERO;
        let mut solve_time = Duration::ZERO;
        let mut total_path_len = 0;

        for _ in 0..num_iters {
            let started = Instant::now();
            let generation = generate(grid, &config, &mut rng);
            generate_time += started.elapsed();
            if let Err(err) = generation.ensure_complete() {
                tracing::warn!("[profile] {}", err);
            }

            let started = Instant::now();
            match solve_corners(&generation.maze) {
                Ok(path) => total_path_len += path.edge_count(),
                Err(err) => tracing::warn!("[profile] {}", err),
            }
            solve_time += started.elapsed();
        }

        let runs = num_iters.max(1) as u32;
        println!(
            "{}: generate {:.3?}/run, solve {:.3?}/run, mean path {} steps",
            policy,
            generate_time / runs,
            solve_time / runs,
            total_path_len / num_iters.max(1)
        );
    }
    Ok(())
}
