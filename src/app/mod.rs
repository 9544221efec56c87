mod renderer;

use std::{
    io::{Stdout, Write},
    sync::mpsc::Receiver,
    time::Duration,
};

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color, Stylize},
};

use mazetree::{
    MazeError,
    generators::{BranchPolicy, Generation, GeneratorConfig, generate, generate_with_snapshots, get_rng},
    maze::{CellId, Grid},
    snapshot::OwnedSnapshot,
    solvers::{Path, solve},
};

use renderer::Board;

/// What to generate and solve, as requested on the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Barrier grid size; the maze has `size - 1` cells per side
    pub size: usize,
    pub policy: BranchPolicy,
    pub seed: Option<u64>,
    pub max_iterations: Option<usize>,
    pub start: CellId,
    /// Defaults to the bottom-right cell
    pub end: Option<CellId>,
    /// Replay generation snapshots before drawing the result
    pub animate: bool,
    pub snapshot_every: usize,
}

pub struct App {
    /// Time to wait between animation frames
    frame_delay: Duration,
    /// Maximum number of snapshots to buffer in the channel between compute and render threads
    max_snapshots_in_channel: usize,
}

impl Default for App {
    fn default() -> Self {
        Self {
            frame_delay: Duration::from_millis(40),
            max_snapshots_in_channel: 1000,
        }
    }
}

fn invalid_input(err: MazeError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
}

impl App {
    pub fn with_frame_delay(mut self, frame_delay: Duration) -> Self {
        self.frame_delay = frame_delay;
        self
    }

    /// Generate the maze, solve it and draw the result.
    pub fn run(&self, stdout: &mut Stdout, options: &RunOptions) -> std::io::Result<()> {
        let grid = Grid::from_barrier_size(options.size).map_err(invalid_input)?;
        let end = options.end.unwrap_or(grid.last_cell());
        // Reject bad endpoints before spending time on generation
        grid.check(options.start).map_err(invalid_input)?;
        grid.check(end).map_err(invalid_input)?;

        let config = GeneratorConfig {
            policy: options.policy,
            max_iterations: options.max_iterations,
            snapshot_every: if options.animate {
                options.snapshot_every
            } else {
                0
            },
        };
        tracing::info!(
            "[app] Generating {}x{} barrier grid -> {}x{} cell grid with policy {}",
            grid.barrier_size(),
            grid.barrier_size(),
            grid.side(),
            grid.side(),
            config.policy
        );

        let generation = if options.animate {
            self.generate_animated(stdout, grid, config, options.seed)?
        } else {
            generate(grid, &config, &mut get_rng(options.seed))
        };
        tracing::info!(
            "[app] Maze generation complete: {} nodes, {} edges, {} iterations",
            generation.maze.node_count(),
            generation.maze.edge_count(),
            generation.iterations
        );

        let incomplete = generation.ensure_complete().err();
        if let Some(err) = &incomplete {
            tracing::warn!("[app] {}", err);
        }

        let path = match solve(&generation.maze, options.start, end) {
            Ok(path) => {
                tracing::info!("[app] Found path with {} steps", path.edge_count());
                Some(path)
            }
            Err(err) if err.is_not_found() => {
                tracing::info!("[app] {}", err);
                None
            }
            Err(err) => return Err(invalid_input(err)),
        };

        let mut board = Board::from_maze(&generation.maze);
        if let Some(path) = &path {
            board.mark_route(path);
        }
        if options.animate {
            renderer::draw_frame(stdout, &board)?;
        } else {
            renderer::draw(stdout, &board)?;
        }

        App::print_summary(stdout, &generation, path.as_ref(), incomplete.as_ref())
    }

    /// Generate with a live animation when the board fits the terminal,
    /// and without snapshots otherwise.
    fn generate_animated(
        &self,
        stdout: &mut Stdout,
        grid: Grid,
        config: GeneratorConfig,
        seed: Option<u64>,
    ) -> std::io::Result<Generation> {
        if !renderer::fits_terminal(grid)? {
            tracing::warn!("[app] Terminal too small for animation, drawing final maze only");
            return Ok(generate(grid, &config, &mut get_rng(seed)));
        }
        self.animate_generation(stdout, grid, config, seed)
    }

    /// Run generation on a compute thread and draw its snapshots as they arrive.
    fn animate_generation<W: Write>(
        &self,
        out: &mut W,
        grid: Grid,
        config: GeneratorConfig,
        seed: Option<u64>,
    ) -> std::io::Result<Generation> {
        let (snapshot_tx, snapshot_rx) =
            std::sync::mpsc::sync_channel::<OwnedSnapshot>(self.max_snapshots_in_channel);

        let compute_thread_handle = std::thread::spawn(move || {
            let mut rng = get_rng(seed);
            let mut snapshot_tx = snapshot_tx;
            generate_with_snapshots(grid, &config, &mut rng, &mut snapshot_tx)
            // snapshot_tx is dropped here, which ends the render loop below
        });

        let frames = self.play_snapshots(out, grid, snapshot_rx)?;
        tracing::debug!("[app] Rendered {} animation frames", frames);

        compute_thread_handle
            .join()
            .map_err(|_| std::io::Error::other("generation thread panicked"))
    }

    /// Draw snapshots until the sender hangs up, with the cursor hidden.
    /// The cursor is shown again even if drawing fails.
    fn play_snapshots<W: Write>(
        &self,
        out: &mut W,
        grid: Grid,
        snapshot_rx: Receiver<OwnedSnapshot>,
    ) -> std::io::Result<usize> {
        queue!(out, cursor::Hide)?;
        let mut frames = 0usize;
        let rendered = snapshot_rx.iter().try_for_each(|snapshot| {
            renderer::draw_frame(out, &Board::from_snapshot(grid, &snapshot))?;
            frames += 1;
            std::thread::sleep(self.frame_delay);
            Ok::<_, std::io::Error>(())
        });
        // Dropping the receiver lets the compute thread finish on its own
        drop(snapshot_rx);
        let restored = queue!(out, cursor::Show).and_then(|_| out.flush());
        rendered?;
        restored?;
        Ok(frames)
    }

    fn print_summary(
        stdout: &mut Stdout,
        generation: &Generation,
        path: Option<&Path>,
        incomplete: Option<&MazeError>,
    ) -> std::io::Result<()> {
        let side = generation.maze.side();
        queue!(
            stdout,
            style::PrintStyledContent(
                format!("Random maze ({}x{})\r\n", side, side)
                    .with(Color::Yellow)
                    .attribute(Attribute::Bold)
            ),
        )?;
        if let Some(err) = incomplete {
            queue!(
                stdout,
                style::PrintStyledContent(format!("Warning: {}\r\n", err).with(Color::Magenta)),
            )?;
        }
        let msg = match path {
            Some(path) => format!("Path found ({} steps): {}\r\n", path.edge_count(), path)
                .with(Color::Green)
                .attribute(Attribute::Bold),
            None => "No path found.\r\n"
                .to_string()
                .with(Color::Red)
                .attribute(Attribute::Bold),
        };
        queue!(stdout, style::PrintStyledContent(msg))?;
        stdout.flush()
    }
}
