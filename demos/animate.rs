#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice
)]

use std::{
    error::Error,
    num::NonZeroU32,
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use clap::Parser;
use image::ImageError;
use lloyd::{Bounds, Canvas, ClusterCount, Frame, LloydOptions, RenderSink, Termination};

#[derive(Parser)]
struct Options {
    /// Directory to write one PNG per frame into.
    output: PathBuf,

    #[arg(short, long, default_value_t = ClusterCount::default(), value_parser = parse_cluster_count)]
    k: ClusterCount,

    #[arg(short, long, default_value_t = 200)]
    points: u32,

    #[arg(long, default_value_t = 300)]
    width: u32,

    #[arg(long, default_value_t = 300)]
    height: u32,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long)]
    max_iterations: Option<NonZeroU32>,

    #[arg(long)]
    no_cycle_detection: bool,

    /// Milliseconds to wait between frames.
    #[arg(long, default_value_t = 0)]
    delay: u64,

    #[arg(long)]
    verbose: bool,
}

fn parse_cluster_count(s: &str) -> Result<ClusterCount, String> {
    let value: u16 = s.parse().map_err(|e| format!("{e}"))?;
    value.try_into().map_err(|e| format!("{e}"))
}

/// Draws every frame and saves it as a numbered PNG.
struct PngFrames {
    canvas: Canvas,
    dir: PathBuf,
    delay: Duration,
    written: u32,
    error: Option<ImageError>,
}

impl RenderSink for PngFrames {
    fn render(&mut self, frame: &Frame<'_>) {
        if self.error.is_some() {
            return;
        }

        self.canvas.draw(frame);

        let name = if frame.is_final {
            "final.png".to_owned()
        } else {
            format!("frame_{:04}.png", frame.iteration)
        };

        match self.canvas.image().save(self.dir.join(name)) {
            Ok(()) => self.written += 1,
            Err(e) => self.error = Some(e),
        }
    }

    fn pace(&mut self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let Options {
        output,
        k,
        points,
        width,
        height,
        seed,
        max_iterations,
        no_cycle_detection,
        delay,
        verbose,
    } = Options::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    macro_rules! log {
        ($name: literal, $val: expr) => {
            if verbose {
                let time = Instant::now();
                let value = $val;
                println!("{} took {}ms", $name, time.elapsed().as_millis());
                value
            } else {
                $val
            }
        };
    }

    let bounds = Bounds::try_from((width, height))?;
    std::fs::create_dir_all(&output)?;

    let mut kmeans = log!(
        "generate",
        LloydOptions::new()
            .bounds(bounds)
            .k(k)
            .num_points(points)
            .seed(seed)
            .max_iterations(max_iterations)
            .detect_cycles(!no_cycle_detection)
            .generate()?
    );

    let mut frames = PngFrames {
        canvas: Canvas::new(bounds)?,
        dir: output,
        delay: Duration::from_millis(delay),
        written: 0,
        error: None,
    };

    let summary = log!("run", kmeans.run(&mut frames));

    if let Some(error) = frames.error {
        return Err(error.into());
    }

    let outcome = match summary.termination {
        Termination::Converged => "converged".to_owned(),
        Termination::Cycle { period } => format!("stopped on a cycle of period {period}"),
        Termination::IterationLimit => "stopped at the iteration limit".to_owned(),
    };

    println!(
        "{outcome} after {} iterations, wrote {} frames to {}",
        summary.iterations,
        frames.written,
        frames.dir.display()
    );

    for (centroid, count) in kmeans.centroids().iter().zip(kmeans.partition().counts()) {
        println!("{} 0x{:X} {count}", centroid.position(), centroid.color());
    }

    Ok(())
}
