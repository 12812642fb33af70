//! A small, deterministic engine for Lloyd's k-means clustering over 2D points,
//! built to visualize every iteration of the algorithm.
//!
//! The core alternates two steps until the centroids stop moving:
//! - [`assign`] partitions the points by their nearest centroid, and
//! - [`update`] moves each centroid to the truncated mean of its members.
//!
//! [`Lloyd`] drives these steps and hands each [`Partition`] to a [`RenderSink`]
//! between the assignment and the update, so a renderer can draw every frame.
//!
//! # Features
//! - `image`: enables the [`Canvas`] sink, which rasterizes each frame into an `image::RgbImage`.
//!
//! # Example
//! ```
//! # use lloyd::{ClusterCount, ConfigError, Frame, LloydOptions, Termination};
//! # fn main() -> Result<(), ConfigError> {
//! let mut kmeans = LloydOptions::new()
//!     .bounds((640, 480).try_into()?)
//!     .k(ClusterCount::try_from(4u16)?)
//!     .num_points(500)
//!     .seed(42)
//!     .generate()?;
//!
//! let mut frames = 0;
//! let summary = kmeans.run(&mut |_: &Frame<'_>| frames += 1);
//!
//! // one frame per iteration, plus the final render
//! assert_eq!(frames, summary.iterations + 1);
//! assert!(matches!(summary.termination, Termination::Converged | Termination::Cycle { .. }));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::wildcard_imports
)]

mod assign;
mod generate;
mod geometry;
mod lloyd;
mod options;
mod partition;
mod render;
mod types;
mod update;

#[cfg(feature = "image")]
mod canvas;

pub use assign::*;
pub use generate::*;
pub use geometry::*;
pub use lloyd::*;
pub use options::*;
pub use partition::*;
pub use render::*;
pub use types::*;
pub use update::*;

#[cfg(feature = "image")]
pub use canvas::Canvas;

/// The maximum supported number of clusters is `u16::MAX`.
pub const MAX_CLUSTERS: u16 = u16::MAX;

/// The maximum supported number of points is `u32::MAX`.
pub const MAX_POINTS: u32 = u32::MAX;

/// The maximum supported number of pixels in a rendered image is `2^26`,
/// e.g., a little over 8192 by 8192.
pub const MAX_PIXELS: u32 = 1 << 26;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use palette::Srgb;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoroshiro128PlusPlus;

    pub fn test_points(n: usize, bounds: Bounds) -> Vec<Point> {
        let mut rng = Xoroshiro128PlusPlus::seed_from_u64(0);
        (0..n)
            .map(|_| {
                Point::new(
                    rng.gen_range(0..bounds.width()),
                    rng.gen_range(0..bounds.height()),
                )
            })
            .collect()
    }

    pub fn test_centroids(k: usize, bounds: Bounds) -> Vec<Centroid> {
        let mut rng = Xoroshiro128PlusPlus::seed_from_u64(1);
        (0..k)
            .map(|_| {
                let position = Point::new(
                    rng.gen_range(0..bounds.width()),
                    rng.gen_range(0..bounds.height()),
                );
                Centroid::new(position, Srgb::from(rng.gen::<[u8; 3]>()))
            })
            .collect()
    }

    pub fn centroids_at(positions: &[(u32, u32)]) -> Vec<Centroid> {
        positions
            .iter()
            .map(|&position| Centroid::new(position.into(), Srgb::new(0, 0, 0)))
            .collect()
    }

    pub fn points_at(positions: &[(u32, u32)]) -> Vec<Point> {
        positions.iter().copied().map(Point::from).collect()
    }

    pub fn positions(centroids: &[Centroid]) -> Vec<(u32, u32)> {
        centroids.iter().map(|c| c.position().into()).collect()
    }
}
