use crate::{generate_initial_state, Bounds, Centroid, ClusterCount, ConfigError, Lloyd};

use std::num::NonZeroU32;

/// A builder struct to specify the parameters of a randomly initialized [`Lloyd`] run.
///
/// # Examples
/// ```
/// # use lloyd::{LloydOptions, ClusterCount, ConfigError};
/// # fn main() -> Result<(), ConfigError> {
/// let lloyd = LloydOptions::new()
///     .k(ClusterCount::try_from(3u16)?)
///     .num_points(1000)
///     .seed(42)
///     .generate()?;
///
/// assert_eq!(lloyd.centroids().len(), 3);
/// assert_eq!(lloyd.points().len(), 1000);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LloydOptions {
    /// The coordinate space to draw points and centroids from.
    bounds: Bounds,
    /// The number of centroids to generate.
    k: ClusterCount,
    /// The number of points to generate.
    num_points: u32,
    /// The seed value for the random number generator.
    seed: u64,
    /// Centroids to use instead of random ones.
    initial_centroids: Option<Vec<Centroid>>,
    /// The maximum number of iterations, if any.
    max_iterations: Option<NonZeroU32>,
    /// Whether to stop on revisited centroid positions.
    detect_cycles: bool,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl LloydOptions {
    /// Creates a new [`LloydOptions`] with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bounds: Bounds::SQUARE_300,
            k: ClusterCount::from_clamped(5),
            num_points: 200,
            seed: 0,
            initial_centroids: None,
            max_iterations: None,
            detect_cycles: true,
        }
    }

    /// Sets the coordinate space that points and centroids are drawn from.
    ///
    /// The default is 300 by 300.
    #[must_use]
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Sets the number of clusters.
    ///
    /// This is ignored if [`LloydOptions::initial_centroids`] are provided.
    ///
    /// The default is `5`.
    #[must_use]
    pub fn k(mut self, k: ClusterCount) -> Self {
        self.k = k;
        self
    }

    /// Sets the number of points to generate.
    ///
    /// The default is `200`.
    #[must_use]
    pub fn num_points(mut self, num_points: u32) -> Self {
        self.num_points = num_points;
        self
    }

    /// Sets the seed value for the random number generator.
    ///
    /// The default seed is `0`.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the initial centroids, replacing the randomly generated ones.
    ///
    /// Points are still generated randomly.
    #[must_use]
    pub fn initial_centroids(mut self, centroids: Vec<Centroid>) -> Self {
        self.initial_centroids = Some(centroids);
        self
    }

    /// Sets the maximum number of iterations (see [`Lloyd::max_iterations`]).
    ///
    /// The default is no limit.
    #[must_use]
    pub fn max_iterations(mut self, max_iterations: Option<NonZeroU32>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets whether to stop on cycles (see [`Lloyd::detect_cycles`]).
    ///
    /// The default is `true`.
    #[must_use]
    pub fn detect_cycles(mut self, detect_cycles: bool) -> Self {
        self.detect_cycles = detect_cycles;
        self
    }

    /// Generates the initial state and returns a [`Lloyd`] loop ready to run.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroClusters`] or [`ConfigError::TooManyClusters`]
    /// if the provided [`LloydOptions::initial_centroids`] are empty or too many.
    pub fn generate(self) -> Result<Lloyd, ConfigError> {
        let Self {
            bounds,
            k,
            num_points,
            seed,
            initial_centroids,
            max_iterations,
            detect_cycles,
        } = self;

        let (centroids, points) = generate_initial_state(bounds, k, num_points, seed);
        let centroids = initial_centroids.unwrap_or(centroids);

        log::info!(
            "generated {} centroids and {} points in {bounds} (seed {seed})",
            centroids.len(),
            points.len(),
        );

        Ok(Lloyd::new(centroids, points)?
            .max_iterations(max_iterations)
            .detect_cycles(detect_cycles))
    }
}
