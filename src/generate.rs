use crate::{Bounds, Centroid, ClusterCount, Point};

use palette::Srgb;
use rand::{prelude::Distribution, SeedableRng};
use rand_distr::Uniform;
use rand_xoshiro::Xoroshiro128PlusPlus;

/// Samples points uniformly from the given [`Bounds`].
#[derive(Debug, Clone)]
struct PointDistribution {
    /// Distribution of `x` over `[0, width)`.
    x: Uniform<u32>,
    /// Distribution of `y` over `[0, height)`.
    y: Uniform<u32>,
}

impl PointDistribution {
    /// Creates a new uniform distribution over `bounds`.
    fn new(bounds: Bounds) -> Self {
        // non-empty by construction of Bounds
        Self {
            x: Uniform::new(0, bounds.width()),
            y: Uniform::new(0, bounds.height()),
        }
    }
}

impl Distribution<Point> for PointDistribution {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Point {
        Point::new(self.x.sample(rng), self.y.sample(rng))
    }
}

/// Generates `k` random centroids and `num_points` random points.
///
/// Every coordinate is drawn uniformly from `bounds`, and every centroid color
/// is drawn uniformly from the RGB color cube. Centroids may coincide with each
/// other or with points. The same `seed` always produces the same state.
///
/// # Examples
/// ```
/// # use lloyd::{generate_initial_state, Bounds, ClusterCount};
/// let bounds = Bounds::default();
/// let (centroids, points) = generate_initial_state(bounds, ClusterCount::ONE, 100, 7);
/// assert_eq!(centroids.len(), 1);
/// assert!(points.iter().all(|&p| bounds.contains(p)));
/// ```
#[must_use]
pub fn generate_initial_state(
    bounds: Bounds,
    k: ClusterCount,
    num_points: u32,
    seed: u64,
) -> (Vec<Centroid>, Vec<Point>) {
    let rng = &mut Xoroshiro128PlusPlus::seed_from_u64(seed);
    let positions = PointDistribution::new(bounds);
    let channel = Uniform::new_inclusive(u8::MIN, u8::MAX);

    let centroids = (0..k.into_inner())
        .map(|_| {
            let position = positions.sample(rng);
            let color = Srgb::new(channel.sample(rng), channel.sample(rng), channel.sample(rng));
            Centroid::new(position, color)
        })
        .collect();

    let points = positions.sample_iter(rng).take(num_points as usize).collect();

    (centroids, points)
}
