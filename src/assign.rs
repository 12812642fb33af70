use crate::{squared_distance, Centroid, CentroidId, Partition, Point};

/// Returns the centroid nearest to `point`, or `None` if `centroids` is empty.
///
/// If several centroids are equally near, the one with the lowest [`CentroidId`]
/// (that is, the first in `centroids`) is returned.
#[inline]
#[must_use]
pub fn nearest_centroid(centroids: &[Centroid], point: Point) -> Option<CentroidId> {
    // min_by_key keeps the first of equal minimums
    centroids
        .iter()
        .enumerate()
        .min_by_key(|(_, centroid)| squared_distance(point, centroid.position()))
        .map(|(i, _)| CentroidId::new_unchecked(i))
}

/// Partitions `points` by their nearest centroid.
///
/// The returned [`Partition`] has one cluster per centroid (empty clusters included),
/// and each point index appears in exactly one cluster.
/// Ties are broken deterministically as in [`nearest_centroid`],
/// so calling this again on unchanged inputs gives the same partition.
///
/// This runs in `O(points.len() * centroids.len())` time.
///
/// If `centroids` is empty, no point can be assigned and the partition will have no clusters.
/// [`Lloyd`](crate::Lloyd) rules this out up front.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn assign(centroids: &[Centroid], points: &[Point]) -> Partition {
    let mut partition = Partition::empty(centroids.len());
    for (i, &point) in points.iter().enumerate() {
        if let Some(nearest) = nearest_centroid(centroids, point) {
            partition.push(nearest, i as u32);
        }
    }
    partition
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{distance, tests::*, Bounds};
    use ordered_float::OrderedFloat;

    fn id(i: usize) -> CentroidId {
        CentroidId::new_unchecked(i)
    }

    #[test]
    fn empty_points() {
        let centroids = centroids_at(&[(1, 1), (2, 2), (3, 3)]);
        let partition = assign(&centroids, &[]);
        assert_eq!(partition.num_clusters(), 3);
        assert!(partition.clusters().all(|(_, members)| members.is_empty()));
    }

    #[test]
    fn single_centroid_takes_everything() {
        let centroids = centroids_at(&[(100, 100)]);
        let points = points_at(&[(0, 0), (10, 0), (5, 10)]);
        let partition = assign(&centroids, &points);
        assert_eq!(partition.members(id(0)), &[0, 1, 2]);
    }

    #[test]
    fn splits_between_two_centroids() {
        let centroids = centroids_at(&[(0, 0), (100, 0)]);
        let points = points_at(&[(10, 0), (90, 0)]);
        let partition = assign(&centroids, &points);
        assert_eq!(partition.members(id(0)), &[0]);
        assert_eq!(partition.members(id(1)), &[1]);
    }

    #[test]
    fn ties_go_to_lowest_id() {
        let points = points_at(&[(5, 0), (5, 7)]);

        let centroids = centroids_at(&[(0, 0), (10, 0)]);
        assert_eq!(assign(&centroids, &points).members(id(0)), &[0, 1]);

        let centroids = centroids_at(&[(10, 0), (0, 0)]);
        assert_eq!(assign(&centroids, &points).members(id(0)), &[0, 1]);

        // coincident centroids: the later one never gets any members
        let centroids = centroids_at(&[(3, 3), (3, 3)]);
        let partition = assign(&centroids, &points);
        assert_eq!(partition.members(id(0)), &[0, 1]);
        assert!(partition.members(id(1)).is_empty());
    }

    #[test]
    fn repeated_calls_agree() {
        let bounds = Bounds::default();
        let centroids = test_centroids(13, bounds);
        let points = test_points(1024, bounds);
        assert_eq!(assign(&centroids, &points), assign(&centroids, &points));
    }

    #[test]
    fn partition_is_total() {
        let bounds = Bounds::default();
        let points = test_points(1024, bounds);
        for k in [1, 2, 7, 64] {
            let partition = assign(&test_centroids(k, bounds), &points);
            assert_eq!(partition.num_clusters(), k);
            assert!(partition.is_total(points.len()));
        }
    }

    #[test]
    fn naive_nearest_neighbor_oracle() {
        let bounds = Bounds::default();
        let centroids = test_centroids(37, bounds);
        let points = test_points(1024, bounds);
        let partition = assign(&centroids, &points);

        for (assigned, members) in partition.clusters() {
            for &i in members {
                let point = points[i as usize];
                let nearest = centroids
                    .iter()
                    .map(|c| OrderedFloat(distance(point, c.position())))
                    .min()
                    .unwrap();

                let actual = OrderedFloat(distance(point, centroids[assigned.index()].position()));
                assert_eq!(actual, nearest);

                // nothing strictly nearer exists, and no earlier centroid ties
                for (j, other) in centroids.iter().enumerate().take(assigned.index()) {
                    assert!(
                        squared_distance(point, other.position())
                            > squared_distance(point, centroids[assigned.index()].position()),
                        "point {i} should go to centroid {j}"
                    );
                }
            }
        }
    }
}
