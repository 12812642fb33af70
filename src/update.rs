use crate::{Centroid, Partition, Point};

/// Returns the truncated mean of the given points, or `None` if `members` is empty.
///
/// Each axis is averaged independently as `floor(sum / count)`.
///
/// # Panics
/// Panics if `members` contains an index outside of `points`.
#[must_use]
pub fn mean_position(points: &[Point], members: &[u32]) -> Option<Point> {
    if members.is_empty() {
        return None;
    }

    let (sum_x, sum_y) = members.iter().fold((0u64, 0u64), |(x, y), &i| {
        let point = points[i as usize];
        (x + u64::from(point.x), y + u64::from(point.y))
    });

    let count = members.len() as u64;

    // means of u32 values always fit back into u32
    #[allow(clippy::cast_possible_truncation)]
    let mean = Point::new((sum_x / count) as u32, (sum_y / count) as u32);

    Some(mean)
}

/// Moves every centroid to the truncated mean of its members in `partition`.
///
/// Centroids with no members stay where they are.
/// Returns whether any centroid's position changed.
///
/// `partition` must have been computed from `points` and these `centroids`,
/// e.g., by [`assign`](crate::assign).
///
/// # Panics
/// Panics if `partition` refers to a point index outside of `points`.
pub fn update(centroids: &mut [Centroid], points: &[Point], partition: &Partition) -> bool {
    debug_assert_eq!(centroids.len(), partition.num_clusters());

    let mut changed = false;
    for ((_, members), centroid) in partition.clusters().zip(centroids) {
        if let Some(mean) = mean_position(points, members) {
            changed |= centroid.move_to(mean);
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assign, tests::*, Bounds};

    #[test]
    fn moves_to_truncated_mean() {
        let mut centroids = centroids_at(&[(100, 100)]);
        let points = points_at(&[(0, 0), (10, 0), (5, 10)]);

        let partition = assign(&centroids, &points);
        assert!(update(&mut centroids, &points, &partition));
        assert_eq!(positions(&centroids), vec![(5, 3)]);

        let partition = assign(&centroids, &points);
        assert!(!update(&mut centroids, &points, &partition));
        assert_eq!(positions(&centroids), vec![(5, 3)]);
    }

    #[test]
    fn two_clusters_converge_in_one_step() {
        let mut centroids = centroids_at(&[(0, 0), (100, 0)]);
        let points = points_at(&[(10, 0), (90, 0)]);

        let partition = assign(&centroids, &points);
        assert!(update(&mut centroids, &points, &partition));
        assert_eq!(positions(&centroids), vec![(10, 0), (90, 0)]);

        let next = assign(&centroids, &points);
        assert_eq!(next, partition);
        assert!(!update(&mut centroids, &points, &next));
    }

    #[test]
    fn empty_clusters_stay_put() {
        let mut centroids = centroids_at(&[(0, 0), (1000, 1000)]);
        let points = points_at(&[(1, 1), (3, 2)]);

        let partition = assign(&centroids, &points);
        assert!(partition.members(crate::CentroidId::new_unchecked(1)).is_empty());
        assert!(update(&mut centroids, &points, &partition));
        assert_eq!(positions(&centroids), vec![(2, 1), (1000, 1000)]);
    }

    #[test]
    fn empty_points_never_move() {
        let mut centroids = centroids_at(&[(4, 4), (8, 8)]);
        let partition = assign(&centroids, &[]);
        assert!(!update(&mut centroids, &[], &partition));
        assert_eq!(positions(&centroids), vec![(4, 4), (8, 8)]);
    }

    #[test]
    fn single_member_moves_onto_it() {
        assert_eq!(
            mean_position(&points_at(&[(9, 2), (7, 7)]), &[1]),
            Some(Point::new(7, 7))
        );
        assert_eq!(mean_position(&[], &[]), None);
    }

    #[test]
    #[should_panic]
    fn member_outside_points_panics() {
        let points = points_at(&[(1, 1), (2, 2)]);
        let _ = mean_position(&points, &[0, 2]);
    }

    #[test]
    fn sums_do_not_overflow() {
        let points = vec![Point::new(u32::MAX, u32::MAX - 1); 4];
        assert_eq!(
            mean_position(&points, &[0, 1, 2, 3]),
            Some(Point::new(u32::MAX, u32::MAX - 1))
        );
    }

    #[test]
    fn mean_matches_members() {
        let bounds = Bounds::default();
        let points = test_points(1024, bounds);
        let mut centroids = test_centroids(9, bounds);
        let partition = assign(&centroids, &points);
        let before = centroids.clone();

        update(&mut centroids, &points, &partition);

        for ((id, members), (old, new)) in partition.clusters().zip(before.iter().zip(&centroids)) {
            if members.is_empty() {
                assert_eq!(old, new, "empty cluster {id} moved");
            } else {
                let n = members.len() as u64;
                let x = members.iter().map(|&i| u64::from(points[i as usize].x)).sum::<u64>() / n;
                let y = members.iter().map(|&i| u64::from(points[i as usize].y)).sum::<u64>() / n;
                assert_eq!((u64::from(new.position().x), u64::from(new.position().y)), (x, y));
                assert_eq!(old.color(), new.color());
            }
        }
    }
}
