//! The per-iteration assignment of points to centroids.

use crate::CentroidId;

use bitvec::vec::BitVec;

/// A total, disjoint assignment of every point to exactly one centroid.
///
/// Clusters are indexed by [`CentroidId`], and every centroid of the run has a
/// (possibly empty) member list. Members are point indices into the point slice
/// the partition was computed from, in ascending order.
///
/// A [`Partition`] is rebuilt from scratch by [`assign`](crate::assign) each iteration,
/// it is never updated incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    /// The point indices assigned to each centroid.
    members: Vec<Vec<u32>>,
}

impl Partition {
    /// Creates a partition with `k` empty clusters.
    pub(crate) fn empty(k: usize) -> Self {
        Self { members: vec![Vec::new(); k] }
    }

    /// Adds the point with the given index to the cluster of `centroid`.
    ///
    /// Callers must push points in ascending index order.
    #[inline]
    pub(crate) fn push(&mut self, centroid: CentroidId, point: u32) {
        self.members[centroid.index()].push(point);
    }

    /// Returns the number of clusters, which is the number of centroids in the run.
    #[must_use]
    pub fn num_clusters(&self) -> usize {
        self.members.len()
    }

    /// Returns the total number of points across all clusters.
    #[must_use]
    pub fn num_points(&self) -> usize {
        self.members.iter().map(Vec::len).sum()
    }

    /// Returns the indices of the points assigned to the given centroid.
    ///
    /// # Panics
    /// Panics if `centroid` is not a centroid of the run this partition was computed for.
    #[must_use]
    pub fn members(&self, centroid: CentroidId) -> &[u32] {
        &self.members[centroid.index()]
    }

    /// Returns the indices of the points assigned to the given centroid,
    /// or `None` if there is no such centroid.
    #[must_use]
    pub fn get(&self, centroid: CentroidId) -> Option<&[u32]> {
        self.members.get(centroid.index()).map(Vec::as_slice)
    }

    /// Returns an iterator over every cluster in [`CentroidId`] order.
    pub fn clusters(&self) -> impl ExactSizeIterator<Item = (CentroidId, &[u32])> + '_ {
        self.members
            .iter()
            .enumerate()
            .map(|(i, members)| (CentroidId::new_unchecked(i), members.as_slice()))
    }

    /// Returns the number of points assigned to each centroid.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn counts(&self) -> Vec<u32> {
        self.members.iter().map(|m| m.len() as u32).collect()
    }

    /// Returns the [`CentroidId`] of every point, indexed by point.
    ///
    /// Any point index not covered by this partition is left out, so this is only
    /// meaningful for a partition that [`is_total`](Partition::is_total).
    #[must_use]
    pub fn labels(&self) -> Vec<CentroidId> {
        let mut labels = vec![CentroidId::new_unchecked(0); self.num_points()];
        for (id, members) in self.clusters() {
            for &point in members {
                if let Some(label) = labels.get_mut(point as usize) {
                    *label = id;
                }
            }
        }
        labels
    }

    /// Returns whether every point index in `0..num_points` appears in exactly one cluster,
    /// and no other index appears at all.
    #[must_use]
    pub fn is_total(&self, num_points: usize) -> bool {
        let mut seen: BitVec = BitVec::repeat(false, num_points);
        for &point in self.members.iter().flatten() {
            let point = point as usize;
            if point >= num_points || seen.replace(point, true) {
                return false;
            }
        }
        seen.all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: usize) -> CentroidId {
        CentroidId::new_unchecked(i)
    }

    fn partition(members: Vec<Vec<u32>>) -> Partition {
        Partition { members }
    }

    #[test]
    fn empty_has_every_cluster() {
        let partition = Partition::empty(3);
        assert_eq!(partition.num_clusters(), 3);
        assert_eq!(partition.num_points(), 0);
        assert!(partition.clusters().all(|(_, members)| members.is_empty()));
        assert!(partition.is_total(0));
        assert!(!partition.is_total(1));
    }

    #[test]
    fn totality_detects_overlap_and_gaps() {
        assert!(partition(vec![vec![0, 2], vec![1], vec![]]).is_total(3));
        assert!(!partition(vec![vec![0, 1], vec![1, 2]]).is_total(3));
        assert!(!partition(vec![vec![0], vec![2]]).is_total(3));
        assert!(!partition(vec![vec![0, 1, 3]]).is_total(3));
    }

    #[test]
    fn labels_and_counts_follow_members() {
        let partition = partition(vec![vec![1, 3], vec![], vec![0, 2, 4]]);
        assert_eq!(partition.counts(), vec![2, 0, 3]);
        assert_eq!(partition.labels(), vec![id(2), id(0), id(2), id(0), id(2)]);
        assert_eq!(partition.members(id(2)), &[0, 2, 4]);
        assert_eq!(partition.get(id(3)), None);
    }
}
