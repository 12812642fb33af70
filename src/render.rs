//! The interface between the clustering loop and whatever draws it.

use crate::{Centroid, CentroidId, Partition, Point};

/// A read-only view of the clustering state, handed to a [`RenderSink`] once per iteration.
///
/// A frame is emitted right after the assignment step, before centroids are updated,
/// so `partition` was computed from exactly these `centroids`.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// The 1-based iteration that produced this frame.
    pub iteration: u32,
    /// Whether this is the final render after the loop has terminated.
    pub is_final: bool,
    /// The centroids, indexed by [`CentroidId`].
    pub centroids: &'a [Centroid],
    /// The points being clustered.
    pub points: &'a [Point],
    /// The assignment of points to centroids.
    pub partition: &'a Partition,
}

impl<'a> Frame<'a> {
    /// Returns an iterator over each centroid together with the positions of its members.
    ///
    /// # Panics
    /// The member iterators panic if `partition` was not computed from `points`
    /// and refers to a point index outside of it.
    pub fn clusters(
        &self,
    ) -> impl Iterator<Item = (CentroidId, &'a Centroid, impl Iterator<Item = Point> + 'a)> + 'a
    {
        let Self { centroids, points, partition, .. } = *self;
        partition
            .clusters()
            .zip(centroids)
            .map(move |((id, members), centroid)| {
                (id, centroid, members.iter().map(move |&i| points[i as usize]))
            })
    }

    /// Copies this frame into an owned [`Snapshot`] (the points are not copied).
    #[must_use]
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            iteration: self.iteration,
            is_final: self.is_final,
            centroids: self.centroids.to_vec(),
            partition: self.partition.clone(),
        }
    }
}

/// An owned copy of a [`Frame`], minus the points, which never change during a run.
///
/// Useful to hand frames off to a renderer that runs independently of the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// The 1-based iteration that produced this frame.
    pub iteration: u32,
    /// Whether this is the final render after the loop has terminated.
    pub is_final: bool,
    /// The centroids at the time of the frame.
    pub centroids: Vec<Centroid>,
    /// The assignment of points to centroids.
    pub partition: Partition,
}

impl Snapshot {
    /// Reborrows this snapshot as a [`Frame`] over the given points.
    #[must_use]
    pub fn as_frame<'a>(&'a self, points: &'a [Point]) -> Frame<'a> {
        Frame {
            iteration: self.iteration,
            is_final: self.is_final,
            centroids: &self.centroids,
            points,
            partition: &self.partition,
        }
    }
}

/// Receives every frame of a [`Lloyd`](crate::Lloyd) run.
///
/// Rendering is a blocking call between the assignment and the update step.
/// It has no effect on the clustering itself, only on how long a run takes.
///
/// Any `FnMut(&Frame)` closure is a [`RenderSink`].
pub trait RenderSink {
    /// Draws a frame.
    fn render(&mut self, frame: &Frame<'_>);

    /// Called between iterations, e.g., to delay until the next frame is due.
    ///
    /// This is not called after the final render. The default does nothing.
    fn pace(&mut self) {}
}

impl<F> RenderSink for F
where
    F: FnMut(&Frame<'_>),
{
    fn render(&mut self, frame: &Frame<'_>) {
        self(frame);
    }
}

/// A [`RenderSink`] that ignores every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn render(&mut self, _: &Frame<'_>) {}
}

/// A [`RenderSink`] that keeps a [`Snapshot`] of every frame it receives.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    /// The recorded frames, in order.
    frames: Vec<Snapshot>,
}

impl FrameRecorder {
    /// Creates an empty [`FrameRecorder`].
    #[must_use]
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// The frames recorded so far.
    #[must_use]
    pub fn frames(&self) -> &[Snapshot] {
        &self.frames
    }

    /// Returns the recorded frames.
    #[must_use]
    pub fn into_frames(self) -> Vec<Snapshot> {
        self.frames
    }
}

impl RenderSink for FrameRecorder {
    fn render(&mut self, frame: &Frame<'_>) {
        self.frames.push(frame.to_snapshot());
    }
}
