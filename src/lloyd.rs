//! The convergence loop that alternates assignment and update.

use crate::{
    assign, update, Centroid, ConfigError, Frame, Partition, Point, RenderSink, MAX_CLUSTERS,
};

use std::{collections::HashMap, num::NonZeroU32};

/// Why a [`Lloyd`] run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// An update left every centroid in place.
    Converged,
    /// The centroids returned to positions they held `period` iterations earlier,
    /// so the loop would repeat forever.
    Cycle {
        /// The number of iterations in the cycle (at least `2`).
        period: u32,
    },
    /// The configured maximum number of iterations was reached.
    IterationLimit,
}

/// The state of a [`Lloyd`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No iteration has run yet.
    Initial,
    /// At least one iteration has run, and the loop has not stopped.
    Iterating,
    /// The loop has stopped; further steps do nothing.
    Terminated(Termination),
}

/// The result of [`Lloyd::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Summary {
    /// The number of assign/update iterations performed.
    pub iterations: u32,
    /// Why the loop stopped.
    pub termination: Termination,
}

/// Lloyd's k-means algorithm over a fixed set of points.
///
/// Each iteration assigns every point to its nearest centroid, hands the resulting
/// [`Frame`] to a [`RenderSink`], and then moves each centroid to the mean of its members.
/// The loop stops once an update moves no centroid.
///
/// Since integer truncation of the means can make the centroids revisit earlier positions,
/// the loop also remembers every set of centroid positions it has produced and stops with
/// [`Termination::Cycle`] on a repeat (see [`Lloyd::detect_cycles`]).
/// Positions are drawn from a finite grid, so with cycle detection on, a run always ends.
/// An iteration cap can also be set with [`Lloyd::max_iterations`].
///
/// Once the loop stops, the sink receives one last frame with [`Frame::is_final`] set.
#[derive(Debug, Clone)]
pub struct Lloyd {
    /// The centroids, indexed by [`CentroidId`](crate::CentroidId).
    centroids: Vec<Centroid>,
    /// The points being clustered.
    points: Vec<Point>,
    /// The most recent assignment.
    partition: Partition,
    /// The current state.
    phase: Phase,
    /// The number of completed iterations.
    iterations: u32,
    /// Stop after this many iterations, if set.
    max_iterations: Option<NonZeroU32>,
    /// Centroid positions seen at the start of each iteration, if cycle detection is on.
    history: Option<HashMap<Vec<Point>, u32>>,
}

impl Lloyd {
    /// Creates a new [`Lloyd`] loop over the given initial centroids and points.
    ///
    /// Cycle detection is on and there is no iteration limit by default.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroClusters`] if `centroids` is empty,
    /// [`ConfigError::TooManyClusters`] if there are more than [`MAX_CLUSTERS`] centroids,
    /// and [`ConfigError::TooManyPoints`] if there are more than [`MAX_POINTS`](crate::MAX_POINTS) points.
    pub fn new(centroids: Vec<Centroid>, points: Vec<Point>) -> Result<Self, ConfigError> {
        if centroids.is_empty() {
            return Err(ConfigError::ZeroClusters);
        }
        if centroids.len() > usize::from(MAX_CLUSTERS) {
            return Err(ConfigError::TooManyClusters);
        }
        if u32::try_from(points.len()).is_err() {
            return Err(ConfigError::TooManyPoints);
        }

        Ok(Self {
            partition: Partition::empty(centroids.len()),
            centroids,
            points,
            phase: Phase::Initial,
            iterations: 0,
            max_iterations: None,
            history: Some(HashMap::new()),
        })
    }

    /// Sets the maximum number of iterations to run, or `None` to run until the loop settles.
    ///
    /// The default is `None`.
    #[must_use]
    pub fn max_iterations(mut self, max_iterations: Option<NonZeroU32>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets whether to stop when the centroids revisit earlier positions.
    ///
    /// The default is `true`. Turning this off without setting
    /// [`Lloyd::max_iterations`] can make [`Lloyd::run`] loop forever on inputs that cycle.
    #[must_use]
    pub fn detect_cycles(mut self, detect_cycles: bool) -> Self {
        self.history = detect_cycles.then(HashMap::new);
        self
    }

    /// The centroids, in [`CentroidId`](crate::CentroidId) order.
    #[must_use]
    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    /// The points being clustered.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The most recent assignment.
    ///
    /// This has only empty clusters before the first iteration.
    #[must_use]
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// The current state of the loop.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The number of iterations run so far.
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Returns a [`Frame`] of the current state.
    #[must_use]
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            iteration: self.iterations,
            is_final: matches!(self.phase, Phase::Terminated(_)),
            centroids: &self.centroids,
            points: &self.points,
            partition: &self.partition,
        }
    }

    /// Returns the centroids and points, consuming the loop.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Centroid>, Vec<Point>) {
        (self.centroids, self.points)
    }

    /// Runs a single iteration: assign, render, update.
    ///
    /// If this iteration ends the loop, the final frame is rendered as well.
    /// Does nothing once the loop has terminated.
    pub fn step(&mut self, sink: &mut impl RenderSink) -> Phase {
        if let Phase::Terminated(_) = self.phase {
            return self.phase;
        }

        self.phase = Phase::Iterating;
        self.iterations += 1;
        self.partition = assign(&self.centroids, &self.points);
        debug_assert!(self.partition.is_total(self.points.len()));

        sink.render(&self.frame());

        let before = self.positions();
        let changed = update(&mut self.centroids, &self.points, &self.partition);

        log::debug!(
            "iteration {}: {} of {} centroids moved",
            self.iterations,
            before
                .iter()
                .zip(&self.centroids)
                .filter(|&(&old, new)| old != new.position())
                .count(),
            self.centroids.len(),
        );

        if let Some(history) = &mut self.history {
            history.insert(before, self.iterations);
        }

        if !changed {
            self.terminate(Termination::Converged, sink);
        } else if let Some(period) = self.cycle_period() {
            self.terminate(Termination::Cycle { period }, sink);
        } else if self.max_iterations.is_some_and(|max| self.iterations >= max.get()) {
            self.terminate(Termination::IterationLimit, sink);
        } else {
            sink.pace();
        }

        self.phase
    }

    /// Runs iterations until the loop terminates, rendering every frame to `sink`.
    pub fn run(&mut self, sink: &mut impl RenderSink) -> Summary {
        loop {
            if let Phase::Terminated(termination) = self.step(sink) {
                return Summary { iterations: self.iterations, termination };
            }
        }
    }

    /// The current centroid positions.
    fn positions(&self) -> Vec<Point> {
        self.centroids.iter().map(Centroid::position).collect()
    }

    /// If the current centroid positions were seen at the start of an earlier iteration,
    /// returns the number of iterations since then.
    fn cycle_period(&self) -> Option<u32> {
        let history = self.history.as_ref()?;
        let seen = history.get(&self.positions())?;
        Some(self.iterations + 1 - seen)
    }

    /// Stops the loop and renders the final frame.
    fn terminate(&mut self, termination: Termination, sink: &mut impl RenderSink) {
        if termination != Termination::Converged {
            // the centroids moved after the last assignment
            self.partition = assign(&self.centroids, &self.points);
        }

        match termination {
            Termination::Converged => {
                log::info!("converged after {} iterations", self.iterations);
            }
            Termination::Cycle { period } => log::warn!(
                "stopped after {} iterations: centroids cycle with period {period}",
                self.iterations
            ),
            Termination::IterationLimit => {
                log::warn!("stopped at the iteration limit of {}", self.iterations);
            }
        }

        self.phase = Phase::Terminated(termination);
        sink.render(&self.frame());
    }
}
