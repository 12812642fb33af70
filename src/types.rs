//! Contains the data model and validated configuration types shared across the crate.

use crate::{MAX_CLUSTERS, MAX_PIXELS, MAX_POINTS};
use palette::Srgb;
use std::{
    error::Error,
    fmt::Display,
    num::{NonZeroU16, NonZeroU32, NonZeroU8},
};

/// An error type for invalid run configurations.
///
/// All of these are detected before any clustering state is created,
/// so a [`Lloyd`](crate::Lloyd) loop never starts half-initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigError {
    /// The run was given zero centroids (`k = 0`).
    ZeroClusters,
    /// The run was given more than [`MAX_CLUSTERS`] centroids.
    TooManyClusters,
    /// The run was given more than [`MAX_POINTS`] points.
    TooManyPoints,
    /// The width or height of the coordinate bounds was zero.
    EmptyBounds,
    /// The bounds cover more than [`MAX_PIXELS`] pixels and are too large to render.
    TooManyPixels,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroClusters => write!(f, "at least one cluster is required"),
            ConfigError::TooManyClusters => {
                write!(f, "above the maximum number of clusters of {MAX_CLUSTERS}")
            }
            ConfigError::TooManyPoints => {
                write!(f, "above the maximum number of points of {MAX_POINTS}")
            }
            ConfigError::EmptyBounds => write!(f, "bounds must have a non-zero width and height"),
            ConfigError::TooManyPixels => {
                write!(f, "above the maximum number of pixels of {MAX_PIXELS}")
            }
        }
    }
}

impl Error for ConfigError {}

/// A 2D point in pixel space.
///
/// Points carry no identity of their own; a point is identified by its index
/// in the point slice of the run, so duplicate coordinates are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point {
    /// The horizontal coordinate.
    pub x: u32,
    /// The vertical coordinate.
    pub y: u32,
}

impl Point {
    /// Creates a new [`Point`].
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for Point {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (u32, u32) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The identity of a centroid: its index in creation order.
///
/// Ties in nearest-centroid search are always broken towards the lower id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct CentroidId(u16);

impl CentroidId {
    /// Creates a [`CentroidId`] from an index without checking it against [`MAX_CLUSTERS`].
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn new_unchecked(index: usize) -> Self {
        Self(index as u16)
    }

    /// Returns the index of the centroid in the centroid slice.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<CentroidId> for u16 {
    fn from(id: CentroidId) -> Self {
        id.0
    }
}

impl Display for CentroidId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The representative of one cluster: a movable position with a fixed display color.
///
/// Only the update step moves a centroid; the color never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Centroid {
    /// The current position.
    position: Point,
    /// The color used to draw this cluster.
    color: Srgb<u8>,
}

impl Centroid {
    /// Creates a new [`Centroid`] at the given position.
    #[must_use]
    pub const fn new(position: Point, color: Srgb<u8>) -> Self {
        Self { position, color }
    }

    /// Returns the current position.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Returns the display color.
    #[must_use]
    pub const fn color(&self) -> Srgb<u8> {
        self.color
    }

    /// Moves the centroid, returning whether its position actually changed.
    pub(crate) fn move_to(&mut self, position: Point) -> bool {
        let moved = self.position != position;
        self.position = position;
        moved
    }
}

/// The number of clusters, `k`.
///
/// This is a simple new type wrapper around [`NonZeroU16`], so `k = 0` is unrepresentable.
/// It is also less than or equal to [`MAX_CLUSTERS`] by construction.
///
/// # Examples
/// Use `try_into` or [`ClusterCount::from_clamped`] to create [`ClusterCount`]s.
/// ```
/// # use lloyd::{ClusterCount, ConfigError};
/// # fn main() -> Result<(), ConfigError> {
/// let k = ClusterCount::try_from(8u16)?;
/// assert_eq!(k.into_inner(), 8);
/// assert_eq!(ClusterCount::from_clamped(0).into_inner(), 1);
/// assert!(ClusterCount::try_from(0u16).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ClusterCount(NonZeroU16);

impl ClusterCount {
    /// A single cluster.
    pub const ONE: Self = Self(NonZeroU16::MIN);

    /// Gets the inner `u16` value.
    #[must_use]
    pub const fn into_inner(self) -> u16 {
        self.0.get()
    }

    /// Creates a [`ClusterCount`] by clamping the given value to be at least `1`.
    #[must_use]
    pub const fn from_clamped(value: u16) -> Self {
        match NonZeroU16::new(value) {
            Some(value) => Self(value),
            None => Self::ONE,
        }
    }
}

impl Default for ClusterCount {
    fn default() -> Self {
        Self::from_clamped(5)
    }
}

impl From<NonZeroU16> for ClusterCount {
    fn from(value: NonZeroU16) -> Self {
        Self(value)
    }
}

impl From<NonZeroU8> for ClusterCount {
    fn from(value: NonZeroU8) -> Self {
        Self(value.into())
    }
}

impl From<ClusterCount> for u16 {
    fn from(value: ClusterCount) -> Self {
        value.into_inner()
    }
}

impl TryFrom<u16> for ClusterCount {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        NonZeroU16::new(value).map(Self).ok_or(ConfigError::ZeroClusters)
    }
}

impl TryFrom<usize> for ClusterCount {
    type Error = ConfigError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        let value = u16::try_from(value).map_err(|_| ConfigError::TooManyClusters)?;
        value.try_into()
    }
}

impl Display for ClusterCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.into_inner())
    }
}

/// The coordinate space points and centroids are drawn from: `[0, width) x [0, height)`.
///
/// # Examples
/// ```
/// # use lloyd::{Bounds, ConfigError};
/// # fn main() -> Result<(), ConfigError> {
/// let bounds = Bounds::try_from((640, 480))?;
/// assert_eq!((bounds.width(), bounds.height()), (640, 480));
/// assert_eq!(Bounds::try_from((0, 480)), Err(ConfigError::EmptyBounds));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    /// Exclusive upper bound for `x`.
    width: NonZeroU32,
    /// Exclusive upper bound for `y`.
    height: NonZeroU32,
}

impl Bounds {
    /// A 300 by 300 pixel space, the size of the original demo window.
    pub const SQUARE_300: Self = match NonZeroU32::new(300) {
        Some(side) => Self { width: side, height: side },
        None => unreachable!(),
    };

    /// Creates new [`Bounds`] from non-zero dimensions.
    #[must_use]
    pub const fn new(width: NonZeroU32, height: NonZeroU32) -> Self {
        Self { width, height }
    }

    /// The width of the coordinate space.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width.get()
    }

    /// The height of the coordinate space.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height.get()
    }

    /// The number of pixels covered by these bounds.
    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Returns whether the given point lies inside these bounds.
    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        point.x < self.width() && point.y < self.height()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::SQUARE_300
    }
}

impl TryFrom<(u32, u32)> for Bounds {
    type Error = ConfigError;

    fn try_from((width, height): (u32, u32)) -> Result<Self, Self::Error> {
        match (NonZeroU32::new(width), NonZeroU32::new(height)) {
            (Some(width), Some(height)) => Ok(Self { width, height }),
            _ => Err(ConfigError::EmptyBounds),
        }
    }
}

impl Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width(), self.height())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn cluster_count_rejects_zero() {
        assert_eq!(ClusterCount::try_from(0u16), Err(ConfigError::ZeroClusters));
        assert_eq!(ClusterCount::try_from(0usize), Err(ConfigError::ZeroClusters));
        assert_eq!(ClusterCount::from_clamped(0), ClusterCount::ONE);
    }

    #[test]
    fn cluster_count_rejects_overflow() {
        let too_many = usize::from(MAX_CLUSTERS) + 1;
        assert_eq!(ClusterCount::try_from(too_many), Err(ConfigError::TooManyClusters));
        assert_eq!(
            ClusterCount::try_from(usize::from(MAX_CLUSTERS)).map(ClusterCount::into_inner),
            Ok(MAX_CLUSTERS)
        );
    }

    #[test]
    fn bounds_reject_empty_dimensions() {
        assert_eq!(Bounds::try_from((0, 1)), Err(ConfigError::EmptyBounds));
        assert_eq!(Bounds::try_from((1, 0)), Err(ConfigError::EmptyBounds));
        assert_eq!(Bounds::default().to_string(), "300x300");
    }

    #[test]
    fn area_does_not_overflow() {
        let bounds = Bounds::try_from((u32::MAX, u32::MAX)).unwrap();
        assert_eq!(bounds.area(), u64::from(u32::MAX) * u64::from(u32::MAX));
        assert_eq!(Bounds::SQUARE_300.area(), 90_000);
    }

    #[test]
    fn bounds_are_exclusive() {
        let bounds = Bounds::SQUARE_300;
        assert!(bounds.contains(Point::new(299, 0)));
        assert!(!bounds.contains(Point::new(300, 0)));
        assert!(!bounds.contains(Point::new(0, 300)));
    }

    #[test]
    fn centroid_reports_movement() {
        let mut centroid = Centroid::new(Point::new(1, 2), Srgb::new(0, 0, 0));
        assert!(!centroid.move_to(Point::new(1, 2)));
        assert!(centroid.move_to(Point::new(2, 2)));
        assert_eq!(centroid.position(), Point::new(2, 2));
    }
}
