//! A [`RenderSink`] that rasterizes frames into an [`RgbImage`].

use crate::{Bounds, ConfigError, Frame, Point, RenderSink, MAX_PIXELS};

use image::{Rgb, RgbImage};
use palette::Srgb;

/// Draws each [`Frame`] into an [`RgbImage`] the size of the run's [`Bounds`].
///
/// Every point is drawn as a small square joined by a line to its centroid,
/// which is drawn as a slightly larger square. All three use the centroid's color.
/// Anything falling outside the image is clipped.
///
/// Only the most recent frame is kept; wrap the canvas in your own sink
/// to do something with every image, e.g., save it to disk.
///
/// # Examples
/// ```
/// # use lloyd::{Bounds, Canvas, ConfigError, LloydOptions};
/// # fn main() -> Result<(), ConfigError> {
/// let bounds = Bounds::default();
/// let mut kmeans = LloydOptions::new().bounds(bounds).generate()?;
/// let mut canvas = Canvas::new(bounds)?;
/// kmeans.run(&mut canvas);
/// let image = canvas.into_image();
/// assert_eq!(image.dimensions(), (300, 300));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Canvas {
    /// The most recently drawn frame.
    image: RgbImage,
    /// The fill color.
    background: Rgb<u8>,
    /// The side length of point markers.
    point_size: u32,
    /// The side length of centroid markers.
    centroid_size: u32,
}

impl Canvas {
    /// The default side length of point markers.
    pub const POINT_SIZE: u32 = 4;

    /// The default side length of centroid markers.
    pub const CENTROID_SIZE: u32 = 6;

    /// Creates a new, blank [`Canvas`] covering `bounds`.
    ///
    /// # Errors
    /// Returns [`ConfigError::TooManyPixels`] if `bounds` covers more than [`MAX_PIXELS`] pixels.
    pub fn new(bounds: Bounds) -> Result<Self, ConfigError> {
        if bounds.area() > u64::from(MAX_PIXELS) {
            return Err(ConfigError::TooManyPixels);
        }

        let background = Rgb([u8::MAX; 3]);
        Ok(Self {
            image: RgbImage::from_pixel(bounds.width(), bounds.height(), background),
            background,
            point_size: Self::POINT_SIZE,
            centroid_size: Self::CENTROID_SIZE,
        })
    }

    /// Sets the background color.
    ///
    /// The default is white.
    #[must_use]
    pub fn background(mut self, color: Srgb<u8>) -> Self {
        self.background = Rgb(color.into());
        self
    }

    /// Sets the side length of point markers.
    ///
    /// The default is [`Canvas::POINT_SIZE`].
    #[must_use]
    pub fn point_size(mut self, size: u32) -> Self {
        self.point_size = size;
        self
    }

    /// Sets the side length of centroid markers.
    ///
    /// The default is [`Canvas::CENTROID_SIZE`].
    #[must_use]
    pub fn centroid_size(mut self, size: u32) -> Self {
        self.centroid_size = size;
        self
    }

    /// The most recently drawn frame.
    #[must_use]
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Returns the most recently drawn frame.
    #[must_use]
    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Clears the canvas and draws `frame`.
    pub fn draw(&mut self, frame: &Frame<'_>) {
        for pixel in self.image.pixels_mut() {
            *pixel = self.background;
        }

        for (_, centroid, members) in frame.clusters() {
            let color = Rgb(centroid.color().into());
            let center = centroid.position();
            for point in members {
                self.line(point, center, color);
                self.square(point, self.point_size, color);
            }
            self.square(center, self.centroid_size, color);
        }
    }

    /// Sets the pixel at `(x, y)` if it lies inside the image.
    #[inline]
    fn plot(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
            if let Some(pixel) = self.image.get_pixel_mut_checked(x, y) {
                *pixel = color;
            }
        }
    }

    /// Fills a `size` by `size` square centered on `center`.
    fn square(&mut self, center: Point, size: u32, color: Rgb<u8>) {
        let size = i64::from(size);
        let left = i64::from(center.x) - size / 2;
        let top = i64::from(center.y) - size / 2;
        for y in top..(top + size) {
            for x in left..(left + size) {
                self.plot(x, y, color);
            }
        }
    }

    /// Draws a line from `a` to `b` with Bresenham's algorithm.
    fn line(&mut self, a: Point, b: Point, color: Rgb<u8>) {
        let (mut x, mut y) = (i64::from(a.x), i64::from(a.y));
        let (x1, y1) = (i64::from(b.x), i64::from(b.y));

        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

impl RenderSink for Canvas {
    fn render(&mut self, frame: &Frame<'_>) {
        self.draw(frame);
    }
}
