//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use crate::{Color, HdrImage};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Column of the bucket's top-left corner
    pub x: u32,
    /// Row of the bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets covering the image, sorted in spiral order from the
/// centre so the middle of the frame finishes first.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
            x += bucket_size;
        }
        y += bucket_size;
    }

    sort_spiral(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance of their centre from the image centre.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Render a single bucket, calling `render_pixel(col, row)` with image
/// coordinates for every pixel it covers.
pub fn render_bucket<F>(bucket: &Bucket, mut render_pixel: F) -> BucketResult
where
    F: FnMut(u32, u32) -> Color,
{
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            pixels.push(render_pixel(bucket.x + local_x, bucket.y + local_y));
        }
    }

    BucketResult::new(*bucket, pixels)
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy the bucket's pixels into their place in `image`.
    pub fn blit(&self, image: &mut HdrImage) {
        let rows = self.pixels.chunks(self.bucket.width.max(1) as usize);
        for (local_y, row) in (0..self.bucket.height).zip(rows) {
            for (local_x, color) in (0..self.bucket.width).zip(row) {
                image.set(self.bucket.x + local_x, self.bucket.y + local_y, *color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coverage(width: u32, height: u32, buckets: &[Bucket]) -> Vec<u32> {
        let mut hits = vec![0; (width * height) as usize];
        for bucket in buckets {
            for row in bucket.y..bucket.y + bucket.height {
                for col in bucket.x..bucket.x + bucket.width {
                    hits[(row * width + col) as usize] += 1;
                }
            }
        }
        hits
    }

    #[test]
    fn test_buckets_cover_every_pixel_once_when_size_does_not_divide() {
        for (width, height, size) in [(100, 70, 64), (5, 3, 2), (7, 1, 3), (1, 9, 4)] {
            let buckets = generate_buckets(width, height, size);
            assert!(coverage(width, height, &buckets).iter().all(|&n| n == 1));

            for bucket in &buckets {
                assert!(bucket.width >= 1 && bucket.width <= size);
                assert!(bucket.height >= 1 && bucket.height <= size);
                assert!(bucket.x + bucket.width <= width);
                assert!(bucket.y + bucket.height <= height);
            }
        }
    }

    #[test]
    fn test_zero_bucket_size_means_single_pixels() {
        let buckets = generate_buckets(4, 3, 0);
        assert_eq!(buckets.len(), 12);
        assert!(buckets.iter().all(|b| b.pixel_count() == 1));
    }

    #[test]
    fn test_empty_image_has_no_buckets() {
        assert!(generate_buckets(0, 10, 8).is_empty());
        assert!(generate_buckets(10, 0, 8).is_empty());
    }

    #[test]
    fn test_indices_follow_distance_from_centre() {
        let (width, height) = (100, 70);
        let buckets = generate_buckets(width, height, 16);

        let distance = |b: &Bucket| {
            let dx = b.x as f32 + b.width as f32 / 2.0 - width as f32 / 2.0;
            let dy = b.y as f32 + b.height as f32 / 2.0 - height as f32 / 2.0;
            dx * dx + dy * dy
        };

        for (i, pair) in buckets.windows(2).enumerate() {
            assert_eq!(pair[0].index, i);
            assert!(distance(&pair[0]) <= distance(&pair[1]));
        }
    }

    #[test]
    fn test_render_and_blit() {
        let mut image = HdrImage::new(5, 3);
        for bucket in generate_buckets(5, 3, 2) {
            let result = render_bucket(&bucket, |col, row| Color::new(col as f32, row as f32, 1.0));
            assert_eq!(result.pixels.len(), bucket.pixel_count() as usize);
            result.blit(&mut image);
        }

        for row in 0..3 {
            for col in 0..5 {
                assert_eq!(image.get(col, row), Color::new(col as f32, row as f32, 1.0));
            }
        }
    }
}
