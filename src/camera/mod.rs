use crate::math::*;

use tracing::debug;

/// World-space width of the viewport. Its height follows from the image aspect ratio.
pub const VIEWPORT_WIDTH: f64 = 2.0;

/// Fixed pinhole camera. The viewport is an axis-aligned rectangle centered on the view axis,
/// `focal_offset` away from the origin; columns step along -x and rows along -y.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub width: usize,
    pub height: usize,
    pub origin: Point3,
    top_left: Point3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    pub fn new(width: usize, height: usize, origin: Point3, focal_offset: Vec3) -> Camera {
        let aspect_ratio = width as f64 / height as f64;
        let viewport_height = VIEWPORT_WIDTH / aspect_ratio;
        let viewport_width_v = Vec3::X * VIEWPORT_WIDTH;
        let viewport_height_v = Vec3::Y * viewport_height;

        let top_left = origin - focal_offset + viewport_width_v / 2.0 + viewport_height_v / 2.0;
        debug!(
            "camera at {:?}, aspect ratio {}, viewport {}x{}",
            origin, aspect_ratio, VIEWPORT_WIDTH, viewport_height
        );

        Camera {
            width,
            height,
            origin,
            top_left,
            horizontal: viewport_width_v / width as f64,
            vertical: viewport_height_v / height as f64,
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn sample_point(&self, row: usize, col: usize) -> Point3 {
        self.top_left - 0.5 * self.horizontal - row as f64 * self.vertical - col as f64 * self.horizontal
    }

    pub fn get_ray(&self, row: usize, col: usize) -> Ray {
        let point_on_plane = self.sample_point(row, col);
        let ray = Ray::new(self.origin, point_on_plane - self.origin);
        debug_assert!(ray.direction.is_finite());
        ray
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_square_viewport_mapping() {
        let camera = Camera::new(2, 2, Point3::new(0.0, 0.0, 1.0), Vec3::Z);
        assert_eq!(camera.aspect_ratio(), 1.0);
        assert_eq!(camera.sample_point(0, 0), Point3::new(0.5, 1.0, 0.0));
        assert_eq!(camera.sample_point(0, 1), Point3::new(-0.5, 1.0, 0.0));
        assert_eq!(camera.sample_point(1, 1), Point3::new(-0.5, 0.0, 0.0));

        let ray = camera.get_ray(1, 0);
        assert_eq!(ray.origin, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(ray.direction, Vec3::new(0.5, 0.0, -1.0));
    }

    #[test]
    fn test_viewport_height_follows_aspect_ratio() {
        let camera = Camera::new(600, 400, Point3::ORIGIN, -Vec3::Z);
        assert_eq!(camera.aspect_ratio(), 1.5);
        let first = camera.sample_point(0, 0);
        let last_row = camera.sample_point(camera.height, 0);
        let last_col = camera.sample_point(0, camera.width);
        // the viewport sits one unit along +z because the focal offset points the other way
        assert_eq!(first.z, 1.0);
        assert!(((first.y - last_row.y) - 2.0 / 1.5).abs() < 1e-12);
        assert!(((first.x - last_col.x) - VIEWPORT_WIDTH).abs() < 1e-12);
    }
}
