use super::film::{Film, Rgb};
use super::tasks::PixelTask;

use crate::camera::Camera;
use crate::profile::Profile;
use crate::world::World;

use std::sync::atomic::{AtomicUsize, Ordering};

pub const DEFAULT_BATCH_SIZE: usize = 1000;

const PALETTE: [Rgb; 3] = [Rgb(0xff_00_00), Rgb(0x00_ff_00), Rgb(0x00_00_ff)];

/// Flat color for the triangle at `index` in face order.
pub fn triangle_color(index: usize) -> Rgb {
    PALETTE[index % PALETTE.len()]
}

/// Renders every pixel of `tasks` into `film`, leaving misses untouched.
///
/// `progress` is advanced by `batch_size` after each full batch and by the remainder once the
/// slice is done, so across all workers it ends at exactly the number of pixels rendered.
pub fn render_slice(
    world: &World,
    camera: &Camera,
    film: &Film,
    tasks: &[PixelTask],
    progress: &AtomicUsize,
    batch_size: usize,
) -> Profile {
    let mut profile = Profile::default();
    let mut batch = 0;
    for &PixelTask { row, col } in tasks {
        let ray = camera.get_ray(row, col);
        profile.camera_rays += 1;
        if let Some(hit) = world.hit(&ray, &mut profile) {
            film.set(row, col, triangle_color(hit.triangle_index));
        }

        batch += 1;
        if batch == batch_size {
            progress.fetch_add(batch, Ordering::Relaxed);
            batch = 0;
        }
    }
    if batch > 0 {
        progress.fetch_add(batch, Ordering::Relaxed);
    }
    profile
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::geometry::Triangle;
    use crate::math::*;
    use crate::renderer::tasks::generate_tasks;

    // a single triangle filling the middle of a small image, facing a camera on +z
    fn scene() -> (World, Camera) {
        let world = World::new(vec![Triangle::new(
            Point3::new(-0.6, -0.6, 0.0),
            Point3::new(0.6, -0.6, 0.0),
            Point3::new(0.0, 0.6, 0.0),
        )]);
        let camera = Camera::new(8, 8, Point3::new(0.0, 0.0, 2.0), Vec3::Z);
        (world, camera)
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(triangle_color(0), Rgb::new(255, 0, 0));
        assert_eq!(triangle_color(1), Rgb::new(0, 255, 0));
        assert_eq!(triangle_color(2), Rgb::new(0, 0, 255));
        assert_eq!(triangle_color(3), triangle_color(0));
    }

    #[test]
    fn test_render_slice_writes_only_hits() {
        let (world, camera) = scene();
        let film = Film::new(camera.width, camera.height, Rgb::BLACK);
        let progress = AtomicUsize::new(0);
        let tasks = generate_tasks(camera.width, camera.height);

        let profile = render_slice(&world, &camera, &film, &tasks, &progress, 5);

        assert_eq!(progress.load(Ordering::Relaxed), 64);
        assert_eq!(profile.camera_rays, 64);
        assert_eq!(profile.triangle_tests, 64);
        let colored = film.pixels().filter(|&c| c == triangle_color(0)).count();
        assert_eq!(colored, profile.hits);
        assert!(profile.hits > 0 && profile.hits < 64);
        // corners are far outside the triangle
        assert_eq!(film.get(0, 0), Rgb::BLACK);
        assert_eq!(film.get(7, 7), Rgb::BLACK);
    }

    #[test]
    fn test_progress_counts_partial_batches() {
        let (world, camera) = scene();
        let film = Film::new(camera.width, camera.height, Rgb::BLACK);
        let tasks = generate_tasks(camera.width, camera.height);
        for batch_size in [1, 3, 64, 1000] {
            let progress = AtomicUsize::new(0);
            render_slice(&world, &camera, &film, &tasks[..37], &progress, batch_size);
            assert_eq!(progress.load(Ordering::Relaxed), 37);
        }
        let progress = AtomicUsize::new(0);
        render_slice(&world, &camera, &film, &[], &progress, 10);
        assert_eq!(progress.load(Ordering::Relaxed), 0);
    }
}
