use tracing::info;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Profile {
    pub camera_rays: usize,    // one per rendered pixel
    pub triangle_tests: usize, // ray/triangle intersection tests performed
    pub hits: usize,           // camera rays that hit any triangle
}

impl Profile {
    pub fn new(camera_rays: usize, triangle_tests: usize, hits: usize) -> Self {
        Profile {
            camera_rays,
            triangle_tests,
            hits,
        }
    }

    pub fn combine(&self, other: Self) -> Self {
        Profile::new(
            self.camera_rays + other.camera_rays,
            self.triangle_tests + other.triangle_tests,
            self.hits + other.hits,
        )
    }

    pub fn misses(&self) -> usize {
        self.camera_rays - self.hits
    }

    pub fn pretty_print(&self, elapsed: f32, threads: usize) {
        let &Profile {
            camera_rays,
            triangle_tests,
            hits,
        } = self;
        info!(
            "{} total camera rays at {} per second and {} per second per thread",
            camera_rays,
            camera_rays as f32 / elapsed,
            camera_rays as f32 / elapsed / (threads as f32)
        );
        info!(
            "{} total triangle tests at {} per second and {} per second per thread",
            triangle_tests,
            triangle_tests as f32 / elapsed,
            triangle_tests as f32 / elapsed / (threads as f32)
        );
        info!("{} rays hit the mesh, {} missed", hits, self.misses());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_combine() {
        let a = Profile::new(10, 100, 4);
        let b = Profile::new(5, 50, 5);
        let sum = a.combine(b);
        assert_eq!(sum, Profile::new(15, 150, 9));
        assert_eq!(sum.misses(), 6);
        assert_eq!(Profile::default().combine(a), a);
    }
}
