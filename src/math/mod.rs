mod point;
mod vec;

pub use point::Point3;
pub use vec::Vec3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    pub const fn new(origin: Point3, direction: Vec3) -> Self {
        Ray { origin, direction }
    }

    pub fn point_at(&self, time: f64) -> Point3 {
        self.origin + self.direction * time
    }
}
