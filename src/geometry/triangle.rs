use crate::math::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    pub a: Point3,
    pub b: Point3,
    pub c: Point3,
}

impl Triangle {
    pub const fn new(a: Point3, b: Point3, c: Point3) -> Self {
        Triangle { a, b, c }
    }

    /// Unnormalized face normal. Its sign follows the winding order a -> b -> c.
    pub fn normal(&self) -> Vec3 {
        (self.b - self.a).cross(self.c - self.a)
    }

    /// Returns the ray parameter at which `ray` crosses this triangle, if it does.
    ///
    /// `normal` must be `self.normal()`; it is passed in so callers can compute it once per
    /// triangle instead of once per ray. Rays parallel to the plane, hits at `t <= 0` and points
    /// on or outside an edge are all misses. Degenerate triangles have a zero normal and so never
    /// pass the edge tests.
    pub fn intersect(&self, normal: Vec3, ray: &Ray) -> Option<f64> {
        let n_dot_d = normal * ray.direction;
        if n_dot_d == 0.0 {
            return None;
        }

        let d = -(normal * Vec3::from(self.a));
        let t = -(normal * Vec3::from(ray.origin) + d) / n_dot_d;
        // also rejects NaN
        if !(t > 0.0) {
            return None;
        }

        let p = ray.point_at(t);
        let e0 = self.b - self.a;
        let e1 = self.c - self.b;
        let e2 = self.a - self.c;
        if normal * e0.cross(p - self.a) > 0.0
            && normal * e1.cross(p - self.b) > 0.0
            && normal * e2.cross(p - self.c) > 0.0
        {
            Some(t)
        } else {
            None
        }
    }
}
