use crate::geometry::{Mesh, Triangle};
use crate::math::*;
use crate::profile::Profile;

use rayon::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitRecord {
    pub time: f64,
    pub triangle_index: usize,
}

/// Read-only scene shared by every render worker: the mesh's triangles in face order,
/// with each face normal computed once up front.
#[derive(Clone, Debug, Default)]
pub struct World {
    triangles: Vec<Triangle>,
    normals: Vec<Vec3>,
}

impl World {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        let normals = triangles.par_iter().map(Triangle::normal).collect();
        World { triangles, normals }
    }

    pub fn from_mesh(mesh: &Mesh) -> Self {
        World::new(mesh.triangles().collect())
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Nearest hit over every triangle. On an exact tie in distance the earlier triangle wins.
    pub fn hit(&self, r: &Ray, profile: &mut Profile) -> Option<HitRecord> {
        let mut nearest: Option<HitRecord> = None;
        for (triangle_index, (triangle, normal)) in
            self.triangles.iter().zip(self.normals.iter()).enumerate()
        {
            if let Some(time) = triangle.intersect(*normal, r) {
                if nearest.map_or(true, |hit| time < hit.time) {
                    nearest = Some(HitRecord {
                        time,
                        triangle_index,
                    });
                }
            }
        }
        profile.triangle_tests += self.triangles.len();
        if nearest.is_some() {
            profile.hits += 1;
        }
        nearest
    }
}
