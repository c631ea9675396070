use crate::error::MeshError;
use crate::geometry::Triangle;
use crate::math::*;

/// One triangular face. Indices are 0-based into the owning mesh's vertex and normal lists.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Face {
    pub vertices: [usize; 3],
    pub normals: Option<[usize; 3]>,
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Point3>,
    pub normals: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new(
        vertices: Vec<Point3>,
        normals: Vec<Vec3>,
        faces: Vec<Face>,
    ) -> Result<Self, MeshError> {
        for (face_index, face) in faces.iter().enumerate() {
            check_indices(face_index, "vertex", &face.vertices, vertices.len())?;
            if let Some(normal_indices) = &face.normals {
                check_indices(face_index, "normal", normal_indices, normals.len())?;
            }
        }
        Ok(Mesh {
            vertices,
            normals,
            faces,
        })
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Triangles in face order, vertices in the face's winding order.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(move |face| {
            let [a, b, c] = face.vertices;
            Triangle::new(self.vertices[a], self.vertices[b], self.vertices[c])
        })
    }
}

fn check_indices(
    face: usize,
    kind: &'static str,
    indices: &[usize; 3],
    len: usize,
) -> Result<(), MeshError> {
    match indices.iter().find(|&&index| index >= len) {
        Some(&index) => Err(MeshError::IndexOutOfBounds {
            face,
            kind,
            index,
            len,
        }),
        None => Ok(()),
    }
}
