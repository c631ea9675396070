use crate::error::MeshError;
use crate::geometry::{Face, Mesh};
use crate::math::*;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: false,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

fn triples(indices: &[u32], offset: usize) -> impl Iterator<Item = [usize; 3]> + '_ {
    indices.chunks_exact(3).map(move |c| {
        [
            c[0] as usize + offset,
            c[1] as usize + offset,
            c[2] as usize + offset,
        ]
    })
}

/// Parses Wavefront OBJ data from `reader`. `path` is only used for error messages.
///
/// Every object in the file is concatenated into one mesh, keeping file order. Polygons are fanned
/// into triangles, point and line elements are skipped and material libraries are not loaded.
pub fn parse_mesh<B: BufRead>(reader: &mut B, path: &Path) -> Result<Mesh, MeshError> {
    let (models, _) = tobj::load_obj_buf(reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })
    .map_err(|source| MeshError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("# of models: {}", models.len());

    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut faces = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        let (vertex_offset, normal_offset) = (vertices.len(), normals.len());
        debug!(
            "model {:?}: {} positions, {} normals, {} faces",
            model.name,
            mesh.positions.len() / 3,
            mesh.normals.len() / 3,
            mesh.indices.len() / 3
        );

        vertices.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|p| Point3::new(p[0] as f64, p[1] as f64, p[2] as f64)),
        );
        normals.extend(
            mesh.normals
                .chunks_exact(3)
                .map(|n| Vec3::new(n[0] as f64, n[1] as f64, n[2] as f64)),
        );

        let has_normals = mesh.normal_indices.len() == mesh.indices.len();
        let mut normal_triples = triples(&mesh.normal_indices, normal_offset);
        for vertex_triple in triples(&mesh.indices, vertex_offset) {
            faces.push(Face {
                vertices: vertex_triple,
                normals: if has_normals {
                    normal_triples.next()
                } else {
                    None
                },
            });
        }
    }

    Mesh::new(vertices, normals, faces)
}

/// Loads the OBJ file at `path`. No partial mesh is ever returned.
pub fn load_mesh(path: &Path) -> Result<Mesh, MeshError> {
    info!("opening file at {}", path.display());
    let file = File::open(path).map_err(|source| MeshError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_mesh(&mut BufReader::new(file), path)
}
