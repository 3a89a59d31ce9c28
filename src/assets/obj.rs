use std::io::{BufReader, Cursor};

use crate::errors::{Result, StageError};
use crate::resources::geometry::{Attribute, Geometry, NORMAL, POSITION};

/// Parses Wavefront OBJ text into one geometry per model.
///
/// Faces are triangulated with a single index. Material libraries are not
/// resolved; models without normals get area-weighted vertex normals.
pub fn parse_obj(bytes: &[u8], source_name: &str) -> Result<Vec<Geometry>> {
    let mut reader = BufReader::new(Cursor::new(bytes));
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &tobj::GPU_LOAD_OPTIONS, |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })
    .map_err(|e| StageError::asset(source_name, e))?;

    let mut geometries = Vec::with_capacity(models.len());
    for model in models {
        let mesh = model.mesh;
        if mesh.positions.is_empty() {
            log::debug!("'{source_name}': model '{}' has no vertices", model.name);
            continue;
        }

        let mut geo = Geometry::new();
        let vertex_count = mesh.positions.len() / 3;
        geo.set_attribute(POSITION, Attribute::new(mesh.positions, 3));

        let has_normals = mesh.normals.len() == vertex_count * 3;
        if has_normals {
            geo.set_attribute(NORMAL, Attribute::new(mesh.normals, 3));
        }
        if !mesh.indices.is_empty() {
            geo.set_indices(mesh.indices);
        }
        if !has_normals {
            geo.compute_vertex_normals();
        }
        geo.validate()
            .map_err(|e| StageError::asset(source_name, e))?;
        geo.compute_bounding_box();
        geometries.push(geo);
    }

    if geometries.is_empty() {
        return Err(StageError::asset(source_name, "no models found"));
    }
    Ok(geometries)
}
