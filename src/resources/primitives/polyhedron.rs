use glam::Vec3;

/// The 20 vertices of a regular dodecahedron on a sphere of `radius`.
#[must_use]
pub fn dodecahedron_vertices(radius: f32) -> Vec<Vec3> {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let r = 1.0 / t;

    let mut vertices = Vec::with_capacity(20);

    // (±1, ±1, ±1)
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                vertices.push(Vec3::new(x, y, z));
            }
        }
    }

    for a in [-1.0, 1.0] {
        for b in [-1.0, 1.0] {
            vertices.push(Vec3::new(0.0, a * r, b * t));
            vertices.push(Vec3::new(a * r, b * t, 0.0));
            vertices.push(Vec3::new(a * t, 0.0, b * r));
        }
    }

    vertices
        .into_iter()
        .map(|v| v.normalize() * radius)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertices_lie_on_sphere() {
        let v = dodecahedron_vertices(10.0);
        assert_eq!(v.len(), 20);
        for p in v {
            assert!((p.length() - 10.0).abs() < 1e-4);
        }
    }
}
