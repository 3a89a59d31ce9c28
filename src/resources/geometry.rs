use glam::{Affine3A, Mat3, Vec3};
use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::errors::{Result, StageError};

/// Well-known attribute names.
pub const POSITION: &str = "position";
pub const NORMAL: &str = "normal";
pub const COLOR: &str = "color";
pub const SIZE: &str = "size";

/// A flat `f32` vertex attribute with a fixed item size.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub values: Vec<f32>,
    pub item_size: usize,
}

impl Attribute {
    #[must_use]
    pub fn new(values: Vec<f32>, item_size: usize) -> Self {
        Self { values, item_size }
    }

    #[must_use]
    pub fn from_vec3(items: &[Vec3]) -> Self {
        let mut values = Vec::with_capacity(items.len() * 3);
        for v in items {
            values.extend_from_slice(&v.to_array());
        }
        Self::new(values, 3)
    }

    /// Number of items (vertices) in the attribute.
    #[must_use]
    pub fn count(&self) -> usize {
        if self.item_size == 0 {
            0
        } else {
            self.values.len() / self.item_size
        }
    }

    #[must_use]
    pub fn get_vec3(&self, i: usize) -> Option<Vec3> {
        if self.item_size != 3 {
            return None;
        }
        let s = self.values.get(i * 3..i * 3 + 3)?;
        Some(Vec3::new(s[0], s[1], s[2]))
    }

    pub fn set_vec3(&mut self, i: usize, v: Vec3) {
        if self.item_size == 3
            && let Some(s) = self.values.get_mut(i * 3..i * 3 + 3)
        {
            s.copy_from_slice(&v.to_array());
        }
    }

    #[must_use]
    pub fn get_f32(&self, i: usize) -> Option<f32> {
        self.values.get(i * self.item_size).copied()
    }

    /// Iterates items as `Vec3` (item size 3 only).
    pub fn iter_vec3(&self) -> impl Iterator<Item = Vec3> + '_ {
        let values: &[f32] = if self.item_size == 3 { &self.values } else { &[] };
        values.chunks_exact(3).map(|c| Vec3::new(c[0], c[1], c[2]))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bb = BoundingBox {
            min: first,
            max: first,
        };
        for p in iter {
            bb.min = bb.min.min(p);
            bb.max = bb.max.max(p);
        }
        Some(bb)
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[must_use]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[must_use]
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut new_min = Vec3::splat(f32::INFINITY);
        let mut new_max = Vec3::splat(f32::NEG_INFINITY);
        for point in corners {
            let transformed = matrix.transform_point3(point);
            new_min = new_min.min(transformed);
            new_max = new_max.max(transformed);
        }

        Self {
            min: new_min,
            max: new_max,
        }
    }
}

/// CPU-side vertex data.
///
/// Built once by a primitive generator, loader or demo, then shared with the
/// renderer through the asset server. Attribute counts must agree with the
/// position count; [`Geometry::validate`] checks this.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub uuid: Uuid,
    attributes: FxHashMap<String, Attribute>,
    index: Option<Vec<u32>>,
    bounding_box: Option<BoundingBox>,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            attributes: FxHashMap::default(),
            index: None,
            bounding_box: None,
        }
    }

    /// Non-indexed geometry from a position list.
    #[must_use]
    pub fn from_positions(positions: &[Vec3]) -> Self {
        let mut geo = Self::new();
        geo.set_attribute(POSITION, Attribute::from_vec3(positions));
        geo
    }

    // ========================================================================
    // Attributes & index
    // ========================================================================

    pub fn set_attribute(&mut self, name: &str, attr: Attribute) {
        if name == POSITION {
            self.bounding_box = None;
        }
        self.attributes.insert(name.to_string(), attr);
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<Attribute> {
        self.attributes.remove(name)
    }

    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn get_attribute_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        if name == POSITION {
            self.bounding_box = None;
        }
        self.attributes.get_mut(name)
    }

    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    #[must_use]
    pub fn attributes(&self) -> &FxHashMap<String, Attribute> {
        &self.attributes
    }

    pub fn set_indices(&mut self, indices: Vec<u32>) {
        self.index = Some(indices);
    }

    #[must_use]
    pub fn indices(&self) -> Option<&[u32]> {
        self.index.as_deref()
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.attributes.get(POSITION).map_or(0, Attribute::count)
    }

    /// Number of elements drawn: index count, or vertex count when non-indexed.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.index.as_ref().map_or_else(|| self.vertex_count(), Vec::len)
    }

    #[must_use]
    pub fn position(&self, i: usize) -> Option<Vec3> {
        self.attributes.get(POSITION)?.get_vec3(i)
    }

    #[must_use]
    pub fn positions(&self) -> Vec<Vec3> {
        self.attributes
            .get(POSITION)
            .map(|a| a.iter_vec3().collect())
            .unwrap_or_default()
    }

    /// Calls `f` with the vertex indices of every triangle.
    pub fn for_each_triangle(&self, mut f: impl FnMut(usize, usize, usize)) {
        if let Some(index) = &self.index {
            for tri in index.chunks_exact(3) {
                f(tri[0] as usize, tri[1] as usize, tri[2] as usize);
            }
        } else {
            let count = self.vertex_count();
            for i in (0..count.saturating_sub(2)).step_by(3) {
                f(i, i + 1, i + 2);
            }
        }
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.element_count() / 3
    }

    // ========================================================================
    // Derived data
    // ========================================================================

    /// Area-weighted vertex normals.
    ///
    /// Shared vertices of an indexed geometry get smooth normals; non-indexed
    /// geometry gets flat face normals.
    pub fn compute_vertex_normals(&mut self) {
        let Some(pos) = self.attributes.get(POSITION) else {
            return;
        };
        let count = pos.count();
        let mut normals = vec![Vec3::ZERO; count];

        self.for_each_triangle(|i0, i1, i2| {
            if i0 >= count || i1 >= count || i2 >= count {
                return;
            }
            let (Some(v0), Some(v1), Some(v2)) = (pos.get_vec3(i0), pos.get_vec3(i1), pos.get_vec3(i2))
            else {
                return;
            };
            // 叉积的模长 = 2 * 三角形面积
            let face_normal = (v1 - v0).cross(v2 - v0);
            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        });

        for n in &mut normals {
            *n = n.normalize_or_zero();
        }

        self.set_attribute(NORMAL, Attribute::from_vec3(&normals));
    }

    /// Computes, caches and returns the bounding box of the positions.
    pub fn compute_bounding_box(&mut self) -> Option<BoundingBox> {
        self.bounding_box = BoundingBox::from_points(self.positions());
        self.bounding_box
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounding_box
            .or_else(|| BoundingBox::from_points(self.positions()))
    }

    // ========================================================================
    // Transforms
    // ========================================================================

    /// Bakes `matrix` into positions and normals.
    pub fn apply_matrix(&mut self, matrix: &Affine3A) {
        if let Some(pos) = self.attributes.get_mut(POSITION) {
            for i in 0..pos.count() {
                if let Some(p) = pos.get_vec3(i) {
                    pos.set_vec3(i, matrix.transform_point3(p));
                }
            }
        }

        let normal_matrix = Mat3::from(matrix.matrix3).inverse().transpose();
        if let Some(nor) = self.attributes.get_mut(NORMAL) {
            for i in 0..nor.count() {
                if let Some(n) = nor.get_vec3(i) {
                    nor.set_vec3(i, (normal_matrix * n).normalize_or_zero());
                }
            }
        }

        self.bounding_box = None;
    }

    pub fn rotate_x(&mut self, angle: f32) {
        self.apply_matrix(&Affine3A::from_rotation_x(angle));
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.apply_matrix(&Affine3A::from_translation(offset));
    }

    /// Expands the index so every triangle owns its vertices.
    #[must_use]
    pub fn to_non_indexed(&self) -> Geometry {
        let Some(index) = &self.index else {
            return self.clone();
        };

        let mut out = Geometry::new();
        for (name, attr) in &self.attributes {
            let size = attr.item_size;
            let mut values = Vec::with_capacity(index.len() * size);
            for &i in index {
                let start = i as usize * size;
                if let Some(item) = attr.values.get(start..start + size) {
                    values.extend_from_slice(item);
                } else {
                    values.extend(std::iter::repeat_n(0.0, size));
                }
            }
            out.set_attribute(name, Attribute::new(values, size));
        }
        out
    }

    /// Checks attribute counts, index range and finiteness.
    pub fn validate(&self) -> Result<()> {
        let count = self.vertex_count();
        if !self.has_attribute(POSITION) {
            return Err(StageError::invalid("geometry", "missing position attribute"));
        }
        for (name, attr) in &self.attributes {
            if attr.item_size == 0 || attr.values.len() % attr.item_size != 0 {
                return Err(StageError::invalid(
                    "geometry",
                    format!("attribute '{name}' length is not a multiple of its item size"),
                ));
            }
            if attr.count() != count {
                return Err(StageError::invalid(
                    "geometry",
                    format!("attribute '{name}' has {} items, expected {count}", attr.count()),
                ));
            }
            if attr.values.iter().any(|v| !v.is_finite()) {
                return Err(StageError::invalid(
                    "geometry",
                    format!("attribute '{name}' contains non-finite values"),
                ));
            }
        }
        if let Some(index) = &self.index
            && let Some(&bad) = index.iter().find(|&&i| i as usize >= count)
        {
            return Err(StageError::invalid(
                "geometry",
                format!("index {bad} out of range for {count} vertices"),
            ));
        }
        Ok(())
    }
}
