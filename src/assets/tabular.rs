//! Comma-separated point data.
//!
//! Each row holds at least three numeric fields; the first three become one
//! record. There is no header row.

use glam::Vec3;

use crate::errors::{Result, StageError};
use crate::resources::geometry::{Attribute, COLOR, Geometry, POSITION};
use crate::resources::material::Material;
use crate::resources::mesh::DrawMode;

/// What to do with a row that does not hold three finite numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowPolicy {
    /// Drop the row, count it and keep going.
    #[default]
    Skip,
    /// Fail the whole load on the first bad row.
    Reject,
}

/// How a record becomes a vertex color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorMapping {
    /// Reuse three record fields as RGB.
    Channels([usize; 3]),
    /// Red ramps with one field; green and blue are constant.
    Ramp {
        column: usize,
        scale: f32,
        green: f32,
        blue: f32,
    },
}

/// Maps parsed records onto vertex attributes and a drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct DataMapping {
    /// Record fields used for x, y and z.
    pub position: [usize; 3],
    pub color: ColorMapping,
    /// Point size override for `Points` drawables.
    pub point_size: Option<f32>,
    pub mode: DrawMode,
    /// Rotation about X baked into the geometry, in radians.
    pub rotate_x: f32,
    pub material: Material,
    pub rows: RowPolicy,
}

impl DataMapping {
    /// Identity mapping: `(x, y, z)` positions, `(x, y, z)` colors.
    #[must_use]
    pub fn new(mode: DrawMode, material: impl Into<Material>) -> Self {
        Self {
            position: [0, 1, 2],
            color: ColorMapping::Channels([0, 1, 2]),
            point_size: None,
            mode,
            rotate_x: 0.0,
            material: material.into(),
            rows: RowPolicy::Skip,
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: [usize; 3]) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: ColorMapping) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_point_size(mut self, size: f32) -> Self {
        self.point_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_rotate_x(mut self, angle: f32) -> Self {
        self.rotate_x = angle;
        self
    }

    #[must_use]
    pub fn with_row_policy(mut self, rows: RowPolicy) -> Self {
        self.rows = rows;
        self
    }

    fn check_columns(&self, source_name: &str) -> Result<()> {
        let columns = match self.color {
            ColorMapping::Channels(c) => c.to_vec(),
            ColorMapping::Ramp { column, .. } => vec![column],
        };
        if let Some(bad) = self.position.iter().chain(&columns).find(|&&c| c >= 3) {
            return Err(StageError::asset(
                source_name,
                format!("mapping refers to field {bad}; records have 3 fields"),
            ));
        }
        Ok(())
    }

    /// Material with the point size override applied.
    #[must_use]
    pub fn resolved_material(&self) -> Material {
        match (&self.material, self.point_size) {
            (Material::Points(m), Some(size)) => Material::Points(m.clone().with_size(size)),
            (m, _) => m.clone(),
        }
    }
}

/// Parsed records plus bookkeeping about dropped rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRows {
    pub records: Vec<[f32; 3]>,
    pub skipped: usize,
    /// 1-based line number and text of the first dropped row.
    pub first_skipped: Option<(usize, String)>,
}

fn parse_record(line: &str) -> Option<[f32; 3]> {
    let mut fields = line.split(',').map(str::trim);
    let mut record = [0.0f32; 3];
    for slot in &mut record {
        let value: f32 = fields.next()?.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        *slot = value;
    }
    Some(record)
}

/// Parses CSV text into records.
///
/// Blank lines are ignored. An input without data rows is an error, and so
/// is one whose every row is malformed, even under [`RowPolicy::Skip`].
pub fn parse_rows(text: &str, policy: RowPolicy, source_name: &str) -> Result<ParsedRows> {
    let mut parsed = ParsedRows::default();
    let mut seen_rows = 0usize;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        seen_rows += 1;

        if let Some(record) = parse_record(line) {
            parsed.records.push(record);
            continue;
        }

        match policy {
            RowPolicy::Reject => {
                return Err(StageError::asset(
                    source_name,
                    format!("malformed row at line {}: '{line}'", i + 1),
                ));
            }
            RowPolicy::Skip => {
                parsed.skipped += 1;
                if parsed.first_skipped.is_none() {
                    parsed.first_skipped = Some((i + 1, line.to_string()));
                }
            }
        }
    }

    if seen_rows == 0 {
        return Err(StageError::asset(source_name, "no data rows"));
    }
    if parsed.records.is_empty() {
        return Err(StageError::asset(
            source_name,
            format!("all {seen_rows} rows are malformed"),
        ));
    }

    if let Some((line, text)) = &parsed.first_skipped {
        log::warn!(
            "'{source_name}': skipped {} malformed row(s), first at line {line}: '{text}'",
            parsed.skipped
        );
    }

    Ok(parsed)
}

/// Builds position and color attributes from records, one vertex per record.
pub fn build_geometry(records: &[[f32; 3]], mapping: &DataMapping, source_name: &str) -> Result<Geometry> {
    mapping.check_columns(source_name)?;

    let mut positions = Vec::with_capacity(records.len());
    let mut colors = Vec::with_capacity(records.len());

    for r in records {
        let [px, py, pz] = mapping.position;
        positions.push(Vec3::new(r[px], r[py], r[pz]));

        let color = match mapping.color {
            ColorMapping::Channels([cr, cg, cb]) => Vec3::new(r[cr], r[cg], r[cb]),
            ColorMapping::Ramp {
                column,
                scale,
                green,
                blue,
            } => Vec3::new(r[column] * scale, green, blue),
        };
        colors.push(color);
    }

    let mut geo = Geometry::from_positions(&positions);
    geo.set_attribute(COLOR, Attribute::from_vec3(&colors));
    if mapping.rotate_x != 0.0 {
        geo.rotate_x(mapping.rotate_x);
    }
    geo.compute_bounding_box();

    debug_assert_eq!(geo.get_attribute(POSITION).map(Attribute::count), Some(records.len()));
    Ok(geo)
}

/// Parses `bytes` as UTF-8 CSV and builds the mapped geometry.
pub fn load_tabular(bytes: &[u8], mapping: &DataMapping, source_name: &str) -> Result<Geometry> {
    let text = std::str::from_utf8(bytes).map_err(|e| StageError::asset(source_name, e))?;
    let parsed = parse_rows(text, mapping.rows, source_name)?;
    build_geometry(&parsed.records, mapping, source_name)
}
