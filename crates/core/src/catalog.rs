//! Catalog ingestion and schema validation.
//!
//! Both catalogs arrive as CSV with a fixed named-column schema. Missing
//! columns are fatal before any scoring; numeric cells are parsed strictly
//! by default, with an opt-in lenient mode that reproduces the legacy
//! coerce-to-zero behavior.

use std::path::Path;

use crate::domain::glass::GlassRecord;
use crate::domain::material::{MaterialId, MaterialRecord};
use crate::errors::CatalogError;

/// How unparsable numeric cells are treated during ingestion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NumericMode {
    /// Reject the catalog on the first bad cell.
    #[default]
    Strict,
    /// Coerce bad or empty cells to 0.0. Legacy behavior: it can silently
    /// favor incomplete records, so callers must opt in.
    Lenient,
}

pub const MATERIAL_COLUMNS: &[&str] = &[
    "material_id",
    "material_type",
    "material_subtype",
    "cost_per_sqm",
    "installation_cost_per_sqm",
    "material_u_value",
    "material_shgc",
    "material_vlt_percent",
    "fire_rating",
    "durability_years",
    "maintenance_freq_per_year",
    "acoustic_rating_rw",
    "water_absorption_pct",
    "material_density_kgm3",
    "surface_reflectivity_pct",
    "material_lifespan_years",
];

pub const GLASS_COLUMNS: &[&str] = &[
    "glass_type",
    "u_value",
    "shgc",
    "vlt",
    "acoustic_rw",
    "thickness_mm",
    "fire_rating",
    "durability_years",
    "cost_per_sqm",
    "maintenance_freq_per_year",
    "solar_control_coating",
    "impact_resistance",
    "environmental_suitability",
];

/// Load the opaque-material catalog, preserving file order.
pub fn load_materials(
    path: impl AsRef<Path>,
    mode: NumericMode,
) -> Result<Vec<MaterialRecord>, CatalogError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    check_columns(&headers, MATERIAL_COLUMNS)?;

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        // Data rows start at line 2, after the header.
        let row = Row { headers: &headers, record: &record, line: index + 2, mode };
        records.push(MaterialRecord {
            material_id: MaterialId(row.text("material_id")),
            material_type: row.text("material_type"),
            material_subtype: row.text("material_subtype"),
            cost_per_sqm: row.numeric("cost_per_sqm")?,
            installation_cost_per_sqm: row.numeric("installation_cost_per_sqm")?,
            material_u_value: row.numeric("material_u_value")?,
            material_shgc: row.numeric("material_shgc")?,
            material_vlt_percent: row.numeric("material_vlt_percent")?,
            fire_rating: row.text("fire_rating"),
            durability_years: row.numeric("durability_years")?,
            maintenance_freq_per_year: row.numeric("maintenance_freq_per_year")?,
            acoustic_rating_rw: row.numeric("acoustic_rating_rw")?,
            water_absorption_pct: row.numeric("water_absorption_pct")?,
            material_density_kgm3: row.numeric("material_density_kgm3")?,
            surface_reflectivity_pct: row.numeric("surface_reflectivity_pct")?,
            material_lifespan_years: row.numeric("material_lifespan_years")?,
        });
    }
    Ok(records)
}

/// Load the glazing catalog, preserving file order.
pub fn load_glass(
    path: impl AsRef<Path>,
    mode: NumericMode,
) -> Result<Vec<GlassRecord>, CatalogError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    check_columns(&headers, GLASS_COLUMNS)?;

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let row = Row { headers: &headers, record: &record, line: index + 2, mode };
        records.push(GlassRecord {
            glass_type: row.text("glass_type"),
            u_value: row.numeric("u_value")?,
            shgc: row.numeric("shgc")?,
            vlt: row.numeric("vlt")?,
            acoustic_rw: row.numeric("acoustic_rw")?,
            thickness_mm: row.numeric("thickness_mm")?,
            fire_rating: row.text("fire_rating"),
            durability_years: row.numeric("durability_years")?,
            cost_per_sqm: row.numeric("cost_per_sqm")?,
            maintenance_freq_per_year: row.numeric("maintenance_freq_per_year")?,
            solar_control_coating: row.text("solar_control_coating"),
            impact_resistance: row.text("impact_resistance"),
            environmental_suitability: row.text("environmental_suitability"),
            recommended_climate: row.optional_text("recommended_climate"),
        });
    }
    Ok(records)
}

fn check_columns(headers: &csv::StringRecord, required: &[&str]) -> Result<(), CatalogError> {
    for column in required {
        if !headers.iter().any(|header| header == *column) {
            return Err(CatalogError::MissingColumn((*column).to_owned()));
        }
    }
    Ok(())
}

struct Row<'a> {
    headers: &'a csv::StringRecord,
    record: &'a csv::StringRecord,
    line: usize,
    mode: NumericMode,
}

impl Row<'_> {
    fn cell(&self, column: &str) -> &str {
        self.headers
            .iter()
            .position(|header| header == column)
            .and_then(|index| self.record.get(index))
            .unwrap_or("")
    }

    fn text(&self, column: &str) -> String {
        self.cell(column).trim().to_owned()
    }

    fn optional_text(&self, column: &str) -> Option<String> {
        let value = self.text(column);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    fn numeric(&self, column: &str) -> Result<f64, CatalogError> {
        let raw = self.cell(column).trim();
        match raw.parse::<f64>() {
            Ok(value) => Ok(value),
            Err(_) => match self.mode {
                NumericMode::Lenient => Ok(0.0),
                NumericMode::Strict => Err(CatalogError::InvalidNumeric {
                    column: column.to_owned(),
                    row: self.line,
                    value: raw.to_owned(),
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{load_glass, load_materials, NumericMode};
    use crate::errors::CatalogError;

    const GLASS_HEADER: &str = "glass_type,u_value,shgc,vlt,acoustic_rw,thickness_mm,fire_rating,durability_years,cost_per_sqm,maintenance_freq_per_year,solar_control_coating,impact_resistance,environmental_suitability";

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn loads_glass_rows_in_file_order() {
        let file = write_csv(&format!(
            "{GLASS_HEADER}\n\
             double_glazed,1.6,0.35,70,34,24,B,20,150,2,low-e,medium,temperate\n\
             triple_glazed,0.8,0.25,55,42,36,A,25,320,1,low-e,high,cold\n"
        ));

        let records = load_glass(file.path(), NumericMode::Strict).expect("valid catalog");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].glass_type, "double_glazed");
        assert_eq!(records[1].u_value, 0.8);
        assert_eq!(records[1].recommended_climate, None);
    }

    #[test]
    fn missing_column_aborts_before_any_row_is_read() {
        let file = write_csv(
            "glass_type,u_value,shgc\n\
             double_glazed,1.6,0.35\n",
        );

        let error = load_glass(file.path(), NumericMode::Strict).expect_err("schema error");
        assert!(matches!(error, CatalogError::MissingColumn(ref column) if column == "vlt"));
    }

    #[test]
    fn strict_mode_rejects_unparsable_numeric_cells() {
        let file = write_csv(&format!(
            "{GLASS_HEADER}\n\
             double_glazed,cheap,0.35,70,34,24,B,20,150,2,low-e,medium,temperate\n"
        ));

        let error = load_glass(file.path(), NumericMode::Strict).expect_err("bad cell");
        assert!(matches!(
            error,
            CatalogError::InvalidNumeric { ref column, row: 2, .. } if column == "u_value"
        ));
    }

    #[test]
    fn lenient_mode_coerces_bad_cells_to_zero() {
        let file = write_csv(&format!(
            "{GLASS_HEADER}\n\
             double_glazed,cheap,0.35,,34,24,B,20,150,2,low-e,medium,temperate\n"
        ));

        let records = load_glass(file.path(), NumericMode::Lenient).expect("coerced");
        assert_eq!(records[0].u_value, 0.0);
        assert_eq!(records[0].vlt, 0.0);
    }

    #[test]
    fn loads_material_catalog_with_full_schema() {
        let file = write_csv(
            "material_id,material_type,material_subtype,cost_per_sqm,installation_cost_per_sqm,material_u_value,material_shgc,material_vlt_percent,fire_rating,durability_years,maintenance_freq_per_year,acoustic_rating_rw,water_absorption_pct,material_density_kgm3,surface_reflectivity_pct,material_lifespan_years\n\
             MAT-001,Brick,Clay,95,40,1.2,0.4,0,A1,40,1,45,8,1800,30,80\n",
        );

        let records = load_materials(file.path(), NumericMode::Strict).expect("valid catalog");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].material_id.0, "MAT-001");
        assert_eq!(records[0].material_type, "Brick");
        assert_eq!(records[0].material_density_kgm3, 1800.0);
    }

    #[test]
    fn missing_material_column_names_the_column() {
        let file = write_csv("material_id,material_type\nMAT-001,Brick\n");
        let error = load_materials(file.path(), NumericMode::Strict).expect_err("schema error");
        assert!(
            matches!(error, CatalogError::MissingColumn(ref column) if column == "material_subtype")
        );
    }
}
