//! Human and machine readable grid reports.

use std::fmt::Write as _;

use nebula_hexgrid::{AreaStatistics, CellCounts, GridSummary, HexGrid};
use serde::Serialize;

/// Everything printed after a successful generation. Grids reaching this
/// point have already passed validation inside the generator.
#[derive(Debug, Clone, Serialize)]
pub struct GridReport {
    pub level: u32,
    pub recommendation: &'static str,
    pub expected_cells: u64,
    pub counts: CellCounts,
    pub statistics: AreaStatistics,
    pub area_ratio: f64,
}

impl GridReport {
    pub fn new(grid: &HexGrid) -> Self {
        let GridSummary {
            level,
            counts,
            statistics,
        } = grid.summary();
        let checked = grid.level();
        Self {
            level,
            recommendation: checked.tier().recommendation(),
            expected_cells: checked.expected_cell_count(),
            counts,
            statistics,
            area_ratio: statistics.max_to_min_ratio(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Hex grid level {} ({})", self.level, self.recommendation);
        let _ = writeln!(
            out,
            "  cells:      {} ({} hexagons, {} pentagons; expected {})",
            self.counts.total, self.counts.hexagons, self.counts.pentagons, self.expected_cells
        );
        let _ = writeln!(
            out,
            "  area:       min {:.6e}  max {:.6e}  mean {:.6e}  std dev {:.6e}",
            self.statistics.min, self.statistics.max, self.statistics.mean, self.statistics.std_dev
        );
        let _ = write!(out, "  max/min:    {:.4}", self.area_ratio);
        out
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> GridReport {
        GridReport::new(&nebula_hexgrid::generate(2).unwrap())
    }

    #[test]
    fn test_report_fields() {
        let report = report();
        assert_eq!(report.level, 2);
        assert_eq!(report.expected_cells, 162);
        assert_eq!(report.counts.total, 162);
        assert_eq!(report.counts.pentagons, 12);
        assert!(report.area_ratio >= 1.0);
    }

    #[test]
    fn test_text_report() {
        let text = report().to_text();
        assert!(text.starts_with("Hex grid level 2 (Very Low"));
        assert!(text.contains("162 (150 hexagons, 12 pentagons; expected 162)"));
        assert!(text.lines().last().is_some_and(|l| l.starts_with("  max/min:")));
        assert!(!text.contains("validation"));
    }

    #[test]
    fn test_json_report() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["level"], 2);
        assert_eq!(value["counts"]["hexagons"], 150);
        assert!(value.get("valid").is_none());
        assert!(value["statistics"]["mean"].as_f64().unwrap() > 0.0);
    }
}
