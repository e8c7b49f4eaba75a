//! Topological and numerical invariant checks for a finished grid.

use std::fmt;

use crate::cell::CellId;
use crate::grid::HexGrid;
use crate::icosahedron::VERTEX_COUNT;

/// Allowed deviation of a cell position's length from 1.
pub const UNIT_LENGTH_TOLERANCE: f64 = 1e-3;

/// One broken invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("invalid pentagon count: expected 12, found {found}")]
    PentagonCount { found: usize },

    #[error("invalid total cell count: expected {expected}, found {found}")]
    TotalCount { expected: u64, found: usize },

    #[error(
        "stored counts out of date: {stored_total} total / {stored_pentagons} pentagons stored, \
         {actual_total} / {actual_pentagons} present"
    )]
    StaleCounts {
        stored_total: usize,
        stored_pentagons: usize,
        actual_total: usize,
        actual_pentagons: usize,
    },

    #[error("cell id mismatch at index {index}: found {found}")]
    IdMismatch { index: usize, found: CellId },

    #[error("neighbor count mismatch at cell {cell}: expected {expected}, found {found}")]
    NeighborCount {
        cell: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell {cell} lists out-of-range neighbor {neighbor}")]
    NeighborOutOfRange { cell: usize, neighbor: CellId },

    #[error("neighbor symmetry mismatch: cell {cell} lists {neighbor}, which does not list it back")]
    AsymmetricNeighbor { cell: usize, neighbor: CellId },

    #[error("cell {cell} is not normalized, length={length}")]
    NotNormalized { cell: usize, length: f64 },
}

/// Every issue found by one validation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// One human-readable line per issue.
    pub fn diagnostics(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return f.write_str("grid is valid");
        }
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Check every grid invariant and collect the failures.
///
/// Never panics, including on grids with out-of-range neighbor ids or
/// inconsistent bookkeeping (e.g. after deserializing a corrupted grid).
pub(crate) fn validate_grid(grid: &HexGrid) -> ValidationReport {
    let mut issues = Vec::new();
    let cells = grid.cells();

    let actual_pentagons = cells.iter().filter(|c| c.is_pentagon()).count();
    if actual_pentagons != VERTEX_COUNT {
        issues.push(ValidationIssue::PentagonCount {
            found: actual_pentagons,
        });
    }

    let expected = grid.level().expected_cell_count();
    if cells.len() as u64 != expected {
        issues.push(ValidationIssue::TotalCount {
            expected,
            found: cells.len(),
        });
    }

    let counts = grid.counts();
    if counts.total != cells.len() || counts.pentagons != actual_pentagons {
        issues.push(ValidationIssue::StaleCounts {
            stored_total: counts.total,
            stored_pentagons: counts.pentagons,
            actual_total: cells.len(),
            actual_pentagons,
        });
    }

    for (index, cell) in cells.iter().enumerate() {
        if cell.id.index() != index {
            issues.push(ValidationIssue::IdMismatch {
                index,
                found: cell.id,
            });
        }

        let expected = cell.expected_neighbor_count();
        if cell.neighbors.len() != expected {
            issues.push(ValidationIssue::NeighborCount {
                cell: index,
                expected,
                found: cell.neighbors.len(),
            });
        }

        // Each one-sided edge is reported once, from the side that lists it.
        let this = CellId::from_index(index);
        for &neighbor in &cell.neighbors {
            match cells.get(neighbor.index()) {
                None => issues.push(ValidationIssue::NeighborOutOfRange {
                    cell: index,
                    neighbor,
                }),
                Some(other) if !other.has_neighbor(this) => {
                    issues.push(ValidationIssue::AsymmetricNeighbor {
                        cell: index,
                        neighbor,
                    });
                }
                Some(_) => {}
            }
        }

        let length = cell.position.length();
        if (length - 1.0).abs() > UNIT_LENGTH_TOLERANCE {
            issues.push(ValidationIssue::NotNormalized {
                cell: index,
                length,
            });
        }
    }

    ValidationReport::from_issues(issues)
}
