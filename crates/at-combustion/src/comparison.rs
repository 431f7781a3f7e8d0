//! Equilibrium, frozen and computed values of one parameter, side by side.

use crate::cea::{CeaMode, ReferenceTable};
use crate::error::CombustionResult;
use crate::performance::PerformanceTable;
use at_core::numeric::{Real, Tolerances, nearly_equal};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Quantities reported by both CEA and the frozen model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Isp,
    MolarMass,
    Gamma,
    ThrustCoefficient,
    CharacteristicVelocity,
    OhMassFraction,
}

impl Parameter {
    pub const ALL: [Parameter; 6] = [
        Parameter::Isp,
        Parameter::MolarMass,
        Parameter::Gamma,
        Parameter::ThrustCoefficient,
        Parameter::CharacteristicVelocity,
        Parameter::OhMassFraction,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Isp => "I_sp",
            Parameter::MolarMass => "MW",
            Parameter::Gamma => "γ",
            Parameter::ThrustCoefficient => "C_T",
            Parameter::CharacteristicVelocity => "C^*",
            Parameter::OhMassFraction => "Y_OH",
        }
    }

    /// ASCII name for file names.
    pub fn key(&self) -> &'static str {
        match self {
            Parameter::Isp => "isp",
            Parameter::MolarMass => "mw",
            Parameter::Gamma => "gamma",
            Parameter::ThrustCoefficient => "c_t",
            Parameter::CharacteristicVelocity => "c_star",
            Parameter::OhMassFraction => "y_oh",
        }
    }

    fn reference_column(&self, mode: CeaMode) -> &'static str {
        match self {
            Parameter::Isp => mode.isp_column(),
            _ => self.label(),
        }
    }

    fn computed_column(&self) -> &'static str {
        match self {
            Parameter::Isp => "I_sp (s)",
            Parameter::ThrustCoefficient => "CT",
            _ => self.label(),
        }
    }
}

/// One mixture ratio; `None` where a source has no value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub r: Real,
    pub equilibrium: Option<Real>,
    pub frozen: Option<Real>,
    pub computed: Option<Real>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub parameter: Parameter,
    /// Rows in order of first appearance of each `r`.
    pub rows: Vec<ComparisonRow>,
    /// False when the computed table has no column for the parameter.
    pub has_computed: bool,
}

impl Comparison {
    pub fn file_name(&self) -> String {
        format!("comparison_{}.csv", self.parameter.key())
    }

    pub fn write_csv(&self, dir: &Path) -> CombustionResult<PathBuf> {
        let path = dir.join(self.file_name());
        at_results::write_table(&path, &self.rows)?;
        Ok(path)
    }
}

/// Align one parameter from the three sources by mixture ratio.
pub fn compare(
    parameter: Parameter,
    equilibrium: &ReferenceTable,
    frozen: &ReferenceTable,
    computed: &PerformanceTable,
) -> Comparison {
    let eq = series(
        equilibrium.r_values(),
        equilibrium.column(parameter.reference_column(equilibrium.mode)),
    );
    let fr = series(
        frozen.r_values(),
        frozen.column(parameter.reference_column(frozen.mode)),
    );
    let column = parameter.computed_column();
    let comp = series(computed.r_values(), computed.column(column));
    if comp.is_none() {
        warn!(parameter = parameter.label(), column, "not found in combustion data");
    }

    let mut r_all: Vec<Real> = Vec::new();
    for (r, _) in [&eq, &fr, &comp].into_iter().flatten().flatten() {
        if !r_all.iter().any(|x| same_r(*x, *r)) {
            r_all.push(*r);
        }
    }

    let rows = r_all
        .into_iter()
        .map(|r| ComparisonRow {
            r,
            equilibrium: lookup(&eq, r),
            frozen: lookup(&fr, r),
            computed: lookup(&comp, r),
        })
        .collect();

    Comparison {
        parameter,
        rows,
        has_computed: comp.is_some(),
    }
}

type Series = Option<Vec<(Real, Real)>>;

fn series(r: Vec<Real>, values: Option<Vec<Real>>) -> Series {
    values.map(|v| r.into_iter().zip(v).collect())
}

fn lookup(series: &Series, r: Real) -> Option<Real> {
    series
        .as_ref()?
        .iter()
        .find(|(x, _)| same_r(*x, r))
        .map(|(_, v)| *v)
}

fn same_r(a: Real, b: Real) -> bool {
    nearly_equal(a, b, Tolerances::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::performance::DEFAULT_MIXTURE_RATIOS;

    fn computed() -> PerformanceTable {
        PerformanceTable::evaluate(&DEFAULT_MIXTURE_RATIOS, 25.0).unwrap()
    }

    #[test]
    fn isp_uses_each_tables_header() {
        let cmp = compare(
            Parameter::Isp,
            &ReferenceTable::equilibrium(),
            &ReferenceTable::frozen(),
            &computed(),
        );
        assert_eq!(cmp.rows.len(), 3);
        assert_eq!(cmp.rows[0].r, 8.0);
        assert_eq!(cmp.rows[0].equilibrium, Some(402.55));
        assert_eq!(cmp.rows[0].frozen, Some(413.75));
        assert!(cmp.rows[0].computed.is_some());
    }

    #[test]
    fn missing_computed_column_is_none() {
        let cmp = compare(
            Parameter::OhMassFraction,
            &ReferenceTable::equilibrium(),
            &ReferenceTable::frozen(),
            &computed(),
        );
        assert!(!cmp.has_computed);
        assert!(cmp.rows.iter().all(|row| row.computed.is_none()));
        assert_eq!(cmp.rows[2].frozen, Some(0.02780));
    }

    #[test]
    fn extra_computed_ratios_get_their_own_rows() {
        let table = PerformanceTable::evaluate(&[8.0, 5.0], 25.0).unwrap();
        let cmp = compare(
            Parameter::ThrustCoefficient,
            &ReferenceTable::equilibrium(),
            &ReferenceTable::frozen(),
            &table,
        );
        assert_eq!(cmp.rows.len(), 4);
        let last = cmp.rows[3];
        assert_eq!(last.r, 5.0);
        assert!(last.equilibrium.is_none());
        assert!(last.computed.is_some());
        // 4.7 has references but no computed value
        assert!(cmp.rows[2].computed.is_none());
    }
}
