//! NASA CEA rocket results for the H2/O2 cases at an expansion ratio of 25.
//!
//! Two runs of the same propellant: shifting equilibrium through the nozzle and
//! composition frozen at the chamber.

use crate::error::CombustionResult;
use at_core::numeric::Real;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CeaMode {
    Equilibrium,
    Frozen,
}

impl CeaMode {
    pub const ALL: [CeaMode; 2] = [CeaMode::Equilibrium, CeaMode::Frozen];

    pub fn key(&self) -> &'static str {
        match self {
            CeaMode::Equilibrium => "equilibrium",
            CeaMode::Frozen => "frozen",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            CeaMode::Equilibrium => "cea_results_equilibrium.csv",
            CeaMode::Frozen => "cea_results_frozen.csv",
        }
    }

    /// The two tables were saved with different specific impulse headers.
    pub fn isp_column(&self) -> &'static str {
        match self {
            CeaMode::Equilibrium => "I_sp (s)",
            CeaMode::Frozen => "I_sp",
        }
    }
}

impl fmt::Display for CeaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One CEA result row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CeaRow {
    pub r: Real,
    /// s
    pub isp: Real,
    /// g/mol
    pub molar_mass: Real,
    pub gamma: Real,
    pub thrust_coefficient: Real,
    /// m/s
    pub c_star: Real,
    /// OH mass fraction at the exit
    pub y_oh: Real,
}

const fn row(
    r: Real,
    isp: Real,
    molar_mass: Real,
    gamma: Real,
    thrust_coefficient: Real,
    c_star: Real,
    y_oh: Real,
) -> CeaRow {
    CeaRow {
        r,
        isp,
        molar_mass,
        gamma,
        thrust_coefficient,
        c_star,
        y_oh,
    }
}

const EQUILIBRIUM: [CeaRow; 3] = [
    row(8.0, 402.55, 17.7204, 1.1295, 1.7984, 2196.0, 0.15070),
    row(6.0, 429.77, 14.1191, 1.2191, 1.7819, 2366.0, 0.00005),
    row(4.7, 441.28, 11.4891, 1.2661, 1.7526, 2470.0, 0.0),
];

const FROZEN: [CeaRow; 3] = [
    row(8.0, 413.75, 15.9028, 1.2525, 1.7958, 2151.0, 0.11417),
    row(6.0, 445.34, 13.3114, 1.2643, 1.7887, 2323.0, 0.06899),
    row(4.7, 464.87, 11.1861, 1.2880, 1.7528, 2437.0, 0.02780),
];

#[derive(Serialize)]
struct EquilibriumRecord {
    r: Real,
    #[serde(rename = "I_sp (s)")]
    isp: Real,
    #[serde(rename = "MW")]
    molar_mass: Real,
    #[serde(rename = "γ")]
    gamma: Real,
    #[serde(rename = "C_T")]
    thrust_coefficient: Real,
    #[serde(rename = "C^*")]
    c_star: Real,
    #[serde(rename = "Y_OH")]
    y_oh: Real,
}

#[derive(Serialize)]
struct FrozenRecord {
    r: Real,
    #[serde(rename = "I_sp")]
    isp: Real,
    #[serde(rename = "MW")]
    molar_mass: Real,
    #[serde(rename = "γ")]
    gamma: Real,
    #[serde(rename = "C_T")]
    thrust_coefficient: Real,
    #[serde(rename = "C^*")]
    c_star: Real,
    #[serde(rename = "Y_OH")]
    y_oh: Real,
}

/// Tabulated CEA results for one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    pub mode: CeaMode,
    pub rows: Vec<CeaRow>,
}

impl ReferenceTable {
    pub fn for_mode(mode: CeaMode) -> Self {
        let rows = match mode {
            CeaMode::Equilibrium => EQUILIBRIUM.to_vec(),
            CeaMode::Frozen => FROZEN.to_vec(),
        };
        Self { mode, rows }
    }

    pub fn equilibrium() -> Self {
        Self::for_mode(CeaMode::Equilibrium)
    }

    pub fn frozen() -> Self {
        Self::for_mode(CeaMode::Frozen)
    }

    pub fn r_values(&self) -> Vec<Real> {
        self.rows.iter().map(|row| row.r).collect()
    }

    /// Values of the named CSV column, if this mode's table has one.
    pub fn column(&self, name: &str) -> Option<Vec<Real>> {
        let pick: fn(&CeaRow) -> Real = match name {
            "r" => |row| row.r,
            "MW" => |row| row.molar_mass,
            "γ" => |row| row.gamma,
            "C_T" => |row| row.thrust_coefficient,
            "C^*" => |row| row.c_star,
            "Y_OH" => |row| row.y_oh,
            n if n == self.mode.isp_column() => |row| row.isp,
            _ => return None,
        };
        Some(self.rows.iter().map(pick).collect())
    }

    /// Write the table under its conventional file name in `dir`.
    pub fn write_csv(&self, dir: &Path) -> CombustionResult<PathBuf> {
        let path = dir.join(self.mode.file_name());
        match self.mode {
            CeaMode::Equilibrium => {
                let records: Vec<EquilibriumRecord> = self
                    .rows
                    .iter()
                    .map(|row| EquilibriumRecord {
                        r: row.r,
                        isp: row.isp,
                        molar_mass: row.molar_mass,
                        gamma: row.gamma,
                        thrust_coefficient: row.thrust_coefficient,
                        c_star: row.c_star,
                        y_oh: row.y_oh,
                    })
                    .collect();
                at_results::write_table(&path, &records)?;
            }
            CeaMode::Frozen => {
                let records: Vec<FrozenRecord> = self
                    .rows
                    .iter()
                    .map(|row| FrozenRecord {
                        r: row.r,
                        isp: row.isp,
                        molar_mass: row.molar_mass,
                        gamma: row.gamma,
                        thrust_coefficient: row.thrust_coefficient,
                        c_star: row.c_star,
                        y_oh: row.y_oh,
                    })
                    .collect();
                at_results::write_table(&path, &records)?;
            }
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isp_header_differs_by_mode() {
        let eq = ReferenceTable::equilibrium();
        let fr = ReferenceTable::frozen();
        assert_eq!(eq.column("I_sp (s)").unwrap()[0], 402.55);
        assert!(eq.column("I_sp").is_none());
        assert_eq!(fr.column("I_sp").unwrap()[2], 464.87);
        assert!(fr.column("I_sp (s)").is_none());
    }

    #[test]
    fn tables_share_mixture_ratios() {
        assert_eq!(
            ReferenceTable::equilibrium().r_values(),
            ReferenceTable::frozen().r_values()
        );
        assert_eq!(ReferenceTable::frozen().column("Y_OH").unwrap()[1], 0.06899);
    }

    #[test]
    fn writes_mode_specific_file() {
        let dir = std::env::temp_dir().join("at_combustion_cea");
        std::fs::create_dir_all(&dir).unwrap();

        let path = ReferenceTable::frozen().write_csv(&dir).unwrap();
        assert!(path.ends_with("cea_results_frozen.csv"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().next(), Some("r,I_sp,MW,γ,C_T,C^*,Y_OH"));
        assert_eq!(content.lines().count(), 4);
    }
}
