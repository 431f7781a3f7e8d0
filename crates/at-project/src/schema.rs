//! Project schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub cases: Vec<CaseDef>,
}

impl Project {
    pub fn case(&self, id: &str) -> Option<&CaseDef> {
        self.cases.iter().find(|c| c.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseDef {
    pub id: String,
    pub name: String,
    pub kind: CaseKindDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum CaseKindDef {
    /// Insulated plate: left and top fixed, right and bottom insulated.
    Conduction {
        nx: usize,
        ny: usize,
        domain_length_m: f64,
        left_value: f64,
        top_value: f64,
        #[serde(default = "default_tolerance")]
        tolerance: f64,
        #[serde(default = "default_max_iterations")]
        max_iterations: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flux: Option<FluxDef>,
    },
    /// The plate solved on each square grid in `sizes`.
    Refinement {
        sizes: Vec<usize>,
        domain_length_m: f64,
        left_value: f64,
        top_value: f64,
        #[serde(default = "default_tolerance")]
        tolerance: f64,
        #[serde(default = "default_max_iterations")]
        max_iterations: usize,
    },
    /// Supersonic exit Mach and pressure ratio over a range of `A/A*`.
    Nozzle {
        gamma: f64,
        #[serde(default = "default_area_ratio_start")]
        area_ratio_start: f64,
        #[serde(default = "default_area_ratio_end")]
        area_ratio_end: f64,
        #[serde(default = "default_points")]
        points: usize,
    },
    Combustion {
        #[serde(default = "default_mixture_ratios")]
        mixture_ratios: Vec<f64>,
        #[serde(default = "default_expansion_ratio")]
        expansion_ratio: f64,
    },
    /// CEA tables plus per-parameter comparisons against the computed model.
    CeaReference {
        #[serde(default = "default_expansion_ratio")]
        expansion_ratio: f64,
    },
    MaskedField {
        #[serde(default = "default_grid_size")]
        grid_size: usize,
    },
}

impl CaseKindDef {
    pub fn type_name(&self) -> &'static str {
        match self {
            CaseKindDef::Conduction { .. } => "Conduction",
            CaseKindDef::Refinement { .. } => "Refinement",
            CaseKindDef::Nozzle { .. } => "Nozzle",
            CaseKindDef::Combustion { .. } => "Combustion",
            CaseKindDef::CeaReference { .. } => "CeaReference",
            CaseKindDef::MaskedField { .. } => "MaskedField",
        }
    }
}

/// Material data for post-processing a conduction result into heat flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FluxDef {
    /// W/(m K)
    pub conductivity: f64,
    /// Out-of-plane depth, m
    #[serde(default = "default_depth")]
    pub depth: f64,
}

fn default_tolerance() -> f64 {
    1e-6
}

fn default_max_iterations() -> usize {
    10_000
}

fn default_area_ratio_start() -> f64 {
    1.0
}

fn default_area_ratio_end() -> f64 {
    40.0
}

fn default_points() -> usize {
    100
}

fn default_mixture_ratios() -> Vec<f64> {
    vec![8.0, 6.0, 4.7]
}

fn default_expansion_ratio() -> f64 {
    25.0
}

fn default_grid_size() -> usize {
    100
}

fn default_depth() -> f64 {
    1.0
}
