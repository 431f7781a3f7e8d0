//! Project validation logic.

use crate::schema::{CaseDef, CaseKindDef, FluxDef, Project};
use std::collections::HashSet;

pub const LATEST_VERSION: u32 = 1;

/// Smallest plate grid the five-point stencil accepts.
const MIN_GRID_POINTS: usize = 3;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version == 0 || project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut case_ids = HashSet::new();
    for case in &project.cases {
        if case.id.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("case '{}' id", case.name),
                value: format!("{:?}", case.id),
                reason: "must not be empty".to_string(),
            });
        }
        if !case_ids.insert(&case.id) {
            return Err(ValidationError::DuplicateId {
                id: case.id.clone(),
                context: "cases".to_string(),
            });
        }
        validate_case(case)?;
    }

    Ok(())
}

fn validate_case(case: &CaseDef) -> Result<(), ValidationError> {
    let id = case.id.as_str();
    match &case.kind {
        CaseKindDef::Conduction {
            nx,
            ny,
            domain_length_m,
            left_value,
            top_value,
            tolerance,
            max_iterations,
            flux,
        } => {
            validate_grid_size("nx", *nx, id)?;
            validate_grid_size("ny", *ny, id)?;
            validate_plate(
                id,
                *domain_length_m,
                *left_value,
                *top_value,
                *tolerance,
                *max_iterations,
            )?;
            if let Some(flux) = flux {
                validate_flux(flux, id)?;
            }
        }
        CaseKindDef::Refinement {
            sizes,
            domain_length_m,
            left_value,
            top_value,
            tolerance,
            max_iterations,
        } => {
            if sizes.is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: format!("case '{}' sizes", id),
                    value: "[]".to_string(),
                    reason: "must list at least one grid size".to_string(),
                });
            }
            for n in sizes {
                validate_grid_size("sizes", *n, id)?;
            }
            validate_plate(
                id,
                *domain_length_m,
                *left_value,
                *top_value,
                *tolerance,
                *max_iterations,
            )?;
        }
        CaseKindDef::Nozzle {
            gamma,
            area_ratio_start,
            area_ratio_end,
            points,
        } => {
            validate_gamma(*gamma, id)?;
            validate_area_ratio("area_ratio_start", *area_ratio_start, id)?;
            validate_area_ratio("area_ratio_end", *area_ratio_end, id)?;
            if area_ratio_end < area_ratio_start {
                return Err(ValidationError::InvalidValue {
                    field: format!("case '{}' area_ratio_end", id),
                    value: area_ratio_end.to_string(),
                    reason: format!("must not be below area_ratio_start ({})", area_ratio_start),
                });
            }
            if *points == 0 {
                return Err(ValidationError::InvalidValue {
                    field: format!("case '{}' points", id),
                    value: points.to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
        }
        CaseKindDef::Combustion {
            mixture_ratios,
            expansion_ratio,
        } => {
            if mixture_ratios.is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: format!("case '{}' mixture_ratios", id),
                    value: "[]".to_string(),
                    reason: "must list at least one ratio".to_string(),
                });
            }
            for r in mixture_ratios {
                validate_positive_finite("mixture_ratios", *r, id)?;
            }
            validate_area_ratio("expansion_ratio", *expansion_ratio, id)?;
        }
        CaseKindDef::CeaReference { expansion_ratio } => {
            validate_area_ratio("expansion_ratio", *expansion_ratio, id)?;
        }
        CaseKindDef::MaskedField { grid_size } => {
            if *grid_size < 2 {
                return Err(ValidationError::InvalidValue {
                    field: format!("case '{}' grid_size", id),
                    value: grid_size.to_string(),
                    reason: "must be at least 2".to_string(),
                });
            }
        }
    }
    Ok(())
}

fn validate_plate(
    id: &str,
    domain_length_m: f64,
    left_value: f64,
    top_value: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<(), ValidationError> {
    validate_positive_finite("domain_length_m", domain_length_m, id)?;
    validate_finite("left_value", left_value, id)?;
    validate_finite("top_value", top_value, id)?;
    validate_positive_finite("tolerance", tolerance, id)?;
    if max_iterations == 0 {
        return Err(ValidationError::InvalidValue {
            field: format!("case '{}' max_iterations", id),
            value: max_iterations.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_flux(flux: &FluxDef, id: &str) -> Result<(), ValidationError> {
    validate_positive_finite("flux.conductivity", flux.conductivity, id)?;
    validate_positive_finite("flux.depth", flux.depth, id)
}

fn validate_grid_size(field: &str, n: usize, id: &str) -> Result<(), ValidationError> {
    if n < MIN_GRID_POINTS {
        return Err(ValidationError::InvalidValue {
            field: format!("case '{}' {}", id, field),
            value: n.to_string(),
            reason: format!("must be at least {}", MIN_GRID_POINTS),
        });
    }
    Ok(())
}

fn validate_gamma(gamma: f64, id: &str) -> Result<(), ValidationError> {
    if !gamma.is_finite() || gamma <= 1.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("case '{}' gamma", id),
            value: gamma.to_string(),
            reason: "must be finite and greater than 1".to_string(),
        });
    }
    Ok(())
}

fn validate_area_ratio(field: &str, value: f64, id: &str) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 1.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("case '{}' {}", id, field),
            value: value.to_string(),
            reason: "must be finite and at least 1".to_string(),
        });
    }
    Ok(())
}

fn validate_finite(field: &str, value: f64, id: &str) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidValue {
            field: format!("case '{}' {}", id, field),
            value: value.to_string(),
            reason: "must be finite".to_string(),
        });
    }
    Ok(())
}

fn validate_positive_finite(field: &str, value: f64, id: &str) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: format!("case '{}' {}", id, field),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nozzle(id: &str, gamma: f64) -> CaseDef {
        CaseDef {
            id: id.to_string(),
            name: "Nozzle".to_string(),
            kind: CaseKindDef::Nozzle {
                gamma,
                area_ratio_start: 1.0,
                area_ratio_end: 40.0,
                points: 100,
            },
        }
    }

    fn project(cases: Vec<CaseDef>) -> Project {
        Project {
            version: LATEST_VERSION,
            name: "test".to_string(),
            cases,
        }
    }

    #[test]
    fn rejects_duplicate_case_ids() {
        let p = project(vec![nozzle("a", 1.4), nozzle("a", 1.3)]);
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn rejects_unknown_versions() {
        let mut p = project(vec![]);
        p.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
        p.version = 0;
        assert!(validate_project(&p).is_err());
    }

    #[test]
    fn rejects_sub_unity_gamma() {
        let p = project(vec![nozzle("n", 0.9)]);
        let err = validate_project(&p).unwrap_err();
        assert!(err.to_string().contains("gamma"));
    }

    #[test]
    fn rejects_reversed_area_ratio_range() {
        let case = CaseDef {
            id: "n".to_string(),
            name: "Nozzle".to_string(),
            kind: CaseKindDef::Nozzle {
                gamma: 1.4,
                area_ratio_start: 10.0,
                area_ratio_end: 2.0,
                points: 5,
            },
        };
        assert!(validate_project(&project(vec![case])).is_err());
    }
}
