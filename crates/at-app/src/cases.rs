//! Execution of a single case definition.

use at_combustion::{
    CeaMode, Parameter, PerformanceTable, ReferenceTable, RocketPerformance, compare,
};
use at_conduction::{
    ConductionProblem, Edge, FluxParams, SolverConfig, boundary_heat_flow, heat_flux,
    refinement_study, solve,
};
use at_core::units::{m, w_per_m_k};
use at_flow::IsentropicFlow;
use at_project::schema::{CaseKindDef, FluxDef};
use at_results::{SummaryValue, write_matrix_csv, write_table};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::AppResult;

pub const TEMPERATURE_FILE: &str = "temperature.csv";
pub const REFINEMENT_FILE: &str = "refinement.csv";
pub const NOZZLE_FILE: &str = "nozzle_sweep.csv";
pub const MASKED_FIELD_FILE: &str = "masked_field.csv";

/// What a case produced: files written (relative to the output directory)
/// and headline numbers.
#[derive(Debug, Clone, Default)]
pub struct CaseOutput {
    pub files: Vec<String>,
    pub summary: Vec<SummaryValue>,
}

impl CaseOutput {
    fn push(&mut self, name: impl Into<String>, value: f64) {
        self.summary.push(SummaryValue::new(name, value));
    }

    fn file(&mut self, path: &Path) {
        if let Some(name) = path.file_name() {
            self.files.push(name.to_string_lossy().to_string());
        }
    }
}

#[derive(Serialize)]
struct RefinementRecord {
    n: usize,
    iterations: usize,
    max_temperature: f64,
    final_error: f64,
    converged: bool,
}

#[derive(Serialize)]
struct MaskedRecord {
    x: f64,
    y: f64,
    z: f64,
}

/// Run `kind`, writing its CSV outputs into `out_dir` when one is given.
pub fn execute_case(kind: &CaseKindDef, out_dir: Option<&Path>) -> AppResult<CaseOutput> {
    debug!(kind = kind.type_name(), "executing case");
    match kind {
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
            let problem = ConductionProblem {
                nx: *nx,
                ny: *ny,
                domain_length: *domain_length_m,
                left_value: *left_value,
                top_value: *top_value,
                config: SolverConfig {
                    tolerance: *tolerance,
                    max_iterations: *max_iterations,
                },
            };
            run_conduction(&problem, flux.as_ref(), out_dir)
        }
        CaseKindDef::Refinement {
            sizes,
            domain_length_m,
            left_value,
            top_value,
            tolerance,
            max_iterations,
        } => {
            let template = ConductionProblem {
                domain_length: *domain_length_m,
                left_value: *left_value,
                top_value: *top_value,
                config: SolverConfig {
                    tolerance: *tolerance,
                    max_iterations: *max_iterations,
                },
                ..ConductionProblem::default()
            };
            run_refinement(sizes, &template, out_dir)
        }
        CaseKindDef::Nozzle {
            gamma,
            area_ratio_start,
            area_ratio_end,
            points,
        } => run_nozzle(*gamma, *area_ratio_start, *area_ratio_end, *points, out_dir),
        CaseKindDef::Combustion {
            mixture_ratios,
            expansion_ratio,
        } => run_combustion(mixture_ratios, *expansion_ratio, out_dir),
        CaseKindDef::CeaReference { expansion_ratio } => run_cea_reference(*expansion_ratio, out_dir),
        CaseKindDef::MaskedField { grid_size } => run_masked_field(*grid_size, out_dir),
    }
}

fn run_conduction(
    problem: &ConductionProblem,
    flux: Option<&FluxDef>,
    out_dir: Option<&Path>,
) -> AppResult<CaseOutput> {
    let solution = solve(problem)?;
    let mut out = CaseOutput::default();

    if !solution.converged() {
        warn!(
            iterations = solution.iterations,
            final_error = solution.final_error,
            "plate did not converge; writing capped field"
        );
    }
    out.push("iterations", solution.iterations as f64);
    out.push("final_error", solution.final_error);
    out.push("converged", if solution.converged() { 1.0 } else { 0.0 });
    out.push("max_temperature", solution.max_temperature());
    out.push("min_temperature", solution.grid.min());

    if let Some(dir) = out_dir {
        let path = dir.join(TEMPERATURE_FILE);
        write_matrix_csv(&path, solution.field())?;
        out.file(&path);
    }

    if let Some(def) = flux {
        let params = FluxParams {
            conductivity: w_per_m_k(def.conductivity),
            depth: m(def.depth),
        };
        let field = heat_flux(&solution, &params)?;
        for edge in Edge::ALL {
            let q = boundary_heat_flow(&solution, edge, &params)?;
            out.push(format!("heat_flow_{}_w", edge.key()), q.value);
        }
        if let Some(dir) = out_dir {
            let (x_path, y_path) = field.write_csv(dir)?;
            out.file(&x_path);
            out.file(&y_path);
        }
    }

    Ok(out)
}

fn run_refinement(
    sizes: &[usize],
    template: &ConductionProblem,
    out_dir: Option<&Path>,
) -> AppResult<CaseOutput> {
    let points = refinement_study(sizes, template)?;
    let mut out = CaseOutput::default();

    for p in &points {
        out.push(format!("n{}_iterations", p.n), p.iterations as f64);
        out.push(format!("n{}_max_temperature", p.n), p.max_temperature);
    }

    if let Some(dir) = out_dir {
        let records: Vec<RefinementRecord> = points
            .iter()
            .map(|p| RefinementRecord {
                n: p.n,
                iterations: p.iterations,
                max_temperature: p.max_temperature,
                final_error: p.final_error,
                converged: p.converged,
            })
            .collect();
        let path = dir.join(REFINEMENT_FILE);
        write_table(&path, &records)?;
        out.file(&path);
    }

    Ok(out)
}

fn run_nozzle(
    gamma: f64,
    start: f64,
    end: f64,
    points: usize,
    out_dir: Option<&Path>,
) -> AppResult<CaseOutput> {
    let flow = IsentropicFlow::new(gamma)?;
    let sweep = flow.nozzle_sweep(start, end, points)?;
    let mut out = CaseOutput::default();

    if let Some(last) = sweep.last() {
        out.push("exit_area_ratio", last.area_ratio);
        out.push("exit_mach", last.mach);
        out.push("exit_pressure_ratio", last.pressure_ratio);
    }

    if let Some(dir) = out_dir {
        let path = dir.join(NOZZLE_FILE);
        write_table(&path, &sweep)?;
        out.file(&path);
    }

    Ok(out)
}

fn run_combustion(
    mixture_ratios: &[f64],
    expansion_ratio: f64,
    out_dir: Option<&Path>,
) -> AppResult<CaseOutput> {
    let table = PerformanceTable::evaluate(mixture_ratios, expansion_ratio)?;
    let mut out = CaseOutput::default();
    for p in &table.rows {
        push_performance(&mut out, p);
    }

    if let Some(dir) = out_dir {
        let path = table.write_csv(dir)?;
        out.file(&path);
    }

    Ok(out)
}

fn push_performance(out: &mut CaseOutput, p: &RocketPerformance) {
    let r = p.r;
    out.push(format!("r{r}_phi"), p.phi);
    out.push(format!("r{r}_gamma"), p.mixture.gamma);
    out.push(format!("r{r}_t1"), p.chamber_temperature);
    out.push(format!("r{r}_isp"), p.isp);
    out.push(format!("r{r}_c_star"), p.c_star);
    out.push(format!("r{r}_ct"), p.thrust_coefficient);
}

fn run_cea_reference(expansion_ratio: f64, out_dir: Option<&Path>) -> AppResult<CaseOutput> {
    let equilibrium = ReferenceTable::for_mode(CeaMode::Equilibrium);
    let frozen = ReferenceTable::for_mode(CeaMode::Frozen);
    let computed = PerformanceTable::evaluate(&equilibrium.r_values(), expansion_ratio)?;
    let mut out = CaseOutput::default();

    let comparisons: Vec<_> = Parameter::ALL
        .into_iter()
        .map(|parameter| compare(parameter, &equilibrium, &frozen, &computed))
        .collect();

    // Relative gap between the frozen CEA run and the simple model
    for cmp in &comparisons {
        let gaps: Vec<f64> = cmp
            .rows
            .iter()
            .filter_map(|row| match (row.frozen, row.computed) {
                (Some(f), Some(c)) if f != 0.0 => Some(((c - f) / f).abs()),
                _ => None,
            })
            .collect();
        if let Some(worst) = at_core::max_finite(&gaps) {
            out.push(format!("{}_max_rel_gap_frozen", cmp.parameter.key()), worst);
        }
    }

    if let Some(dir) = out_dir {
        for table in [&equilibrium, &frozen] {
            let path = table.write_csv(dir)?;
            out.file(&path);
        }
        let path = computed.write_csv(dir)?;
        out.file(&path);
        for cmp in &comparisons {
            let path = cmp.write_csv(dir)?;
            out.file(&path);
        }
    }

    Ok(out)
}

fn run_masked_field(grid_size: usize, out_dir: Option<&Path>) -> AppResult<CaseOutput> {
    let field = at_core::masked_field(grid_size)?;
    let mut out = CaseOutput::default();
    out.push("grid_points", field.values.len() as f64);
    out.push("inside_points", field.inside_count() as f64);

    if let Some(dir) = out_dir {
        let records: Vec<MaskedRecord> = field
            .points
            .iter()
            .map(|&(x, y)| MaskedRecord {
                x,
                y,
                z: (x * y).sin(),
            })
            .collect();
        let path = dir.join(MASKED_FIELD_FILE);
        write_table(&path, &records)?;
        out.file(&path);
    }

    Ok(out)
}
