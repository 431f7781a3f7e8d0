use at_app::{
    AppResult, CaseOutput, RunOptions, RunRequest, execute_case, project_service, run_service,
};
use at_project::schema::{CaseKindDef, FluxDef};
use at_results::{RunManifest, SummaryValue};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "at-cli")]
#[command(about = "Aerotherm CLI - plate conduction, nozzle flow and H2/O2 performance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// List cases in a project
    Cases {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// Run one case from a project and store its outputs
    Run {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Case ID to run
        case_id: String,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
        /// Run store directory (defaults to .aerotherm/runs next to the project)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List stored runs for a project
    Runs {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Only runs of this case
        #[arg(long)]
        case: Option<String>,
        /// Run store directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show the manifest of a stored run
    ShowRun {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Run ID to display
        run_id: String,
        /// Run store directory
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Solve the insulated plate directly
    Conduction {
        #[arg(long, default_value_t = 10)]
        nx: usize,
        #[arg(long, default_value_t = 10)]
        ny: usize,
        /// Plate length in m
        #[arg(long, default_value_t = 0.25)]
        length: f64,
        #[arg(long, default_value_t = 600.0)]
        left: f64,
        #[arg(long, default_value_t = 150.0)]
        top: f64,
        #[arg(long, default_value_t = 1e-6)]
        tolerance: f64,
        #[arg(long, default_value_t = 10_000)]
        max_iterations: usize,
        /// Thermal conductivity in W/(m K); enables heat flux output
        #[arg(long)]
        conductivity: Option<f64>,
        /// Out-of-plane depth in m
        #[arg(long, default_value_t = 1.0)]
        depth: f64,
        /// Directory for CSV output
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Mesh refinement study of the plate
    Refine {
        #[arg(long, value_delimiter = ',', default_values_t = [10, 20, 40, 80])]
        sizes: Vec<usize>,
        #[arg(long, default_value_t = 0.25)]
        length: f64,
        #[arg(long, default_value_t = 600.0)]
        left: f64,
        #[arg(long, default_value_t = 150.0)]
        top: f64,
        #[arg(long, default_value_t = 1e-6)]
        tolerance: f64,
        #[arg(long, default_value_t = 10_000)]
        max_iterations: usize,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Exit Mach number and pressure ratio over a range of area ratios
    Nozzle {
        #[arg(long, default_value_t = 1.4)]
        gamma: f64,
        #[arg(long, default_value_t = 1.0)]
        start: f64,
        #[arg(long, default_value_t = 40.0)]
        end: f64,
        #[arg(long, default_value_t = 100)]
        points: usize,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Ideal H2/O2 rocket performance
    Combustion {
        /// Oxidizer-to-fuel mass ratios
        #[arg(long, value_delimiter = ',', default_values_t = [8.0, 6.0, 4.7])]
        ratios: Vec<f64>,
        #[arg(long, default_value_t = 25.0)]
        expansion_ratio: f64,
        /// Also write CEA tables and comparison series
        #[arg(long)]
        cea: bool,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Cases { project_path } => cmd_cases(&project_path),
        Commands::Run {
            project_path,
            case_id,
            no_cache,
            out,
        } => cmd_run(&project_path, &case_id, !no_cache, out),
        Commands::Runs {
            project_path,
            case,
            out,
        } => cmd_runs(&project_path, case.as_deref(), out),
        Commands::ShowRun {
            project_path,
            run_id,
            out,
        } => cmd_show_run(&project_path, &run_id, out),
        Commands::Conduction {
            nx,
            ny,
            length,
            left,
            top,
            tolerance,
            max_iterations,
            conductivity,
            depth,
            out,
        } => {
            let kind = CaseKindDef::Conduction {
                nx,
                ny,
                domain_length_m: length,
                left_value: left,
                top_value: top,
                tolerance,
                max_iterations,
                flux: conductivity.map(|conductivity| FluxDef {
                    conductivity,
                    depth,
                }),
            };
            cmd_direct(&kind, out.as_deref())
        }
        Commands::Refine {
            sizes,
            length,
            left,
            top,
            tolerance,
            max_iterations,
            out,
        } => {
            let kind = CaseKindDef::Refinement {
                sizes,
                domain_length_m: length,
                left_value: left,
                top_value: top,
                tolerance,
                max_iterations,
            };
            cmd_direct(&kind, out.as_deref())
        }
        Commands::Nozzle {
            gamma,
            start,
            end,
            points,
            out,
        } => {
            let kind = CaseKindDef::Nozzle {
                gamma,
                area_ratio_start: start,
                area_ratio_end: end,
                points,
            };
            cmd_direct(&kind, out.as_deref())
        }
        Commands::Combustion {
            ratios,
            expansion_ratio,
            cea,
            out,
        } => {
            let kind = if cea {
                CaseKindDef::CeaReference { expansion_ratio }
            } else {
                CaseKindDef::Combustion {
                    mixture_ratios: ratios,
                    expansion_ratio,
                }
            };
            cmd_direct(&kind, out.as_deref())
        }
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Project is valid ({} cases)", project.cases.len());
    Ok(())
}

fn cmd_cases(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let cases = project_service::list_cases(&project);

    if cases.is_empty() {
        println!("No cases found in project");
    } else {
        println!("Cases in project '{}':", project.name);
        for case in cases {
            println!("  {} - {} [{}]", case.id, case.name, case.kind);
        }
    }
    Ok(())
}

fn run_options(use_cache: bool, store_dir: Option<PathBuf>) -> RunOptions {
    RunOptions {
        use_cache,
        store_dir,
        ..RunOptions::default()
    }
}

fn cmd_run(
    project_path: &Path,
    case_id: &str,
    use_cache: bool,
    store_dir: Option<PathBuf>,
) -> AppResult<()> {
    println!("Running case: {}", case_id);

    let request = RunRequest {
        project_path,
        case_id,
        options: run_options(use_cache, store_dir),
    };
    let response = run_service::ensure_run(&request)?;

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!(
            "✓ Case completed in {:.3}s: {}",
            response.elapsed_s, response.run_id
        );
    }
    println!("  Output: {}", response.run_dir.display());
    print_manifest(&response.manifest);
    Ok(())
}

fn cmd_runs(project_path: &Path, case_id: Option<&str>, store_dir: Option<PathBuf>) -> AppResult<()> {
    let runs = run_service::list_runs(project_path, case_id, &run_options(true, store_dir))?;

    if runs.is_empty() {
        println!("No stored runs found");
    } else {
        println!("Stored runs:");
        for manifest in runs {
            println!(
                "  {} {} [{}] ({})",
                manifest.run_id, manifest.case_id, manifest.case_kind, manifest.timestamp
            );
        }
    }
    Ok(())
}

fn cmd_show_run(project_path: &Path, run_id: &str, store_dir: Option<PathBuf>) -> AppResult<()> {
    let manifest = run_service::load_run(project_path, run_id, &run_options(true, store_dir))?;
    println!("Run {}", manifest.run_id);
    println!("  Case: {} [{}]", manifest.case_id, manifest.case_kind);
    println!("  Solver version: {}", manifest.solver_version);
    println!("  Timestamp: {}", manifest.timestamp);
    print_manifest(&manifest);
    Ok(())
}

fn cmd_direct(kind: &CaseKindDef, out: Option<&Path>) -> AppResult<()> {
    if let Some(dir) = out {
        std::fs::create_dir_all(dir)?;
    }
    let output = execute_case(kind, out)?;
    print_output(&output);
    Ok(())
}

fn print_manifest(manifest: &RunManifest) {
    print_summary(&manifest.summary);
    print_files(&manifest.files);
}

fn print_output(output: &CaseOutput) {
    print_summary(&output.summary);
    print_files(&output.files);
}

fn print_summary(summary: &[SummaryValue]) {
    if summary.is_empty() {
        return;
    }
    let width = summary.iter().map(|v| v.name.len()).max().unwrap_or(0);
    println!("\nSummary:");
    for v in summary {
        println!("  {:<width$}  {:.6}", v.name, v.value, width = width);
    }
}

fn print_files(files: &[String]) {
    if files.is_empty() {
        return;
    }
    println!("\nFiles:");
    for f in files {
        println!("  {}", f);
    }
}
