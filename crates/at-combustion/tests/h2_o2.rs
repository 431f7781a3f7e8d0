//! End-to-end checks on the H2/O2 performance model.

use at_combustion::{
    COMBUSTION_RESULTS_FILE, DEFAULT_MIXTURE_RATIOS, Parameter, PerformanceTable, ReferenceTable,
    RocketPerformance, compare,
};
use proptest::prelude::*;

#[test]
fn default_cases_are_physical() {
    let table = PerformanceTable::evaluate(&DEFAULT_MIXTURE_RATIOS, 25.0).unwrap();
    assert_eq!(table.rows.len(), 3);

    for p in &table.rows {
        assert!(p.mixture.gamma > 1.0);
        assert!(p.isp.is_finite() && p.isp > 0.0);
        assert!(p.c_star.is_finite() && p.c_star > 0.0);
        assert!(p.thrust_coefficient.is_finite());
        assert!(p.pressure_ratio > 0.0 && p.pressure_ratio < 1.0);
    }
}

#[test]
fn richest_case_molar_mass_is_close_to_cea() {
    // Products at r = 4.7 are mostly water with excess hydrogen.
    let p = RocketPerformance::evaluate(4.7, 25.0).unwrap();
    let cea = ReferenceTable::frozen().column("MW").unwrap()[2];
    assert!((p.mixture.molar_mass * 1e3 - cea).abs() < 0.5);
}

#[test]
fn results_and_comparisons_export() {
    let dir = std::env::temp_dir().join("at_combustion_export");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let table = PerformanceTable::evaluate(&DEFAULT_MIXTURE_RATIOS, 25.0).unwrap();
    let path = table.write_csv(&dir).unwrap();
    assert!(path.ends_with(COMBUSTION_RESULTS_FILE));

    let content = std::fs::read_to_string(&path).unwrap();
    let header = content.lines().next().unwrap();
    assert!(header.starts_with("r,phi,"));
    assert!(header.contains("I_sp (s)"));
    assert!(header.ends_with("CT"));

    let eq = ReferenceTable::equilibrium();
    let fr = ReferenceTable::frozen();
    for parameter in Parameter::ALL {
        let cmp = compare(parameter, &eq, &fr, &table);
        let file = cmp.write_csv(&dir).unwrap();
        let text = std::fs::read_to_string(file).unwrap();
        assert_eq!(text.lines().count(), 4);
    }
}

proptest! {
    #[test]
    fn any_reasonable_mixture_ratio_gives_finite_performance(r in 2.0_f64..16.0) {
        let p = RocketPerformance::evaluate(r, 25.0).unwrap();
        prop_assert!(p.mixture.gamma > 1.0);
        prop_assert!(p.isp.is_finite());
        prop_assert!(p.c_star.is_finite());
        prop_assert!(p.exit_mach > 1.0);
    }
}
