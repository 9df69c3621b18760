//! End-to-end rendering against small CSV fixtures
//!
//! Writes a miniature version of every input table into a temp directory,
//! runs the full pipeline, and checks that each expected PNG exists and is
//! non-empty.

use std::fs;
use std::path::Path;

use erw_figures::config::{FigureConfig, FigureKind};
use erw_figures::erw::{Region, Scenario};
use erw_figures::pipeline::generate_figures;

const YEARS: [i32; 4] = [2025, 2050, 2075, 2100];

fn write_adoption_tables(data_dir: &Path) {
    let mut header = String::from("Year");
    for region in Region::ALL {
        header.push(',');
        header.push_str(region.label());
    }

    for (s, scenario) in Scenario::ALL.iter().enumerate() {
        let mut csv = header.clone();
        csv.push('\n');
        for (i, year) in YEARS.iter().enumerate() {
            csv.push_str(&year.to_string());
            for r in 0..Region::ALL.len() {
                let share = 0.02 * (i as f64 + 1.0) + 0.01 * (r as f64) + 0.005 * s as f64;
                csv.push_str(&format!(",{share:.4}"));
            }
            csv.push('\n');
        }
        fs::write(
            data_dir.join(format!("adoption_shares_{}.csv", scenario.stem())),
            csv,
        )
        .unwrap();
    }
}

fn write_global_tables(data_dir: &Path) {
    for file in ["global_annual_CDR.csv", "global_cumulative_CDR.csv"] {
        let mut csv = String::from("Year,Scenario0,Scenario1,Scenario2,Scenario3,Scenario4\n");
        for (i, year) in YEARS.iter().enumerate() {
            csv.push_str(&format!(
                "{year},{},{},{},{},{}\n",
                0.1 * (i + 1) as f64,
                0.2 * (i + 1) as f64,
                0.3 * (i + 1) as f64,
                0.4 * (i + 1) as f64,
                0.5 * (i + 1) as f64,
            ));
        }
        fs::write(data_dir.join(file), csv).unwrap();
    }
}

fn write_regional_table(data_dir: &Path) {
    let mut csv = String::from(
        "Year,Region,Annual_CO2_Mean,Annual_CI_Lower,Annual_CI_Upper,\
         Cumulative_CO2_Mean,Cumulative_CI_Lower,Cumulative_CI_Upper\n",
    );
    for region in Region::ALL {
        for (i, year) in YEARS.iter().enumerate() {
            let mean = 0.05 * (i + 1) as f64;
            let cum = 0.2 * (i + 1) as f64;
            csv.push_str(&format!(
                "{year},{},{mean},{},{},{cum},{},{}\n",
                region.label(),
                mean * 0.8,
                mean * 1.2,
                cum * 0.8,
                cum * 1.2,
            ));
        }
    }
    fs::write(data_dir.join("regional_CDR.csv"), csv).unwrap();
}

fn write_country_tables(data_dir: &Path) {
    for stem in ["scenario0", "scenario4"] {
        let mut csv = String::from(
            "REGION_WB,INCOME_GRP,cropland_area,30_40,40_50,50_60,\
             cum_2040,cum_2060,cum_2080,cum_2100\n",
        );
        let incomes = [
            "1. High income: OECD",
            "2. High income: nonOECD",
            "3. Upper middle income",
            "4. Lower middle income",
            "5. Low income",
        ];
        let mut n = 0;
        for region in Region::ALL {
            for income in incomes {
                n += 1;
                let area = 10.0 * n as f64;
                csv.push_str(&format!(
                    "{},{income},{area},{},{},{},{},{},{},{}\n",
                    region.label(),
                    area * 2.0,
                    area * 3.0,
                    area * 4.0,
                    area * 1.0e7,
                    area * 2.0e7,
                    area * 3.0e7,
                    area * 4.0e7,
                ));
            }
        }
        fs::write(data_dir.join(format!("country_CDR_{stem}.csv")), csv).unwrap();
    }
}

#[test]
fn renders_all_figures_from_fixtures() {
    let tmp = tempfile::tempdir().unwrap();
    let data_dir = tmp.path().join("data");
    let results_dir = tmp.path().join("results");
    fs::create_dir_all(&data_dir).unwrap();

    write_adoption_tables(&data_dir);
    write_global_tables(&data_dir);
    write_regional_table(&data_dir);
    write_country_tables(&data_dir);

    let config = FigureConfig {
        data_dir,
        results_dir: results_dir.clone(),
        scatter_scenario: Scenario::Scenario4,
        income_scenarios: vec![Scenario::Scenario0],
        figures: FigureKind::ALL.to_vec(),
    };

    let results = generate_figures(&config).unwrap();

    // adoption + sequestration + scatter + one income scenario
    assert_eq!(results.len(), 4);

    let expected = [
        "fig2_adoption_trajectory.png",
        "fig3_carbon_sequestration.png",
        "fig_scatter_plot_country_CDR_cropland.png",
        "fig4_barplot_CDR_income_scenario0.png",
    ];
    for name in expected {
        let path = results_dir.join(name);
        let meta = fs::metadata(&path)
            .unwrap_or_else(|_| panic!("expected output missing: {}", path.display()));
        assert!(meta.len() > 0, "empty output: {}", path.display());
    }

    for result in &results {
        assert!(result.width > 0 && result.height > 0);
    }
}

#[test]
fn missing_input_surfaces_file_and_column_context() {
    let tmp = tempfile::tempdir().unwrap();
    let data_dir = tmp.path().join("data");
    fs::create_dir_all(&data_dir).unwrap();

    // Table exists but lacks the scenario columns
    fs::write(data_dir.join("global_annual_CDR.csv"), "Year\n2030\n").unwrap();
    fs::write(
        data_dir.join("global_cumulative_CDR.csv"),
        "Year,Scenario0,Scenario1,Scenario2,Scenario3,Scenario4\n2030,1,1,1,1,1\n",
    )
    .unwrap();

    let config = FigureConfig {
        data_dir,
        results_dir: tmp.path().join("results"),
        figures: vec![FigureKind::Sequestration],
        ..FigureConfig::default()
    };

    let err = generate_figures(&config).unwrap_err();
    let message = err.to_string();
    assert!(
        message.contains("global_annual_CDR.csv") && message.contains("Scenario0"),
        "unhelpful error: {message}"
    );
}
