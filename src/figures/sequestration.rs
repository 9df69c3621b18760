//! Global and regional CDR trajectories (fig 3)
//!
//! 2x2 panel grid: annual (a) and cumulative (b) global CO2 sequestered per
//! scenario against an SSP4 no-ERW baseline, then annual (c) and cumulative
//! (d) regional means with shaded 95% confidence bands.

use plotters::prelude::*;
use polars::prelude::*;

use crate::config::FigureConfig;
use crate::erw::{data, draw_err, FigureError, LineStyle, Region, Result, Scenario};
use crate::figures::canvas::{self, Panel};
use crate::pipeline::FigureResult;

const OUTPUT_FILE: &str = "fig3_carbon_sequestration.png";
const WIDTH: u32 = 1800;
const HEIGHT: u32 = 1300;

const LINE_WIDTH: u32 = 3;
const BASELINE_LABEL: &str = "SSP4 with no ERW";
const BAND_OPACITY: f64 = 0.1;

/// Global CDR per scenario (annual or cumulative), GtCO2
struct GlobalSeries {
    years: Vec<f64>,
    /// One value series per scenario, in `Scenario::ALL` order
    values: Vec<Vec<f64>>,
}

/// Regional mean trajectory with its confidence bounds, GtCO2
struct RegionalSeries {
    years: Vec<f64>,
    mean: Vec<f64>,
    ci_lower: Vec<f64>,
    ci_upper: Vec<f64>,
}

fn load_global(config: &FigureConfig, file_name: &str) -> Result<GlobalSeries> {
    let path = config.data_path(file_name);
    let df = data::read_csv(&path)?;

    let mut required = vec!["Year"];
    required.extend(Scenario::ALL.iter().map(|s| s.column()));
    data::require_columns(&df, &path, &required)?;

    let years = data::f64_column(&df, "Year")?;
    if years.is_empty() {
        return Err(FigureError::Empty { path });
    }

    let values = Scenario::ALL
        .iter()
        .map(|scenario| data::f64_column(&df, scenario.column()))
        .collect::<Result<Vec<_>>>()?;

    Ok(GlobalSeries { years, values })
}

const REGIONAL_COLUMNS: [&str; 8] = [
    "Year",
    "Region",
    "Annual_CO2_Mean",
    "Annual_CI_Lower",
    "Annual_CI_Upper",
    "Cumulative_CO2_Mean",
    "Cumulative_CI_Lower",
    "Cumulative_CI_Upper",
];

/// Load one region's rows from the long-format regional table
fn load_regional(df: &DataFrame, region: Region, cumulative: bool) -> Result<RegionalSeries> {
    let dfr = df
        .clone()
        .lazy()
        .filter(col("Region").eq(lit(region.label())))
        .collect()?;

    let prefix = if cumulative { "Cumulative" } else { "Annual" };
    Ok(RegionalSeries {
        years: data::f64_column(&dfr, "Year")?,
        mean: data::f64_column(&dfr, &format!("{prefix}_CO2_Mean"))?,
        ci_lower: data::f64_column(&dfr, &format!("{prefix}_CI_Lower"))?,
        ci_upper: data::f64_column(&dfr, &format!("{prefix}_CI_Upper"))?,
    })
}

pub fn render(config: &FigureConfig) -> Result<FigureResult> {
    let annual = load_global(config, "global_annual_CDR.csv")?;
    let cumulative = load_global(config, "global_cumulative_CDR.csv")?;

    let regional_path = config.data_path("regional_CDR.csv");
    let regional_df = data::read_csv(&regional_path)?;
    data::require_columns(&regional_df, &regional_path, &REGIONAL_COLUMNS)?;

    let path = config.result_path(OUTPUT_FILE);
    let root = BitMapBackend::new(&path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let panels = root.split_evenly((2, 2));

    draw_global_panel(
        &panels[0],
        "Annual CO2 sequestered by scenario",
        &annual,
        false,
    )?;
    draw_global_panel(
        &panels[1],
        "Cumulative CO2 sequestered by scenario",
        &cumulative,
        true,
    )?;
    draw_regional_panel(
        &panels[2],
        "Annual CO2 sequestered by region",
        &regional_df,
        false,
    )?;
    draw_regional_panel(
        &panels[3],
        "Cumulative CO2 sequestered by region",
        &regional_df,
        true,
    )?;

    for (i, panel) in panels.iter().enumerate() {
        canvas::panel_letter(panel, (b'a' + i as u8) as char)?;
    }

    root.present().map_err(draw_err)?;
    drop(panels);
    drop(root);

    Ok(FigureResult {
        label: "fig3_carbon_sequestration".to_string(),
        path,
        width: WIDTH,
        height: HEIGHT,
    })
}

fn draw_global_panel(
    panel: &Panel,
    title: &str,
    series: &GlobalSeries,
    with_legend: bool,
) -> Result<()> {
    let (x_min, x_max) = canvas::padded_range(series.years.iter().copied(), 0.0);
    let (_, y_max) = canvas::padded_range(series.values.iter().flatten().copied(), 0.05);
    let y_min = -0.02 * y_max;

    let mut chart = ChartBuilder::on(panel)
        .caption(title, ("sans-serif", 24))
        .margin(12)
        .margin_left(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("Year")
        .y_desc("GtCO2")
        .x_labels(8)
        .x_label_formatter(&|year| format!("{year:.0}"))
        .draw()
        .map_err(draw_err)?;

    // SSP4 baseline: no ERW deployment, zero CDR
    let baseline: Vec<(f64, f64)> = series.years.iter().map(|&year| (year, 0.0)).collect();
    canvas::draw_line(
        &mut chart,
        baseline,
        LineStyle::Solid,
        RGBColor(0, 0, 0),
        LINE_WIDTH,
        Some(BASELINE_LABEL),
    )?;

    for (scenario, values) in Scenario::ALL.iter().zip(&series.values) {
        let points: Vec<(f64, f64)> = series
            .years
            .iter()
            .copied()
            .zip(values.iter().copied())
            .collect();
        // The dotted scenario is drawn one step heavier so it stays legible
        let width = if scenario.line_style() == LineStyle::Dotted {
            LINE_WIDTH + 1
        } else {
            LINE_WIDTH
        };
        canvas::draw_line(
            &mut chart,
            points,
            scenario.line_style(),
            scenario.color(),
            width,
            Some(scenario.short_label()),
        )?;
    }

    if with_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .border_style(TRANSPARENT)
            .background_style(WHITE.mix(0.7))
            .label_font(("sans-serif", 18))
            .draw()
            .map_err(draw_err)?;
    }

    Ok(())
}

fn draw_regional_panel(
    panel: &Panel,
    title: &str,
    df: &DataFrame,
    cumulative: bool,
) -> Result<()> {
    let regions = Region::ALL
        .iter()
        .map(|&region| load_regional(df, region, cumulative))
        .collect::<Result<Vec<_>>>()?;

    let (x_min, x_max) = canvas::padded_range(
        regions.iter().flat_map(|r| r.years.iter().copied()),
        0.0,
    );
    let (y_min, y_max) = canvas::padded_range(
        regions
            .iter()
            .flat_map(|r| r.ci_lower.iter().chain(r.ci_upper.iter()).copied()),
        0.05,
    );

    let mut chart = ChartBuilder::on(panel)
        .caption(title, ("sans-serif", 24))
        .margin(12)
        .margin_left(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("Year")
        .y_desc("GtCO2")
        .x_labels(8)
        .x_label_formatter(&|year| format!("{year:.0}"))
        .draw()
        .map_err(draw_err)?;

    for (region, series) in Region::ALL.iter().zip(&regions) {
        let lower: Vec<(f64, f64)> = series
            .years
            .iter()
            .copied()
            .zip(series.ci_lower.iter().copied())
            .collect();
        let upper: Vec<(f64, f64)> = series
            .years
            .iter()
            .copied()
            .zip(series.ci_upper.iter().copied())
            .collect();
        canvas::draw_band(&mut chart, &lower, &upper, region.color(), BAND_OPACITY)?;

        let mean: Vec<(f64, f64)> = series
            .years
            .iter()
            .copied()
            .zip(series.mean.iter().copied())
            .collect();
        canvas::draw_line(
            &mut chart,
            mean,
            LineStyle::Solid,
            region.color(),
            LINE_WIDTH,
            Some(region.label()),
        )?;
    }

    if cumulative {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .border_style(TRANSPARENT)
            .background_style(WHITE.mix(0.7))
            .label_font(("sans-serif", 18))
            .draw()
            .map_err(draw_err)?;
    }

    Ok(())
}
