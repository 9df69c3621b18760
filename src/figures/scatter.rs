//! Country cropland area vs. cumulative CDR (fig 3 supplement)
//!
//! One scatter panel per decade period for a selected scenario. Rows with
//! non-positive cropland or period CDR are dropped, both axes are log10 of
//! the hectare/kg-scaled values, points are colored by region, and each
//! panel carries a dashed OLS fit with its 95% confidence band.

use plotters::prelude::*;
use polars::prelude::*;

use crate::config::FigureConfig;
use crate::erw::stats::LinearFit;
use crate::erw::{data, draw_err, LineStyle, Period, Region, Result};
use crate::figures::canvas::{self, Panel};
use crate::pipeline::FigureResult;

const OUTPUT_FILE: &str = "fig_scatter_plot_country_CDR_cropland.png";
const WIDTH: u32 = 600;
const HEIGHT: u32 = 1450;

const POINT_SIZE: i32 = 4;
const Y_BOTTOM: f64 = -1.0;
const Y_TOP: f64 = 11.0;
const FIT_COLOR: RGBColor = RGBColor(30, 144, 255); // dodger blue
const FIT_BAND_OPACITY: f64 = 0.15;

/// Unit scaling applied before the log transform (area to hectares,
/// mass to kilograms)
const UNIT_SCALE: f64 = 10_000.0;

/// One country observation surviving the positivity filters
struct ScatterPoint {
    region: Region,
    log_cropland: f64,
    log_co2: f64,
}

/// Filter and log-transform one period's observations
fn load_period(df: &DataFrame, period: Period) -> Result<Vec<ScatterPoint>> {
    let filtered = df
        .clone()
        .lazy()
        .filter(
            col("cropland_area")
                .gt(lit(0.0))
                .and(col(period.column()).gt(lit(0.0))),
        )
        .collect()?;

    let regions = data::str_column(&filtered, "REGION_WB")?;
    let cropland = data::f64_column(&filtered, "cropland_area")?;
    let co2 = data::f64_column(&filtered, period.column())?;

    let mut points = Vec::with_capacity(regions.len());
    for ((raw_region, area), mass) in regions.iter().zip(cropland).zip(co2) {
        // Countries outside the seven plotted regions are skipped
        let Some(region) = Region::from_label(raw_region) else {
            continue;
        };
        points.push(ScatterPoint {
            region,
            log_cropland: (area * UNIT_SCALE).log10(),
            log_co2: (mass * UNIT_SCALE).log10(),
        });
    }
    Ok(points)
}

pub fn render(config: &FigureConfig) -> Result<FigureResult> {
    let scenario = config.scatter_scenario;
    let input = config.data_path(&format!("country_CDR_{}.csv", scenario.stem()));
    let df = data::read_csv(&input)?;

    let mut required = vec!["REGION_WB", "cropland_area"];
    required.extend(Period::ALL.iter().map(|p| p.column()));
    data::require_columns(&df, &input, &required)?;

    let path = config.result_path(OUTPUT_FILE);
    let root = BitMapBackend::new(&path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let panels = root.split_evenly((3, 1));
    for (i, period) in Period::ALL.iter().enumerate() {
        let points = load_period(&df, *period)?;
        draw_period_panel(&panels[i], *period, &points, i == 0)?;
    }

    root.present().map_err(draw_err)?;
    drop(panels);
    drop(root);

    Ok(FigureResult {
        label: "fig_scatter_plot_country_CDR_cropland".to_string(),
        path,
        width: WIDTH,
        height: HEIGHT,
    })
}

fn draw_period_panel(
    panel: &Panel,
    period: Period,
    points: &[ScatterPoint],
    with_legend: bool,
) -> Result<()> {
    let (x_min, x_max) = canvas::padded_range(points.iter().map(|p| p.log_cropland), 0.06);

    let mut chart = ChartBuilder::on(panel)
        .caption(period.title(), ("sans-serif", 20))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, Y_BOTTOM..Y_TOP)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("log10(Cropland area)")
        .y_desc("log10(Cumulative CDR)")
        .draw()
        .map_err(draw_err)?;

    // OLS fit over all regions pooled, band first so points stay on top
    let xs: Vec<f64> = points.iter().map(|p| p.log_cropland).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.log_co2).collect();
    if let Some(fit) = LinearFit::fit(&xs, &ys) {
        let steps = 80;
        let grid: Vec<f64> = (0..=steps)
            .map(|i| x_min + (x_max - x_min) * i as f64 / steps as f64)
            .collect();

        let mut lower = Vec::with_capacity(grid.len());
        let mut upper = Vec::with_capacity(grid.len());
        for &x in &grid {
            let (lo, hi) = fit.confidence_interval(x);
            lower.push((x, lo.max(Y_BOTTOM)));
            upper.push((x, hi.min(Y_TOP)));
        }
        canvas::draw_band(&mut chart, &lower, &upper, FIT_COLOR, FIT_BAND_OPACITY)?;

        let line: Vec<(f64, f64)> = grid.iter().map(|&x| (x, fit.predict(x))).collect();
        canvas::draw_line(&mut chart, line, LineStyle::Dashed, FIT_COLOR, 2, None)?;
    }

    for region in Region::ALL {
        let color = region.color();
        let anno = chart
            .draw_series(
                points
                    .iter()
                    .filter(|p| p.region == region)
                    .map(|p| {
                        Circle::new(
                            (p.log_cropland, p.log_co2),
                            POINT_SIZE,
                            color.mix(0.85).filled(),
                        )
                    }),
            )
            .map_err(draw_err)?;
        if with_legend {
            anno.label(region.label())
                .legend(move |(x, y)| Circle::new((x + 8, y), POINT_SIZE, color.filled()));
        }

        // Thin black edge around each marker, as in the published styling
        chart
            .draw_series(
                points
                    .iter()
                    .filter(|p| p.region == region)
                    .map(|p| Circle::new((p.log_cropland, p.log_co2), POINT_SIZE, BLACK)),
            )
            .map_err(draw_err)?;
    }

    if with_legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .border_style(TRANSPARENT)
            .background_style(WHITE.mix(0.7))
            .label_font(("sans-serif", 14))
            .draw()
            .map_err(draw_err)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_period_log_transform() {
        let df = df! {
            "REGION_WB" => ["South Asia", "North America"],
            "cropland_area" => [10.0, 1.0],
            "30_40" => [100.0, 0.01],
            "40_50" => [1.0, 1.0],
            "50_60" => [1.0, 1.0]
        }
        .unwrap();

        let points = load_period(&df, Period::Y2030To2040).unwrap();
        assert_eq!(points.len(), 2);

        // log_cropland = log10(cropland_area * 10000)
        assert!((points[0].log_cropland - 5.0).abs() < 1e-12);
        assert!((points[0].log_co2 - 6.0).abs() < 1e-12);
        assert_eq!(points[0].region, Region::SouthAsia);

        assert!((points[1].log_cropland - 4.0).abs() < 1e-12);
        assert!((points[1].log_co2 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_load_period_filters_nonpositive_and_unknown_regions() {
        let df = df! {
            "REGION_WB" => ["South Asia", "South Asia", "Atlantis", "Sub-Saharan Africa"],
            "cropland_area" => [0.0, 5.0, 5.0, 5.0],
            "30_40" => [1.0, -2.0, 1.0, 1.0],
            "40_50" => [1.0, 1.0, 1.0, 1.0],
            "50_60" => [1.0, 1.0, 1.0, 1.0]
        }
        .unwrap();

        // Zero cropland and negative CDR rows drop at the filter; the
        // unknown region drops at the label lookup
        let points = load_period(&df, Period::Y2030To2040).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].region, Region::SubSaharanAfrica);
    }
}
