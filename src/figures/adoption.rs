//! ERW adoption trajectories per scenario (fig 2)
//!
//! Reads `adoption_shares_scenario{0..4}.csv` (columns: `Year` plus one
//! column per region) and renders a 3x2 panel grid: one panel per scenario
//! with a line per region on a percent axis, a shared region legend in the
//! unused sixth panel, and trigger-point guides in the scenario 4 panel.

use plotters::prelude::*;

use crate::config::FigureConfig;
use crate::erw::{data, draw_err, FigureError, LineStyle, Region, Result, Scenario};
use crate::figures::canvas::{self, Panel};
use crate::pipeline::FigureResult;

const OUTPUT_FILE: &str = "fig2_adoption_trajectory.png";
const WIDTH: u32 = 1500;
const HEIGHT: u32 = 1600;

const LINE_WIDTH: u32 = 3;
const Y_BOTTOM: f64 = -3.0;
const Y_TOP: f64 = 90.0;

/// Adoption shares of one scenario: years plus one percent series per region
#[derive(Debug)]
struct ScenarioShares {
    years: Vec<f64>,
    /// Percent values per region, in `Region::ALL` order
    percent: Vec<Vec<f64>>,
}

fn load_scenario(config: &FigureConfig, scenario: Scenario) -> Result<ScenarioShares> {
    let path = config.data_path(&format!("adoption_shares_{}.csv", scenario.stem()));
    let df = data::read_csv(&path)?;

    let mut required = vec!["Year"];
    required.extend(Region::ALL.iter().map(|r| r.label()));
    data::require_columns(&df, &path, &required)?;

    let years = data::f64_column(&df, "Year")?;
    if years.is_empty() {
        return Err(FigureError::Empty { path });
    }

    let percent = Region::ALL
        .iter()
        .map(|region| {
            data::f64_column(&df, region.label())
                .map(|shares| shares.into_iter().map(|v| v * 100.0).collect())
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;

    Ok(ScenarioShares { years, percent })
}

pub fn render(config: &FigureConfig) -> Result<FigureResult> {
    let shares = Scenario::ALL
        .iter()
        .map(|&scenario| load_scenario(config, scenario))
        .collect::<Result<Vec<_>>>()?;

    let path = config.result_path(OUTPUT_FILE);
    let root = BitMapBackend::new(&path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let panels = root.split_evenly((3, 2));
    for (i, scenario) in Scenario::ALL.iter().enumerate() {
        draw_scenario_panel(&panels[i], *scenario, &shares[i])?;
        canvas::panel_letter(&panels[i], (b'a' + i as u8) as char)?;
    }
    draw_region_legend(&panels[5])?;

    root.present().map_err(draw_err)?;
    drop(panels);
    drop(root);

    Ok(FigureResult {
        label: "fig2_adoption_trajectory".to_string(),
        path,
        width: WIDTH,
        height: HEIGHT,
    })
}

fn draw_scenario_panel(panel: &Panel, scenario: Scenario, shares: &ScenarioShares) -> Result<()> {
    let (x_min, x_max) = canvas::padded_range(shares.years.iter().copied(), 0.0);

    let mut chart = ChartBuilder::on(panel)
        .caption(scenario.title(), ("sans-serif", 22))
        .margin(12)
        .margin_left(20)
        .x_label_area_size(40)
        .y_label_area_size(55)
        .build_cartesian_2d(x_min..x_max, Y_BOTTOM..Y_TOP)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("Year")
        .y_desc("ERW adoption share (%)")
        .x_label_formatter(&|year| format!("{year:.0}"))
        .draw()
        .map_err(draw_err)?;

    // Trigger points only exist in the human-nature coupled scenario
    if scenario == Scenario::Scenario4 {
        for (year, label) in Scenario::TRIGGER_POINTS {
            canvas::draw_line(
                &mut chart,
                vec![(year, Y_BOTTOM), (year, Y_TOP)],
                LineStyle::Dotted,
                RGBColor(128, 128, 128),
                LINE_WIDTH,
                Some(label),
            )?;
        }
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .label_font(("sans-serif", 16))
            .draw()
            .map_err(draw_err)?;
    }

    for (region, percent) in Region::ALL.iter().zip(&shares.percent) {
        let points: Vec<(f64, f64)> = shares
            .years
            .iter()
            .copied()
            .zip(percent.iter().copied())
            .collect();
        canvas::draw_line(
            &mut chart,
            points,
            LineStyle::Solid,
            region.color(),
            LINE_WIDTH,
            None,
        )?;
    }

    Ok(())
}

/// Figure-level region legend, drawn into the unused sixth panel
fn draw_region_legend(panel: &Panel) -> Result<()> {
    let line_x0 = 90;
    let line_x1 = 150;
    let top = 110;
    let step = 48;

    for (i, region) in Region::ALL.iter().enumerate() {
        let y = top + step * i as i32;
        let style = ShapeStyle::from(&region.color()).stroke_width(LINE_WIDTH);
        panel
            .draw(&PathElement::new(vec![(line_x0, y), (line_x1, y)], style))
            .map_err(draw_err)?;
        panel
            .draw(&Text::new(
                region.label().to_string(),
                (line_x1 + 14, y - 11),
                ("sans-serif", 22).into_font().color(&BLACK),
            ))
            .map_err(draw_err)?;
    }
    Ok(())
}
