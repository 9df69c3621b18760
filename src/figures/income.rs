//! Cumulative CDR by income group (fig 4)
//!
//! One grouped bar chart per selected scenario: countries are collapsed
//! into four income groups, the cumulative CDR columns are summed per
//! group, converted from kg to Gt, and drawn per snapshot year. Only the
//! scenario 0 chart carries the axis label and legend; the others are
//! meant to sit beside it in the published layout.

use std::path::Path;

use plotters::prelude::*;
use polars::prelude::*;

use crate::config::FigureConfig;
use crate::erw::{data, draw_err, IncomeGroup, Result, Scenario};
use crate::pipeline::FigureResult;

const WIDTH: u32 = 900;
const HEIGHT: u32 = 400;

/// Cumulative snapshot columns and their axis labels
const CUM_COLUMNS: [(&str, &str); 4] = [
    ("cum_2040", "2040"),
    ("cum_2060", "2060"),
    ("cum_2080", "2080"),
    ("cum_2100", "2100"),
];

/// kg to Gt
const KG_PER_GT: f64 = 1e9;

const Y_MAX: f64 = 25.0;
const GROUP_WIDTH: f64 = 0.7;

pub fn render_all(config: &FigureConfig) -> Result<Vec<FigureResult>> {
    config
        .income_scenarios
        .iter()
        .map(|&scenario| render_scenario(config, scenario))
        .collect()
}

fn render_scenario(config: &FigureConfig, scenario: Scenario) -> Result<FigureResult> {
    let input = config.data_path(&format!("country_CDR_{}.csv", scenario.stem()));
    let df = data::read_csv(&input)?;

    let mut required = vec!["INCOME_GRP"];
    required.extend(CUM_COLUMNS.iter().map(|(column, _)| *column));
    data::require_columns(&df, &input, &required)?;

    // values[group][year] in GtCO2
    let values = group_sums(&df)?;

    let label = format!("fig4_barplot_CDR_income_{}", scenario.stem());
    let path = config.result_path(&format!("{label}.png"));
    draw_bars(&path, &values, scenario == Scenario::Scenario0)?;

    Ok(FigureResult {
        label,
        path,
        width: WIDTH,
        height: HEIGHT,
    })
}

/// Sum the cumulative columns per collapsed income group, in Gt
///
/// Countries whose raw `INCOME_GRP` does not map to one of the four
/// display groups are dropped; a group absent from the table sums to zero.
fn group_sums(df: &DataFrame) -> Result<Vec<[f64; 4]>> {
    let raw = data::str_column(df, "INCOME_GRP")?;
    let labels: Vec<String> = raw
        .iter()
        .map(|value| {
            IncomeGroup::from_raw(value)
                .map(|group| group.label().to_string())
                .unwrap_or_default()
        })
        .collect();

    let mut tagged = df.clone();
    tagged.with_column(Series::new("income_group".into(), labels))?;

    let sum_exprs: Vec<Expr> = CUM_COLUMNS
        .iter()
        .map(|(column, _)| col(*column).sum().cast(DataType::Float64))
        .collect();

    let sums = tagged
        .lazy()
        .filter(col("income_group").neq(lit("")))
        .group_by([col("income_group")])
        .agg(sum_exprs)
        .collect()?;

    let names = data::str_column(&sums, "income_group")?;
    let columns: Vec<Vec<f64>> = CUM_COLUMNS
        .iter()
        .map(|(column, _)| data::f64_column(&sums, column))
        .collect::<Result<Vec<_>>>()?;

    let mut values = Vec::with_capacity(IncomeGroup::ALL.len());
    for group in IncomeGroup::ALL {
        let mut row = [0.0f64; 4];
        if let Some(idx) = names.iter().position(|name| name == group.label()) {
            for (year_idx, column) in columns.iter().enumerate() {
                row[year_idx] = column[idx] / KG_PER_GT;
            }
        }
        values.push(row);
    }
    Ok(values)
}

fn draw_bars(path: &Path, values: &[[f64; 4]], primary: bool) -> Result<()> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let n_years = CUM_COLUMNS.len() as f64;
    let mut chart = ChartBuilder::on(&root)
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(55)
        .build_cartesian_2d(-0.55..n_years - 0.45, 0.0..Y_MAX)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .y_desc(if primary { "GtCO2" } else { "" })
        .x_labels(CUM_COLUMNS.len())
        .x_label_formatter(&|x| {
            let idx = x.round();
            if (x - idx).abs() > 1e-6 {
                return String::new();
            }
            CUM_COLUMNS
                .get(idx as usize)
                .map(|(_, year)| year.to_string())
                .unwrap_or_default()
        })
        .label_style(("sans-serif", 18))
        .draw()
        .map_err(draw_err)?;

    let bar_width = GROUP_WIDTH / IncomeGroup::ALL.len() as f64;
    for (group_idx, group) in IncomeGroup::ALL.iter().enumerate() {
        let color = group.color();
        let anno = chart
            .draw_series((0..CUM_COLUMNS.len()).map(|year_idx| {
                let x0 = year_idx as f64 - GROUP_WIDTH / 2.0 + group_idx as f64 * bar_width;
                let height = values[group_idx][year_idx].min(Y_MAX);
                Rectangle::new([(x0, 0.0), (x0 + bar_width, height)], color.filled())
            }))
            .map_err(draw_err)?;
        if primary {
            anno.label(group.label()).legend(move |(x, y)| {
                Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled())
            });
        }

        // Black bar outlines
        chart
            .draw_series((0..CUM_COLUMNS.len()).map(|year_idx| {
                let x0 = year_idx as f64 - GROUP_WIDTH / 2.0 + group_idx as f64 * bar_width;
                let height = values[group_idx][year_idx].min(Y_MAX);
                Rectangle::new([(x0, 0.0), (x0 + bar_width, height)], BLACK)
            }))
            .map_err(draw_err)?;
    }

    if primary {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .border_style(TRANSPARENT)
            .background_style(WHITE.mix(0.7))
            .label_font(("sans-serif", 16))
            .draw()
            .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_sums_collapses_and_scales() {
        let df = df! {
            "INCOME_GRP" => [
                "1. High income: OECD",
                "2. High income: nonOECD",
                "4. Lower middle income",
                "unmapped",
            ],
            "cum_2040" => [1.0e9, 2.0e9, 4.0e9, 100.0e9],
            "cum_2060" => [2.0e9, 3.0e9, 5.0e9, 100.0e9],
            "cum_2080" => [3.0e9, 4.0e9, 6.0e9, 100.0e9],
            "cum_2100" => [4.0e9, 5.0e9, 7.0e9, 100.0e9]
        }
        .unwrap();

        let values = group_sums(&df).unwrap();

        // Both high income rows collapse into one group, in Gt
        assert_eq!(values[0], [3.0, 5.0, 7.0, 9.0]);
        // Lower middle income passes through
        assert_eq!(values[2], [4.0, 5.0, 6.0, 7.0]);
        // Absent groups sum to zero, unmapped rows are dropped
        assert_eq!(values[1], [0.0; 4]);
        assert_eq!(values[3], [0.0; 4]);
    }
}
