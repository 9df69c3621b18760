//! Shared plotters helpers for the figure modules
//!
//! All figures render through the bitmap backend onto panel grids produced
//! by `split_evenly`. The helpers here cover what every panel needs: styled
//! (optionally dashed) line series with legend entries, shaded confidence
//! bands, and the panel letter annotation.

use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::erw::{draw_err, LineStyle, Result};

/// A sub-area of a bitmap figure (one panel of the grid)
pub type Panel<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// A 2D chart over f64 axes drawn into a panel
pub type PanelChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Draw a line series with the given style, registering a legend entry
/// when a label is supplied
pub fn draw_line(
    chart: &mut PanelChart,
    points: Vec<(f64, f64)>,
    line_style: LineStyle,
    color: RGBColor,
    width: u32,
    label: Option<&str>,
) -> Result<()> {
    let style = ShapeStyle::from(&color).stroke_width(width);
    let anno = match line_style.dash_pattern() {
        None => chart
            .draw_series(LineSeries::new(points, style))
            .map_err(draw_err)?,
        Some((size, gap)) => chart
            .draw_series(DashedLineSeries::new(points, size, gap, style))
            .map_err(draw_err)?,
    };
    if let Some(label) = label {
        anno.label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }
    Ok(())
}

/// Shade the area between a lower and an upper curve at low opacity
pub fn draw_band(
    chart: &mut PanelChart,
    lower: &[(f64, f64)],
    upper: &[(f64, f64)],
    color: RGBColor,
    opacity: f64,
) -> Result<()> {
    let mut outline: Vec<(f64, f64)> = upper.to_vec();
    outline.extend(lower.iter().rev().copied());
    chart
        .draw_series(std::iter::once(Polygon::new(
            outline,
            color.mix(opacity).filled(),
        )))
        .map_err(draw_err)?;
    Ok(())
}

/// Draw the panel letter annotation in the top-left corner
pub fn panel_letter(panel: &Panel, letter: char) -> Result<()> {
    panel
        .draw(&Text::new(
            letter.to_string(),
            (14, 6),
            ("sans-serif", 30).into_font().color(&BLACK),
        ))
        .map_err(draw_err)?;
    Ok(())
}

/// Value range with a proportional margin on both ends
///
/// Falls back to (0, 1) when the input holds no finite values, so an empty
/// panel still builds a valid chart.
pub fn padded_range(values: impl Iterator<Item = f64>, pad: f64) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min > max {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 0.5, max + 0.5);
    }
    let span = max - min;
    (min - pad * span, max + pad * span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        let (lo, hi) = padded_range([2030.0, 2100.0].into_iter(), 0.0);
        assert_eq!((lo, hi), (2030.0, 2100.0));

        let (lo, hi) = padded_range([0.0, 10.0].into_iter(), 0.1);
        assert_eq!((lo, hi), (-1.0, 11.0));
    }

    #[test]
    fn test_padded_range_degenerate() {
        assert_eq!(padded_range(std::iter::empty(), 0.1), (0.0, 1.0));
        assert_eq!(padded_range([f64::NAN].into_iter(), 0.1), (0.0, 1.0));
        assert_eq!(padded_range([5.0].into_iter(), 0.1), (4.5, 5.5));
    }
}
