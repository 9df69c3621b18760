//! Fixed category domains of the ERW deployment study
//!
//! Every categorical axis in the figures (World Bank regions, deployment
//! scenarios, income groups, decade periods) is a small hard-coded ordered
//! list bound to a fixed display label and color. There is no dynamic
//! discovery: input tables are expected to use exactly these labels.

use plotters::style::RGBColor;

use super::palettes::PALETTE_REGISTRY;

/// World Bank region classification (display order of the figures)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    NorthAmerica,
    EuropeCentralAsia,
    EastAsiaPacific,
    LatinAmericaCaribbean,
    SouthAsia,
    MiddleEastNorthAfrica,
    SubSaharanAfrica,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::NorthAmerica,
        Region::EuropeCentralAsia,
        Region::EastAsiaPacific,
        Region::LatinAmericaCaribbean,
        Region::SouthAsia,
        Region::MiddleEastNorthAfrica,
        Region::SubSaharanAfrica,
    ];

    /// Display label, also the column/value spelling used by the input CSVs
    pub fn label(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "North America",
            Region::EuropeCentralAsia => "Europe & Central Asia",
            Region::EastAsiaPacific => "East Asia & Pacific",
            Region::LatinAmericaCaribbean => "Latin America & Caribbean",
            Region::SouthAsia => "South Asia",
            Region::MiddleEastNorthAfrica => "Middle East & North Africa",
            Region::SubSaharanAfrica => "Sub-Saharan Africa",
        }
    }

    /// Fixed line/marker color, consistent across all figures
    pub fn color(&self) -> RGBColor {
        match self {
            Region::NorthAmerica => RGBColor(0, 0, 0),            // black
            Region::EuropeCentralAsia => RGBColor(128, 128, 128), // gray
            Region::EastAsiaPacific => RGBColor(0, 0, 255),       // blue
            Region::LatinAmericaCaribbean => RGBColor(255, 0, 255), // fuchsia
            Region::SouthAsia => RGBColor(255, 0, 0),             // red
            Region::MiddleEastNorthAfrica => RGBColor(255, 140, 0), // dark orange
            Region::SubSaharanAfrica => RGBColor(50, 205, 50),    // lime green
        }
    }

    /// Look up a region by its display label
    pub fn from_label(label: &str) -> Option<Region> {
        Region::ALL.iter().copied().find(|r| r.label() == label)
    }
}

/// Line rendering style for scenario trajectories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl LineStyle {
    /// Dash segment length and gap in pixels, None for a solid line
    pub fn dash_pattern(&self) -> Option<(u32, u32)> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some((10, 6)),
            LineStyle::DashDot => Some((7, 5)),
            LineStyle::Dotted => Some((2, 5)),
        }
    }
}

/// The five deployment scenarios compared across the figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Scenario0,
    Scenario1,
    Scenario2,
    Scenario3,
    Scenario4,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::Scenario0,
        Scenario::Scenario1,
        Scenario::Scenario2,
        Scenario::Scenario3,
        Scenario::Scenario4,
    ];

    /// Trigger-point years of the human-nature coupled scenario (Scenario 4)
    pub const TRIGGER_POINTS: [(f64, &'static str); 3] = [
        (2037.0, "TP1 (2037)"),
        (2046.0, "TP2 (2046)"),
        (2056.0, "TP3 (2056)"),
    ];

    pub fn index(&self) -> usize {
        match self {
            Scenario::Scenario0 => 0,
            Scenario::Scenario1 => 1,
            Scenario::Scenario2 => 2,
            Scenario::Scenario3 => 3,
            Scenario::Scenario4 => 4,
        }
    }

    /// File-name stem, e.g. `scenario3` in `country_CDR_scenario3.csv`
    pub fn stem(&self) -> &'static str {
        match self {
            Scenario::Scenario0 => "scenario0",
            Scenario::Scenario1 => "scenario1",
            Scenario::Scenario2 => "scenario2",
            Scenario::Scenario3 => "scenario3",
            Scenario::Scenario4 => "scenario4",
        }
    }

    /// Column name in the global CDR tables
    pub fn column(&self) -> &'static str {
        match self {
            Scenario::Scenario0 => "Scenario0",
            Scenario::Scenario1 => "Scenario1",
            Scenario::Scenario2 => "Scenario2",
            Scenario::Scenario3 => "Scenario3",
            Scenario::Scenario4 => "Scenario4",
        }
    }

    /// Short legend label
    pub fn short_label(&self) -> &'static str {
        match self {
            Scenario::Scenario0 => "Scenario 0",
            Scenario::Scenario1 => "Scenario 1",
            Scenario::Scenario2 => "Scenario 2",
            Scenario::Scenario3 => "Scenario 3",
            Scenario::Scenario4 => "Scenario 4",
        }
    }

    /// Panel title used in the adoption trajectory figure
    pub fn title(&self) -> &'static str {
        match self {
            Scenario::Scenario0 => "Scenario 0 (Baseline)",
            Scenario::Scenario1 => "Scenario 1 (Higher application ceilings)",
            Scenario::Scenario2 => "Scenario 2 (Earlier kick-offs)",
            Scenario::Scenario3 => "Scenario 3 (More aggressive growth)",
            Scenario::Scenario4 => "Scenario 4 (Human-nature coupled)",
        }
    }

    /// Parse a file-name stem such as `scenario2`
    pub fn from_stem(stem: &str) -> Option<Scenario> {
        Scenario::ALL.iter().copied().find(|s| s.stem() == stem)
    }

    /// Line color in the global CDR panels
    ///
    /// Scenario 0 and 4 use fixed named colors; 1-3 take the three darkest
    /// entries of a 6-color YlGnBu sample, matching the published styling.
    pub fn color(&self) -> RGBColor {
        match self {
            Scenario::Scenario0 => RGBColor(65, 105, 225), // royal blue
            Scenario::Scenario4 => RGBColor(218, 165, 32), // goldenrod
            _ => {
                let palette = PALETTE_REGISTRY
                    .get("YlGnBu")
                    .expect("YlGnBu palette missing from embedded palettes.json");
                let samples = palette.sample(6);
                let [r, g, b] = match self {
                    Scenario::Scenario1 => samples[5],
                    Scenario::Scenario2 => samples[4],
                    _ => samples[3], // Scenario3
                };
                RGBColor(r, g, b)
            }
        }
    }

    /// Line style in the global CDR panels
    pub fn line_style(&self) -> LineStyle {
        match self {
            Scenario::Scenario0 => LineStyle::Solid,
            Scenario::Scenario1 => LineStyle::Dashed,
            Scenario::Scenario2 => LineStyle::DashDot,
            Scenario::Scenario3 => LineStyle::Dotted,
            Scenario::Scenario4 => LineStyle::Solid,
        }
    }
}

/// Collapsed World Bank income classification (display order of the bars)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncomeGroup {
    High,
    UpperMiddle,
    LowerMiddle,
    Low,
}

impl IncomeGroup {
    pub const ALL: [IncomeGroup; 4] = [
        IncomeGroup::High,
        IncomeGroup::UpperMiddle,
        IncomeGroup::LowerMiddle,
        IncomeGroup::Low,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IncomeGroup::High => "High income",
            IncomeGroup::UpperMiddle => "Upper middle income",
            IncomeGroup::LowerMiddle => "Lower middle income",
            IncomeGroup::Low => "Low income",
        }
    }

    /// Collapse a raw `INCOME_GRP` value to its display group
    ///
    /// Both OECD and non-OECD high income map to High. Unknown labels
    /// return None and their rows are dropped from the bar figure.
    pub fn from_raw(raw: &str) -> Option<IncomeGroup> {
        match raw {
            "1. High income: OECD" | "2. High income: nonOECD" => Some(IncomeGroup::High),
            "3. Upper middle income" => Some(IncomeGroup::UpperMiddle),
            "4. Lower middle income" => Some(IncomeGroup::LowerMiddle),
            "5. Low income" => Some(IncomeGroup::Low),
            _ => None,
        }
    }

    /// Bar fill color: a reversed 4-color sample of the Oranges scale,
    /// so High income takes the darkest shade
    pub fn color(&self) -> RGBColor {
        let palette = PALETTE_REGISTRY
            .get("Oranges")
            .expect("Oranges palette missing from embedded palettes.json");
        let samples = palette.sample(4);
        let [r, g, b] = match self {
            IncomeGroup::High => samples[3],
            IncomeGroup::UpperMiddle => samples[2],
            IncomeGroup::LowerMiddle => samples[1],
            IncomeGroup::Low => samples[0],
        };
        RGBColor(r, g, b)
    }
}

/// Decade periods of the country scatter figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Y2030To2040,
    Y2040To2050,
    Y2050To2060,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Y2030To2040, Period::Y2040To2050, Period::Y2050To2060];

    /// Column name in the country CDR tables
    pub fn column(&self) -> &'static str {
        match self {
            Period::Y2030To2040 => "30_40",
            Period::Y2040To2050 => "40_50",
            Period::Y2050To2060 => "50_60",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Period::Y2030To2040 => "2030-2040",
            Period::Y2040To2050 => "2040-2050",
            Period::Y2050To2060 => "2050-2060",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_order_and_labels() {
        assert_eq!(Region::ALL.len(), 7);
        assert_eq!(Region::ALL[0].label(), "North America");
        assert_eq!(Region::ALL[6].label(), "Sub-Saharan Africa");
        assert_eq!(
            Region::from_label("Middle East & North Africa"),
            Some(Region::MiddleEastNorthAfrica)
        );
        assert_eq!(Region::from_label("Antarctica"), None);
    }

    #[test]
    fn test_region_colors_distinct() {
        for (i, a) in Region::ALL.iter().enumerate() {
            for b in &Region::ALL[i + 1..] {
                assert_ne!(a.color(), b.color(), "{} vs {}", a.label(), b.label());
            }
        }
    }

    #[test]
    fn test_scenario_naming() {
        assert_eq!(Scenario::Scenario3.stem(), "scenario3");
        assert_eq!(Scenario::Scenario3.column(), "Scenario3");
        assert_eq!(Scenario::from_stem("scenario4"), Some(Scenario::Scenario4));
        assert_eq!(Scenario::from_stem("scenario9"), None);
    }

    #[test]
    fn test_income_group_collapse() {
        assert_eq!(
            IncomeGroup::from_raw("1. High income: OECD"),
            Some(IncomeGroup::High)
        );
        assert_eq!(
            IncomeGroup::from_raw("2. High income: nonOECD"),
            Some(IncomeGroup::High)
        );
        assert_eq!(
            IncomeGroup::from_raw("4. Lower middle income"),
            Some(IncomeGroup::LowerMiddle)
        );
        assert_eq!(IncomeGroup::from_raw("unclassified"), None);
    }

    #[test]
    fn test_income_colors_darken_with_income() {
        // High income takes the darkest shade of the reversed Oranges sample
        let high = IncomeGroup::High.color();
        let low = IncomeGroup::Low.color();
        let luma = |c: &plotters::style::RGBColor| c.0 as u32 + c.1 as u32 + c.2 as u32;
        assert!(luma(&high) < luma(&low));
    }

    #[test]
    fn test_period_columns() {
        let cols: Vec<&str> = Period::ALL.iter().map(|p| p.column()).collect();
        assert_eq!(cols, vec!["30_40", "40_50", "50_60"]);
    }
}
