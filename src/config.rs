//! Run configuration for the figure pipeline
//!
//! Defaults reproduce the published figures exactly: data under `./data`,
//! output under `./results`, scatter on scenario 4, income bars for
//! scenarios 0, 3 and 4. Command-line flags and `ERW_*` environment
//! variables override them for local runs against other exports.

use std::path::PathBuf;

use crate::erw::{error::Result, FigureError, Scenario};

/// The four figures the pipeline can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureKind {
    /// Fig 2: ERW adoption trajectories per scenario
    Adoption,
    /// Fig 3: global and regional CDR trajectories
    Sequestration,
    /// Fig 3 supplement: country cropland vs. cumulative CDR scatter
    Scatter,
    /// Fig 4: cumulative CDR by income group
    Income,
}

impl FigureKind {
    pub const ALL: [FigureKind; 4] = [
        FigureKind::Adoption,
        FigureKind::Sequestration,
        FigureKind::Scatter,
        FigureKind::Income,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FigureKind::Adoption => "adoption",
            FigureKind::Sequestration => "sequestration",
            FigureKind::Scatter => "scatter",
            FigureKind::Income => "income",
        }
    }

    pub fn parse(name: &str) -> Option<FigureKind> {
        FigureKind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == name.to_lowercase())
    }
}

#[derive(Debug, Clone)]
pub struct FigureConfig {
    /// Directory holding the input CSV tables
    pub data_dir: PathBuf,

    /// Directory the PNG files are written to (created if absent)
    pub results_dir: PathBuf,

    /// Scenario rendered by the country scatter figure
    pub scatter_scenario: Scenario,

    /// Scenarios rendered by the income-group bar figure
    pub income_scenarios: Vec<Scenario>,

    /// Figures to generate, in pipeline order
    pub figures: Vec<FigureKind>,
}

impl Default for FigureConfig {
    fn default() -> Self {
        FigureConfig {
            data_dir: PathBuf::from("./data"),
            results_dir: PathBuf::from("./results"),
            scatter_scenario: Scenario::Scenario4,
            income_scenarios: vec![
                Scenario::Scenario0,
                Scenario::Scenario3,
                Scenario::Scenario4,
            ],
            figures: FigureKind::ALL.to_vec(),
        }
    }
}

impl FigureConfig {
    /// Build the configuration from command-line arguments
    ///
    /// Unknown flags are rejected; `ERW_DATA_DIR` and `ERW_RESULTS_DIR`
    /// apply when the corresponding flag is absent.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut config = FigureConfig::default();

        if let Ok(dir) = std::env::var("ERW_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("ERW_RESULTS_DIR") {
            config.results_dir = PathBuf::from(dir);
        }

        let mut figures: Vec<FigureKind> = Vec::new();
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--data-dir" => {
                    config.data_dir = PathBuf::from(Self::flag_value(args, i, "--data-dir")?);
                    i += 2;
                }
                "--results-dir" => {
                    config.results_dir = PathBuf::from(Self::flag_value(args, i, "--results-dir")?);
                    i += 2;
                }
                "--scatter-scenario" => {
                    let value = Self::flag_value(args, i, "--scatter-scenario")?;
                    config.scatter_scenario = Scenario::from_stem(value)
                        .ok_or_else(|| FigureError::Config(format!("unknown scenario '{value}'")))?;
                    i += 2;
                }
                "--income-scenarios" => {
                    let value = Self::flag_value(args, i, "--income-scenarios")?;
                    config.income_scenarios = value
                        .split(',')
                        .map(|stem| {
                            Scenario::from_stem(stem.trim()).ok_or_else(|| {
                                FigureError::Config(format!("unknown scenario '{stem}'"))
                            })
                        })
                        .collect::<Result<Vec<_>>>()?;
                    i += 2;
                }
                "--figure" => {
                    let value = Self::flag_value(args, i, "--figure")?;
                    let kind = FigureKind::parse(value).ok_or_else(|| {
                        FigureError::Config(format!(
                            "unknown figure '{value}' (expected adoption, sequestration, scatter or income)"
                        ))
                    })?;
                    figures.push(kind);
                    i += 2;
                }
                other => {
                    return Err(FigureError::Config(format!("unknown argument '{other}'")));
                }
            }
        }

        if !figures.is_empty() {
            config.figures = figures;
        }

        Ok(config)
    }

    fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
        args.get(i + 1)
            .map(|s| s.as_str())
            .ok_or_else(|| FigureError::Config(format!("{flag} requires a value")))
    }

    /// Full path of an input CSV under the data directory
    pub fn data_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    /// Full path of an output PNG under the results directory
    pub fn result_path(&self, file_name: &str) -> PathBuf {
        self.results_dir.join(file_name)
    }
}
