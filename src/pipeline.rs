//! Figure generation pipeline
//!
//! Runs the configured figures in order and reports what was written.
//! Figures are independent: each reads its own CSVs and saves one or more
//! PNG files under the results directory.

use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use crate::config::{FigureConfig, FigureKind};
use crate::erw::Result;
use crate::figures;

/// A rendered figure on disk
#[derive(Debug, Clone)]
pub struct FigureResult {
    /// File stem, e.g. `fig2_adoption_trajectory`
    pub label: String,
    /// Path of the written PNG
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Generate all configured figures
///
/// The results directory is created if needed. Rendering stops at the
/// first failing figure; partially written output from earlier figures
/// is left in place.
pub fn generate_figures(config: &FigureConfig) -> Result<Vec<FigureResult>> {
    std::fs::create_dir_all(&config.results_dir)?;

    info!(
        data_dir = %config.data_dir.display(),
        results_dir = %config.results_dir.display(),
        "generating {} figure(s)",
        config.figures.len()
    );

    let mut results: Vec<FigureResult> = Vec::new();
    let total = config.figures.len();

    for (i, kind) in config.figures.iter().enumerate() {
        info!("[{}/{}] rendering {} figure", i + 1, total, kind.name());
        let start = Instant::now();

        let mut rendered = match kind {
            FigureKind::Adoption => vec![figures::adoption::render(config)?],
            FigureKind::Sequestration => vec![figures::sequestration::render(config)?],
            FigureKind::Scatter => vec![figures::scatter::render(config)?],
            FigureKind::Income => figures::income::render_all(config)?,
        };

        for result in &rendered {
            info!(
                "  wrote {} ({}x{} px) in {:.2}s",
                result.path.display(),
                result.width,
                result.height,
                start.elapsed().as_secs_f64()
            );
        }
        results.append(&mut rendered);
    }

    Ok(results)
}
