//! Ordered eligibility evaluation producing one render pass.

use std::fmt;

use super::render::{RenderRequest, Series};
use super::sections::{ChartSection, SkipPolicy};
use crate::config::DashboardConfig;
use crate::data::loader::CountryDataset;
use crate::data::table::ColumnData;
use crate::stats;

/// Display parameters for one render pass.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Correlation heatmap opt-in toggle.
    pub show_heatmap: bool,
    /// Rows shown in the preview section.
    pub preview_rows: usize,
    /// Bin count for the GHI histogram.
    pub ghi_bins: usize,
    /// Bin count for the wind speed histogram.
    pub ws_bins: usize,
    /// Color map name for the heatmap renderer.
    pub heatmap_color_map: String,
    /// Whether heatmap cells carry numeric annotations.
    pub heatmap_annotate: bool,
}

impl ViewOptions {
    /// Options derived from the dashboard configuration.
    pub fn from_config(cfg: &DashboardConfig) -> Self {
        Self {
            show_heatmap: cfg.ui.show_heatmap,
            preview_rows: cfg.charts.preview_rows,
            ghi_bins: cfg.charts.ghi_bins,
            ws_bins: cfg.charts.ws_bins,
            heatmap_color_map: cfg.charts.heatmap_color_map.clone(),
            heatmap_annotate: cfg.charts.heatmap_annotate,
        }
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::baseline())
    }
}

/// Non-fatal missing-dependency notice surfaced to the user.
#[derive(Debug, Clone)]
pub struct SectionWarning {
    /// Section that was skipped.
    pub section: ChartSection,
    /// User-visible message.
    pub message: String,
}

impl fmt::Display for SectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The outcome of one full top-to-bottom evaluation.
#[derive(Debug, Clone)]
pub struct RenderPass {
    /// Country label of the evaluated dataset.
    pub country: String,
    /// Render requests for every eligible section, in declared order.
    pub requests: Vec<RenderRequest>,
    /// Warnings raised by skipped sections.
    pub warnings: Vec<SectionWarning>,
}

impl RenderPass {
    /// Whether `section` produced a render request in this pass.
    pub fn has_section(&self, section: ChartSection) -> bool {
        self.requests.iter().any(|r| r.section() == section)
    }

    /// The request for `section`, if it was eligible.
    pub fn request(&self, section: ChartSection) -> Option<&RenderRequest> {
        self.requests.iter().find(|r| r.section() == section)
    }
}

/// Evaluates every section against the loaded table, in declared order.
///
/// Ineligible sections are skipped silently, except the irradiance time
/// series, which surfaces a warning when the timestamp column is absent. The
/// source table is never mutated; the cleaning aggregation is the only
/// transient intermediate.
pub fn build_render_pass(dataset: &CountryDataset, opts: &ViewOptions) -> RenderPass {
    let table = &dataset.table;
    let mut requests = Vec::new();
    let mut warnings = Vec::new();

    for section in ChartSection::ORDER {
        if section.needs_opt_in() && !opts.show_heatmap {
            continue;
        }
        let missing = section.missing_columns(table);
        if !missing.is_empty() {
            if section.skip_policy() == SkipPolicy::Warn && missing.contains(&"Timestamp") {
                warnings.push(SectionWarning {
                    section,
                    message: "Timestamp column not found in data.".to_string(),
                });
            }
            continue;
        }
        if let Some(request) = build_request(section, dataset, opts) {
            requests.push(request);
        }
    }

    RenderPass {
        country: dataset.country.label().to_string(),
        requests,
        warnings,
    }
}

/// Builds the request for one eligible section.
///
/// Returns `None` when a present column has the wrong type for the section
/// (treated like any other silent ineligibility).
fn build_request(
    section: ChartSection,
    dataset: &CountryDataset,
    opts: &ViewOptions,
) -> Option<RenderRequest> {
    let table = &dataset.table;
    match section {
        ChartSection::Preview => Some(RenderRequest::Preview {
            country: dataset.country.label().to_string(),
            columns: table.column_names().to_vec(),
            rows: table.head(opts.preview_rows),
        }),
        ChartSection::IrradianceTimeSeries => {
            let timestamps = table
                .column("Timestamp")
                .and_then(ColumnData::as_timestamps)?
                .to_vec();
            let series = ["GHI", "DNI", "DHI"]
                .into_iter()
                .map(|name| {
                    table.numeric(name).map(|values| Series {
                        name: name.to_string(),
                        values: values.to_vec(),
                    })
                })
                .collect::<Option<Vec<_>>>()?;
            Some(RenderRequest::IrradianceTimeSeries {
                timestamps,
                series,
                x_label: "Date",
                y_label: "Irradiance (W/m²)",
            })
        }
        ChartSection::GhiHistogram => {
            let values = table.numeric("GHI")?;
            Some(RenderRequest::GhiHistogram {
                bins: stats::histogram_bins(values, opts.ghi_bins),
                bin_count: opts.ghi_bins,
            })
        }
        ChartSection::GhiTambBubble => Some(RenderRequest::GhiTambBubble {
            tamb: table.numeric("Tamb")?.to_vec(),
            ghi: table.numeric("GHI")?.to_vec(),
            rh: table.numeric("RH")?.to_vec(),
            x_label: "Ambient Temp (°C)",
            y_label: "GHI (W/m²)",
            size_label: "Humidity (%)",
        }),
        ChartSection::CleaningImpactBar => {
            let means = stats::group_mean(table, "Cleaning", &["ModA", "ModB"])?;
            Some(RenderRequest::CleaningImpactBar { means })
        }
        ChartSection::CorrelationHeatmap => {
            let matrix = stats::correlation_matrix(table);
            // One numeric column correlates only with itself; nothing to show.
            if matrix.len() < 2 {
                return None;
            }
            Some(RenderRequest::CorrelationHeatmap {
                matrix,
                color_map: opts.heatmap_color_map.clone(),
                annotate: opts.heatmap_annotate,
            })
        }
        ChartSection::WindSpeedHistogram => {
            let values = table.numeric("WS")?;
            Some(RenderRequest::WindSpeedHistogram {
                bins: stats::histogram_bins(values, opts.ws_bins),
                bin_count: opts.ws_bins,
            })
        }
    }
}
