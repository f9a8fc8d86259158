//! Structured render requests handed to the chart renderer.

use std::fmt;

use chrono::NaiveDateTime;

use super::sections::ChartSection;
use crate::stats::{CorrelationMatrix, GroupMeans, HistogramBin};

/// One named series of a line chart.
#[derive(Debug, Clone)]
pub struct Series {
    /// Series name shown in the legend.
    pub name: String,
    /// Row-aligned values (missing cells stay missing).
    pub values: Vec<Option<f64>>,
}

/// A structured render request for one eligible chart section.
///
/// The external renderer turns these into pixels; each variant carries
/// exactly the data, column bindings, and chart parameters its section
/// needs. The table itself is never handed out.
#[derive(Debug, Clone)]
pub enum RenderRequest {
    /// First rows of the table, as display strings.
    Preview {
        /// Country label shown in the heading.
        country: String,
        /// Column names, in declaration order.
        columns: Vec<String>,
        /// One vector of cells per row.
        rows: Vec<Vec<String>>,
    },
    /// GHI/DNI/DHI against the timestamp axis.
    IrradianceTimeSeries {
        /// Row-aligned timestamps for the x axis.
        timestamps: Vec<Option<NaiveDateTime>>,
        /// One series per irradiance column.
        series: Vec<Series>,
        /// X axis label.
        x_label: &'static str,
        /// Y axis label.
        y_label: &'static str,
    },
    /// GHI histogram.
    GhiHistogram {
        /// Binned counts.
        bins: Vec<HistogramBin>,
        /// Requested bin count.
        bin_count: usize,
    },
    /// GHI vs ambient temperature scatter with humidity encoding.
    GhiTambBubble {
        /// Ambient temperature (x axis).
        tamb: Vec<Option<f64>>,
        /// Irradiance (y axis).
        ghi: Vec<Option<f64>>,
        /// Relative humidity, bound to both bubble size and color.
        rh: Vec<Option<f64>>,
        /// X axis label.
        x_label: &'static str,
        /// Y axis label.
        y_label: &'static str,
        /// Size/color legend label.
        size_label: &'static str,
    },
    /// Mean ModA/ModB per distinct cleaning flag value.
    CleaningImpactBar {
        /// The transient group-mean aggregation.
        means: GroupMeans,
    },
    /// Lower-triangle Pearson heatmap over all numeric columns.
    CorrelationHeatmap {
        /// Coefficient matrix with its mask predicate.
        matrix: CorrelationMatrix,
        /// Color map name for the renderer.
        color_map: String,
        /// Whether cells carry numeric annotations.
        annotate: bool,
    },
    /// Wind speed histogram.
    WindSpeedHistogram {
        /// Binned counts.
        bins: Vec<HistogramBin>,
        /// Requested bin count.
        bin_count: usize,
    },
}

impl RenderRequest {
    /// Section this request renders.
    pub fn section(&self) -> ChartSection {
        match self {
            Self::Preview { .. } => ChartSection::Preview,
            Self::IrradianceTimeSeries { .. } => ChartSection::IrradianceTimeSeries,
            Self::GhiHistogram { .. } => ChartSection::GhiHistogram,
            Self::GhiTambBubble { .. } => ChartSection::GhiTambBubble,
            Self::CleaningImpactBar { .. } => ChartSection::CleaningImpactBar,
            Self::CorrelationHeatmap { .. } => ChartSection::CorrelationHeatmap,
            Self::WindSpeedHistogram { .. } => ChartSection::WindSpeedHistogram,
        }
    }

    /// Section heading for this request.
    pub fn title(&self) -> &'static str {
        self.section().title()
    }
}

impl fmt::Display for RenderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preview { country, columns, rows } => write!(
                f,
                "preview      | {country}: {} rows x {} columns",
                rows.len(),
                columns.len()
            ),
            Self::IrradianceTimeSeries { timestamps, series, .. } => write!(
                f,
                "time series  | {} over {} timestamps",
                series
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect::<Vec<_>>()
                    .join("/"),
                timestamps.len()
            ),
            Self::GhiHistogram { bins, bin_count } => write!(
                f,
                "histogram    | GHI: {} samples in {bin_count} bins",
                bins.iter().map(|b| b.count).sum::<u64>()
            ),
            Self::GhiTambBubble { tamb, .. } => write!(
                f,
                "scatter      | GHI vs Tamb: {} points, bubble=RH",
                tamb.len()
            ),
            Self::CleaningImpactBar { means } => write!(
                f,
                "bar          | mean {} by {}: {} groups",
                means.value_columns.join("/"),
                means.key,
                means.groups.len()
            ),
            Self::CorrelationHeatmap { matrix, color_map, annotate } => write!(
                f,
                "heatmap      | {0}x{0} correlations, lower triangle, map={color_map}, annotate={annotate}",
                matrix.len()
            ),
            Self::WindSpeedHistogram { bins, bin_count } => write!(
                f,
                "histogram    | WS: {} samples in {bin_count} bins",
                bins.iter().map(|b| b.count).sum::<u64>()
            ),
        }
    }
}
