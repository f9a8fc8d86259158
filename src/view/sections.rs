//! Chart section catalogue: declared order, required columns, skip policy.

use crate::data::table::DataTable;

/// The fixed chart sections of the dashboard, in render order.
///
/// Each section carries its required-column predicate as data; the selector
/// iterates [`ChartSection::ORDER`] instead of branching per section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSection {
    /// First rows of the loaded table (always eligible).
    Preview,
    /// GHI/DNI/DHI line chart over the timestamp column.
    IrradianceTimeSeries,
    /// Distribution of global horizontal irradiance.
    GhiHistogram,
    /// GHI vs ambient temperature scatter, bubble size and color bound to RH.
    GhiTambBubble,
    /// Mean sensor output per distinct cleaning flag value.
    CleaningImpactBar,
    /// Lower-triangle Pearson heatmap over all numeric columns (opt-in).
    CorrelationHeatmap,
    /// Distribution of wind speed.
    WindSpeedHistogram,
}

/// What to do when a section's required columns are missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipPolicy {
    /// Skip the section without telling the user.
    Silent,
    /// Skip the section and surface a warning.
    Warn,
}

impl ChartSection {
    /// Render order for a full pass.
    pub const ORDER: [ChartSection; 7] = [
        ChartSection::Preview,
        ChartSection::IrradianceTimeSeries,
        ChartSection::GhiHistogram,
        ChartSection::GhiTambBubble,
        ChartSection::CleaningImpactBar,
        ChartSection::CorrelationHeatmap,
        ChartSection::WindSpeedHistogram,
    ];

    /// Columns that must be present for the section to be eligible.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Preview | Self::CorrelationHeatmap => &[],
            Self::IrradianceTimeSeries => &["Timestamp", "GHI", "DNI", "DHI"],
            Self::GhiHistogram => &["GHI"],
            Self::GhiTambBubble => &["GHI", "Tamb", "RH"],
            Self::CleaningImpactBar => &["Cleaning", "ModA", "ModB"],
            Self::WindSpeedHistogram => &["WS"],
        }
    }

    /// Section heading shown by the frontends.
    pub fn title(self) -> &'static str {
        match self {
            Self::Preview => "Data Preview",
            Self::IrradianceTimeSeries => "Solar Irradiance Over Time",
            Self::GhiHistogram => "GHI Distribution",
            Self::GhiTambBubble => "GHI vs Ambient Temperature",
            Self::CleaningImpactBar => "Impact of Cleaning on Sensor Output",
            Self::CorrelationHeatmap => "Correlation Heatmap",
            Self::WindSpeedHistogram => "Wind Speed Distribution",
        }
    }

    /// Whether the section renders only after an explicit user opt-in,
    /// independent of column presence.
    pub fn needs_opt_in(self) -> bool {
        matches!(self, Self::CorrelationHeatmap)
    }

    /// Skip policy when required columns are missing.
    ///
    /// Only the irradiance time series escalates a missing timestamp to a
    /// user-visible warning; every other section skips silently.
    pub fn skip_policy(self) -> SkipPolicy {
        match self {
            Self::IrradianceTimeSeries => SkipPolicy::Warn,
            _ => SkipPolicy::Silent,
        }
    }

    /// Required columns absent from `table`, in declaration order.
    pub fn missing_columns(self, table: &DataTable) -> Vec<&'static str> {
        self.required_columns()
            .iter()
            .copied()
            .filter(|name| !table.has_column(name))
            .collect()
    }

    /// Column-presence eligibility (ignores the opt-in toggle).
    pub fn columns_present(self, table: &DataTable) -> bool {
        self.missing_columns(table).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::DataTable;

    fn table(csv: &str) -> DataTable {
        DataTable::from_reader(csv.as_bytes()).expect("fixture should parse")
    }

    #[test]
    fn order_starts_with_preview_and_covers_all_sections() {
        assert_eq!(ChartSection::ORDER.len(), 7);
        assert_eq!(ChartSection::ORDER[0], ChartSection::Preview);
        assert_eq!(
            ChartSection::ORDER[6],
            ChartSection::WindSpeedHistogram,
            "wind speed renders last"
        );
    }

    #[test]
    fn preview_requires_nothing() {
        let t = table("Whatever\n1\n");
        assert!(ChartSection::Preview.columns_present(&t));
        assert!(ChartSection::Preview.required_columns().is_empty());
    }

    #[test]
    fn only_time_series_warns() {
        for section in ChartSection::ORDER {
            let expected = if section == ChartSection::IrradianceTimeSeries {
                SkipPolicy::Warn
            } else {
                SkipPolicy::Silent
            };
            assert_eq!(section.skip_policy(), expected, "{section:?}");
        }
    }

    #[test]
    fn only_heatmap_needs_opt_in() {
        for section in ChartSection::ORDER {
            assert_eq!(
                section.needs_opt_in(),
                section == ChartSection::CorrelationHeatmap,
                "{section:?}"
            );
        }
    }

    #[test]
    fn missing_columns_reports_each_absence() {
        let t = table("GHI,Tamb\n1,20\n");
        assert_eq!(
            ChartSection::GhiTambBubble.missing_columns(&t),
            vec!["RH"]
        );
        assert_eq!(
            ChartSection::IrradianceTimeSeries.missing_columns(&t),
            vec!["Timestamp", "DNI", "DHI"]
        );
        assert!(ChartSection::GhiHistogram.missing_columns(&t).is_empty());
    }
}
