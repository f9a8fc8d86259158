//! Dashboard application state.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::{Country, CountryDataset, DatasetCache};
use crate::view::render::RenderRequest;
use crate::view::selector::{RenderPass, ViewOptions, build_render_pass};

/// TUI application state.
///
/// Owns the dataset cache, so every app instance is its own cache namespace.
/// One user interaction (country selection, heatmap toggle) triggers exactly
/// one full re-evaluation of the render pass.
pub struct App {
    cache: DatasetCache,
    opts: ViewOptions,
    /// Currently selected country.
    pub country: Country,
    /// Dataset behind the current pass, when the last load succeeded.
    pub dataset: Option<Arc<CountryDataset>>,
    /// Result of the latest render pass.
    pub pass: Option<RenderPass>,
    /// Cursor into the current pass's requests.
    pub selected: usize,
    /// Load failure message for the current selection.
    pub load_error: Option<String>,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates the app and runs the first render pass.
    pub fn new(config: &DashboardConfig, country: Country) -> Self {
        let mut app = Self {
            cache: DatasetCache::new(config.data.dir.as_str()),
            opts: ViewOptions::from_config(config),
            country,
            dataset: None,
            pass: None,
            selected: 0,
            load_error: None,
            quit: false,
        };
        app.rebuild();
        app
    }

    /// Re-evaluates the full render pass for the current selection.
    ///
    /// A load failure surfaces a message and drops the current view; datasets
    /// cached for other countries are untouched.
    pub fn rebuild(&mut self) {
        match self.cache.load(self.country) {
            Ok(dataset) => {
                self.pass = Some(build_render_pass(&dataset, &self.opts));
                self.dataset = Some(dataset);
                self.load_error = None;
                let len = self.section_count();
                if self.selected >= len {
                    self.selected = len.saturating_sub(1);
                }
            }
            Err(e) => {
                self.dataset = None;
                self.pass = None;
                self.selected = 0;
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Switches to a country from the selector.
    pub fn select_country(&mut self, country: Country) {
        if country == self.country && self.load_error.is_none() {
            return;
        }
        self.country = country;
        self.selected = 0;
        self.rebuild();
    }

    /// Toggles the correlation heatmap opt-in and re-evaluates.
    pub fn toggle_heatmap(&mut self) {
        self.opts.show_heatmap = !self.opts.show_heatmap;
        self.rebuild();
    }

    /// Whether the heatmap opt-in is currently enabled.
    pub fn show_heatmap(&self) -> bool {
        self.opts.show_heatmap
    }

    /// Number of render requests in the current pass.
    pub fn section_count(&self) -> usize {
        self.pass.as_ref().map_or(0, |p| p.requests.len())
    }

    /// Moves the section cursor down.
    pub fn next_section(&mut self) {
        if self.selected + 1 < self.section_count() {
            self.selected += 1;
        }
    }

    /// Moves the section cursor up.
    pub fn prev_section(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Render request under the cursor.
    pub fn selected_request(&self) -> Option<&RenderRequest> {
        self.pass.as_ref()?.requests.get(self.selected)
    }

    /// Whether the country's dataset is already cached.
    pub fn is_cached(&self, country: Country) -> bool {
        self.cache.is_cached(country)
    }

    /// File reads performed so far (status display).
    pub fn file_reads(&self) -> usize {
        self.cache.loads()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::view::sections::ChartSection;

    const FULL_CSV: &str = "\
Timestamp,GHI,DNI,DHI,Tamb,RH,ModA,ModB,Cleaning,WS
2021-08-09 10:00:00,410.5,520.1,110.0,28.4,61.2,240.1,238.9,0,3.1
2021-08-09 11:00:00,455.0,540.8,120.3,29.1,58.7,244.7,242.0,1,2.8
";

    fn write_all_countries(dir: &Path) {
        for country in Country::ALL {
            fs::write(dir.join(country.file_name()), FULL_CSV).expect("fixture write");
        }
    }

    fn config_for(dir: &Path) -> DashboardConfig {
        let mut cfg = DashboardConfig::baseline();
        cfg.data.dir = dir.to_string_lossy().into_owned();
        cfg
    }

    #[test]
    fn app_builds_first_pass_on_creation() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_all_countries(dir.path());

        let app = App::new(&config_for(dir.path()), Country::Benin);
        assert!(app.load_error.is_none());
        assert!(app.section_count() > 0);
        assert_eq!(app.file_reads(), 1);
    }

    #[test]
    fn reselecting_same_country_does_not_reload() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_all_countries(dir.path());

        let mut app = App::new(&config_for(dir.path()), Country::Togo);
        app.select_country(Country::Togo);
        assert_eq!(app.file_reads(), 1);
    }

    #[test]
    fn country_switch_rebuilds_from_cache() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_all_countries(dir.path());

        let mut app = App::new(&config_for(dir.path()), Country::Togo);
        app.select_country(Country::Benin);
        app.select_country(Country::Togo);
        // Togo came from the cache on the way back
        assert_eq!(app.file_reads(), 2);
        assert_eq!(
            app.pass.as_ref().map(|p| p.country.as_str()),
            Some("Togo")
        );
    }

    #[test]
    fn heatmap_toggle_adds_and_removes_the_section() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_all_countries(dir.path());

        let mut app = App::new(&config_for(dir.path()), Country::Benin);
        let has_heatmap = |app: &App| {
            app.pass
                .as_ref()
                .is_some_and(|p| p.has_section(ChartSection::CorrelationHeatmap))
        };
        assert!(!has_heatmap(&app));

        app.toggle_heatmap();
        assert!(has_heatmap(&app));
        // Toggling re-evaluates from the cache, not from disk
        assert_eq!(app.file_reads(), 1);

        app.toggle_heatmap();
        assert!(!has_heatmap(&app));
    }

    #[test]
    fn load_failure_surfaces_error_and_keeps_other_countries() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Only Benin has a file
        fs::write(dir.path().join(Country::Benin.file_name()), FULL_CSV).expect("fixture write");

        let mut app = App::new(&config_for(dir.path()), Country::Benin);
        app.select_country(Country::Togo);
        assert!(app.load_error.is_some());
        assert!(app.pass.is_none());
        assert!(app.is_cached(Country::Benin));

        app.select_country(Country::Benin);
        assert!(app.load_error.is_none());
        assert_eq!(app.file_reads(), 1);
    }

    #[test]
    fn section_cursor_stays_in_bounds() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_all_countries(dir.path());

        let mut app = App::new(&config_for(dir.path()), Country::Benin);
        let count = app.section_count();
        for _ in 0..20 {
            app.next_section();
        }
        assert_eq!(app.selected, count - 1);
        for _ in 0..20 {
            app.prev_section();
        }
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn cursor_clamps_when_pass_shrinks() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_all_countries(dir.path());

        let mut app = App::new(&config_for(dir.path()), Country::Benin);
        app.toggle_heatmap();
        for _ in 0..20 {
            app.next_section();
        }
        let with_heatmap = app.selected;
        app.toggle_heatmap();
        assert!(app.selected < with_heatmap);
        assert!(app.selected < app.section_count());
    }
}
