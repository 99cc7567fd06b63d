use crate::catalog::{CatalogIndex, CatalogSource, CategorySnapshot};
use crate::config::{self, Config, ConfigError};
use crate::launch::{AppLauncher, LaunchError};
use crate::logging;
use crate::model::AppEntry;
use crate::popup::PopupState;
use crate::prefs::{PreferenceSet, PrefsError};
use crate::view::{Projection, ViewProjector, ViewState};

const HIDDEN_LIST_HEADER: &str = "Hidden applications";

#[derive(Debug)]
pub enum EngineError {
    Prefs(PrefsError),
    Config(ConfigError),
    Launch(LaunchError),
    AppNotFound(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prefs(error) => write!(f, "preference error: {error}"),
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Launch(error) => write!(f, "launch error: {error}"),
            Self::AppNotFound(id) => write!(f, "application not found: {id}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<PrefsError> for EngineError {
    fn from(value: PrefsError) -> Self {
        Self::Prefs(value)
    }
}

impl From<ConfigError> for EngineError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LaunchError> for EngineError {
    fn from(value: LaunchError) -> Self {
        Self::Launch(value)
    }
}

/// A hidden id paired with its display name when the application is
/// still present in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenListing {
    pub id: String,
    pub name: Option<String>,
}

/// One menu instance: the catalog index, both preference sets, the
/// active view, and the popup state, constructed once per popup.
///
/// Everything runs on the caller's thread; a catalog rebuild always
/// completes before the next projection is evaluated.
pub struct MenuEngine {
    config: Config,
    source: Box<dyn CatalogSource>,
    index: CatalogIndex,
    favorites: PreferenceSet,
    hidden: PreferenceSet,
    projector: ViewProjector,
    popup: PopupState,
}

impl MenuEngine {
    pub fn new(config: Config, source: Box<dyn CatalogSource>) -> Self {
        // A broken log file must not keep the menu from coming up.
        let _ = logging::init();

        let favorites = PreferenceSet::load(config.favorites_path.clone());
        let hidden = PreferenceSet::load_with_header(config.hidden_path.clone(), HIDDEN_LIST_HEADER);
        logging::info(&format!(
            "preferences loaded: {} favorites, {} hidden",
            favorites.len(),
            hidden.len()
        ));

        let index = CatalogIndex::rebuild(source.root().as_ref());
        logging::info(&format!(
            "catalog indexed: {} categories, {} apps",
            index.categories.len(),
            index.all_apps.len()
        ));

        Self {
            config,
            source,
            index,
            favorites,
            hidden,
            projector: ViewProjector::default(),
            popup: PopupState::default(),
        }
    }

    /// External catalog-change notification: rebuild the index and keep
    /// the current view, so a selected category or an active search
    /// survives the reload. Preference sets are untouched.
    pub fn notify_reload(&mut self) {
        self.index = CatalogIndex::rebuild(self.source.root().as_ref());
        logging::info(&format!(
            "catalog reloaded: {} categories, {} apps",
            self.index.categories.len(),
            self.index.all_apps.len()
        ));
    }

    pub fn categories(&self) -> &[CategorySnapshot] {
        &self.index.categories
    }

    pub fn view(&self) -> &ViewState {
        self.projector.view()
    }

    pub fn select_category(&mut self, id: &str) {
        self.projector.select_category(id);
    }

    pub fn show_favorites(&mut self) {
        self.projector.show_favorites();
    }

    pub fn set_search(&mut self, query: &str) {
        self.projector.set_search(query);
    }

    /// The entries to display for the current view, hidden apps always
    /// excluded.
    pub fn visible(&self) -> Projection {
        self.projector
            .project(&self.index, &self.favorites, &self.hidden)
    }

    /// The current projection chunked into display rows of the
    /// configured width.
    pub fn visible_rows(&self) -> Vec<Vec<AppEntry>> {
        self.visible()
            .entries
            .chunks(self.config.apps_per_row.max(1))
            .map(|row| row.to_vec())
            .collect()
    }

    pub fn apps_per_row(&self) -> usize {
        self.config.apps_per_row
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.contains(id)
    }

    /// Returns whether the app is a favorite after the toggle.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, EngineError> {
        let favored = self.favorites.toggle(id)?;
        Ok(favored)
    }

    /// Returns whether the app is hidden after the toggle.
    pub fn toggle_hidden(&mut self, id: &str) -> Result<bool, EngineError> {
        let hidden = self.hidden.toggle(id)?;
        Ok(hidden)
    }

    pub fn unhide(&mut self, id: &str) -> Result<bool, EngineError> {
        Ok(self.hidden.remove(id)?)
    }

    pub fn favorites(&self) -> &PreferenceSet {
        &self.favorites
    }

    pub fn hidden(&self) -> &PreferenceSet {
        &self.hidden
    }

    /// Hidden ids with display names resolved against the live catalog,
    /// for the "manage hidden applications" dialog. Ids no longer in
    /// the catalog keep a bare listing.
    pub fn hidden_overview(&self) -> Vec<HiddenListing> {
        self.hidden
            .ids()
            .iter()
            .map(|id| HiddenListing {
                id: id.clone(),
                name: self.index.find_app(id).map(|app| app.name.clone()),
            })
            .collect()
    }

    /// Activates the entry through the injected launcher. The popup
    /// hides whether or not activation succeeded; the error is still
    /// returned so the host can show a notice.
    pub fn launch(&mut self, id: &str, launcher: &dyn AppLauncher) -> Result<(), EngineError> {
        let result = match self.index.find_app(id) {
            None => Err(EngineError::AppNotFound(id.to_string())),
            Some(entry) => launcher.activate(entry).map_err(EngineError::from),
        };

        if let Err(error) = &result {
            logging::warn(&format!("launch of '{id}' failed: {error}"));
        }
        self.popup.hide();
        result
    }

    pub fn popup(&self) -> &PopupState {
        &self.popup
    }

    pub fn popup_mut(&mut self) -> &mut PopupState {
        &mut self.popup
    }

    pub fn icon(&self) -> &str {
        &self.config.icon
    }

    /// Updates the panel icon option and persists the configuration.
    pub fn set_icon(&mut self, icon: &str) -> Result<(), EngineError> {
        self.config.icon = icon.to_string();
        config::save(&self.config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
