use crate::catalog::CatalogIndex;
use crate::model::{normalize_for_match, AppEntry};
use crate::prefs::PreferenceSet;

pub const DEFAULT_APPS_PER_ROW: usize = 3;

/// The active presentation mode. Exactly one is active at a time;
/// switching modes is exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Category(String),
    Favorites,
    Search(String),
}

/// Why a projection came back empty. The host renders these as
/// explanatory labels instead of treating empty results as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    NoApplications,
    EmptyCategory,
    NoFavorites,
    FavoritesFiltered,
    NoMatches,
}

impl Placeholder {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoApplications => "No applications",
            Self::EmptyCategory => "No applications in this category",
            Self::NoFavorites => "No favorite applications",
            Self::FavoritesFiltered => "All favorite applications are hidden",
            Self::NoMatches => "No matching applications found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub entries: Vec<AppEntry>,
    pub placeholder: Option<Placeholder>,
}

impl Projection {
    fn of(entries: Vec<AppEntry>, when_empty: Placeholder) -> Self {
        let placeholder = entries.is_empty().then_some(when_empty);
        Self {
            entries,
            placeholder,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Groups the projected entries into fixed-width display rows.
    /// Purely presentational; the projection order is untouched.
    pub fn rows(&self, per_row: usize) -> Vec<&[AppEntry]> {
        self.entries.chunks(per_row.max(1)).collect()
    }
}

/// Owns the active [`ViewState`] plus the last non-search (browse) view
/// and computes the visible entry sequence for it.
///
/// Hidden ids are excluded from every projection, regardless of mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewProjector {
    view: ViewState,
    browse: ViewState,
}

impl Default for ViewProjector {
    fn default() -> Self {
        Self {
            view: ViewState::Favorites,
            browse: ViewState::Favorites,
        }
    }
}

impl ViewProjector {
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn select_category(&mut self, id: &str) {
        self.view = ViewState::Category(id.to_string());
        self.browse = self.view.clone();
    }

    pub fn show_favorites(&mut self) {
        self.view = ViewState::Favorites;
        self.browse = ViewState::Favorites;
    }

    /// A non-empty query overrides whatever browse view is active; an
    /// empty query restores the last browse view instead of projecting
    /// an empty result.
    pub fn set_search(&mut self, query: &str) {
        if query.is_empty() {
            self.view = self.browse.clone();
        } else {
            self.view = ViewState::Search(query.to_string());
        }
    }

    pub fn project(
        &self,
        index: &CatalogIndex,
        favorites: &PreferenceSet,
        hidden: &PreferenceSet,
    ) -> Projection {
        project_view(&self.view, &self.browse, index, favorites, hidden)
    }
}

fn project_view(
    view: &ViewState,
    browse: &ViewState,
    index: &CatalogIndex,
    favorites: &PreferenceSet,
    hidden: &PreferenceSet,
) -> Projection {
    match view {
        ViewState::Category(id) => match index.category(id) {
            None => Projection::of(Vec::new(), Placeholder::NoApplications),
            Some(category) => {
                let entries = category
                    .apps
                    .iter()
                    .filter(|app| !hidden.contains(&app.id))
                    .cloned()
                    .collect();
                Projection::of(entries, Placeholder::EmptyCategory)
            }
        },
        ViewState::Favorites => {
            if favorites.is_empty() {
                return Projection::of(Vec::new(), Placeholder::NoFavorites);
            }
            let entries = index
                .all_apps
                .iter()
                .filter(|app| favorites.contains(&app.id) && !hidden.contains(&app.id))
                .cloned()
                .collect();
            Projection::of(entries, Placeholder::FavoritesFiltered)
        }
        ViewState::Search(query) if query.is_empty() => {
            project_view(browse, browse, index, favorites, hidden)
        }
        ViewState::Search(query) => {
            let needle = normalize_for_match(query);
            let entries = index
                .all_apps
                .iter()
                .filter(|app| {
                    app.normalized_name().contains(&needle) && !hidden.contains(&app.id)
                })
                .cloned()
                .collect();
            Projection::of(entries, Placeholder::NoMatches)
        }
    }
}
