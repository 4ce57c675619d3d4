use super::history::History;
use super::route::{Route, View};
use super::slug::{find_artist, resolve_artist, slugify};

/// Keeps the selected artist and the location in step.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    history: History,
    selected: Option<String>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self {
            history: History::new(initial),
            selected: None,
        }
    }

    pub fn route(&self) -> &Route {
        self.history.current()
    }

    pub fn view(&self) -> View {
        self.route().view
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selected_artist(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_slug(&self) -> Option<String> {
        self.selected.as_deref().map(slugify)
    }

    /// Artist the current view displays: the route's slug, falling back to
    /// the first artist.
    pub fn displayed_artist<'a>(&self, artists: &'a [String]) -> Option<&'a str> {
        resolve_artist(self.route().slug.as_deref(), artists)
    }

    /// Pick the initial artist once the artist list is known.
    ///
    /// A valid slug in the location wins. Otherwise the first artist becomes
    /// the default and, on views that carry an artist, the location is
    /// rewritten in place.
    pub fn initialize(&mut self, artists: &[String]) {
        let from_url = self
            .route()
            .slug
            .as_deref()
            .and_then(|s| find_artist(s, artists));
        if let Some(name) = from_url {
            self.selected = Some(name.to_string());
            return;
        }

        let Some(default) = artists.first() else {
            return;
        };
        self.selected = Some(default.clone());
        if self.view().shows_artist_selector() {
            let route = self.route().with_slug(&slugify(default));
            tracing::debug!(%route, "defaulting artist, replacing location");
            self.history.replace(route);
        }
    }

    /// Manual selection (artist picker). Returns true when a new history
    /// entry was pushed.
    pub fn select(&mut self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        self.selected = Some(name.to_string());
        if !self.view().shows_artist_selector() {
            return false;
        }
        let slug = slugify(name);
        if self.route().slug.as_deref() == Some(slug.as_str()) {
            return false;
        }
        let route = self.route().with_slug(&slug);
        tracing::debug!(%route, "artist selected, pushing location");
        self.history.push(route);
        true
    }

    /// Go to an explicit location.
    pub fn navigate(&mut self, route: Route, artists: &[String]) {
        self.history.push(route);
        self.follow_route(artists);
    }

    /// Switch tab, carrying the selected artist's slug where relevant.
    pub fn open_view(&mut self, view: View, artists: &[String]) {
        let slug = self.selected_slug();
        self.navigate(Route::for_view(view, slug.as_deref()), artists);
    }

    pub fn back(&mut self, artists: &[String]) -> bool {
        let moved = self.history.back();
        if moved {
            self.follow_route(artists);
        }
        moved
    }

    pub fn forward(&mut self, artists: &[String]) -> bool {
        let moved = self.history.forward();
        if moved {
            self.follow_route(artists);
        }
        moved
    }

    fn follow_route(&mut self, artists: &[String]) {
        let found = self
            .route()
            .slug
            .as_deref()
            .and_then(|s| find_artist(s, artists));
        if let Some(name) = found {
            self.selected = Some(name.to_string());
        }
    }
}
