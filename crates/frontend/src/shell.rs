use model::{
    faculty::Faculty,
    flash_news::FlashNews,
    location::Location,
};
use reqwest::Url;
use utility::{id::Id, text::non_blank};

use crate::{
    api::DirectoryApi,
    availability::FacultyDashboard,
    directory::DirectoryCache,
    finder::FacultyFinder,
    route::{RouteEndpoints, RouteFinder, RouteProvider},
};

const INVALID_USERNAME: &str = "Invalid faculty username. Please check your assigned username.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Route,
    Faculty,
    Admin,
}

/// Reads the starting location from a deep link such as
/// `https://campus.example/?from=A-101`, as printed on room QR codes.
pub fn deep_link_from(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    let (_, from) = url.query_pairs().find(|(key, _)| key == "from")?;
    non_blank(&from).map(str::to_owned)
}

/// The top level of the client: which view is shown, the views themselves
/// and the faculty member logged in, if any.
pub struct AppShell<P: RouteProvider> {
    view: View,
    route_finder: RouteFinder<P>,
    faculty_finder: FacultyFinder,
    ticker: DirectoryCache<FlashNews>,
    session: Option<FacultyDashboard>,
    login_error: Option<String>,
}

impl<P: RouteProvider> AppShell<P> {
    pub fn new(provider: P) -> Self {
        Self {
            view: View::default(),
            route_finder: RouteFinder::new(provider),
            faculty_finder: FacultyFinder::default(),
            ticker: DirectoryCache::default(),
            session: None,
            login_error: None,
        }
    }

    /// Opens the shell the way the page at `url` was opened.
    pub fn from_url(url: &str, provider: P) -> Self {
        let mut shell = Self::new(provider);
        if let Some(from) = deep_link_from(url) {
            log::info!("Starting route from deep link location '{}'", from);
            shell.route_finder = shell.route_finder.with_endpoints(RouteEndpoints {
                from: Some(from),
                to: None,
            });
        }
        shell
    }

    /// Fetches what the first screen shows.
    pub async fn start<A: DirectoryApi + ?Sized>(&mut self, api: &A) {
        futures::join!(
            self.route_finder.load_locations(api),
            self.ticker.load(api.flash_news(), "Failed to load flash news"),
        );
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub async fn show<A: DirectoryApi + ?Sized>(&mut self, view: View, api: &A) {
        if view == View::Faculty && self.view != View::Faculty {
            self.faculty_finder.load(api).await;
        }
        self.view = view;
    }

    /// The admin button switches between admin and route finder.
    pub fn toggle_admin(&mut self) {
        self.view = match self.view {
            View::Admin => View::Route,
            _ => View::Admin,
        };
    }

    pub fn route_finder(&mut self) -> &mut RouteFinder<P> {
        &mut self.route_finder
    }

    pub fn faculty_finder(&mut self) -> &mut FacultyFinder {
        &mut self.faculty_finder
    }

    /// Shows the route finder with a faculty member's cabin as destination.
    pub fn route_to_faculty(&mut self, location_id: &Id<Location>) -> RouteEndpoints {
        self.view = View::Route;
        self.route_finder.set_to(location_id.raw())
    }

    /// One line for the news ticker, `None` when there is no news.
    pub fn ticker_text(&self) -> Option<String> {
        let news = self.ticker.entries();
        if news.is_empty() {
            return None;
        }
        Some(
            news.iter()
                .map(|item| item.content.message.as_str())
                .collect::<Vec<_>>()
                .join(" • "),
        )
    }

    pub async fn login<A: DirectoryApi + ?Sized>(&mut self, api: &A, username: &str) -> bool {
        self.login_error = None;
        match api.login(username).await {
            Ok(response) => match response.faculty_id.filter(|_| response.success) {
                Some(faculty_id) => {
                    log::info!("Faculty member {} logged in", faculty_id);
                    let mut dashboard = FacultyDashboard::new(faculty_id);
                    dashboard.load(api).await;
                    self.session = Some(dashboard);
                    true
                }
                None => {
                    self.login_error = Some(INVALID_USERNAME.to_owned());
                    false
                }
            },
            Err(why) => {
                log::warn!("Faculty login failed: {}", why);
                self.login_error = Some(why.message_or("Login failed. Please try again."));
                false
            }
        }
    }

    pub fn logout(&mut self) {
        self.session = None;
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    pub fn session(&mut self) -> Option<&mut FacultyDashboard> {
        self.session.as_mut()
    }

    pub fn logged_in_as(&self) -> Option<&Id<Faculty>> {
        self.session.as_ref().map(FacultyDashboard::faculty_id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{api::fake::FakeApi, route::StaticRouteProvider};

    fn shell(url: &str) -> AppShell<StaticRouteProvider> {
        AppShell::from_url(url, StaticRouteProvider::instant())
    }

    #[test]
    fn deep_link_sets_start() {
        assert_eq!(
            deep_link_from("http://localhost:5173/?from=Main%20Auditorium"),
            Some("Main Auditorium".to_owned())
        );
        assert_eq!(deep_link_from("http://localhost:5173/?from="), None);
        assert_eq!(deep_link_from("http://localhost:5173/"), None);

        let mut shell = shell("http://localhost:5173/?from=A-101&lang=en");
        assert_eq!(shell.route_finder().endpoints().from.as_deref(), Some("A-101"));
        assert_eq!(shell.view(), View::Route);
    }

    #[test]
    fn admin_button_toggles_back_to_route() {
        let mut shell = shell("http://localhost:5173/");
        shell.toggle_admin();
        assert_eq!(shell.view(), View::Admin);
        shell.toggle_admin();
        assert_eq!(shell.view(), View::Route);
    }

    #[tokio::test]
    async fn faculty_card_hands_cabin_to_route_finder() {
        let api = FakeApi::seeded();
        let mut shell = shell("http://localhost:5173/?from=A-101");
        shell.show(View::Faculty, &api).await;
        assert_eq!(shell.view(), View::Faculty);

        shell.faculty_finder().select_faculty("1");
        let cabin = shell
            .faculty_finder()
            .selected()
            .and_then(FacultyFinder::route_target)
            .unwrap();
        let endpoints = shell.route_to_faculty(&cabin);

        assert_eq!(shell.view(), View::Route);
        assert_eq!(
            endpoints,
            RouteEndpoints {
                from: Some("A-101".to_owned()),
                to: Some("C-305".to_owned()),
            }
        );
        shell.route_finder().request_route().await.unwrap();
        assert!(shell.route_finder().route().is_some());
    }

    #[tokio::test]
    async fn login_opens_dashboard() {
        let api = FakeApi::seeded();
        let mut shell = shell("http://localhost:5173/");

        assert!(!shell.login(&api, "nobody").await);
        assert_eq!(shell.login_error(), Some(INVALID_USERNAME));
        assert_eq!(shell.logged_in_as(), None);

        assert!(shell.login(&api, "  JDOE").await);
        assert_eq!(shell.login_error(), None);
        assert_eq!(shell.logged_in_as(), Some(&Id::new(1)));
        let dashboard = shell.session().unwrap();
        assert_eq!(dashboard.faculty().unwrap().content.name, "Prof. John Doe");

        shell.logout();
        assert!(shell.session().is_none());
    }

    #[tokio::test]
    async fn ticker_joins_news_newest_first() {
        let api = FakeApi::seeded();
        let mut shell = shell("http://localhost:5173/");
        assert_eq!(shell.ticker_text(), None);

        shell.start(&api).await;
        let text = shell.ticker_text().unwrap();
        assert!(text.starts_with("Guest lecture on \"The Future of AI\""));
        assert_eq!(text.matches(" • ").count(), 2);
        assert_eq!(shell.route_finder().locations().entries().len(), 6);
    }
}
