use std::time::Duration;

use async_trait::async_trait;
use model::{
    location::Location,
    route::{RouteEndpoint, RouteResult, RouteStep, StepKind},
};

use crate::{
    api::{ApiResult, DirectoryApi},
    directory::DirectoryCache,
    search::{SearchableSelect, SelectOption},
    FormError,
};

/// Where routes come from.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn route(&self, from: &str, to: &str) -> ApiResult<RouteResult>;
}

pub const DEFAULT_ROUTE_LATENCY: Duration = Duration::from_secs(1);

/// Answers every request with the fixed A-101 to C-305 walk after a
/// simulated delay. There is no campus graph behind it yet.
#[derive(Debug, Clone)]
pub struct StaticRouteProvider {
    latency: Duration,
}

impl StaticRouteProvider {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl Default for StaticRouteProvider {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTE_LATENCY)
    }
}

#[async_trait]
impl RouteProvider for StaticRouteProvider {
    async fn route(&self, from: &str, to: &str) -> ApiResult<RouteResult> {
        log::debug!("Looking up route {} -> {}", from, to);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(campus_route())
    }
}

fn step(order: u32, kind: StepKind, floor: Option<i32>, text: &str) -> RouteStep {
    RouteStep {
        order,
        text: text.to_owned(),
        kind: Some(kind),
        floor,
    }
}

pub fn campus_route() -> RouteResult {
    RouteResult {
        from: RouteEndpoint {
            id: 201,
            name: "A-101".to_owned(),
            floor: 1,
        },
        to: RouteEndpoint {
            id: 331,
            name: "C-305".to_owned(),
            floor: 3,
        },
        distance_m: 213,
        estimated_time_min: 4,
        steps: vec![
            step(
                1,
                StepKind::Walk,
                None,
                "Exit A-101 and walk 18m along the corridor toward the staircase",
            ),
            step(
                2,
                StepKind::Turn,
                None,
                "Turn slightly right and continue to the staircase entrance",
            ),
            step(3, StepKind::Stairs, Some(3), "Take the stairs from floor 1 to floor 3"),
            step(
                4,
                StepKind::Walk,
                Some(3),
                "On floor 3, turn right and walk 40m along the main corridor",
            ),
            step(
                5,
                StepKind::Walk,
                Some(3),
                "C-305 will be on your left. You have arrived at your destination.",
            ),
        ],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RoutePhase {
    Idle,
    Loading,
    Resolved(RouteResult),
}

/// The selected pair, reported to the owner after every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteEndpoints {
    pub from: Option<String>,
    pub to: Option<String>,
}

pub struct RouteFinder<P: RouteProvider> {
    provider: P,
    locations: DirectoryCache<Location>,
    from: SearchableSelect,
    to: SearchableSelect,
    phase: RoutePhase,
    error: Option<String>,
}

impl<P: RouteProvider> RouteFinder<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            locations: DirectoryCache::default(),
            from: SearchableSelect::default(),
            to: SearchableSelect::default(),
            phase: RoutePhase::Idle,
            error: None,
        }
    }

    /// Starts with endpoints chosen elsewhere, e.g. a deep link or the
    /// faculty finder.
    pub fn with_endpoints(mut self, endpoints: RouteEndpoints) -> Self {
        self.from.set_selected(endpoints.from);
        self.to.set_selected(endpoints.to);
        self
    }

    pub async fn load_locations<A: DirectoryApi + ?Sized>(&mut self, api: &A) {
        if self
            .locations
            .load(api.locations(), "Failed to load locations")
            .await
        {
            let options = self
                .locations
                .entries()
                .iter()
                .map(SelectOption::from)
                .collect::<Vec<_>>();
            self.from.set_options(options.clone());
            self.to.set_options(options);
        }
    }

    pub fn locations(&self) -> &DirectoryCache<Location> {
        &self.locations
    }

    pub fn from_select(&mut self) -> &mut SearchableSelect {
        &mut self.from
    }

    pub fn to_select(&mut self) -> &mut SearchableSelect {
        &mut self.to
    }

    pub fn endpoints(&self) -> RouteEndpoints {
        RouteEndpoints {
            from: self.from.selected_id().map(str::to_owned),
            to: self.to.selected_id().map(str::to_owned),
        }
    }

    pub fn set_from<S: Into<String>>(&mut self, id: S) -> RouteEndpoints {
        self.from.select(id);
        self.endpoints()
    }

    pub fn set_to<S: Into<String>>(&mut self, id: S) -> RouteEndpoints {
        self.to.select(id);
        self.endpoints()
    }

    /// Exchanges from and to. A shown route no longer matches and is dropped.
    pub fn swap(&mut self) -> RouteEndpoints {
        let RouteEndpoints { from, to } = self.endpoints();
        self.from.set_selected(to);
        self.to.set_selected(from);
        self.phase = RoutePhase::Idle;
        self.endpoints()
    }

    pub fn phase(&self) -> &RoutePhase {
        &self.phase
    }

    pub fn route(&self) -> Option<&RouteResult> {
        match &self.phase {
            RoutePhase::Resolved(route) => Some(route),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Moves to `Loading` and returns the pair to look up. Returns `Ok(None)`
    /// without changing anything while an endpoint is missing.
    pub fn begin_request(&mut self) -> Result<Option<(String, String)>, FormError> {
        let RouteEndpoints { from, to } = self.endpoints();
        let (Some(from), Some(to)) = (from, to) else {
            return Ok(None);
        };
        if from == to {
            return Err(FormError::SameEndpoints);
        }
        self.phase = RoutePhase::Loading;
        self.error = None;
        Ok(Some((from, to)))
    }

    pub fn finish(&mut self, result: ApiResult<RouteResult>) {
        match result {
            Ok(route) => self.phase = RoutePhase::Resolved(route),
            Err(why) => {
                log::warn!("Route lookup failed: {}", why);
                self.error = Some(why.message_or("Failed to find a route"));
                self.phase = RoutePhase::Idle;
            }
        }
    }

    pub async fn request_route(&mut self) -> Result<(), FormError> {
        if let Some((from, to)) = self.begin_request()? {
            let result = self.provider.route(&from, &to).await;
            self.finish(result);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::api::{fake::FakeApi, ApiError};

    fn finder() -> RouteFinder<StaticRouteProvider> {
        RouteFinder::new(StaticRouteProvider::instant())
    }

    #[tokio::test]
    async fn resolves_the_campus_route() {
        let mut finder = finder();
        finder.set_from("A-101");
        finder.set_to("C-305");
        finder.request_route().await.unwrap();

        let route = finder.route().unwrap();
        assert_eq!(route.distance_m, 213);
        assert_eq!(route.estimated_time_min, 4);
        let steps = route.ordered_steps();
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[2].kind_or_walk(), StepKind::Stairs);
        assert_eq!(steps[2].floor, Some(3));
        assert_eq!(steps[2].icon(), "stairs");
    }

    #[tokio::test]
    async fn identical_endpoints_never_leave_idle() {
        let mut finder = finder();
        finder.set_from("B-204");
        finder.set_to("B-204");
        assert_eq!(finder.request_route().await, Err(FormError::SameEndpoints));
        assert_eq!(finder.phase(), &RoutePhase::Idle);
    }

    #[tokio::test]
    async fn missing_endpoint_is_ignored() {
        let mut finder = finder();
        finder.set_to("C-305");
        assert_eq!(finder.begin_request(), Ok(None));
        assert_eq!(finder.request_route().await, Ok(()));
        assert_eq!(finder.phase(), &RoutePhase::Idle);
    }

    #[test]
    fn failed_lookup_returns_to_idle() {
        let mut finder = finder();
        finder.set_from("A-101");
        finder.set_to("C-305");
        assert!(finder.begin_request().unwrap().is_some());
        assert_eq!(finder.phase(), &RoutePhase::Loading);

        finder.finish(Err(ApiError::Other("offline".to_owned())));
        assert_eq!(finder.phase(), &RoutePhase::Idle);
        assert_eq!(finder.error(), Some("Failed to find a route"));
    }

    #[tokio::test]
    async fn swap_exchanges_and_clears_result() {
        let mut finder = finder().with_endpoints(RouteEndpoints {
            from: Some("A-101".to_owned()),
            to: Some("C-305".to_owned()),
        });
        finder.request_route().await.unwrap();
        assert!(finder.route().is_some());

        let endpoints = finder.swap();
        assert_eq!(
            endpoints,
            RouteEndpoints {
                from: Some("C-305".to_owned()),
                to: Some("A-101".to_owned()),
            }
        );
        assert_eq!(finder.route(), None);
    }

    #[tokio::test]
    async fn endpoints_are_picked_from_loaded_locations() {
        let api = FakeApi::seeded();
        let mut finder = finder();
        finder.load_locations(&api).await;
        assert_eq!(finder.locations().entries().len(), 6);

        let select = finder.from_select();
        select.set_query("auditorium");
        let id = select.filtered()[0].id.clone();
        assert_eq!(
            finder.set_from(id).from.as_deref(),
            Some("Main Auditorium")
        );
    }
}
