//! The portal's standard screen set.

use crate::api::PortalApiClient;
use crate::loading::LoadingAggregator;
use crate::models::{AboutTopic, Dashboard, DashboardRole, Event, Institution, NewsItem, Program};
use crate::refresh::RefreshTrigger;
use crate::selection::PortalSelections;
use crate::traits::HttpClient;

use super::{MountedScreen, Screen};

/// One screen per portal resource, all reporting to the same aggregator.
#[derive(Debug, Clone)]
pub struct PortalScreens {
    pub about: Screen<Vec<AboutTopic>>,
    pub programs: Screen<Vec<Program>>,
    pub events: Screen<Vec<Event>>,
    pub news: Screen<Vec<NewsItem>>,
    pub institutions: Screen<Vec<Institution>>,
    pub dashboard: Screen<Dashboard>,
    /// Items picked on the list screens for their detail views.
    pub selections: PortalSelections,
}

impl PortalScreens {
    /// Build the screens for a user whose dashboard is `role`.
    pub fn new<C>(
        client: &PortalApiClient<C>,
        aggregator: &LoadingAggregator,
        role: DashboardRole,
    ) -> Self
    where
        C: HttpClient + 'static,
    {
        let about = {
            let client = client.clone();
            Screen::new("about", aggregator, move || {
                let client = client.clone();
                async move { client.fetch_about_topics().await }
            })
        };
        let programs = {
            let client = client.clone();
            Screen::new("programs", aggregator, move || {
                let client = client.clone();
                async move { client.fetch_programs().await }
            })
        };
        let events = {
            let client = client.clone();
            Screen::new("events", aggregator, move || {
                let client = client.clone();
                async move { client.fetch_events().await }
            })
        };
        let news = {
            let client = client.clone();
            Screen::new("news", aggregator, move || {
                let client = client.clone();
                async move { client.fetch_news().await }
            })
        };
        let institutions = {
            let client = client.clone();
            Screen::new("institutions", aggregator, move || {
                let client = client.clone();
                async move { client.fetch_institutions().await }
            })
        };
        let dashboard = {
            let client = client.clone();
            Screen::new(format!("{}_dashboard", role.as_str()), aggregator, move || {
                let client = client.clone();
                async move { client.fetch_dashboard(role).await }
            })
        };

        Self {
            about,
            programs,
            events,
            news,
            institutions,
            dashboard,
            selections: PortalSelections::new(),
        }
    }

    /// Mount every screen against `refresh`.
    pub fn mount(&self, refresh: &RefreshTrigger) -> MountedPortal {
        MountedPortal {
            about: self.about.mount(refresh),
            programs: self.programs.mount(refresh),
            events: self.events.mount(refresh),
            news: self.news.mount(refresh),
            institutions: self.institutions.mount(refresh),
            dashboard: self.dashboard.mount(refresh),
            selections: self.selections.clone(),
        }
    }
}

/// Every portal screen, mounted.
///
/// Dropping it reports every screen idle immediately; the aborted tasks
/// are reaped by the runtime afterwards. [`MountedPortal::unmount`] also
/// waits for them.
#[derive(Debug)]
pub struct MountedPortal {
    pub about: MountedScreen<Vec<AboutTopic>>,
    pub programs: MountedScreen<Vec<Program>>,
    pub events: MountedScreen<Vec<Event>>,
    pub news: MountedScreen<Vec<NewsItem>>,
    pub institutions: MountedScreen<Vec<Institution>>,
    pub dashboard: MountedScreen<Dashboard>,
    pub selections: PortalSelections,
}

impl MountedPortal {
    /// Select the loaded about topic `id` for its detail view.
    ///
    /// Returns the selected topic, or `None` (leaving the previous
    /// selection in place) when the list holds no such topic.
    pub fn select_about_topic(&self, id: &str) -> Option<AboutTopic> {
        let topic = self
            .about
            .state()
            .data?
            .into_iter()
            .find(|topic| topic.id == id)?;
        self.selections.about_topic.select(topic.clone());
        Some(topic)
    }

    /// Select the loaded institution `id` for its detail view.
    pub fn select_institution(&self, id: &str) -> Option<Institution> {
        let institution = self
            .institutions
            .state()
            .data?
            .into_iter()
            .find(|institution| institution.id == id)?;
        self.selections.institution.select(institution.clone());
        Some(institution)
    }

    /// `(screen name, error message)` for every screen showing a retry banner.
    pub fn errors(&self) -> Vec<(String, String)> {
        let mut errors = Vec::new();
        let mut push = |name: &str, error: Option<String>| {
            if let Some(error) = error {
                errors.push((name.to_string(), error));
            }
        };
        push(self.about.screen().name(), self.about.state().error);
        push(self.programs.screen().name(), self.programs.state().error);
        push(self.events.screen().name(), self.events.state().error);
        push(self.news.screen().name(), self.news.state().error);
        push(self.institutions.screen().name(), self.institutions.state().error);
        push(self.dashboard.screen().name(), self.dashboard.state().error);
        errors
    }

    pub async fn unmount(self) {
        self.about.unmount().await;
        self.programs.unmount().await;
        self.events.unmount().await;
        self.news.unmount().await;
        self.institutions.unmount().await;
        self.dashboard.unmount().await;
    }
}
