//! Home-screen state: the fetched catalog plus search and category
//! filters.
//!
//! The reducer follows the usual shape: commands are validated and turn
//! into effects or state changes, events record what happened. The only
//! effect is the catalog fetch; its result comes back as a feedback
//! action, and a fresh fetch replaces the event list wholesale ("last
//! fetch wins").

use campus_connect_catalog::{Category, EventsApi, filter_events};
use campus_connect_core::reducer::{Effects, Reducer};
use campus_connect_core::{Effect, Event, smallvec};
use std::sync::Arc;

/// Environment dependencies for the home reducer.
#[derive(Clone)]
pub struct HomeEnvironment {
    /// The catalog the fetch effect goes through.
    pub api: Arc<dyn EventsApi>,
}

impl HomeEnvironment {
    /// Creates a new `HomeEnvironment`.
    #[must_use]
    pub fn new(api: Arc<dyn EventsApi>) -> Self {
        Self { api }
    }
}

/// State of the home screen.
#[derive(Clone, Debug, Default)]
pub struct HomeState {
    /// The last fetched catalog, in catalog order.
    pub events: Vec<Event>,
    /// Free-text search over name and venue.
    pub search: String,
    /// Selected category chip.
    pub category: Category,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// The last fetch failure, if the list on screen is stale.
    pub last_error: Option<String>,
}

impl HomeState {
    /// Creates an empty home state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The events that pass the current search and category filters,
    /// in catalog order.
    #[must_use]
    pub fn filtered_events(&self) -> Vec<&Event> {
        filter_events(&self.events, &self.search, self.category)
    }
}

/// Actions for the home screen: commands from the user, events from
/// effects.
#[derive(Clone, Debug)]
pub enum HomeAction {
    // ========== Commands ==========
    /// Command: load the catalog.
    FetchRequested,

    /// Command: the search box changed.
    SearchChanged {
        /// The new query.
        query: String,
    },

    /// Command: a category chip was tapped.
    CategorySelected {
        /// The chosen category.
        category: Category,
    },

    // ========== Events ==========
    /// Event: the catalog fetch finished.
    EventsLoaded {
        /// The fetched list, replacing the prior one wholesale.
        events: Vec<Event>,
    },

    /// Event: the catalog fetch failed.
    FetchFailed {
        /// Error description.
        error: String,
    },
}

impl HomeAction {
    /// Whether this action is a command (user intent).
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::FetchRequested | Self::SearchChanged { .. } | Self::CategorySelected { .. }
        )
    }

    /// Whether this action is an event (something that happened).
    #[must_use]
    pub const fn is_event(&self) -> bool {
        !self.is_command()
    }
}

/// Reducer for the home screen.
#[derive(Clone, Debug, Default)]
pub struct HomeReducer;

impl HomeReducer {
    /// Creates a new `HomeReducer`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for HomeReducer {
    type State = HomeState;
    type Action = HomeAction;
    type Environment = HomeEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            HomeAction::FetchRequested => {
                state.loading = true;
                let api = Arc::clone(&env.api);
                smallvec![Effect::future(async move {
                    match api.fetch().await {
                        Ok(events) => Some(HomeAction::EventsLoaded { events }),
                        Err(error) => Some(HomeAction::FetchFailed {
                            error: error.to_string(),
                        }),
                    }
                })]
            }

            HomeAction::SearchChanged { query } => {
                state.search = query;
                smallvec![]
            }

            HomeAction::CategorySelected { category } => {
                state.category = category;
                smallvec![]
            }

            HomeAction::EventsLoaded { events } => {
                state.loading = false;
                state.last_error = None;
                state.events = events;
                smallvec![]
            }

            HomeAction::FetchFailed { error } => {
                tracing::warn!(%error, "catalog fetch failed");
                state.loading = false;
                state.last_error = Some(error);
                smallvec![]
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use campus_connect_testing::{ReducerTest, StaticCatalog, assertions, sample_event};

    fn env_with(catalog: StaticCatalog) -> HomeEnvironment {
        HomeEnvironment::new(Arc::new(catalog))
    }

    #[test]
    fn fetch_requested_sets_loading_and_spawns_the_fetch() {
        ReducerTest::new(HomeReducer::new())
            .with_env(env_with(StaticCatalog::with_events(vec![])))
            .given_state(HomeState::new())
            .when_action(HomeAction::FetchRequested)
            .then_state(|state| assert!(state.loading))
            .then_effects(|effects| {
                assertions::assert_effects_count(effects, 1);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn events_loaded_replaces_the_list_wholesale() {
        ReducerTest::new(HomeReducer::new())
            .with_env(env_with(StaticCatalog::with_events(vec![])))
            .given_state(HomeState {
                events: vec![sample_event("old", "Old Event")],
                loading: true,
                last_error: Some("stale error".to_string()),
                ..HomeState::new()
            })
            .when_action(HomeAction::EventsLoaded {
                events: vec![sample_event("1", "A"), sample_event("2", "B")],
            })
            .then_state(|state| {
                assert!(!state.loading);
                assert_eq!(state.last_error, None);
                let names: Vec<_> = state.events.iter().map(|e| e.name.as_str()).collect();
                assert_eq!(names, ["A", "B"]);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn fetch_failed_keeps_the_stale_list() {
        ReducerTest::new(HomeReducer::new())
            .with_env(env_with(StaticCatalog::with_events(vec![])))
            .given_state(HomeState {
                events: vec![sample_event("1", "A")],
                loading: true,
                ..HomeState::new()
            })
            .when_action(HomeAction::FetchFailed {
                error: "offline".to_string(),
            })
            .then_state(|state| {
                assert!(!state.loading);
                assert_eq!(state.last_error.as_deref(), Some("offline"));
                assert_eq!(state.events.len(), 1);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn search_and_category_drive_the_projection() {
        let mut state = HomeState {
            events: vec![
                sample_event("1", "Hack Night").with_category("Tech"),
                sample_event("2", "Campus Run").with_category("Sports"),
            ],
            ..HomeState::new()
        };

        let env = env_with(StaticCatalog::with_events(vec![]));
        HomeReducer::new().reduce(
            &mut state,
            HomeAction::SearchChanged {
                query: "hack".to_string(),
            },
            &env,
        );
        assert_eq!(state.filtered_events().len(), 1);

        HomeReducer::new().reduce(
            &mut state,
            HomeAction::CategorySelected {
                category: Category::Sports,
            },
            &env,
        );
        // "hack" + Sports matches nothing.
        assert!(state.filtered_events().is_empty());
    }

    #[test]
    fn commands_and_events_are_distinguished() {
        assert!(HomeAction::FetchRequested.is_command());
        assert!(
            HomeAction::EventsLoaded { events: vec![] }.is_event()
        );
        assert!(
            !HomeAction::FetchFailed {
                error: String::new()
            }
            .is_command()
        );
    }
}
