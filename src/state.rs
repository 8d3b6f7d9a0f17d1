// src/state.rs

use axum::extract::FromRef;

use crate::{config::Config, services::trivia::TriviaClient, storage::SharedStore};

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Config,
    pub trivia: TriviaClient,
}

impl FromRef<AppState> for SharedStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for TriviaClient {
    fn from_ref(state: &AppState) -> Self {
        state.trivia.clone()
    }
}
