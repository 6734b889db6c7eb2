use std::sync::Arc;

use crate::adapters::{HttpWordSource, InMemoryLedger, RankedLedger, WordSource};
use crate::ai::{GeminiClient, GuessAdvisor};
use crate::config::ServerConfig;
use crate::services::game_flow::{GameDefaults, GameFlowService};
use crate::services::sessions::SessionRegistry;
use crate::ws::hub::ConnectionRegistry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    game_flow: Arc<GameFlowService>,
}

impl AppState {
    pub fn new(game_flow: Arc<GameFlowService>) -> Self {
        Self { game_flow }
    }

    /// Wire the production collaborators described by `config`.
    pub fn from_config(config: &ServerConfig) -> Self {
        let advisor = match &config.gemini_api_key {
            Some(key) => GuessAdvisor::new(
                Arc::new(GeminiClient::new(key.clone(), config.gemini_model.clone())),
                config.advisor_timeout,
            ),
            None => GuessAdvisor::frequency_only(),
        };

        Self::assemble(
            advisor,
            Arc::new(InMemoryLedger::new()),
            Arc::new(HttpWordSource::new(config.word_api_url.clone())),
            config.defaults,
        )
    }

    /// Build a state around the given collaborators with fresh registries.
    pub fn assemble(
        advisor: GuessAdvisor,
        ledger: Arc<dyn RankedLedger>,
        words: Arc<dyn WordSource>,
        defaults: GameDefaults,
    ) -> Self {
        let flow = GameFlowService::new(
            Arc::new(SessionRegistry::new()),
            Arc::new(ConnectionRegistry::new()),
            advisor,
            ledger,
            words,
            defaults,
        );
        Self::new(Arc::new(flow))
    }

    pub fn game_flow(&self) -> Arc<GameFlowService> {
        self.game_flow.clone()
    }

    pub fn connections(&self) -> Arc<ConnectionRegistry> {
        self.game_flow.connections().clone()
    }

    pub fn sessions(&self) -> Arc<SessionRegistry> {
        self.game_flow.sessions().clone()
    }
}
