//! Owns composition state and fans presence out to providers

use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;

use super::traits::{PresenceProvider, PresenceState};
use crate::composer::PresenceComposer;
use crate::config::PresenceConfig;
use crate::context::ActivityInput;
use crate::diagnostics::{Diagnostic, DiagnosticsCounter};

/// Keeps the last published presence and pushes new ones to every provider
pub struct PresenceManager {
    composer: PresenceComposer,
    config: RwLock<Arc<PresenceConfig>>,
    diagnostics: Arc<DiagnosticsCounter>,
    providers: Vec<Box<dyn PresenceProvider>>,
    last_presence: Mutex<Option<PresenceState>>,
}

impl PresenceManager {
    pub fn new(config: PresenceConfig, diagnostics: Arc<DiagnosticsCounter>) -> Self {
        Self::with_composer(PresenceComposer::default(), config, diagnostics)
    }

    pub fn with_composer(
        composer: PresenceComposer,
        config: PresenceConfig,
        diagnostics: Arc<DiagnosticsCounter>,
    ) -> Self {
        Self {
            composer,
            config: RwLock::new(Arc::new(config)),
            diagnostics,
            providers: Vec::new(),
            last_presence: Mutex::new(None),
        }
    }

    /// Add a presence provider
    pub fn add_provider(&mut self, provider: Box<dyn PresenceProvider>) {
        tracing::info!("Adding presence provider: {}", provider.name());
        self.providers.push(provider);
    }

    pub fn config(&self) -> Arc<PresenceConfig> {
        let config = self.config.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&config)
    }

    /// Swap in a reloaded configuration; takes effect on the next refresh
    pub fn set_config(&self, config: PresenceConfig) {
        tracing::debug!("Presence config replaced");
        let mut current = self.config.write().unwrap_or_else(|e| e.into_inner());
        *current = Arc::new(config);
    }

    pub fn diagnostics(&self) -> &Arc<DiagnosticsCounter> {
        &self.diagnostics
    }

    /// Handler for the host's "diagnostics changed" notification
    pub fn on_diagnostics_changed<I, K, D>(&self, all: I) -> usize
    where
        I: IntoIterator<Item = (K, D)>,
        D: AsRef<[Diagnostic]>,
    {
        self.diagnostics.recount(all)
    }

    /// Rebuild the presence and publish it if it changed
    pub fn refresh(&self, input: &ActivityInput) -> PresenceState {
        let config = self.config();
        let mut last = self.last_presence.lock().unwrap_or_else(|e| e.into_inner());

        let presence = self.composer.compose(
            &config,
            input,
            self.diagnostics.get(),
            last.as_ref(),
            Utc::now(),
        );

        if last.as_ref() == Some(&presence) {
            tracing::trace!("Presence unchanged, skipping update");
            return presence;
        }

        self.update_all_presence(&presence);
        *last = Some(presence.clone());
        presence
    }

    /// The last presence pushed to providers
    pub fn last_presence(&self) -> Option<PresenceState> {
        self.last_presence
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Update presence on all providers
    pub fn update_all_presence(&self, state: &PresenceState) {
        tracing::debug!("Updating presence: {:?}", state);
        for provider in &self.providers {
            provider.update_presence(state);
        }
    }

    /// Clear presence on all providers. Elapsed time restarts afterwards.
    pub fn clear_all_presence(&self) {
        for provider in &self.providers {
            provider.clear_presence();
        }
        *self.last_presence.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}
