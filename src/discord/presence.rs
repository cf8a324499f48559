//! Discord Rich Presence transport using discord-sdk

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use discord_sdk::{
    activity::{ActivityBuilder, Assets, Button},
    wheel::{UserState, Wheel},
    Discord, Subscriptions,
};
use tokio::sync::mpsc;

use crate::presence::{PresenceProvider, PresenceState};

/// Timeout for waiting for Discord handshake
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(10);

/// `None` clears the activity
type Update = Option<PresenceState>;

/// Manages the Discord connection and background task
pub struct DiscordState {
    update_tx: mpsc::UnboundedSender<Update>,
}

impl DiscordState {
    /// Spawn the background task that owns the Discord connection.
    ///
    /// Must be called from within a tokio runtime.
    pub fn init(app_id: i64) -> Self {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        tokio::spawn(Self::run_discord_task(app_id, update_rx));

        Self { update_tx }
    }

    /// Background task that maintains the Discord connection and processes presence updates
    async fn run_discord_task(app_id: i64, mut update_rx: mpsc::UnboundedReceiver<Update>) {
        let (wheel, handler) = Wheel::new(Box::new(|err| {
            tracing::warn!("Discord error: {:?}", err);
        }));

        let mut user_spoke = wheel.user();

        let discord = match Discord::new(app_id, Subscriptions::ACTIVITY, Box::new(handler)) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("Discord not available: {:?}", e);
                return;
            }
        };

        tracing::info!("Discord connecting...");

        let user = match tokio::time::timeout(HANDSHAKE_TIMEOUT, async {
            if user_spoke.0.changed().await.is_err() {
                Err("Discord connection closed".to_string())
            } else {
                match &*user_spoke.0.borrow() {
                    UserState::Connected(user) => Ok(user.clone()),
                    UserState::Disconnected(err) => Err(format!("Discord disconnected: {:?}", err)),
                }
            }
        })
        .await
        {
            Ok(Ok(user)) => user,
            Ok(Err(e)) => {
                tracing::warn!("{}", e);
                return;
            }
            Err(_) => {
                tracing::warn!("Discord handshake timed out");
                return;
            }
        };

        tracing::info!("Discord Rich Presence connected as {}", user.username);

        while let Some(update) = update_rx.recv().await {
            let result = match update {
                Some(presence) => discord.update_activity(activity_for(&presence)).await.map(|_| ()),
                None => discord.clear_activity().await.map(|_| ()),
            };

            if let Err(e) = result {
                tracing::debug!("Failed to update Discord activity: {:?}", e);
            }
        }

        discord.disconnect().await;
        tracing::info!("Discord Rich Presence disconnected");
    }

    /// Send a presence update to the background task
    pub fn send_update(&self, update: Update) {
        if self.update_tx.send(update).is_err() {
            tracing::debug!("Discord task is gone, dropping presence update");
        }
    }
}

fn activity_for(presence: &PresenceState) -> ActivityBuilder {
    let mut activity = ActivityBuilder::new().assets(
        Assets::default()
            .large(
                presence.large_image_key.clone(),
                Some(presence.large_image_text.clone()),
            )
            .small(
                presence.small_image_key.clone(),
                Some(presence.small_image_text.clone()),
            ),
    );

    if let Some(details) = &presence.details {
        activity = activity.details(details.clone());
    }
    if let Some(state) = &presence.state {
        activity = activity.state(state.clone());
    }
    if let Some(started) = presence.start_timestamp {
        activity = activity.start_timestamp(SystemTime::from(started));
    }
    for button in &presence.buttons {
        activity = activity.button(Button {
            label: button.label.clone(),
            url: button.url.clone(),
        });
    }

    activity
}

/// Discord presence provider implementing the generic PresenceProvider trait
pub struct DiscordPresence {
    state: Arc<DiscordState>,
}

impl DiscordPresence {
    pub fn new(state: Arc<DiscordState>) -> Self {
        Self { state }
    }
}

impl PresenceProvider for DiscordPresence {
    fn name(&self) -> &'static str {
        "Discord"
    }

    fn update_presence(&self, state: &PresenceState) {
        self.state.send_update(Some(state.clone()));
    }

    fn clear_presence(&self) {
        self.state.send_update(None);
    }
}
