mod presence;

pub use presence::{DiscordPresence, DiscordState};
