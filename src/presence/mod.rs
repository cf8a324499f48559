mod manager;
mod traits;

pub use manager::PresenceManager;
pub use traits::{Button, PresenceProvider, PresenceState};
