//! Events module - change fan-out to connected clients.

mod broadcast_notifier;
mod events_model;
mod events_traits;

pub use broadcast_notifier::BroadcastNotifier;
pub use events_model::ChangeTopic;
pub use events_traits::ChangeNotifierTrait;
