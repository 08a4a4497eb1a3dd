use super::events_model::ChangeTopic;

/// Fan-out side channel for live UI refresh. Delivery is at-most-once and
/// best-effort; publishing never gates the success of the write.
pub trait ChangeNotifierTrait: Send + Sync {
    fn publish(&self, topic: ChangeTopic);
}
