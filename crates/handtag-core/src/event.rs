//! Tagged event abstractions.

use uuid::Uuid;

/// Trait that every event appended to a match log implements.
pub trait TaggedEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event kind name (used for storage routing).
    fn event_type(&self) -> &'static str;

    /// Serializes the event to its JSON wire form.
    fn to_payload(&self) -> serde_json::Value;

    /// Returns the unique event identifier.
    fn event_id(&self) -> Uuid;

    /// Returns the match this event belongs to.
    fn match_id(&self) -> Uuid;
}
