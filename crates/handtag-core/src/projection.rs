//! Projection abstraction: state derived by folding over an event log.

/// A read model rebuilt from event history.
pub trait Projection: Default {
    /// The event type this projection consumes.
    type Event;

    /// Apply one event in log order.
    fn apply(&mut self, event: &Self::Event);

    /// Reverse the effect of an event that has been removed from the log.
    fn revert(&mut self, event: &Self::Event);

    /// Builds the projection from a full log.
    fn replay<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a Self::Event>,
        Self::Event: 'a,
    {
        let mut projection = Self::default();
        for event in events {
            projection.apply(event);
        }
        projection
    }
}
