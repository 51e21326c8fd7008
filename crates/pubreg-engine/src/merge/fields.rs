//! Field-level merge primitives shared by all reconcilers.

use pubreg_core::{GeographicalDescription, PerformanceDuration};

/// Existing value if present, otherwise incoming.
pub fn pick<T: Clone>(existing: &Option<T>, incoming: &Option<T>) -> Option<T> {
    existing.as_ref().or(incoming.as_ref()).cloned()
}

/// Existing items in their order, followed by incoming items not already
/// present.
pub fn union<T: Clone + PartialEq>(existing: &[T], incoming: &[T]) -> Vec<T> {
    let mut merged = existing.to_vec();
    for item in incoming {
        if !merged.contains(item) {
            merged.push(item.clone());
        }
    }
    merged
}

/// A defined duration wins, existing first. Failing that an existing
/// `Undefined` marker is kept; only when existing has nothing at all does
/// incoming come through, whatever it holds.
pub fn duration(
    existing: Option<PerformanceDuration>,
    incoming: Option<PerformanceDuration>,
) -> Option<PerformanceDuration> {
    match (existing, incoming) {
        (Some(defined @ PerformanceDuration::Defined { .. }), _) => Some(defined),
        (_, Some(defined @ PerformanceDuration::Defined { .. })) => Some(defined),
        (Some(PerformanceDuration::Undefined), _) => Some(PerformanceDuration::Undefined),
        (None, incoming) => incoming,
    }
}

/// Existing coverage only counts when it actually describes something.
pub fn coverage(
    existing: &Option<GeographicalDescription>,
    incoming: &Option<GeographicalDescription>,
) -> Option<GeographicalDescription> {
    existing
        .as_ref()
        .filter(|coverage| coverage.has_description())
        .or(incoming.as_ref())
        .cloned()
}
