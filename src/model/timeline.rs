//! Piecewise-linear functions over sorted anchors.
//!
//! Both the measure-to-beat and the beat-to-seconds conversions are such functions. Each anchor
//! has a position, the value at the position, and the rate which lasts until the next anchor.
//! Before the first anchor, the function runs from the origin `(0, origin)` with the first
//! anchor's rate.

/// An anchor of a piecewise-linear function.
pub trait Anchor {
    /// The position where the anchor starts.
    fn position(&self) -> f64;
    /// The resolved value at [`Anchor::position`].
    fn value(&self) -> f64;
    /// Advances `value` over `delta` of position with the rate of this anchor.
    fn advance(&self, value: f64, delta: f64) -> f64;
}

/// An anchor whose value is resolved from the previous ones.
pub(crate) trait ResolveAnchor: Anchor {
    fn set_value(&mut self, value: f64);
}

/// Resolves each anchor's value by advancing from the previous one, starting at the origin.
///
/// The first anchor is reached with its own rate, same as the extrapolation before it.
pub(crate) fn resolve_values<A: ResolveAnchor>(anchors: &mut [A], origin: f64) {
    let Some(first) = anchors.first_mut() else {
        return;
    };
    let value = first.advance(origin, first.position());
    first.set_value(value);
    for idx in 1..anchors.len() {
        let prev = &anchors[idx - 1];
        let value = prev.advance(prev.value(), anchors[idx].position() - prev.position());
        anchors[idx].set_value(value);
    }
}

/// Evaluates the function at `position`.
///
/// - Before the first anchor, extrapolates from the origin with the first anchor's rate.
/// - On an anchor, returns its value as is. If anchors share the position, the first one wins.
/// - Otherwise, continues from the last anchor before `position`.
///
/// `anchors` must be sorted by position. Returns `None` if there is no anchor.
#[allow(clippy::float_cmp)]
pub(crate) fn interpolate<A: Anchor>(anchors: &[A], origin: f64, position: f64) -> Option<f64> {
    let first = anchors.first()?;
    if position < first.position() {
        return Some(first.advance(origin, position));
    }
    let idx = anchors.partition_point(|anchor| anchor.position() < position);
    if let Some(exact) = anchors.get(idx).filter(|anchor| anchor.position() == position) {
        return Some(exact.value());
    }
    let base = &anchors[idx.saturating_sub(1)];
    Some(base.advance(base.value(), position - base.position()))
}
