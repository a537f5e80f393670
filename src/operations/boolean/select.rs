/// The type of boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Intersect,
    Difference,
}

/// Which operand a boundary edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeSource {
    A,
    B,
}

/// Where a split boundary edge lies relative to the other operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeClass {
    Inside,
    Outside,
    /// Coincides with an edge of the other operand running the same way.
    SharedSame,
    /// Coincides with an edge of the other operand running the opposite way.
    SharedOpposite,
}

/// Decision about whether to keep an edge in the result boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepDecision {
    Keep,
    KeepFlipped,
    Discard,
}

/// Determines whether a boundary edge survives the operation.
///
/// | Edge   | vs other operand | Intersect | Difference (A-B) |
/// |--------|------------------|-----------|------------------|
/// | from A | INSIDE B         | keep      | discard          |
/// | from A | OUTSIDE B        | discard   | keep             |
/// | from A | shared, same     | keep      | discard          |
/// | from A | shared, opposite | discard   | keep             |
/// | from B | INSIDE A         | keep      | keep (flip)      |
/// | from B | OUTSIDE A        | discard   | discard          |
/// | from B | shared           | discard   | discard          |
#[allow(clippy::match_same_arms)]
#[must_use]
pub fn should_keep_edge(source: EdgeSource, class: EdgeClass, op: BooleanOp) -> KeepDecision {
    match (source, class, op) {
        (EdgeSource::A, EdgeClass::Inside, BooleanOp::Intersect) => KeepDecision::Keep,
        (EdgeSource::A, EdgeClass::Inside, BooleanOp::Difference) => KeepDecision::Discard,
        (EdgeSource::A, EdgeClass::Outside, BooleanOp::Intersect) => KeepDecision::Discard,
        (EdgeSource::A, EdgeClass::Outside, BooleanOp::Difference) => KeepDecision::Keep,
        (EdgeSource::A, EdgeClass::SharedSame, BooleanOp::Intersect) => KeepDecision::Keep,
        (EdgeSource::A, EdgeClass::SharedSame, BooleanOp::Difference) => KeepDecision::Discard,
        (EdgeSource::A, EdgeClass::SharedOpposite, BooleanOp::Intersect) => KeepDecision::Discard,
        (EdgeSource::A, EdgeClass::SharedOpposite, BooleanOp::Difference) => KeepDecision::Keep,

        (EdgeSource::B, EdgeClass::Inside, BooleanOp::Intersect) => KeepDecision::Keep,
        (EdgeSource::B, EdgeClass::Inside, BooleanOp::Difference) => KeepDecision::KeepFlipped,
        (EdgeSource::B, EdgeClass::Outside, _) => KeepDecision::Discard,
        // Shared edges are carried by A's copy only.
        (EdgeSource::B, EdgeClass::SharedSame | EdgeClass::SharedOpposite, _) => {
            KeepDecision::Discard
        }
    }
}
