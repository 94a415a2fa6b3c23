use core::fmt;

/// Error indicating that a query is not supported between certain shapes.
///
/// Returned by [`CollisionDispatcher`](crate::query::CollisionDispatcher)
/// implementations when no routine exists for a given pair of shape types.
/// The default dispatcher supports every [`Shape`](crate::shape::Shape) pair
/// through the generic support-mapping path, so this error only surfaces
/// from custom dispatchers with intentionally restricted coverage.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Unsupported;

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad("query not supported between these shapes")
    }
}

impl std::error::Error for Unsupported {}
