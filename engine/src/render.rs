//! @ai:module:intent Render collaborator seam for comparison results
//! @ai:module:layer domain
//! @ai:module:public_api Renderable
//! @ai:module:stateless true

use crate::compare::ComparisonResult;

/// @ai:intent Capability trait for surfaces that present a comparison
pub trait Renderable {
    type Output;

    /// @ai:intent Present a comparison; the result's show_raw flag selects raw or normalized values
    fn render_comparison(&self, result: &ComparisonResult) -> Self::Output;
}
