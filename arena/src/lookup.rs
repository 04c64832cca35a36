//! @ai:module:intent Resolve command-line product references to catalog entries
//! @ai:module:layer application
//! @ai:module:public_api LookupError, resolve_product
//! @ai:module:depends_on arena_engine::session
//! @ai:module:stateless true

use arena_engine::{Catalog, Product, Searchable, Session};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("No product matches '{query}'")]
    NotFound { query: String },

    #[error("No products in category filter '{filter}'")]
    EmptyPool { filter: String },

    #[error("No column post with id '{id}'")]
    PostNotFound { id: String },
}

/// @ai:intent Resolve input as a product id first, then as a search over the session pool
/// @ai:effects pure
/// @ai:post Err(NotFound) when neither the id nor the search yields a product
pub fn resolve_product<'c>(
    catalog: &'c Catalog,
    searcher: &dyn Searchable,
    session: &Session,
    input: &str,
) -> Result<&'c Product, LookupError> {
    let input = input.trim();
    session
        .resolve(catalog, searcher, input, Some(input))
        .ok_or_else(|| LookupError::NotFound {
            query: input.to_string(),
        })
}
