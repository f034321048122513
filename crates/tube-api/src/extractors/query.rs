//! Feed query extractor

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use tube_core::traits::FeedQuery;
use tube_service::FeedParams;

use crate::response::ApiError;

/// `?category&search&page&limit`, normalized into a clamped `FeedQuery`
#[derive(Debug, Clone)]
pub struct FeedFilter(pub FeedQuery);

#[async_trait]
impl<S> FromRequestParts<S> for FeedFilter
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<FeedParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(FeedFilter(FeedQuery::from(params)))
    }
}
