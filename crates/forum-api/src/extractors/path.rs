//! Path parameter extractors
//!
//! Type-safe extraction of row ids and reaction targets from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use forum_core::{PostId, RowId};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// Path extractor that rejects with the API error body
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(ApiPath(inner))
    }
}

/// Path parameters with post_id
#[derive(Debug, serde::Deserialize)]
pub struct PostIdPath {
    pub post_id: String,
}

impl PostIdPath {
    /// Parse post_id as a row id
    pub fn post_id(&self) -> Result<PostId, ApiError> {
        RowId::parse(&self.post_id).map_err(|_| ApiError::invalid_path("Invalid post_id format"))
    }
}

/// Path parameters naming a reaction target
#[derive(Debug, serde::Deserialize)]
pub struct ReactionTargetPath {
    pub target_type: String,
    pub target_id: String,
}

impl ReactionTargetPath {
    /// Parse target_id as a row id
    pub fn target_id(&self) -> Result<RowId, ApiError> {
        RowId::parse(&self.target_id)
            .map_err(|_| ApiError::invalid_path("Invalid target_id format"))
    }
}
