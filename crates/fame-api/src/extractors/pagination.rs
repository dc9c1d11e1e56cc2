//! Query string extractors
//!
//! `PageParams` reads `page` and `limit` leniently: missing or malformed values fall back
//! to the defaults, and the limit is clamped to `1..=100`.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use fame_service::dto::Pagination;
use serde::{de::DeserializeOwned, Deserialize};

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
struct RawPage {
    #[serde(default)]
    page: Option<String>,
    #[serde(default)]
    limit: Option<String>,
}

/// Validated page selection
#[derive(Debug, Clone, Copy, Default)]
pub struct PageParams(pub Pagination);

impl From<RawPage> for PageParams {
    fn from(raw: RawPage) -> Self {
        let number = |value: Option<String>| -> Option<u32> {
            let parsed = value?.trim().parse::<i64>().ok()?;
            Some(u32::try_from(parsed.max(0)).unwrap_or(u32::MAX))
        };
        Self(Pagination::new(number(raw.page), number(raw.limit)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PageParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<RawPage>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(raw.into())
    }
}

/// `Query` with rejections in the API error shape
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(inner) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(Self(inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: Option<&str>, limit: Option<&str>) -> Pagination {
        PageParams::from(RawPage {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        })
        .0
    }

    #[test]
    fn test_defaults() {
        assert_eq!(page(None, None), Pagination { page: 1, limit: 20 });
    }

    #[test]
    fn test_limit_clamping() {
        assert_eq!(page(None, Some("500")).limit, 100);
        assert_eq!(page(None, Some("0")).limit, 1);
        assert_eq!(page(None, Some("-5")).limit, 1);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        assert_eq!(page(Some("abc"), Some("")), Pagination { page: 1, limit: 20 });
        assert_eq!(page(Some("3"), Some("10")), Pagination { page: 3, limit: 10 });
    }
}
