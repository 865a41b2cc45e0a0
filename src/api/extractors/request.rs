/*
 * Responsibility
 * - Json / Path / Query extractors whose rejections are AppError
 * - Malformed input gets the same `{ success: false, message }` body as every other error
 */
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Query, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body.
pub struct JsonBody<T>(pub T);

/// Typed path parameters (e.g. `/profiles/{user_id}`).
pub struct PathParam<T>(pub T);

/// Query string parameters.
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(path_rejection)?;
        Ok(Self(value))
    }
}

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(query_rejection)?;
        Ok(Self(value))
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge;
    }
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::bad_request("Content-Type must be application/json")
        }
        JsonRejection::JsonSyntaxError(_) => AppError::bad_request("Malformed JSON body"),
        // serde's message names the offending field
        JsonRejection::JsonDataError(e) => AppError::bad_request(e.body_text()),
        other => {
            tracing::debug!(error = %other, "request body rejected");
            AppError::bad_request("Invalid request body")
        }
    }
}

fn path_rejection(rejection: PathRejection) -> AppError {
    tracing::debug!(error = %rejection, "path parameter rejected");
    AppError::bad_request("Invalid path parameter")
}

fn query_rejection(rejection: QueryRejection) -> AppError {
    tracing::debug!(error = %rejection, "query string rejected");
    AppError::bad_request("Invalid query parameters")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{self, header},
    };
    use serde::Deserialize;
    use uuid::Uuid;

    #[derive(Debug, Deserialize)]
    struct Title {
        title: String,
    }

    fn json_request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn valid_json_is_extracted() {
        let req = json_request(Some("application/json"), r#"{"title":"Soup"}"#);
        let JsonBody(t) = JsonBody::<Title>::from_request(req, &()).await.unwrap();
        assert_eq!(t.title, "Soup");
    }

    #[tokio::test]
    async fn missing_field_is_a_bad_request() {
        let req = json_request(Some("application/json"), "{}");
        let err = JsonBody::<Title>::from_request(req, &()).await.err().unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("title"));
    }

    #[tokio::test]
    async fn syntax_error_and_missing_content_type_are_bad_requests() {
        let broken = json_request(Some("application/json"), "{");
        let err = JsonBody::<Title>::from_request(broken, &()).await.err().unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let untyped = json_request(None, r#"{"title":"Soup"}"#);
        let err = JsonBody::<Title>::from_request(untyped, &()).await.err().unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn query_type_mismatch_is_a_bad_request() {
        #[derive(Debug, Deserialize)]
        struct Page {
            #[allow(dead_code)]
            page: u32,
        }

        let req = http::Request::builder().uri("/?page=abc").body(()).unwrap();
        let (mut parts, _) = req.into_parts();
        let err = QueryParams::<Page>::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn path_outside_a_router_is_a_bad_request() {
        // no matched route means no path params to deserialize
        let req = http::Request::builder().uri("/x").body(()).unwrap();
        let (mut parts, _) = req.into_parts();
        let err = PathParam::<Uuid>::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
