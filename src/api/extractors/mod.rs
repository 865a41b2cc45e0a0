pub mod auth_ctx;
pub mod public_id;
mod request;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use request::{JsonBody, PathParam, QueryParams};
