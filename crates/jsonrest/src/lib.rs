pub mod blocking;
pub mod client;
pub mod error;
pub mod normalize;
pub mod request;

pub use client::{delete, get, post, put, JsonExecutor, JsonRestClient};
pub use error::RestError;
pub use normalize::{normalize_body, JsonObject};
pub use request::{HttpVerb, JsonRequest, UnknownVerb};
