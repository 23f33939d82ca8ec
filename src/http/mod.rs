//! Request dispatch: one HTTP call, its classification, and the retry loop around it.

mod classify;
mod dispatcher;
mod retry;

pub use classify::{REQUEST_ID_HEADER, classify, decode, request_id, retry_after};
pub use dispatcher::{API_KEY_HEADER, ApiRequest, Dispatcher};
pub use retry::RetryPolicy;
