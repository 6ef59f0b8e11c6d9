/// HTTP handlers for push relay API
pub mod push;

pub use push::{register_routes, send_push, send_push_batch};
