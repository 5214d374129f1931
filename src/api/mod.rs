//! API 层
//!
//! 与外部行为积分服务的底层 HTTP 交互

pub mod behavior;

pub use behavior::{get_json, post_json, ApiEnvelope};
