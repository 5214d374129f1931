//! 行为积分 API 模块
//!
//! 负责所有与行为积分服务的底层 HTTP 交互：统一的响应信封、
//! 频率限制重试、错误归类。上层请使用 `clients::BehaviorClient`

use crate::error::{ApiError, AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// 服务端统一响应信封
///
/// `code == 200` 表示成功，`code == 600` 且消息包含"请求过于频繁"表示频率限制
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: u64,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// 检查响应是否成功
    pub fn is_success(&self) -> bool {
        self.code == 200
    }

    /// 检查是否是频率限制错误
    pub fn is_rate_limited(&self) -> bool {
        if self.code == 600 {
            if let Some(msg) = &self.message {
                return msg.contains("请求过于频繁");
            }
        }
        false
    }
}

/// GET 请求（带频率限制重试）
///
/// # 参数
/// - `client`: 共享的 HTTP 客户端
/// - `url`: 完整请求地址
/// - `token`: API 访问令牌
/// - `query`: query 参数列表（服务端过滤）
/// - `max_retries`: 最大重试次数
///
/// # 返回
/// 返回信封中的 data 字段，缺失时报 `EmptyResponse`
pub async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    token: &str,
    query: &[(&'static str, String)],
    max_retries: usize,
) -> AppResult<T> {
    debug!("GET {} (query: {:?})", url, query);

    for retry_count in 0..max_retries {
        let response = client
            .get(url)
            .header("behavior-token", token)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;

        // 检查是否需要重试（频率限制）
        if envelope.is_rate_limited() {
            warn!(
                "API请求频率限制 (尝试 {}/{}), 等待2秒后重试...",
                retry_count + 1,
                max_retries
            );
            sleep(Duration::from_secs(2)).await;
            continue;
        }

        if !envelope.is_success() {
            return Err(AppError::api_bad_response(
                url,
                Some(envelope.code),
                envelope.message,
            ));
        }

        return envelope.data.ok_or_else(|| {
            AppError::Api(ApiError::EmptyResponse {
                endpoint: url.to_string(),
            })
        });
    }

    Err(AppError::Api(ApiError::RateLimited {
        endpoint: url.to_string(),
        retries: max_retries,
    }))
}

/// POST 请求（带频率限制重试）
///
/// # 返回
/// 成功时返回信封中的 data 字段（创建类接口可能为 Null）
pub async fn post_json<B: Serialize>(
    client: &reqwest::Client,
    url: &str,
    token: &str,
    body: &B,
    max_retries: usize,
) -> AppResult<Value> {
    debug!("POST {}", url);

    for retry_count in 0..max_retries {
        let response = client
            .post(url)
            .header("behavior-token", token)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;

        let envelope: ApiEnvelope<Value> = response
            .json()
            .await
            .map_err(|e| AppError::api_request_failed(url, e))?;

        if envelope.is_rate_limited() {
            warn!(
                "API请求频率限制 (尝试 {}/{}), 等待2秒后重试...",
                retry_count + 1,
                max_retries
            );
            sleep(Duration::from_secs(2)).await;
            continue;
        }

        if !envelope.is_success() {
            return Err(AppError::api_bad_response(
                url,
                Some(envelope.code),
                envelope.message,
            ));
        }

        return Ok(envelope.data.unwrap_or(Value::Null));
    }

    Err(AppError::Api(ApiError::RateLimited {
        endpoint: url.to_string(),
        retries: max_retries,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_success_detection() {
        let envelope: ApiEnvelope<Value> =
            serde_json::from_str(r#"{"code":200,"data":[1,2,3]}"#).unwrap();
        assert!(envelope.is_success());
        assert!(!envelope.is_rate_limited());
    }

    #[test]
    fn envelope_rate_limit_detection() {
        let envelope: ApiEnvelope<Value> =
            serde_json::from_str(r#"{"code":600,"message":"请求过于频繁，请稍后再试"}"#).unwrap();
        assert!(!envelope.is_success());
        assert!(envelope.is_rate_limited());
    }

    #[test]
    fn envelope_other_600_is_not_rate_limit() {
        let envelope: ApiEnvelope<Value> =
            serde_json::from_str(r#"{"code":600,"message":"参数错误"}"#).unwrap();
        assert!(!envelope.is_rate_limited());
    }
}
