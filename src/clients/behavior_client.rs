/// 行为积分 API 客户端
///
/// 封装所有与行为积分服务相关的调用逻辑
use crate::api::behavior;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{AwardBatchPayload, BehaviorCategory, PointAward, Student, StudentFilter};

/// 行为积分 API 客户端
///
/// 内部的 reqwest::Client 使用 Arc 共享连接池，可以安全地 clone
#[derive(Clone)]
pub struct BehaviorClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    max_retries: usize,
}

impl BehaviorClient {
    /// 创建新的行为积分客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
            max_retries: config.max_retries,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 拉取全部行为类别
    pub async fn fetch_categories(&self) -> AppResult<Vec<BehaviorCategory>> {
        behavior::get_json(
            &self.http,
            &self.url("/api/behavior-categories"),
            &self.token,
            &[],
            self.max_retries,
        )
        .await
    }

    /// 拉取学生名单
    ///
    /// 年级/学院过滤通过 query 参数在服务端完成
    pub async fn fetch_students(&self, filter: &StudentFilter) -> AppResult<Vec<Student>> {
        behavior::get_json(
            &self.http,
            &self.url("/api/users/role/student"),
            &self.token,
            &filter.to_query(),
            self.max_retries,
        )
        .await
    }

    /// 创建一条加分记录
    pub async fn create_award(&self, award: &PointAward) -> AppResult<()> {
        behavior::post_json(
            &self.http,
            &self.url("/api/behavior-points"),
            &self.token,
            award,
            self.max_retries,
        )
        .await?;
        Ok(())
    }

    /// 批量创建加分记录（单次 HTTP 调用）
    pub async fn create_awards_batch(&self, awards: &[PointAward]) -> AppResult<()> {
        let payload = AwardBatchPayload {
            points: awards.to_vec(),
        };
        behavior::post_json(
            &self.http,
            &self.url("/api/behavior-points/batch"),
            &self.token,
            &payload,
            self.max_retries,
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let config = Config {
            api_base_url: "https://behavior-api.school.example.cn/".to_string(),
            ..Config::default()
        };
        let client = BehaviorClient::new(&config).unwrap();
        assert_eq!(
            client.url("/api/behavior-categories"),
            "https://behavior-api.school.example.cn/api/behavior-categories"
        );
    }
}
