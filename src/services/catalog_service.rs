//! 目录缓存服务 - 业务能力层
//!
//! 行为类别和学生名单由外部服务维护，本模块在一次会话内缓存它们，
//! 避免每个批次都重新拉取。缓存通过显式的 `invalidate()` 失效，
//! 需要共享的组件各自持有 `Arc<CatalogService>`，没有进程级广播

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::clients::BehaviorClient;
use crate::error::AppResult;
use crate::models::{BehaviorCategory, Student, StudentFilter};

/// 目录缓存服务
///
/// 职责：
/// - 缓存行为类别目录（整个会话内稳定）
/// - 缓存不带过滤条件的学生全名单
/// - 带过滤条件的查询直接透传给服务端，不缓存
#[derive(Debug, Default)]
pub struct CatalogService {
    categories: RwLock<Option<Vec<BehaviorCategory>>>,
    roster: RwLock<Option<Vec<Student>>>,
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取行为类别目录（首次访问时拉取并缓存）
    pub async fn categories(&self, client: &BehaviorClient) -> AppResult<Vec<BehaviorCategory>> {
        if let Some(cached) = self.categories.read().await.as_ref() {
            debug!("类别目录命中缓存 ({} 项)", cached.len());
            return Ok(cached.clone());
        }

        let fetched = client.fetch_categories().await?;
        info!("✓ 拉取行为类别目录: {} 项", fetched.len());
        *self.categories.write().await = Some(fetched.clone());
        Ok(fetched)
    }

    /// 按ID查找行为类别
    pub async fn category_by_id(
        &self,
        client: &BehaviorClient,
        category_id: i64,
    ) -> AppResult<Option<BehaviorCategory>> {
        let categories = self.categories(client).await?;
        Ok(categories.into_iter().find(|c| c.id == category_id))
    }

    /// 获取学生名单
    ///
    /// 不带条件时使用会话缓存；带条件时由服务端过滤，直接透传
    pub async fn students(
        &self,
        client: &BehaviorClient,
        filter: &StudentFilter,
    ) -> AppResult<Vec<Student>> {
        if !filter.is_empty() {
            return client.fetch_students(filter).await;
        }

        if let Some(cached) = self.roster.read().await.as_ref() {
            debug!("学生名单命中缓存 ({} 人)", cached.len());
            return Ok(cached.clone());
        }

        let fetched = client.fetch_students(filter).await?;
        info!("✓ 拉取学生名单: {} 人", fetched.len());
        *self.roster.write().await = Some(fetched.clone());
        Ok(fetched)
    }

    /// 使全部缓存失效
    ///
    /// 数据变更后由调用方显式触发，下次访问会重新拉取
    pub async fn invalidate(&self) {
        *self.categories.write().await = None;
        *self.roster.write().await = None;
        info!("目录缓存已失效，下次访问将重新拉取");
    }
}
