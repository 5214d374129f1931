//! 单个批次处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责处理单个批次文件，是批次级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **类别解析**：从目录缓存中解析行为类别
//! 2. **名单解析**：显式学生列表，或按学院/年级从服务端拉取整组名单
//! 3. **流程调度**：创建 `AwardFlow` 并委托提交
//! 4. **文件清理**：删除已处理的 TOML 文件
//! 5. **统计输出**：记录单个批次的成功/失败数量

use crate::clients::BehaviorClient;
use crate::config::Config;
use crate::error::AppError;
use crate::models::{AssignmentBatch, Selection};
use crate::services::{AwardTally, CatalogService};
use crate::workflow::{AwardFlow, BatchCtx, BatchOutcome};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// 处理单个批次
///
/// # 参数
/// - `client`: 行为积分 API 客户端
/// - `catalog`: 目录缓存服务
/// - `batch`: 批次数据
/// - `batch_index`: 批次索引（用于日志）
/// - `config`: 配置
///
/// # 返回
/// 返回本批次的提交统计
pub async fn process_assignment(
    client: &BehaviorClient,
    catalog: &CatalogService,
    batch: AssignmentBatch,
    batch_index: usize,
    config: &Config,
) -> Result<AwardTally> {
    log_batch_start(batch_index, &batch);

    // 解析行为类别（缺失或不存在都在发出加分请求之前拒绝）
    let category_id = batch
        .category_id
        .ok_or_else(|| AppError::missing_category(None))
        .with_context(|| format!("批次 '{}' 未选择行为类别", batch.name))?;
    let category = catalog
        .category_by_id(client, category_id)
        .await?
        .ok_or_else(|| AppError::missing_category(Some(category_id)))?;

    // 解析学生选择集
    let selection = resolve_selection(client, catalog, &batch, batch_index).await?;

    // 创建流程对象并提交
    let ctx = BatchCtx::new(batch.name.clone(), batch_index, category.id, batch.multiplier);
    let award_flow = AwardFlow::new(config);

    let (outcome, tally) = award_flow
        .run(client, &category, &selection, batch.note.as_deref(), &ctx)
        .await?;

    // 清理文件
    cleanup_file(batch.file_path.as_deref(), batch_index)?;

    log_batch_complete(batch_index, outcome, &tally);

    Ok(tally)
}

/// 构建本批次的学生选择集
///
/// 显式列表优先；列表为空时按学院/年级条件从服务端拉取整组名单
async fn resolve_selection(
    client: &BehaviorClient,
    catalog: &CatalogService,
    batch: &AssignmentBatch,
    batch_index: usize,
) -> Result<Selection> {
    if !batch.students.is_empty() {
        return Ok(batch.selection());
    }

    match batch.roster_filter()? {
        Some(filter) => {
            info!(
                "[批次 {}] 按条件拉取名单 (年级: {:?}, 学院: {:?})",
                batch_index, filter.grade, filter.house_id
            );
            let roster = catalog.students(client, &filter).await?;
            let ids: Vec<i64> = roster.iter().map(|s| s.id).collect();

            let mut selection = Selection::new();
            selection.select_all(&ids);
            info!("[批次 {}] ✓ 名单拉取完成: {} 人", batch_index, selection.len());
            Ok(selection)
        }
        // 既无显式列表也无筛选条件，交给流程层按"选择集为空"拒绝
        None => Ok(Selection::new()),
    }
}

/// 清理已处理的文件
fn cleanup_file(file_path: Option<&str>, batch_index: usize) -> Result<()> {
    info!("[批次 {}] 🗑️ 清理已处理的文件...", batch_index);

    if let Some(file_path) = file_path {
        if Path::new(file_path).exists() {
            fs::remove_file(file_path).with_context(|| format!("无法删除文件: {}", file_path))?;
            info!(
                "[批次 {}] ✓ 文件已删除: {}",
                batch_index,
                Path::new(file_path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            );
        } else {
            warn!("[批次 {}] ⚠️ 文件不存在: {}", batch_index, file_path);
        }
    } else {
        warn!("[批次 {}] ⚠️ 文件路径未设置", batch_index);
    }

    Ok(())
}

// ========== 日志辅助函数 ==========

fn log_batch_start(batch_index: usize, batch: &AssignmentBatch) {
    info!("[批次 {}] 开始处理", batch_index);
    info!("[批次 {}] 名称: {}", batch_index, batch.name);
    info!(
        "[批次 {}] 类别ID: {:?}, 倍数: {}, 显式学生数: {}",
        batch_index,
        batch.category_id,
        batch.multiplier,
        batch.students.len()
    );
}

fn log_batch_complete(batch_index: usize, outcome: BatchOutcome, tally: &AwardTally) {
    info!(
        "[批次 {}] 提交统计: 成功 {}, 失败 {}, 未发出 {}",
        batch_index, tally.success, tally.failed, tally.not_issued
    );
    match outcome {
        BatchOutcome::Completed => info!("\n[批次 {}] ✅ 批次处理完成\n", batch_index),
        BatchOutcome::PartialFailure => {
            warn!("\n[批次 {}] ⚠️ 批次存在失败，详见 warn.txt\n", batch_index)
        }
    }
}
