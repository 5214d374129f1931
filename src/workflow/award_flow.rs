//! 批次提交流程 - 流程层
//!
//! 核心职责：定义"一个批次"的完整提交流程
//!
//! 流程顺序：
//! 1. 本地校验（零网络请求）
//! 2. 过滤已提交学生（重试不重复加分）
//! 3. 并发提交（或批量接口单次提交）
//! 4. 对账：成功/失败计数，失败写入 warn.txt
//!
//! 状态只有 空闲 → 提交中 → {完成 | 失败} 三段，提交中是唯一的挂起点

use std::collections::HashSet;

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::clients::BehaviorClient;
use crate::config::Config;
use crate::models::{clamp_multiplier, BehaviorCategory, Selection};
use crate::services::{
    build_awards, pending_students, submit_all, AwardTally, CancelToken, WarnWriter,
};
use crate::workflow::award_ctx::BatchCtx;

/// 批次提交结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// 全部成功
    Completed,
    /// 尽力而为已结束，但存在失败
    PartialFailure,
}

/// 批次提交流程
///
/// - 编排完整的批次提交流程
/// - 决定何时校验、何时发出请求、何时对账
/// - 不持有 HTTP 客户端，只依赖业务能力（services）
/// - 记录本批已成功的学生，重试同一批次时跳过他们
pub struct AwardFlow {
    warn_writer: WarnWriter,
    cancel: CancelToken,
    teacher_id: i64,
    use_batch_endpoint: bool,
    verbose_logging: bool,
    submitted: Mutex<HashSet<i64>>,
}

impl AwardFlow {
    /// 创建新的批次提交流程
    pub fn new(config: &Config) -> Self {
        Self {
            warn_writer: WarnWriter::new(),
            cancel: CancelToken::new(),
            teacher_id: config.teacher_id,
            use_batch_endpoint: config.use_batch_endpoint,
            verbose_logging: config.verbose_logging,
            submitted: Mutex::new(HashSet::new()),
        }
    }

    /// 获取取消令牌的句柄
    ///
    /// 置位后流程不再发出新请求；在途请求无法撤回
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// 提交一个批次
    ///
    /// 重复调用（重试）时自动跳过已成功的学生
    pub async fn run(
        &self,
        client: &BehaviorClient,
        category: &BehaviorCategory,
        selection: &Selection,
        note: Option<&str>,
        ctx: &BatchCtx,
    ) -> Result<(BatchOutcome, AwardTally)> {
        // 本地校验，不通过则零网络请求
        crate::services::validate_submission(self.teacher_id, Some(category.id), selection)?;

        let multiplier = clamp_multiplier(ctx.multiplier);
        let points = category.award_points(multiplier);

        // 过滤已提交学生
        let pending = {
            let submitted = self.submitted.lock().await;
            pending_students(selection, &submitted)
        };
        let already = selection.len() - pending.len();
        if already > 0 {
            info!(
                "[批次 {}] {} 名学生此前已加分，本次跳过",
                ctx.batch_index, already
            );
        }
        if pending.is_empty() {
            info!("[批次 {}] 没有待提交的学生", ctx.batch_index);
            return Ok((BatchOutcome::Completed, AwardTally::default()));
        }

        info!(
            "[批次 {}] 📤 开始提交: {} 名学生 × {} ({:+} 分/人)",
            ctx.batch_index,
            pending.len(),
            category.name,
            points
        );
        if self.verbose_logging {
            info!("[批次 {}] 学生: {:?}", ctx.batch_index, pending);
        }

        let awards = build_awards(&pending, category, multiplier, self.teacher_id, note);

        // ========== 提交 ==========
        let tally = if self.use_batch_endpoint {
            self.submit_as_batch(client, ctx, awards).await?
        } else {
            self.submit_fan_out(client, ctx, awards).await?
        };

        // ========== 对账 ==========
        let outcome = if tally.failed == 0 {
            info!(
                "[批次 {}] ✅ 已为 {} 名学生加分",
                ctx.batch_index, tally.success
            );
            BatchOutcome::Completed
        } else {
            warn!(
                "[批次 {}] ⚠️ 提交完成: 成功 {}，失败 {}",
                ctx.batch_index, tally.success, tally.failed
            );
            BatchOutcome::PartialFailure
        };

        Ok((outcome, tally))
    }

    /// 逐条并发提交（fire all, await all，边完成边计数）
    async fn submit_fan_out(
        &self,
        client: &BehaviorClient,
        ctx: &BatchCtx,
        awards: Vec<crate::models::PointAward>,
    ) -> Result<AwardTally> {
        let report = submit_all(awards, &self.cancel, ctx.batch_index, |award| async move {
            client.create_award(&award).await
        })
        .await;

        {
            let mut submitted = self.submitted.lock().await;
            submitted.extend(report.awarded.iter().copied());
        }

        for (student_id, reason) in &report.failed {
            self.write_warn(ctx, *student_id, reason).await;
        }

        Ok(report.tally())
    }

    /// 批量接口提交（单次 HTTP 调用，整批成败一体）
    async fn submit_as_batch(
        &self,
        client: &BehaviorClient,
        ctx: &BatchCtx,
        awards: Vec<crate::models::PointAward>,
    ) -> Result<AwardTally> {
        let total = awards.len();

        if self.cancel.is_cancelled() {
            warn!("[批次 {}] ⚠️ 已取消，批量请求未发出", ctx.batch_index);
            return Ok(AwardTally {
                not_issued: total,
                ..Default::default()
            });
        }

        match client.create_awards_batch(&awards).await {
            Ok(()) => {
                let mut submitted = self.submitted.lock().await;
                submitted.extend(awards.iter().map(|a| a.student_id));
                Ok(AwardTally {
                    success: total,
                    ..Default::default()
                })
            }
            Err(e) => {
                warn!("[批次 {}] ⚠️ 批量提交失败: {}", ctx.batch_index, e);
                for award in &awards {
                    self.write_warn(ctx, award.student_id, &e.to_string()).await;
                }
                Ok(AwardTally {
                    failed: total,
                    ..Default::default()
                })
            }
        }
    }

    /// 写入警告日志
    ///
    /// warn.txt 写入失败只记日志，不中断对账
    async fn write_warn(&self, ctx: &BatchCtx, student_id: i64, reason: &str) {
        if let Err(e) = self
            .warn_writer
            .write(&ctx.batch_name, student_id, reason)
            .await
        {
            warn!(
                "[批次 {}] 写入 warn.txt 失败 (学生 {}): {}",
                ctx.batch_index, student_id, e
            );
        }
    }
}
