//! 加分提交服务 - 业务能力层
//!
//! 只负责"把一批加分记录发出去"的能力：
//! - 本地校验（未选类别 / 未登录 / 选择集为空），不通过则零网络请求
//! - 并发发出全部请求（fire all, await all），不保证请求之间的顺序
//! - 边完成边计数（流式），最终给出成功/失败清单
//!
//! 提交策略是"尽力而为"：部分失败不会中止其余请求

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{info, warn};

use crate::error::{AppError, AppResult, BusinessError};
use crate::models::{BehaviorCategory, PointAward, Selection};

/// 取消令牌
///
/// 置位后不再发出新的请求；已经在途的请求无法撤回（外部服务没有补偿事务）
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// 提交结果统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwardTally {
    /// 成功加分的学生数
    pub success: usize,
    /// 失败的学生数
    pub failed: usize,
    /// 未发出请求的学生数（取消）
    pub not_issued: usize,
}

impl AwardTally {
    pub fn total(&self) -> usize {
        self.success + self.failed + self.not_issued
    }
}

/// 一次并发提交的完整结果
#[derive(Debug, Default)]
pub struct FanOutReport {
    /// 成功加分的学生ID
    pub awarded: Vec<i64>,
    /// 失败的学生ID及原因
    pub failed: Vec<(i64, String)>,
    /// 因取消而未发出请求的学生ID
    pub not_issued: Vec<i64>,
}

impl FanOutReport {
    pub fn tally(&self) -> AwardTally {
        AwardTally {
            success: self.awarded.len(),
            failed: self.failed.len(),
            not_issued: self.not_issued.len(),
        }
    }
}

/// 提交前的本地校验
///
/// 任何一项不通过都会在发出网络请求之前直接拒绝
pub fn validate_submission(
    teacher_id: i64,
    category_id: Option<i64>,
    selection: &Selection,
) -> AppResult<()> {
    if teacher_id <= 0 {
        return Err(AppError::Business(BusinessError::NotAuthenticated));
    }
    if category_id.is_none() {
        return Err(AppError::missing_category(None));
    }
    if selection.is_empty() {
        return Err(AppError::Business(BusinessError::EmptySelection));
    }
    Ok(())
}

/// 为每个学生构建一条加分记录
///
/// 分值统一为 category.point_value × 倍数（倍数已收拢到 [1, 10]）
pub fn build_awards(
    students: &[i64],
    category: &BehaviorCategory,
    multiplier: u32,
    teacher_id: i64,
    note: Option<&str>,
) -> Vec<PointAward> {
    students
        .iter()
        .map(|&student_id| PointAward::build(student_id, category, multiplier, teacher_id, note))
        .collect()
}

/// 过滤掉已经成功提交过的学生
///
/// 同一批次重试时避免重复加分
pub fn pending_students(selection: &Selection, submitted: &HashSet<i64>) -> Vec<i64> {
    selection
        .ids()
        .iter()
        .copied()
        .filter(|id| !submitted.contains(id))
        .collect()
}

/// 并发提交全部加分记录
///
/// # 参数
/// - `awards`: 待提交的记录
/// - `cancel`: 取消令牌，置位后不再发出新请求
/// - `batch_index`: 批次索引（用于日志）
/// - `submit`: 单条记录的提交操作
///
/// # 返回
/// 返回成功/失败/未发出三类清单；每条完成时输出一行进度日志
pub async fn submit_all<F, Fut>(
    awards: Vec<PointAward>,
    cancel: &CancelToken,
    batch_index: usize,
    submit: F,
) -> FanOutReport
where
    F: Fn(PointAward) -> Fut,
    Fut: Future<Output = AppResult<()>>,
{
    let total = awards.len();
    let submit = &submit;
    let mut report = FanOutReport::default();
    let mut in_flight = FuturesUnordered::new();

    for award in awards {
        if cancel.is_cancelled() {
            report.not_issued.push(award.student_id);
            continue;
        }
        let student_id = award.student_id;
        in_flight.push(async move { (student_id, submit(award).await) });
    }

    if !report.not_issued.is_empty() {
        warn!(
            "[批次 {}] ⚠️ 已取消，{} 条请求未发出",
            batch_index,
            report.not_issued.len()
        );
    }

    // 流式等待：每条请求完成就更新一次进度
    let mut completed = 0usize;
    while let Some((student_id, result)) = in_flight.next().await {
        completed += 1;
        match result {
            Ok(()) => {
                info!(
                    "[批次 {}] ✓ 学生 {} 加分成功 ({}/{} 完成)",
                    batch_index, student_id, completed, total
                );
                report.awarded.push(student_id);
            }
            Err(e) => {
                warn!(
                    "[批次 {}] ⚠️ 学生 {} 加分失败: {} ({}/{} 完成)",
                    batch_index, student_id, e, completed, total
                );
                report.failed.push((student_id, e.to_string()));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helpfulness() -> BehaviorCategory {
        BehaviorCategory {
            id: 5,
            name: "乐于助人".to_string(),
            point_value: 2,
            is_positive: true,
        }
    }

    #[test]
    fn rejects_without_teacher_identity() {
        let selection = Selection::from_ids([101]);
        let result = validate_submission(0, Some(5), &selection);
        assert!(matches!(
            result,
            Err(AppError::Business(BusinessError::NotAuthenticated))
        ));
    }

    #[test]
    fn rejects_without_category() {
        let selection = Selection::from_ids([101]);
        let result = validate_submission(7, None, &selection);
        assert!(matches!(
            result,
            Err(AppError::Business(BusinessError::MissingCategory { .. }))
        ));
    }

    #[test]
    fn rejects_empty_selection() {
        let selection = Selection::new();
        let result = validate_submission(7, Some(5), &selection);
        assert!(matches!(
            result,
            Err(AppError::Business(BusinessError::EmptySelection))
        ));
    }

    #[test]
    fn builds_one_award_per_student_with_derived_points() {
        let awards = build_awards(&[101, 102, 103], &helpfulness(), 3, 7, None);
        assert_eq!(awards.len(), 3);
        for award in &awards {
            assert_eq!(award.points, 6);
            assert_eq!(award.teacher_id, 7);
        }
    }

    #[test]
    fn pending_skips_already_awarded_students() {
        let selection = Selection::from_ids([101, 102, 103]);
        let submitted: HashSet<i64> = [101, 103].into_iter().collect();
        assert_eq!(pending_students(&selection, &submitted), vec![102]);
    }

    #[tokio::test]
    async fn all_success_tallies_to_n() {
        let awards = build_awards(&[101, 102, 103], &helpfulness(), 3, 7, None);
        let cancel = CancelToken::new();
        let report = submit_all(awards, &cancel, 1, |_| async { Ok(()) }).await;

        let tally = report.tally();
        assert_eq!(tally.success, 3);
        assert_eq!(tally.failed, 0);
        assert_eq!(tally.not_issued, 0);
    }

    #[tokio::test]
    async fn partial_failure_accounts_for_every_student() {
        let awards = build_awards(&[101, 102, 103, 104], &helpfulness(), 1, 7, None);
        let cancel = CancelToken::new();
        let report = submit_all(awards, &cancel, 1, |award| async move {
            if award.student_id % 2 == 0 {
                Err(AppError::Other("模拟网络错误".to_string()))
            } else {
                Ok(())
            }
        })
        .await;

        let tally = report.tally();
        assert_eq!(tally.success + tally.failed, 4);
        assert_eq!(tally.success, 2);
        assert_eq!(tally.failed, 2);
        assert!(report.failed.iter().all(|(id, _)| id % 2 == 0));
    }

    #[tokio::test]
    async fn cancelled_token_issues_no_requests() {
        use std::sync::atomic::AtomicUsize;

        let awards = build_awards(&[101, 102], &helpfulness(), 1, 7, None);
        let cancel = CancelToken::new();
        cancel.cancel();

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_submit = calls.clone();
        let report = submit_all(awards, &cancel, 1, move |_| {
            let calls = calls_in_submit.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        })
        .await;

        let tally = report.tally();
        assert_eq!(calls.load(Ordering::SeqCst), 0, "取消后不应发出请求");
        assert_eq!(tally.not_issued, 2);
        assert_eq!(tally.success, 0);
        assert_eq!(tally.failed, 0);
    }
}
