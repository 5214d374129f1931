//! 批次处理上下文
//!
//! 封装"我正在提交哪个批次"这一信息

use std::fmt::Display;

/// 批次处理上下文
///
/// 包含提交单个批次所需的所有上下文信息
#[derive(Debug, Clone)]
pub struct BatchCtx {
    /// 批次名称
    pub batch_name: String,

    /// 批次索引（仅用于日志显示）
    pub batch_index: usize,

    /// 行为类别ID
    pub category_id: i64,

    /// 积分倍数（已收拢到合法区间）
    pub multiplier: u32,
}

impl BatchCtx {
    /// 创建新的批次上下文
    pub fn new(batch_name: String, batch_index: usize, category_id: i64, multiplier: u32) -> Self {
        Self {
            batch_name,
            batch_index,
            category_id,
            multiplier,
        }
    }
}

impl Display for BatchCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[批次 '{}' 类别#{} 倍数x{}]",
            self.batch_name, self.category_id, self.multiplier
        )
    }
}
