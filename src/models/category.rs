use serde::{Deserialize, Serialize};

/// 积分倍数下限
pub const MIN_MULTIPLIER: u32 = 1;
/// 积分倍数上限
pub const MAX_MULTIPLIER: u32 = 10;

/// 将倍数收拢到 [MIN_MULTIPLIER, MAX_MULTIPLIER] 区间
pub fn clamp_multiplier(multiplier: u32) -> u32 {
    multiplier.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER)
}

/// 行为类别
///
/// 由外部目录服务维护，本程序只读
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorCategory {
    pub id: i64,
    pub name: String,
    /// 带符号的基础分值（负数表示扣分类别）
    pub point_value: i64,
    pub is_positive: bool,
}

impl BehaviorCategory {
    /// 计算实际加分值: point_value × 倍数（倍数先收拢到合法区间）
    pub fn award_points(&self, multiplier: u32) -> i64 {
        self.point_value * i64::from(clamp_multiplier(multiplier))
    }
}

impl std::fmt::Display for BehaviorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:+})", self.name, self.point_value)
    }
}
