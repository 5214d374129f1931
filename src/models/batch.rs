use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, BusinessError};
use crate::models::house::House;
use crate::models::selection::Selection;
use crate::models::student::StudentFilter;

/// 一次批量加分任务
///
/// 对应批次文件夹中的一个 TOML 文件：选中的学生 + 行为类别 + 倍数 + 备注。
/// 仅在一次提交的生命周期内有意义，提交完成后文件即被删除
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentBatch {
    /// 批次名称（仅用于日志显示）
    pub name: String,
    /// 行为类别ID（缺失时提交会被拒绝）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// 积分倍数，提交时收拢到 [1, 10]
    #[serde(default = "default_multiplier", deserialize_with = "deserialize_multiplier")]
    pub multiplier: u32,
    /// 自由文本备注
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// 显式选中的学生ID列表
    #[serde(default)]
    pub students: Vec<i64>,
    /// 按学院整体选择（students 为空时生效）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<String>,
    /// 按年级整体选择（students 为空时生效）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

fn default_multiplier() -> u32 {
    1
}

impl AssignmentBatch {
    /// 显式学生列表对应的选择集
    pub fn selection(&self) -> Selection {
        Selection::from_ids(self.students.iter().copied())
    }

    /// 当学生列表为空时，返回用于拉取整组名单的服务端查询条件
    ///
    /// 学院名称在这里解析为ID；无法识别的名称立即报错，不发起网络请求
    pub fn roster_filter(&self) -> AppResult<Option<StudentFilter>> {
        if !self.students.is_empty() {
            return Ok(None);
        }

        let house_id = match &self.house {
            Some(name) => Some(
                House::from_name(name)
                    .ok_or_else(|| {
                        AppError::Business(BusinessError::UnknownHouse { name: name.clone() })
                    })?
                    .id(),
            ),
            None => None,
        };

        let filter = StudentFilter {
            grade: self.grade.clone(),
            house_id,
        };

        if filter.is_empty() {
            Ok(None)
        } else {
            Ok(Some(filter))
        }
    }
}

// Helper function to deserialize multiplier as either string or integer
fn deserialize_multiplier<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct MultiplierVisitor;

    impl<'de> Visitor<'de> for MultiplierVisitor {
        type Value = u32;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer multiplier")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            value.trim().parse().map_err(E::custom)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            u32::try_from(value).map_err(E::custom)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            u32::try_from(value).map_err(E::custom)
        }
    }

    deserializer.deserialize_any(MultiplierVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_toml() {
        let batch: AssignmentBatch = toml::from_str(
            r#"
            name = "第三周 体育课表扬"
            category_id = 5
            multiplier = 3
            students = [101, 102, 103]
            "#,
        )
        .unwrap();

        assert_eq!(batch.category_id, Some(5));
        assert_eq!(batch.multiplier, 3);
        assert_eq!(batch.selection().ids(), &[101, 102, 103]);
        assert!(batch.roster_filter().unwrap().is_none());
    }

    #[test]
    fn multiplier_accepts_string_form() {
        let batch: AssignmentBatch = toml::from_str(
            r#"
            name = "测试"
            multiplier = "4"
            students = [1]
            "#,
        )
        .unwrap();
        assert_eq!(batch.multiplier, 4);
    }

    #[test]
    fn multiplier_defaults_to_one() {
        let batch: AssignmentBatch = toml::from_str(
            r#"
            name = "测试"
            students = [1]
            "#,
        )
        .unwrap();
        assert_eq!(batch.multiplier, 1);
    }

    #[test]
    fn roster_filter_resolves_house_name() {
        let batch: AssignmentBatch = toml::from_str(
            r#"
            name = "学院整体加分"
            category_id = 2
            house = "青龙"
            grade = "初三"
            "#,
        )
        .unwrap();

        let filter = batch.roster_filter().unwrap().expect("应该有查询条件");
        assert_eq!(filter.house_id, Some(1));
        assert_eq!(filter.grade.as_deref(), Some("初三"));
    }

    #[test]
    fn roster_filter_rejects_unknown_house() {
        let batch: AssignmentBatch = toml::from_str(
            r#"
            name = "学院整体加分"
            house = "不存在的学院"
            "#,
        )
        .unwrap();
        assert!(batch.roster_filter().is_err());
    }
}
