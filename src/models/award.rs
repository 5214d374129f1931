use serde::{Deserialize, Serialize};

use crate::models::category::BehaviorCategory;

/// 单条加分记录（线格式）
///
/// 一经发送不再修改，由外部服务负责持久化
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointAward {
    pub student_id: i64,
    pub category_id: i64,
    /// 实际分值 = category.point_value × 倍数
    pub points: i64,
    pub teacher_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PointAward {
    /// 根据类别和倍数构建一条加分记录
    pub fn build(
        student_id: i64,
        category: &BehaviorCategory,
        multiplier: u32,
        teacher_id: i64,
        notes: Option<&str>,
    ) -> Self {
        Self {
            student_id,
            category_id: category.id,
            points: category.award_points(multiplier),
            teacher_id,
            notes: notes.map(|s| s.to_string()),
        }
    }
}

/// 批量提交接口的请求体（`POST /api/behavior-points/batch`）
#[derive(Debug, Clone, Serialize)]
pub struct AwardBatchPayload {
    pub points: Vec<PointAward>,
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
    fn build_derives_points_from_category() {
        let award = PointAward::build(101, &helpfulness(), 3, 7, Some("课堂表现"));
        assert_eq!(award.student_id, 101);
        assert_eq!(award.category_id, 5);
        assert_eq!(award.points, 6);
        assert_eq!(award.teacher_id, 7);
        assert_eq!(award.notes.as_deref(), Some("课堂表现"));
    }

    #[test]
    fn serializes_camel_case_and_omits_empty_notes() {
        let award = PointAward::build(101, &helpfulness(), 3, 7, None);
        let json = serde_json::to_value(&award).unwrap();
        assert_eq!(json["studentId"], 101);
        assert_eq!(json["categoryId"], 5);
        assert_eq!(json["points"], 6);
        assert_eq!(json["teacherId"], 7);
        assert!(json.get("notes").is_none());
    }
}
