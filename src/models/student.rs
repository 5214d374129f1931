use serde::{Deserialize, Serialize};

/// 学生信息
///
/// 来自外部用户目录（`GET /api/users/role/student`），本程序只读
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_id: Option<i64>,
}

impl Student {
    /// 显示用全名
    pub fn full_name(&self) -> String {
        format!("{}{}", self.last_name, self.first_name)
    }
}

/// 学生名单查询条件
///
/// 过滤在服务端完成（query 参数），客户端不做线性扫描
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    pub grade: Option<String>,
    pub house_id: Option<i64>,
}

impl StudentFilter {
    /// 转换为 query 参数列表
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(grade) = &self.grade {
            query.push(("grade", grade.clone()));
        }
        if let Some(house_id) = self.house_id {
            query.push(("house", house_id.to_string()));
        }
        query
    }

    pub fn is_empty(&self) -> bool {
        self.grade.is_none() && self.house_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_builds_query_params() {
        let filter = StudentFilter {
            grade: Some("初三".to_string()),
            house_id: Some(2),
        };
        let query = filter.to_query();
        assert_eq!(query, vec![("grade", "初三".to_string()), ("house", "2".to_string())]);
    }

    #[test]
    fn empty_filter_has_no_params() {
        let filter = StudentFilter::default();
        assert!(filter.is_empty());
        assert!(filter.to_query().is_empty());
    }
}
