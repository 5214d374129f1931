//! 警告写入服务 - 业务能力层
//!
//! 只负责"写 warn.txt"能力，不关心流程

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

/// 警告写入服务
///
/// 职责：
/// - 将加分失败的学生写入 warn.txt，留给操作者手工补发
/// - 只处理单条警告
/// - 不关心流程顺序
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    /// 创建新的警告写入服务
    pub fn new() -> Self {
        Self {
            warn_file_path: "warn.txt".to_string(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    /// 写入警告信息
    ///
    /// # 参数
    /// - `batch_name`: 批次名称
    /// - `student_id`: 学生ID
    /// - `reason`: 失败原因
    pub async fn write(&self, batch_name: &str, student_id: i64, reason: &str) -> Result<()> {
        debug!(
            "写入警告: 批次 {} | 学生 {} | 原因: {}",
            batch_name, student_id, reason
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)?;

        let warn_msg = format!("批次 {} | 学生 {} | 原因: {}\n", batch_name, student_id, reason);

        file.write_all(warn_msg.as_bytes())?;

        Ok(())
    }
}

impl Default for WarnWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn appends_one_line_per_failure() {
        let path = std::env::temp_dir().join("behavior_points_submit_warn_test.txt");
        std::fs::remove_file(&path).ok();

        let writer = WarnWriter::with_path(path.to_string_lossy().to_string());
        writer.write("测试批次", 101, "模拟网络错误").await.unwrap();
        writer.write("测试批次", 102, "模拟网络错误").await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("学生 101"));

        std::fs::remove_file(&path).ok();
    }
}
