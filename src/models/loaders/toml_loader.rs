use crate::models::batch::AssignmentBatch;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载数据并转换为 AssignmentBatch 对象
pub async fn load_toml_to_batch(toml_file_path: &Path) -> Result<AssignmentBatch> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let mut batch: AssignmentBatch = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    // 设置文件路径
    batch.file_path = Some(toml_file_path.to_string_lossy().to_string());

    Ok(batch)
}

/// 从文件夹中加载所有 TOML 文件并转换为 AssignmentBatch 对象列表
pub async fn load_all_toml_files(folder_path: &str) -> Result<Vec<AssignmentBatch>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut batches = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            tracing::info!(
                "正在加载: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            );

            match load_toml_to_batch(&path).await {
                Ok(batch) => {
                    tracing::info!("成功加载批次 '{}'，{} 名学生", batch.name, batch.students.len());
                    batches.push(batch);
                }
                Err(e) => {
                    tracing::warn!("加载文件失败 {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_sets_file_path() {
        let dir = std::env::temp_dir().join("behavior_points_submit_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("batch.toml");
        std::fs::write(
            &file,
            r#"
            name = "测试批次"
            category_id = 5
            multiplier = 2
            students = [101, 102]
            "#,
        )
        .unwrap();

        let batch = tokio_test::block_on(load_toml_to_batch(&file)).unwrap();
        assert_eq!(batch.name, "测试批次");
        assert!(batch.file_path.as_deref().unwrap().ends_with("batch.toml"));

        std::fs::remove_file(&file).ok();
    }
}
