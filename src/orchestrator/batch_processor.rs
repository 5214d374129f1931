//! 批量提交处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批次文件的批量处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、创建 API 客户端、预热类别目录
//! 2. **批量加载**：扫描并加载所有待提交的批次（`Vec<AssignmentBatch>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分轮处理**：将批次分轮次处理，每轮完成后再开始下一轮
//! 5. **资源管理**：持有 BehaviorClient 和目录缓存，确保生命周期正确
//! 6. **全局统计**：汇总所有批次的提交结果

use crate::clients::BehaviorClient;
use crate::config::Config;
use crate::models::AssignmentBatch;
use crate::orchestrator::assignment_processor;
use crate::services::CatalogService;
use crate::utils::logging;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, warn};

/// 应用主结构
pub struct App {
    config: Config,
    client: BehaviorClient,
    catalog: Arc<CatalogService>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)?;

        logging::log_startup(config.max_concurrent_batches);

        // 创建 API 客户端
        let client = BehaviorClient::new(&config)?;

        // 预热类别目录（连不上服务端时尽早失败）
        let catalog = Arc::new(CatalogService::new());
        catalog.categories(&client).await?;

        Ok(Self {
            config,
            client,
            catalog,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 加载所有待提交的批次
        let all_batches = self.load_batches().await?;

        if all_batches.is_empty() {
            warn!("⚠️ 没有找到待提交的TOML文件，程序结束");
            return Ok(());
        }

        let total_batches = all_batches.len();
        logging::log_batches_loaded(total_batches, self.config.max_concurrent_batches);

        // 处理所有批次
        let stats = self.process_all_batches(all_batches).await?;

        // 输出最终统计
        logging::print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            stats.students_awarded,
            &self.config.output_log_file,
        );

        Ok(())
    }

    /// 加载批次
    async fn load_batches(&self) -> Result<Vec<AssignmentBatch>> {
        tracing::info!("\n📁 正在扫描待提交的批次...");
        crate::models::load_all_toml_files(&self.config.batch_folder).await
    }

    /// 处理所有批次
    async fn process_all_batches(&self, all_batches: Vec<AssignmentBatch>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_batches));
        let total_batches = all_batches.len();
        let mut stats = ProcessingStats {
            total: total_batches,
            ..Default::default()
        };

        // 分轮处理
        for wave_start in (0..total_batches).step_by(self.config.max_concurrent_batches) {
            let wave_end = (wave_start + self.config.max_concurrent_batches).min(total_batches);
            let wave_batches = &all_batches[wave_start..wave_end];
            let wave_num = (wave_start / self.config.max_concurrent_batches) + 1;
            let total_waves = (total_batches + self.config.max_concurrent_batches - 1)
                / self.config.max_concurrent_batches;

            logging::log_wave_start(
                wave_num,
                total_waves,
                wave_start + 1,
                wave_end,
                total_batches,
            );

            // 处理本轮
            let wave_result = self
                .process_wave(wave_batches, wave_start, semaphore.clone())
                .await?;

            stats.success += wave_result.success;
            stats.failed += wave_result.failed;
            stats.students_awarded += wave_result.students_awarded;

            logging::log_wave_complete(
                wave_num,
                wave_result.success,
                wave_result.success + wave_result.failed,
            );
        }

        Ok(stats)
    }

    /// 处理单轮批次
    async fn process_wave(
        &self,
        wave_batches: &[AssignmentBatch],
        wave_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<WaveResult> {
        let mut wave_handles = Vec::new();

        // 为本轮创建并发任务
        for (idx, batch) in wave_batches.iter().enumerate() {
            let batch_index = wave_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            // 注意：BehaviorClient 可以安全地 clone，
            // 因为 reqwest 的 Client 内部使用 Arc 共享连接池
            let client = self.client.clone();
            let catalog = self.catalog.clone();

            let batch_clone = batch.clone();
            let config_clone = self.config.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                match assignment_processor::process_assignment(
                    &client,
                    &catalog,
                    batch_clone,
                    batch_index,
                    &config_clone,
                )
                .await
                {
                    Ok(tally) => Ok(tally),
                    Err(e) => {
                        error!("[批次 {}] ❌ 处理过程中发生错误: {}", batch_index, e);
                        Err(e)
                    }
                }
            });
            wave_handles.push((batch_index, handle));
        }

        // 等待本轮所有任务完成
        let mut result = WaveResult::default();

        for (batch_index, handle) in wave_handles {
            match handle.await {
                Ok(Ok(tally)) => {
                    result.students_awarded += tally.success;
                    if tally.failed == 0 {
                        result.success += 1;
                    } else {
                        result.failed += 1;
                    }
                }
                Ok(Err(_)) => {
                    result.failed += 1;
                }
                Err(e) => {
                    error!("[批次 {}] 任务执行失败: {}", batch_index, e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
    students_awarded: usize,
}

/// 轮次处理结果
#[derive(Debug, Default)]
struct WaveResult {
    success: usize,
    failed: usize,
    students_awarded: usize,
}
