//! # Behavior Points Submit
//!
//! 一个用于批量提交学生行为积分的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Api / Clients）
//! - `api/` - 底层 HTTP 交互：响应信封、频率限制重试
//! - `clients/` - `BehaviorClient`，类型化的行为积分 API 客户端
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个能力
//! - `award_service` - 校验 / 构建 / 并发提交加分记录
//! - `CatalogService` - 类别与名单的会话缓存（显式失效）
//! - `WarnWriter` - 写 warn.txt 能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个批次"的完整提交流程
//! - `BatchCtx` - 上下文封装（批次名称 + 类别 + 倍数）
//! - `AwardFlow` - 流程编排（校验 → 提交 → 对账 → warn）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量提交处理器，管理资源和并发
//! - `orchestrator/assignment_processor` - 单个批次处理器，解析目录和名单
//!
//! ## 模块结构

pub mod api;
pub mod clients;
pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::BehaviorClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AssignmentBatch, BehaviorCategory, PointAward, Selection, Student};
pub use orchestrator::{process_assignment, App};
pub use services::{AwardTally, CancelToken, CatalogService};
pub use utils::logging;
pub use workflow::{AwardFlow, BatchCtx, BatchOutcome};
