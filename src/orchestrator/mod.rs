//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量提交处理器
//! - 管理应用生命周期（初始化、运行、清理）
//! - 批量加载批次（Vec<AssignmentBatch>）
//! - 控制并发数量（Semaphore）
//! - 管理共享资源（BehaviorClient、目录缓存）
//! - 输出全局统计信息
//!
//! ### `assignment_processor` - 单个批次处理器
//! - 解析行为类别和学生名单
//! - 创建并委托 AwardFlow
//! - 清理文件
//! - 输出单个批次的统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<AssignmentBatch>)
//!     ↓
//! assignment_processor (处理单个 AssignmentBatch)
//!     ↓
//! workflow::AwardFlow (提交一个批次的全部加分记录)
//!     ↓
//! services (能力层：award / catalog / warn)
//!     ↓
//! api + clients (基础设施：HTTP 客户端)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管批量，assignment_processor 管单个
//! 2. **资源隔离**：只有编排层持有 BehaviorClient 和目录缓存
//! 3. **向下依赖**：编排层 → workflow → services → api
//! 4. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod assignment_processor;
pub mod batch_processor;

// 重新导出主要类型
pub use assignment_processor::process_assignment;
pub use batch_processor::App;
