//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 批量课程处理器
//! - 管理应用生命周期（初始化、运行、统计）
//! - 批量加载课程计划（Vec<LessonPlan>）
//! - 控制并发数量（Semaphore）
//!
//! ### `lesson_processor` - 单个课程处理器
//! - 为单个课程创建独占的 SessionStore
//! - 创建并委托 LessonFlow
//! - 清理文件与单课程统计
//!
//! ## 层次关系
//!
//! ```text
//! app (处理 Vec<LessonPlan>)
//!     ↓
//! lesson_processor (处理单个 LessonPlan + SessionStore)
//!     ↓
//! workflow::LessonFlow (分段执行提取 → 生成 → 编辑 → 导出)
//!     ↓
//! services (能力层：extract / generate / export / warn)
//!     ↓
//! infrastructure (基础设施：doc_parser / doc_writer)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：app 管批量，lesson_processor 管单个
//! 2. **会话隔离**：SessionStore 只在单个课程任务内部存在
//! 3. **向下依赖**：编排层 → workflow → services → infrastructure
//! 4. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod app;
pub mod lesson_processor;

// 重新导出主要类型
pub use app::App;
pub use lesson_processor::process_lesson;
