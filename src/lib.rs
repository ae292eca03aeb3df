//! # Lesson Question Gen
//!
//! 一个按布鲁姆分类法批量生成课程题目并导出文档的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有文档编解码能力，只暴露能力
//! - `doc_parser` - 字节流 → 文本（PDF / DOCX / PPTX）
//! - `doc_writer` - 行列表 → 字节流（DOCX / PDF）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个输入
//! - `ContentExtractor` - 提取与规范化能力
//! - `ContentGenerator` - 生成能力（StaticTemplate / ModelBacked 两种策略）
//! - `Exporter` - 快照 → 导出产物能力
//! - `WarnWriter` - 写 warn.txt 能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个课程"的完整处理流程
//! - `SessionStore` - 会话状态（参数 + 提取结果 + 题目列表）
//! - `LessonCtx` - 上下文封装（课程标识 + 批量索引）
//! - `LessonFlow` - 流程编排（提取 → 生成 → 编辑 → 导出 → warn）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 批量课程处理器，管理生命周期和并发
//! - `orchestrator/lesson_processor` - 单个课程处理器，持有会话
//!
//! ## 模块结构

pub mod catalog;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{CognitiveLevel, GeneratedItem, ItemKind, LessonParameters, LessonPlan, Tier};
pub use orchestrator::{process_lesson, App};
pub use services::{ContentExtractor, ContentGenerator, ExportFormat, Exporter};
pub use workflow::{LessonCtx, LessonFlow, ProcessResult, SessionSnapshot, SessionStore};
