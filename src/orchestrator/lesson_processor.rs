//! 单个课程处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责处理单个课程计划，是课程级别的编排器。
//!
//! 1. **会话生命周期**：为本课程创建 SessionStore，处理结束整体丢弃
//! 2. **流程调度**：创建 LessonFlow 并委托执行
//! 3. **文件清理**：按配置删除已处理的 TOML 文件
//! 4. **统计输出**：记录单个课程的处理结果

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::models::lesson::LessonPlan;
use crate::workflow::{LessonCtx, LessonFlow, ProcessResult, SessionStore};

/// 处理单个课程
///
/// # 参数
/// - `plan`: 课程计划
/// - `lesson_index`: 课程索引（用于日志）
/// - `config`: 配置
///
/// # 返回
/// 返回是否成功处理
pub async fn process_lesson(plan: LessonPlan, lesson_index: usize, config: &Config) -> Result<bool> {
    log_lesson_start(lesson_index, &plan);

    // 创建流程对象与本课程独占的会话
    let flow = LessonFlow::new(config)?;
    let mut session = SessionStore::new();
    let ctx = LessonCtx::new(plan.lesson.clone(), lesson_index);

    // 执行流程（委托给 LessonFlow）
    let success = match flow.run(&mut session, &plan, &ctx).await {
        Ok(ProcessResult::Success) => {
            info!("[课程 {}] ✅ 课程处理完成", lesson_index);
            true
        }
        Ok(ProcessResult::Skipped) => {
            warn!("[课程 {}] ⚠️ 课程已跳过", lesson_index);
            false
        }
        Err(e) => {
            error!("[课程 {}] ❌ 处理过程中发生错误: {}", lesson_index, e);
            false
        }
    };

    // 清理文件（仅在成功且配置开启时）
    if config.cleanup_processed && success {
        cleanup_file(plan.file_path.as_deref(), lesson_index)?;
    }

    log_lesson_complete(lesson_index, success, session.items().len());

    Ok(success)
}

/// 清理已处理的文件
fn cleanup_file(file_path: Option<&str>, lesson_index: usize) -> Result<()> {
    info!("[课程 {}] 🗑️ 清理已处理的文件...", lesson_index);

    if let Some(file_path) = file_path {
        if Path::new(file_path).exists() {
            fs::remove_file(file_path).with_context(|| format!("无法删除文件: {}", file_path))?;
            info!(
                "[课程 {}] ✓ 文件已删除: {}",
                lesson_index,
                Path::new(file_path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            );
        } else {
            warn!("[课程 {}] ⚠️ 文件不存在: {}", lesson_index, file_path);
        }
    } else {
        warn!("[课程 {}] ⚠️ 文件路径未设置", lesson_index);
    }

    Ok(())
}

// ========== 日志辅助函数 ==========

fn log_lesson_start(lesson_index: usize, plan: &LessonPlan) {
    info!("\n[课程 {}] {}", lesson_index, "─".repeat(30));
    info!("[课程 {}] 开始处理", lesson_index);
    info!("[课程 {}] 课程: {}", lesson_index, plan.lesson);
    info!("[课程 {}] 活动: {}", lesson_index, plan.activity);
    info!("[课程 {}] 难度: {}", lesson_index, plan.tier);
}

fn log_lesson_complete(lesson_index: usize, success: bool, item_count: usize) {
    info!(
        "[课程 {}] 处理结束: {} (题目 {} 条)\n",
        lesson_index,
        if success { "成功" } else { "未完成" },
        item_count
    );
}
