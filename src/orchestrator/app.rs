//! 批量课程处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量课程的处理和资源管理。
//!
//! 1. **应用初始化**：启动日志、校验生成策略配置
//! 2. **批量加载**：扫描并加载所有待处理的课程计划（`Vec<LessonPlan>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将课程分批次处理，每批完成后再开始下一批
//! 5. **全局统计**：汇总所有课程的处理结果
//!
//! 每个课程在自己的任务里持有独占的 SessionStore，
//! 批量并发发生在会话之上，不存在跨任务共享的会话状态

use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, warn};

use crate::config::Config;
use crate::models::lesson::LessonPlan;
use crate::orchestrator::lesson_processor;
use crate::services::ContentGenerator;
use crate::utils::logging::{
    init_log_file, log_batch_complete, log_batch_start, log_lessons_loaded, log_startup,
    print_final_stats,
};

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        // 提前校验生成策略配置，避免逐课程才失败
        ContentGenerator::from_config(&config)?;

        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 加载所有待处理的课程计划
        let all_plans = self.load_lessons().await?;

        if all_plans.is_empty() {
            warn!("⚠️ 没有找到待处理的TOML文件，程序结束");
            return Ok(());
        }

        let total_lessons = all_plans.len();
        log_lessons_loaded(total_lessons, self.config.max_concurrent_lessons);

        // 处理所有课程
        let stats = self.process_all_lessons(all_plans).await?;

        // 输出最终统计
        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(())
    }

    /// 加载课程计划
    async fn load_lessons(&self) -> Result<Vec<LessonPlan>> {
        tracing::info!("\n📁 正在扫描待处理的课程计划...");
        crate::models::load_all_toml_files(&self.config.lesson_folder).await
    }

    /// 处理所有课程
    async fn process_all_lessons(&self, all_plans: Vec<LessonPlan>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_lessons));
        let total_lessons = all_plans.len();
        let mut stats = ProcessingStats {
            total: total_lessons,
            ..Default::default()
        };

        // 分批处理
        for batch_start in (0..total_lessons).step_by(self.config.max_concurrent_lessons) {
            let batch_end = (batch_start + self.config.max_concurrent_lessons).min(total_lessons);
            let batch_plans = &all_plans[batch_start..batch_end];
            let batch_num = (batch_start / self.config.max_concurrent_lessons) + 1;
            let total_batches = (total_lessons + self.config.max_concurrent_lessons - 1)
                / self.config.max_concurrent_lessons;

            log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_end,
                total_lessons,
            );

            // 处理本批
            let (success, failed) = self
                .process_batch(batch_plans, batch_start, semaphore.clone())
                .await?;

            stats.success += success;
            stats.failed += failed;

            log_batch_complete(batch_num, success, success + failed);
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch_plans: &[LessonPlan],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<(usize, usize)> {
        let mut batch_handles = Vec::new();

        // 为本批创建并发任务
        for (idx, plan) in batch_plans.iter().enumerate() {
            let lesson_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            let plan_clone = plan.clone();
            let config_clone = self.config.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                match lesson_processor::process_lesson(plan_clone, lesson_index, &config_clone)
                    .await
                {
                    Ok(success) => Ok(success),
                    Err(e) => {
                        error!("[课程 {}] ❌ 处理过程中发生错误: {}", lesson_index, e);
                        Err(e)
                    }
                }
            });
            batch_handles.push((lesson_index, handle));
        }

        // 等待本批所有任务完成
        let mut success = 0;
        let mut failed = 0;

        for (lesson_index, handle) in batch_handles {
            match handle.await {
                Ok(Ok(true)) => {
                    success += 1;
                }
                Ok(Ok(false)) | Ok(Err(_)) => {
                    failed += 1;
                }
                Err(e) => {
                    error!("[课程 {}] 任务执行失败: {}", lesson_index, e);
                    failed += 1;
                }
            }
        }

        Ok((success, failed))
    }
}
