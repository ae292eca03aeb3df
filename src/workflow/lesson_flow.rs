//! 课程处理流程 - 流程层
//!
//! 核心职责：定义"一个课程"的完整处理流程
//!
//! 流程顺序（严格分段，前一段完成才进入下一段）：
//! 1. 参数校验 → 写入会话
//! 2. 源文档提取（可选）→ 写入会话
//! 3. 主题解析 → 生成 → 原子替换题目列表
//! 4. 应用编辑 → 快照 → 逐格式导出
//! 5. warn.txt（兜底）

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::models::item::{GeneratedItem, ItemKind};
use crate::models::lesson::{ExtractedDocument, ExtractionStatus, LessonParameters, LessonPlan};
use crate::services::{ContentExtractor, ContentGenerator, ExportFormat, Exporter, WarnWriter};
use crate::utils::logging::truncate_text;
use crate::workflow::lesson_ctx::LessonCtx;
use crate::workflow::session::{SessionSnapshot, SessionStore};

/// 课程处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    /// 处理成功
    Success,
    /// 跳过（参数不合法 / 主题为空 / 生成或导出失败）
    Skipped,
}

/// 课程处理流程

/// - 编排完整的课程处理流程
/// - 决定何时提取、何时生成、何时兜底
/// - 不持有会话（会话由编排层创建并传引用）
/// - 只依赖业务能力（services）
pub struct LessonFlow {
    extractor: ContentExtractor,
    generator: ContentGenerator,
    exporter: Exporter,
    warn_writer: WarnWriter,
    export_folder: String,
    export_formats: String,
    verbose_logging: bool,
}

impl LessonFlow {
    /// 创建新的课程处理流程
    pub fn new(config: &Config) -> Result<Self> {
        let warn_path = std::path::Path::new(&config.export_folder).join("warn.txt");

        Ok(Self {
            extractor: ContentExtractor::new(),
            generator: ContentGenerator::from_config(config)?,
            exporter: Exporter::new(),
            warn_writer: WarnWriter::with_path(warn_path.to_string_lossy().to_string()),
            export_folder: config.export_folder.clone(),
            export_formats: config.export_formats.clone(),
            verbose_logging: config.verbose_logging,
        })
    }

    pub async fn run(
        &self,
        session: &mut SessionStore,
        plan: &LessonPlan,
        ctx: &LessonCtx,
    ) -> Result<ProcessResult> {
        // ========== 阶段 1: 课程参数 ==========
        let params = match LessonParameters::from_plan(plan) {
            Ok(p) => p,
            Err(e) => {
                warn!("[课程 {}] ⚠️ 参数不合法: {}", ctx.lesson_index, e);
                self.write_warn(ctx, &format!("参数不合法: {}", e)).await?;
                return Ok(ProcessResult::Skipped);
            }
        };
        let tier = params.tier;
        session.set_parameters(params);

        // ========== 阶段 2: 源文档提取（可选） ==========
        if let Some(source) = plan.source.as_deref() {
            info!("[课程 {}] 📁 正在提取源文档: {}", ctx.lesson_index, source);

            match self.extract_source(source).await {
                Ok(doc) => {
                    if doc.status == ExtractionStatus::Unsupported {
                        warn!(
                            "[课程 {}] ⚠️ 源格式 {} 暂不支持提取，仅保留显式主题",
                            ctx.lesson_index, doc.format
                        );
                    } else {
                        info!(
                            "[课程 {}] ✓ 提取完成: {} 字符 (状态: {:?})",
                            ctx.lesson_index,
                            doc.text.len(),
                            doc.status
                        );
                    }
                    session.set_extracted_document(doc);
                }
                Err(e) => {
                    // 提取失败不写入任何会话状态
                    error!("[课程 {}] ❌ 源文档提取失败: {}", ctx.lesson_index, e);
                    self.write_warn(ctx, &format!("提取失败: {}", e)).await?;
                    return Ok(ProcessResult::Skipped);
                }
            }
        }

        // ========== 阶段 3: 主题解析与生成 ==========
        let topic = match self.resolve_topic(plan, session) {
            Some(t) => t,
            None => {
                warn!(
                    "[课程 {}] ⚠️ 没有显式主题，也无法从源文本推导，写入 warn.txt",
                    ctx.lesson_index
                );
                self.write_warn(ctx, "主题为空").await?;
                return Ok(ProcessResult::Skipped);
            }
        };

        let kind = ItemKind::from_str(&plan.kind).unwrap_or(ItemKind::Question);
        info!(
            "[课程 {}] 🧩 开始生成: 主题「{}」难度 {} 种类 {} (策略: {})",
            ctx.lesson_index,
            truncate_text(&topic, 40),
            tier,
            kind,
            self.generator.name()
        );

        let items = match self.generator.generate(&topic, tier, kind).await {
            Ok(items) => items,
            Err(e) => {
                // 生成失败时旧列表保持原样（原子替换语义）
                error!("[课程 {}] ❌ 生成失败: {}", ctx.lesson_index, e);
                self.write_warn(ctx, &format!("生成失败: {}", e)).await?;
                return Ok(ProcessResult::Skipped);
            }
        };

        info!("[课程 {}] ✓ 生成完成，共 {} 条", ctx.lesson_index, items.len());
        session.set_generated_items(items);

        if self.verbose_logging {
            self.log_items(ctx.lesson_index, session.items());
        }

        // ========== 阶段 4: 应用编辑 ==========
        for edit in &plan.edits {
            match session.edit_item(edit.index, &edit.text) {
                Ok(()) => {
                    info!("[课程 {}] ✏️ 已编辑第 {} 条", ctx.lesson_index, edit.index);
                }
                Err(e) => {
                    warn!("[课程 {}] ⚠️ 编辑被拒绝: {}", ctx.lesson_index, e);
                }
            }
        }

        // ========== 阶段 5: 快照与导出 ==========
        let snapshot = session.snapshot()?;
        let exported = self.export_all(&snapshot, ctx).await?;

        if exported == 0 {
            self.write_warn(ctx, "没有成功的导出格式").await?;
            return Ok(ProcessResult::Skipped);
        }

        Ok(ProcessResult::Success)
    }

    /// 读取源文档字节流（本地路径或 http(s) 地址）并提取
    async fn extract_source(&self, source: &str) -> Result<ExtractedDocument> {
        let format = ContentExtractor::declared_format(source)?;

        let bytes = if source.starts_with("http://") || source.starts_with("https://") {
            reqwest::get(source)
                .await?
                .error_for_status()?
                .bytes()
                .await?
                .to_vec()
        } else {
            tokio::fs::read(source)
                .await
                .map_err(|e| AppError::file_read_failed(source, e))?
        };

        Ok(self.extractor.extract(&bytes, format)?)
    }

    /// 解析主题：显式主题优先，否则取提取文本的第一个非空行
    fn resolve_topic(&self, plan: &LessonPlan, session: &SessionStore) -> Option<String> {
        if let Some(topic) = plan.topic.as_deref() {
            let topic = topic.trim();
            if !topic.is_empty() {
                return Some(topic.to_string());
            }
        }

        session
            .document()
            .and_then(|doc| doc.first_content_line())
            .map(|line| truncate_text(line, 80))
    }

    /// 导出所有配置格式
    ///
    /// 返回成功写盘的数量；单个格式失败不影响其他格式
    async fn export_all(&self, snapshot: &SessionSnapshot, ctx: &LessonCtx) -> Result<usize> {
        let formats: Vec<ExportFormat> = self
            .export_formats
            .split(',')
            .filter_map(ExportFormat::from_str)
            .collect();

        if formats.is_empty() {
            warn!(
                "[课程 {}] ⚠️ 导出格式列表无法解析: {}",
                ctx.lesson_index, self.export_formats
            );
            return Ok(0);
        }

        tokio::fs::create_dir_all(&self.export_folder).await?;

        // 逐格式构建产物；失败的格式不产生文件
        let artifacts = formats
            .iter()
            .filter_map(|format| match self.exporter.export(snapshot, *format) {
                Ok(artifact) => Some(artifact),
                Err(e) => {
                    error!("[课程 {}] ❌ {}", ctx.lesson_index, e);
                    None
                }
            })
            .collect::<Vec<_>>();

        // 并发写盘
        let writes = artifacts.into_iter().map(|artifact| {
            let folder = self.export_folder.clone();
            async move {
                let path = std::path::Path::new(&folder).join(&artifact.filename);
                let size = artifact.bytes.len();
                tokio::fs::write(&path, &artifact.bytes)
                    .await
                    .map(|_| (artifact.filename, size))
            }
        });

        let mut exported = 0;
        for result in futures::future::join_all(writes).await {
            match result {
                Ok((filename, size)) => {
                    info!(
                        "[课程 {}] 📤 已导出 {} ({} 字节)",
                        ctx.lesson_index, filename, size
                    );
                    exported += 1;
                }
                Err(e) => {
                    error!("[课程 {}] ❌ 写入导出文件失败: {}", ctx.lesson_index, e);
                }
            }
        }

        Ok(exported)
    }

    /// 写入警告日志
    async fn write_warn(&self, ctx: &LessonCtx, reason: &str) -> Result<()> {
        self.warn_writer.write(&ctx.lesson, reason).await?;

        warn!(
            "[课程 {}] ⚠️ 已写入 warn.txt (原因: {})",
            ctx.lesson_index, reason
        );

        Ok(())
    }

    // ========== 日志辅助方法 ==========

    /// 显示生成结果预览
    fn log_items(&self, lesson_index: usize, items: &[GeneratedItem]) {
        for item in items.iter().take(3) {
            info!("[课程 {}]   {}", lesson_index, item);
        }
    }
}
