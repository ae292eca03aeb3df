//! 导出服务 - 业务能力层
//!
//! 只负责"快照 → 导出产物"能力，不关心流程
//!
//! 职责：
//! - 把会话快照装配成有序行列表（标题、元数据、目标、编号题目）
//! - 委托文档写入能力构建字节流
//! - 不修改快照，也不返回部分文件
//! - 产物内容不读取时钟：同一快照重复导出得到相同的结构内容

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::infrastructure::doc_writer;
use crate::workflow::session::SessionSnapshot;

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Docx,
    Pdf,
}

impl ExportFormat {
    /// 获取文件扩展名
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// 尝试从字符串解析导出格式
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "docx" | "word" => Some(ExportFormat::Docx),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// 导出产物
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// 文件字节流
    pub bytes: Vec<u8>,
    /// 目标格式
    pub format: ExportFormat,
    /// 下载文件名
    pub filename: String,
}

/// 导出服务
pub struct Exporter;

impl Exporter {
    /// 创建新的导出服务
    pub fn new() -> Self {
        Self
    }

    /// 装配导出行
    ///
    /// 行结构固定：标题、元数据行、教学目标，然后每条题目一行（带 1 起始编号）
    pub fn assemble_lines(snapshot: &SessionSnapshot) -> Vec<String> {
        let params = &snapshot.parameters;

        let mut lines = Vec::with_capacity(snapshot.items.len() + 3);
        lines.push(params.lesson.clone());
        lines.push(format!(
            "Activity: {} | Tier: {} | Time: {} min",
            params.activity, params.tier, params.time_allocation
        ));
        lines.push(format!("Objective: {}", params.objective));

        for item in &snapshot.items {
            lines.push(format!("{}. {}", item.index, item.edited));
        }

        lines
    }

    /// 导出为 DOCX
    pub fn export_to_docx(&self, snapshot: &SessionSnapshot) -> AppResult<ExportArtifact> {
        let lines = Self::assemble_lines(snapshot);

        let bytes = doc_writer::write_docx(&lines)
            .map_err(|e| AppError::export_failed("docx", e))?;
        debug!("DOCX 导出完成: {} 字节", bytes.len());

        Ok(ExportArtifact {
            bytes,
            format: ExportFormat::Docx,
            filename: Self::filename(snapshot, ExportFormat::Docx),
        })
    }

    /// 导出为 PDF
    pub fn export_to_pdf(&self, snapshot: &SessionSnapshot) -> AppResult<ExportArtifact> {
        let lines = Self::assemble_lines(snapshot);

        let bytes = doc_writer::write_pdf(&snapshot.parameters.lesson, &lines)
            .map_err(|e| AppError::export_failed("pdf", e))?;
        debug!("PDF 导出完成: {} 字节", bytes.len());

        Ok(ExportArtifact {
            bytes,
            format: ExportFormat::Pdf,
            filename: Self::filename(snapshot, ExportFormat::Pdf),
        })
    }

    /// 按目标格式导出
    pub fn export(
        &self,
        snapshot: &SessionSnapshot,
        format: ExportFormat,
    ) -> AppResult<ExportArtifact> {
        match format {
            ExportFormat::Docx => self.export_to_docx(snapshot),
            ExportFormat::Pdf => self.export_to_pdf(snapshot),
        }
    }

    /// 导出文件名（替换文件系统保留字符）
    fn filename(snapshot: &SessionSnapshot, format: ExportFormat) -> String {
        let safe: String = snapshot
            .parameters
            .lesson
            .chars()
            .map(|c| {
                if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
                    '_'
                } else {
                    c
                }
            })
            .collect();

        format!("{}.{}", safe.trim(), format.extension())
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}
