//! 内容提取服务 - 业务能力层
//!
//! 只负责"字节流 → 提取结果"能力，不关心流程
//!
//! 职责：
//! - 按声明格式分发到对应的解析能力
//! - 规范化提取文本（压缩空行、去行尾空白）
//! - 只处理单个文档
//! - 不写入会话状态（由调用方决定是否保存）

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::infrastructure::doc_parser;
use crate::models::lesson::{ExtractedDocument, ExtractionStatus, SourceFormat};

/// 内容提取服务
pub struct ContentExtractor;

impl ContentExtractor {
    /// 创建新的内容提取服务
    pub fn new() -> Self {
        Self
    }

    /// 从文件名判定声明格式
    ///
    /// 白名单之外的扩展名直接拒绝（fail closed）
    pub fn declared_format(filename: &str) -> AppResult<SourceFormat> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        SourceFormat::from_extension(extension)
            .ok_or_else(|| AppError::unsupported_format(extension))
    }

    /// 提取文档文本
    ///
    /// # 参数
    /// - `bytes`: 文档字节流
    /// - `format`: 声明格式
    ///
    /// # 返回
    /// 返回提取结果；epub 返回 Unsupported 状态 + 空文本而不是错误
    pub fn extract(&self, bytes: &[u8], format: SourceFormat) -> AppResult<ExtractedDocument> {
        match format {
            SourceFormat::Pdf => {
                let text = doc_parser::extract_pdf_text(bytes)
                    .map_err(|e| AppError::parse_failed(format.name(), e))?;
                debug!("PDF 提取完成: {} 字符", text.len());

                Ok(ExtractedDocument {
                    text: self.normalize(&text)?,
                    format,
                    status: ExtractionStatus::Ok,
                })
            }
            SourceFormat::Docx => {
                let text = doc_parser::extract_docx_text(bytes)
                    .map_err(|e| AppError::parse_failed(format.name(), e))?;
                debug!("DOCX 提取完成: {} 字符", text.len());

                Ok(ExtractedDocument {
                    text: self.normalize(&text)?,
                    format,
                    status: ExtractionStatus::Ok,
                })
            }
            SourceFormat::Pptx => {
                let (text, skipped) = doc_parser::extract_pptx_text(bytes)
                    .map_err(|e| AppError::parse_failed(format.name(), e))?;
                debug!("PPTX 提取完成: {} 字符, 跳过 {} 张幻灯片", text.len(), skipped);

                let status = if skipped > 0 {
                    ExtractionStatus::Partial
                } else {
                    ExtractionStatus::Ok
                };

                Ok(ExtractedDocument {
                    text: self.normalize(&text)?,
                    format,
                    status,
                })
            }
            SourceFormat::Epub => {
                // epub 是明确的非目标：格式合法但不做提取
                warn!("epub 格式暂不支持提取，返回空文本");
                Ok(ExtractedDocument {
                    text: String::new(),
                    format,
                    status: ExtractionStatus::Unsupported,
                })
            }
        }
    }

    /// 规范化提取文本
    fn normalize(&self, text: &str) -> AppResult<String> {
        let trailing =
            Regex::new(r"[ \t]+\n").map_err(|e| AppError::Other(e.to_string()))?;
        let blank_runs = Regex::new(r"\n{3,}").map_err(|e| AppError::Other(e.to_string()))?;

        let text = trailing.replace_all(text, "\n");
        let text = blank_runs.replace_all(&text, "\n\n");

        Ok(text.trim().to_string())
    }
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new()
    }
}
