//! 文档解析能力 - 基础设施层
//!
//! 持有各格式的解码能力，只暴露"字节流 → 文本"的能力
//!
//! 职责：
//! - PDF / DOCX / PPTX 字节流按文档顺序提取文本
//! - 不认识 Lesson / Session
//! - 不处理业务流程

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use thiserror::Error;

/// 文档解析错误
#[derive(Debug, Error)]
pub enum ParserError {
    #[error("ZIP 解包失败: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("缺少文档主体: {0}")]
    MissingPart(String),
    #[error("XML 解析失败: {0}")]
    Xml(String),
    #[error("PDF 解析失败: {0}")]
    Pdf(String),
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 提取 PDF 文本
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ParserError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ParserError::Pdf(e.to_string()))
}

/// 提取 DOCX 文本（按段落顺序，空段落不产生占位行）
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, ParserError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|_| ParserError::MissingPart("word/document.xml".to_string()))?
        .read_to_string(&mut xml)?;

    collect_ooxml_text(&xml, b"w:t", b"w:p")
}

/// 提取 PPTX 文本（按幻灯片编号顺序）
///
/// 返回 (文本, 跳过的幻灯片数量)；单张幻灯片解析失败只跳过该张
pub fn extract_pptx_text(bytes: &[u8]) -> Result<(String, usize), ParserError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

    // slide10.xml 要排在 slide2.xml 之后，必须按编号数值排序
    let slide_re =
        Regex::new(r"^ppt/slides/slide(\d+)\.xml$").map_err(|e| ParserError::Xml(e.to_string()))?;
    let mut slides: Vec<(usize, String)> = archive
        .file_names()
        .filter_map(|name| {
            slide_re
                .captures(name)
                .and_then(|c| c[1].parse::<usize>().ok())
                .map(|n| (n, name.to_string()))
        })
        .collect();
    slides.sort_by_key(|(n, _)| *n);

    let mut text = String::new();
    let mut skipped = 0;

    for (number, name) in slides {
        let mut xml = String::new();
        archive.by_name(&name)?.read_to_string(&mut xml)?;

        match collect_ooxml_text(&xml, b"a:t", b"a:p") {
            Ok(slide_text) => {
                if !slide_text.is_empty() {
                    text.push_str(&slide_text);
                    if !text.ends_with('\n') {
                        text.push('\n');
                    }
                }
            }
            Err(e) => {
                tracing::warn!("幻灯片 {} 解析失败，已跳过: {}", number, e);
                skipped += 1;
            }
        }
    }

    Ok((text, skipped))
}

/// 从 OOXML 正文中收集文本节点
///
/// `text_tag` 内的文本原样拼接，`para_tag` 结束时补一个换行；
/// 没有文本的段落不产生任何输出
fn collect_ooxml_text(xml: &str, text_tag: &[u8], para_tag: &[u8]) -> Result<String, ParserError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == text_tag => {
                in_text = true;
            }
            Ok(Event::End(e)) => {
                let name = e.name();
                if name.as_ref() == text_tag {
                    in_text = false;
                } else if name.as_ref() == para_tag && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            Ok(Event::Text(t)) if in_text => {
                let piece = t.unescape().map_err(|e| ParserError::Xml(e.to_string()))?;
                out.push_str(&piece);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ParserError::Xml(e.to_string())),
        }
    }

    Ok(out)
}
