//! 文档写入能力 - 基础设施层
//!
//! 持有各格式的编码能力，只暴露"行列表 → 字节流"的能力
//!
//! 职责：
//! - 将有序文本行写成 DOCX / PDF 字节流
//! - 页面布局与字体由本层决定
//! - 不认识 Lesson / Session

use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use thiserror::Error;

/// 文档写入错误
#[derive(Debug, Error)]
pub enum WriterError {
    #[error("DOCX 打包失败: {0}")]
    Docx(String),
    #[error("PDF 构建失败: {0}")]
    Pdf(String),
}

/// 将行列表写成 DOCX 字节流（第一行作为标题，加粗居中）
pub fn write_docx(lines: &[String]) -> Result<Vec<u8>, WriterError> {
    let mut docx = Docx::new();

    for (i, line) in lines.iter().enumerate() {
        let paragraph = if i == 0 {
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(Run::new().add_text(line.as_str()).size(32).bold())
        } else {
            Paragraph::new().add_run(Run::new().add_text(line.as_str()).size(24))
        };
        docx = docx.add_paragraph(paragraph);
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| WriterError::Docx(e.to_string()))?;

    Ok(cursor.into_inner())
}

/// 将行列表写成 PDF 字节流（第一行作为标题）
///
/// 内置字体只覆盖 WinAnsi 编码，正文内容需使用拉丁字符
pub fn write_pdf(title: &str, lines: &[String]) -> Result<Vec<u8>, WriterError> {
    let (doc, first_page, first_layer) = PdfDocument::new(title, Mm(210.0), Mm(297.0), "Layer 1");

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| WriterError::Pdf(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| WriterError::Pdf(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = 277.0;

    for (i, line) in lines.iter().enumerate() {
        let is_title = i == 0;
        for chunk in wrap_line(line, 90) {
            if y < 20.0 {
                let (page, page_layer) = doc.add_page(Mm(210.0), Mm(297.0), "Layer 1");
                layer = doc.get_page(page).get_layer(page_layer);
                y = 277.0;
            }

            if is_title {
                layer.use_text(chunk, 16.0, Mm(20.0), Mm(y), &font_bold);
                y -= 10.0;
            } else {
                layer.use_text(chunk, 11.0, Mm(20.0), Mm(y), &font);
                y -= 6.0;
            }
        }
    }

    doc.save_to_bytes().map_err(|e| WriterError::Pdf(e.to_string()))
}

/// 按最大字符数折行（在空白处断开，超长单词整体占一行）
fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    if line.chars().count() <= max_chars {
        return vec![line.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_chars {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
