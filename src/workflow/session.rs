//! 会话状态 - 流程层
//!
//! 单用户、单会话、纯内存、随会话结束整体丢弃
//!
//! 会话对象由编排层显式创建，随流程以引用传递；
//! 不存在全局单例，也没有跨会话共享

use crate::error::{AppResult, SessionError};
use crate::models::item::GeneratedItem;
use crate::models::lesson::{ExtractedDocument, LessonParameters};

/// 会话状态存储
///
/// 职责：
/// - 独占持有课程参数与题目列表
/// - 题目列表只接受整体替换（不支持增量追加）
/// - 编辑只触碰单条的 edited 文本
#[derive(Debug, Default)]
pub struct SessionStore {
    document: Option<ExtractedDocument>,
    parameters: Option<LessonParameters>,
    items: Vec<GeneratedItem>,
}

impl SessionStore {
    /// 创建空会话
    pub fn new() -> Self {
        Self::default()
    }

    /// 替换提取结果（新的上传覆盖旧的，不做原地修改）
    pub fn set_extracted_document(&mut self, doc: ExtractedDocument) {
        self.document = Some(doc);
    }

    /// 当前提取结果
    pub fn document(&self) -> Option<&ExtractedDocument> {
        self.document.as_ref()
    }

    /// 替换课程参数
    ///
    /// 与文档状态相互独立；在重新生成之前不影响已生成的题目
    pub fn set_parameters(&mut self, params: LessonParameters) {
        self.parameters = Some(params);
    }

    /// 当前课程参数
    pub fn parameters(&self) -> Option<&LessonParameters> {
        self.parameters.as_ref()
    }

    /// 原子替换整个题目列表
    ///
    /// 生成结果进入会话的唯一入口
    pub fn set_generated_items(&mut self, items: Vec<GeneratedItem>) {
        self.items = items;
    }

    /// 当前题目列表
    pub fn items(&self) -> &[GeneratedItem] {
        &self.items
    }

    /// 编辑单条题目（索引从 1 开始）
    ///
    /// 只改动该条的 edited 文本；original 与其他题目保持不变
    pub fn edit_item(&mut self, index: usize, new_text: &str) -> AppResult<()> {
        if index == 0 || index > self.items.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                max_index: self.items.len(),
            }
            .into());
        }

        self.items[index - 1].edited = new_text.to_string();
        Ok(())
    }

    /// 获取当前快照（导出用的不可变视图）
    ///
    /// 尚未设置参数或尚未生成题目时拒绝导出
    pub fn snapshot(&self) -> AppResult<SessionSnapshot> {
        let parameters = self
            .parameters
            .clone()
            .ok_or(SessionError::MissingParameters)?;

        if self.items.is_empty() {
            return Err(SessionError::NoGeneratedItems.into());
        }

        Ok(SessionSnapshot {
            parameters,
            items: self.items.clone(),
        })
    }
}

/// 会话快照（参数 + 题目的不可变副本）
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub parameters: LessonParameters,
    pub items: Vec<GeneratedItem>,
}
