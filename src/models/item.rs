use serde::{Deserialize, Serialize};

/// 生成种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// 问题
    Question,
    /// 活动
    Activity,
}

impl ItemKind {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            ItemKind::Question => "question",
            ItemKind::Activity => "activity",
        }
    }

    /// 尝试从字符串解析生成种类
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "question" | "问题" | "题目" => Some(ItemKind::Question),
            "activity" | "活动" => Some(ItemKind::Activity),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 单条生成结果
///
/// original 一经生成不再变化；edited 初始等于 original，只随用户编辑变化
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedItem {
    /// 序号（从 1 开始，稳定不变）
    pub index: usize,
    /// 生成种类
    pub kind: ItemKind,
    /// 原始文本
    pub original: String,
    /// 编辑后文本
    pub edited: String,
}

impl GeneratedItem {
    /// 创建新的生成结果（编辑文本初始化为原始文本）
    pub fn new(index: usize, kind: ItemKind, original: impl Into<String>) -> Self {
        let original = original.into();
        Self {
            index,
            kind,
            edited: original.clone(),
            original,
        }
    }

    /// 是否被用户编辑过
    pub fn is_edited(&self) -> bool {
        self.edited != self.original
    }
}

impl std::fmt::Display for GeneratedItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 截断内容以便显示（最多80个字符）
        let preview = if self.edited.chars().count() > 80 {
            self.edited.chars().take(80).collect::<String>() + "..."
        } else {
            self.edited.clone()
        };

        write!(f, "{}. {}", self.index, preview)
    }
}
