use serde::{Deserialize, Serialize};

use crate::error::{AppResult, CatalogError, SessionError};
use crate::models::tier::Tier;

/// 课时分配下限（分钟）
pub const TIME_ALLOCATION_MIN: u32 = 10;
/// 课时分配上限（分钟）
pub const TIME_ALLOCATION_MAX: u32 = 60;

/// 源文档格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    Pdf,
    Docx,
    Pptx,
    Epub,
}

impl SourceFormat {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            SourceFormat::Pdf => "pdf",
            SourceFormat::Docx => "docx",
            SourceFormat::Pptx => "pptx",
            SourceFormat::Epub => "epub",
        }
    }

    /// 从文件扩展名解析格式（白名单之外返回 None，由调用方决定如何失败）
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(SourceFormat::Pdf),
            "docx" => Some(SourceFormat::Docx),
            "pptx" => Some(SourceFormat::Pptx),
            "epub" => Some(SourceFormat::Epub),
            _ => None,
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 提取状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionStatus {
    /// 全部文本提取成功
    Ok,
    /// 部分内容无法解析，已跳过
    Partial,
    /// 格式已声明但不支持提取（如 epub），文本为空
    Unsupported,
}

/// 提取结果
///
/// 每次上传动作创建一次，创建后不可变；新的上传产生新对象而不是原地修改
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// 提取出的纯文本（可能为空）
    pub text: String,
    /// 源格式
    pub format: SourceFormat,
    /// 提取状态
    pub status: ExtractionStatus,
}

impl ExtractedDocument {
    /// 第一个非空行（用于在缺少显式主题时推导主题）
    pub fn first_content_line(&self) -> Option<&str> {
        self.text.lines().map(str::trim).find(|l| !l.is_empty())
    }
}

/// 课程参数
///
/// 由会话持有；在重新生成之前的修改不影响已生成的题目
#[derive(Debug, Clone, Serialize)]
pub struct LessonParameters {
    /// 课程标识（同时用作导出文件名与标题行）
    pub lesson: String,
    /// 活动/周次标识
    pub activity: String,
    /// 难度层级
    pub tier: Tier,
    /// 课时分配（分钟，[10, 60]）
    pub time_allocation: u32,
    /// 教学目标（自由文本）
    pub objective: String,
}

impl LessonParameters {
    /// 从课程计划构建参数，难度标签与课时分配在此处校验
    pub fn from_plan(plan: &LessonPlan) -> AppResult<Self> {
        let tier = Tier::find(&plan.tier).ok_or_else(|| CatalogError::UnknownTier {
            label: plan.tier.clone(),
        })?;

        if !(TIME_ALLOCATION_MIN..=TIME_ALLOCATION_MAX).contains(&plan.time_allocation) {
            return Err(SessionError::InvalidTimeAllocation {
                minutes: plan.time_allocation,
                min: TIME_ALLOCATION_MIN,
                max: TIME_ALLOCATION_MAX,
            }
            .into());
        }

        Ok(Self {
            lesson: plan.lesson.clone(),
            activity: plan.activity.clone(),
            tier,
            time_allocation: plan.time_allocation,
            objective: plan.objective.clone(),
        })
    }
}

/// 用户编辑记录（代替交互式编辑步骤的 TOML 形式）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditEntry {
    /// 题目索引（从 1 开始）
    pub index: usize,
    /// 编辑后的文本
    pub text: String,
}

/// 课程计划（磁盘上的工作单元，一个 TOML 文件对应一个课程）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonPlan {
    pub lesson: String,
    pub activity: String,
    pub tier: String,
    #[serde(default = "default_time_allocation")]
    pub time_allocation: u32,
    #[serde(default)]
    pub objective: String,
    /// 显式主题；缺省时从提取文本的第一行推导
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// 源文档路径或 http(s) 地址
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// 生成种类（question 或 activity）
    #[serde(default = "default_kind")]
    pub kind: String,
    #[serde(default)]
    pub edits: Vec<EditEntry>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

fn default_time_allocation() -> u32 {
    40
}

fn default_kind() -> String {
    "question".to_string()
}

impl LessonPlan {
    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}
