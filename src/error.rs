use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 文档提取错误
    Extract(ExtractError),
    /// 难度目录错误
    Catalog(CatalogError),
    /// 题目生成错误
    Generate(GenerateError),
    /// 会话状态错误
    Session(SessionError),
    /// 导出错误
    Export(ExportError),
    /// LLM 服务错误
    Llm(LlmError),
    /// 文件操作错误
    File(FileError),
    /// 配置错误
    Config(ConfigError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Extract(e) => write!(f, "提取错误: {}", e),
            AppError::Catalog(e) => write!(f, "难度目录错误: {}", e),
            AppError::Generate(e) => write!(f, "生成错误: {}", e),
            AppError::Session(e) => write!(f, "会话错误: {}", e),
            AppError::Export(e) => write!(f, "导出错误: {}", e),
            AppError::Llm(e) => write!(f, "LLM错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Extract(e) => Some(e),
            AppError::Catalog(e) => Some(e),
            AppError::Generate(e) => Some(e),
            AppError::Session(e) => Some(e),
            AppError::Export(e) => Some(e),
            AppError::Llm(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 文档提取错误
#[derive(Debug)]
pub enum ExtractError {
    /// 声明的格式不受支持（扩展名不在白名单内）
    UnsupportedFormat {
        extension: String,
    },
    /// 文档解析失败
    ParseFailed {
        format: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::UnsupportedFormat { extension } => {
                write!(f, "不支持的文档格式: .{}", extension)
            }
            ExtractError::ParseFailed { format, source } => {
                write!(f, "文档解析失败 (格式: {}): {}", format, source)
            }
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::ParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 难度目录错误
///
/// 难度空间是封闭且很小的，这类错误只出现在字符串边界（TOML 标签解析）
#[derive(Debug)]
pub enum CatalogError {
    /// 未知的难度标签
    UnknownTier {
        label: String,
    },
    /// 未知的认知层级标签
    UnknownLevel {
        label: String,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::UnknownTier { label } => {
                write!(f, "未知的难度标签: {}", label)
            }
            CatalogError::UnknownLevel { label } => {
                write!(f, "未知的认知层级标签: {}", label)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// 题目生成错误
#[derive(Debug)]
pub enum GenerateError {
    /// 主题为空（既没有显式主题，也无法从提取文本推导）
    EmptyInput,
    /// 生成结果数量与认知层级数量不符（整批作废，不接受部分结果）
    WrongItemCount {
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::EmptyInput => write!(f, "主题不能为空"),
            GenerateError::WrongItemCount { expected, actual } => {
                write!(
                    f,
                    "生成结果数量不符: 期望 {} 条, 实际 {} 条",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for GenerateError {}

/// 会话状态错误
#[derive(Debug)]
pub enum SessionError {
    /// 索引超出范围（题目索引从 1 开始）
    IndexOutOfRange {
        index: usize,
        max_index: usize,
    },
    /// 尚未生成任何题目
    NoGeneratedItems,
    /// 尚未设置课程参数
    MissingParameters,
    /// 课时分配超出允许范围
    InvalidTimeAllocation {
        minutes: u32,
        min: u32,
        max: u32,
    },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::IndexOutOfRange { index, max_index } => {
                write!(f, "索引 {} 超出范围 [1, {}]", index, max_index)
            }
            SessionError::NoGeneratedItems => write!(f, "尚未生成任何题目"),
            SessionError::MissingParameters => write!(f, "尚未设置课程参数"),
            SessionError::InvalidTimeAllocation { minutes, min, max } => {
                write!(
                    f,
                    "课时分配 {} 分钟超出允许范围 [{}, {}]",
                    minutes, min, max
                )
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// 导出错误
#[derive(Debug)]
pub enum ExportError {
    /// 底层文档写入能力失败（不返回部分文件）
    Failed {
        format: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Failed { format, source } => {
                write!(f, "导出失败 (目标格式: {}): {}", format, source)
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Failed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// LLM 服务错误
#[derive(Debug)]
pub enum LlmError {
    /// API 调用失败
    ApiCallFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回结果为空
    EmptyResponse {
        model: String,
    },
    /// 返回内容为空
    EmptyContent {
        model: String,
    },
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::ApiCallFailed { model, source } => {
                write!(f, "LLM API调用失败 (模型: {}): {}", model, source)
            }
            LlmError::EmptyResponse { model } => {
                write!(f, "LLM返回结果为空 (模型: {})", model)
            }
            LlmError::EmptyContent { model } => {
                write!(f, "LLM返回内容为空 (模型: {})", model)
            }
        }
    }
}

impl std::error::Error for LlmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LlmError::ApiCallFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 文件不存在
    NotFound {
        path: String,
    },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 删除文件失败
    DeleteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 目录不存在
    DirectoryNotFound {
        path: String,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "文件不存在: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
            FileError::DeleteFailed { path, source } => {
                write!(f, "删除文件失败 ({}): {}", path, source)
            }
            FileError::TomlParseFailed { path, source } => {
                write!(f, "TOML解析失败 ({}): {}", path, source)
            }
            FileError::DirectoryNotFound { path } => write!(f, "目录不存在: {}", path),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. }
            | FileError::WriteFailed { source, .. }
            | FileError::DeleteFailed { source, .. }
            | FileError::TomlParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 环境变量解析失败
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 环境变量不存在
    EnvVarNotFound {
        var_name: String,
    },
    /// 配置值不合法
    InvalidValue {
        field: String,
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarParseFailed {
                var_name,
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "环境变量 {} 解析失败: 值 '{}' 无法转换为 {}",
                    var_name, value, expected_type
                )
            }
            ConfigError::EnvVarNotFound { var_name } => {
                write!(f, "环境变量 {} 不存在", var_name)
            }
            ConfigError::InvalidValue { field, value } => {
                write!(f, "配置项 {} 的值不合法: {}", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== 从常见错误类型转换 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// 因为 anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::Extract(err)
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::Catalog(err)
    }
}

impl From<GenerateError> for AppError {
    fn from(err: GenerateError) -> Self {
        AppError::Generate(err)
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Session(err)
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Export(err)
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::Llm(err)
    }
}

impl From<FileError> for AppError {
    fn from(err: FileError) -> Self {
        AppError::File(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建不支持格式错误
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        AppError::Extract(ExtractError::UnsupportedFormat {
            extension: extension.into(),
        })
    }

    /// 创建文档解析失败错误
    pub fn parse_failed(
        format: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Extract(ExtractError::ParseFailed {
            format: format.into(),
            source: Box::new(source),
        })
    }

    /// 创建未知难度标签错误
    pub fn unknown_tier(label: impl Into<String>) -> Self {
        AppError::Catalog(CatalogError::UnknownTier {
            label: label.into(),
        })
    }

    /// 创建索引越界错误
    pub fn index_out_of_range(index: usize, max_index: usize) -> Self {
        AppError::Session(SessionError::IndexOutOfRange { index, max_index })
    }

    /// 创建导出失败错误
    pub fn export_failed(
        format: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Export(ExportError::Failed {
            format: format.into(),
            source: Box::new(source),
        })
    }

    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
