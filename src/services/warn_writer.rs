//! 警告写入服务 - 业务能力层
//!
//! 只负责"写 warn.txt"能力，不关心流程

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

/// 警告写入服务
///
/// 职责：
/// - 将无法处理的课程写入 warn.txt，供人工跟进
/// - 只处理单个课程的警告
/// - 不关心流程顺序
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    /// 创建新的警告写入服务
    pub fn new() -> Self {
        Self {
            warn_file_path: "warn.txt".to_string(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    /// 写入警告信息
    ///
    /// # 参数
    /// - `lesson`: 课程标识
    /// - `reason`: 无法处理的原因
    pub async fn write(&self, lesson: &str, reason: &str) -> Result<()> {
        debug!("写入警告: 课程 {} | 原因: {}", lesson, reason);

        if let Some(parent) = std::path::Path::new(&self.warn_file_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)?;

        let warn_msg = format!("课程 {} | 原因: {}\n", lesson, reason);

        file.write_all(warn_msg.as_bytes())?;

        Ok(())
    }
}

impl Default for WarnWriter {
    fn default() -> Self {
        Self::new()
    }
}
