//! 课程处理上下文
//!
//! 封装"我正在处理第几个课程"这一信息

use std::fmt::Display;

/// 课程处理上下文
///
/// 包含处理单个课程所需的所有上下文信息
#[derive(Debug, Clone)]
pub struct LessonCtx {
    /// 课程标识
    pub lesson: String,

    /// 课程索引（仅用于日志显示）
    pub lesson_index: usize,
}

impl LessonCtx {
    /// 创建新的课程上下文
    pub fn new(lesson: String, lesson_index: usize) -> Self {
        Self {
            lesson,
            lesson_index,
        }
    }
}

impl Display for LessonCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[课程 #{} {}]", self.lesson_index, self.lesson)
    }
}
