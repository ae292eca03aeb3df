//! 难度目录 - 静态查找表
//!
//! 难度 → 认知层级 与 认知层级 → 模板 两张表都是编译期固定的：
//! 表内容可审计、可穷举测试，也是未来接入模型生成器时唯一的替换缝隙
//!
//! 难度分档（以目录为准）：
//! - Low    = [Remember, Understand]
//! - Medium = [Apply, Analyze]
//! - High   = [Evaluate, Create]

use crate::models::tier::{CognitiveLevel, Tier};

/// 模板中的主题占位符
pub const TOPIC_SLOT: &str = "{topic}";

/// 解析难度对应的认知层级（按目录固定顺序，总是非空）
pub fn resolve_tier(tier: Tier) -> &'static [CognitiveLevel] {
    match tier {
        Tier::Low => &[CognitiveLevel::Remember, CognitiveLevel::Understand],
        Tier::Medium => &[CognitiveLevel::Apply, CognitiveLevel::Analyze],
        Tier::High => &[CognitiveLevel::Evaluate, CognitiveLevel::Create],
    }
}

/// 获取认知层级对应的问题模板（单个 {topic} 占位槽）
pub fn question_template(level: CognitiveLevel) -> &'static str {
    match level {
        CognitiveLevel::Remember => "What is {topic}?",
        CognitiveLevel::Understand => "Explain the concept of {topic}.",
        CognitiveLevel::Apply => "How would you use {topic} to solve a real problem?",
        CognitiveLevel::Analyze => "What are the components of {topic} and how do they relate?",
        CognitiveLevel::Evaluate => "Assess the strengths and weaknesses of {topic}.",
        CognitiveLevel::Create => "Design a new approach based on {topic}.",
    }
}

/// 获取认知层级对应的活动模板（单个 {topic} 占位槽）
pub fn activity_template(level: CognitiveLevel) -> &'static str {
    match level {
        CognitiveLevel::Remember => "List the key terms related to {topic}.",
        CognitiveLevel::Understand => "Summarize {topic} in your own words.",
        CognitiveLevel::Apply => "Demonstrate {topic} with a worked example.",
        CognitiveLevel::Analyze => "Compare and contrast the parts of {topic}.",
        CognitiveLevel::Evaluate => "Debate the merits of {topic} with a partner.",
        CognitiveLevel::Create => "Produce an original project that applies {topic}.",
    }
}

/// 将主题代入模板
pub fn render(template: &str, topic: &str) -> String {
    template.replace(TOPIC_SLOT, topic)
}
