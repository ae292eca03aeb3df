//! 题目生成服务 - 业务能力层
//!
//! 只负责"(主题, 难度) → 题目列表"能力，不关心流程
//!
//! 两种策略共享同一契约：
//! - 输出数量等于难度解析出的认知层级数量，顺序跟随目录
//! - 要么整批成功，要么整批失败（调用方据此做原子替换）
//!
//! StaticTemplate 是 (主题, 难度) 的纯函数：无随机性、无网络调用

use tracing::debug;

use crate::catalog;
use crate::config::Config;
use crate::error::{AppResult, ConfigError, GenerateError};
use crate::models::item::{GeneratedItem, ItemKind};
use crate::models::tier::Tier;
use crate::services::llm_generator::LlmGenerator;

/// 静态模板生成器
pub struct TemplateGenerator;

impl TemplateGenerator {
    /// 创建新的静态模板生成器
    pub fn new() -> Self {
        Self
    }

    /// 生成问题列表
    pub fn generate(&self, topic: &str, tier: Tier) -> AppResult<Vec<GeneratedItem>> {
        self.generate_items(topic, tier, ItemKind::Question)
    }

    /// 生成活动列表
    pub fn generate_activities(&self, topic: &str, tier: Tier) -> AppResult<Vec<GeneratedItem>> {
        self.generate_items(topic, tier, ItemKind::Activity)
    }

    fn generate_items(
        &self,
        topic: &str,
        tier: Tier,
        kind: ItemKind,
    ) -> AppResult<Vec<GeneratedItem>> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(GenerateError::EmptyInput.into());
        }

        let levels = catalog::resolve_tier(tier);
        debug!("难度 {} 解析为 {} 个认知层级", tier, levels.len());

        let items = levels
            .iter()
            .enumerate()
            .map(|(i, level)| {
                let template = match kind {
                    ItemKind::Question => catalog::question_template(*level),
                    ItemKind::Activity => catalog::activity_template(*level),
                };
                GeneratedItem::new(i + 1, kind, catalog::render(template, topic))
            })
            .collect();

        Ok(items)
    }
}

impl Default for TemplateGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// 内容生成策略
pub enum ContentGenerator {
    /// 静态模板
    StaticTemplate(TemplateGenerator),
    /// 模型生成
    ModelBacked(LlmGenerator),
}

impl ContentGenerator {
    /// 根据配置选择生成策略
    pub fn from_config(config: &Config) -> AppResult<Self> {
        match config.generator_mode.as_str() {
            "template" => Ok(ContentGenerator::StaticTemplate(TemplateGenerator::new())),
            "model" => Ok(ContentGenerator::ModelBacked(LlmGenerator::new(config)?)),
            other => Err(ConfigError::InvalidValue {
                field: "generator_mode".to_string(),
                value: other.to_string(),
            }
            .into()),
        }
    }

    /// 策略名称（用于日志）
    pub fn name(&self) -> &'static str {
        match self {
            ContentGenerator::StaticTemplate(_) => "template",
            ContentGenerator::ModelBacked(_) => "model",
        }
    }

    /// 生成题目列表
    pub async fn generate(
        &self,
        topic: &str,
        tier: Tier,
        kind: ItemKind,
    ) -> AppResult<Vec<GeneratedItem>> {
        match self {
            ContentGenerator::StaticTemplate(g) => match kind {
                ItemKind::Question => g.generate(topic, tier),
                ItemKind::Activity => g.generate_activities(topic, tier),
            },
            ContentGenerator::ModelBacked(g) => g.generate(topic, tier, kind).await,
        }
    }
}
