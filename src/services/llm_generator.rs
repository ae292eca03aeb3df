//! 模型生成器 - 业务能力层
//!
//! 只负责"LLM 生成"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Ollama, vLLM 等本地端点）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::catalog;
use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError, GenerateError, LlmError};
use crate::models::item::{GeneratedItem, ItemKind};
use crate::models::tier::Tier;

/// 提示词中的认知层级描述
#[derive(Debug, serde::Serialize)]
struct LevelForPrompt {
    index: usize,
    level: &'static str,
    verbs: &'static [&'static str],
}

/// 模型生成器
///
/// 职责：
/// - 调用 LLM API 按认知层级生成题目
/// - 与静态模板生成器遵守同一契约（数量、顺序、整批成败）
/// - 不出现 SessionStore / LessonPlan
/// - 不关心流程顺序
pub struct LlmGenerator {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmGenerator {
    /// 创建新的模型生成器
    pub fn new(config: &Config) -> AppResult<Self> {
        if config.llm_api_base_url.is_empty() {
            return Err(ConfigError::EnvVarNotFound {
                var_name: "LLM_API_BASE_URL".to_string(),
            }
            .into());
        }

        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Ok(Self {
            client,
            model_name: config.llm_model_name.clone(),
        })
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（字符串）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        // 构建消息列表
        let mut messages = Vec::new();

        // 添加系统消息（如果提供）
        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(|e| AppError::llm_api_failed(&self.model_name, e))?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| AppError::llm_api_failed(&self.model_name, e))?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        // 温度为 0，让同一 (主题, 难度) 的输出尽量可复现
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.0)
            .max_tokens(1024u32)
            .build()
            .map_err(|e| AppError::llm_api_failed(&self.model_name, e))?;

        // 调用 API
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }

    /// 生成题目列表
    ///
    /// 输出行数必须等于难度解析出的层级数量，否则整批作废
    pub async fn generate(
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
        let level_payload: Vec<LevelForPrompt> = levels
            .iter()
            .enumerate()
            .map(|(i, l)| LevelForPrompt {
                index: i + 1,
                level: l.name(),
                verbs: l.verb_hints(),
            })
            .collect();
        let levels_json = serde_json::to_string_pretty(&level_payload)
            .map_err(|e| AppError::llm_api_failed(&self.model_name, e))?;

        let kind_word = match kind {
            ItemKind::Question => "question",
            ItemKind::Activity => "classroom activity",
        };

        let system = "You are an instructional design assistant. \
            Output only the items themselves, one per line, no numbering, no commentary.";
        let user = format!(
            "Topic: {}\nWrite exactly one {} for each cognitive level below, \
             in index order, one per line:\n{}",
            topic, kind_word, levels_json
        );

        let response = self.send_to_llm(&user, Some(system)).await?;

        let lines: Vec<&str> = response
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        if lines.len() != levels.len() {
            return Err(GenerateError::WrongItemCount {
                expected: levels.len(),
                actual: lines.len(),
            }
            .into());
        }

        Ok(lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| GeneratedItem::new(i + 1, kind, line))
            .collect())
    }
}
