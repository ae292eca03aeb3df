/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的课程数量
    pub max_concurrent_lessons: usize,
    /// 课程计划 TOML 文件存放目录
    pub lesson_folder: String,
    /// 导出文件输出目录
    pub export_folder: String,
    /// 导出格式列表（逗号分隔: docx,pdf）
    pub export_formats: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 处理完成后是否删除课程计划文件
    pub cleanup_processed: bool,
    /// 生成策略（template 或 model）
    pub generator_mode: String,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_lessons: 4,
            lesson_folder: "lesson_toml".to_string(),
            export_folder: "exports".to_string(),
            export_formats: "docx,pdf".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            cleanup_processed: false,
            generator_mode: "template".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "http://localhost:11434/v1".to_string(),
            llm_model_name: "qwen2.5:14b".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_lessons: std::env::var("MAX_CONCURRENT_LESSONS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_lessons),
            lesson_folder: std::env::var("LESSON_FOLDER").unwrap_or(default.lesson_folder),
            export_folder: std::env::var("EXPORT_FOLDER").unwrap_or(default.export_folder),
            export_formats: std::env::var("EXPORT_FORMATS").unwrap_or(default.export_formats),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            cleanup_processed: std::env::var("CLEANUP_PROCESSED").ok().and_then(|v| v.parse().ok()).unwrap_or(default.cleanup_processed),
            generator_mode: std::env::var("GENERATOR_MODE").unwrap_or(default.generator_mode),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }
}
