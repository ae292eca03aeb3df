/// 难度层级枚举（面向使用者的三档难度）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Tier {
    /// 低
    Low,
    /// 中
    Medium,
    /// 高
    High,
}

/// 难度标签查找表（小写标签 → 难度）
static TIER_LABELS: phf::Map<&'static str, Tier> = phf::phf_map! {
    "low" => Tier::Low,
    "低" => Tier::Low,
    "基础" => Tier::Low,
    "medium" => Tier::Medium,
    "mid" => Tier::Medium,
    "中" => Tier::Medium,
    "进阶" => Tier::Medium,
    "high" => Tier::High,
    "高" => Tier::High,
    "拔高" => Tier::High,
};

impl Tier {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Tier::Low => "Low",
            Tier::Medium => "Medium",
            Tier::High => "High",
        }
    }

    /// 尝试从字符串解析难度（精确匹配，大小写不敏感）
    pub fn from_str(s: &str) -> Option<Self> {
        TIER_LABELS.get(s.trim().to_lowercase().as_str()).copied()
    }

    /// 智能查找难度（支持模糊匹配）
    pub fn find(s: &str) -> Option<Self> {
        // 先尝试精确匹配
        if let Some(tier) = Self::from_str(s) {
            return Some(tier);
        }

        // 模糊匹配
        let s_lower = s.to_lowercase();
        if s_lower.contains("low") || s_lower.contains("低") {
            return Some(Tier::Low);
        }
        if s_lower.contains("medium") || s_lower.contains("中") {
            return Some(Tier::Medium);
        }
        if s_lower.contains("high") || s_lower.contains("高") {
            return Some(Tier::High);
        }

        None
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 认知层级枚举（布鲁姆分类法六级，作为模板键使用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum CognitiveLevel {
    /// 记忆
    Remember,
    /// 理解
    Understand,
    /// 应用
    Apply,
    /// 分析
    Analyze,
    /// 评价
    Evaluate,
    /// 创造
    Create,
}

/// 认知层级标签查找表（小写标签 → 层级）
static LEVEL_LABELS: phf::Map<&'static str, CognitiveLevel> = phf::phf_map! {
    "remember" => CognitiveLevel::Remember,
    "记忆" => CognitiveLevel::Remember,
    "understand" => CognitiveLevel::Understand,
    "理解" => CognitiveLevel::Understand,
    "apply" => CognitiveLevel::Apply,
    "应用" => CognitiveLevel::Apply,
    "analyze" => CognitiveLevel::Analyze,
    "分析" => CognitiveLevel::Analyze,
    "evaluate" => CognitiveLevel::Evaluate,
    "评价" => CognitiveLevel::Evaluate,
    "create" => CognitiveLevel::Create,
    "创造" => CognitiveLevel::Create,
};

impl CognitiveLevel {
    /// 全部六个层级，按认知深度排序
    pub const ALL: [CognitiveLevel; 6] = [
        CognitiveLevel::Remember,
        CognitiveLevel::Understand,
        CognitiveLevel::Apply,
        CognitiveLevel::Analyze,
        CognitiveLevel::Evaluate,
        CognitiveLevel::Create,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            CognitiveLevel::Remember => "Remember",
            CognitiveLevel::Understand => "Understand",
            CognitiveLevel::Apply => "Apply",
            CognitiveLevel::Analyze => "Analyze",
            CognitiveLevel::Evaluate => "Evaluate",
            CognitiveLevel::Create => "Create",
        }
    }

    /// 获取该层级的动词提示
    pub fn verb_hints(self) -> &'static [&'static str] {
        match self {
            CognitiveLevel::Remember => &["define", "list", "recall", "name"],
            CognitiveLevel::Understand => &["explain", "summarize", "describe", "classify"],
            CognitiveLevel::Apply => &["use", "demonstrate", "solve", "implement"],
            CognitiveLevel::Analyze => &["compare", "contrast", "examine", "differentiate"],
            CognitiveLevel::Evaluate => &["assess", "judge", "critique", "justify"],
            CognitiveLevel::Create => &["design", "construct", "produce", "devise"],
        }
    }

    /// 尝试从字符串解析认知层级（精确匹配，大小写不敏感）
    pub fn from_str(s: &str) -> Option<Self> {
        LEVEL_LABELS.get(s.trim().to_lowercase().as_str()).copied()
    }
}

impl std::fmt::Display for CognitiveLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
