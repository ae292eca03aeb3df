use lesson_question_gen::catalog;
use lesson_question_gen::error::{AppError, GenerateError, SessionError};
use lesson_question_gen::models::lesson::ExtractionStatus;
use lesson_question_gen::services::extractor::ContentExtractor;
use lesson_question_gen::services::generator::TemplateGenerator;
use lesson_question_gen::workflow::session::{SessionSnapshot, SessionStore};
use lesson_question_gen::{CognitiveLevel, Exporter, ItemKind, LessonParameters, Tier};

/// 构造测试用课程参数
fn test_parameters(tier: Tier) -> LessonParameters {
    LessonParameters {
        lesson: "Biology Unit 3".to_string(),
        activity: "Week 5".to_string(),
        tier,
        time_allocation: 40,
        objective: "Understand how plants convert light into energy".to_string(),
    }
}

#[test]
fn test_resolve_tier_deterministic() {
    for tier in [Tier::Low, Tier::Medium, Tier::High] {
        let levels = catalog::resolve_tier(tier);
        assert!(!levels.is_empty(), "每个难度都应解析出至少一个认知层级");

        // 重复调用必须返回相同顺序
        assert_eq!(levels, catalog::resolve_tier(tier), "解析结果应该是确定性的");
    }

    // 六个层级恰好被三档难度完整划分
    let mut all: Vec<CognitiveLevel> = Vec::new();
    for tier in [Tier::Low, Tier::Medium, Tier::High] {
        all.extend_from_slice(catalog::resolve_tier(tier));
    }
    assert_eq!(all, CognitiveLevel::ALL, "分档应按认知深度覆盖全部六个层级");
}

#[test]
fn test_generate_matches_level_count_and_topic() {
    let generator = TemplateGenerator::new();

    for tier in [Tier::Low, Tier::Medium, Tier::High] {
        let items = generator
            .generate("volcanoes", tier)
            .expect("生成应该成功");

        assert_eq!(
            items.len(),
            catalog::resolve_tier(tier).len(),
            "题目数量应等于该难度的认知层级数量"
        );

        for item in &items {
            assert!(
                item.original.contains("volcanoes"),
                "每条题目都应包含主题: {}",
                item.original
            );
            assert_eq!(item.original, item.edited, "编辑文本初始应等于原始文本");
        }
    }
}

#[test]
fn test_generate_low_photosynthesis_scenario() {
    let generator = TemplateGenerator::new();

    let items = generator
        .generate("photosynthesis", Tier::Low)
        .expect("生成应该成功");

    assert_eq!(items.len(), 2, "Low 难度应生成 2 条题目");
    assert_eq!(items[0].original, "What is photosynthesis?");
    assert_eq!(items[1].original, "Explain the concept of photosynthesis.");
    assert_eq!(items[0].index, 1);
    assert_eq!(items[1].index, 2);
}

#[test]
fn test_generate_activities() {
    let generator = TemplateGenerator::new();

    let items = generator
        .generate_activities("photosynthesis", Tier::High)
        .expect("生成应该成功");

    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.kind == ItemKind::Activity));
    assert!(items.iter().all(|i| i.original.contains("photosynthesis")));
}

#[test]
fn test_generate_empty_topic_rejected() {
    let generator = TemplateGenerator::new();

    let err = generator
        .generate("   ", Tier::Low)
        .expect_err("空主题应该被拒绝");

    assert!(
        matches!(err, AppError::Generate(GenerateError::EmptyInput)),
        "应返回 EmptyInput: {}",
        err
    );
}

#[test]
fn test_tier_label_parsing() {
    assert_eq!(Tier::from_str("Low"), Some(Tier::Low));
    assert_eq!(Tier::from_str("HIGH"), Some(Tier::High));
    assert_eq!(Tier::from_str("中"), Some(Tier::Medium));
    assert_eq!(Tier::from_str("expert"), None);

    // 模糊匹配
    assert_eq!(Tier::find("难度: 高"), Some(Tier::High));
    assert_eq!(CognitiveLevel::from_str("apply"), Some(CognitiveLevel::Apply));
    assert_eq!(CognitiveLevel::from_str("未知"), None);
}

#[test]
fn test_session_edit_semantics() {
    let generator = TemplateGenerator::new();
    let mut session = SessionStore::new();

    session.set_parameters(test_parameters(Tier::Low));
    session.set_generated_items(
        generator
            .generate("photosynthesis", Tier::Low)
            .expect("生成应该成功"),
    );

    // 编辑第 2 条
    session
        .edit_item(2, "Explain photosynthesis to a classmate.")
        .expect("编辑应该成功");

    let items = session.items();
    assert_eq!(items.len(), 2, "编辑不应改变列表长度");
    assert_eq!(items[1].edited, "Explain photosynthesis to a classmate.");
    assert_eq!(
        items[1].original, "Explain the concept of photosynthesis.",
        "原始文本不应被编辑改动"
    );
    assert_eq!(
        items[0].edited, "What is photosynthesis?",
        "其他题目不应受影响"
    );
    assert!(items[1].is_edited());
    assert!(!items[0].is_edited());

    // 越界索引被拒绝，且不改变任何状态
    let err = session.edit_item(3, "x").expect_err("越界编辑应该失败");
    assert!(
        matches!(
            err,
            AppError::Session(SessionError::IndexOutOfRange {
                index: 3,
                max_index: 2
            })
        ),
        "应返回 IndexOutOfRange: {}",
        err
    );
    let err = session.edit_item(0, "x").expect_err("索引从 1 开始");
    assert!(matches!(
        err,
        AppError::Session(SessionError::IndexOutOfRange { .. })
    ));
    assert_eq!(session.items().len(), 2);
}

#[test]
fn test_set_generated_items_replaces_whole_list() {
    let generator = TemplateGenerator::new();
    let mut session = SessionStore::new();
    session.set_parameters(test_parameters(Tier::Low));

    session.set_generated_items(
        generator.generate("photosynthesis", Tier::Low).expect("生成应该成功"),
    );
    session.edit_item(1, "edited once").expect("编辑应该成功");

    // 重新生成：整体替换，不保留旧编辑
    session.set_generated_items(
        generator.generate("mitosis", Tier::Medium).expect("生成应该成功"),
    );

    let items = session.items();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.original.contains("mitosis")));
    assert!(items.iter().all(|i| !i.is_edited()));
}

#[test]
fn test_snapshot_requires_generation() {
    let session = SessionStore::new();
    let err = session.snapshot().expect_err("空会话不应产生快照");
    assert!(matches!(
        err,
        AppError::Session(SessionError::MissingParameters)
    ));

    let mut session = SessionStore::new();
    session.set_parameters(test_parameters(Tier::Low));
    let err = session
        .snapshot()
        .expect_err("没有生成结果时不应产生快照");
    assert!(
        matches!(err, AppError::Session(SessionError::NoGeneratedItems)),
        "应返回 NoGeneratedItems: {}",
        err
    );
}

#[test]
fn test_docx_export_roundtrip() {
    let generator = TemplateGenerator::new();
    let items = generator
        .generate("photosynthesis", Tier::Low)
        .expect("生成应该成功");
    let item_count = items.len();

    let snapshot = SessionSnapshot {
        parameters: test_parameters(Tier::Low),
        items,
    };

    let exporter = Exporter::new();
    let artifact = exporter.export_to_docx(&snapshot).expect("导出应该成功");
    assert_eq!(artifact.filename, "Biology Unit 3.docx");
    assert!(!artifact.bytes.is_empty(), "不应返回空产物");

    // 用自己的提取能力读回产物，行数 = 题目数 + 3（标题、元数据、目标）
    let extractor = ContentExtractor::new();
    let format = ContentExtractor::declared_format(&artifact.filename).expect("docx 应被识别");
    let doc = extractor
        .extract(&artifact.bytes, format)
        .expect("导出产物应该可以再次提取");

    let lines: Vec<&str> = doc.text.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(lines.len(), item_count + 3, "行数应为题目数 + 3: {:?}", lines);
    assert_eq!(lines[0], "Biology Unit 3");
    assert!(lines[1].contains("Tier: Low"));
    assert!(lines[1].contains("40 min"));
    assert!(lines[2].starts_with("Objective:"));
    assert_eq!(lines[3], "1. What is photosynthesis?");

    // 同一快照重复导出，结构内容应完全一致
    let again = exporter.export_to_docx(&snapshot).expect("导出应该成功");
    let doc_again = extractor
        .extract(&again.bytes, format)
        .expect("导出产物应该可以再次提取");
    assert_eq!(doc.text, doc_again.text, "重复导出的结构内容应一致");
}

#[test]
fn test_pdf_export_produces_pdf_bytes() {
    let generator = TemplateGenerator::new();
    let snapshot = SessionSnapshot {
        parameters: test_parameters(Tier::Medium),
        items: generator
            .generate("photosynthesis", Tier::Medium)
            .expect("生成应该成功"),
    };

    let artifact = Exporter::new()
        .export_to_pdf(&snapshot)
        .expect("导出应该成功");

    assert_eq!(artifact.filename, "Biology Unit 3.pdf");
    assert!(artifact.bytes.starts_with(b"%PDF"), "PDF 产物应以 %PDF 开头");
}

#[test]
fn test_epub_is_unsupported_but_not_fatal() {
    let extractor = ContentExtractor::new();
    let format = ContentExtractor::declared_format("book.epub").expect("epub 是合法的声明格式");

    let doc = extractor
        .extract(b"not really an epub", format)
        .expect("epub 不应触发致命错误");

    assert_eq!(doc.status, ExtractionStatus::Unsupported);
    assert!(doc.text.is_empty(), "epub 提取文本应为空");
}

#[test]
fn test_unknown_extension_fails_closed() {
    let err = ContentExtractor::declared_format("lesson.txt").expect_err("白名单之外应拒绝");
    assert!(
        matches!(err, AppError::Extract(_)),
        "应返回 UnsupportedFormat: {}",
        err
    );

    let err = ContentExtractor::declared_format("no_extension").expect_err("无扩展名应拒绝");
    assert!(matches!(err, AppError::Extract(_)));
}

#[test]
fn test_invalid_time_allocation_rejected() {
    use lesson_question_gen::LessonPlan;

    let plan: LessonPlan = toml::from_str(
        r#"
        lesson = "L1"
        activity = "W1"
        tier = "Low"
        time_allocation = 90
        topic = "photosynthesis"
        "#,
    )
    .expect("TOML 应该可以解析");

    let err = LessonParameters::from_plan(&plan).expect_err("超出范围的课时应被拒绝");
    assert!(matches!(
        err,
        AppError::Session(SessionError::InvalidTimeAllocation { minutes: 90, .. })
    ));

    let plan: LessonPlan = toml::from_str(
        r#"
        lesson = "L1"
        activity = "W1"
        tier = "nightmare"
        topic = "photosynthesis"
        "#,
    )
    .expect("TOML 应该可以解析");

    let err = LessonParameters::from_plan(&plan).expect_err("未知难度标签应被拒绝");
    assert!(matches!(err, AppError::Catalog(_)), "应返回 UnknownTier: {}", err);
}
