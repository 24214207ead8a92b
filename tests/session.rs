use grade_mapper::diagnostics::{
    diagnose_mapping_issues, validate_mapping_results, DiagnosticIssue, Severity,
};
use grade_mapper::models::load_import_file;
use grade_mapper::{AnalysisCache, CellValue, Config, ExamContext, ImportSession, Row};
use std::sync::Arc;

fn student_row(id: &str, name: &str, class: &str, chinese: &str, math: &str) -> Row {
    [
        ("学号", CellValue::from(id)),
        ("姓名", CellValue::from(name)),
        ("班级", CellValue::from(class)),
        ("语文", CellValue::from(chinese)),
        ("数学", CellValue::from(math)),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn exam() -> ExamContext {
    ExamContext::new("E2", "月考", "月考", "2024-10-10")
}

const HEADERS: [&str; 5] = ["学号", "姓名", "班级", "语文", "数学"];

#[test]
fn test_session_prepares_and_transforms_in_batches() {
    let config = Config {
        batch_size: 2,
        ..Config::default()
    };
    let session = ImportSession::new(config);

    let prepared = session.prepare(&HEADERS);
    assert!(prepared.wide_format);
    assert_eq!(prepared.cache_hits, 0);

    let rows = vec![
        student_row("S1", "张三", "1班", "85", "92"),
        student_row("S2", "李四", "1班", "", ""),
        student_row("S3", "王五", "2班", "70", ""),
    ];
    let outcome = session.transform_rows(&rows, &prepared.analysis, &exam());

    assert_eq!(outcome.rows_processed, 3);
    assert_eq!(outcome.rows_without_records, 1);
    assert_eq!(outcome.records.len(), 3);

    assert_eq!(session.prepare(&HEADERS).cache_hits, 1);
}

#[test]
fn test_sessions_can_share_a_cache() {
    let cache = Arc::new(AnalysisCache::new());
    let first = ImportSession::with_cache(Config::default(), Arc::clone(&cache));
    let second = ImportSession::with_cache(Config::default(), Arc::clone(&cache));

    first.prepare(&HEADERS);
    assert_eq!(second.prepare(&HEADERS).cache_hits, 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_session_applies_configured_totals() {
    let mut config = Config::default();
    config.subject_total_scores.insert("数学".to_string(), 150.0);
    let session = ImportSession::new(config);

    let prepared = session.prepare(&HEADERS);
    let rows = vec![student_row("S1", "张三", "1班", "85", "132")];
    let outcome = session.transform_rows(&rows, &prepared.analysis, &exam());

    let math = outcome.records.iter().find(|r| r.subject == "数学").unwrap();
    assert_eq!(math.subject_total_score, 150.0);
}

#[test]
fn test_diagnostics_flag_missing_identity_columns() {
    let session = ImportSession::new(Config::default());
    let headers = ["语文", "数学", "英语", "物理"];
    let prepared = session.prepare(&headers);
    let rows: Vec<Row> = vec![[("语文", CellValue::from("80"))]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()];
    let outcome = session.transform_rows(&rows, &prepared.analysis, &exam());

    let diagnostics = diagnose_mapping_issues(&outcome.records, &prepared.analysis);
    let issues: Vec<(&str, DiagnosticIssue)> = diagnostics
        .iter()
        .map(|d| (d.field.as_str(), d.issue))
        .collect();

    assert!(issues.contains(&("name", DiagnosticIssue::AllSame)));
    assert!(issues.contains(&("subjects", DiagnosticIssue::LowCoverage)));
    assert!(issues.contains(&("class_name", DiagnosticIssue::AllNull)));
    assert!(!issues.iter().any(|(_, i)| *i == DiagnosticIssue::NoValidScores));
    assert_eq!(diagnostics[0].severity, Severity::Error);

    let validation = validate_mapping_results(&outcome.records);
    assert!(!validation.valid);
    assert_eq!(validation.errors, vec!["所有记录都缺少有效的姓名".to_string()]);
}

#[test]
fn test_diagnostics_clean_import() {
    let session = ImportSession::new(Config::default());
    let prepared = session.prepare(&HEADERS);
    let rows = vec![
        student_row("S1", "张三", "1班", "85", "92"),
        student_row("S2", "李四", "2班", "77", "64"),
    ];
    let outcome = session.transform_rows(&rows, &prepared.analysis, &exam());

    assert!(diagnose_mapping_issues(&outcome.records, &prepared.analysis).is_empty());
    assert!(validate_mapping_results(&outcome.records).valid);
    assert!(!validate_mapping_results(&[]).valid);
}

fn row_of(cells: &[(&str, &str)]) -> Row {
    cells
        .iter()
        .map(|(k, v)| (k.to_string(), CellValue::from(*v)))
        .collect()
}

#[test]
fn test_diagnostics_for_grade_only_import() {
    let session = ImportSession::new(Config::default());
    let prepared = session.prepare(&["姓名", "班级", "语文等级", "数学等级"]);
    let rows = vec![
        row_of(&[("姓名", "张三"), ("班级", "1班"), ("语文等级", "A"), ("数学等级", "B")]),
        row_of(&[("姓名", "李四"), ("班级", "2班"), ("语文等级", "C"), ("数学等级", "A")]),
    ];
    let outcome = session.transform_rows(&rows, &prepared.analysis, &exam());
    assert_eq!(outcome.records.len(), 4);

    let diagnostics = diagnose_mapping_issues(&outcome.records, &prepared.analysis);
    let scores = diagnostics
        .iter()
        .find(|d| d.issue == DiagnosticIssue::NoValidScores)
        .unwrap();
    assert_eq!(scores.field, "scores");
    assert_eq!(scores.severity, Severity::Error);
    assert!(diagnostics.iter().all(|d| d.field != "name"));

    let validation = validate_mapping_results(&outcome.records);
    assert!(!validation.valid);
    assert_eq!(
        validation.errors,
        vec!["所有记录都缺少有效的成绩数据".to_string()]
    );
}

#[test]
fn test_diagnostics_for_empty_total_column() {
    let session = ImportSession::new(Config::default());
    let prepared = session.prepare(&["姓名", "班级", "语文", "数学", "总分"]);
    let rows = vec![
        row_of(&[("姓名", "张三"), ("班级", "1班"), ("语文", "85"), ("数学", "92"), ("总分", "")]),
        row_of(&[("姓名", "李四"), ("班级", "1班"), ("语文", "70"), ("数学", "66"), ("总分", " ")]),
    ];
    let outcome = session.transform_rows(&rows, &prepared.analysis, &exam());

    let diagnostics = diagnose_mapping_issues(&outcome.records, &prepared.analysis);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].field, "total_score");
    assert_eq!(diagnostics[0].issue, DiagnosticIssue::AllNull);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert!(validate_mapping_results(&outcome.records).valid);
}

#[test]
fn test_load_import_file() {
    let path = std::env::temp_dir().join(format!("grade_mapper_import_{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{
            "headers": ["学号", "姓名", "语文"],
            "rows": [{"学号": 2023001, "姓名": "张三", "语文": "85"}],
            "exam": {"exam_id": "E1", "title": "期中", "type": "期中", "date": "2024-11-05"}
        }"#,
    )
    .unwrap();

    let file = tokio_test::block_on(load_import_file(&path)).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(file.headers, vec!["学号", "姓名", "语文"]);
    assert_eq!(file.rows[0]["学号"], CellValue::Number(2023001.0));
    assert_eq!(file.exam.exam_type, "期中");
}

#[test]
fn test_load_missing_import_file() {
    let path = std::env::temp_dir().join("grade_mapper_missing_file.json");
    let err = tokio_test::block_on(load_import_file(&path)).unwrap_err();
    assert!(err.to_string().contains("文件不存在"));
}

#[test]
fn test_load_import_file_without_headers_uses_first_row() {
    let path = std::env::temp_dir().join(format!(
        "grade_mapper_no_headers_{}.json",
        std::process::id()
    ));
    std::fs::write(
        &path,
        r#"{
            "rows": [{"姓名": "张三", "语文": 85}],
            "exam": {"exam_id": "E1", "title": "期中", "type": "期中", "date": "2024-11-05"}
        }"#,
    )
    .unwrap();

    let file = tokio_test::block_on(load_import_file(&path)).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(file.headers, vec!["姓名", "语文"]);
}
