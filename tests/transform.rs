use grade_mapper::models::{UNKNOWN_CLASS, UNKNOWN_STUDENT};
use grade_mapper::{CellValue, ExamContext, RecordTransformer, Row, SchemaAnalyzer};

fn row(cells: &[(&str, CellValue)]) -> Row {
    cells
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn exam() -> ExamContext {
    ExamContext::new("exam-2024-final", "2024学年期末考试", "期末", "2025-01-15")
}

#[test]
fn test_end_to_end_three_subjects() {
    let headers = ["学号", "姓名", "班级", "语文", "数学", "英语"];
    let analysis = SchemaAnalyzer::new().analyze(&headers);
    let data = row(&[
        ("学号", "S1".into()),
        ("姓名", "张三".into()),
        ("班级", "1班".into()),
        ("语文", "85".into()),
        ("数学", "92".into()),
        ("英语", "78".into()),
    ]);

    let records = RecordTransformer::new().transform_row(&data, &analysis, &exam());
    assert_eq!(records.len(), 3);

    for record in &records {
        assert_eq!(record.student_id, "S1");
        assert_eq!(record.name, "张三");
        assert_eq!(record.class_name, "1班");
        assert_eq!(record.exam_id, "exam-2024-final");
        assert_eq!(record.exam_title, "2024学年期末考试");
        assert_eq!(record.exam_type, "期末");
        assert_eq!(record.exam_date, "2025-01-15");
        assert_eq!(record.subject_total_score, 100.0);
    }

    let pairs: Vec<(&str, Option<f64>)> = records
        .iter()
        .map(|r| (r.subject.as_str(), r.score))
        .collect();
    assert_eq!(
        pairs,
        vec![("语文", Some(85.0)), ("数学", Some(92.0)), ("英语", Some(78.0))]
    );
}

#[test]
fn test_empty_cell_does_not_create_phantom_record() {
    let analysis = SchemaAnalyzer::new().analyze(&["姓名", "数学分数", "语文分数"]);
    let data = row(&[
        ("姓名", "张三".into()),
        ("数学分数", "".into()),
        ("语文分数", "88".into()),
    ]);

    let records = RecordTransformer::new().transform_row(&data, &analysis, &exam());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].subject, "语文");
    assert_eq!(records[0].score, Some(88.0));
}

#[test]
fn test_zero_score_is_preserved() {
    let analysis = SchemaAnalyzer::new().analyze(&["姓名", "数学分数", "物理"]);
    let data = row(&[
        ("姓名", "张三".into()),
        ("数学分数", "0".into()),
        ("物理", CellValue::Number(0.0)),
    ]);

    let records = RecordTransformer::new().transform_row(&data, &analysis, &exam());
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.score == Some(0.0)));
}

#[test]
fn test_full_subject_group_merges_into_one_record() {
    let headers = ["姓名", "语文分数", "语文等级", "语文班名", "语文校名", "语文级名"];
    let analysis = SchemaAnalyzer::new().analyze(&headers);
    let data = row(&[
        ("姓名", "张三".into()),
        ("语文分数", "118".into()),
        ("语文等级", "A".into()),
        ("语文班名", "2".into()),
        ("语文校名", "15".into()),
        ("语文级名", "9".into()),
    ]);

    let records = RecordTransformer::new().transform_row(&data, &analysis, &exam());
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.score, Some(118.0));
    assert_eq!(record.original_grade.as_deref(), Some("A"));
    assert_eq!(record.rank_in_class, Some(2));
    // 校名先出现，占据 rank_in_grade；级名被忽略
    assert_eq!(record.rank_in_grade, Some(15));
}

#[test]
fn test_grade_only_subject_emits_record() {
    let analysis = SchemaAnalyzer::new().analyze(&["姓名", "生物等级", "生物班名"]);
    let data = row(&[
        ("姓名", "张三".into()),
        ("生物等级", "B+".into()),
        ("生物班名", "7".into()),
    ]);

    let records = RecordTransformer::new().transform_row(&data, &analysis, &exam());
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].score, None);
    assert_eq!(records[0].original_grade.as_deref(), Some("B+"));
    assert_eq!(records[0].rank_in_class, Some(7));
}

#[test]
fn test_output_subjects_are_analysed_subjects() {
    let headers = ["学号", "姓名", "语文", "数学等级", "英语班名", "物理", "备注"];
    let analysis = SchemaAnalyzer::new().analyze(&headers);
    let data = row(&[
        ("学号", "S9".into()),
        ("姓名", "李雷".into()),
        ("语文", "91".into()),
        ("数学等级", "A".into()),
        ("英语班名", "4".into()),
        ("物理", "缺考".into()),
        ("备注", "无".into()),
    ]);

    let records = RecordTransformer::new().transform_row(&data, &analysis, &exam());
    assert_eq!(records.len(), 2);
    for record in &records {
        assert!(analysis.subjects.contains(&record.subject));
    }
}

#[test]
fn test_empty_header_set_yields_no_records() {
    let analysis = SchemaAnalyzer::new().analyze::<&str>(&[]);
    let data = row(&[("语文", "90".into())]);

    let records = RecordTransformer::new().transform_row(&data, &analysis, &exam());
    assert!(records.is_empty());
}

#[test]
fn test_missing_identity_shares_fallback_across_subjects() {
    let analysis = SchemaAnalyzer::new().analyze(&["语文", "数学"]);
    let data = row(&[("语文", "60".into()), ("数学", "61".into())]);

    let records = RecordTransformer::new().transform_row(&data, &analysis, &exam());
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].student_id, records[1].student_id);
    assert!(records[0].student_id.starts_with("temp_"));
    assert_eq!(records[0].name, UNKNOWN_STUDENT);
    assert_eq!(records[0].class_name, UNKNOWN_CLASS);
}

#[test]
fn test_record_serializes_with_persistence_field_names() {
    let analysis = SchemaAnalyzer::new().analyze(&["学号", "姓名", "班级", "语文"]);
    let data = row(&[
        ("学号", "S1".into()),
        ("姓名", "张三".into()),
        ("班级", "1班".into()),
        ("语文", "85".into()),
    ]);

    let records = RecordTransformer::new().transform_row(&data, &analysis, &exam());
    let value = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(value["student_id"], "S1");
    assert_eq!(value["class_name"], "1班");
    assert_eq!(value["score"], 85.0);
    assert_eq!(value["subject_total_score"], 100.0);
    assert!(value.get("rank_in_class").is_none());
}
