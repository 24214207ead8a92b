//! 表头识别用的关键词表
//!
//! 所有表都是有序列表而非哈希表：顺序决定冲突时谁胜出。
//! 英文关键词均为小写。

use crate::models::{DataType, Subject};
use std::sync::LazyLock;

/// 学生信息类别，按检查顺序排列，子串命中即可
///
/// `name`、`id`、`学生`、`编号`、`班` 这类裸词放在 [`STUDENT_INFO_EXACT`]：
/// 作为子串它们会命中 `class_name`、`班级编号`、`学生学号`、`班名` 等表头
pub const STUDENT_INFO_PATTERNS: &[(&str, &[&str])] = &[
    (
        "name",
        &[
            "student_name",
            "学生姓名",
            "考生姓名",
            "fullname",
            "姓 名",
            "姓名",
            "名字",
        ],
    ),
    (
        "student_id",
        &[
            "student_id",
            "学生学号",
            "学生编号",
            "准考证号",
            "学籍号",
            "考生号",
            "报名号",
            "stu_id",
            "学号",
            "考号",
        ],
    ),
    (
        "class_name",
        &[
            "class_name",
            "所在班级",
            "班级名称",
            "班级编号",
            "class_id",
            "行政班",
            "教学班",
            "班级",
            "class",
        ],
    ),
];

/// 只在整个表头相等时才命中的短关键词
///
/// 比较前去掉空格、下划线和连字符，`Student ID` 与 `student_id` 等价
pub const STUDENT_INFO_EXACT: &[(&str, &[&str])] = &[
    ("name", &["name", "studentname", "学生", "考生"]),
    ("student_id", &["id", "studentid", "编号", "序号"]),
    ("class_name", &["班", "classname"]),
];

/// 含有这些标记的表头是排名列，不作为学生信息
pub const RANK_MARKERS: &[&str] = &["排名", "名次", "班名", "校名", "班排", "校排", "级排", "rank"];

/// 科目表头中的数据类型标记，按检查顺序排列
///
/// 排名先于等级和分数检查，避免 `grade_rank`、`年级排名` 被当作等级
pub const DATA_TYPE_MARKERS: &[(DataType, &[&str])] = &[
    (
        DataType::RankClass,
        &["班级排名", "班级名次", "班内排名", "class_rank", "班名", "班排"],
    ),
    (
        DataType::RankSchool,
        &["学校排名", "全校排名", "全校名次", "school_rank", "校名", "校排"],
    ),
    (
        DataType::RankGrade,
        &["年级排名", "年级名次", "grade_rank", "级名", "级排"],
    ),
    (DataType::Grade, &["等级", "级别", "档次", "grade"]),
    (DataType::Score, &["分数", "成绩", "得分", "score"]),
];

/// 一个科目及其按长度降序排列的关键词
#[derive(Debug, Clone)]
pub struct SubjectPattern {
    pub subject: Subject,
    pub keywords: Vec<&'static str>,
}

/// 科目识别顺序：按各科最长关键词降序，长度相同保持声明顺序
///
/// 长度按字符计，英文关键词也参与：`total_score` 让总分排在数学之后、
/// 其余科目之前，所以“语文总分”归入总分
pub static SUBJECT_PATTERNS: LazyLock<Vec<SubjectPattern>> = LazyLock::new(|| {
    let mut patterns: Vec<SubjectPattern> = Subject::ALL
        .iter()
        .map(|&subject| {
            let mut keywords = subject.keywords().to_vec();
            keywords.sort_by_key(|k| std::cmp::Reverse(k.chars().count()));
            SubjectPattern { subject, keywords }
        })
        .collect();
    patterns.sort_by_key(|p| std::cmp::Reverse(p.subject.longest_keyword_len()));
    patterns
});

/// 是否为中日韩统一表意文字
pub fn is_cjk(c: char) -> bool {
    matches!(
        c as u32,
        0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF | 0x20000..=0x2EBEF
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_order_is_longest_keyword_first_then_declared() {
        let order: Vec<Subject> = SUBJECT_PATTERNS.iter().map(|p| p.subject).collect();
        assert_eq!(order[0], Subject::Math);
        assert_eq!(order[1], Subject::Total);
        assert_eq!(order[2], Subject::Chemistry);
        assert_eq!(order[3], Subject::Geography);
        assert_eq!(order[4], Subject::Politics);
        assert_eq!(order[5], Subject::Chinese);
        assert_eq!(order.len(), Subject::ALL.len());
    }

    #[test]
    fn test_keywords_sorted_longest_first() {
        let politics = SUBJECT_PATTERNS
            .iter()
            .find(|p| p.subject == Subject::Politics)
            .unwrap();
        let lens: Vec<usize> = politics.keywords.iter().map(|k| k.chars().count()).collect();
        assert!(lens.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(*politics.keywords.last().unwrap(), "政");
    }

    #[test]
    fn test_is_cjk() {
        assert!(is_cjk('数'));
        assert!(!is_cjk('('));
        assert!(!is_cjk('1'));
        assert!(!is_cjk('a'));
        assert!(!is_cjk('（'));
    }
}
