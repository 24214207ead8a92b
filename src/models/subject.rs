use phf::phf_map;

/// 科目枚举
///
/// 声明顺序即同等关键词长度下的识别优先级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Subject {
    /// 语文
    Chinese,
    /// 数学
    Math,
    /// 英语
    English,
    /// 物理
    Physics,
    /// 化学
    Chemistry,
    /// 生物
    Biology,
    /// 政治（含道德与法治）
    Politics,
    /// 历史
    History,
    /// 地理
    Geography,
    /// 总分
    Total,
}

// 标准名称 -> 科目
static SUBJECT_BY_NAME: phf::Map<&'static str, Subject> = phf_map! {
    "语文" => Subject::Chinese,
    "数学" => Subject::Math,
    "英语" => Subject::English,
    "物理" => Subject::Physics,
    "化学" => Subject::Chemistry,
    "生物" => Subject::Biology,
    "政治" => Subject::Politics,
    "历史" => Subject::History,
    "地理" => Subject::Geography,
    "总分" => Subject::Total,
};

impl Subject {
    /// 全部科目，按声明顺序
    pub const ALL: [Subject; 10] = [
        Subject::Chinese,
        Subject::Math,
        Subject::English,
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
        Subject::Politics,
        Subject::History,
        Subject::Geography,
        Subject::Total,
    ];

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Subject::Chinese => "语文",
            Subject::Math => "数学",
            Subject::English => "英语",
            Subject::Physics => "物理",
            Subject::Chemistry => "化学",
            Subject::Biology => "生物",
            Subject::Politics => "政治",
            Subject::History => "历史",
            Subject::Geography => "地理",
            Subject::Total => "总分",
        }
    }

    /// 获取英文标识（写入记录元数据）
    pub fn slug(self) -> &'static str {
        match self {
            Subject::Chinese => "chinese",
            Subject::Math => "math",
            Subject::English => "english",
            Subject::Physics => "physics",
            Subject::Chemistry => "chemistry",
            Subject::Biology => "biology",
            Subject::Politics => "politics",
            Subject::History => "history",
            Subject::Geography => "geography",
            Subject::Total => "total",
        }
    }

    /// 表头识别关键词：全称、单字简称、英文及拼音
    ///
    /// 英文关键词一律小写，与规范化后的表头比较
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Subject::Chinese => &["语文", "语", "chinese", "yuwen"],
            Subject::Math => &["数学", "数", "math", "mathematics", "shuxue"],
            Subject::English => &["英语", "英", "english", "yingyu"],
            Subject::Physics => &["物理", "物", "physics", "wuli"],
            Subject::Chemistry => &["化学", "化", "chemistry", "huaxue"],
            Subject::Biology => &["生物", "生", "biology", "shengwu"],
            Subject::Politics => &[
                "政治",
                "政",
                "politics",
                "zhengzhi",
                "道法",
                "道德与法治",
                "道德法治",
                "思政",
                "思想政治",
                "德育",
            ],
            Subject::History => &["历史", "史", "history", "lishi"],
            Subject::Geography => &["地理", "地", "geography", "dili"],
            Subject::Total => &["总分", "总成绩", "total_score", "totalscore", "total"],
        }
    }

    /// 最长关键词的字符数，用于科目排序
    pub fn longest_keyword_len(self) -> usize {
        self.keywords()
            .iter()
            .map(|k| k.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// 从标准名称解析科目（精确匹配）
    pub fn from_name(name: &str) -> Option<Self> {
        SUBJECT_BY_NAME.get(name).copied()
    }

    /// 是否为总分
    pub fn is_total(self) -> bool {
        matches!(self, Subject::Total)
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_round_trips_every_subject() {
        for subject in Subject::ALL {
            assert_eq!(Subject::from_name(subject.name()), Some(subject));
        }
        assert_eq!(Subject::from_name("语"), None);
    }

    #[test]
    fn test_longest_keyword_counts_chars_not_bytes() {
        assert_eq!(Subject::Math.longest_keyword_len(), "mathematics".len());
        assert_eq!(Subject::Politics.longest_keyword_len(), 8);
    }
}
