//! Skill - スキルと連絡手段の閉じた列挙
//!
//! JSON 上は表示ラベル（"文章作成" など）で表現します。
//! 入力では SCREAMING_SNAKE の名前も alias として受け付けます。
//! 未知の値はデシリアライズ時に拒否されます。

use serde::{Deserialize, Serialize};
use std::fmt;

/// タスクの必須スキル / ワーカーの保有スキル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillType {
    #[serde(rename = "文章作成", alias = "WRITING")]
    Writing,
    #[serde(rename = "データ入力", alias = "DATA_ENTRY")]
    DataEntry,
    #[serde(rename = "カスタマーサポート", alias = "CUSTOMER_SUPPORT")]
    CustomerSupport,
    #[serde(rename = "デザイン", alias = "DESIGN")]
    Design,
    #[serde(rename = "翻訳", alias = "TRANSLATION")]
    Translation,
}

impl SkillType {
    pub const ALL: [SkillType; 5] = [
        SkillType::Writing,
        SkillType::DataEntry,
        SkillType::CustomerSupport,
        SkillType::Design,
        SkillType::Translation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkillType::Writing => "文章作成",
            SkillType::DataEntry => "データ入力",
            SkillType::CustomerSupport => "カスタマーサポート",
            SkillType::Design => "デザイン",
            SkillType::Translation => "翻訳",
        }
    }
}

impl fmt::Display for SkillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 希望連絡手段（保存のみ。通知は行わない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactMethod {
    #[serde(rename = "Slack", alias = "SLACK")]
    Slack,
    #[serde(rename = "メール", alias = "EMAIL")]
    Email,
    #[serde(rename = "電話", alias = "PHONE")]
    Phone,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::label("\"文章作成\"", SkillType::Writing)]
    #[case::alias("\"WRITING\"", SkillType::Writing)]
    #[case::translation("\"翻訳\"", SkillType::Translation)]
    #[case::data_entry_alias("\"DATA_ENTRY\"", SkillType::DataEntry)]
    fn skill_accepts_label_and_alias(#[case] json: &str, #[case] expected: SkillType) {
        let skill: SkillType = serde_json::from_str(json).unwrap();
        assert_eq!(skill, expected);
    }

    #[test]
    fn skill_serializes_as_label() {
        let json = serde_json::to_string(&SkillType::CustomerSupport).unwrap();
        assert_eq!(json, "\"カスタマーサポート\"");
    }

    #[test]
    fn unknown_skill_is_rejected() {
        let result: Result<SkillType, _> = serde_json::from_str("\"料理\"");
        assert!(result.is_err());
    }

    #[test]
    fn contact_method_roundtrip() {
        let contact: ContactMethod = serde_json::from_str("\"メール\"").unwrap();
        assert_eq!(contact, ContactMethod::Email);
        assert_eq!(serde_json::to_string(&ContactMethod::Slack).unwrap(), "\"Slack\"");
    }
}
