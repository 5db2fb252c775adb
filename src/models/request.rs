use std::fmt;

use serde::{Deserialize, Serialize};

/// 输出类型标签
///
/// 与后端约定的字符串 key 一一对应（`"summary"`、`"quiz"` 等）。
/// 请求侧是封闭枚举；响应侧的 key 可能出现客户端不认识的类型，
/// 因此响应侧保留原始字符串（见 [`crate::models::result`]）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    Summary,
    Detailed,
    Quiz,
    Keypoints,
    Timestamps,
    Flashcards,
}

impl OutputKind {
    /// 所有可勾选的输出类型（展示顺序）
    pub const ALL: [OutputKind; 6] = [
        OutputKind::Summary,
        OutputKind::Detailed,
        OutputKind::Quiz,
        OutputKind::Keypoints,
        OutputKind::Timestamps,
        OutputKind::Flashcards,
    ];

    /// 返回 wire 形式的字符串 key
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::Summary => "summary",
            OutputKind::Detailed => "detailed",
            OutputKind::Quiz => "quiz",
            OutputKind::Keypoints => "keypoints",
            OutputKind::Timestamps => "timestamps",
            OutputKind::Flashcards => "flashcards",
        }
    }

    /// 从用户输入解析（忽略大小写和首尾空白），不认识的输入返回 None
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "summary" => Some(OutputKind::Summary),
            "detailed" => Some(OutputKind::Detailed),
            "quiz" => Some(OutputKind::Quiz),
            "keypoints" => Some(OutputKind::Keypoints),
            "timestamps" => Some(OutputKind::Timestamps),
            "flashcards" => Some(OutputKind::Flashcards),
            _ => None,
        }
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一次 summarize 提交的请求体
///
/// 不变量：`question_count` 仅在 `outputs` 包含 [`OutputKind::Quiz`]
/// 时才可能是 `Some`，由校验层保证（见 `services::validation`）。
/// 题数不做数值校验，原样透传给服务端。
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRequest {
    pub url: String,
    pub outputs: Vec<OutputKind>,
    /// 序列化为 null 而不是省略，与服务端契约保持一致
    #[serde(rename = "noOfQuestions")]
    pub question_count: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_kind_round_trip() {
        for kind in OutputKind::ALL {
            assert_eq!(OutputKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(OutputKind::parse(" Quiz "), Some(OutputKind::Quiz));
        assert_eq!(OutputKind::parse("podcast"), None);
        assert_eq!(OutputKind::parse(""), None);
    }

    #[test]
    fn test_request_wire_shape_with_quiz() {
        let request = SubmissionRequest {
            url: "https://youtube.com/watch?v=abc".to_string(),
            outputs: vec![OutputKind::Summary, OutputKind::Quiz],
            question_count: Some("5".to_string()),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "url": "https://youtube.com/watch?v=abc",
                "outputs": ["summary", "quiz"],
                "noOfQuestions": "5"
            })
        );
    }

    #[test]
    fn test_request_wire_shape_without_quiz_sends_null() {
        let request = SubmissionRequest {
            url: "https://youtu.be/x".to_string(),
            outputs: vec![OutputKind::Summary],
            question_count: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        // noOfQuestions 字段必须存在且为 null，不能被省略
        assert_eq!(value["noOfQuestions"], serde_json::Value::Null);
        assert_eq!(value["outputs"], json!(["summary"]));
    }
}
