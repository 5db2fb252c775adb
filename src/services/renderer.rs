//! 结果渲染 - 业务能力层
//!
//! 把解码后的 [`RenderableResult`] 映射成一份完整的渲染文档：
//! 一行 URL 头部加零到多个带标签的段落。每次渲染都产出全新文档，
//! 整体替换之前的输出，渲染之间不共享任何可变状态。

use phf::phf_map;

use crate::models::{OutputValue, RenderableResult};
use crate::services::quiz::QuizCard;

/// 输出类型 → 展示标签的固定映射，不认识的 key 原样展示
static KIND_LABELS: phf::Map<&'static str, &'static str> = phf_map! {
    "summary" => "Short summary",
    "detailed" => "Detailed notes",
    "quiz" => "Quizzes",
    "keypoints" => "Key takeaways",
    "timestamps" => "Timestamps",
    "flashcards" => "Flashcards",
};

/// 空测验列表的占位文案
pub const NO_QUIZ_PLACEHOLDER: &str = "No quiz questions available.";
/// 测验数据损坏时的占位文案
pub const QUIZ_FAILURE_PLACEHOLDER: &str = "Failed to render quiz.";

/// 查展示标签，未知 key 返回原始字符串
pub fn nice_name(key: &str) -> &str {
    KIND_LABELS.get(key).copied().unwrap_or(key)
}

/// 一次渲染产出的完整文档
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    /// 头部：回显提交的 URL（缺失时为空串）
    pub header: String,
    pub sections: Vec<RenderedSection>,
}

impl RenderedDocument {
    /// 遍历文档里所有的测验卡片（可变），按段落顺序
    pub fn quiz_cards_mut(&mut self) -> impl Iterator<Item = &mut QuizCard> {
        self.sections.iter_mut().flat_map(|s| {
            let cards: &mut [QuizCard] = match &mut s.body {
                SectionBody::Quiz(cards) => cards,
                _ => &mut [],
            };
            cards
        })
    }

    pub fn has_quiz(&self) -> bool {
        self.sections
            .iter()
            .any(|s| matches!(&s.body, SectionBody::Quiz(cards) if !cards.is_empty()))
    }
}

/// 单个渲染段落
#[derive(Debug, Clone)]
pub struct RenderedSection {
    /// 服务端产出的原始 key
    pub key: String,
    /// 展示标签
    pub label: String,
    pub body: SectionBody,
}

/// 段落内容，按解码时确定的形状分发
#[derive(Debug, Clone)]
pub enum SectionBody {
    /// markup 字符串，原样注入（信任服务端，不转义）
    Markup(String),
    /// pretty-print 的结构化文本兜底
    Structured(String),
    /// 交互式测验卡片
    Quiz(Vec<QuizCard>),
    /// 固定占位文案（空测验 / 测验渲染失败）
    Placeholder(&'static str),
}

/// 结果渲染器
///
/// 职责：
/// - 按 payload 顺序为每个输出产出一个带标签的段落
/// - quiz 段构建交互卡片，损坏时只降级本段落
/// - 不持有跨渲染的状态
#[derive(Debug, Default)]
pub struct ResultRenderer;

impl ResultRenderer {
    pub fn new() -> Self {
        Self
    }

    /// 渲染一次结果，产出整体替换式的文档
    pub fn render(&self, result: &RenderableResult) -> RenderedDocument {
        let header = format!("Results for: {}", result.url.as_deref().unwrap_or(""));

        let sections = result
            .outputs
            .iter()
            .map(|(key, value)| RenderedSection {
                key: key.clone(),
                label: nice_name(key).to_string(),
                body: Self::render_body(value),
            })
            .collect();

        RenderedDocument { header, sections }
    }

    fn render_body(value: &OutputValue) -> SectionBody {
        match value {
            OutputValue::Prose(markup) => SectionBody::Markup(markup.clone()),
            OutputValue::QuizList(questions) if questions.is_empty() => {
                SectionBody::Placeholder(NO_QUIZ_PLACEHOLDER)
            }
            OutputValue::QuizList(questions) => SectionBody::Quiz(
                questions
                    .iter()
                    .enumerate()
                    .map(|(index, question)| QuizCard::from_question(index + 1, question))
                    .collect(),
            ),
            OutputValue::QuizUnrenderable => SectionBody::Placeholder(QUIZ_FAILURE_PLACEHOLDER),
            OutputValue::Opaque(value) => SectionBody::Structured(
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: serde_json::Value) -> RenderedDocument {
        let result = RenderableResult::from_value(value).unwrap();
        ResultRenderer::new().render(&result)
    }

    #[test]
    fn test_single_summary_section_with_verbatim_markup() {
        let doc = render(json!({
            "url": "https://youtube.com/watch?v=abc",
            "outputs": { "summary": "<p>hi</p>" }
        }));

        assert_eq!(doc.header, "Results for: https://youtube.com/watch?v=abc");
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].label, "Short summary");
        assert!(matches!(&doc.sections[0].body, SectionBody::Markup(m) if m == "<p>hi</p>"));
    }

    #[test]
    fn test_header_with_missing_url_is_empty() {
        let doc = render(json!({ "outputs": {} }));
        assert_eq!(doc.header, "Results for: ");
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_unknown_kind_uses_raw_key_and_structured_body() {
        let doc = render(json!({
            "url": "u",
            "outputs": { "sentiment": { "score": 0.7, "label": "positive" } }
        }));

        assert_eq!(doc.sections[0].label, "sentiment");
        match &doc.sections[0].body {
            SectionBody::Structured(text) => {
                assert!(text.contains("\"score\""));
                // pretty-print，带缩进
                assert!(text.contains('\n'));
            }
            other => panic!("expected Structured, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_with_string_value_is_markup() {
        let doc = render(json!({
            "outputs": { "transcript": "<pre>…</pre>" }
        }));
        assert_eq!(doc.sections[0].label, "transcript");
        assert!(matches!(&doc.sections[0].body, SectionBody::Markup(_)));
    }

    #[test]
    fn test_empty_quiz_renders_placeholder() {
        let doc = render(json!({ "outputs": { "quiz": [] } }));

        assert_eq!(doc.sections[0].label, "Quizzes");
        assert!(matches!(
            &doc.sections[0].body,
            SectionBody::Placeholder(text) if *text == NO_QUIZ_PLACEHOLDER
        ));
        assert!(!doc.has_quiz());
    }

    #[test]
    fn test_broken_quiz_degrades_only_its_section() {
        let doc = render(json!({
            "outputs": {
                "quiz": [{ "bogus": true }],
                "summary": "<p>ok</p>"
            }
        }));

        assert!(matches!(
            &doc.sections[0].body,
            SectionBody::Placeholder(text) if *text == QUIZ_FAILURE_PLACEHOLDER
        ));
        assert!(matches!(&doc.sections[1].body, SectionBody::Markup(_)));
    }

    #[test]
    fn test_quiz_cards_numbered_in_order() {
        let mut doc = render(json!({
            "outputs": {
                "quiz": [
                    { "question": "q1", "options": ["a", "b"], "answer": 1 },
                    { "question": "q2", "options": ["c", "d"], "answer": 2 }
                ]
            }
        }));

        assert!(doc.has_quiz());
        let numbers: Vec<usize> = doc.quiz_cards_mut().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_sections_follow_payload_order() {
        let doc = render(json!({
            "outputs": {
                "flashcards": "<div/>",
                "summary": "<p/>",
                "keypoints": "<ul/>"
            }
        }));

        let labels: Vec<&str> = doc.sections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Flashcards", "Short summary", "Key takeaways"]);
    }

    #[test]
    fn test_nice_name_table() {
        assert_eq!(nice_name("summary"), "Short summary");
        assert_eq!(nice_name("detailed"), "Detailed notes");
        assert_eq!(nice_name("quiz"), "Quizzes");
        assert_eq!(nice_name("keypoints"), "Key takeaways");
        assert_eq!(nice_name("timestamps"), "Timestamps");
        assert_eq!(nice_name("flashcards"), "Flashcards");
        assert_eq!(nice_name("whatever"), "whatever");
    }
}
