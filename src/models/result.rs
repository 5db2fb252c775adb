//! summarize 结果的数据模型
//!
//! 服务端返回的 `outputs` 是异构的：prose 类输出是 markup 字符串，
//! `"quiz"` 是题目数组，其余形状一律按结构化文本兜底展示。
//! 形状判定在解码时一次性完成（[`OutputValue`] 带判别标签），
//! 渲染阶段不再反射式地检查 JSON 类型。

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// 单道测验题
#[derive(Debug, Clone, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// 正确选项的 1-based 序号；越界（含 0）表示没有任何选项是正确答案
    #[serde(default, deserialize_with = "deserialize_answer")]
    pub answer: u32,
    #[serde(default)]
    pub explanation: String,
}

impl QuizQuestion {
    /// 1-based 选项序号是否为正确答案
    pub fn is_correct_option(&self, position: usize) -> bool {
        position as u64 == self.answer as u64 && position >= 1
    }
}

// answer 字段兼容数字和数字字符串两种 wire 形式
fn deserialize_answer<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct AnswerVisitor;

    impl<'de> Visitor<'de> for AnswerVisitor {
        type Value = u32;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a 1-based answer index as integer or string")
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(u32::try_from(value).unwrap_or(u32::MAX))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            // 负数当作越界处理，渲染时不会标记任何选项
            Ok(u32::try_from(value).unwrap_or(u32::MAX))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            value.trim().parse::<u32>().map_err(serde::de::Error::custom)
        }
    }

    deserializer.deserialize_any(AnswerVisitor)
}

/// 解码后的单个输出值，判别标签在解码时确定
#[derive(Debug, Clone)]
pub enum OutputValue {
    /// 可直接注入的 markup 字符串（信任服务端，不做转义）
    Prose(String),
    /// `"quiz"` key 下的题目列表（可能为空，渲染层负责占位文案）
    QuizList(Vec<QuizQuestion>),
    /// `"quiz"` key 下的数组无法解码成题目列表，只降级该段落
    QuizUnrenderable,
    /// 其他形状，渲染为 pretty-print 的结构化文本
    Opaque(Value),
}

/// 解码后的 summarize 结果
///
/// `outputs` 保持服务端 payload 的插入顺序；key 是服务端实际产出的
/// 输出类型，不一定等于请求时勾选的类型。
#[derive(Debug, Clone)]
pub struct RenderableResult {
    pub url: Option<String>,
    pub outputs: Vec<(String, OutputValue)>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    outputs: serde_json::Map<String, Value>,
}

impl RenderableResult {
    /// 从响应体文本解码并完成形状判定
    pub fn from_json_str(body: &str) -> Result<Self, serde_json::Error> {
        let raw: RawResult = serde_json::from_str(body)?;
        Ok(Self::resolve(raw))
    }

    /// 从已解析的 JSON 值解码（测试和离线场景用）
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let raw: RawResult = serde_json::from_value(value)?;
        Ok(Self::resolve(raw))
    }

    fn resolve(raw: RawResult) -> Self {
        let outputs = raw
            .outputs
            .into_iter()
            .map(|(key, value)| {
                let resolved = Self::resolve_value(&key, value);
                (key, resolved)
            })
            .collect();

        Self {
            url: raw.url,
            outputs,
        }
    }

    fn resolve_value(key: &str, value: Value) -> OutputValue {
        if key == "quiz" {
            // 非数组的 quiz 值等价于"没有题目"，走占位文案而不是失败
            if !value.is_array() {
                return OutputValue::QuizList(Vec::new());
            }
            return match serde_json::from_value::<Vec<QuizQuestion>>(value) {
                Ok(questions) => OutputValue::QuizList(questions),
                Err(e) => {
                    warn!("⚠️ quiz 数据解码失败，降级为占位段落: {}", e);
                    OutputValue::QuizUnrenderable
                }
            };
        }

        match value {
            Value::String(text) => OutputValue::Prose(text),
            other => OutputValue::Opaque(other),
        }
    }
}
