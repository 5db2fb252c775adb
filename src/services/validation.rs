//! 表单校验 - 业务能力层
//!
//! 只负责把原始表单输入变成一个合法的 [`SubmissionRequest`]，
//! 不产生任何副作用，也不发起网络请求。

use url::Url;

use crate::error::ValidationError;
use crate::models::{OutputKind, SubmissionRequest};

/// 允许的视频站点域名（精确匹配或点分隔子域名）
const ALLOWED_HOSTS: [&str; 2] = ["youtube.com", "youtu.be"];

/// 表单校验器
///
/// 职责：
/// - URL 合法性和域名白名单检查
/// - 输出类型勾选检查
/// - 题数控件值的透传规则（只有勾选 quiz 时才携带）
#[derive(Debug, Default)]
pub struct SubmissionValidator;

impl SubmissionValidator {
    pub fn new() -> Self {
        Self
    }

    /// 校验一次表单输入
    ///
    /// # 参数
    /// - `raw_url`: URL 输入框的原始内容
    /// - `checked_outputs`: 勾选的输出类型
    /// - `raw_question_count`: 题数控件的当前值（控件不存在时为 None）
    ///
    /// # 返回
    /// 成功时返回可提交的请求；失败时返回第一个命中的校验错误。
    /// 题数不做数值校验，原样透传，由服务端决定如何解释。
    pub fn validate(
        &self,
        raw_url: &str,
        checked_outputs: &[OutputKind],
        raw_question_count: Option<&str>,
    ) -> Result<SubmissionRequest, ValidationError> {
        let url = raw_url.trim();
        if url.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        let parsed = Url::parse(url).map_err(|_| ValidationError::MalformedUrl)?;
        let host = parsed.host_str().ok_or(ValidationError::UnsupportedHost)?;
        if !is_supported_host(host) {
            return Err(ValidationError::UnsupportedHost);
        }

        if checked_outputs.is_empty() {
            return Err(ValidationError::NoOutputsSelected);
        }

        // 去重但保持勾选顺序
        let mut outputs: Vec<OutputKind> = Vec::new();
        for kind in checked_outputs {
            if !outputs.contains(kind) {
                outputs.push(*kind);
            }
        }

        // 未勾选 quiz 时强制清空题数，哪怕控件里残留旧值
        let question_count = if outputs.contains(&OutputKind::Quiz) {
            raw_question_count.map(|v| v.to_string())
        } else {
            None
        };

        Ok(SubmissionRequest {
            url: url.to_string(),
            outputs,
            question_count,
        })
    }
}

fn is_supported_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    ALLOWED_HOSTS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}
