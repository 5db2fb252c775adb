//! 提交流程 - 流程层
//!
//! 核心职责：定义"一次提交"的完整流程
//!
//! 流程顺序：
//! 1. 重入保护（提交中一律拒绝）
//! 2. 表单校验（失败不发请求）
//! 3. 网络调用（唯一的挂起点，无超时、无取消）
//! 4. 渲染或报错，无论哪条分支都回到 Idle

use tracing::{info, warn};

use crate::clients::SummarizeClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::OutputKind;
use crate::services::renderer::RenderedDocument;
use crate::services::{ResultRenderer, SubmissionValidator};

/// 一次提交的表单输入
///
/// 对应页面上的 URL 输入框、输出类型勾选项和题数控件，
/// 这里以显式参数传入，不做任何全局查找。
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub raw_url: String,
    pub checked_outputs: Vec<OutputKind>,
    /// 题数控件的当前值；控件未出现时为 None
    pub raw_question_count: Option<String>,
}

/// 提交状态机：`Idle → Submitting → (成功|失败) → Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

/// 一次提交的结果
#[derive(Debug)]
pub enum SubmitOutcome {
    /// 已有请求在途，本次被拒绝（无任何副作用）
    Rejected,
    /// 校验失败，携带面向用户的提示文案
    Invalid(String),
    /// 服务端返回非 2xx
    ServerError { status: u16, body: String },
    /// 传输或解码失败，携带底层错误信息
    Failed(String),
    /// 成功，携带渲染好的文档
    Rendered(RenderedDocument),
}

impl SubmitOutcome {
    /// 面向用户的单条状态文案；Rendered 没有状态文案（直接展示文档）
    pub fn status_message(&self) -> Option<String> {
        match self {
            SubmitOutcome::Rejected => Some("A request is already in flight.".to_string()),
            SubmitOutcome::Invalid(message) => Some(message.clone()),
            SubmitOutcome::ServerError { status, body } => {
                // 与页面行为一致：响应体为空时退回展示状态码
                let detail = if body.trim().is_empty() {
                    status.to_string()
                } else {
                    body.clone()
                };
                Some(format!("Server error: {}", detail))
            }
            SubmitOutcome::Failed(message) => Some(format!("Network error: {}", message)),
            SubmitOutcome::Rendered(_) => None,
        }
    }
}

/// 提交流程控制器
///
/// 职责：
/// - 持有提交状态机，防止重入
/// - 编排校验 → 网络调用 → 渲染
/// - 保证无论哪条分支结束都回到 Idle
pub struct RequestController {
    state: SubmitState,
    validator: SubmissionValidator,
    client: SummarizeClient,
    renderer: ResultRenderer,
}

impl RequestController {
    /// 创建新的提交流程控制器
    pub fn new(config: &Config) -> Self {
        Self::with_client(SummarizeClient::new(config))
    }

    /// 用指定客户端创建（测试用）
    pub fn with_client(client: SummarizeClient) -> Self {
        Self {
            state: SubmitState::Idle,
            validator: SubmissionValidator::new(),
            client,
            renderer: ResultRenderer::new(),
        }
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    /// 执行一次完整的提交流程
    ///
    /// 网络调用是唯一的挂起点；单线程事件循环里在途期间不会有
    /// 第二次调用，状态机守卫只是兜底。
    pub async fn submit(&mut self, form: &FormInput) -> SubmitOutcome {
        if self.state == SubmitState::Submitting {
            warn!("⚠️ 已有请求在途，拒绝重复提交");
            return SubmitOutcome::Rejected;
        }

        // 校验失败不改变状态，也不发请求
        let request = match self.validator.validate(
            &form.raw_url,
            &form.checked_outputs,
            form.raw_question_count.as_deref(),
        ) {
            Ok(request) => request,
            Err(e) => return SubmitOutcome::Invalid(e.to_string()),
        };

        self.state = SubmitState::Submitting;
        info!("📤 正在提交 summarize 请求: {}", request.url);

        let outcome = match self.client.submit(&request).await {
            Ok(result) => {
                info!("✓ 响应解码成功，共 {} 个输出段", result.outputs.len());
                SubmitOutcome::Rendered(self.renderer.render(&result))
            }
            Err(ApiError::HttpStatus { status, body }) => {
                warn!("⚠️ 服务端返回错误状态: {}", status);
                SubmitOutcome::ServerError { status, body }
            }
            // 传输和解码失败不作区分，统一按网络错误展示底层信息
            Err(ApiError::RequestFailed { source, .. }) => {
                warn!("⚠️ 请求传输失败: {}", source);
                SubmitOutcome::Failed(source.to_string())
            }
            Err(ApiError::JsonParseFailed { source }) => {
                warn!("⚠️ 响应解码失败: {}", source);
                SubmitOutcome::Failed(source.to_string())
            }
        };

        // 无论成功、服务端错误还是传输失败，都恢复可提交状态
        self.state = SubmitState::Idle;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> RequestController {
        RequestController::with_client(SummarizeClient::with_endpoint(
            "http://127.0.0.1:1/api/summarize",
        ))
    }

    #[test]
    fn test_validation_failure_keeps_idle_and_surfaces_message() {
        let mut controller = controller();
        let form = FormInput {
            raw_url: "https://vimeo.com/1".to_string(),
            checked_outputs: vec![OutputKind::Summary],
            raw_question_count: None,
        };

        let outcome = tokio_test::block_on(controller.submit(&form));

        match &outcome {
            SubmitOutcome::Invalid(message) => {
                assert_eq!(message, "That does not look like a YouTube URL.");
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(controller.state(), SubmitState::Idle);
    }

    #[test]
    fn test_reentrant_submit_is_rejected() {
        let mut controller = controller();
        controller.state = SubmitState::Submitting;

        let form = FormInput {
            raw_url: "https://youtu.be/x".to_string(),
            checked_outputs: vec![OutputKind::Summary],
            raw_question_count: None,
        };

        let outcome = tokio_test::block_on(controller.submit(&form));
        assert!(matches!(outcome, SubmitOutcome::Rejected));
        // 守卫不改变在途状态
        assert_eq!(controller.state(), SubmitState::Submitting);
    }

    #[tokio::test]
    async fn test_transport_failure_settles_back_to_idle() {
        let mut controller = controller();
        let form = FormInput {
            raw_url: "https://youtu.be/x".to_string(),
            checked_outputs: vec![OutputKind::Summary],
            raw_question_count: None,
        };

        let outcome = controller.submit(&form).await;

        match &outcome {
            SubmitOutcome::Failed(_) => {}
            other => panic!("expected Failed, got {:?}", other),
        }
        let message = outcome.status_message().unwrap();
        assert!(message.starts_with("Network error: "));
        assert_eq!(controller.state(), SubmitState::Idle);
    }

    #[test]
    fn test_server_error_status_message_prefers_body() {
        let with_body = SubmitOutcome::ServerError {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(
            with_body.status_message().as_deref(),
            Some("Server error: boom")
        );

        let without_body = SubmitOutcome::ServerError {
            status: 404,
            body: "  ".to_string(),
        };
        assert_eq!(
            without_body.status_message().as_deref(),
            Some("Server error: 404")
        );
    }
}
