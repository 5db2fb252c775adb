/// summarize API 客户端
///
/// 封装与 summarize 后端相关的所有调用逻辑
use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{RenderableResult, SubmissionRequest};

/// summarize API 客户端
pub struct SummarizeClient {
    http: Client,
    endpoint: String,
}

impl SummarizeClient {
    /// 创建新的 summarize 客户端
    ///
    /// 不设置请求超时，使用网络层默认值；也不做任何重试。
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            endpoint: format!(
                "{}/api/summarize",
                config.api_base_url.trim_end_matches('/')
            ),
        }
    }

    /// 指定完整 endpoint 创建客户端（测试用）
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 提交一次 summarize 请求
    ///
    /// # 参数
    /// - `request`: 已通过校验的请求体
    ///
    /// # 返回
    /// 成功时返回解码并完成形状判定的结果；
    /// 非 2xx 状态返回 [`ApiError::HttpStatus`]（携带状态码和原始响应体），
    /// 传输失败返回 [`ApiError::RequestFailed`]，
    /// 响应体解码失败返回 [`ApiError::JsonParseFailed`]。
    pub async fn submit(&self, request: &SubmissionRequest) -> Result<RenderableResult, ApiError> {
        debug!(
            "提交 Payload: {}",
            serde_json::to_string(request).unwrap_or_default()
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: self.endpoint.clone(),
                source: Box::new(e),
            })?;

        let status = response.status();
        if !status.is_success() {
            // 错误响应体可能是任意文本，原样带回去展示
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| ApiError::RequestFailed {
            endpoint: self.endpoint.clone(),
            source: Box::new(e),
        })?;

        debug!("响应体长度: {} 字节", body.len());

        RenderableResult::from_json_str(&body).map_err(|e| ApiError::JsonParseFailed {
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_built_from_base_url() {
        let mut config = Config::default();
        config.api_base_url = "http://localhost:3000/".to_string();

        let client = SummarizeClient::new(&config);
        assert_eq!(client.endpoint(), "http://localhost:3000/api/summarize");
    }

    /// 连不上的地址应该报传输错误而不是 panic
    #[tokio::test]
    async fn test_unreachable_endpoint_is_request_failed() {
        let client = SummarizeClient::with_endpoint("http://127.0.0.1:1/api/summarize");
        let request = SubmissionRequest {
            url: "https://youtu.be/x".to_string(),
            outputs: vec![crate::models::OutputKind::Summary],
            question_count: None,
        };

        match client.submit(&request).await {
            Err(ApiError::RequestFailed { .. }) => {}
            other => panic!("expected RequestFailed, got {:?}", other.map(|_| ())),
        }
    }
}
