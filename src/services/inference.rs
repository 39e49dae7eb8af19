//! 推理客户端 - 业务能力层
//!
//! 只负责"调一次生成接口"的能力，不关心流程。
//! 所有失败都以类型化的 InferenceFailure 返回，绝不向外抛异常；
//! 调用期间同步更新状态指示（Processing… → Ready / Error）

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{InferenceFailure, Result};
use crate::models::{Status, StatusCell};

/// 文本生成能力
///
/// 流水线只依赖这个 trait，测试用替身实现即可脱离网络
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// 向生成服务发送一条提示词，返回生成文本或类型化失败
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> std::result::Result<String, InferenceFailure>;
}

/// 生成接口请求体
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// 生成接口响应体
///
/// error 字段可能是布尔也可能是错误文本，按"真值"处理
#[derive(Debug, Default, Deserialize)]
struct GenerateReply {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

/// 模型列表响应体
#[derive(Debug, Default, Deserialize)]
struct ModelsReply {
    #[serde(default)]
    models: Vec<String>,
}

/// 健康检查响应体
#[derive(Debug, Default, Deserialize)]
pub struct ServiceHealth {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub ollama: String,
}

/// 推理客户端
///
/// 职责：
/// - 调用生成接口（POST {endpoint}，JSON 体 {model, prompt, stream:false}）
/// - 维护展示层可读的状态指示
/// - 提供模型列表 / 健康检查辅助接口
pub struct InferenceClient {
    http: reqwest::Client,
    endpoint: String,
    base_url: String,
    status: StatusCell,
}

impl InferenceClient {
    /// 创建新的推理客户端
    pub fn new(config: &Config, status: StatusCell) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            base_url: config.endpoint_base(),
            status,
        }
    }

    /// 列出服务端可用的模型
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/models", self.base_url);
        let reply = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| InferenceFailure::Transport(e.to_string()))?
            .json::<ModelsReply>()
            .await
            .map_err(|e| InferenceFailure::Transport(e.to_string()))?;
        Ok(reply.models)
    }

    /// 查询服务端健康状态
    pub async fn health(&self) -> Result<ServiceHealth> {
        let url = format!("{}/health", self.base_url);
        let health = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| InferenceFailure::Transport(e.to_string()))?
            .json::<ServiceHealth>()
            .await
            .map_err(|e| InferenceFailure::Transport(e.to_string()))?;
        Ok(health)
    }

    async fn request_generation(
        &self,
        model: &str,
        prompt: &str,
    ) -> std::result::Result<String, InferenceFailure> {
        debug!("调用生成接口，模型: {}，提示词长度: {} 字符", model, prompt.chars().count());

        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
        };
        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceFailure::Transport(e.to_string()))?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| InferenceFailure::Transport(e.to_string()))?;

        interpret_reply(status, &raw)
    }
}

#[async_trait]
impl TextGenerator for InferenceClient {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> std::result::Result<String, InferenceFailure> {
        self.status.set(Status::Processing);
        let result = self.request_generation(model, prompt).await;
        match &result {
            Ok(_) => {
                debug!("生成接口调用成功");
                self.status.set(Status::Ready);
            }
            Err(failure) => {
                warn!("生成接口调用失败: {}", failure.reason());
                self.status.set(Status::Error);
            }
        }
        result
    }
}

/// 解读生成接口的响应
///
/// - 非 2xx 状态：HTTP {status}: {statusText}
/// - 响应体带真值 error 标记：应用级失败，携带 message（缺省 "AI error"）
/// - 其余情况取 response 字段，缺失时取空串
fn interpret_reply(
    status: reqwest::StatusCode,
    raw: &str,
) -> std::result::Result<String, InferenceFailure> {
    if !status.is_success() {
        return Err(InferenceFailure::Http {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    let reply: GenerateReply = serde_json::from_str(raw)
        .map_err(|e| InferenceFailure::Transport(format!("响应体解析失败: {}", e)))?;

    if let Some(indicator) = &reply.error {
        if is_truthy(indicator) {
            let message = reply
                .message
                .or_else(|| indicator.as_str().map(str::to_string))
                .unwrap_or_else(|| "AI error".to_string());
            return Err(InferenceFailure::Service(message));
        }
    }

    Ok(reply.response.unwrap_or_default())
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Number(n) => n.as_f64() != Some(0.0),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn success_reply_returns_response_field() {
        let result = interpret_reply(StatusCode::OK, r#"{"response":"答案是 B"}"#);
        assert_eq!(result.unwrap(), "答案是 B");
    }

    #[test]
    fn missing_response_defaults_to_empty() {
        let result = interpret_reply(StatusCode::OK, r#"{"success":true}"#);
        assert_eq!(result.unwrap(), "");
    }

    #[test]
    fn error_flag_with_message_becomes_service_failure() {
        let result = interpret_reply(
            StatusCode::OK,
            r#"{"error":true,"message":"model not loaded"}"#,
        );
        assert_eq!(
            result.unwrap_err(),
            InferenceFailure::Service("model not loaded".to_string())
        );
    }

    #[test]
    fn error_flag_without_message_uses_default_reason() {
        let result = interpret_reply(StatusCode::OK, r#"{"error":true}"#);
        assert_eq!(
            result.unwrap_err(),
            InferenceFailure::Service("AI error".to_string())
        );
    }

    #[test]
    fn string_error_indicator_carries_its_text() {
        let result = interpret_reply(StatusCode::OK, r#"{"error":"Ollama returned 500"}"#);
        assert_eq!(
            result.unwrap_err(),
            InferenceFailure::Service("Ollama returned 500".to_string())
        );
    }

    #[test]
    fn false_error_flag_is_not_a_failure() {
        let result = interpret_reply(StatusCode::OK, r#"{"error":false,"response":"ok"}"#);
        assert_eq!(result.unwrap(), "ok");
    }

    #[test]
    fn non_success_status_maps_to_http_failure() {
        let result = interpret_reply(StatusCode::INTERNAL_SERVER_ERROR, "");
        let failure = result.unwrap_err();
        assert_eq!(
            failure,
            InferenceFailure::Http {
                status: 500,
                status_text: "Internal Server Error".to_string(),
            }
        );
        assert_eq!(failure.reason(), "HTTP 500: Internal Server Error");
    }
}
