//! 错误类型定义
//!
//! 按领域拆分的错误层次：浏览器 / 语料库 / 推理服务
//! 单题粒度的失败永远不会穿透到整个批次

use thiserror::Error;

/// 统一的 Result 别名
pub type Result<T> = std::result::Result<T, AppError>;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 语料库持久化错误
    #[error("语料库错误: {0}")]
    Store(#[from] StoreError),
    /// 推理服务错误
    #[error("推理服务错误: {0}")]
    Inference(#[from] InferenceFailure),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 执行脚本失败
    #[error("执行脚本失败: {source}")]
    ScriptExecutionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 页面快照反序列化失败
    #[error("页面快照解析失败: {source}")]
    SnapshotDecodeFailed {
        #[source]
        source: serde_json::Error,
    },
    /// 控件引用已失效（页面结构变化）
    #[error("控件引用失效: 控件 #{control}")]
    StaleControl { control: usize },
}

/// 语料库持久化错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 读写语料文件失败
    #[error("语料文件读写失败: {0}")]
    Io(#[from] std::io::Error),
    /// 语料序列化/反序列化失败
    #[error("语料序列化失败: {0}")]
    Serde(#[from] serde_json::Error),
}

/// 推理服务失败
///
/// 单个问题的推理失败只影响该问题，由调用方决定如何向用户呈现
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceFailure {
    /// 传输层非成功状态
    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },
    /// 端点返回了应用级错误标记
    #[error("{0}")]
    Service(String),
    /// 网络异常（连接失败、超时等）
    #[error("请求失败: {0}")]
    Transport(String),
}

impl InferenceFailure {
    /// 面向用户的失败原因文本
    pub fn reason(&self) -> String {
        self.to_string()
    }
}
