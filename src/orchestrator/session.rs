//! 会话对象 - 编排层
//!
//! 展示层构造一次、持有引用；三个命令处理器都挂在这里。
//! 语料库在一次运行内只读（run 开始时取快照视图），
//! 捕获页面是独立操作，只会在两次运行之间交错发生

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::infrastructure::PageHost;
use crate::models::question::AnswerMode;
use crate::models::{Status, StatusCell};
use crate::services::{CorpusStore, InferenceClient};
use crate::workflow::{LogReporter, Pipeline};

/// 会话对象
pub struct Session {
    store: CorpusStore,
    host: PageHost,
    client: Arc<InferenceClient>,
    pipeline: Pipeline,
    status: StatusCell,
    widget_visible: bool,
}

impl Session {
    /// 构造会话：加载语料库并装配流水线
    pub async fn new(config: &Config, host: PageHost) -> Self {
        let status = StatusCell::new();
        let store = CorpusStore::load(&config.corpus_path).await;
        let client = Arc::new(InferenceClient::new(config, status.clone()));
        let reporter = Arc::new(LogReporter::new(config.verbose_logging));
        let pipeline = Pipeline::new(config, client.clone(), reporter);

        Self {
            store,
            host,
            client,
            pipeline,
            status,
            widget_visible: false,
        }
    }

    /// 命令：切换悬浮窗可见性
    ///
    /// 视觉呈现归展示层管，这里只维护状态
    pub fn toggle_widget(&mut self) -> bool {
        self.widget_visible = !self.widget_visible;
        info!(
            "悬浮窗{}",
            if self.widget_visible { "已显示" } else { "已隐藏" }
        );
        self.widget_visible
    }

    /// 命令：捕获当前页面并追加到语料库
    ///
    /// 落盘失败只告警不中断（本次捕获仍保留在内存中）
    pub async fn capture_page(&mut self) -> Result<()> {
        let page = self.host.capture_training_page().await?;
        info!(
            "📚 已捕获页面: {} ({} 字符)",
            page.title,
            page.content.chars().count()
        );
        if let Err(e) = self.store.append(page).await {
            warn!("⚠️ 语料写入失败: {}", e);
        }
        info!("📖 语料库现有 {} 个页面", self.store.count());
        Ok(())
    }

    /// 命令：执行一次流水线
    pub async fn run_pipeline(&self, mode: AnswerMode) -> Result<()> {
        let tree = self.host.control_tree().await?;
        self.pipeline
            .run(&self.host, &tree, self.store.all(), mode)
            .await
    }

    /// 探测推理端点（启动时调用，失败只告警）
    pub async fn probe_inference(&self) {
        match self.client.health().await {
            Ok(health) => {
                if health.ollama == "connected" {
                    info!("✓ 推理服务就绪 (ollama: {})", health.ollama);
                } else {
                    warn!("⚠️ 推理服务状态: {} (ollama: {})", health.status, health.ollama);
                }
            }
            Err(e) => warn!("⚠️ 推理服务探测失败: {}", e),
        }

        match self.client.list_models().await {
            Ok(models) if !models.is_empty() => {
                info!("✓ 可用模型: {}", models.join(", "));
            }
            Ok(_) => warn!("⚠️ 服务端没有可用模型"),
            Err(e) => warn!("⚠️ 获取模型列表失败: {}", e),
        }
    }

    /// 当前状态指示
    pub fn status(&self) -> Status {
        self.status.get()
    }

    /// 语料库页面数量
    pub fn corpus_count(&self) -> usize {
        self.store.count()
    }

    pub fn widget_visible(&self) -> bool {
        self.widget_visible
    }
}
