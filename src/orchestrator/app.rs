//! 应用生命周期 - 编排层

use chromiumoxide::Browser;
use tracing::info;

use crate::browser::connect_to_assessment_page;
use crate::config::Config;
use crate::error::Result;
use crate::infrastructure::PageHost;
use crate::models::question::AnswerMode;
use crate::orchestrator::session::Session;

/// 应用主结构
pub struct App {
    config: Config,
    // 保持浏览器连接存活直到运行结束
    _browser: Browser,
    session: Session,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        // 连接浏览器并定位测评页面
        let (browser, page) =
            connect_to_assessment_page(config.browser_debug_port, config.target_url.as_deref())
                .await?;

        let session = Session::new(&config, PageHost::new(page)).await;

        Ok(Self {
            config,
            _browser: browser,
            session,
        })
    }

    /// 运行应用主逻辑：捕获当前页面，然后执行一次流水线
    pub async fn run(mut self) -> Result<()> {
        // 探测推理端点（失败只告警，不中断）
        self.session.probe_inference().await;

        self.session.toggle_widget();
        self.session.capture_page().await?;

        let mode = if self.config.auto_fill {
            AnswerMode::Auto
        } else {
            AnswerMode::Hint
        };
        self.session.run_pipeline(mode).await?;

        log_finished(&self.session);
        Ok(())
    }

    /// 会话访问（测试与上层展示用）
    pub fn session(&mut self) -> &mut Session {
        &mut self.session
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 测评页面助手");
    info!("🤖 推理端点: {} (模型: {})", config.endpoint, config.model);
    info!(
        "📝 模式: {} | 主题: {:?}",
        if config.auto_fill { "自动回填" } else { "仅提示" },
        config.theme
    );
    info!("{}", "=".repeat(60));
}

fn log_finished(session: &Session) {
    info!("{}", "─".repeat(60));
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📖 语料库页面: {}", session.corpus_count());
    info!("📊 面板状态: {}", session.status());
    info!("{}", "─".repeat(60));
}
