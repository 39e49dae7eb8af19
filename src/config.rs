/// 界面主题
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// 程序配置
///
/// 固定的命名选项，在构造时一次性提供；
/// 不读取命令行、配置文件或环境变量
#[derive(Clone, Debug)]
pub struct Config {
    /// 推理端点（生成接口完整 URL）
    pub endpoint: String,
    /// 模型标识
    pub model: String,
    /// 悬浮窗主题
    pub theme: Theme,
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 目标页面 URL（None 时附着到当前活动页面）
    pub target_url: Option<String>,
    /// 语料库文件路径
    pub corpus_path: String,
    /// 相邻推理请求之间的间隔（毫秒）
    pub request_interval_ms: u64,
    /// 是否自动回填答案（false 时仅给提示）
    pub auto_fill: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:3000/api/generate".to_string(),
            model: "llama2".to_string(),
            theme: Theme::Dark,
            browser_debug_port: 2001,
            target_url: None,
            corpus_path: "training_pages.json".to_string(),
            request_interval_ms: 1000,
            auto_fill: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 推理端点所在服务的基础 URL（用于 /api/models、/health 等辅助接口）
    pub fn endpoint_base(&self) -> String {
        match self.endpoint.rfind("/api/") {
            Some(pos) => self.endpoint[..pos].to_string(),
            None => self.endpoint.trim_end_matches('/').to_string(),
        }
    }
}
