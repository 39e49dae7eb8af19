//! # Training Copilot
//!
//! 一个观察网页测评并借助文本生成服务给出提示 / 答案的助手
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `PageHost` - 唯一的 page owner，提供脚本执行 / 快照 / 控件读写能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个关注点
//! - `CorpusStore` - 训练页面的追加与读取
//! - `extract` - 控件树 → 题目的纯归并
//! - `compose` - 语料 + 题目 → 提示词
//! - `InferenceClient` - 调用生成服务（TextGenerator 能力）
//! - `AnswerResolver` - 回答文本 → 选项回填
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次运行"的完整处理流程
//! - `Pipeline` - 流程编排（抽取 → 推理 → 上报 → 回填）
//! - `RunReporter` - 增量结果的递送界面
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/session` - 会话对象，挂接展示层命令
//! - `orchestrator/app` - 应用生命周期
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::connect_to_assessment_page;
pub use config::{Config, Theme};
pub use error::{AppError, InferenceFailure, Result};
pub use infrastructure::PageHost;
pub use models::{AnswerMode, ControlSurface, ControlTree, OptionHandle, Question, Status, TrainingPage};
pub use orchestrator::{App, Session};
pub use services::{AnswerResolver, CorpusStore, InferenceClient, Outcome, TextGenerator};
pub use workflow::{LogReporter, Pipeline, RunEvent, RunReporter};
