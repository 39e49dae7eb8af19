//! 流程层（Workflow Layer）
//!
//! 定义"一次运行"的完整处理流程：
//! 抽取 → （逐题）组装提示词 → 推理 → 上报 → （Auto 模式）回填
//!
//! 本层不持有任何资源（page / 语料文件），只依赖业务能力（services）

pub mod pipeline;
pub mod report;

pub use pipeline::Pipeline;
pub use report::{LogReporter, RunEvent, RunReporter};
