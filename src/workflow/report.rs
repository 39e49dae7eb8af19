//! 运行事件上报
//!
//! 流水线通过 RunReporter 向展示层递送增量结果；
//! 展示层负责把事件翻译成用户可见的文本，这里不做任何渲染

use tracing::{info, warn};

use crate::utils::text::preview;

/// 一次运行期间产生的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// 单题结果行
    Result {
        /// 题目抽取顺序下标（0 起）
        index: usize,
        /// 题干预览
        question_preview: String,
        /// 模型回答原文
        answer: String,
    },
    /// 页面上没有任何可选控件
    NoControlsFound,
    /// 分组后没有得到任何题目
    NoQuestionsFound,
    /// 本次运行结束
    Completed,
}

/// 运行事件消费方
pub trait RunReporter: Send + Sync {
    fn report(&self, event: &RunEvent);
}

/// 基于 tracing 的默认展示适配
pub struct LogReporter {
    verbose: bool,
}

impl LogReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl RunReporter for LogReporter {
    fn report(&self, event: &RunEvent) {
        match event {
            RunEvent::Result {
                index,
                question_preview,
                answer,
            } => {
                info!("[题目 {}] 题干: {}", index + 1, question_preview);
                let shown = if self.verbose {
                    answer.clone()
                } else {
                    preview(answer, 200)
                };
                info!("[题目 {}] 🤖 回答: {}", index + 1, shown);
            }
            RunEvent::NoControlsFound => {
                warn!("⚠️ 页面上没有找到可选控件");
            }
            RunEvent::NoQuestionsFound => {
                warn!("⚠️ 没有归并出任何题目");
            }
            RunEvent::Completed => {
                info!("✓ 本次运行结束");
            }
        }
    }
}
