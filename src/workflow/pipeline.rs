//! 批改流水线 - 流程层
//!
//! 一次 run 的编排：
//! 1. 控件树为空 → 上报 no-controls-found，干净终止
//! 2. 抽取题目；为空 → 上报 no-questions-found，干净终止
//! 3. 按抽取顺序逐题：组装提示词 → 推理 → 上报 →（Auto）回填
//!
//! 推理调用严格串行，相邻调用之间隔固定间隔；
//! 单题失败只影响该题，循环继续直到上报 completed

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::models::dom::ControlTree;
use crate::models::question::{AnswerMode, ControlSurface};
use crate::models::TrainingPage;
use crate::services::answer_resolver::AnswerResolver;
use crate::services::{compose, extract, TextGenerator};
use crate::utils::text::preview;
use crate::workflow::report::{RunEvent, RunReporter};

/// 单次运行处理的题目上限
const MAX_QUESTIONS_PER_RUN: usize = 5;

/// 题干预览长度
const QUESTION_PREVIEW_CHARS: usize = 80;

/// 批改流水线
///
/// 职责：
/// - 编排一次完整的运行
/// - 决定何时抽取、何时推理、何时回填
/// - 不持有 page，控件操作通过 ControlSurface 进行
pub struct Pipeline {
    generator: Arc<dyn TextGenerator>,
    reporter: Arc<dyn RunReporter>,
    resolver: AnswerResolver,
    model: String,
    request_interval: Duration,
}

impl Pipeline {
    /// 创建新的流水线
    pub fn new(
        config: &Config,
        generator: Arc<dyn TextGenerator>,
        reporter: Arc<dyn RunReporter>,
    ) -> Self {
        Self {
            generator,
            reporter,
            resolver: AnswerResolver::new(),
            model: config.model.clone(),
            request_interval: Duration::from_millis(config.request_interval_ms),
        }
    }

    /// 执行一次运行
    ///
    /// 副作用式接口：增量结果通过 reporter 递送，不返回聚合结果。
    /// 返回 Err 仅出现在运行级故障（如快照失效），单题失败不会传播
    pub async fn run(
        &self,
        surface: &dyn ControlSurface,
        tree: &ControlTree,
        corpus: &[TrainingPage],
        mode: AnswerMode,
    ) -> Result<()> {
        if tree.control_count() == 0 {
            self.reporter.report(&RunEvent::NoControlsFound);
            return Ok(());
        }

        let questions = extract(tree);
        if questions.is_empty() {
            self.reporter.report(&RunEvent::NoQuestionsFound);
            return Ok(());
        }

        let total = questions.len().min(MAX_QUESTIONS_PER_RUN);
        debug!("抽取到 {} 个题目，本次处理 {} 个", questions.len(), total);

        for (sequence, question) in questions.iter().take(MAX_QUESTIONS_PER_RUN).enumerate() {
            // 相邻推理调用之间的固定间隔，成功失败都等
            if sequence > 0 {
                sleep(self.request_interval).await;
            }

            let prompt = compose(corpus, question, mode);
            match self.generator.generate(&self.model, &prompt).await {
                Ok(answer) => {
                    self.reporter.report(&RunEvent::Result {
                        index: question.id,
                        question_preview: preview(&question.text, QUESTION_PREVIEW_CHARS),
                        answer: answer.clone(),
                    });

                    if mode == AnswerMode::Auto {
                        match self.resolver.resolve(&answer, question, surface).await {
                            Ok(outcome) => {
                                debug!("[题目 {}] 回填结果: {:?}", question.id + 1, outcome)
                            }
                            Err(e) => {
                                warn!("[题目 {}] ⚠️ 回填失败: {}", question.id + 1, e)
                            }
                        }
                    }
                }
                Err(failure) => {
                    // 单题失败已由客户端置状态，这里记录后继续下一题
                    warn!(
                        "[题目 {}] ⚠️ 推理失败: {}",
                        question.id + 1,
                        failure.reason()
                    );
                }
            }
        }

        self.reporter.report(&RunEvent::Completed);
        Ok(())
    }
}
