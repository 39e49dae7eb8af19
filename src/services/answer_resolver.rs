//! 答案解析 - 业务能力层
//!
//! 把模型的自由文本回答映射到一个离散选项并回填。
//! 只做一次 set 操作：单选组的互斥由页面原生语义保证

use regex::Regex;

use crate::error::Result;
use crate::models::question::{ControlSurface, Question};

/// 解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 已回填到对应选项（0 起下标）
    Applied(usize),
    /// 回答中没有可解析的字母
    NoMatch,
    /// 字母对应的下标超出选项数量
    OutOfRange,
}

/// 答案解析器
#[derive(Debug, Default)]
pub struct AnswerResolver;

impl AnswerResolver {
    pub fn new() -> Self {
        Self
    }

    /// 从回答文本解析出选项并回填
    ///
    /// 取第一个独立出现的字母 A–D（不区分大小写），映射为 0 起下标；
    /// 下标落在选项范围内时把该选项置为选中。
    /// NoMatch / OutOfRange 都不算错误，由调用方静默跳过
    pub async fn resolve(
        &self,
        answer: &str,
        question: &Question,
        surface: &dyn ControlSurface,
    ) -> Result<Outcome> {
        let letter_pattern = Regex::new(r"(?i)\b([a-d])\b")
            .map_err(|e| crate::error::AppError::Other(e.to_string()))?;

        let letter = match letter_pattern
            .captures(answer)
            .and_then(|captures| captures.get(1))
        {
            Some(m) => m.as_str().chars().next().unwrap_or('A'),
            None => return Ok(Outcome::NoMatch),
        };

        let index = (letter.to_ascii_uppercase() as u8 - b'A') as usize;
        if index >= question.options.len() {
            return Ok(Outcome::OutOfRange);
        }

        surface.set_checked(&question.options[index], true).await?;
        Ok(Outcome::Applied(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::models::dom::ControlKind;
    use crate::models::question::OptionHandle;

    /// 记录 set 调用的内存替身
    #[derive(Default)]
    struct RecordingSurface {
        sets: Mutex<Vec<(usize, bool)>>,
    }

    #[async_trait]
    impl ControlSurface for RecordingSurface {
        async fn set_checked(&self, handle: &OptionHandle, checked: bool) -> Result<()> {
            self.sets.lock().unwrap().push((handle.control, checked));
            Ok(())
        }

        async fn is_checked(&self, handle: &OptionHandle) -> Result<bool> {
            Ok(self
                .sets
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(control, _)| *control == handle.control)
                .map(|(_, checked)| *checked)
                .unwrap_or(false))
        }
    }

    fn question_with_options(count: usize) -> Question {
        Question {
            id: 0,
            text: "题目".to_string(),
            options: (0..count)
                .map(|i| OptionHandle {
                    control: i,
                    kind: ControlKind::Radio,
                })
                .collect(),
        }
    }

    #[test]
    fn letter_in_sentence_maps_to_index() {
        let surface = RecordingSurface::default();
        let question = question_with_options(4);
        let outcome = tokio_test::block_on(AnswerResolver::new().resolve(
            "The answer is B.",
            &question,
            &surface,
        ))
        .unwrap();
        assert_eq!(outcome, Outcome::Applied(1));
        assert_eq!(*surface.sets.lock().unwrap(), vec![(1, true)]);
    }

    #[test]
    fn lowercase_letter_also_matches() {
        let surface = RecordingSurface::default();
        let question = question_with_options(4);
        let outcome = tokio_test::block_on(AnswerResolver::new().resolve(
            "我认为应该选 c",
            &question,
            &surface,
        ))
        .unwrap();
        assert_eq!(outcome, Outcome::Applied(2));
    }

    #[test]
    fn letter_inside_word_does_not_match() {
        let surface = RecordingSurface::default();
        let question = question_with_options(4);
        let outcome = tokio_test::block_on(AnswerResolver::new().resolve(
            "I am not sure",
            &question,
            &surface,
        ))
        .unwrap();
        assert_eq!(outcome, Outcome::NoMatch);
        assert!(surface.sets.lock().unwrap().is_empty());
    }

    #[test]
    fn out_of_range_letter_applies_nothing() {
        let surface = RecordingSurface::default();
        let question = question_with_options(1);
        let outcome = tokio_test::block_on(AnswerResolver::new().resolve(
            "The answer is B.",
            &question,
            &surface,
        ))
        .unwrap();
        assert_eq!(outcome, Outcome::OutOfRange);
        assert!(surface.sets.lock().unwrap().is_empty());
    }

    #[test]
    fn only_first_letter_is_applied() {
        let surface = RecordingSurface::default();
        let question = question_with_options(4);
        let outcome = tokio_test::block_on(AnswerResolver::new().resolve(
            "A or maybe D",
            &question,
            &surface,
        ))
        .unwrap();
        assert_eq!(outcome, Outcome::Applied(0));
        assert_eq!(surface.sets.lock().unwrap().len(), 1);
    }
}
