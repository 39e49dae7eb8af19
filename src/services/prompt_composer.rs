//! 提示词组装 - 业务能力层
//!
//! 语料在前、题目在后，嵌进固定模板；
//! 语料段按字符数截断而不是 token 数，这是已知的不精确之处

use crate::models::question::{AnswerMode, Question};
use crate::models::TrainingPage;
use crate::utils::text::clip_chars;

/// 语料段字符数上限
const MAX_CORPUS_CHARS: usize = 2000;

/// 组装一条完整提示词
///
/// 语料内容按插入顺序以空行分隔拼接，截断到前 2000 字符，
/// 放在题目文本之前；Hint / Auto 各用一个固定模板
pub fn compose(corpus: &[TrainingPage], question: &Question, mode: AnswerMode) -> String {
    let context = corpus_segment(corpus);
    match mode {
        AnswerMode::Hint => format!(
            r#"You are a study assistant embedded in a training page.

Reference material from previously captured pages:
{context}

Question:
{question}

Give the student a short hint that points in the right direction. Do not reveal the answer and do not name any option directly."#,
            context = context,
            question = question.text,
        ),
        AnswerMode::Auto => format!(
            r#"You are a study assistant embedded in a training page.

Reference material from previously captured pages:
{context}

Question:
{question}

Reply with the letter of the correct option: A, B, C or D. Reply with the single letter only, no explanation."#,
            context = context,
            question = question.text,
        ),
    }
}

/// 拼接并截断语料段
fn corpus_segment(corpus: &[TrainingPage]) -> String {
    let joined = corpus
        .iter()
        .map(|page| page.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    clip_chars(&joined, MAX_CORPUS_CHARS)
}
