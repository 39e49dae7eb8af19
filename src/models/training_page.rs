use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::utils::text::clip_chars;

/// 训练页面快照
///
/// 捕获当前活动页面得到；创建后不可变，只会被追加进语料库，
/// 不会被修改或删除（允许同一 url 重复捕获）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingPage {
    pub url: String,
    pub title: String,
    /// 页面正文（最多 5000 字符）
    pub content: String,
    pub captured_at: DateTime<Local>,
}

impl TrainingPage {
    /// 正文字符数上限
    pub const MAX_CONTENT_CHARS: usize = 5000;

    /// 从页面抓取结果创建快照，正文超长时截断
    pub fn new(url: impl Into<String>, title: impl Into<String>, content: &str) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            content: clip_chars(content, Self::MAX_CONTENT_CHARS),
            captured_at: Local::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_is_clipped_to_limit() {
        let long = "题".repeat(TrainingPage::MAX_CONTENT_CHARS + 100);
        let page = TrainingPage::new("http://a", "t", &long);
        assert_eq!(page.content.chars().count(), TrainingPage::MAX_CONTENT_CHARS);
    }

    #[test]
    fn short_content_kept_as_is() {
        let page = TrainingPage::new("http://a", "t", "正文内容");
        assert_eq!(page.content, "正文内容");
    }
}
