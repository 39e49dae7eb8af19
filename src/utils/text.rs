//! 文本处理辅助函数

/// 按字符数截断（不加省略号）
///
/// 语料、题干等入库文本的硬上限都是字符数而不是 token 数
pub fn clip_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        text.chars().take(max_chars).collect()
    } else {
        text.to_string()
    }
}

/// 截断长文本用于日志显示
///
/// 超长时保留前 `max_len` 个字符并追加省略号
pub fn preview(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_respects_char_boundaries() {
        let text = "一二三四五";
        assert_eq!(clip_chars(text, 3), "一二三");
        assert_eq!(clip_chars(text, 10), text);
    }

    #[test]
    fn preview_appends_ellipsis() {
        assert_eq!(preview("abcdef", 4), "abcd...");
        assert_eq!(preview("abc", 4), "abc");
    }
}
