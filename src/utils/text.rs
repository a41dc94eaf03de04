//! # 文本处理工具
//!
//! 渲染层把用户消息原文插入 HTML 气泡，这里提供对应的转义函数，
//! 防止消息中的标签字符破坏页面结构。

/// 转义 HTML 特殊字符
///
/// 替换 `& < > " '` 五个字符为对应的 HTML 实体。
/// 先替换 `&`，避免把后续实体中的 `&` 二次转义。
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_all_special_chars() {
        assert_eq!(
            escape_html(r#"<b>"钛粒王" & '安安'</b>"#),
            "&lt;b&gt;&quot;钛粒王&quot; &amp; &#039;安安&#039;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_escape_html_plain_text_unchanged() {
        assert_eq!(escape_html("查询统一钛粒王T10"), "查询统一钛粒王T10");
    }

    #[test]
    fn test_escape_html_ampersand_not_double_escaped() {
        assert_eq!(escape_html("A&B"), "A&amp;B");
    }
}
