//! # 回复导出服务
//!
//! 把一条 AI 回复正文包装为固定样式的独立 HTML 文档字符串，
//! 供"生成HTML"操作落盘下载。
//!
//! ## 转换策略
//! 轻量 Markdown 替换，不引入完整渲染器：
//! - 先做 HTML 转义（正文中的标签字符不得破坏导出文档结构）
//! - 标题行（`#`~`######`）→ `<h2>…</h2>`
//! - 加粗（`**…**`）→ `<strong>…</strong>`
//! - 换行 → `<br>`

use std::sync::LazyLock;

use chrono::Local;
use regex::Regex;

use crate::utils::text::escape_html;

/// 标题行模式
///
/// 使用 `LazyLock` 实现全局唯一的预编译正则，避免重复编译开销。
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+(.*)$").unwrap());

/// 加粗模式
static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

/// 导出文件名
///
/// 固定模式：`ai-response-<消息ID>.html`
pub fn export_file_name(message_id: &str) -> String {
    format!("ai-response-{}.html", message_id)
}

/// 轻量 Markdown 转 HTML
///
/// 仅处理标题、加粗和换行三种标记，其余文本转义后原样保留。
/// 标题行先于加粗替换，标题内部的加粗标记随后一并转换。
pub fn markdown_to_html(content: &str) -> String {
    let escaped = escape_html(content);
    let html = HEADING_RE.replace_all(&escaped, "<h2>$1</h2>");
    let html = BOLD_RE.replace_all(&html, "<strong>$1</strong>");
    html.replace('\n', "<br>")
}

/// 渲染完整的导出 HTML 文档
///
/// 固定的文档骨架 + 内联样式表 + 转换后的回复内容。
pub fn render_document(content: &str) -> String {
    let generated_at = Local::now().format("%Y/%m/%d %H:%M:%S").to_string();
    render_document_at(content, &generated_at)
}

/// 以给定生成时间标签渲染导出文档（测试注入固定时间）
pub fn render_document_at(content: &str, generated_at: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AI产品专家回复</title>
    <style>
        body {{ font-family: 'Noto Sans SC', sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; line-height: 1.6; }}
        h1 {{ color: #4d6bfe; border-bottom: 2px solid #4d6bfe; padding-bottom: 10px; }}
        h2 {{ color: #1f2937; margin-top: 30px; }}
        h3 {{ color: #1f2937; }}
        ul, li {{ margin: 10px 0; }}
        strong {{ color: #4d6bfe; }}
        code {{ background: #f5f5f5; padding: 2px 6px; border-radius: 3px; }}
        .section {{ margin: 20px 0; padding: 15px; background: #f9f9f9; border-radius: 8px; }}
    </style>
</head>
<body>
    <div style="text-align: center; margin-bottom: 30px;">
        <h1>AI产品专家回复</h1>
        <p style="color: #666;">生成时间：{generated_at}</p>
    </div>
    <div class="content">
        {content}
    </div>
    <hr style="margin: 40px 0;">
    <p style="text-align: center; color: #999; font-size: 14px;">
        由AI产品专家安安生成 | 统一润滑油公司
    </p>
</body>
</html>"#,
        generated_at = generated_at,
        content = markdown_to_html(content),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_name_pattern() {
        assert_eq!(
            export_file_name("id_1722945600000_k3x9f2a1b"),
            "ai-response-id_1722945600000_k3x9f2a1b.html"
        );
    }

    #[test]
    fn test_markdown_headings_converted() {
        assert_eq!(markdown_to_html("# 产品参数查询结果"), "<h2>产品参数查询结果</h2>");
        assert_eq!(markdown_to_html("## 参考资料"), "<h2>参考资料</h2>");
    }

    #[test]
    fn test_markdown_bold_converted() {
        assert_eq!(
            markdown_to_html("**API等级**：CK-4"),
            "<strong>API等级</strong>：CK-4"
        );
    }

    #[test]
    fn test_markdown_newlines_become_breaks() {
        assert_eq!(markdown_to_html("第一行\n第二行"), "第一行<br>第二行");
    }

    #[test]
    fn test_markdown_escapes_raw_html() {
        assert_eq!(
            markdown_to_html("温度 <100℃ & 正常"),
            "温度 &lt;100℃ &amp; 正常"
        );
    }

    #[test]
    fn test_markdown_combined_document() {
        let html = markdown_to_html("# 标题\n- **闪点**：228℃");
        assert_eq!(html, "<h2>标题</h2><br>- <strong>闪点</strong>：228℃");
    }

    #[test]
    fn test_render_document_envelope() {
        let doc = render_document_at("# 标题\n正文", "2026/08/06 12:00:00");
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>AI产品专家回复</title>"));
        assert!(doc.contains("生成时间：2026/08/06 12:00:00"));
        assert!(doc.contains("<h2>标题</h2><br>正文"));
        assert!(doc.contains("由AI产品专家安安生成 | 统一润滑油公司"));
    }
}
