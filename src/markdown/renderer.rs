//! Markdown to HTML rendering using pulldown-cmark

use pulldown_cmark::{html, Options, Parser};

use super::PreviewTheme;

/// Milliseconds during which scroll events after a programmatic scroll or
/// content swap are not reported back to the editor
const QUIET_WINDOW_MS: u32 = 120;

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_SMART_PUNCTUATION
}

/// Render Markdown to an HTML fragment
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, parser_options());
    let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_output, parser);
    html_output
}

/// Escape text for use inside HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Full page loaded into a preview webview: styles, content and the
/// scroll reporting script
pub fn preview_document(markdown: &str, theme: &PreviewTheme) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>{css}</style>
</head>
<body>
    <div id="content">{content}</div>
    <script>{script}</script>
</body>
</html>"#,
        css = generate_css(theme),
        content = markdown_to_html(markdown),
        script = scroll_sync_js(),
    )
}

/// Script that swaps the rendered content in place, keeping scroll position
pub fn preview_update_script(markdown: &str) -> String {
    let html = markdown_to_html(markdown);
    // serde_json string encoding doubles as JS string literal escaping
    let literal = serde_json::to_string(&html).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "(function(){{if(window.__markpaneQuiet)window.__markpaneQuiet();\
         var el=document.getElementById('content');if(el){{el.innerHTML={};}}}})();",
        literal
    )
}

/// Script that scrolls the preview to `fraction` of its scrollable height
pub fn scroll_to_fraction_script(fraction: f64) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    format!(
        "if(window.__markpaneScrollTo){{window.__markpaneScrollTo({});}}",
        fraction
    )
}

/// What the preview webview does with a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewNavigation {
    /// The preview page itself, or a fragment link within it
    Allow,
    /// Hand the URL to the system's default handler and stay put
    OpenExternally,
    /// Stay put and do nothing
    Block,
}

/// Decide how the preview handles a navigation to `url`.
///
/// Only the generated page (`about:`/`data:`) may load in place; leaving it
/// would drop `#content` and the scroll script.
pub fn preview_navigation(url: &str) -> PreviewNavigation {
    let scheme = url
        .split_once(':')
        .map(|(scheme, _)| scheme.to_ascii_lowercase())
        .unwrap_or_default();
    match scheme.as_str() {
        "about" | "data" => PreviewNavigation::Allow,
        "http" | "https" | "mailto" | "file" => PreviewNavigation::OpenExternally,
        _ => PreviewNavigation::Block,
    }
}

/// Self-contained page written by "Export HTML": no scripts, inline styles
pub fn export_document(markdown: &str, title: &str, theme: &PreviewTheme) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div id="wrapper">
{content}
    </div>
</body>
</html>
"#,
        title = escape_html(title),
        css = generate_css(theme),
        content = markdown_to_html(markdown),
    )
}

fn scroll_sync_js() -> String {
    format!(
        r#"
(function() {{
    var quietUntil = 0;
    function scrollable() {{
        return document.documentElement.scrollHeight - window.innerHeight;
    }}
    window.__markpaneQuiet = function() {{
        quietUntil = Date.now() + {quiet};
    }};
    window.__markpaneScrollTo = function(fraction) {{
        var range = scrollable();
        if (range <= 0) return;
        window.__markpaneQuiet();
        window.scrollTo(0, range * fraction);
    }};
    window.addEventListener('scroll', function() {{
        if (Date.now() < quietUntil) return;
        var range = scrollable();
        var percent = range > 0 ? window.scrollY / range : 0;
        if (window.ipc) {{
            window.ipc.postMessage(JSON.stringify({{ type: 'scroll', percent: percent }}));
        }}
    }});
}})();
"#,
        quiet = QUIET_WINDOW_MS
    )
}

/// Generate the preview stylesheet from theme colors
pub fn generate_css(theme: &PreviewTheme) -> String {
    format!(
        r#"
* {{
    box-sizing: border-box;
}}

body {{
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
    font-size: 15px;
    line-height: 1.6;
    color: {text};
    background-color: {background};
    padding: 20px;
    margin: 0 auto;
    max-width: 860px;
}}

h1, h2, h3, h4, h5, h6 {{
    color: {heading};
    margin-top: 24px;
    margin-bottom: 16px;
    font-weight: 600;
    line-height: 1.25;
}}

h1, h2 {{
    border-bottom: 1px solid {border};
    padding-bottom: 0.3em;
}}

h1 {{ font-size: 2em; }}
h2 {{ font-size: 1.5em; }}
h3 {{ font-size: 1.25em; }}
h4 {{ font-size: 1em; }}
h5 {{ font-size: 0.875em; }}
h6 {{ font-size: 0.85em; color: {muted}; }}

p {{
    margin-top: 0;
    margin-bottom: 16px;
}}

code {{
    background-color: {code_background};
    padding: 2px 4px;
    border-radius: 3px;
    font-family: Consolas, "SF Mono", "Liberation Mono", Menlo, monospace;
    font-size: 0.9em;
}}

pre {{
    background-color: {code_background};
    padding: 10px 16px;
    border-radius: 5px;
    overflow-x: auto;
    margin-top: 0;
    margin-bottom: 16px;
}}

pre code {{
    background: none;
    padding: 0;
    line-height: 1.45;
}}

blockquote {{
    border-left: 4px solid {blockquote_border};
    margin: 0 0 16px 0;
    padding: 0 16px;
    color: {muted};
}}

blockquote > :first-child {{ margin-top: 0; }}
blockquote > :last-child {{ margin-bottom: 0; }}

a {{
    color: {link};
    text-decoration: none;
}}

a:hover {{
    text-decoration: underline;
}}

ul, ol {{
    padding-left: 2em;
    margin-top: 0;
    margin-bottom: 16px;
}}

li + li {{
    margin-top: 0.25em;
}}

hr {{
    height: 0.25em;
    padding: 0;
    margin: 24px 0;
    background-color: {border};
    border: 0;
}}

table {{
    border-collapse: collapse;
    border-spacing: 0;
    margin-bottom: 16px;
    width: 100%;
}}

th, td {{
    padding: 6px 13px;
    border: 1px solid {border};
}}

th {{
    font-weight: 600;
    background-color: {code_background};
}}

img {{
    max-width: 100%;
}}

li:has(> input[type="checkbox"]) {{
    list-style-type: none;
}}

input[type="checkbox"] {{
    margin: 0 0.4em 0 -1.4em;
    vertical-align: middle;
}}

del {{
    color: {muted};
}}

.footnote-definition {{
    font-size: 0.9em;
    color: {muted};
}}
"#,
        text = theme.text,
        background = theme.background,
        heading = theme.heading,
        link = theme.link,
        code_background = theme.code_background,
        border = theme.border,
        blockquote_border = theme.blockquote_border,
        muted = theme.muted,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeMode;

    #[test]
    fn test_markdown_to_html_basic() {
        let html = markdown_to_html("# Hello\n\nWorld");
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<p>World</p>"));
    }

    #[test]
    fn test_markdown_extensions() {
        let html = markdown_to_html("~~gone~~\n\n- [x] done\n\n| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("checkbox"));
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_markdown_to_html_links() {
        let html = markdown_to_html("[Click here](https://example.com)");
        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.contains("Click here"));
    }

    #[test]
    fn test_preview_document_carries_sync_script_and_theme() {
        let theme = PreviewTheme::for_mode(ThemeMode::Dark);
        let page = preview_document("text", &theme);
        assert!(page.contains("<div id=\"content\"><p>text</p>"));
        assert!(page.contains("window.ipc.postMessage"));
        assert!(page.contains("type: 'scroll'"));
        assert!(page.contains("background-color: #000000"));
        assert!(page.contains("color: #f0f0f0"));
    }

    #[test]
    fn test_update_script_escapes_content() {
        let script = preview_update_script("line one\nline two\n\n[a](http://x.y \"t\")");
        assert!(script.contains("getElementById('content')"));
        assert!(!script.contains('\n'));
        assert!(script.contains("\\n"));
        assert!(script.contains("href=\\\"http://x.y\\\""));
    }

    #[test]
    fn test_scroll_script_clamps() {
        assert!(scroll_to_fraction_script(0.5).contains("(0.5)"));
        assert!(scroll_to_fraction_script(3.0).contains("(1)"));
        assert!(scroll_to_fraction_script(f64::NAN).contains("(0)"));
    }

    #[test]
    fn test_export_document_is_self_contained() {
        let theme = PreviewTheme::for_mode(ThemeMode::Light);
        let page = export_document("**hi**", "a<b>.md", &theme);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<meta charset=\"utf-8\">"));
        assert!(page.contains("<title>a&lt;b&gt;.md</title>"));
        assert!(page.contains("<div id=\"wrapper\">"));
        assert!(page.contains("<strong>hi</strong>"));
        assert!(page.contains("border-left: 4px solid #80808080"));
        assert!(!page.contains("<script"));
    }

    #[test]
    fn preview_stays_on_its_own_page() {
        assert_eq!(preview_navigation("about:blank"), PreviewNavigation::Allow);
        assert_eq!(preview_navigation("about:blank#intro"), PreviewNavigation::Allow);
        assert_eq!(
            preview_navigation("data:text/html,<p>x</p>"),
            PreviewNavigation::Allow
        );
        assert_eq!(
            preview_navigation("https://example.com"),
            PreviewNavigation::OpenExternally
        );
        assert_eq!(
            preview_navigation("MAILTO:me@example.com"),
            PreviewNavigation::OpenExternally
        );
        assert_eq!(
            preview_navigation("file:///tmp/other.md"),
            PreviewNavigation::OpenExternally
        );
        assert_eq!(preview_navigation("javascript:alert(1)"), PreviewNavigation::Block);
        assert_eq!(preview_navigation("other.md"), PreviewNavigation::Block);
    }
}
