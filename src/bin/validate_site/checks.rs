use std::panic::{AssertUnwindSafe, catch_unwind};

/// 单个检查项: 对页面 HTML 的布尔断言
pub type CheckFn = fn(&str) -> bool;

/// 首页的完整检查集
pub const HOME_CHECKS: &[(&str, CheckFn)] = &[
    ("标题存在", check_title),
    ("CSS加载", check_css_loaded),
    ("JS加载", check_js_loaded),
    ("内容非空", check_content),
    ("导航菜单", check_navigation),
    ("文章列表", check_posts),
    ("页脚存在", check_footer),
];

/// 归档页和标签页只做基础检查
pub const BASIC_CHECKS: &[(&str, CheckFn)] = &[
    ("标题存在", check_title),
    ("CSS加载", check_css_loaded),
    ("内容非空", check_content),
];

fn check_title(html: &str) -> bool {
    html.contains("<title>") && html.contains("</title>")
}

fn check_css_loaded(html: &str) -> bool {
    html.contains("<link") && html.contains(".css")
}

fn check_js_loaded(html: &str) -> bool {
    html.contains("<script")
}

fn check_content(html: &str) -> bool {
    html.len() > 1000
}

fn check_navigation(html: &str) -> bool {
    ["Archives", "About", "Tags", "Categories"]
        .iter()
        .any(|keyword| html.contains(keyword))
}

fn check_posts(html: &str) -> bool {
    html.contains("<article") || html.to_lowercase().contains("post")
}

fn check_footer(html: &str) -> bool {
    html.to_lowercase().contains("footer") || html.contains('©')
}

/// 逐项运行检查, 单项 panic 只记为该项失败, 不中断其余检查
pub fn run_checks(html: &str, checks: &[(&'static str, CheckFn)]) -> Vec<(&'static str, bool)> {
    checks
        .iter()
        .map(|(name, check)| {
            let passed = catch_unwind(AssertUnwindSafe(|| check(html))).unwrap_or(false);
            (*name, passed)
        })
        .collect()
}
