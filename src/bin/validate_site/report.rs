use std::fmt;

/// 页面验证状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Passed,
    Failed,
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageStatus::Passed => f.write_str("PASSED"),
            PageStatus::Failed => f.write_str("FAILED"),
        }
    }
}

/// 单个页面的验证结果
#[derive(Debug, Clone)]
pub struct PageResult {
    pub status: PageStatus,
    pub checks: Vec<(&'static str, bool)>,
    pub error: Option<String>,
}

impl PageResult {
    /// 全部检查通过页面才算通过
    pub fn from_checks(checks: Vec<(&'static str, bool)>) -> Self {
        let status = if checks.iter().all(|(_, passed)| *passed) {
            PageStatus::Passed
        } else {
            PageStatus::Failed
        };
        Self {
            status,
            checks,
            error: None,
        }
    }

    /// 页面抓取失败, 检查全部跳过
    pub fn fetch_error(error: String) -> Self {
        Self {
            status: PageStatus::Failed,
            checks: Vec::new(),
            error: Some(error),
        }
    }
}

/// 打印验证报告, 返回是否全部通过
pub fn print_report(results: &[(&str, PageResult)]) -> bool {
    println!();
    println!("{}", "=".repeat(50));
    println!("验证报告");
    println!("{}", "=".repeat(50));

    let mut all_passed = true;
    for (page_name, result) in results {
        let icon = if result.status == PageStatus::Passed {
            "✅"
        } else {
            "❌"
        };
        println!("\n{} {}: {}", icon, page_name, result.status);

        for (check_name, passed) in &result.checks {
            let check_icon = if *passed { "✓" } else { "✗" };
            println!("   {} {}", check_icon, check_name);
        }

        if result.status == PageStatus::Failed {
            all_passed = false;
            if let Some(error) = &result.error {
                println!("   错误: {}", error);
            }
        }
    }

    println!();
    println!("{}", "=".repeat(50));
    if all_passed {
        println!("🎉 所有验证通过！");
    } else {
        println!("⚠️  部分验证失败，请检查");
    }
    all_passed
}
