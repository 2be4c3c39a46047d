mod checks;
mod report;
mod server;

use anyhow::Result;
use report::PageResult;
use reqwest::Client;
use std::process;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

const BASE_URL: &str = "http://localhost:4000";
const MAX_RETRIES: u32 = 30;
const RETRY_DELAY: Duration = Duration::from_secs(1);
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let client = Client::new();

    println!("{}", "=".repeat(50));
    println!("本地站点自动验证");
    println!("{}", "=".repeat(50));

    // 服务器起不来就不验证任何页面
    if !server::wait_for_server(&client, BASE_URL, MAX_RETRIES, RETRY_DELAY).await {
        eprintln!("❌ 服务器启动失败");
        process::exit(1);
    }

    let mut results = Vec::new();
    results.push((
        "首页",
        validate_page(&client, BASE_URL, "首页", checks::HOME_CHECKS).await,
    ));
    results.push((
        "归档页",
        validate_page(
            &client,
            &format!("{}/archives", BASE_URL),
            "归档页",
            checks::BASIC_CHECKS,
        )
        .await,
    ));
    results.push((
        "标签页",
        validate_page(
            &client,
            &format!("{}/tags", BASE_URL),
            "标签页",
            checks::BASIC_CHECKS,
        )
        .await,
    ));

    let all_passed = report::print_report(&results);
    process::exit(if all_passed { 0 } else { 1 });
}

/// 抓取页面并运行该页面注册的检查集
/// 抓取失败直接判 FAILED, 不再运行检查
async fn validate_page(
    client: &Client,
    url: &str,
    name: &str,
    page_checks: &[(&'static str, checks::CheckFn)],
) -> PageResult {
    info!("🔍 验证 {}: {}", name, url);
    match fetch_page(client, url).await {
        Ok(html) => PageResult::from_checks(checks::run_checks(&html, page_checks)),
        Err(e) => PageResult::fetch_error(format!("{:#}", e)),
    }
}

/// 抓取页面正文, 非 2xx 状态一律算抓取失败
async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await?
        .error_for_status()?;
    Ok(response.text().await?)
}
