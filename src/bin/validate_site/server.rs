use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// 单次探测的超时
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// 等待服务器就绪: 固定间隔轮询, 收到一次 200 即认为就绪
pub async fn wait_for_server(
    client: &Client,
    url: &str,
    max_retries: u32,
    delay: Duration,
) -> bool {
    info!("⏳ 等待服务器启动: {}", url);
    for attempt in 1..=max_retries {
        match client.get(url).timeout(PROBE_TIMEOUT).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                info!("✅ 服务器已就绪");
                return true;
            }
            _ => {}
        }
        sleep(delay).await;
        info!("  重试 {}/{}...", attempt, max_retries);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_server_exhausts_retries() {
        let client = Client::new();
        // 端口 1 不会有服务监听, 连接会立刻被拒绝
        let ready =
            wait_for_server(&client, "http://127.0.0.1:1/", 2, Duration::from_millis(10)).await;
        assert!(!ready, "不可达的服务器应该耗尽重试次数并返回 false");
    }
}
