mod app;
mod logger;
mod uploader;

use app::config::{self, EnvOverrides, FileConfig, Provider};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing::info;
use uploader::Uploader;
use uploader::models::UploadResult;

/// 上传图片到 sm.ms、Imgur 或 GitHub (jsDelivr CDN)
#[derive(Debug, Parser)]
#[command(name = "upload_image")]
struct Cli {
    /// 要上传的图片路径
    image_path: PathBuf,

    /// 提供商的 API Token / Client-ID
    #[arg(long)]
    token: Option<String>,

    /// 图床提供商 (缺省 smms)
    #[arg(long, value_enum)]
    provider: Option<Provider>,
}

#[tokio::main]
async fn main() {
    logger::init();
    let cli = Cli::parse();

    // ========================================================================
    // 解析配置: 配置文件 + 环境变量 + CLI, 凭证缺失在发请求前就退出
    // ========================================================================

    let config = match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };
    let env = EnvOverrides::from_env();
    let provider = Provider::resolve(cli.provider, &env, &config);

    let credentials = match config::resolve_credentials(provider, cli.token, &env, &config) {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // ========================================================================
    // 上传并打印结果
    // ========================================================================

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent(uploader::USER_AGENT)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: 初始化 HTTP 客户端失败: {}", e);
            process::exit(1);
        }
    };
    let uploader = Uploader::from_credentials(credentials, client);

    info!("📤 正在上传 {} 到 {}...", cli.image_path.display(), provider);
    let result = uploader.upload(&cli.image_path).await;

    process::exit(print_result(&result));
}

/// 按提供商各自的响应形状打印结果, 返回进程退出码
fn print_result(result: &UploadResult) -> i32 {
    match result {
        UploadResult::Smms(response) => {
            if response.success {
                let data = response.data.clone().unwrap_or_default();
                println!("\n✅ 上传成功!");
                println!("URL: {}", data.url.as_deref().unwrap_or("-"));
                println!("Delete Link: {}", data.delete.as_deref().unwrap_or("-"));
                println!("Filename: {}", data.filename.as_deref().unwrap_or("-"));
                0
            } else if response.code.as_deref() == Some("image_repeated") {
                // 图片重复是提供商的正常提示, 不算失败
                println!("\n⚠️  图片已存在。");
                println!("URL: {}", response.images.as_deref().unwrap_or("-"));
                0
            } else {
                println!("\n❌ 上传失败");
                println!(
                    "Message: {}",
                    response.message.as_deref().unwrap_or("Unknown error")
                );
                1
            }
        }
        UploadResult::Imgur(response) => match &response.data {
            Some(data) if response.success => {
                println!("\n✅ 上传成功!");
                println!("URL: {}", data.link.as_deref().unwrap_or("-"));
                println!("Delete Hash: {}", data.deletehash.as_deref().unwrap_or("-"));
                0
            }
            _ => {
                println!("\n❌ 上传失败");
                println!("Message: {}", response.error_message());
                1
            }
        },
        UploadResult::Github(upload) => {
            if upload.success {
                println!("\n✅ 上传成功!");
                println!("CDN URL: {}", upload.cdn_url.as_deref().unwrap_or("-"));
                println!("Raw URL: {}", upload.raw_url.as_deref().unwrap_or("-"));
                0
            } else {
                println!("\n❌ 上传失败");
                println!(
                    "Message: {}",
                    upload.message.as_deref().unwrap_or("Unknown error")
                );
                1
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::print_result;
    use super::uploader::models::{GithubUpload, ImgurResponse, SmmsResponse, UploadResult};

    #[test]
    fn test_smms_success_exits_zero() {
        let raw = r#"{
            "success": true,
            "data": {"url": "https://x/photo.png", "delete": "https://x/d", "filename": "photo.png"}
        }"#;
        let response: SmmsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(print_result(&UploadResult::Smms(response)), 0);
    }

    #[test]
    fn test_smms_duplicate_is_a_warning_not_a_failure() {
        let raw = r#"{"success": false, "code": "image_repeated", "images": "https://x/a.png"}"#;
        let response: SmmsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            print_result(&UploadResult::Smms(response)),
            0,
            "图片重复应该按警告处理, 退出码 0"
        );
    }

    #[test]
    fn test_smms_failure_exits_one() {
        let response = SmmsResponse::failure("Network error: timeout".to_string());
        assert_eq!(print_result(&UploadResult::Smms(response)), 1);
    }

    #[test]
    fn test_imgur_success_without_data_is_a_failure() {
        let response: ImgurResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(
            print_result(&UploadResult::Imgur(response)),
            1,
            "success 但没有 data 的响应应该按失败处理"
        );
    }

    #[test]
    fn test_imgur_success_exits_zero() {
        let raw = r#"{
            "success": true,
            "data": {"link": "https://i.imgur.com/a.png", "deletehash": "abc"}
        }"#;
        let response: ImgurResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(print_result(&UploadResult::Imgur(response)), 0);
    }

    #[test]
    fn test_github_exit_codes() {
        let success = GithubUpload {
            success: true,
            cdn_url: Some("https://cdn.jsdelivr.net/gh/o/r@main/images/a_b.png".to_string()),
            raw_url: None,
            sha: None,
            message: None,
        };
        assert_eq!(print_result(&UploadResult::Github(success)), 0);

        let failure = GithubUpload::failure("Network error: 401".to_string());
        assert_eq!(print_result(&UploadResult::Github(failure)), 1);
    }
}
