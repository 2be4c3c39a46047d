use crate::uploader::models::{GithubContentsResponse, GithubUpload};
use crate::uploader::{USER_AGENT, file_name_of};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use phf::phf_map;
use reqwest::Client;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::debug;

/// CDN 域名别名表
static CDN_DOMAINS: phf::Map<&'static str, &'static str> = phf_map! {
    "jsdelivr" => "cdn.jsdelivr.net",
    "china" => "jsd.cdn.zzko.cn",
};

const DEFAULT_CDN_DOMAIN: &str = "cdn.jsdelivr.net";

/// GitHub 图床配置, 由凭证解析层校验后传入
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub branch: String,
    pub cdn: String,
}

/// GitHub 仓库 + CDN 图床
pub struct GithubUploader {
    config: GithubConfig,
    client: Client,
}

impl GithubUploader {
    pub fn new(config: GithubConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// 上传图片到仓库并合成 CDN 地址
    pub async fn upload(&self, image_path: &Path) -> GithubUpload {
        let content = match fs::read(image_path) {
            Ok(content) => content,
            Err(e) => return GithubUpload::failure(format!("File error: {}", e)),
        };
        let filename = file_name_of(image_path);
        // 内容哈希做前缀, 相同图片总是落到同一个远端路径
        let remote_path = build_remote_path(&self.config.path, &content, &filename);
        match self.try_upload(&content, &filename, &remote_path).await {
            Ok(upload) => upload,
            Err(e) => GithubUpload::failure(format!("Network error: {}", e)),
        }
    }

    /// PUT contents API, 成功后合成 CDN URL 并取出 download_url/sha
    async fn try_upload(
        &self,
        content: &[u8],
        filename: &str,
        remote_path: &str,
    ) -> Result<GithubUpload, reqwest::Error> {
        let url = format!(
            "https://api.github.com/repos/{}/{}/contents/{}",
            self.config.owner, self.config.repo, remote_path
        );
        let body = json!({
            "message": format!("Upload {}", filename),
            "content": BASE64.encode(content),
            "branch": self.config.branch,
        });

        debug!("PUT {}", url);
        let response: GithubContentsResponse = self
            .client
            .put(&url)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let content_info = response.content.unwrap_or_default();
        Ok(GithubUpload {
            success: true,
            cdn_url: Some(build_cdn_url(&self.config, remote_path)),
            raw_url: content_info.download_url,
            sha: content_info.sha,
            message: None,
        })
    }
}

/// 远端路径: {path}/{内容哈希前 8 位}_{文件名}
fn build_remote_path(path: &str, content: &[u8], filename: &str) -> String {
    format!("{}/{}_{}", path, content_hash8(content), filename)
}

/// SHA-256 摘要的前 8 个十六进制字符
fn content_hash8(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))[..8].to_string()
}

fn build_cdn_url(config: &GithubConfig, remote_path: &str) -> String {
    let domain = CDN_DOMAINS
        .get(config.cdn.as_str())
        .copied()
        .unwrap_or(DEFAULT_CDN_DOMAIN);
    format!(
        "https://{}/gh/{}/{}@{}/{}",
        domain, config.owner, config.repo, config.branch, remote_path
    )
}
