use crate::uploader::models::SmmsResponse;
use crate::uploader::{USER_AGENT, file_name_of};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::fs;
use std::path::Path;
use tracing::debug;

const API_URL: &str = "https://sm.ms/api/v2/upload";

/// SM.MS 图床
pub struct SmmsUploader {
    token: String,
    client: Client,
}

impl SmmsUploader {
    pub fn new(token: String, client: Client) -> Self {
        Self { token, client }
    }

    /// 上传图片, 文件错误和网络错误以失败形状返回, 不向外抛
    pub async fn upload(&self, image_path: &Path) -> SmmsResponse {
        let content = match fs::read(image_path) {
            Ok(content) => content,
            Err(e) => return SmmsResponse::failure(format!("File error: {}", e)),
        };
        match self.try_upload(content, file_name_of(image_path)).await {
            Ok(response) => response,
            Err(e) => SmmsResponse::failure(format!("Network error: {}", e)),
        }
    }

    /// 单次上传尝试, 非 2xx 状态走 error_for_status 进入网络错误分支
    async fn try_upload(
        &self,
        content: Vec<u8>,
        filename: String,
    ) -> Result<SmmsResponse, reqwest::Error> {
        let part = Part::bytes(content).file_name(filename);
        let form = Form::new().part("smfile", part);
        debug!("POST {}", API_URL);
        self.client
            .post(API_URL)
            .header("Authorization", self.token.as_str())
            .header("User-Agent", USER_AGENT)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_a_file_error() {
        let uploader = SmmsUploader::new("token".to_string(), Client::new());
        let response = uploader.upload(Path::new("no-such-file.png")).await;

        assert!(!response.success, "文件不存在时 success 应该是 false");
        let message = response.message.unwrap();
        assert!(
            message.starts_with("File error:"),
            "文件错误应该带 File error 前缀: {}",
            message
        );
    }

    #[tokio::test]
    #[ignore] // 集成测试, 需要真实的 SM.MS Token 和网络
    async fn test_live_upload() {
        let token = std::env::var("SMMS_TOKEN").unwrap_or_default();
        let uploader = SmmsUploader::new(token, Client::new());
        let response = uploader.upload(Path::new("photo.png")).await;
        let _ = response;
    }
}
