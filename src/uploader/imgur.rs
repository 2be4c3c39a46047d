use crate::uploader::file_name_of;
use crate::uploader::models::ImgurResponse;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use std::fs;
use std::path::Path;
use tracing::debug;

const API_URL: &str = "https://api.imgur.com/3/image";

/// Imgur 图床, 匿名上传只需要 Client-ID
pub struct ImgurUploader {
    client_id: String,
    client: Client,
}

impl ImgurUploader {
    pub fn new(client_id: String, client: Client) -> Self {
        Self { client_id, client }
    }

    /// 上传图片, 文件错误和网络错误以失败形状返回, 不向外抛
    pub async fn upload(&self, image_path: &Path) -> ImgurResponse {
        let content = match fs::read(image_path) {
            Ok(content) => content,
            Err(e) => return ImgurResponse::failure(format!("File error: {}", e)),
        };
        match self.try_upload(content, file_name_of(image_path)).await {
            Ok(response) => response,
            Err(e) => ImgurResponse::failure(format!("Network error: {}", e)),
        }
    }

    async fn try_upload(
        &self,
        content: Vec<u8>,
        filename: String,
    ) -> Result<ImgurResponse, reqwest::Error> {
        let part = Part::bytes(content).file_name(filename);
        let form = Form::new().part("image", part);
        debug!("POST {}", API_URL);
        self.client
            .post(API_URL)
            .header("Authorization", format!("Client-ID {}", self.client_id))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}
