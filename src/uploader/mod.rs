pub mod github;
pub mod imgur;
pub mod models;
pub mod smms;

use crate::app::config::Credentials;
use crate::uploader::models::UploadResult;
use reqwest::Client;
use std::path::Path;

/// 统一的 UA, 某些图床接口会拦掉没有 UA 的请求
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; ImageUploaderSkill/1.0)";

/// 图床的统一入口, 每个变体各管一家
pub enum Uploader {
    Smms(smms::SmmsUploader),
    Imgur(imgur::ImgurUploader),
    Github(github::GithubUploader),
}

impl Uploader {
    /// 凭证已经过校验, 这里只做装配
    pub fn from_credentials(credentials: Credentials, client: Client) -> Self {
        match credentials {
            Credentials::Smms { token } => {
                Uploader::Smms(smms::SmmsUploader::new(token, client))
            }
            Credentials::Imgur { client_id } => {
                Uploader::Imgur(imgur::ImgurUploader::new(client_id, client))
            }
            Credentials::Github(config) => {
                Uploader::Github(github::GithubUploader::new(config, client))
            }
        }
    }

    pub async fn upload(&self, image_path: &Path) -> UploadResult {
        match self {
            Uploader::Smms(uploader) => UploadResult::Smms(uploader.upload(image_path).await),
            Uploader::Imgur(uploader) => UploadResult::Imgur(uploader.upload(image_path).await),
            Uploader::Github(uploader) => UploadResult::Github(uploader.upload(image_path).await),
        }
    }
}

/// 从路径里取文件名, 拿不到时用占位名兜底
pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}
