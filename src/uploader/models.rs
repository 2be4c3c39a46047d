use serde::Deserialize;
use serde_json::Value;

/// SM.MS 上传接口的响应体, 原样反序列化
/// 本地失败 (文件/网络) 也用同一形状返回, success=false 且带 message
#[derive(Debug, Clone, Deserialize)]
pub struct SmmsResponse {
    #[serde(default)]
    pub success: bool,
    pub code: Option<String>,
    pub message: Option<String>,
    /// 图片重复时 (code == "image_repeated") 已有图片的 URL
    pub images: Option<String>,
    pub data: Option<SmmsData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SmmsData {
    pub url: Option<String>,
    pub delete: Option<String>,
    pub filename: Option<String>,
}

impl SmmsResponse {
    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            code: None,
            message: Some(message),
            images: None,
            data: None,
        }
    }
}

/// Imgur 上传接口的响应体
#[derive(Debug, Clone, Deserialize)]
pub struct ImgurResponse {
    #[serde(default)]
    pub success: bool,
    pub status: Option<i64>,
    pub message: Option<String>,
    pub data: Option<ImgurData>,
}

/// Imgur 的 data 字段, 成功时带 link/deletehash, 失败时带 error
/// error 可能是字符串也可能是对象, 用 Value 兜住
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImgurData {
    pub link: Option<String>,
    pub deletehash: Option<String>,
    pub error: Option<Value>,
}

impl ImgurResponse {
    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            status: None,
            message: Some(message),
            data: None,
        }
    }

    /// 失败信息: message > data.error > "Unknown error"
    pub fn error_message(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        if let Some(error) = self.data.as_ref().and_then(|d| d.error.as_ref()) {
            return match error {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
        }
        "Unknown error".to_string()
    }
}

/// GitHub contents API 的响应体, 只取需要的字段
#[derive(Debug, Clone, Deserialize)]
pub struct GithubContentsResponse {
    pub content: Option<GithubContentInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GithubContentInfo {
    pub download_url: Option<String>,
    pub sha: Option<String>,
}

/// GitHub 上传的合成结果: CDN 地址由本地拼出, raw 地址和 sha 取自 API 响应
#[derive(Debug, Clone)]
pub struct GithubUpload {
    pub success: bool,
    pub cdn_url: Option<String>,
    pub raw_url: Option<String>,
    pub sha: Option<String>,
    pub message: Option<String>,
}

impl GithubUpload {
    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            cdn_url: None,
            raw_url: None,
            sha: None,
            message: Some(message),
        }
    }
}

/// 一次上传的结果, 按提供商携带各自的响应形状
#[derive(Debug, Clone)]
pub enum UploadResult {
    Smms(SmmsResponse),
    Imgur(ImgurResponse),
    Github(GithubUpload),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_smms_success_body() {
        let raw = r#"{
            "success": true,
            "data": {
                "url": "https://x/photo.png",
                "delete": "https://x/d",
                "filename": "photo.png"
            }
        }"#;
        let response: SmmsResponse = serde_json::from_str(raw).unwrap();
        assert!(response.success);
        let data = response.data.unwrap();
        assert_eq!(data.url.as_deref(), Some("https://x/photo.png"));
        assert_eq!(data.delete.as_deref(), Some("https://x/d"));
        assert_eq!(data.filename.as_deref(), Some("photo.png"));
    }

    #[test]
    fn test_parse_smms_duplicate_body() {
        let raw = r#"{
            "success": false,
            "code": "image_repeated",
            "message": "Image upload repeated limit",
            "images": "https://x/already.png"
        }"#;
        let response: SmmsResponse = serde_json::from_str(raw).unwrap();
        assert!(!response.success);
        assert_eq!(response.code.as_deref(), Some("image_repeated"));
        assert_eq!(response.images.as_deref(), Some("https://x/already.png"));
    }

    #[test]
    fn test_imgur_error_message_fallback_chain() {
        // data.error 是字符串
        let raw = r#"{"success": false, "status": 400, "data": {"error": "Bad Request"}}"#;
        let response: ImgurResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.error_message(), "Bad Request");

        // data.error 是对象
        let raw = r#"{"success": false, "data": {"error": {"code": 1003}}}"#;
        let response: ImgurResponse = serde_json::from_str(raw).unwrap();
        assert!(response.error_message().contains("1003"));

        // 什么都没有
        let response: ImgurResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(response.error_message(), "Unknown error");

        // 本地失败的 message 优先
        let response = ImgurResponse::failure("Network error: timeout".to_string());
        assert_eq!(response.error_message(), "Network error: timeout");
    }

    #[test]
    fn test_parse_github_contents_body() {
        let raw = r#"{
            "content": {
                "download_url": "https://raw.githubusercontent.com/o/r/main/images/a_b.png",
                "sha": "abc123"
            },
            "commit": {"sha": "ignored"}
        }"#;
        let response: GithubContentsResponse = serde_json::from_str(raw).unwrap();
        let content = response.content.unwrap();
        assert!(content.download_url.unwrap().starts_with("https://raw."));
        assert_eq!(content.sha.as_deref(), Some("abc123"));
    }
}
