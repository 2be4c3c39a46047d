use crate::uploader::github::GithubConfig;
use anyhow::{Context, Result, anyhow};
use clap::ValueEnum;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// 图床提供商
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    Smms,
    Imgur,
    Github,
}

impl Provider {
    /// 解析环境变量或配置文件里的提供商名称
    /// 未识别的名称回落到 smms, 与 --provider 不同, 这里不做严格校验
    fn from_name(name: &str) -> Self {
        match name {
            "imgur" => Provider::Imgur,
            "github" => Provider::Github,
            _ => Provider::Smms,
        }
    }

    /// 按优先级选定提供商: --provider > IMAGE_UPLOADER_PROVIDER > 配置文件 default_provider > smms
    pub fn resolve(cli: Option<Provider>, env: &EnvOverrides, config: &FileConfig) -> Provider {
        if let Some(provider) = cli {
            return provider;
        }
        if let Some(name) = env.provider.as_deref().filter(|v| !v.is_empty()) {
            return Provider::from_name(name);
        }
        if let Some(name) = config.default_provider.as_deref().filter(|v| !v.is_empty()) {
            return Provider::from_name(name);
        }
        Provider::Smms
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Smms => "smms",
            Provider::Imgur => "imgur",
            Provider::Github => "github",
        };
        f.write_str(name)
    }
}

/// config.json 里允许出现的键, 全部可选
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub default_provider: Option<String>,
    pub smms_token: Option<String>,
    pub imgur_client_id: Option<String>,
    pub github_token: Option<String>,
    pub github_owner: Option<String>,
    pub github_repo: Option<String>,
    pub github_path: Option<String>,
    pub github_branch: Option<String>,
    pub github_cdn: Option<String>,
}

impl FileConfig {
    /// 先查当前目录, 再查可执行文件所在目录, 都没有则视为空配置
    pub fn load() -> Result<Self> {
        let cwd_path = Path::new(CONFIG_FILE_NAME);
        if cwd_path.exists() {
            return Self::from_file(cwd_path);
        }
        if let Ok(exe) = env::current_exe() {
            if let Some(dir) = exe.parent() {
                let exe_path = dir.join(CONFIG_FILE_NAME);
                if exe_path.exists() {
                    return Self::from_file(&exe_path);
                }
            }
        }
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;
        Ok(config)
    }
}

/// 启动时一次性读取的环境变量快照
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub provider: Option<String>,
    pub smms_token: Option<String>,
    pub imgur_client_id: Option<String>,
    pub github_token: Option<String>,
    pub github_owner: Option<String>,
    pub github_repo: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            provider: env::var("IMAGE_UPLOADER_PROVIDER").ok(),
            smms_token: env::var("SMMS_TOKEN").ok(),
            imgur_client_id: env::var("IMGUR_CLIENT_ID").ok(),
            github_token: env::var("IMAGE_UPLOADER_GITHUB_TOKEN").ok(),
            github_owner: env::var("IMAGE_UPLOADER_GITHUB_OWNER").ok(),
            github_repo: env::var("IMAGE_UPLOADER_GITHUB_REPO").ok(),
        }
    }
}

/// 按优先级返回第一个非空候选值, 空字符串视为未设置
pub fn first_set(candidates: impl IntoIterator<Item = Option<String>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
}

/// 校验完成的上传凭证, 构造 Uploader 的唯一入口
#[derive(Debug, Clone)]
pub enum Credentials {
    Smms { token: String },
    Imgur { client_id: String },
    Github(GithubConfig),
}

/// 解析所选提供商的全部凭证
/// 缺少必填项时直接报错并指明补救方式, 不会发起任何网络请求
pub fn resolve_credentials(
    provider: Provider,
    cli_token: Option<String>,
    env: &EnvOverrides,
    config: &FileConfig,
) -> Result<Credentials> {
    match provider {
        Provider::Smms => {
            let token = first_set([
                cli_token,
                env.smms_token.clone(),
                config.smms_token.clone(),
            ])
            .ok_or_else(|| {
                anyhow!(
                    "未找到 SM.MS Token。请通过 --token 参数、SMMS_TOKEN 环境变量或 {} 提供。\n配置方法: 在 '{}' 中添加 \"smms_token\": \"YOUR_TOKEN\"。",
                    CONFIG_FILE_NAME,
                    CONFIG_FILE_NAME
                )
            })?;
            Ok(Credentials::Smms { token })
        }
        Provider::Imgur => {
            let client_id = first_set([
                cli_token,
                env.imgur_client_id.clone(),
                config.imgur_client_id.clone(),
            ])
            .ok_or_else(|| {
                anyhow!(
                    "未找到 Imgur Client-ID。请通过 --token 参数、IMGUR_CLIENT_ID 环境变量或 {} 提供。\n配置方法: 在 '{}' 中添加 \"imgur_client_id\": \"YOUR_CLIENT_ID\"。",
                    CONFIG_FILE_NAME,
                    CONFIG_FILE_NAME
                )
            })?;
            Ok(Credentials::Imgur { client_id })
        }
        Provider::Github => {
            let token = first_set([
                cli_token,
                env.github_token.clone(),
                config.github_token.clone(),
            ])
            .ok_or_else(|| {
                anyhow!(
                    "未找到 GitHub Token。请通过 --token 参数、IMAGE_UPLOADER_GITHUB_TOKEN 环境变量或 {} 的 \"github_token\" 提供。",
                    CONFIG_FILE_NAME
                )
            })?;
            let owner = first_set([env.github_owner.clone(), config.github_owner.clone()]);
            let repo = first_set([env.github_repo.clone(), config.github_repo.clone()]);
            let (owner, repo) = match (owner, repo) {
                (Some(owner), Some(repo)) => (owner, repo),
                _ => {
                    return Err(anyhow!(
                        "github_owner 和 github_repo 必须配置。请使用 IMAGE_UPLOADER_GITHUB_OWNER / IMAGE_UPLOADER_GITHUB_REPO 环境变量或 {}。",
                        CONFIG_FILE_NAME
                    ));
                }
            };
            let path =
                first_set([config.github_path.clone()]).unwrap_or_else(|| "images".to_string());
            let branch =
                first_set([config.github_branch.clone()]).unwrap_or_else(|| "main".to_string());
            let cdn =
                first_set([config.github_cdn.clone()]).unwrap_or_else(|| "jsdelivr".to_string());
            Ok(Credentials::Github(GithubConfig {
                token,
                owner,
                repo,
                path: path.trim_matches('/').to_string(),
                branch,
                cdn,
            }))
        }
    }
}
