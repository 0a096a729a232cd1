//! Caller-facing message templates for the upload endpoint.
//!
//! Every string a caller can see in a response body lives here, in one
//! table per supported language, so the handler itself stays free of
//! language checks.

use std::str::FromStr;

use crate::common::error::Error;
use crate::common::FileAction;

/// Response language selected through the `RESPONSE_LANGUAGE` variable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    /// English responses.
    #[default]
    English,
    /// Simplified Chinese responses.
    Chinese,
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "zh" | "chinese" => Ok(Language::Chinese),
            other => Err(Error::Configuration(format!(
                "unsupported RESPONSE_LANGUAGE value '{other}'"
            ))),
        }
    }
}

/// The message-template table for one response language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    language: Language,
}

/// Catalog implementation.
impl MessageCatalog {
    /// Create the catalog for the given language.
    pub const fn new(language: Language) -> Self {
        MessageCatalog { language }
    }

    /// Word used for the write operation in the success line.
    pub fn action_word(&self, action: FileAction) -> &'static str {
        match (self.language, action) {
            (Language::English, FileAction::Created) => "created",
            (Language::English, FileAction::Updated) => "updated",
            (Language::Chinese, FileAction::Created) => "创建",
            (Language::Chinese, FileAction::Updated) => "更新",
        }
    }

    /// Confirmation line returned when the commit landed.
    pub fn success(&self, action: FileAction, path: &str, branch: &str) -> String {
        let action = self.action_word(action);
        match self.language {
            Language::English => format!(
                "Successfully {action} '{path}' on the {branch} branch. CI/CD will now take over."
            ),
            Language::Chinese => {
                format!("已成功{action} '{path}'（{branch} 分支）。CI/CD 流程即将接管。")
            }
        }
    }

    /// The request body parsed as JSON but carries no payload field.
    pub fn missing_portfolio_data(&self) -> &'static str {
        match self.language {
            Language::English => "Missing 'portfolioData' in request body",
            Language::Chinese => "请求体中缺少 'portfolioData' 字段",
        }
    }

    /// The payload field is present but is not valid base64.
    pub fn invalid_base64(&self, detail: &base64::DecodeError) -> String {
        match self.language {
            Language::English => format!("Invalid base64 in 'portfolioData': {detail}"),
            Language::Chinese => format!("'portfolioData' 不是有效的 base64 编码: {detail}"),
        }
    }

    /// Required server-side configuration is incomplete or malformed.
    pub fn configuration_error(&self, detail: &str) -> String {
        match self.language {
            Language::English => format!("Server configuration error: {detail}"),
            Language::Chinese => format!("服务器配置错误: {detail}"),
        }
    }

    /// Wrapper for failures the caller can do nothing about.
    pub fn unexpected_error(&self, detail: &str) -> String {
        match self.language {
            Language::English => format!("An unexpected server error occurred: {detail}"),
            Language::Chinese => format!("服务器发生意外错误: {detail}"),
        }
    }
}
