pub mod http;
#[cfg(test)]
pub mod scripted;

use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::JudgeBox;

pub struct JudgeManager {}

impl JudgeManager {
    pub fn get() -> Result<JudgeBox> {
        let url = Config::get(ConfigKey::ApiURL);
        if url.is_empty() {
            bail!("No judge API URL is configured. Set `api-url` in the config file or pass --api-url.");
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            bail!(format!("Judge API URL must start with http:// or https://, got {url}"));
        }

        return Ok(Arc::new(http::HttpJudge::default()));
    }
}
