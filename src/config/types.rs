use serde::Deserialize;

use crate::args::{HttpMethod, OutputMode};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub method: Option<HttpMethod>,
    pub requests: Option<u64>,
    #[serde(alias = "workers")]
    pub concurrency: Option<usize>,
    pub headers: Option<Vec<String>>,
    pub body: Option<String>,
    pub output: Option<OutputMode>,
}
