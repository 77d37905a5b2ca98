use std::time::Duration;

use clap::Args;
use rest_connector_exec::HttpClientConfig;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct HttpArgs {
    /// Request timeout in milliseconds.
    #[arg(long, default_value_t = 30000)]
    pub timeout: u64,
    #[arg(long, default_value_t = 4_194_304)]
    pub max_response_bytes: usize,
    #[arg(long)]
    pub no_follow_redirects: bool,
    #[arg(long, default_value_t = 10)]
    pub max_redirects: usize,
    /// Treat non-2xx responses as connector errors.
    #[arg(long)]
    pub fail_on_error_status: bool,
}

impl HttpArgs {
    pub fn to_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout: Duration::from_millis(self.timeout),
            max_response_bytes: self.max_response_bytes,
            follow_redirects: !self.no_follow_redirects,
            max_redirects: self.max_redirects,
            fail_on_error_status: self.fail_on_error_status,
            ..Default::default()
        }
    }
}
