//! 构建期配置
//!
//! API 地址在编译时通过环境变量注入，缺省指向本地开发后端。

const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Base URL every request is resolved against, without a trailing slash.
pub fn api_base_url() -> &'static str {
    option_env!("KUDOS_API_URL").unwrap_or(DEFAULT_API_URL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_has_no_trailing_slash() {
        assert!(!api_base_url().ends_with('/'));
    }
}
