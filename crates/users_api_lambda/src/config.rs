use users_api_core::{EmailPolicy, HandlerConfig};

pub const TABLE_NAME_VAR: &str = "USERS_TABLE_NAME";
pub const BASE_PATH_VAR: &str = "USERS_API_BASE_PATH";
pub const DEFAULT_TABLE_NAME: &str = "Users";

/// Settings read once per cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaConfig {
    pub table_name: String,
    pub base_path: Option<String>,
}

impl LambdaConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let table_name = non_blank(lookup(TABLE_NAME_VAR))
            .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());
        let base_path = non_blank(lookup(BASE_PATH_VAR));

        Self {
            table_name,
            base_path,
        }
    }

    pub fn handler_config(&self, email_policy: EmailPolicy) -> HandlerConfig {
        HandlerConfig {
            email_policy,
            base_path: self.base_path.clone(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
