use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub date_format: String,
    pub assignment_default_status: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            date_format: env::var("DATE_FORMAT").unwrap_or_else(|_| "%Y-%m-%d".to_string()),
            assignment_default_status: env::var("ASSIGNMENT_DEFAULT_STATUS")
                .unwrap_or_else(|_| "active".to_string()),
        }
    }

    /// Loads `.env` first, then reads the environment.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            assignment_default_status: "active".to_string(),
        }
    }
}
