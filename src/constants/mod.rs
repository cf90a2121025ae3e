/// Suggestions returned to an identity with an empty friend set.
pub const COLD_START_SUGGESTIONS: i64 = 5;

/// Process configuration, read once from the environment (and `.env`).
pub struct Env {
    pub database_url: String,
    pub database_max_connections: u32,
    pub frontend_url: String,
    pub ip: String,
    pub port: u16,
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}

impl Env {
    fn new() -> Self {
        Env {
            database_url: std::env::var("DATABASE_URL")
                .expect("DATABASE_URL must be set in .env file or environment variable"),
            database_max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", 5),
            frontend_url: var_or("FRONTEND_URL", "http://localhost:5173"),
            ip: var_or("IP", "127.0.0.1"),
            port: parsed_or("PORT", 5000),
        }
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_keys_fall_back() {
        assert_eq!(var_or("SOCIOFY_TEST_UNSET_URL", "http://x"), "http://x");
        assert_eq!(parsed_or::<u16>("SOCIOFY_TEST_UNSET_PORT", 5000), 5000);
    }
}
