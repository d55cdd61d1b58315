use crate::engine::board::STARTING_PLACEMENT;

/// Server configuration parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server listen port.
    pub port: u16,
    /// Server bind host.
    pub host: String,
    /// Position loaded when a create request carries none.
    pub default_fen: String,
    /// Upper bound on games hosted at once.
    pub max_games: usize,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        let defaults = AppConfig::default();
        AppConfig {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            host: std::env::var("HOST").unwrap_or(defaults.host),
            default_fen: std::env::var("CHESS_DEFAULT_FEN")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.default_fen),
            max_games: std::env::var("CHESS_MAX_GAMES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.max_games),
        }
    }

    /// Socket address string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: 8082,
            host: "0.0.0.0".to_string(),
            default_fen: format!("{STARTING_PLACEMENT} w"),
            max_games: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Game;

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8082);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.max_games, 1000);
        assert_eq!(config.bind_addr(), "0.0.0.0:8082");
    }

    #[test]
    fn default_fen_loads() {
        let config = AppConfig::default();
        let game = Game::from_fen(&config.default_fen).unwrap();
        assert_eq!(game.board().pieces().count(), 32);
    }

    #[test]
    fn from_env_defaults() {
        // Without setting env vars, should fall back to defaults
        let config = AppConfig::from_env();
        assert_eq!(config.port, 8082);
        assert_eq!(config.host, "0.0.0.0");
    }
}
