use crate::draft::ParticipantId;
use log::LevelFilter;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    /// Display names for the two players. The draft engine only knows the
    /// opaque ParticipantId; names are presentation.
    pub user_one: String,
    pub user_two: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            user_one: "player-one".to_string(),
            user_two: "player-two".to_string(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        let env_name = |var: &str| {
            std::env::var(var)
                .ok()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
        };
        let defaults = Self::default();
        Self {
            log_level: env_name("MMATUI_LOG").as_deref().and_then(parse_log_level),
            user_one: env_name("MMATUI_USER1").unwrap_or(defaults.user_one),
            user_two: env_name("MMATUI_USER2").unwrap_or(defaults.user_two),
            ..defaults
        }
    }

    pub fn user_name(&self, participant: ParticipantId) -> &str {
        match participant {
            ParticipantId::One => &self.user_one,
            ParticipantId::Two => &self.user_two,
        }
    }
}

/// "error"/"warn"/"info"/"debug"/"trace"/"off", case-insensitive.
fn parse_log_level(value: &str) -> Option<LevelFilter> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_parses_filter_names_case_insensitively() {
        assert_eq!(parse_log_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_log_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_log_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn user_names_resolve_by_participant() {
        let settings = AppSettings {
            user_one: "alice".into(),
            user_two: "bob".into(),
            ..Default::default()
        };
        assert_eq!(settings.user_name(ParticipantId::One), "alice");
        assert_eq!(settings.user_name(ParticipantId::Two), "bob");
    }
}
