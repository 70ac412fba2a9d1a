use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Opaque connection id handed out by the gateway
pub type ConnId = String;

/// Lobby prompts a player answers about themselves
pub const PROMPTS: [&str; 8] = [
    "My most recognizable feature is…",
    "People always confuse me for…",
    "I am absolutely NOT…",
    "My secret talent is…",
    "If I were a superhero, my power would be…",
    "The strangest thing about me is…",
    "You'll never guess that I…",
    "My friends describe me as…",
];

pub fn random_prompt() -> String {
    PROMPTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(PROMPTS[0])
        .to_string()
}

/// Data a client supplies when registering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub nickname: String,
    /// Opaque blob (an encoded drawing or photo) other players use to find this one
    #[serde(alias = "drawing")]
    pub identifying_info: String,
    #[serde(default)]
    pub tell: String,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub id: ConnId,
    pub nickname: String,
    pub identifying_info: String,
    pub tell: String,
    pub prompt: String,
    pub squad_id: Option<String>,
    pub joined_at: DateTime<Utc>,
    pub connected: bool,
    #[serde(skip)]
    pub last_seen: Instant,
}

impl Player {
    pub fn new(id: ConnId, registration: Registration, now: Instant) -> Self {
        let prompt = registration
            .prompt
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(random_prompt);

        Self {
            id,
            nickname: registration.nickname,
            identifying_info: registration.identifying_info,
            tell: registration.tell,
            prompt,
            squad_id: None,
            joined_at: Utc::now(),
            connected: true,
            last_seen: now,
        }
    }

    pub fn touch(&mut self, now: Instant) {
        self.last_seen = now;
        self.connected = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(prompt: Option<&str>) -> Registration {
        Registration {
            nickname: "ghost".to_string(),
            identifying_info: "data:image/png;base64,AAAA".to_string(),
            tell: "red scarf".to_string(),
            prompt: prompt.map(str::to_string),
        }
    }

    #[test]
    fn test_supplied_prompt_is_kept() {
        let player = Player::new(
            "c1".to_string(),
            registration(Some("My secret talent is…")),
            Instant::now(),
        );
        assert_eq!(player.prompt, "My secret talent is…");
        assert!(player.squad_id.is_none());
        assert!(player.connected);
    }

    #[test]
    fn test_missing_prompt_comes_from_pool() {
        let player = Player::new("c1".to_string(), registration(None), Instant::now());
        assert!(PROMPTS.contains(&player.prompt.as_str()));

        let blank = Player::new("c2".to_string(), registration(Some("  ")), Instant::now());
        assert!(PROMPTS.contains(&blank.prompt.as_str()));
    }

    #[test]
    fn test_registration_accepts_drawing_alias() {
        let registration: Registration = serde_json::from_str(
            r#"{"nickname": "ghost", "drawing": "blob", "tell": "hat"}"#,
        )
        .unwrap();
        assert_eq!(registration.identifying_info, "blob");
        assert!(registration.prompt.is_none());
    }
}
