use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_notes_api_url")]
    pub notes_api_url: String,
}

fn default_notes_api_url() -> String {
    "http://localhost:3001/api/notes".to_string()
}

/// Reads `NOTES_API_URL`.
pub fn load_config() -> Result<Config, envy::Error> {
    envy::from_env::<Config>()
}
