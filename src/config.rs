use std::path::PathBuf;

pub const ENV_DATA_DIR: &str = "AIGO_DATA_DIR";
pub const ENV_CATALOG: &str = "AIGO_CATALOG";
pub const ENV_TTS_COMMAND: &str = "AIGO_TTS_COMMAND";
pub const ENV_AUDIO_COMMAND: &str = "AIGO_AUDIO_COMMAND";
pub const ENV_SPEECH: &str = "AIGO_SPEECH";

const DEFAULT_TTS_COMMAND: &str = "espeak-ng";
const DEFAULT_AUDIO_COMMAND: &str = "mpv --no-video --really-quiet";
const DB_FILE_NAME: &str = "aigo.db";

/// Runtime settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub tts_command: String,
    pub audio_command: String,
    pub speech_enabled: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            data_dir: get(ENV_DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| default_data_dir(&lookup)),
            catalog_path: get(ENV_CATALOG).map(PathBuf::from),
            tts_command: get(ENV_TTS_COMMAND).unwrap_or_else(|| DEFAULT_TTS_COMMAND.to_string()),
            audio_command: get(ENV_AUDIO_COMMAND)
                .unwrap_or_else(|| DEFAULT_AUDIO_COMMAND.to_string()),
            speech_enabled: get(ENV_SPEECH)
                .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "off" | "false" | "no"))
                .unwrap_or(true),
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn default_data_dir<F>(lookup: &F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if cfg!(target_os = "windows") {
        let home = lookup("USERPROFILE").unwrap_or_else(|| "C:\\Users\\User".to_string());
        PathBuf::from(home).join(".local\\share\\aigo")
    } else {
        let home = lookup("HOME").unwrap_or_else(|| "/home/user".to_string());
        PathBuf::from(home).join(".local/share/aigo")
    }
}
