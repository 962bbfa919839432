use crate::config::AppConfig;
use crate::logger;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::process::{Command, Stdio};
use std::thread;

pub const KOREAN: &str = "ko-KR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechRequest {
    Speak { text: String, language: String },
    Play { url: String },
}

/// Fire-and-forget handle to the playback worker. Requests are dropped silently
/// when speech is disabled or the worker has gone away.
#[derive(Debug, Clone, Default)]
pub struct Speaker {
    tx: Option<Sender<SpeechRequest>>,
}

impl Speaker {
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn from_sender(tx: Sender<SpeechRequest>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn spawn(config: &AppConfig) -> Self {
        if !config.speech_enabled {
            return Self::disabled();
        }
        let (tx, rx) = unbounded();
        let tts_command = config.tts_command.clone();
        let audio_command = config.audio_command.clone();
        match thread::Builder::new()
            .name("aigo::speech_worker".to_string())
            .spawn(move || run_worker(rx, &tts_command, &audio_command))
        {
            Ok(_) => Self::from_sender(tx),
            Err(e) => {
                logger::log(&format!("Failed to spawn speech worker: {}", e));
                Self::disabled()
            }
        }
    }

    pub fn speak(&self, text: &str, language: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.send(SpeechRequest::Speak {
            text: text.to_string(),
            language: language.to_string(),
        });
    }

    pub fn play(&self, url: &str) {
        self.send(SpeechRequest::Play {
            url: url.to_string(),
        });
    }

    /// Plays the recording when one exists, otherwise synthesizes `text`.
    pub fn play_or_speak(&self, url: Option<&str>, text: &str, language: &str) {
        match url.filter(|u| !u.trim().is_empty()) {
            Some(url) => self.play(url),
            None => self.speak(text, language),
        }
    }

    fn send(&self, request: SpeechRequest) {
        if let Some(tx) = &self.tx
            && tx.send(request).is_err()
        {
            logger::log("Speech worker disconnected, request dropped");
        }
    }
}

fn run_worker(rx: Receiver<SpeechRequest>, tts_command: &str, audio_command: &str) {
    for request in rx.iter() {
        let command = match &request {
            SpeechRequest::Speak { text, language } => {
                build_command(tts_command, &["-v", voice_for(language), text.as_str()])
            }
            SpeechRequest::Play { url } => build_command(audio_command, &[url.as_str()]),
        };
        let Some(mut command) = command else {
            logger::log("Speech command is empty, request dropped");
            continue;
        };
        let status = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) if !status.success() => {
                logger::log(&format!("Speech command exited with {}", status))
            }
            Ok(_) => {}
            Err(e) => logger::log(&format!("Speech command failed: {}", e)),
        }
    }
    logger::log("Speech worker channel disconnected, exiting");
}

/// Splits a command template on whitespace and appends `args`.
fn build_command(template: &str, args: &[&str]) -> Option<Command> {
    let mut parts = template.split_whitespace();
    let program = parts.next()?;
    let mut command = Command::new(program);
    command.args(parts).args(args);
    Some(command)
}

/// `ko-KR` -> `ko`.
fn voice_for(language: &str) -> &str {
    language.split(['-', '_']).next().unwrap_or(language)
}
