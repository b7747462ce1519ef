//! Spoken reading commands

use serde::{Deserialize, Serialize};

/// Commands understood while reading text aloud
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingCommand {
    Stop,
    Next,
    Previous,
    Resume,
    ReadAll,
}

const KEYWORDS: &[(ReadingCommand, &[&str])] = &[
    (ReadingCommand::Stop, &["stop", "ferma"]),
    (ReadingCommand::Next, &["prossimo", "successivo", "avanti", "next"]),
    (ReadingCommand::Previous, &["precedente", "indietro", "back", "previous"]),
    (ReadingCommand::Resume, &["riprendi", "continua", "resume"]),
    (ReadingCommand::ReadAll, &["leggi tutto", "inizia lettura", "read all"]),
];

impl ReadingCommand {
    /// Match a recognized utterance; earlier commands win when several match
    pub fn parse(utterance: &str) -> Option<Self> {
        let normalized = utterance.trim().to_lowercase();
        KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| normalized.contains(w)))
            .map(|(command, _)| *command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(ReadingCommand::parse("  Next please"), Some(ReadingCommand::Next));
        assert_eq!(ReadingCommand::parse("fermati"), Some(ReadingCommand::Stop));
        assert_eq!(ReadingCommand::parse("READ ALL"), Some(ReadingCommand::ReadAll));
        assert_eq!(ReadingCommand::parse("torna indietro"), Some(ReadingCommand::Previous));
        assert_eq!(ReadingCommand::parse("hello"), None);
    }

    #[test]
    fn test_stop_takes_precedence() {
        assert_eq!(ReadingCommand::parse("stop, then next"), Some(ReadingCommand::Stop));
    }
}
