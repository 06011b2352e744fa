use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::input::expand_key;

/// Suffix of the diary key holding a day's media paths, e.g. `2025-04-01_media`.
pub const MEDIA_KEY_SUFFIX: &str = "_media";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mood {
    Great,
    Good,
    #[default]
    Okay,
    Bad,
    Awful,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Great, Mood::Good, Mood::Okay, Mood::Bad, Mood::Awful];

    pub fn stamp(self) -> &'static str {
        match self {
            Mood::Great => "😄",
            Mood::Good => "😊",
            Mood::Okay => "😐",
            Mood::Bad => "😟",
            Mood::Awful => "😭",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mood::Great => "great",
            Mood::Good => "good",
            Mood::Okay => "okay",
            Mood::Bad => "bad",
            Mood::Awful => "awful",
        }
    }

    pub fn from_stamp(stamp: &str) -> Option<Mood> {
        Mood::ALL.into_iter().find(|m| m.stamp() == stamp)
    }

    /// Accepts a stamp or an unambiguous prefix of a mood name.
    pub fn parse(input: &str) -> Result<Mood, PlannerError> {
        if let Some(mood) = Mood::from_stamp(input.trim()) {
            return Ok(mood);
        }
        let names: Vec<&str> = Mood::ALL.iter().map(|m| m.name()).collect();
        let name = expand_key(input.trim(), &names)
            .map_err(|_| PlannerError::UnknownMood(input.to_string()))?;
        Mood::ALL
            .into_iter()
            .find(|m| m.name() == name)
            .ok_or_else(|| PlannerError::UnknownMood(input.to_string()))
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.stamp(), self.name())
    }
}

/// Values in `diary.json`: plain diary text, or a list of media paths under
/// the `{date}_media` keys.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum DiaryValue {
    Text(String),
    Media(Vec<String>),
}

/// `mood.json`: ISO date -> stamp.
pub type MoodBook = BTreeMap<String, String>;

/// `diary.json`: ISO date -> text, `{date}_media` -> paths.
pub type DiaryBook = BTreeMap<String, DiaryValue>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalBook {
    pub moods: MoodBook,
    pub diary: DiaryBook,
}

pub fn media_key(date_key: &str) -> String {
    format!("{}{}", date_key, MEDIA_KEY_SUFFIX)
}
