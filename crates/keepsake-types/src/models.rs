use serde::{Deserialize, Serialize};

/// The fixed set of reaction emoji guests can leave on a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emoji {
    Heart,
    Fire,
    Laugh,
    Cry,
    Clap,
}

impl Emoji {
    pub const ALL: [Emoji; 5] = [
        Emoji::Heart,
        Emoji::Fire,
        Emoji::Laugh,
        Emoji::Cry,
        Emoji::Clap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emoji::Heart => "heart",
            Emoji::Fire => "fire",
            Emoji::Laugh => "laugh",
            Emoji::Cry => "cry",
            Emoji::Clap => "clap",
        }
    }

    pub fn parse(s: &str) -> Option<Emoji> {
        match s {
            "heart" => Some(Emoji::Heart),
            "fire" => Some(Emoji::Fire),
            "laugh" => Some(Emoji::Laugh),
            "cry" => Some(Emoji::Cry),
            "clap" => Some(Emoji::Clap),
            _ => None,
        }
    }
}

impl std::fmt::Display for Emoji {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a reaction toggle, so the client can update its UI state
/// without re-querying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Added,
    Removed,
    Changed,
}

/// Per-photo reaction tally rendered as lightweight badges across a gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts {
    pub heart: u32,
    pub fire: u32,
    pub laugh: u32,
    pub cry: u32,
    pub clap: u32,
    pub total: u32,
}

impl ReactionCounts {
    pub fn add(&mut self, emoji: Emoji) {
        match emoji {
            Emoji::Heart => self.heart += 1,
            Emoji::Fire => self.fire += 1,
            Emoji::Laugh => self.laugh += 1,
            Emoji::Cry => self.cry += 1,
            Emoji::Clap => self.clap += 1,
        }
        self.total += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emoji_serde_uses_lowercase_names() {
        for emoji in Emoji::ALL {
            let json = serde_json::to_string(&emoji).unwrap();
            assert_eq!(json, format!("\"{}\"", emoji.as_str()));
            let back: Emoji = serde_json::from_str(&json).unwrap();
            assert_eq!(back, emoji);
        }
    }

    #[test]
    fn emoji_parse_rejects_unknown() {
        assert_eq!(Emoji::parse("heart"), Some(Emoji::Heart));
        assert_eq!(Emoji::parse("thumbsup"), None);
        assert_eq!(Emoji::parse(""), None);
    }

    #[test]
    fn counts_accumulate_per_emoji_and_total() {
        let mut counts = ReactionCounts::default();
        counts.add(Emoji::Heart);
        counts.add(Emoji::Heart);
        counts.add(Emoji::Clap);
        assert_eq!(counts.heart, 2);
        assert_eq!(counts.clap, 1);
        assert_eq!(counts.fire, 0);
        assert_eq!(counts.total, 3);
    }
}
