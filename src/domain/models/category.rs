use serde::{Deserialize, Serialize};
use std::fmt;

/// Marketplace listing category, decoded from the contract's enum code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Art,
    Music,
    Sport,
    Meme,
    Photo,
    Game,
    Animal,
    License,
    Legendary,
    Others,
}

impl Category {
    /// Map the contract's enum code to a category; unknown codes are Others
    pub fn from_code(code: u64) -> Self {
        match code {
            0 => Category::Art,
            1 => Category::Music,
            2 => Category::Sport,
            3 => Category::Meme,
            4 => Category::Photo,
            5 => Category::Game,
            6 => Category::Animal,
            7 => Category::License,
            8 => Category::Legendary,
            _ => Category::Others,
        }
    }

    /// Parse a stored label back into a category
    pub fn from_label(label: &str) -> Self {
        match label {
            "art" => Category::Art,
            "music" => Category::Music,
            "sport" => Category::Sport,
            "meme" => Category::Meme,
            "photo" => Category::Photo,
            "game" => Category::Game,
            "animal" => Category::Animal,
            "license" => Category::License,
            "legendary" => Category::Legendary,
            _ => Category::Others,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Art => "art",
            Category::Music => "music",
            Category::Sport => "sport",
            Category::Meme => "meme",
            Category::Photo => "photo",
            Category::Game => "game",
            Category::Animal => "animal",
            Category::License => "license",
            Category::Legendary => "legendary",
            Category::Others => "others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
