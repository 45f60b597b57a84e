use serde::{Deserialize, Serialize};

/// Fallback code font size (px) when the configuration leaves it unset.
pub const DEFAULT_CODE_FONT_SIZE: u32 = 13;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineWrap {
    Off,
    #[default]
    On,
    WordWrapColumn,
    Bounded,
}

impl LineWrap {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
            Self::WordWrapColumn => "wordWrapColumn",
            Self::Bounded => "bounded",
        }
    }

    pub fn from_name(value: &str) -> Option<Self> {
        match value {
            "off" => Some(Self::Off),
            "on" => Some(Self::On),
            "wordWrapColumn" => Some(Self::WordWrapColumn),
            "bounded" => Some(Self::Bounded),
            _ => None,
        }
    }
}

/// Text editor configuration shared by every open document.
///
/// Missing fields deserialize to their defaults, so a partial user file is
/// merged over the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub auto_closing_brackets: bool,
    pub font_family: Option<String>,
    pub font_size: Option<u32>,
    pub line_height: Option<f64>,
    pub line_numbers: bool,
    pub line_wrap: LineWrap,
    pub word_wrap_column: u32,
    pub match_brackets: bool,
    pub read_only: bool,
    pub insert_spaces: bool,
    pub tab_size: u32,
    pub rulers: Vec<u32>,
    pub code_folding: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            auto_closing_brackets: true,
            font_family: None,
            font_size: None,
            line_height: None,
            line_numbers: true,
            line_wrap: LineWrap::On,
            word_wrap_column: 80,
            match_brackets: true,
            read_only: false,
            insert_spaces: true,
            tab_size: 4,
            rulers: Vec::new(),
            code_folding: false,
        }
    }
}

impl EditorConfig {
    pub fn effective_font_size(&self) -> u32 {
        self.font_size.unwrap_or(DEFAULT_CODE_FONT_SIZE)
    }
}
