//! Defines the value types a download session is built from.
//!
//! Includes:
//! - The fixed platform menu catalogue (`PlatformChoice`, `MenuAction`).
//! - The download target (`Target`), either a URL or a search query.
//! - The format and filename-template selections and the argument
//!   fragments / template strings they map to.
//!
//! Everything here is pure; prompting lives in `cli::options`.

use crate::error::{AppError, Result};
use std::fmt;
use std::str::FromStr;

/// Prefix that makes the downloader run a search instead of resolving a URL.
pub const SEARCH_PREFIX: &str = "ytsearch:";

/// Format selector for the best combined video and audio.
pub const BEST_VIDEO_AUDIO: &str = "bestvideo[ext!=webm]+bestaudio/best";

/// Flag that turns a download into a listing of available formats.
pub const LIST_FORMATS_FLAG: &str = "--list-formats";

// --- Platform menu ---

/// One row of the platform menu: a selector key and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformChoice {
    pub key: &'static str,
    pub label: &'static str,
}

/// The fixed, ordered platform catalogue shown by the main menu.
pub const PLATFORMS: [PlatformChoice; 14] = [
    PlatformChoice { key: "1", label: "YouTube / Shorts / Music" },
    PlatformChoice { key: "2", label: "TikTok" },
    PlatformChoice { key: "3", label: "Instagram (Reel / Post / IGTV)" },
    PlatformChoice { key: "4", label: "X / Twitter" },
    PlatformChoice { key: "5", label: "Facebook" },
    PlatformChoice { key: "6", label: "Pinterest" },
    PlatformChoice { key: "7", label: "Reddit" },
    PlatformChoice { key: "8", label: "Vimeo" },
    PlatformChoice { key: "9", label: "SoundCloud" },
    PlatformChoice { key: "A", label: "Auto-detect (any link)" },
    PlatformChoice { key: "S", label: "Search (ytsearch)" },
    PlatformChoice { key: "I", label: "Install prerequisites" },
    PlatformChoice { key: "D", label: "Support / Donate" },
    PlatformChoice { key: "Q", label: "Quit" },
];

/// Key selected when the user just presses Enter at the main menu.
pub const DEFAULT_MENU_KEY: &str = "A";

/// What the main menu does for a selected key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Quit,
    Install,
    Support,
    Search,
    AutoDetect,
    Platform(&'static str),
}

impl MenuAction {
    /// Resolves a menu key (case-insensitive) against the catalogue.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_uppercase();
        let choice = PLATFORMS.iter().find(|p| p.key == key)?;
        Some(match choice.key {
            "Q" => MenuAction::Quit,
            "I" => MenuAction::Install,
            "D" => MenuAction::Support,
            "S" => MenuAction::Search,
            "A" => MenuAction::AutoDetect,
            _ => MenuAction::Platform(choice.label),
        })
    }
}

// --- Target ---

/// The final argument handed to the downloader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Url(String),
    Search(String),
}

impl Target {
    /// Builds a target from raw input, returning `None` when the input is blank.
    pub fn from_input(input: &str, search_mode: bool) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        Some(if search_mode {
            Target::Search(input.to_string())
        } else {
            Target::Url(input.to_string())
        })
    }

    /// The string passed on the downloader's command line.
    pub fn as_arg(&self) -> String {
        match self {
            Target::Url(url) => url.clone(),
            Target::Search(query) => format!("{}{}", SEARCH_PREFIX, query),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_arg())
    }
}

// --- Format selection ---

/// Audio codecs offered for audio-only extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCodec {
    Mp3,
    Aac,
    Wav,
    Opus,
}

impl AudioCodec {
    pub const ALL: [AudioCodec; 4] = [
        AudioCodec::Mp3,
        AudioCodec::Aac,
        AudioCodec::Wav,
        AudioCodec::Opus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCodec::Mp3 => "mp3",
            AudioCodec::Aac => "aac",
            AudioCodec::Wav => "wav",
            AudioCodec::Opus => "opus",
        }
    }
}

impl FromStr for AudioCodec {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        AudioCodec::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AppError::Cli(format!("Unsupported audio format: {}", s)))
    }
}

/// Maximum video height for the resolution-capped format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeightCap {
    Best,
    Max(u32),
}

impl FromStr for HeightCap {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("best") {
            return Ok(HeightCap::Best);
        }
        s.parse::<u32>()
            .ok()
            .filter(|h| *h > 0)
            .map(HeightCap::Max)
            .ok_or_else(|| AppError::Cli(format!("Invalid height: {}", s)))
    }
}

/// The user's video/audio quality selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatChoice {
    Best,
    Audio(AudioCodec),
    MaxHeight(HeightCap),
    ListOnly,
}

impl FormatChoice {
    /// Menu entries, in order; the menu key is the 1-based position.
    pub const MENU: [&'static str; 4] = [
        "Best video + audio",
        "Audio only (choose format)",
        "Choose resolution",
        "List formats only",
    ];

    /// Downloader arguments encoding this selection.
    pub fn fragment(&self) -> Vec<String> {
        match self {
            FormatChoice::Best => vec!["-f".into(), BEST_VIDEO_AUDIO.into()],
            FormatChoice::Audio(codec) => vec![
                "-x".into(),
                "--audio-format".into(),
                codec.as_str().into(),
            ],
            FormatChoice::MaxHeight(HeightCap::Best) => vec!["-f".into(), "best".into()],
            FormatChoice::MaxHeight(HeightCap::Max(height)) => vec![
                "-f".into(),
                format!("bestvideo[height<={}]+bestaudio/best", height),
            ],
            FormatChoice::ListOnly => vec![LIST_FORMATS_FLAG.into()],
        }
    }

    /// Audio extraction needs the transcoder on the search path.
    pub fn extracts_audio(&self) -> bool {
        matches!(self, FormatChoice::Audio(_))
    }

    pub fn is_list_only(&self) -> bool {
        matches!(self, FormatChoice::ListOnly)
    }
}

// --- Filename template ---

/// Output filename pattern, in the downloader's placeholder syntax.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilenameTemplate {
    #[default]
    UploaderTitle,
    Title,
    TitleDate,
    Custom(String),
}

impl FilenameTemplate {
    pub const MENU: [&'static str; 4] = [
        "Default: uploader - title.ext",
        "Title only: title.ext",
        "Title + date: title_date.ext",
        "Custom input",
    ];

    /// Pre-filled answer for the custom template prompt.
    pub const CUSTOM_DEFAULT: &'static str = "%(title)s.%(ext)s";

    /// Custom templates are only checked for non-emptiness; blank input takes the default.
    pub fn custom(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            FilenameTemplate::Custom(Self::CUSTOM_DEFAULT.to_string())
        } else {
            FilenameTemplate::Custom(input.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FilenameTemplate::UploaderTitle => "%(uploader)s - %(title)s.%(ext)s",
            FilenameTemplate::Title => "%(title)s.%(ext)s",
            FilenameTemplate::TitleDate => "%(title)s_%(upload_date)s.%(ext)s",
            FilenameTemplate::Custom(template) => template,
        }
    }
}

// --- Request ---

/// Everything gathered from the user for one download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub target: Target,
    pub format: FormatChoice,
    pub template: FilenameTemplate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", MenuAction::Platform("YouTube / Shorts / Music"))]
    #[case("2", MenuAction::Platform("TikTok"))]
    #[case("9", MenuAction::Platform("SoundCloud"))]
    #[case("a", MenuAction::AutoDetect)]
    #[case("S", MenuAction::Search)]
    #[case("i", MenuAction::Install)]
    #[case("D", MenuAction::Support)]
    #[case("q", MenuAction::Quit)]
    fn test_menu_action_from_key(#[case] key: &str, #[case] expected: MenuAction) {
        assert_eq!(MenuAction::from_key(key), Some(expected));
    }

    #[test]
    fn test_menu_action_rejects_unknown_keys() {
        assert_eq!(MenuAction::from_key("0"), None);
        assert_eq!(MenuAction::from_key("Z"), None);
        assert_eq!(MenuAction::from_key(""), None);
    }

    #[test]
    fn test_catalogue_keys_are_unique() {
        for (i, a) in PLATFORMS.iter().enumerate() {
            for b in &PLATFORMS[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
        assert!(PLATFORMS.iter().any(|p| p.key == DEFAULT_MENU_KEY));
    }

    #[test]
    fn test_search_target_is_prefixed() {
        let target = Target::from_input("lofi beats", true).unwrap();
        assert_eq!(target.as_arg(), "ytsearch:lofi beats");
    }

    #[test]
    fn test_url_target_is_trimmed() {
        let target = Target::from_input("  https://vm.tiktok.com/abc/ \n", false).unwrap();
        assert_eq!(target, Target::Url("https://vm.tiktok.com/abc/".to_string()));
    }

    #[test]
    fn test_blank_input_has_no_target() {
        assert_eq!(Target::from_input("   ", false), None);
        assert_eq!(Target::from_input("", true), None);
    }

    #[rstest]
    #[case(FormatChoice::Best, &["-f", "bestvideo[ext!=webm]+bestaudio/best"])]
    #[case(FormatChoice::Audio(AudioCodec::Mp3), &["-x", "--audio-format", "mp3"])]
    #[case(FormatChoice::Audio(AudioCodec::Wav), &["-x", "--audio-format", "wav"])]
    #[case(FormatChoice::Audio(AudioCodec::Opus), &["-x", "--audio-format", "opus"])]
    #[case(FormatChoice::MaxHeight(HeightCap::Max(720)), &["-f", "bestvideo[height<=720]+bestaudio/best"])]
    #[case(FormatChoice::MaxHeight(HeightCap::Max(1080)), &["-f", "bestvideo[height<=1080]+bestaudio/best"])]
    #[case(FormatChoice::MaxHeight(HeightCap::Best), &["-f", "best"])]
    #[case(FormatChoice::ListOnly, &["--list-formats"])]
    fn test_format_fragment(#[case] choice: FormatChoice, #[case] expected: &[&str]) {
        assert_eq!(choice.fragment(), expected);
    }

    #[test]
    fn test_only_audio_choice_extracts_audio() {
        assert!(FormatChoice::Audio(AudioCodec::Aac).extracts_audio());
        assert!(!FormatChoice::Best.extracts_audio());
        assert!(!FormatChoice::ListOnly.extracts_audio());
        assert!(FormatChoice::ListOnly.is_list_only());
    }

    #[test]
    fn test_audio_codec_parsing() {
        assert_eq!("AAC".parse::<AudioCodec>().unwrap(), AudioCodec::Aac);
        assert!("flac".parse::<AudioCodec>().is_err());
    }

    #[test]
    fn test_height_cap_parsing() {
        assert_eq!("best".parse::<HeightCap>().unwrap(), HeightCap::Best);
        assert_eq!(" 480 ".parse::<HeightCap>().unwrap(), HeightCap::Max(480));
        assert!("0".parse::<HeightCap>().is_err());
        assert!("hd".parse::<HeightCap>().is_err());
    }

    #[rstest]
    #[case(FilenameTemplate::UploaderTitle, "%(uploader)s - %(title)s.%(ext)s")]
    #[case(FilenameTemplate::Title, "%(title)s.%(ext)s")]
    #[case(FilenameTemplate::TitleDate, "%(title)s_%(upload_date)s.%(ext)s")]
    #[case(FilenameTemplate::custom("%(id)s.%(ext)s"), "%(id)s.%(ext)s")]
    #[case(FilenameTemplate::custom(""), "%(title)s.%(ext)s")]
    fn test_template_strings(#[case] template: FilenameTemplate, #[case] expected: &str) {
        assert_eq!(template.as_str(), expected);
    }
}
