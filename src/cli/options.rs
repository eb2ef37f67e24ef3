//! Interactive builders for the format and filename-template selections.

use crate::cli::Prompter;
use crate::error::Result;
use crate::models::{AudioCodec, FilenameTemplate, FormatChoice, HeightCap};
use colored::*;

const MENU_KEYS: [&str; 4] = ["1", "2", "3", "4"];
const AUDIO_CODECS: [&str; 4] = ["mp3", "aac", "wav", "opus"];
const DEFAULT_HEIGHT: &str = "720";

fn print_menu(title: &str, entries: &[&str]) {
    println!("\n{}", title.bold());
    for (i, entry) in entries.iter().enumerate() {
        println!(" {}) {}", i + 1, entry);
    }
}

/// Asks for the video/audio quality selection.
pub fn choose_format(prompter: &dyn Prompter) -> Result<FormatChoice> {
    print_menu("Format options:", &FormatChoice::MENU);

    let choice = prompter.choose("Choose", &MENU_KEYS, "1")?;
    let format = match choice.as_str() {
        "2" => {
            let codec = prompter.choose("Audio format", &AUDIO_CODECS, "mp3")?;
            FormatChoice::Audio(codec.parse::<AudioCodec>()?)
        },
        "3" => FormatChoice::MaxHeight(choose_height(prompter)?),
        "4" => FormatChoice::ListOnly,
        _ => FormatChoice::Best,
    };
    Ok(format)
}

fn choose_height(prompter: &dyn Prompter) -> Result<HeightCap> {
    loop {
        let raw = prompter.input("Max height (e.g. 720,1080 or best)", Some(DEFAULT_HEIGHT))?;
        match raw.parse::<HeightCap>() {
            Ok(cap) => return Ok(cap),
            Err(_) => println!("{}", "Enter a height in pixels or 'best'.".red()),
        }
    }
}

/// Asks how downloaded files should be named.
pub fn choose_filename_template(prompter: &dyn Prompter) -> Result<FilenameTemplate> {
    print_menu("Filename template options:", &FilenameTemplate::MENU);

    let choice = prompter.choose("Choose", &MENU_KEYS, "1")?;
    let template = match choice.as_str() {
        "2" => FilenameTemplate::Title,
        "3" => FilenameTemplate::TitleDate,
        "4" => {
            let raw = prompter.input(
                "Enter custom template (yt-dlp format)",
                Some(FilenameTemplate::CUSTOM_DEFAULT),
            )?;
            FilenameTemplate::custom(&raw)
        },
        _ => FilenameTemplate::UploaderTitle,
    };
    Ok(template)
}
