//! Interactive menu mode
//!
//! A flat six-option menu over stdin. Each iteration collects a URL and
//! the operation parameters, falling back to a stated default on empty
//! input, then runs exactly one facade operation.

use crate::downloader::Downloader;
use anyhow::Result;
use std::io::{self, BufRead, Write};

const MENU: &str = "\
=== tubeload ===
1. Download video
2. Download audio
3. Download playlist
4. Show video information
5. List available formats
6. Quit";

/// Qualities where yt-dlp has to merge separate video and audio streams.
const MUXED_QUALITIES: [&str; 4] = ["best", "4k", "1440p", "1080p"];

/// Run the menu over stdin/stdout until the user quits.
pub async fn run(downloader: &Downloader) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    run_loop(downloader, &mut input, &mut out).await
}

/// Menu loop over an arbitrary reader/writer pair.
///
/// Exits on choice 6 or end of input. Errors inside an iteration are
/// printed and the loop continues; only a broken reader/writer ends it
/// early.
pub async fn run_loop<R: BufRead, W: Write>(
    downloader: &Downloader,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{MENU}")?;

    loop {
        let Some(choice) = prompt(input, out, "\nSelect an option (1-6): ")? else {
            break;
        };

        if choice == "6" {
            writeln!(out, "Goodbye!")?;
            break;
        }
        if !matches!(choice.as_str(), "1" | "2" | "3" | "4" | "5") {
            writeln!(out, "Invalid choice, enter a number between 1 and 6.")?;
            continue;
        }

        let Some(url) = prompt(input, out, "Enter a video URL: ")? else {
            break;
        };
        if url.is_empty() {
            writeln!(out, "No URL given.")?;
            continue;
        }

        let result = match choice.as_str() {
            "1" => {
                let quality = prompt_or(
                    input,
                    out,
                    "Quality (best/4k/1440p/1080p/720p/480p) [best]: ",
                    "best",
                )?;
                let container = prompt_or(input, out, "Format (mp4/webm/mkv) [mp4]: ", "mp4")?;

                let mut include_audio = true;
                if MUXED_QUALITIES.contains(&quality.as_str()) {
                    writeln!(
                        out,
                        "Note: '{quality}' needs ffmpeg to merge video and audio."
                    )?;
                    let answer = prompt_or(input, out, "Include audio? (y/n) [y]: ", "y")?;
                    include_audio = answer != "n";
                }

                let mut retry = || confirm_from(input, out);
                downloader
                    .download_video(&url, &quality, &container, include_audio, &mut retry)
                    .await
            }
            "2" => {
                let quality = prompt_or(input, out, "Quality (best/worst) [best]: ", "best")?;
                let container =
                    prompt_or(input, out, "Format (mp3/wav/m4a/flac) [mp3]: ", "mp3")?;
                downloader.download_audio(&url, &quality, &container).await
            }
            "3" => {
                let audio_only = prompt_or(input, out, "Audio only? (y/n) [n]: ", "n")? == "y";
                let max = prompt_or(input, out, "Max downloads [all]: ", "")?;
                let max_items = max.parse::<u32>().ok();
                downloader.download_playlist(&url, audio_only, max_items).await
            }
            "4" => match downloader.get_video_info(&url).await {
                Ok(details) => {
                    writeln!(out, "\n=== Video information ===")?;
                    writeln!(out, "{details}")?;
                    Ok(())
                }
                Err(e) => Err(e),
            },
            "5" => downloader.list_formats(&url).await,
            _ => Ok(()),
        };

        if let Err(e) = result {
            writeln!(out, "Error: {e}")?;
        }
    }

    Ok(())
}

/// Write `message`, read one trimmed line. `None` means end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> io::Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Like [`prompt`], with a default for empty input or end of input.
fn prompt_or<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
    default: &str,
) -> io::Result<String> {
    match prompt(input, out, message)? {
        Some(answer) if !answer.is_empty() => Ok(answer),
        _ => Ok(default.to_string()),
    }
}

/// The retry question asked when merging fails for want of ffmpeg.
fn confirm_from<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> bool {
    match prompt_or(
        input,
        out,
        "Download the video without audio instead? (y/n) [n]: ",
        "n",
    ) {
        Ok(answer) => matches!(answer.to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
