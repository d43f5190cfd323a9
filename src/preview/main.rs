//! Offline caption preview.
//!
//! Runs the caption rewriter on a file or stdin and prints what the bot
//! would publish, without talking to Telegram.

use std::io::Read;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use caption_cleaner_bot::caption::{MediaKind, RewriteResult, clean_lines, rewrite};

/// Media the caption belongs to.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Media {
    Photo,
    Video,
    Document,
    Text,
}

impl From<Media> for MediaKind {
    fn from(media: Media) -> Self {
        match media {
            Media::Photo => Self::Photo,
            Media::Video => Self::Video,
            Media::Document => Self::OtherDocument,
            Media::Text => Self::TextOnly,
        }
    }
}

/// Caption rewrite preview.
#[derive(Parser, Debug)]
#[command(name = "preview_caption")]
#[command(about = "Shows how the bot would rewrite a caption")]
#[command(version)]
struct Args {
    /// File containing the caption (reads stdin when omitted).
    #[arg(short, long)]
    file: Option<String>,

    /// Media the caption is attached to.
    #[arg(short, long, value_enum, default_value = "photo")]
    media: Media,

    /// Print the cleaned lines before escaping instead of the final markup.
    #[arg(long)]
    lines: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let caption = match read_caption(args.file.as_deref()) {
        Ok(caption) => caption,
        Err(e) => {
            eprintln!("✗ Failed to read caption: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.lines {
        if caption.is_empty() {
            eprintln!("✗ Caption is empty, nothing to rewrite");
            return ExitCode::FAILURE;
        }
        for (i, line) in clean_lines(&caption).iter().enumerate() {
            println!("{:>3} | {line}", i + 1);
        }
        return ExitCode::SUCCESS;
    }

    match rewrite(Some(caption.as_str()), args.media.into()) {
        RewriteResult::Rewritten(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        RewriteResult::Unchanged => {
            eprintln!("✗ Caption is empty, nothing to rewrite");
            ExitCode::FAILURE
        }
    }
}

/// Reads the caption, dropping one trailing newline left by editors and pipes.
fn read_caption(path: Option<&str>) -> std::io::Result<String> {
    let mut caption = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    if caption.ends_with('\n') {
        caption.pop();
    }
    Ok(caption)
}
