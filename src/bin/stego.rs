//! # Offline Steganography CLI
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin stego -- encode --input photo.jpg --output secret.png --message "Hi"
//! cargo run --bin stego -- decode --input secret.png
//! cargo run --bin stego -- capacity --input photo.jpg
//! ```
//!
//! Encoded output is always PNG; lossy formats would destroy the hidden bits.

use clap::{Parser, Subcommand};
use log::info;

use stego_backend::processing::steganography;
use stego_backend::utils::init_logger;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide a message in an image
    Encode {
        /// Carrier image (any format the `image` crate can read)
        #[arg(short, long)]
        input: String,

        /// Where to write the PNG result
        #[arg(short, long)]
        output: String,

        /// Text to hide (characters up to U+00FF)
        #[arg(short, long)]
        message: String,
    },

    /// Print the message hidden in an image
    Decode {
        #[arg(short, long)]
        input: String,
    },

    /// Print how many characters an image can carry
    Capacity {
        #[arg(short, long)]
        input: String,
    },
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let args = Args::parse();

    match args.command {
        Command::Encode {
            input,
            output,
            message,
        } => {
            steganography::embed_text_file(&input, &message, &output)?;
            info!("✅ Hid {} chars from {} in {}", message.chars().count(), input, output);
        }
        Command::Decode { input } => {
            let message = steganography::extract_text_file(&input)?;
            println!("{}", message);
        }
        Command::Capacity { input } => {
            let (width, height) = image::image_dimensions(&input)?;
            println!(
                "{}x{}: up to {} characters",
                width,
                height,
                steganography::capacity_bytes(width, height)
            );
        }
    }

    Ok(())
}
