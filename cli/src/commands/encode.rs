//! Encode and decode commands

use anyhow::{Context, Result};
use clap::Args;
use poke_blocker_shared::utils::{percent_decode, percent_encode};

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Text to encode
    pub text: String,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Percent-encoded text
    pub text: String,
}

pub fn run_encode(args: EncodeArgs) -> Result<()> {
    println!("{}", percent_encode(&args.text));
    Ok(())
}

pub fn run_decode(args: DecodeArgs) -> Result<()> {
    let decoded = percent_decode(&args.text).context("Failed to decode input")?;
    println!("{}", decoded);
    Ok(())
}
