//! User-facing console lines for the interactive commands (`status`,
//! `config`, `init`). Engine activity goes through `tracing` instead.

use ansi_term::{Colour, Style};
use std::fmt;

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Blue.bold().paint(ICON_INFO), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Green.bold().paint(ICON_OK), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Yellow.bold().paint(ICON_WARN), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", Colour::Red.bold().paint(ICON_ERR), msg);
}

pub fn header<T: fmt::Display>(msg: T) {
    println!("{}", Style::new().bold().paint(format!("== {msg}")));
}

/// `label: value`, with the value greyed out when absent.
pub fn field(label: &str, value: Option<&str>) {
    match value {
        Some(v) => println!("  {label:<12} {}", Colour::Green.paint(v)),
        None => println!("  {label:<12} {}", Colour::Fixed(8).paint("--")),
    }
}
