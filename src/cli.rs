use crate::description;
use clap::{Parser, ValueEnum};
use log::info;
use nta_fmt_xml::{SyncNotation, XmlConfig};
use std::path::PathBuf;

/// Notation of synchronisation labels in the generated model
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Notation {
    /// channel name followed by SEND or RECEIVE
    Legacy,
    /// channel name followed by ! or ?
    Uppaal,
}

impl From<Notation> for SyncNotation {
    fn from(value: Notation) -> Self {
        match value {
            Notation::Legacy => SyncNotation::Legacy,
            Notation::Uppaal => SyncNotation::Uppaal,
        }
    }
}

/// A generator of UPPAAL timed-automata models from JSON descriptions
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path of the model's JSON description
    #[arg(value_hint = clap::ValueHint::FilePath)]
    model: PathBuf,
    /// Output path, to which the .xml extension is appended [default: model path without extension]
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    output: Option<PathBuf>,
    /// Notation of synchronisation labels
    #[arg(long, value_enum, default_value_t = Notation::Legacy)]
    sync_notation: Notation,
    /// Number of spaces per indentation level
    #[arg(long, default_value = "2")]
    indent: usize,
    /// Print the model to standard output instead of writing it to file
    #[arg(long, default_value = "false")]
    stdout: bool,
}

impl Cli {
    /// Builds the described model and serializes it.
    pub fn run(&self) -> anyhow::Result<()> {
        let description = description::load(&self.model)?;
        let nta = description.build()?;
        let config = XmlConfig {
            indent: self.indent,
            sync_notation: self.sync_notation.into(),
        };
        if self.stdout {
            print!("{}", nta_fmt_xml::render_with(&nta, &config)?);
        } else {
            let output = self
                .output
                .clone()
                .unwrap_or_else(|| self.model.with_extension(""));
            let path = nta_fmt_xml::write_with(&nta, &output, &config)?;
            info!("model '{}' written to '{}'", nta.name(), path.display());
            println!("{}", path.display());
        }
        Ok(())
    }
}
