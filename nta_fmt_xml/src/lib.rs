//! Serializer of networks of timed automata into UPPAAL's flat-system 1.1 XML format.
//!
//! The output is deterministic: declarations, templates, locations and transitions
//! appear exactly in the order they were added to the [`NtaBuilder`](nta_core::NtaBuilder).
//! Expressions are copied verbatim, except for guards,
//! where every `&&` is written as `&amp;&amp;`.
//!
//! ```
//! # use nta_core::NtaBuilder;
//! let mut builder = NtaBuilder::new("M");
//! let template = builder.new_template("T").expect("new template");
//! let location = builder.new_location(template, "S0").expect("new location");
//! builder.set_initial_location(template, location).expect("set initial location");
//! let nta = builder.build().expect("structurally complete");
//!
//! let xml = nta_fmt_xml::render(&nta).expect("render to memory");
//! assert!(xml.contains(r#"<location id="S0">"#));
//! assert!(xml.contains(r#"<init ref="S0"/>"#));
//! ```

mod render;

use log::info;
use nta_core::Nta;
use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
    string::FromUtf8Error,
};
use thiserror::Error;

pub use nta_core;

/// Extension appended to output paths.
pub const EXTENSION: &str = "xml";

/// The error type for rendering and writing XML documents.
#[derive(Debug, Error)]
pub enum XmlError {
    /// The XML writer failed.
    #[error("failed to render XML document")]
    Render(#[source] quick_xml::Error),
    /// The rendered document is not valid UTF-8.
    #[error("rendered XML document is not valid UTF-8")]
    Encoding(#[from] FromUtf8Error),
    /// The document could not be written to file.
    #[error("failed to write XML document to '{}'", .0.display())]
    Write(PathBuf, #[source] std::io::Error),
}

/// How the direction of a channel synchronisation is written after the channel name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncNotation {
    /// `chanSEND` / `chanRECEIVE`, as produced by earlier versions of the generator.
    #[default]
    Legacy,
    /// `chan!` / `chan?`, UPPAAL's own notation.
    Uppaal,
}

/// Options of the XML serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlConfig {
    /// Number of spaces per nesting level.
    pub indent: usize,
    /// Notation of synchronisation labels.
    pub sync_notation: SyncNotation,
}

impl Default for XmlConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            sync_notation: SyncNotation::default(),
        }
    }
}

/// Renders the network into an XML document with the default [`XmlConfig`].
pub fn render(nta: &Nta) -> Result<String, XmlError> {
    render_with(nta, &XmlConfig::default())
}

/// Renders the network into an XML document.
pub fn render_with(nta: &Nta, config: &XmlConfig) -> Result<String, XmlError> {
    info!(target: "serializer", "render model '{}'", nta.name());
    let buf = render::render(nta, config).map_err(XmlError::Render)?;
    Ok(String::from_utf8(buf)?)
}

/// Path of the document written by [`write`]: `path` with `.xml` appended.
pub fn output_path(path: &Path) -> PathBuf {
    let mut file = OsString::from(path.as_os_str());
    file.push(".");
    file.push(EXTENSION);
    PathBuf::from(file)
}

/// Renders the network and writes it to `path` with the `.xml` extension appended,
/// using the default [`XmlConfig`].
/// Returns the path of the written file.
pub fn write(nta: &Nta, path: &Path) -> Result<PathBuf, XmlError> {
    write_with(nta, path, &XmlConfig::default())
}

/// Renders the network and writes it to `path` with the `.xml` extension appended.
/// Returns the path of the written file.
///
/// The whole document is rendered in memory and written to a temporary file,
/// which then replaces the target: a failure never leaves a truncated document behind.
pub fn write_with(nta: &Nta, path: &Path, config: &XmlConfig) -> Result<PathBuf, XmlError> {
    let xml = render_with(nta, config)?;
    let target = output_path(path);
    let mut tmp = OsString::from(target.as_os_str());
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    if let Err(err) = fs::write(&tmp, xml.as_bytes()).and_then(|()| fs::rename(&tmp, &target)) {
        let _ = fs::remove_file(&tmp);
        return Err(XmlError::Write(target, err));
    }
    info!(target: "serializer", "model '{}' written to '{}'", nta.name(), target.display());
    Ok(target)
}
