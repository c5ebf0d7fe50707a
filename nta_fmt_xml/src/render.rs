use crate::{SyncNotation, XmlConfig};
use log::{debug, trace};
use nta_core::{Direction, Edge, Location, Nta, Synchronisation, Template, TimeKind};
use quick_xml::{Result, Writer};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

const DOCTYPE: &str = "nta PUBLIC '-//Uppaal Team//DTD Flat System 1.1//EN' \
    'http://www.it.uu.se/research/group/darts/uppaal/flat-1_1.dtd'";

const TAG_NTA: &str = "nta";
const TAG_DECLARATION: &str = "declaration";
const TAG_TEMPLATE: &str = "template";
const TAG_NAME: &str = "name";
const TAG_LOCATION: &str = "location";
const TAG_LABEL: &str = "label";
const TAG_COMMITTED: &str = "committed";
const TAG_URGENT: &str = "urgent";
const TAG_INIT: &str = "init";
const TAG_TRANSITION: &str = "transition";
const TAG_SOURCE: &str = "source";
const TAG_TARGET: &str = "target";
const TAG_SYSTEM: &str = "system";

const KIND_INVARIANT: &str = "invariant";
const KIND_GUARD: &str = "guard";
const KIND_SYNC: &str = "synchronisation";
const KIND_ASSIGNMENT: &str = "assignment";
const KIND_COMMENTS: &str = "comments";

const PROCESS_PREFIX: &str = "Process_";

// The only escaping applied to user text:
// guards are otherwise copied verbatim.
fn escape_guard(guard: &str) -> String {
    guard.replace("&&", "&amp;&amp;")
}

fn sync_label(sync: &Synchronisation, notation: SyncNotation) -> String {
    let tag = match (notation, sync.direction()) {
        (SyncNotation::Legacy, Direction::Send) => "SEND",
        (SyncNotation::Legacy, Direction::Receive) => "RECEIVE",
        (SyncNotation::Uppaal, Direction::Send) => "!",
        (SyncNotation::Uppaal, Direction::Receive) => "?",
    };
    format!("{}{tag}", sync.channel())
}

// Names are used verbatim as identifiers.
fn with_attr<'a>(tag: &'a str, key: &str, value: &str) -> BytesStart<'a> {
    BytesStart::from_content(format!("{tag} {key}=\"{value}\""), tag.len())
}

struct NtaWriter<'c> {
    writer: Writer<Vec<u8>>,
    config: &'c XmlConfig,
}

impl<'c> NtaWriter<'c> {
    fn new(config: &'c XmlConfig) -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', config.indent),
            config,
        }
    }

    fn start(&mut self, tag: BytesStart<'_>) -> Result<()> {
        self.writer.write_event(Event::Start(tag))?;
        Ok(())
    }

    fn end(&mut self, tag: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    fn empty(&mut self, tag: BytesStart<'_>) -> Result<()> {
        self.writer.write_event(Event::Empty(tag))?;
        Ok(())
    }

    // Writes an element containing text, which is expected to be already escaped.
    fn text_element(&mut self, tag: &str, start: BytesStart<'_>, text: &str) -> Result<()> {
        self.start(start)?;
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(text)))?;
        self.end(tag)
    }

    fn label(&mut self, kind: &str, text: &str) -> Result<()> {
        self.text_element(TAG_LABEL, with_attr(TAG_LABEL, "kind", kind), text)
    }

    fn declaration(&mut self, declarations: &[String]) -> Result<()> {
        self.text_element(
            TAG_DECLARATION,
            BytesStart::new(TAG_DECLARATION),
            &declarations.join("\n"),
        )
    }

    fn nta(&mut self, nta: &Nta) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.writer
            .write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))?;
        self.start(BytesStart::new(TAG_NTA))?;
        self.declaration(nta.declarations())?;
        for template in nta.templates() {
            self.template(template)?;
        }
        self.system(nta)?;
        self.end(TAG_NTA)
    }

    fn template(&mut self, template: &Template) -> Result<()> {
        debug!(
            target: "serializer",
            "render template '{}' with {} locations and {} transitions",
            template.name(),
            template.locations().len(),
            template.edges().len()
        );
        self.start(BytesStart::new(TAG_TEMPLATE))?;
        self.text_element(TAG_NAME, BytesStart::new(TAG_NAME), template.name())?;
        self.declaration(template.declarations())?;
        for location in template.locations() {
            self.location(location)?;
        }
        self.empty(with_attr(TAG_INIT, "ref", template.initial().name()))?;
        for edge in template.edges() {
            self.transition(template, edge)?;
        }
        self.end(TAG_TEMPLATE)
    }

    fn location(&mut self, location: &Location) -> Result<()> {
        trace!(target: "serializer", "render location '{}'", location.name());
        self.start(with_attr(TAG_LOCATION, "id", location.name()))?;
        self.text_element(TAG_NAME, BytesStart::new(TAG_NAME), location.name())?;
        if let Some(invariant) = location.invariant() {
            self.label(KIND_INVARIANT, invariant)?;
        }
        if let Some(comment) = location.comment() {
            self.label(KIND_COMMENTS, comment)?;
        }
        match location.kind() {
            TimeKind::Normal => {}
            TimeKind::Urgent => self.empty(BytesStart::new(TAG_URGENT))?,
            TimeKind::Committed => self.empty(BytesStart::new(TAG_COMMITTED))?,
        }
        self.end(TAG_LOCATION)
    }

    fn transition(&mut self, template: &Template, edge: &Edge) -> Result<()> {
        self.start(BytesStart::new(TAG_TRANSITION))?;
        self.empty(with_attr(TAG_SOURCE, "ref", template.source(edge).name()))?;
        self.empty(with_attr(TAG_TARGET, "ref", template.target(edge).name()))?;
        if let Some(guard) = edge.guard() {
            self.label(KIND_GUARD, &escape_guard(guard))?;
        }
        if let Some(sync) = edge.sync() {
            self.label(KIND_SYNC, &sync_label(sync, self.config.sync_notation))?;
        }
        if !edge.updates().is_empty() {
            self.label(KIND_ASSIGNMENT, &edge.updates().join(", "))?;
        }
        if let Some(comment) = edge.comment() {
            self.label(KIND_COMMENTS, comment)?;
        }
        self.end(TAG_TRANSITION)
    }

    fn system(&mut self, nta: &Nta) -> Result<()> {
        let mut lines = nta.system_declarations().to_vec();
        let processes = nta
            .templates()
            .iter()
            .map(|template| format!("{PROCESS_PREFIX}{}", template.name()))
            .collect::<Vec<_>>();
        for (template, process) in nta.templates().iter().zip(&processes) {
            lines.push(format!("{process} = {}();", template.name()));
        }
        lines.push(format!("system {};", processes.join(", ")));
        self.text_element(TAG_SYSTEM, BytesStart::new(TAG_SYSTEM), &lines.join("\n"))
    }
}

/// Renders the network into the bytes of an XML document.
pub(crate) fn render(nta: &Nta, config: &XmlConfig) -> Result<Vec<u8>> {
    let mut writer = NtaWriter::new(config);
    writer.nta(nta)?;
    Ok(writer.writer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_and_operator() {
        assert_eq!(escape_guard("x > 0 && y < 1"), "x > 0 &amp;&amp; y < 1");
        assert_eq!(escape_guard("a & b || c"), "a & b || c");
        assert_eq!(escape_guard("a &&& b"), "a &amp;&amp;& b");
    }

    #[test]
    fn sync_notation() {
        let send = Synchronisation::new("go", Direction::Send);
        let receive = Synchronisation::new("go", Direction::Receive);
        assert_eq!(sync_label(&send, SyncNotation::Legacy), "goSEND");
        assert_eq!(sync_label(&receive, SyncNotation::Legacy), "goRECEIVE");
        assert_eq!(sync_label(&send, SyncNotation::Uppaal), "go!");
        assert_eq!(sync_label(&receive, SyncNotation::Uppaal), "go?");
    }

    #[test]
    fn verbatim_attribute() -> Result<()> {
        let config = XmlConfig::default();
        let mut writer = NtaWriter::new(&config);
        writer.empty(with_attr(TAG_INIT, "ref", "A"))?;
        assert_eq!(writer.writer.into_inner(), br#"<init ref="A"/>"#);
        Ok(())
    }

    #[test]
    fn text_element_closing_tag() -> Result<()> {
        let config = XmlConfig::default();
        let mut writer = NtaWriter::new(&config);
        writer.label(KIND_GUARD, "x &lt; 1")?;
        assert_eq!(
            writer.writer.into_inner(),
            br#"<label kind="guard">x &lt; 1</label>"#
        );
        Ok(())
    }
}
