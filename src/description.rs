//! JSON description of a network of timed automata.
//!
//! A description lists templates with their locations and edges by name,
//! and is turned into an [`Nta`] by replaying it on an [`NtaBuilder`].
//!
//! ```json
//! {
//!   "name": "Lamp",
//!   "declarations": ["chan press;"],
//!   "templates": [{
//!     "name": "Lamp",
//!     "declarations": ["clock y;"],
//!     "locations": [{ "name": "Off" }, { "name": "Low", "invariant": "y <= 5" }],
//!     "initial": "Off",
//!     "edges": [{
//!       "source": "Off",
//!       "target": "Low",
//!       "sync": { "channel": "press", "direction": "receive" },
//!       "updates": ["y := 0"]
//!     }]
//!   }]
//! }
//! ```

use anyhow::{Context, anyhow};
use log::{debug, info};
use nta_core::{Direction, LocationId, Nta, NtaBuilder, PSEUDO_STATE, TemplateId};
use serde::Deserialize;
use std::{fs::File, path::Path};

/// A network of timed automata.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct NtaDescription {
    /// the network's name
    pub name: String,
    /// global declarations, in order
    #[serde(default)]
    pub declarations: Vec<String>,
    /// system declarations, in order
    #[serde(default)]
    pub system: Vec<String>,
    /// the network's templates, in order
    pub templates: Vec<TemplateDescription>,
}

/// An automaton template.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TemplateDescription {
    /// the template's name, unique among all templates
    pub name: String,
    /// local declarations, in order
    #[serde(default)]
    pub declarations: Vec<String>,
    /// the template's locations; at least one
    pub locations: Vec<LocationDescription>,
    /// name of the initial location
    pub initial: String,
    /// the edges connecting the locations
    #[serde(default)]
    pub edges: Vec<EdgeDescription>,
}

/// A location of a template.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LocationDescription {
    /// the location's name, unique among the locations of the template
    #[serde(default)]
    pub name: String,
    /// an optional invariant
    pub invariant: Option<String>,
    /// an optional comment
    pub comment: Option<String>,
    /// the location's time kind
    #[serde(default)]
    pub kind: LocationKind,
}

/// Time kind of a location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationKind {
    /// time can elapse
    #[default]
    Normal,
    /// time cannot elapse
    Urgent,
    /// time cannot elapse and the location must be left first
    Committed,
}

/// An edge between two locations of the same template.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct EdgeDescription {
    /// name of the source location
    pub source: String,
    /// name of the target location
    pub target: String,
    /// an optional guard
    pub guard: Option<String>,
    /// an optional synchronisation
    pub sync: Option<SyncDescription>,
    /// updates, in order
    #[serde(default)]
    pub updates: Vec<String>,
    /// an optional comment
    pub comment: Option<String>,
}

/// A channel synchronisation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SyncDescription {
    /// the channel's name
    pub channel: String,
    /// whether the edge sends or receives
    pub direction: SyncDirection,
}

/// Direction of a synchronisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncDirection {
    /// `c!`
    Send,
    /// `c?`
    Receive,
}

impl From<SyncDirection> for Direction {
    fn from(value: SyncDirection) -> Self {
        match value {
            SyncDirection::Send => Direction::Send,
            SyncDirection::Receive => Direction::Receive,
        }
    }
}

/// Parses a JSON network description from file.
pub fn load(path: &Path) -> anyhow::Result<NtaDescription> {
    info!(target: "description", "parsing model description '{}'", path.display());
    let reader = File::open(path)
        .with_context(|| format!("failed to create reader from file '{}'", path.display()))?;
    serde_json::de::from_reader(reader)
        .with_context(|| format!("failed to parse model description in '{}'", path.display()))
}

// Locations are referred to by the name they were given,
// so anonymous locations are referred to by the empty name as well.
fn location(
    builder: &NtaBuilder,
    template: TemplateId,
    name: &str,
) -> anyhow::Result<LocationId> {
    let id = if name.is_empty() { PSEUDO_STATE } else { name };
    builder
        .location_by_name(template, id)
        .ok_or_else(|| anyhow!("unknown location '{name}'"))
}

impl NtaDescription {
    /// Builds the described network.
    ///
    /// Fails if the description breaks any of the [`NtaBuilder`]'s rules,
    /// or refers to unknown locations.
    pub fn build(&self) -> anyhow::Result<Nta> {
        let mut builder = NtaBuilder::new(&self.name);
        self.declarations
            .iter()
            .for_each(|decl| builder.add_global_declaration(decl));
        self.system
            .iter()
            .for_each(|decl| builder.add_system_declaration(decl));
        for template in &self.templates {
            template
                .build(&mut builder)
                .with_context(|| format!("failed to build template '{}'", template.name))?;
        }
        Ok(builder.build()?)
    }
}

impl TemplateDescription {
    fn build(&self, builder: &mut NtaBuilder) -> anyhow::Result<()> {
        debug!(target: "description", "building template '{}'", self.name);
        let template = builder.new_template(&self.name)?;
        for decl in &self.declarations {
            builder.add_local_declaration(template, decl)?;
        }
        for loc in &self.locations {
            let id = builder.new_location(template, &loc.name)?;
            if let Some(ref invariant) = loc.invariant {
                builder.set_location_invariant(id, invariant)?;
            }
            if let Some(ref comment) = loc.comment {
                builder.set_location_comment(id, comment)?;
            }
            match loc.kind {
                LocationKind::Normal => {}
                LocationKind::Urgent => builder.set_location_urgent(id)?,
                LocationKind::Committed => builder.set_location_committed(id)?,
            }
        }
        let initial = location(builder, template, &self.initial)
            .context("failed to set initial location")?;
        builder.set_initial_location(template, initial)?;
        for (idx, edge) in self.edges.iter().enumerate() {
            edge.build(builder, template)
                .with_context(|| format!("failed to build edge {idx}"))?;
        }
        Ok(())
    }
}

impl EdgeDescription {
    fn build(&self, builder: &mut NtaBuilder, template: TemplateId) -> anyhow::Result<()> {
        let edge = builder.new_edge(template)?;
        let source = location(builder, template, &self.source)?;
        builder.set_edge_source(edge, source)?;
        let target = location(builder, template, &self.target)?;
        builder.set_edge_target(edge, target)?;
        if let Some(ref guard) = self.guard {
            builder.set_edge_guard(edge, guard)?;
        }
        if let Some(ref sync) = self.sync {
            builder.set_edge_sync(edge, &sync.channel, sync.direction.into())?;
        }
        for update in &self.updates {
            builder.add_edge_update(edge, update)?;
        }
        if let Some(ref comment) = self.comment {
            builder.set_edge_comment(edge, comment)?;
        }
        Ok(())
    }
}
