//! Implementation of the NTA data model.
//!
//! A _Network of Timed Automata_ is given by:
//!
//! - a list of _global declarations_, visible to every automaton;
//! - a list of _templates_, each one an automaton definition made of
//!   local declarations, _locations_ and _edges_ between them,
//!   with exactly one _initial location_;
//! - a list of _system declarations_, instantiating the templates into processes.
//!
//! Declarations, guards, invariants and updates are opaque strings
//! written in the model checker's own expression language:
//! they are never parsed, only carried along in insertion order.
//!
//! An NTA is represented by a [`Nta`] and defined through a [`NtaBuilder`],
//! by adding, one at a time, templates, locations and edges.
//! Then, the [`Nta`] is built from the [`NtaBuilder`],
//! which checks that the network is structurally complete.
//!
//! ```
//! # use nta_core::nta::{Direction, NtaBuilder};
//! // Create a new NTA builder
//! let mut builder = NtaBuilder::new("M");
//!
//! // Add a template with two locations
//! let template = builder.new_template("T").expect("no other template named T");
//! let idle = builder.new_location(template, "Idle").expect("template exists");
//! let busy = builder.new_location(template, "Busy").expect("template exists");
//! builder.set_initial_location(template, idle).expect("location belongs to template");
//!
//! // Connect the locations with a guarded, synchronised edge
//! let edge = builder.new_edge(template).expect("template exists");
//! builder.set_edge_source(edge, idle).expect("same template");
//! builder.set_edge_target(edge, busy).expect("same template");
//! builder.set_edge_guard(edge, "x > 0").expect("edge exists");
//! builder.set_edge_sync(edge, "go", Direction::Send).expect("edge exists");
//!
//! // Building cannot fail since every template has an initial location
//! // and every edge has both endpoints
//! let nta = builder.build().expect("structurally complete");
//! assert_eq!(nta.templates().len(), 1);
//! assert_eq!(nta.templates()[0].initial().name(), "Idle");
//! ```

mod builder;

pub use builder::*;
use std::fmt;
use thiserror::Error;

/// Name given to locations created with an empty name.
pub const PSEUDO_STATE: &str = "PseudoState";

/// An indexing object for templates in an NTA.
///
/// These cannot be directly created or manipulated,
/// but have to be generated and/or provided by a [`NtaBuilder`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TemplateId(usize);

/// An indexing object for locations in an NTA.
///
/// A location is always tied to the template that created it.
/// Ids are only meaningful for the [`NtaBuilder`] that issued them:
/// an id from another builder refers to whatever sits at the same position.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocationId(TemplateId, usize);

impl LocationId {
    /// The template owning the location.
    pub fn template(self) -> TemplateId {
        self.0
    }
}

/// An indexing object for edges in an NTA.
///
/// An edge is always tied to the template that created it.
/// Ids are only meaningful for the [`NtaBuilder`] that issued them.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgeId(TemplateId, usize);

impl EdgeId {
    /// The template owning the edge.
    pub fn template(self) -> TemplateId {
        self.0
    }
}

/// One of the two endpoints of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The location the edge leaves from.
    Source,
    /// The location the edge enters.
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Target => write!(f, "target"),
        }
    }
}

/// The error type for operations with [`NtaBuilder`]s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NtaError {
    /// There is no such template in the NTA.
    #[error("template {0:?} does not belong to this network")]
    MissingTemplate(TemplateId),
    /// There is no such location in the NTA.
    #[error("location {0:?} does not belong to this network")]
    MissingLocation(LocationId),
    /// There is no such edge in the NTA.
    #[error("edge {0:?} does not belong to this network")]
    MissingEdge(EdgeId),
    /// A template with the same name already exists.
    #[error("template `{0}` already exists")]
    DuplicateTemplate(String),
    /// A location with the same name (i.e., id) already exists in the template.
    #[error("location `{1}` already exists in template `{0}`")]
    DuplicateLocation(String, String),
    /// The location belongs to a different template.
    #[error("location {0:?} does not belong to template {1:?}")]
    LocationNotInTemplate(LocationId, TemplateId),
    /// An edge endpoint belongs to a different template than the edge.
    #[error("edge {0:?} cannot connect location {1:?} of another template")]
    DanglingEdgeEndpoint(EdgeId, LocationId),
    /// The template has no initial location.
    #[error("template `{0}` has no initial location")]
    MissingInitialLocation(String),
    /// An edge has been added without setting one of its endpoints.
    #[error("edge {1} of template `{0}` has no {2} location")]
    UnsetEdgeEndpoint(String, usize, Endpoint),
}

/// Time-related behaviour of a location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeKind {
    /// Time can elapse freely (subject to the invariant).
    #[default]
    Normal,
    /// Time cannot elapse while in the location.
    Urgent,
    /// Time cannot elapse and the next transition must leave a committed location.
    Committed,
}

/// Direction of a channel synchronisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Emits on the channel (`c!`).
    Send,
    /// Listens on the channel (`c?`).
    Receive,
}

impl Direction {
    /// [`Direction::Send`] if `is_send`, [`Direction::Receive`] otherwise.
    pub fn from_send(is_send: bool) -> Self {
        if is_send {
            Direction::Send
        } else {
            Direction::Receive
        }
    }
}

/// A channel synchronisation label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Synchronisation {
    channel: String,
    direction: Direction,
}

impl Synchronisation {
    /// Creates a synchronisation on the given channel.
    pub fn new(channel: impl Into<String>, direction: Direction) -> Self {
        Self {
            channel: channel.into(),
            direction,
        }
    }

    /// Name of the synchronising channel.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Whether the edge sends or receives on the channel.
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

/// A location (node) of a template.
///
/// Its name doubles as XML identifier, hence it is unique within its template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    name: String,
    invariant: Option<String>,
    comment: Option<String>,
    kind: TimeKind,
}

impl Location {
    fn new(name: String) -> Self {
        Self {
            name,
            invariant: None,
            comment: None,
            kind: TimeKind::Normal,
        }
    }

    /// The location's name, also used as its identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The location's invariant expression, if any.
    pub fn invariant(&self) -> Option<&str> {
        self.invariant.as_deref()
    }

    /// The location's free-text comment, if any.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// The location's time kind.
    pub fn kind(&self) -> TimeKind {
        self.kind
    }
}

/// An edge (transition) of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    source: usize,
    target: usize,
    guard: Option<String>,
    sync: Option<Synchronisation>,
    updates: Vec<String>,
    comment: Option<String>,
}

impl Edge {
    /// The guard expression, if any.
    pub fn guard(&self) -> Option<&str> {
        self.guard.as_deref()
    }

    /// The synchronisation label, if any.
    pub fn sync(&self) -> Option<&Synchronisation> {
        self.sync.as_ref()
    }

    /// The update expressions, in the order they were added.
    pub fn updates(&self) -> &[String] {
        &self.updates
    }

    /// The edge's free-text comment, if any.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// An automaton definition, built by a [`NtaBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    declarations: Vec<String>,
    locations: Vec<Location>,
    edges: Vec<Edge>,
    // Index of the initial location in `locations`
    initial: usize,
}

impl Template {
    /// The template's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local declarations, in insertion order.
    pub fn declarations(&self) -> &[String] {
        &self.declarations
    }

    /// Locations, in insertion order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Edges, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The initial location.
    pub fn initial(&self) -> &Location {
        // The builder only produces templates with a valid initial location
        &self.locations[self.initial]
    }

    /// The location the given edge leaves from.
    ///
    /// The edge is assumed to belong to this template.
    pub fn source(&self, edge: &Edge) -> &Location {
        &self.locations[edge.source]
    }

    /// The location the given edge enters.
    ///
    /// The edge is assumed to belong to this template.
    pub fn target(&self, edge: &Edge) -> &Location {
        &self.locations[edge.target]
    }
}

/// A structurally complete network of timed automata, built by a [`NtaBuilder`].
///
/// Its structure can no longer be altered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nta {
    name: String,
    declarations: Vec<String>,
    system_declarations: Vec<String>,
    templates: Vec<Template>,
}

impl Nta {
    /// The network's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Global declarations, in insertion order.
    pub fn declarations(&self) -> &[String] {
        &self.declarations
    }

    /// System declarations, in insertion order.
    pub fn system_declarations(&self) -> &[String] {
        &self.system_declarations
    }

    /// Templates, in creation order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }
}
