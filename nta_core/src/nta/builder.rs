use super::{
    Direction, Edge, EdgeId, Endpoint, Location, LocationId, Nta, NtaError, PSEUDO_STATE,
    Synchronisation, Template, TemplateId, TimeKind,
};
use hashbrown::HashMap;
use log::{debug, error, info, trace};

// Edges can be left incomplete while the network is being defined.
#[derive(Debug, Default, Clone)]
struct EdgeDef {
    source: Option<usize>,
    target: Option<usize>,
    guard: Option<String>,
    sync: Option<Synchronisation>,
    updates: Vec<String>,
    comment: Option<String>,
}

#[derive(Debug, Clone)]
struct TemplateDef {
    name: String,
    declarations: Vec<String>,
    locations: Vec<Location>,
    // Maps location names to their index in `locations`
    location_names: HashMap<String, usize>,
    edges: Vec<EdgeDef>,
    initial: Option<usize>,
}

impl TemplateDef {
    fn new(name: String) -> Self {
        Self {
            name,
            declarations: Vec::new(),
            locations: Vec::new(),
            location_names: HashMap::new(),
            edges: Vec::new(),
            initial: None,
        }
    }

    fn build(self) -> Result<Template, NtaError> {
        let initial = self.initial.ok_or_else(|| {
            error!(target: "builder", "template '{}' has no initial location", self.name);
            NtaError::MissingInitialLocation(self.name.clone())
        })?;
        let mut edges = Vec::with_capacity(self.edges.len());
        for (idx, edge) in self.edges.into_iter().enumerate() {
            let unset = |endpoint| NtaError::UnsetEdgeEndpoint(self.name.clone(), idx, endpoint);
            let source = edge.source.ok_or_else(|| unset(Endpoint::Source))?;
            let target = edge.target.ok_or_else(|| unset(Endpoint::Target))?;
            edges.push(Edge {
                source,
                target,
                guard: edge.guard,
                sync: edge.sync,
                updates: edge.updates,
                comment: edge.comment,
            });
        }
        Ok(Template {
            name: self.name,
            declarations: self.declarations,
            locations: self.locations,
            edges,
            initial,
        })
    }
}

/// Defines and builds an NTA.
///
/// The builder owns the network under construction:
/// independent networks are built by independent builders.
#[derive(Debug, Default, Clone)]
pub struct NtaBuilder {
    name: String,
    declarations: Vec<String>,
    system_declarations: Vec<String>,
    templates: Vec<TemplateDef>,
    template_names: HashMap<String, TemplateId>,
}

impl NtaBuilder {
    /// Creates a new [`NtaBuilder`] for a network with the given name.
    /// At creation, this has no declarations and no templates.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        info!(target: "builder", "create model '{name}'");
        Self {
            name,
            ..Default::default()
        }
    }

    /// Replaces the network under construction with a fresh, empty one with the given name.
    pub fn create_model(&mut self, name: impl Into<String>) {
        *self = Self::new(name);
    }

    /// Discards the network under construction and all accumulated state.
    pub fn reset(&mut self) {
        info!(target: "builder", "reset model '{}'", self.name);
        *self = Self::default();
    }

    /// The name of the network under construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn template(&self, template: TemplateId) -> Result<&TemplateDef, NtaError> {
        self.templates
            .get(template.0)
            .ok_or(NtaError::MissingTemplate(template))
    }

    fn template_mut(&mut self, template: TemplateId) -> Result<&mut TemplateDef, NtaError> {
        self.templates
            .get_mut(template.0)
            .ok_or(NtaError::MissingTemplate(template))
    }

    fn location_mut(&mut self, location: LocationId) -> Result<&mut Location, NtaError> {
        self.templates
            .get_mut(location.0.0)
            .and_then(|t| t.locations.get_mut(location.1))
            .ok_or(NtaError::MissingLocation(location))
    }

    fn edge(&self, edge: EdgeId) -> Result<&EdgeDef, NtaError> {
        self.templates
            .get(edge.0.0)
            .and_then(|t| t.edges.get(edge.1))
            .ok_or(NtaError::MissingEdge(edge))
    }

    fn edge_mut(&mut self, edge: EdgeId) -> Result<&mut EdgeDef, NtaError> {
        self.templates
            .get_mut(edge.0.0)
            .and_then(|t| t.edges.get_mut(edge.1))
            .ok_or(NtaError::MissingEdge(edge))
    }

    /// Appends a declaration to the global declarations of the network.
    pub fn add_global_declaration(&mut self, declaration: impl Into<String>) {
        self.declarations.push(declaration.into());
    }

    /// Appends a declaration to the system declarations of the network.
    pub fn add_system_declaration(&mut self, declaration: impl Into<String>) {
        self.system_declarations.push(declaration.into());
    }

    /// Adds a new template to the network.
    /// Templates are serialized in the order they are created.
    ///
    /// Fails if a template with the same name already exists,
    /// as template names generate the names of system processes.
    ///
    /// ```
    /// # use nta_core::nta::NtaBuilder;
    /// let mut builder = NtaBuilder::new("M");
    /// builder.new_template("T").expect("first template named T");
    /// builder.new_template("T").expect_err("template names are unique");
    /// ```
    pub fn new_template(&mut self, name: impl Into<String>) -> Result<TemplateId, NtaError> {
        let name = name.into();
        if self.template_names.contains_key(&name) {
            error!(target: "builder", "template '{name}' already exists");
            return Err(NtaError::DuplicateTemplate(name));
        }
        let template = TemplateId(self.templates.len());
        debug!(target: "builder", "create template '{name}'");
        self.template_names.insert(name.clone(), template);
        self.templates.push(TemplateDef::new(name));
        Ok(template)
    }

    /// Appends a declaration to the local declarations of the given template.
    ///
    /// It fails if the network contains no such template.
    pub fn add_local_declaration(
        &mut self,
        template: TemplateId,
        declaration: impl Into<String>,
    ) -> Result<(), NtaError> {
        self.template_mut(template)?
            .declarations
            .push(declaration.into());
        Ok(())
    }

    /// Adds a new location to the given template.
    /// An empty name is replaced by [`PSEUDO_STATE`].
    ///
    /// It fails if the network contains no such template,
    /// or if the template already has a location with the same name.
    ///
    /// ```
    /// # use nta_core::nta::{NtaBuilder, PSEUDO_STATE};
    /// let mut builder = NtaBuilder::new("M");
    /// let template = builder.new_template("T").expect("new template");
    /// builder.new_location(template, "").expect("first anonymous location");
    /// builder
    ///     .new_location(template, PSEUDO_STATE)
    ///     .expect_err("anonymous locations share the same name");
    /// ```
    pub fn new_location(
        &mut self,
        template: TemplateId,
        name: impl Into<String>,
    ) -> Result<LocationId, NtaError> {
        let mut name = name.into();
        if name.is_empty() {
            name = PSEUDO_STATE.to_string();
        }
        let tpl = self.template_mut(template)?;
        if tpl.location_names.contains_key(&name) {
            error!(target: "builder", "location '{name}' already exists in template '{}'", tpl.name);
            return Err(NtaError::DuplicateLocation(tpl.name.clone(), name));
        }
        let idx = tpl.locations.len();
        trace!(target: "builder", "create location '{name}' in template '{}'", tpl.name);
        tpl.location_names.insert(name.clone(), idx);
        tpl.locations.push(Location::new(name));
        Ok(LocationId(template, idx))
    }

    /// Looks up a location of the given template by its name.
    pub fn location_by_name(&self, template: TemplateId, name: &str) -> Option<LocationId> {
        self.templates
            .get(template.0)
            .and_then(|t| t.location_names.get(name))
            .map(|idx| LocationId(template, *idx))
    }

    /// Sets the initial location of the given template, replacing any previous one.
    ///
    /// It fails if the network contains no such template or location,
    /// or if the location belongs to another template.
    pub fn set_initial_location(
        &mut self,
        template: TemplateId,
        location: LocationId,
    ) -> Result<(), NtaError> {
        if location.0 != template {
            return Err(NtaError::LocationNotInTemplate(location, template));
        }
        let tpl = self.template_mut(template)?;
        if location.1 >= tpl.locations.len() {
            return Err(NtaError::MissingLocation(location));
        }
        tpl.initial = Some(location.1);
        Ok(())
    }

    /// Gets the initial location of the given template, if it has been set.
    ///
    /// It fails if the network contains no such template.
    pub fn initial_location(&self, template: TemplateId) -> Result<Option<LocationId>, NtaError> {
        Ok(self
            .template(template)?
            .initial
            .map(|idx| LocationId(template, idx)))
    }

    /// Makes the location committed.
    /// Committed and urgent are mutually exclusive: the last call wins.
    pub fn set_location_committed(&mut self, location: LocationId) -> Result<(), NtaError> {
        self.location_mut(location)?.kind = TimeKind::Committed;
        Ok(())
    }

    /// Makes the location urgent.
    /// Committed and urgent are mutually exclusive: the last call wins.
    pub fn set_location_urgent(&mut self, location: LocationId) -> Result<(), NtaError> {
        self.location_mut(location)?.kind = TimeKind::Urgent;
        Ok(())
    }

    /// Sets the location's invariant, replacing any previous one.
    pub fn set_location_invariant(
        &mut self,
        location: LocationId,
        invariant: impl Into<String>,
    ) -> Result<(), NtaError> {
        self.location_mut(location)?.invariant = Some(invariant.into());
        Ok(())
    }

    /// Sets the location's comment, replacing any previous one.
    pub fn set_location_comment(
        &mut self,
        location: LocationId,
        comment: impl Into<String>,
    ) -> Result<(), NtaError> {
        self.location_mut(location)?.comment = Some(comment.into());
        Ok(())
    }

    /// Adds a new edge, without endpoints nor labels, to the given template.
    ///
    /// It fails if the network contains no such template.
    pub fn new_edge(&mut self, template: TemplateId) -> Result<EdgeId, NtaError> {
        let tpl = self.template_mut(template)?;
        let idx = tpl.edges.len();
        tpl.edges.push(EdgeDef::default());
        Ok(EdgeId(template, idx))
    }

    // Checks that `location` exists in the template of `edge`.
    fn endpoint(&self, edge: EdgeId, location: LocationId) -> Result<usize, NtaError> {
        let _ = self.edge(edge)?;
        if location.0 != edge.0 {
            error!(target: "builder", "edge {edge:?} cannot connect location {location:?}");
            return Err(NtaError::DanglingEdgeEndpoint(edge, location));
        }
        if location.1 >= self.template(edge.0)?.locations.len() {
            return Err(NtaError::MissingLocation(location));
        }
        Ok(location.1)
    }

    /// Sets the location the edge leaves from.
    ///
    /// It fails if the network contains no such edge or location,
    /// or if the location belongs to a different template than the edge.
    ///
    /// ```
    /// # use nta_core::nta::{NtaBuilder, NtaError};
    /// let mut builder = NtaBuilder::new("M");
    /// let t1 = builder.new_template("T1").expect("new template");
    /// let t2 = builder.new_template("T2").expect("new template");
    /// let loc = builder.new_location(t2, "L").expect("new location");
    /// let edge = builder.new_edge(t1).expect("new edge");
    /// assert!(matches!(
    ///     builder.set_edge_source(edge, loc),
    ///     Err(NtaError::DanglingEdgeEndpoint(_, _))
    /// ));
    /// ```
    pub fn set_edge_source(&mut self, edge: EdgeId, location: LocationId) -> Result<(), NtaError> {
        let idx = self.endpoint(edge, location)?;
        self.edge_mut(edge)?.source = Some(idx);
        Ok(())
    }

    /// Sets the location the edge enters.
    ///
    /// It fails if the network contains no such edge or location,
    /// or if the location belongs to a different template than the edge.
    pub fn set_edge_target(&mut self, edge: EdgeId, location: LocationId) -> Result<(), NtaError> {
        let idx = self.endpoint(edge, location)?;
        self.edge_mut(edge)?.target = Some(idx);
        Ok(())
    }

    /// Gets the location the edge leaves from, if it has been set.
    pub fn edge_source(&self, edge: EdgeId) -> Result<Option<LocationId>, NtaError> {
        Ok(self.edge(edge)?.source.map(|idx| LocationId(edge.0, idx)))
    }

    /// Gets the location the edge enters, if it has been set.
    pub fn edge_target(&self, edge: EdgeId) -> Result<Option<LocationId>, NtaError> {
        Ok(self.edge(edge)?.target.map(|idx| LocationId(edge.0, idx)))
    }

    /// Appends an update expression to the edge.
    /// An edge can carry multiple updates, executed in insertion order.
    pub fn add_edge_update(
        &mut self,
        edge: EdgeId,
        update: impl Into<String>,
    ) -> Result<(), NtaError> {
        self.edge_mut(edge)?.updates.push(update.into());
        Ok(())
    }

    /// Sets the edge's synchronisation, replacing any previous one.
    pub fn set_edge_sync(
        &mut self,
        edge: EdgeId,
        channel: impl Into<String>,
        direction: Direction,
    ) -> Result<(), NtaError> {
        self.edge_mut(edge)?.sync = Some(Synchronisation::new(channel, direction));
        Ok(())
    }

    /// Sets the edge's guard, replacing any previous one.
    pub fn set_edge_guard(
        &mut self,
        edge: EdgeId,
        guard: impl Into<String>,
    ) -> Result<(), NtaError> {
        self.edge_mut(edge)?.guard = Some(guard.into());
        Ok(())
    }

    /// Gets the edge's guard, if it has been set.
    pub fn edge_guard(&self, edge: EdgeId) -> Result<Option<&str>, NtaError> {
        Ok(self.edge(edge)?.guard.as_deref())
    }

    /// Sets the edge's comment, replacing any previous one.
    pub fn set_edge_comment(
        &mut self,
        edge: EdgeId,
        comment: impl Into<String>,
    ) -> Result<(), NtaError> {
        self.edge_mut(edge)?.comment = Some(comment.into());
        Ok(())
    }

    /// Builds the [`Nta`] defined so far, leaving the builder untouched.
    ///
    /// See [`NtaBuilder::build`].
    pub fn snapshot(&self) -> Result<Nta, NtaError> {
        self.clone().build()
    }

    /// Produces the [`Nta`] defined by the [`NtaBuilder`]'s data, consuming it.
    ///
    /// Fails if a template has no initial location,
    /// or if an edge is missing its source or target.
    pub fn build(self) -> Result<Nta, NtaError> {
        let templates = self
            .templates
            .into_iter()
            .map(TemplateDef::build)
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            target: "builder",
            "build model '{}' with {} templates, {} locations, {} edges",
            self.name,
            templates.len(),
            templates.iter().map(|t| t.locations.len()).sum::<usize>(),
            templates.iter().map(|t| t.edges.len()).sum::<usize>(),
        );
        Ok(Nta {
            name: self.name,
            declarations: self.declarations,
            system_declarations: self.system_declarations,
            templates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_template() -> Result<(), NtaError> {
        let mut nta = NtaBuilder::new("M");
        let t1 = nta.new_template("T1")?;
        let t2 = nta.new_template("T2")?;
        assert_ne!(t1, t2);
        assert_eq!(
            nta.new_template("T1"),
            Err(NtaError::DuplicateTemplate("T1".to_string()))
        );
        Ok(())
    }

    #[test]
    fn new_location() -> Result<(), NtaError> {
        let mut nta = NtaBuilder::new("M");
        let t = nta.new_template("T")?;
        let a = nta.new_location(t, "A")?;
        let b = nta.new_location(t, "B")?;
        assert_ne!(a, b);
        assert_eq!(a.template(), t);
        assert_eq!(nta.location_by_name(t, "B"), Some(b));
        assert_eq!(
            nta.new_location(t, "A"),
            Err(NtaError::DuplicateLocation("T".to_string(), "A".to_string()))
        );
        Ok(())
    }

    #[test]
    fn same_location_name_in_different_templates() -> Result<(), NtaError> {
        let mut nta = NtaBuilder::new("M");
        let t1 = nta.new_template("T1")?;
        let t2 = nta.new_template("T2")?;
        nta.new_location(t1, "A")?;
        nta.new_location(t2, "A")?;
        Ok(())
    }

    #[test]
    fn anonymous_location() -> Result<(), NtaError> {
        let mut nta = NtaBuilder::new("M");
        let t = nta.new_template("T")?;
        let loc = nta.new_location(t, "")?;
        assert_eq!(nta.location_by_name(t, PSEUDO_STATE), Some(loc));
        assert_eq!(
            nta.new_location(t, ""),
            Err(NtaError::DuplicateLocation(
                "T".to_string(),
                PSEUDO_STATE.to_string()
            ))
        );
        Ok(())
    }

    #[test]
    fn missing_template() {
        let mut nta = NtaBuilder::new("M");
        let mut other = NtaBuilder::new("N");
        let t = other.new_template("T").expect("new template");
        assert_eq!(nta.new_location(t, "A"), Err(NtaError::MissingTemplate(t)));
        assert_eq!(nta.new_edge(t), Err(NtaError::MissingTemplate(t)));
        assert_eq!(
            nta.add_local_declaration(t, "int x;"),
            Err(NtaError::MissingTemplate(t))
        );
    }

    #[test]
    fn initial_location() -> Result<(), NtaError> {
        let mut nta = NtaBuilder::new("M");
        let t1 = nta.new_template("T1")?;
        let t2 = nta.new_template("T2")?;
        let a = nta.new_location(t1, "A")?;
        let b = nta.new_location(t1, "B")?;
        assert_eq!(nta.initial_location(t1)?, None);
        nta.set_initial_location(t1, a)?;
        nta.set_initial_location(t1, b)?;
        assert_eq!(nta.initial_location(t1)?, Some(b));
        assert_eq!(
            nta.set_initial_location(t2, a),
            Err(NtaError::LocationNotInTemplate(a, t2))
        );
        Ok(())
    }

    #[test]
    fn location_kind() -> Result<(), NtaError> {
        let mut nta = NtaBuilder::new("M");
        let t = nta.new_template("T")?;
        let a = nta.new_location(t, "A")?;
        let b = nta.new_location(t, "B")?;
        let c = nta.new_location(t, "C")?;
        nta.set_location_urgent(a)?;
        nta.set_location_committed(a)?;
        nta.set_location_urgent(b)?;
        nta.set_initial_location(t, c)?;
        let nta = nta.build()?;
        let locations = nta.templates()[0].locations();
        assert_eq!(locations[0].kind(), TimeKind::Committed);
        assert_eq!(locations[1].kind(), TimeKind::Urgent);
        assert_eq!(locations[2].kind(), TimeKind::Normal);
        Ok(())
    }

    #[test]
    fn location_labels() -> Result<(), NtaError> {
        let mut nta = NtaBuilder::new("M");
        let t = nta.new_template("T")?;
        let a = nta.new_location(t, "A")?;
        nta.set_location_invariant(a, "x <= 5")?;
        nta.set_location_comment(a, "first")?;
        nta.set_location_comment(a, "second")?;
        nta.set_initial_location(t, a)?;
        let nta = nta.build()?;
        let location = nta.templates()[0].initial();
        assert_eq!(location.invariant(), Some("x <= 5"));
        assert_eq!(location.comment(), Some("second"));
        Ok(())
    }

    #[test]
    fn edge_endpoints() -> Result<(), NtaError> {
        let mut nta = NtaBuilder::new("M");
        let t = nta.new_template("T")?;
        let a = nta.new_location(t, "A")?;
        let b = nta.new_location(t, "B")?;
        let e = nta.new_edge(t)?;
        assert_eq!(nta.edge_source(e)?, None);
        assert_eq!(nta.edge_target(e)?, None);
        nta.set_edge_source(e, a)?;
        nta.set_edge_target(e, b)?;
        assert_eq!(nta.edge_source(e)?, Some(a));
        assert_eq!(nta.edge_target(e)?, Some(b));
        Ok(())
    }

    #[test]
    fn dangling_edge_endpoint() -> Result<(), NtaError> {
        let mut nta = NtaBuilder::new("M");
        let t1 = nta.new_template("T1")?;
        let t2 = nta.new_template("T2")?;
        let a = nta.new_location(t2, "A")?;
        let e = nta.new_edge(t1)?;
        assert_eq!(
            nta.set_edge_target(e, a),
            Err(NtaError::DanglingEdgeEndpoint(e, a))
        );
        assert_eq!(nta.edge_target(e)?, None);
        Ok(())
    }

    #[test]
    fn missing_edge() {
        let mut nta = NtaBuilder::new("M");
        let t = nta.new_template("T").expect("new template");
        let a = nta.new_location(t, "A").expect("new location");
        let mut other = NtaBuilder::new("N");
        let other_t = other.new_template("T").expect("new template");
        let e = other.new_edge(other_t).expect("new edge");
        assert_eq!(nta.set_edge_source(e, a), Err(NtaError::MissingEdge(e)));
        assert_eq!(nta.set_edge_guard(e, "x > 0"), Err(NtaError::MissingEdge(e)));
        assert_eq!(nta.edge_guard(e), Err(NtaError::MissingEdge(e)));
        assert_eq!(nta.edge_source(e), Err(NtaError::MissingEdge(e)));
    }

    #[test]
    fn foreign_location() -> Result<(), NtaError> {
        let mut other = NtaBuilder::new("N");
        let other_t = other.new_template("T")?;
        let _ = other.new_location(other_t, "A")?;
        let b = other.new_location(other_t, "B")?;
        let mut nta = NtaBuilder::new("M");
        let t = nta.new_template("T")?;
        let a = nta.new_location(t, "A")?;
        let e = nta.new_edge(t)?;
        assert_eq!(
            nta.set_initial_location(t, b),
            Err(NtaError::MissingLocation(b))
        );
        assert_eq!(nta.set_edge_source(e, b), Err(NtaError::MissingLocation(b)));
        assert_eq!(nta.initial_location(t)?, None);
        assert_eq!(nta.edge_source(e)?, None);
        nta.set_edge_source(e, a)?;
        Ok(())
    }

    #[test]
    fn edge_labels() -> Result<(), NtaError> {
        let mut nta = NtaBuilder::new("M");
        let t = nta.new_template("T")?;
        let a = nta.new_location(t, "A")?;
        nta.set_initial_location(t, a)?;
        let e = nta.new_edge(t)?;
        nta.set_edge_source(e, a)?;
        nta.set_edge_target(e, a)?;
        assert_eq!(nta.edge_guard(e)?, None);
        nta.set_edge_guard(e, "x > 0")?;
        nta.set_edge_guard(e, "x > 1")?;
        assert_eq!(nta.edge_guard(e)?, Some("x > 1"));
        nta.set_edge_sync(e, "a", Direction::Send)?;
        nta.set_edge_sync(e, "b", Direction::from_send(false))?;
        nta.add_edge_update(e, "x := 1")?;
        nta.add_edge_update(e, "y := 2")?;
        nta.set_edge_comment(e, "first")?;
        nta.set_edge_comment(e, "loop")?;
        let nta = nta.build()?;
        let template = &nta.templates()[0];
        let edge = &template.edges()[0];
        assert_eq!(template.source(edge).name(), "A");
        assert_eq!(template.target(edge).name(), "A");
        assert_eq!(edge.guard(), Some("x > 1"));
        assert_eq!(
            edge.sync(),
            Some(&Synchronisation::new("b", Direction::Receive))
        );
        assert_eq!(edge.updates(), ["x := 1", "y := 2"]);
        assert_eq!(edge.comment(), Some("loop"));
        Ok(())
    }

    #[test]
    fn build_missing_initial_location() -> Result<(), NtaError> {
        let mut nta = NtaBuilder::new("M");
        let t = nta.new_template("T")?;
        nta.new_location(t, "A")?;
        assert_eq!(
            nta.build(),
            Err(NtaError::MissingInitialLocation("T".to_string()))
        );
        Ok(())
    }

    #[test]
    fn build_unset_edge_endpoint() -> Result<(), NtaError> {
        let mut nta = NtaBuilder::new("M");
        let t = nta.new_template("T")?;
        let a = nta.new_location(t, "A")?;
        nta.set_initial_location(t, a)?;
        let e = nta.new_edge(t)?;
        nta.set_edge_source(e, a)?;
        assert_eq!(
            nta.snapshot(),
            Err(NtaError::UnsetEdgeEndpoint(
                "T".to_string(),
                0,
                Endpoint::Target
            ))
        );
        nta.set_edge_target(e, a)?;
        nta.snapshot()?;
        Ok(())
    }

    #[test]
    fn declarations_keep_order() -> Result<(), NtaError> {
        let mut nta = NtaBuilder::new("M");
        nta.add_global_declaration("const int N = 3;");
        nta.add_global_declaration("int a[N];");
        nta.add_system_declaration("const int K = 1;");
        let t = nta.new_template("T")?;
        nta.add_local_declaration(t, "clock x;")?;
        nta.add_local_declaration(t, "clock x;")?;
        let a = nta.new_location(t, "A")?;
        nta.set_initial_location(t, a)?;
        let nta = nta.build()?;
        assert_eq!(nta.declarations(), ["const int N = 3;", "int a[N];"]);
        assert_eq!(nta.system_declarations(), ["const int K = 1;"]);
        assert_eq!(nta.templates()[0].declarations(), ["clock x;", "clock x;"]);
        Ok(())
    }

    #[test]
    fn reset() -> Result<(), NtaError> {
        let mut nta = NtaBuilder::new("M");
        nta.add_global_declaration("int x;");
        let t = nta.new_template("T")?;
        nta.new_location(t, "A")?;
        nta.reset();
        assert_eq!(nta.name(), "");
        let nta = nta.build()?;
        assert!(nta.declarations().is_empty());
        assert!(nta.templates().is_empty());
        Ok(())
    }

    #[test]
    fn create_model() -> Result<(), NtaError> {
        let mut nta = NtaBuilder::new("M");
        nta.new_template("T")?;
        nta.create_model("N");
        assert_eq!(nta.name(), "N");
        // The previous template is gone, so its name is available again
        let t = nta.new_template("T")?;
        let a = nta.new_location(t, "A")?;
        nta.set_initial_location(t, a)?;
        let nta = nta.build()?;
        assert_eq!(nta.name(), "N");
        assert_eq!(nta.templates().len(), 1);
        Ok(())
    }
}
