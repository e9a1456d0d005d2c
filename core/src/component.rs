// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component trees.
//!
//! A [`ComponentTree`] owns every component of one document in an arena;
//! components refer to their parent and children by [`ComponentId`]. The
//! root has no parent, every other component is attached. Components are
//! read through [`ComponentRef`] and changed through [`ComponentMut`].

mod attributes;

pub use crate::component::attributes::INVALID_VALUE;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use calmodel_ical::{ComponentKind, ErrorCode, FormatOptions, PropertyKind, RawComponent, Value};

use crate::attribution;
use crate::timezone::TimezoneProvider;
use crate::timezone::rules::tzid_of;
use crate::{IcsError, Property, PropertyMut, PropertyRef, Timezone};

const ANY: &str = "ANY";

/// Index of a component inside its [`ComponentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(usize);

impl ComponentId {
    /// The root of every tree.
    pub const ROOT: Self = Self(0);
}

#[derive(Debug)]
pub(crate) struct Node {
    kind: ComponentKind,
    pub(crate) properties: Vec<Property>,
    children: Vec<ComponentId>,
    parent: Option<ComponentId>,
    /// Timezones referenced by date-times below this node, by TZID
    referenced: Mutex<BTreeMap<String, Timezone>>,
    /// Handle built from a VTIMEZONE node
    tz_cache: OnceLock<Option<Timezone>>,
}

impl Node {
    const fn new(kind: ComponentKind, parent: Option<ComponentId>) -> Self {
        Self {
            kind,
            properties: Vec::new(),
            children: Vec::new(),
            parent,
            referenced: Mutex::new(BTreeMap::new()),
            tz_cache: OnceLock::new(),
        }
    }

    fn registry(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Timezone>> {
        self.referenced.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clone for Node {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            properties: self.properties.clone(),
            children: self.children.clone(),
            parent: self.parent,
            referenced: Mutex::new(self.registry().clone()),
            tz_cache: self.tz_cache.clone(),
        }
    }
}

/// An iCalendar document: a root component and everything below it.
///
/// Cloning yields an independent deep copy that shares only the timezone
/// provider.
#[derive(Clone)]
pub struct ComponentTree {
    nodes: Vec<Node>,
    provider: Option<Arc<dyn TimezoneProvider>>,
}

impl ComponentTree {
    /// A new root of a well-known kind.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for experimental and unknown kinds.
    pub fn new(kind: ComponentKind) -> Result<Self, IcsError> {
        if kind.is_registered() {
            Ok(Self::empty(kind))
        } else {
            Err(IcsError::invalid(format!("cannot create component `{kind}`")))
        }
    }

    pub(crate) fn empty(kind: ComponentKind) -> Self {
        Self {
            nodes: vec![Node::new(kind, None)],
            provider: None,
        }
    }

    /// Build a tree from a parsed codec component.
    #[must_use]
    pub fn from_raw(raw: &RawComponent, provider: Option<Arc<dyn TimezoneProvider>>) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            provider,
        };
        tree.load(raw);
        tree
    }

    /// Add `raw` and its descendants in pre-order.
    fn load(&mut self, raw: &RawComponent) {
        let mut pending: Vec<(&RawComponent, Option<ComponentId>)> = vec![(raw, None)];
        while let Some((raw, parent)) = pending.pop() {
            let id = ComponentId(self.nodes.len());
            let Ok(kind) = raw.name.parse::<ComponentKind>();
            let mut node = Node::new(kind, parent);
            node.properties = raw.properties.iter().map(Property::from_raw).collect();
            self.nodes.push(node);
            if let Some(parent) = parent {
                self.node_mut(parent).children.push(id);
            }
            pending.extend(raw.children.iter().rev().map(|child| (child, Some(id))));
        }
    }

    /// The provider consulted for TZIDs before the process-wide service.
    pub fn set_tz_provider(&mut self, provider: Option<Arc<dyn TimezoneProvider>>) {
        self.provider = provider;
    }

    #[must_use]
    pub fn root(&self) -> ComponentRef<'_> {
        ComponentRef::new(self, ComponentId::ROOT)
    }

    pub fn root_mut(&mut self) -> ComponentMut<'_> {
        ComponentMut::new(self, ComponentId::ROOT)
    }

    /// The component with that id, `None` if it belongs to no component of
    /// this tree.
    #[must_use]
    pub fn get(&self, id: ComponentId) -> Option<ComponentRef<'_>> {
        (id.0 < self.nodes.len()).then(|| ComponentRef::new(self, id))
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<ComponentMut<'_>> {
        if id.0 < self.nodes.len() {
            Some(ComponentMut::new(self, id))
        } else {
            None
        }
    }

    /// Number of components, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialize with the default format options, see
    /// [`ComponentTree::serialize_with`].
    ///
    /// # Errors
    /// [`IcsError::SerializationError`] if the codec fails.
    pub fn serialize(&mut self) -> Result<String, IcsError> {
        self.serialize_with(&FormatOptions::default())
    }

    /// Serialize the whole tree to iCalendar text.
    ///
    /// On a VCALENDAR root, every registered timezone with a definition is
    /// first added as a VTIMEZONE child, unless a VTIMEZONE with its TZID is
    /// already there. Serializing again adds nothing.
    ///
    /// # Errors
    /// [`IcsError::SerializationError`] if the codec fails.
    pub fn serialize_with(&mut self, options: &FormatOptions) -> Result<String, IcsError> {
        self.attach_timezone_definitions();
        let raw = self.to_raw(ComponentId::ROOT);
        options.write_to_string(&raw).map_err(serialization_error)
    }

    /// Serialize into an in-memory reader.
    ///
    /// # Errors
    /// [`IcsError::SerializationError`] if the codec fails.
    pub fn serialize_to_reader(&mut self) -> Result<io::Cursor<Vec<u8>>, IcsError> {
        self.serialize().map(|text| io::Cursor::new(text.into_bytes()))
    }

    fn attach_timezone_definitions(&mut self) {
        let root = self.root();
        if *root.kind() != ComponentKind::VCalendar {
            return;
        }

        let present: BTreeSet<String> = root
            .children()
            .filter(|c| *c.kind() == ComponentKind::VTimeZone)
            .filter_map(tzid_of)
            .collect();
        let missing: Vec<ComponentTree> = root
            .referenced_timezones()
            .into_iter()
            .filter(|tz| !present.contains(tz.id()))
            .filter_map(|tz| tz.definition().cloned())
            .collect();

        for definition in missing {
            tracing::debug!(tzid = ?tzid_of(definition.root()), "appending VTIMEZONE");
            self.root_mut().push_child(definition);
        }
    }

    fn to_raw(&self, id: ComponentId) -> RawComponent {
        let mut built: BTreeMap<ComponentId, RawComponent> = BTreeMap::new();
        for current in self.preorder(id).into_iter().rev() {
            let node = self.node(current);
            let raw = RawComponent {
                name: node.kind.name().to_owned(),
                properties: node.properties.iter().map(Property::to_raw).collect(),
                children: node.children.iter().filter_map(|c| built.remove(c)).collect(),
            };
            built.insert(current, raw);
        }
        built.remove(&id).unwrap_or_default()
    }

    /// `id` and everything below it, parents before children.
    fn preorder(&self, id: ComponentId) -> Vec<ComponentId> {
        let mut order = Vec::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            order.push(current);
            pending.extend(self.node(current).children.iter().rev().copied());
        }
        order
    }

    pub(crate) fn node(&self, id: ComponentId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: ComponentId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Drop cached VTIMEZONE handles of a changed node and its ancestors.
    pub(crate) fn touch(&mut self, id: ComponentId) {
        let mut next = Some(id);
        while let Some(id) = next {
            let node = self.node_mut(id);
            node.tz_cache = OnceLock::new();
            next = node.parent;
        }
    }

    /// Nearest VCALENDAR at or above `id`, `id` itself if there is none.
    pub(crate) fn enclosing_calendar(&self, id: ComponentId) -> ComponentId {
        let mut next = Some(id);
        while let Some(current) = next {
            let node = self.node(current);
            if node.kind == ComponentKind::VCalendar {
                return current;
            }
            next = node.parent;
        }
        id
    }

    pub(crate) fn register(&self, calendar: ComponentId, tz: &Timezone) {
        let mut registry = self.node(calendar).registry();
        if !registry.contains_key(tz.id()) {
            tracing::debug!(tzid = tz.id(), "registering timezone");
        }
        registry.insert(tz.id().to_owned(), tz.clone());
    }

    pub(crate) fn registered(&self, calendar: ComponentId, tzid: &str) -> Option<Timezone> {
        self.node(calendar).registry().get(tzid).cloned()
    }

    /// Timezones a subtree depends on: registered ones and the ones values
    /// were written with.
    fn subtree_timezones(&self, id: ComponentId, out: &mut Vec<Timezone>) {
        for current in self.preorder(id) {
            let node = self.node(current);
            out.extend(node.registry().values().cloned());
            out.extend(
                node.properties
                    .iter()
                    .filter_map(Property::embedded_timezone)
                    .filter(|tz| !tz.is_phantom())
                    .cloned(),
            );
        }
    }

    /// TZIDs the values of a subtree refer to.
    fn subtree_tzids(&self, id: ComponentId, out: &mut BTreeSet<String>) {
        for current in self.preorder(id) {
            for property in &self.node(current).properties {
                out.extend(property.embedded_timezone().map(|tz| tz.id().to_owned()));
                out.extend(property.tzid());
            }
        }
    }

    fn copy_subtree(&self, id: ComponentId) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            provider: self.provider.clone(),
        };
        self.copy_into(&mut tree, id);
        tree
    }

    /// Append copies of `id` and its descendants to `out`, `id` as its root.
    fn copy_into(&self, out: &mut Self, id: ComponentId) {
        let mut pending: Vec<(ComponentId, Option<ComponentId>)> = vec![(id, None)];
        while let Some((source, parent)) = pending.pop() {
            let node = self.node(source);
            let copy = ComponentId(out.nodes.len());
            out.nodes.push(Node {
                kind: node.kind.clone(),
                properties: node.properties.clone(),
                children: Vec::new(),
                parent,
                referenced: Mutex::new(node.registry().clone()),
                tz_cache: OnceLock::new(),
            });
            if let Some(parent) = parent {
                out.node_mut(parent).children.push(copy);
            }
            pending.extend(node.children.iter().rev().map(|child| (*child, Some(copy))));
        }
    }

    /// Move every node of `sub` into this arena, below `parent`.
    fn graft(&mut self, parent: ComponentId, sub: Self) -> ComponentId {
        let offset = self.nodes.len();
        let shift = |id: ComponentId| ComponentId(id.0 + offset);
        for mut node in sub.nodes {
            node.parent = Some(node.parent.map_or(parent, shift));
            node.children = node.children.into_iter().map(shift).collect();
            self.nodes.push(node);
        }

        let child = ComponentId(offset);
        self.node_mut(parent).children.push(child);
        self.touch(parent);
        child
    }
}

fn serialization_error(err: io::Error) -> IcsError {
    IcsError::SerializationError {
        code: ErrorCode::Internal,
        message: err.to_string(),
    }
}

impl fmt::Debug for ComponentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentTree")
            .field("nodes", &self.nodes)
            .field("provider", &self.provider.is_some())
            .finish()
    }
}

impl fmt::Display for ComponentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root(), f)
    }
}

enum KindFilter<K> {
    Any,
    Kind(K),
}

impl<K: PartialEq> KindFilter<K> {
    fn matches(&self, kind: &K) -> bool {
        match self {
            Self::Any => true,
            Self::Kind(k) => k == kind,
        }
    }
}

fn component_filter(name: &str) -> Result<KindFilter<ComponentKind>, IcsError> {
    if name.eq_ignore_ascii_case(ANY) {
        return Ok(KindFilter::Any);
    }
    let Ok(kind) = name.parse::<ComponentKind>();
    if kind.is_registered() {
        Ok(KindFilter::Kind(kind))
    } else {
        Err(IcsError::invalid(format!("cannot look up components of kind `{name}`")))
    }
}

/// Experimental kinds keep their literal name, so they match case-sensitively.
fn property_filter(name: &str) -> Result<KindFilter<PropertyKind>, IcsError> {
    if name.eq_ignore_ascii_case(ANY) {
        return Ok(KindFilter::Any);
    }
    match name.parse::<PropertyKind>() {
        Ok(PropertyKind::Unrecognized(_)) | Err(_) => Err(IcsError::invalid(format!(
            "cannot look up properties named `{name}`"
        ))),
        Ok(kind) => Ok(KindFilter::Kind(kind)),
    }
}

/// Shared view of one component.
#[derive(Debug, Clone, Copy)]
pub struct ComponentRef<'a> {
    tree: &'a ComponentTree,
    id: ComponentId,
}

impl<'a> ComponentRef<'a> {
    pub(crate) const fn new(tree: &'a ComponentTree, id: ComponentId) -> Self {
        Self { tree, id }
    }

    pub(crate) const fn tree(self) -> &'a ComponentTree {
        self.tree
    }

    fn node(self) -> &'a Node {
        self.tree.node(self.id)
    }

    #[must_use]
    pub const fn id(self) -> ComponentId {
        self.id
    }

    #[must_use]
    pub fn kind(self) -> &'a ComponentKind {
        &self.node().kind
    }

    /// The component name, e.g. `VEVENT`.
    #[must_use]
    pub fn component_type(self) -> &'a str {
        self.node().kind.name()
    }

    /// `None` for the root.
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        self.node().parent.map(|id| Self::new(self.tree, id))
    }

    pub fn children(self) -> impl Iterator<Item = Self> + use<'a> {
        let tree = self.tree;
        self.node().children.iter().map(move |id| Self::new(tree, *id))
    }

    /// Children of a kind in order, `ANY` for all of them.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for experimental and unknown kinds.
    pub fn subcomponents(self, kind: &str) -> Result<impl Iterator<Item = Self> + use<'a>, IcsError> {
        let filter = component_filter(kind)?;
        Ok(self.children().filter(move |c| filter.matches(c.kind())))
    }

    /// The first child of a kind.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for experimental and unknown kinds.
    pub fn first_subcomponent(self, kind: &str) -> Result<Option<Self>, IcsError> {
        Ok(self.subcomponents(kind)?.next())
    }

    /// Every property in order.
    pub fn all_properties(self) -> impl Iterator<Item = PropertyRef<'a>> + use<'a> {
        let (tree, id) = (self.tree, self.id);
        self.node().properties.iter().map(move |p| PropertyRef::new(tree, id, p))
    }

    /// Properties of a kind in order, `ANY` for all of them. Experimental
    /// properties match by their exact name.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for names that are neither registered
    /// nor experimental.
    pub fn properties(
        self,
        kind: &str,
    ) -> Result<impl Iterator<Item = PropertyRef<'a>> + use<'a>, IcsError> {
        let filter = property_filter(kind)?;
        Ok(self.all_properties().filter(move |p| filter.matches(p.kind())))
    }

    /// The first property of a kind.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for names that are neither registered
    /// nor experimental.
    pub fn first_property(self, kind: &str) -> Result<Option<PropertyRef<'a>>, IcsError> {
        Ok(self.properties(kind)?.next())
    }

    /// Property at an index of [`ComponentRef::all_properties`].
    #[must_use]
    pub fn property(self, index: usize) -> Option<PropertyRef<'a>> {
        let property = self.node().properties.get(index)?;
        Some(PropertyRef::new(self.tree, self.id, property))
    }

    #[must_use]
    pub fn property_count(self) -> usize {
        self.node().properties.len()
    }

    pub(crate) fn find(self, kind: &PropertyKind) -> Option<PropertyRef<'a>> {
        self.all_properties().find(|p| p.kind() == kind)
    }

    pub(crate) fn raw_properties(self) -> &'a [Property] {
        &self.node().properties
    }

    /// Timezones registered on this component, ordered by TZID.
    #[must_use]
    pub fn referenced_timezones(self) -> Vec<Timezone> {
        self.node().registry().values().cloned().collect()
    }

    /// Nearest VCALENDAR at or above this component, this component if
    /// there is none.
    #[must_use]
    pub fn enclosing_calendar(self) -> Self {
        Self::new(self.tree, self.tree.enclosing_calendar(self.id))
    }

    /// The provider of the tree, shared by all of its components.
    #[must_use]
    pub fn tz_provider(self) -> Option<&'a dyn TimezoneProvider> {
        self.tree.provider.as_deref()
    }

    /// Deep copy of this component as a new root.
    ///
    /// The copy also takes every timezone its values refer to that the
    /// enclosing calendar can resolve, read or not, so it resolves the same
    /// way on its own.
    #[must_use]
    pub fn to_tree(self) -> ComponentTree {
        let copy = self.tree.copy_subtree(self.id);
        let calendar = self.enclosing_calendar();
        if calendar.id() != self.id {
            let mut tzids = BTreeSet::new();
            self.tree.subtree_tzids(self.id, &mut tzids);
            for tzid in tzids {
                let found = attribution::lookup(&tzid, None, Some(calendar));
                if let Some(tz) = found.filter(|tz| !tz.is_phantom()) {
                    copy.register(ComponentId::ROOT, &tz);
                }
            }
        }
        copy
    }

    /// This component as iCalendar text, without adding VTIMEZONEs.
    ///
    /// # Errors
    /// [`IcsError::SerializationError`] if the codec fails.
    pub fn ical_string(self) -> Result<String, IcsError> {
        FormatOptions::default()
            .write_to_string(&self.tree.to_raw(self.id))
            .map_err(serialization_error)
    }

    /// Timezone handle defined by this VTIMEZONE, `None` for other kinds or
    /// definitions without TZID.
    ///
    /// The handle is built on first use from a copy of this component and
    /// cached until the component changes.
    #[must_use]
    pub fn vtimezone(self) -> Option<Timezone> {
        if *self.kind() != ComponentKind::VTimeZone {
            return None;
        }
        self.node()
            .tz_cache
            .get_or_init(|| {
                Timezone::from_definition(self.to_tree())
                    .inspect_err(|err| tracing::warn!(%err, "unusable VTIMEZONE"))
                    .ok()
            })
            .clone()
    }
}

impl fmt::Display for ComponentRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.ical_string().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Exclusive view of one component.
#[derive(Debug)]
pub struct ComponentMut<'a> {
    tree: &'a mut ComponentTree,
    id: ComponentId,
}

impl<'a> ComponentMut<'a> {
    pub(crate) const fn new(tree: &'a mut ComponentTree, id: ComponentId) -> Self {
        Self { tree, id }
    }

    #[must_use]
    pub fn as_ref(&self) -> ComponentRef<'_> {
        ComponentRef::new(self.tree, self.id)
    }

    #[must_use]
    pub const fn id(&self) -> ComponentId {
        self.id
    }

    /// A direct child.
    pub fn child_mut(&mut self, id: ComponentId) -> Option<ComponentMut<'_>> {
        let parent = self.tree.get(id)?.node().parent;
        if parent == Some(self.id) {
            Some(ComponentMut::new(self.tree, id))
        } else {
            None
        }
    }

    /// Move a tree in as the last child, returning the id of its root here.
    ///
    /// The timezones referenced in the child are registered on the enclosing
    /// calendar first.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] if one of them has an empty id, this
    /// component stays unchanged then.
    pub fn add_subcomponent(&mut self, child: ComponentTree) -> Result<ComponentId, IcsError> {
        let mut zones = Vec::new();
        child.subtree_timezones(ComponentId::ROOT, &mut zones);
        if zones.iter().any(|tz| tz.id().is_empty()) {
            return Err(IcsError::invalid("referenced timezone without id"));
        }

        let calendar = self.tree.enclosing_calendar(self.id);
        for tz in &zones {
            self.tree.register(calendar, tz);
        }
        Ok(self.tree.graft(self.id, child))
    }

    /// Add a deep copy of a component of another tree.
    ///
    /// # Errors
    /// See [`ComponentMut::add_subcomponent`].
    pub fn copy_subcomponent(&mut self, child: ComponentRef<'_>) -> Result<ComponentId, IcsError> {
        self.add_subcomponent(child.to_tree())
    }

    /// Move a property in as the last one, returning its index.
    ///
    /// The timezone of a date-time value gets registered on the enclosing
    /// calendar.
    ///
    /// # Errors
    /// Never for date-time values, kept for symmetry with other additions.
    pub fn add_property(&mut self, property: Property) -> Result<usize, IcsError> {
        let index = self.push_property(property);
        let this = self.as_ref();
        if let Some(added) = this.property(index) {
            if matches!(added.typed_value(), Some(Value::Date(_) | Value::DateTime(_))) {
                attribution::read(added.property(), Some(this))?;
            }
        }
        Ok(index)
    }

    /// Add a copy of a property of another component.
    ///
    /// # Errors
    /// See [`ComponentMut::add_property`].
    pub fn copy_property(&mut self, property: PropertyRef<'_>) -> Result<usize, IcsError> {
        self.add_property(property.to_property())
    }

    pub fn property_mut(&mut self, index: usize) -> Option<PropertyMut<'_>> {
        if index < self.tree.node(self.id).properties.len() {
            Some(PropertyMut::new(self.tree, self.id, index))
        } else {
            None
        }
    }

    /// The first property of a kind.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for names that are neither registered
    /// nor experimental.
    pub fn first_property_mut(&mut self, kind: &str) -> Result<Option<PropertyMut<'_>>, IcsError> {
        let filter = property_filter(kind)?;
        let index = self
            .tree
            .node(self.id)
            .properties
            .iter()
            .position(|p| filter.matches(p.kind()));
        match index {
            Some(index) => Ok(Some(PropertyMut::new(self.tree, self.id, index))),
            None => Ok(None),
        }
    }

    /// Remove every property of a kind, returning how many went.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for names that are neither registered
    /// nor experimental.
    pub fn clear_properties(&mut self, kind: &str) -> Result<usize, IcsError> {
        let filter = property_filter(kind)?;
        Ok(self.remove_where(|p| filter.matches(p.kind())))
    }

    pub(crate) fn remove_where(&mut self, mut f: impl FnMut(&Property) -> bool) -> usize {
        self.tree.touch(self.id);
        let properties = &mut self.tree.node_mut(self.id).properties;
        let before = properties.len();
        properties.retain(|p| !f(p));
        before - properties.len()
    }

    pub fn remove_property(&mut self, index: usize) -> Option<Property> {
        self.tree.touch(self.id);
        let properties = &mut self.tree.node_mut(self.id).properties;
        (index < properties.len()).then(|| properties.remove(index))
    }

    /// Register a timezone on the enclosing calendar, replacing one with the
    /// same id.
    ///
    /// # Errors
    /// [`IcsError::InvalidArgument`] for a timezone with an empty id.
    pub fn add_timezone_reference(&mut self, tz: &Timezone) -> Result<(), IcsError> {
        if tz.id().is_empty() {
            return Err(IcsError::invalid("timezone without id"));
        }
        let calendar = self.tree.enclosing_calendar(self.id);
        self.tree.register(calendar, tz);
        Ok(())
    }

    pub(crate) fn push_property(&mut self, property: Property) -> usize {
        self.tree.touch(self.id);
        let properties = &mut self.tree.node_mut(self.id).properties;
        properties.push(property);
        properties.len() - 1
    }

    pub(crate) fn push_child(&mut self, child: ComponentTree) -> ComponentId {
        self.tree.graft(self.id, child)
    }
}
