//! Scene structure: the node tree the layout engine works on.
//!
//! The editor stores elements flat. This module turns a [`Scene`] into a
//! [`SceneTree`]:
//!
//! - top-level [`Node`]s in document order, where elements sharing a group id
//!   are nested into [`Group`] nodes (outermost group first);
//! - a [`FrameIndex`] holding the elements that sit inside each frame, keyed
//!   by the frame's id. Frames do not own their elements; the index is the
//!   only link from a frame to its content.
//!
//! Validation of element geometry happens here, before any layout code runs,
//! so the layout functions can stay total.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::{debug, trace, warn};

use tessel_core::{
    geometry::Bounds,
    identifier::Id,
    scene::{Element, ElementKind, Scene},
};

use crate::{config::ElementOrder, config::LayoutConfig, error::TesselError, layout};

/// A positioned entry of the tree: a single element or a group of nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Group(Group),
}

impl Node {
    /// Returns the id of the element or group.
    pub fn id(&self) -> Id {
        match self {
            Self::Element(element) => element.id(),
            Self::Group(group) => group.id(),
        }
    }

    /// Returns the node's bounding box. Groups are measured from their
    /// descendants on every call.
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Element(element) => element.bounds(),
            Self::Group(group) => layout::compute_bounding_box_for_group(group),
        }
    }
}

/// An ordered collection of nodes sharing a group id.
///
/// A group has no geometry of its own; its extent is always the union of its
/// children's bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    id: Id,
    children: Vec<Node>,
}

impl Group {
    pub fn new(id: Id, children: Vec<Node>) -> Self {
        Self { id, children }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Children in input order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// Elements placed inside frames, keyed by frame id in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameIndex {
    frames: IndexMap<Id, Vec<Element>>,
}

impl FrameIndex {
    /// Returns the elements inside the frame, in input order.
    pub fn elements(&self, frame_id: Id) -> &[Element] {
        self.frames
            .get(&frame_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the bounding box of the frame's content.
    ///
    /// Yields [`Bounds::EMPTY`] for frames without content.
    pub fn bounding_box(&self, frame_id: Id) -> Bounds {
        layout::compute_frame_bounding_box(frame_id, self.elements(frame_id))
    }

    /// Number of frames that hold at least one element.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    fn insert(&mut self, frame_id: Id, element: Element) {
        self.frames.entry(frame_id).or_default().push(element);
    }
}

/// A scene converted into top-level nodes plus frame content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneTree {
    nodes: Vec<Node>,
    frames: FrameIndex,
    order: ElementOrder,
}

impl SceneTree {
    /// Builds the tree for a scene.
    ///
    /// Deleted elements and element kinds that cannot be expressed are
    /// skipped. An element whose `frameId` names no frame in the scene stays
    /// at the top level.
    ///
    /// # Errors
    ///
    /// Returns [`TesselError::Scene`] if a live element has a non-finite
    /// position, a negative or non-finite size, or an id already used by
    /// another element.
    pub fn from_scene(scene: &Scene, config: &LayoutConfig) -> Result<Self, TesselError> {
        let live = live_elements(scene)?;

        let frame_ids: HashSet<Id> = live
            .iter()
            .filter(|element| element.kind() == ElementKind::Frame)
            .map(|element| element.id())
            .collect();
        let cyclic = cyclic_frames(&live, &frame_ids);

        let mut frames = FrameIndex::default();
        let mut top_level = Vec::new();
        for element in live {
            match element.frame_id() {
                Some(frame_id) if cyclic.contains(&element.id()) => {
                    warn!(
                        element_id:% = element.id(),
                        frame_id:%;
                        "Frame is nested inside itself, keeping it at the top level"
                    );
                    top_level.push(element);
                }
                Some(frame_id) if frame_ids.contains(&frame_id) => {
                    frames.insert(frame_id, element.clone());
                }
                Some(frame_id) => {
                    warn!(
                        element_id:% = element.id(),
                        frame_id:%;
                        "Element references a missing frame, keeping it at the top level"
                    );
                    top_level.push(element);
                }
                None => top_level.push(element),
            }
        }

        let nodes = build_nodes(top_level, 0, config.order());
        debug!(
            nodes_count = nodes.len(),
            frames_count = frames.len();
            "Scene tree built"
        );

        Ok(Self {
            nodes,
            frames,
            order: config.order(),
        })
    }

    /// Top-level nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn frames(&self) -> &FrameIndex {
        &self.frames
    }

    /// Returns the content of a frame as element nodes, ordered the same way
    /// as top-level nodes. Group membership is ignored inside frames.
    pub fn frame_nodes(&self, frame_id: Id) -> Vec<Node> {
        let mut nodes: Vec<Node> = self
            .frames
            .elements(frame_id)
            .iter()
            .cloned()
            .map(Node::Element)
            .collect();
        sort_nodes(&mut nodes, self.order);
        nodes
    }
}

/// Frames whose chain of parent frames leads back to themselves.
fn cyclic_frames(live: &[&Element], frame_ids: &HashSet<Id>) -> HashSet<Id> {
    let parents: HashMap<Id, Id> = live
        .iter()
        .filter(|element| element.kind() == ElementKind::Frame)
        .filter_map(|element| {
            let parent = element.frame_id().filter(|parent| frame_ids.contains(parent))?;
            Some((element.id(), parent))
        })
        .collect();

    parents
        .keys()
        .copied()
        .filter(|&frame_id| {
            let mut visited = HashSet::new();
            let mut current = parents.get(&frame_id).copied();
            while let Some(parent) = current {
                if parent == frame_id {
                    return true;
                }
                if !visited.insert(parent) {
                    return false;
                }
                current = parents.get(&parent).copied();
            }
            false
        })
        .collect()
}

/// Filters out deleted and unsupported elements and validates the rest.
fn live_elements(scene: &Scene) -> Result<Vec<&Element>, TesselError> {
    let mut seen = HashSet::new();
    let mut live = Vec::with_capacity(scene.elements().len());

    for element in scene.elements() {
        if element.is_deleted() {
            trace!(element_id:% = element.id(); "Skipping deleted element");
            continue;
        }
        if element.kind() == ElementKind::Unsupported {
            debug!(element_id:% = element.id(); "Skipping unsupported element kind");
            continue;
        }
        if !element.position().is_finite() || !element.size().is_valid() {
            return Err(TesselError::Scene(format!(
                "element `{}` has invalid geometry: position {:?}, size {:?}",
                element.id(),
                element.position(),
                element.size()
            )));
        }
        if !seen.insert(element.id()) {
            return Err(TesselError::Scene(format!(
                "element id `{}` is used more than once",
                element.id()
            )));
        }
        live.push(element);
    }

    Ok(live)
}

/// Returns the group an element belongs to at the given nesting depth,
/// counting from the outermost group.
fn group_at_depth(element: &Element, depth: usize) -> Option<Id> {
    let group_ids = element.group_ids();
    group_ids
        .len()
        .checked_sub(depth + 1)
        .map(|index| group_ids[index])
}

/// Nests elements into groups. Each group takes the position of its first
/// member among its siblings.
fn build_nodes(elements: Vec<&Element>, depth: usize, order: ElementOrder) -> Vec<Node> {
    enum Slot<'a> {
        Element(&'a Element),
        Group(Id),
    }

    let mut slots = Vec::with_capacity(elements.len());
    let mut groups: IndexMap<Id, Vec<&Element>> = IndexMap::new();

    for element in elements {
        match group_at_depth(element, depth) {
            Some(group_id) => groups
                .entry(group_id)
                .or_insert_with(|| {
                    slots.push(Slot::Group(group_id));
                    Vec::new()
                })
                .push(element),
            None => slots.push(Slot::Element(element)),
        }
    }

    let mut nodes: Vec<Node> = slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Element(element) => Node::Element(element.clone()),
            Slot::Group(group_id) => {
                let members = groups.swap_remove(&group_id).unwrap_or_default();
                Node::Group(Group::new(group_id, build_nodes(members, depth + 1, order)))
            }
        })
        .collect();

    sort_nodes(&mut nodes, order);
    nodes
}

fn sort_nodes(nodes: &mut [Node], order: ElementOrder) {
    match order {
        ElementOrder::Document => {}
        ElementOrder::TopToBottom => nodes.sort_by(|a, b| {
            let (a, b) = (a.bounds(), b.bounds());
            a.min_y()
                .total_cmp(&b.min_y())
                .then(a.min_x().total_cmp(&b.min_x()))
        }),
    }
}
