//! Catalog: the course set plus its resolved prerequisite graph.
//!
//! Courses are stored as nodes of a petgraph `StableGraph`. Every resolvable
//! prerequisite reference becomes a [`Requires`] edge pointing from the
//! dependent course to the prerequisite course. References to IDs that are
//! not in the catalog are kept on the [`Course`] but produce no edge; the
//! placement engine treats them as unresolvable and ignores them.
//!
//! The catalog does not reject prerequisite cycles. Only direct
//! self-reference is rejected, since no traversal could ever satisfy it.

use indexmap::IndexMap;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};

use crate::course::Course;
use crate::error::CoreError;
use crate::id::CourseId;

/// Edge weight: dependent course requires the target course.
///
/// `order` is the position of the prerequisite in the dependent's authored
/// list, so traversals can visit prerequisites in a stable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requires {
    pub order: usize,
}

/// The read-only course catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    graph: StableGraph<Course, Requires, Directed, u32>,
    /// Catalog order is preserved for listings.
    index: IndexMap<CourseId, NodeIndex<u32>>,
}

impl Catalog {
    /// Builds a catalog from a list of courses.
    ///
    /// Returns [`CoreError::DuplicateCatalogEntry`] when two courses share an
    /// ID and [`CoreError::SelfPrerequisite`] when a course requires itself.
    pub fn from_courses<I>(courses: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = Course>,
    {
        let mut graph = StableGraph::<Course, Requires, Directed, u32>::new();
        let mut index = IndexMap::new();

        for course in courses {
            if course.prerequisites.contains(&course.id) {
                return Err(CoreError::SelfPrerequisite { id: course.id });
            }
            if index.contains_key(&course.id) {
                return Err(CoreError::DuplicateCatalogEntry { id: course.id });
            }
            let id = course.id.clone();
            let idx = graph.add_node(course);
            index.insert(id, idx);
        }

        // Second pass: resolve prerequisite references into edges.
        let nodes: Vec<NodeIndex<u32>> = index.values().copied().collect();
        for from in nodes {
            let prerequisites = graph[from].prerequisites.clone();
            let mut seen = Vec::with_capacity(prerequisites.len());
            for (order, prereq) in prerequisites.iter().enumerate() {
                let Some(&to) = index.get(prereq) else {
                    continue;
                };
                if seen.contains(&to) {
                    continue;
                }
                seen.push(to);
                graph.add_edge(from, to, Requires { order });
            }
        }

        Ok(Catalog { graph, index })
    }

    /// Number of courses in the catalog.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of resolved prerequisite edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: &CourseId) -> bool {
        self.index.contains_key(id)
    }

    /// Looks up a course by ID.
    pub fn get(&self, id: &CourseId) -> Option<&Course> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    /// Looks up a course by ID, failing with [`CoreError::UnknownCourse`].
    pub fn require(&self, id: &CourseId) -> Result<&Course, CoreError> {
        self.get(id)
            .ok_or_else(|| CoreError::UnknownCourse { id: id.clone() })
    }

    /// Iterates all courses in catalog order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.index.values().map(move |&idx| &self.graph[idx])
    }

    /// Resolved direct prerequisites of `id`, in authored order.
    ///
    /// Prerequisite IDs missing from the catalog are skipped. Returns an
    /// empty list for an unknown `id`.
    pub fn prerequisites(&self, id: &CourseId) -> Vec<&Course> {
        let Some(&idx) = self.index.get(id) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.weight().order, e.target()))
            .collect();
        edges.sort_by_key(|(order, _)| *order);
        edges.into_iter().map(|(_, t)| &self.graph[t]).collect()
    }

    /// Courses that list `id` as a direct prerequisite, in catalog order.
    pub fn dependents(&self, id: &CourseId) -> Vec<&Course> {
        let Some(&idx) = self.index.get(id) else {
            return Vec::new();
        };
        let mut sources: Vec<NodeIndex<u32>> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| e.source())
            .collect();
        sources.sort_by_key(|s| self.index.get_index_of(&self.graph[*s].id));
        sources.into_iter().map(|s| &self.graph[s]).collect()
    }
}
