#![deny(missing_docs)]

//! # Resolver Module
//!
//! Turns a `$ref` pointer into a concrete schema without unbounded recursion.
//!
//! Handles:
//! - Bare reference chains (`A -> B -> C`).
//! - Cycle detection against the active resolution path.
//! - Depth bounding of every resolution step.
//! - Simplification of object properties and array items that are themselves references.
//!
//! Resolution is total: every failure degrades to a sentinel string schema and a
//! [`Diagnostic`], never an error.
//!
//! Nothing is cached: each non-cyclic reference is expanded in full for every
//! path that reaches it, since the cycle sentinels depend on the path. A
//! dictionary where every schema references every other one grows factorially
//! in its size, so dense schema graphs are best converted with a lower depth bound.

use crate::oas::dictionary::SchemaDictionary;
use crate::oas::registry::CircularRegistry;
use crate::oas::schema::SchemaNode;
use tracing::{debug, error, info};

/// Maximum resolution (and generation) depth used unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// What went wrong while resolving a single pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The depth bound was reached before the pointer could be expanded.
    DepthExceeded {
        /// Pointer left unexpanded.
        pointer: String,
    },
    /// The pointer was already open on the active resolution path.
    Circular {
        /// Pointer that closed the cycle.
        pointer: String,
    },
    /// The pointer could not be mapped onto a dictionary entry.
    Unresolved {
        /// Offending pointer.
        pointer: String,
        /// Human readable cause.
        reason: String,
    },
}

/// The outcome of one resolution: always a usable schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Concrete schema, or a sentinel when resolution degraded.
    pub schema: SchemaNode,
    /// Set when `schema` is a sentinel.
    pub diagnostic: Option<Diagnostic>,
}

impl Resolution {
    fn resolved(schema: SchemaNode) -> Self {
        Self {
            schema,
            diagnostic: None,
        }
    }

    fn degraded(diagnostic: Diagnostic) -> Self {
        let message = match &diagnostic {
            Diagnostic::DepthExceeded { pointer } => depth_exceeded_message(pointer),
            Diagnostic::Circular { pointer } => circular_message(pointer),
            Diagnostic::Unresolved { pointer, .. } => format!("[Unresolved reference: {}]", pointer),
        };
        Self {
            schema: SchemaNode::sentinel(message),
            diagnostic: Some(diagnostic),
        }
    }
}

/// Sentinel text for a pointer that closed a cycle.
pub fn circular_message(pointer: &str) -> String {
    format!("[Circular reference to: {}]", pointer)
}

/// Sentinel text for a pointer cut off by the depth bound.
pub fn depth_exceeded_message(pointer: &str) -> String {
    format!("[Max depth exceeded: {}]", pointer)
}

/// Resolves pointers against one [`SchemaDictionary`].
#[derive(Debug, Clone)]
pub struct ReferenceResolver {
    dictionary: SchemaDictionary,
    max_depth: usize,
}

impl ReferenceResolver {
    /// Creates a resolver with [`DEFAULT_MAX_DEPTH`].
    pub fn new(dictionary: SchemaDictionary) -> Self {
        Self {
            dictionary,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Overrides the depth bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The configured depth bound.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Starts a fresh top-level resolution (depth 0, empty path).
    pub fn resolve_root(&self, pointer: &str, registry: &mut CircularRegistry) -> Resolution {
        self.resolve(pointer, 0, &[], registry)
    }

    /// Resolves `pointer` at `depth` with `path` holding the pointers currently being expanded.
    ///
    /// Cycles are recorded in `registry`.
    pub fn resolve(
        &self,
        pointer: &str,
        depth: usize,
        path: &[String],
        registry: &mut CircularRegistry,
    ) -> Resolution {
        if depth >= self.max_depth {
            debug!(pointer, depth, "Reference depth bound reached");
            return Resolution::degraded(Diagnostic::DepthExceeded {
                pointer: pointer.to_string(),
            });
        }

        if path.iter().any(|open| open == pointer) {
            note_cycle(pointer, registry);
            return Resolution::degraded(Diagnostic::Circular {
                pointer: pointer.to_string(),
            });
        }

        let target = match self.dictionary.lookup(pointer) {
            Ok(target) => target,
            Err(e) => {
                error!(pointer, "Failed to resolve reference: {}", e);
                return Resolution::degraded(Diagnostic::Unresolved {
                    pointer: pointer.to_string(),
                    reason: e.to_string(),
                });
            }
        };

        let mut next_path = path.to_vec();
        next_path.push(pointer.to_string());

        match target {
            SchemaNode::Reference(inner) => self.resolve(&inner, depth + 1, &next_path, registry),
            concrete => {
                Resolution::resolved(self.simplify(concrete, depth + 1, &next_path, registry))
            }
        }
    }

    /// Replaces referencing object properties and array items with their resolution.
    ///
    /// A slot whose pointer is already on `path` becomes a cycle sentinel, so expanding
    /// the result never re-enters an open pointer.
    pub fn simplify(
        &self,
        node: SchemaNode,
        depth: usize,
        path: &[String],
        registry: &mut CircularRegistry,
    ) -> SchemaNode {
        match node {
            SchemaNode::Object(mut obj) => {
                obj.properties = obj
                    .properties
                    .into_iter()
                    .map(|(name, prop)| (name, self.simplify_slot(prop, depth, path, registry)))
                    .collect();
                SchemaNode::Object(obj)
            }
            SchemaNode::Array(mut arr) => {
                arr.items = arr
                    .items
                    .map(|items| Box::new(self.simplify_slot(*items, depth, path, registry)));
                SchemaNode::Array(arr)
            }
            other => other,
        }
    }

    fn simplify_slot(
        &self,
        slot: SchemaNode,
        depth: usize,
        path: &[String],
        registry: &mut CircularRegistry,
    ) -> SchemaNode {
        match slot {
            SchemaNode::Reference(pointer) if path.contains(&pointer) => {
                note_cycle(&pointer, registry);
                SchemaNode::sentinel(circular_message(&pointer))
            }
            SchemaNode::Reference(pointer) => self.resolve(&pointer, depth, path, registry).schema,
            other => other,
        }
    }
}

fn note_cycle(pointer: &str, registry: &mut CircularRegistry) {
    if registry.record(pointer) {
        info!(pointer, "Circular reference detected");
    } else {
        debug!(pointer, "Circular reference revisited");
    }
}
