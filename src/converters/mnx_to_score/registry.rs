//! Identifier registry and deferred task queue
//!
//! The registry is a bidirectional map between symbolic document ids and
//! created graph nodes: at most one node per id, at most one id per node
//! (unless a binding explicitly shadows). It also owns the deferred task
//! queue for forward references — `bind` is the single place the queue is
//! drained, so a reference becomes resolvable exactly when its target id
//! appears.
//!
//! Both structures are scoped to a single conversion and rebuilt per call;
//! there is no process-wide state.

use std::collections::HashMap;

use crate::score::{NodeId, Score};

use super::errors::{IdentifierError, ReferenceError};

/// A pending cross-reference resolution. The closure is invoked with every
/// newly bound `(id, node)` pair and returns `true` once it has performed
/// its effect, at which point it leaves the queue.
pub type DeferredFn = Box<dyn FnMut(&mut Score, &str, NodeId) -> bool>;

struct DeferredTask {
    /// Names the outstanding reference, for the end-of-conversion error.
    description: String,
    run: DeferredFn,
}

/// Traversal-scoped id ↔ node map plus the deferred task queue.
#[derive(Default)]
pub struct NodeRegistry {
    by_id: HashMap<String, NodeId>,
    assigned: HashMap<NodeId, String>,
    pending: Vec<DeferredTask>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        NodeRegistry::default()
    }

    /// Bind `id` to `node`, write the identifier into the arena node, and
    /// drain the deferred queue against the new binding.
    ///
    /// A `None` id is a no-op: unidentified nodes never enter the registry
    /// and never trigger resolution.
    ///
    /// Fails with [`IdentifierError::DuplicateId`] if the id is already
    /// bound — even to the same node, since a repeated definition means the
    /// document is malformed. Fails with
    /// [`IdentifierError::IdentityConflict`] if the node already carries a
    /// registry-recorded identifier and `allow_shadowing` is false; with
    /// shadowing, the node's identifier field is rewritten while the old
    /// id keeps mapping to the node.
    pub fn bind(
        &mut self,
        score: &mut Score,
        node: NodeId,
        id: Option<&str>,
        allow_shadowing: bool,
    ) -> Result<(), IdentifierError> {
        let Some(id) = id else {
            return Ok(());
        };

        if self.by_id.contains_key(id) {
            return Err(IdentifierError::DuplicateId(id.to_string()));
        }

        if !allow_shadowing {
            if let Some(existing) = self.assigned.get(&node) {
                return Err(IdentifierError::IdentityConflict {
                    existing: existing.clone(),
                    new: id.to_string(),
                });
            }
        }

        self.by_id.insert(id.to_string(), node);
        self.assigned.insert(node, id.to_string());
        score.node_mut(node).id = Some(id.to_string());

        // Sole drain point: tasks run in insertion order, completed tasks
        // are removed in place (retain_mut is stable).
        self.pending
            .retain_mut(|task| !(task.run)(score, id, node));

        Ok(())
    }

    /// Resolve a symbolic id to its node handle.
    pub fn lookup(&self, id: &str) -> Result<NodeId, ReferenceError> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| ReferenceError::UnknownId(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Queue a task awaiting a future binding.
    pub fn defer(
        &mut self,
        description: impl Into<String>,
        run: impl FnMut(&mut Score, &str, NodeId) -> bool + 'static,
    ) {
        self.pending.push(DeferredTask {
            description: description.into(),
            run: Box::new(run),
        });
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// End-of-conversion check: every deferred task must have resolved.
    /// A leftover task is a reference to an id the document never declared.
    pub fn finish(&self) -> Result<(), ReferenceError> {
        match self.pending.first() {
            None => Ok(()),
            Some(task) => Err(ReferenceError::UnresolvedReference(
                task.description.clone(),
            )),
        }
    }
}
