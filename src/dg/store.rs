//! Arena ownership and structural hash-consing for DG nodes, the same
//! shape as the teacher crate's `HiLoCache`: a `boxcar::Vec` arena
//! handing out stable indices, paired with a `DashMap` keyed on the
//! content being deduplicated (there, a `HiLo`; here, a normalized BDD
//! function) so every distinct function is allocated at most once.
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use fxhash::FxBuildHasher;

use super::edge::DgEdge;
use super::node::{DgNode, NodeId};
use crate::bdd::BddFunc;

pub struct NodeStore<F: BddFunc> {
  nodes: boxcar::Vec<DgNode<F>>,
  index: DashMap<F, DgEdge, FxBuildHasher>,
}

impl<F: BddFunc> Default for NodeStore<F> {
  fn default() -> Self {
    NodeStore { nodes: boxcar::Vec::new(), index: DashMap::with_hasher(FxBuildHasher::default()) }
  }
}

impl<F: BddFunc> NodeStore<F> {
  pub fn new() -> Self { Self::default() }

  pub fn get(&self, id: NodeId) -> &DgNode<F> {
    self.nodes.get(id.0).expect("NodeStore::get: dangling NodeId")
  }

  pub fn len(&self) -> usize { self.nodes.count() }

  /// Looks up the edge already registered for a polarity-normalized
  /// function, if any.
  pub fn find(&self, f_normal: F) -> Option<DgEdge> {
    self.index.get(&f_normal).map(|r| *r)
  }

  /// Registers `edge` as the representative of `f_normal`. If an edge
  /// is already registered it must match exactly: a mismatch means two
  /// different constructions claimed the same normalized function,
  /// which is a hash-consing invariant violation.
  pub fn put(&self, f_normal: F, edge: DgEdge) {
    match self.index.entry(f_normal) {
      Entry::Occupied(o) => assert!(
        *o.get() == edge,
        "hash-cons conflict: function already mapped to a different edge"
      ),
      Entry::Vacant(v) => { v.insert(edge); }
    }
  }

  /// Returns the existing edge for `f_normal` if present; otherwise
  /// allocates a new node via `build` (given the `NodeId` it will
  /// receive) and registers it.
  ///
  /// Single-writer precondition: this store is driven by one `DgMgr`
  /// processing one decomposition at a time (see the crate's
  /// concurrency model), so the find-then-allocate sequence here is
  /// never raced.
  pub fn get_or_insert(&self, f_normal: F, build: impl FnOnce(NodeId) -> DgNode<F>) -> DgEdge {
    if let Some(e) = self.find(f_normal) { return e; }
    let id = NodeId(self.nodes.count());
    let node = build(id);
    let pushed = self.nodes.push(node);
    debug_assert_eq!(pushed, id.0, "NodeStore arena index raced with a concurrent writer");
    let edge = DgEdge::Node(id, false);
    self.put(f_normal, edge);
    edge
  }
}
