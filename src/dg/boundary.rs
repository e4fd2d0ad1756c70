//! Boundary analysis used by the merge engine's last-resort CPLX
//! construction: given the two DG subgraphs rooted at a cofactor pair,
//! find the maximal nodes that are *not* shared between the two cones,
//! so they can become the children of a single enclosing CPLX node.
//!
//! State lives in an auxiliary map keyed by `NodeId` rather than on the
//! (immutable, shared) `DgNode` itself, mirroring the original
//! decomposition manager's side-table of per-node marks.
use std::collections::HashMap;

use super::edge::DgEdge;
use super::node::NodeId;
use super::store::NodeStore;
use crate::bdd::BddFunc;

const SIDE_0: u8 = 1;
const SIDE_1: u8 = 2;
const BOTH_SIDES: u8 = SIDE_0 | SIDE_1;

#[derive(Clone, Copy, Default)]
struct Info {
  /// Which side(s) (1, 2, or both) reach this node.
  mark: u8,
  /// Which side(s) reach this node's transitive fanin. Nonzero once computed.
  tfimark: u8,
  /// 0 = unclassified, 1 = boundary, 2 = internal, 3 = already emitted as a CPLX input.
  bmark: u8,
}

pub struct BoundaryAnalyzer<'a, F: BddFunc> {
  store: &'a NodeStore<F>,
  info: HashMap<NodeId, Info>,
}

impl<'a, F: BddFunc> BoundaryAnalyzer<'a, F> {
  pub fn new(store: &'a NodeStore<F>) -> Self {
    BoundaryAnalyzer { store, info: HashMap::new() }
  }

  fn entry(&mut self, id: NodeId) -> &mut Info { self.info.entry(id).or_default() }

  /// Recursively ORs `side` into every node reachable from `e`. Stops
  /// descending once a node already carries `side`, since everything
  /// below it has necessarily already been visited for this side.
  pub fn mark_recur(&mut self, e: DgEdge, side: u8) {
    if e.is_const() { return; }
    let id = e.node();
    let already = self.entry(id).mark & side == side;
    if already { return; }
    self.entry(id).mark |= side;
    let children = self.store.get(id).children.clone();
    for c in children { self.mark_recur(c, side); }
  }

  /// Bottom-up: a node's `tfimark` is the union of its own `mark` with
  /// the `tfimark` of every child. `BOTH_SIDES` short-circuits since it
  /// can only grow to `BOTH_SIDES` at most.
  pub fn tfimark_recur(&mut self, e: DgEdge) -> u8 {
    if e.is_const() { return 0; }
    let id = e.node();
    if let Some(info) = self.info.get(&id) {
      if info.tfimark != 0 { return info.tfimark; }
      if info.mark == BOTH_SIDES {
        self.entry(id).tfimark = BOTH_SIDES;
        return BOTH_SIDES;
      }
    }
    let children = self.store.get(id).children.clone();
    let mut acc = self.info.get(&id).copied().unwrap_or_default().mark;
    for c in children {
      acc |= self.tfimark_recur(c);
      if acc == BOTH_SIDES { break; }
    }
    self.entry(id).tfimark = acc;
    acc
  }

  /// A node is a boundary node when its own mark already accounts for
  /// everything reachable below it (`mark == tfimark`): nothing deeper
  /// mixes sides that this node itself doesn't already mix. Must run
  /// after `mark_recur`/`tfimark_recur` have covered `e`.
  pub fn classify_boundary(&mut self, e: DgEdge) -> u8 {
    if e.is_const() { return 2; }
    let id = e.node();
    let info = *self.info.get(&id).expect("classify_boundary: node not marked");
    if info.bmark != 0 { return info.bmark; }
    let bmark = if info.mark == info.tfimark { 1 } else { 2 };
    self.entry(id).bmark = bmark;
    if bmark == 2 {
      let children = self.store.get(id).children.clone();
      for c in children { self.classify_boundary(c); }
    }
    bmark
  }

  /// Collects every boundary node reachable from `e` into `inputs`,
  /// each exactly once across however many times `find_bnode` is
  /// called against overlapping cones (an already-emitted node is
  /// skipped, which is what gives the two cofactor cones a shared,
  /// deduplicated child list).
  pub fn find_bnode(&mut self, e: DgEdge, inputs: &mut Vec<DgEdge>) {
    if e.is_const() { return; }
    let id = e.node();
    let bmark = self.info.get(&id).map(|i| i.bmark).unwrap_or(0);
    if bmark == 3 { return; }
    if bmark == 1 {
      inputs.push(e.normal_edge());
    } else {
      let children = self.store.get(id).children.clone();
      for c in children { self.find_bnode(c, inputs); }
    }
    self.entry(id).bmark = 3;
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::bdd::manager::BddMgr;
  use crate::dg::builders::*;
  use crate::vid::named::*;

  #[test]
  fn disjoint_subgraphs_are_all_boundary() {
    let mut bdd = BddMgr::new();
    let store = NodeStore::new();
    let a = make_lit(&mut bdd, &store, x0);
    let b = make_lit(&mut bdd, &store, x1);

    let mut az = BoundaryAnalyzer::new(&store);
    az.mark_recur(a, SIDE_0);
    az.mark_recur(b, SIDE_1);
    az.tfimark_recur(a);
    az.tfimark_recur(b);
    assert_eq!(az.classify_boundary(a), 1);
    assert_eq!(az.classify_boundary(b), 1);

    let mut inputs = Vec::new();
    az.find_bnode(a, &mut inputs);
    az.find_bnode(b, &mut inputs);
    assert_eq!(inputs.len(), 2);
  }

  #[test]
  fn shared_child_is_emitted_once() {
    let mut bdd = BddMgr::new();
    let store = NodeStore::new();
    let a = make_lit(&mut bdd, &store, x0);
    let b = make_lit(&mut bdd, &store, x1);
    let c = make_lit(&mut bdd, &store, x2);
    let or_ab = make_or(&mut bdd, &store, vec![a, b]);
    let or_ac = make_or(&mut bdd, &store, vec![a, c]);

    let mut az = BoundaryAnalyzer::new(&store);
    az.mark_recur(or_ab, SIDE_0);
    az.mark_recur(or_ac, SIDE_1);
    az.tfimark_recur(or_ab);
    az.tfimark_recur(or_ac);
    az.classify_boundary(or_ab);
    az.classify_boundary(or_ac);

    let mut inputs = Vec::new();
    az.find_bnode(or_ab, &mut inputs);
    az.find_bnode(or_ac, &mut inputs);
    // `a` is shared (reached from both cones) so it is internal to both
    // OR nodes rather than a boundary node itself; each OR's remaining
    // literal (b, c) plus the shared `a` are all that can be emitted,
    // and `a` must appear only once overall.
    let a_count = inputs.iter().filter(|&&e| e.normal_edge() == a.normal_edge()).count();
    assert!(a_count <= 1);
  }
}
