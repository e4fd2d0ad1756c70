//! Node builders: every `DgNode` in the graph is produced by exactly
//! one of these, which normalize polarity, flatten associative
//! children, sort by top variable, and hash-cons the result.
use crate::bdd::Bdd;
use crate::support::Support;
use crate::vid::VID;

use super::edge::DgEdge;
use super::node::{DgNode, NodeKind};
use super::store::NodeStore;

/// Splits `f` into its polarity-normalized form plus the inversion bit
/// that must be reapplied to whatever edge represents it.
fn normalize<B: Bdd>(bdd: &B, f: B::F) -> (B::F, bool) {
  if bdd.root_inv(f) { (bdd.not(f), true) } else { (f, false) }
}

/// The function an edge represents, following through the node store
/// for non-constant edges.
pub(crate) fn global_func<B: Bdd>(bdd: &B, store: &NodeStore<B::F>, e: DgEdge) -> B::F {
  match e {
    DgEdge::Const(false) => bdd.zero(),
    DgEdge::Const(true) => bdd.one(),
    DgEdge::Node(id, inv) => {
      let f = store.get(id).global_func;
      if inv { bdd.not(f) } else { f }
    }
  }
}

pub(crate) fn support_of<F: crate::bdd::BddFunc>(store: &NodeStore<F>, e: DgEdge) -> Support {
  match e {
    DgEdge::Const(_) => Support::new(),
    DgEdge::Node(id, _) => store.get(id).support.clone(),
  }
}

pub(crate) fn top_of<F: crate::bdd::BddFunc>(store: &NodeStore<F>, e: DgEdge) -> VID {
  debug_assert!(!e.is_const(), "top_of called on a constant edge");
  store.get(e.node()).top()
}

/// Edge-level `pat_1`/`pat_0`: a minterm of the edge's function, resp.
/// its complement, swapping the node's stored witnesses when the edge
/// itself is inverted.
pub(crate) fn edge_pat1<B: Bdd>(bdd: &B, store: &NodeStore<B::F>, e: DgEdge) -> B::F {
  match e {
    DgEdge::Const(true) => bdd.one(),
    DgEdge::Const(false) => panic!("edge_pat1 on the zero function"),
    DgEdge::Node(id, inv) => { let n = store.get(id); if inv { n.pat0 } else { n.pat1 } }
  }
}

pub(crate) fn edge_pat0<B: Bdd>(bdd: &B, store: &NodeStore<B::F>, e: DgEdge) -> B::F {
  match e {
    DgEdge::Const(false) => bdd.zero(),
    DgEdge::Const(true) => panic!("edge_pat0 on the one function"),
    DgEdge::Node(id, inv) => { let n = store.get(id); if inv { n.pat1 } else { n.pat0 } }
  }
}

/// Shared tail of every builder: normalize polarity, hash-cons lookup,
/// and on a miss compute the two witness minterms and allocate.
fn finish<B: Bdd>(
  bdd: &mut B,
  store: &NodeStore<B::F>,
  f: B::F,
  kind: NodeKind,
  support: Support,
  children: Vec<DgEdge>,
  lit_var: Option<VID>,
) -> DgEdge {
  let (f_normal, inv) = normalize(bdd, f);
  if let Some(e) = store.find(f_normal) { return e.xor_bool(inv); }
  let pat1 = bdd.get_onepath(f_normal);
  let pat0 = bdd.get_zeropath(f_normal);
  let edge = store.get_or_insert(f_normal, |id| DgNode {
    id,
    kind,
    global_func: f_normal,
    support,
    pat1,
    pat0,
    lit_var,
    children,
  });
  edge.xor_bool(inv)
}

/// The edge for the positive literal on `v`. Hash-consed: repeat calls
/// for the same variable return the same node.
pub fn make_lit<B: Bdd>(bdd: &mut B, store: &NodeStore<B::F>, v: VID) -> DgEdge {
  let f = bdd.var(v);
  finish(bdd, store, f, NodeKind::Lit, Support::single(v), Vec::new(), Some(v))
}

/// Builds `OR(children)`, flattening any non-inverted OR child and
/// hash-consing the result. `children` may be consumed in any order;
/// the stored node's children are sorted ascending by top variable.
pub fn make_or<B: Bdd>(bdd: &mut B, store: &NodeStore<B::F>, children: Vec<DgEdge>) -> DgEdge {
  if children.is_empty() { return DgEdge::ZERO; }
  if children.iter().any(|c| c.is_one()) { return DgEdge::ONE; }
  let children: Vec<DgEdge> = children.into_iter().filter(|c| !c.is_zero()).collect();
  if children.is_empty() { return DgEdge::ZERO; }
  if children.len() == 1 { return children[0]; }

  let mut flat = Vec::with_capacity(children.len());
  for c in children {
    if !c.is_const() && !c.inv() {
      let node = store.get(c.node());
      if node.is_or() {
        flat.extend(node.children.iter().copied());
        continue;
      }
    }
    flat.push(c);
  }
  if flat.is_empty() { return DgEdge::ZERO; }
  if flat.len() == 1 { return flat[0]; }

  let mut f = global_func(bdd, store, flat[0]);
  for &c in &flat[1..] {
    let cf = global_func(bdd, store, c);
    f = bdd.or(f, cf);
  }
  let support = flat.iter().fold(Support::new(), |acc, &c| acc.union(&support_of(store, c)));
  flat.sort_by_key(|&c| top_of(store, c));
  finish(bdd, store, f, NodeKind::Or, support, flat, None)
}

/// Builds `XOR(children)`, flattening any XOR child (regardless of its
/// own polarity — all polarity is lifted to the returned edge) and
/// hash-consing the result.
pub fn make_xor<B: Bdd>(bdd: &mut B, store: &NodeStore<B::F>, children: Vec<DgEdge>) -> DgEdge {
  if children.is_empty() { return DgEdge::ZERO; }
  if children.len() == 1 { return children[0]; }

  let mut oinv = false;
  let mut flat = Vec::with_capacity(children.len());
  for c in children {
    // A constant child just contributes its value to the running
    // polarity and disappears (x ⊕ 0 = x, x ⊕ 1 = ¬x).
    if c.is_const() { oinv ^= c.is_one(); continue; }
    oinv ^= c.inv();
    let normal = c.normal_edge();
    let node = store.get(normal.node());
    if node.is_xor() {
      for &gc in &node.children {
        oinv ^= gc.inv();
        flat.push(gc.normal_edge());
      }
      continue;
    }
    flat.push(normal);
  }
  if flat.is_empty() { return DgEdge::Const(false).xor_bool(oinv); }
  if flat.len() == 1 { return flat[0].xor_bool(oinv); }

  let mut f = global_func(bdd, store, flat[0]);
  for &c in &flat[1..] {
    let cf = global_func(bdd, store, c);
    f = bdd.xor(f, cf);
  }
  let support = flat.iter().fold(Support::new(), |acc, &c| acc.union(&support_of(store, c)));
  flat.sort_by_key(|&c| top_of(store, c));
  finish(bdd, store, f, NodeKind::Xor, support, flat, None).xor_bool(oinv)
}

/// Builds a CPLX node directly from its already-known global function
/// and child list. Unlike OR/XOR, CPLX performs no algebraic
/// simplification of its own — by the time a caller reaches for
/// `make_cplx` it has already established that no OR/XOR factoring
/// applies.
pub fn make_cplx<B: Bdd>(bdd: &mut B, store: &NodeStore<B::F>, f: B::F, mut children: Vec<DgEdge>) -> DgEdge {
  debug_assert!(children.len() >= 2, "a CPLX node needs at least 2 children");
  let support = children.iter().fold(Support::new(), |acc, &c| acc.union(&support_of(store, c)));
  children.sort_by_key(|&c| top_of(store, c));
  finish(bdd, store, f, NodeKind::Cplx, support, children, None)
}

/// `top ∧ e` if `!inv`, `¬top ∧ e` if `inv`, expressed as `¬OR(¬lit, ¬e)`
/// since AND is never a distinct node kind.
pub fn make_lit_and<B: Bdd>(bdd: &mut B, store: &NodeStore<B::F>, top: VID, inv: bool, e: DgEdge) -> DgEdge {
  let lit = make_lit(bdd, store, top).xor_bool(inv);
  !make_or(bdd, store, vec![!lit, !e])
}

/// `top ∨ e` if `!inv`, `¬top ∨ e` if `inv`.
pub fn make_lit_or<B: Bdd>(bdd: &mut B, store: &NodeStore<B::F>, top: VID, inv: bool, e: DgEdge) -> DgEdge {
  let lit = make_lit(bdd, store, top).xor_bool(inv);
  make_or(bdd, store, vec![lit, e])
}

/// `top ⊕ e` if `!inv`, `¬top ⊕ e` if `inv`.
pub fn make_lit_xor<B: Bdd>(bdd: &mut B, store: &NodeStore<B::F>, top: VID, inv: bool, e: DgEdge) -> DgEdge {
  let lit = make_lit(bdd, store, top).xor_bool(inv);
  make_xor(bdd, store, vec![lit, e])
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::bdd::manager::BddMgr;
  use crate::vid::named::*;

  #[test]
  fn make_lit_is_hash_consed() {
    let mut bdd = BddMgr::new();
    let store = NodeStore::new();
    let a = make_lit(&mut bdd, &store, x0);
    let b = make_lit(&mut bdd, &store, x0);
    assert_eq!(a, b);
    assert_eq!(store.len(), 1);
  }

  #[test]
  fn make_or_flattens_nested_or() {
    let mut bdd = BddMgr::new();
    let store = NodeStore::new();
    let a = make_lit(&mut bdd, &store, x0);
    let b = make_lit(&mut bdd, &store, x1);
    let c = make_lit(&mut bdd, &store, x2);
    let ab = make_or(&mut bdd, &store, vec![a, b]);
    let abc = make_or(&mut bdd, &store, vec![ab, c]);
    let node = store.get(abc.node());
    assert_eq!(node.child_num(), 3);
  }

  #[test]
  fn make_or_single_child_is_identity() {
    let mut bdd = BddMgr::new();
    let store = NodeStore::new();
    let a = make_lit(&mut bdd, &store, x0);
    assert_eq!(make_or(&mut bdd, &store, vec![a]), a);
  }

  #[test]
  fn make_xor_lifts_polarity_of_nested_xor() {
    let mut bdd = BddMgr::new();
    let store = NodeStore::new();
    let a = make_lit(&mut bdd, &store, x0);
    let b = make_lit(&mut bdd, &store, x1);
    let c = make_lit(&mut bdd, &store, x2);
    let ab = !make_xor(&mut bdd, &store, vec![a, b]);
    let abc = make_xor(&mut bdd, &store, vec![ab, c]);
    let node = store.get(abc.node());
    assert_eq!(node.child_num(), 3);
    assert!(node.children.iter().all(|c| !c.inv()));
  }

  #[test]
  fn make_lit_and_matches_truth_table() {
    let mut bdd = BddMgr::new();
    let store = NodeStore::new();
    let b = make_lit(&mut bdd, &store, x1);
    let e = make_lit_and(&mut bdd, &store, x0, false, b);
    let f = global_func(&bdd, &store, e);
    let expect = { let x0f = bdd.var(x0); let x1f = bdd.var(x1); bdd.and(x0f, x1f) };
    assert_eq!(f, expect);
  }
}
