//! The merge engine: combines two already-decomposed cofactors into
//! the DG edge for `ITE(top, r1, r0)`, trying progressively more
//! general recognizers before falling back to the boundary-search CPLX
//! construction.
use log::trace;

use crate::bdd::Bdd;
use crate::vid::VID;

use super::boundary::BoundaryAnalyzer;
use super::builders::{edge_pat0, edge_pat1, global_func, make_cplx, make_lit, make_lit_and, make_lit_or, make_lit_xor, make_or, make_xor, top_of};
use super::edge::DgEdge;
use super::mgr::DgMgr;
use super::node::NodeKind;

/// Splits two ascending, top-sorted child lists into the children
/// common to both (identical edge, polarity included) and each side's
/// remainder, the way the original source scans `cnode0`/`cnode1` by
/// comparing `top()`.
fn common_rest<B: Bdd>(
  mgr: &DgMgr<B>,
  list0: &[DgEdge],
  list1: &[DgEdge],
) -> (Vec<DgEdge>, Vec<DgEdge>, Vec<DgEdge>) {
  let mut common = Vec::new();
  let mut rest0 = Vec::new();
  let mut rest1 = Vec::new();
  let (mut i, mut j) = (0, 0);
  while i < list0.len() && j < list1.len() {
    let t0 = top_of(&mgr.store, list0[i]);
    let t1 = top_of(&mgr.store, list1[j]);
    match t0.cmp(&t1) {
      std::cmp::Ordering::Less => { rest0.push(list0[i]); i += 1; }
      std::cmp::Ordering::Greater => { rest1.push(list1[j]); j += 1; }
      std::cmp::Ordering::Equal => {
        if list0[i] == list1[j] { common.push(list0[i]); } else { rest0.push(list0[i]); rest1.push(list1[j]); }
        i += 1;
        j += 1;
      }
    }
  }
  rest0.extend_from_slice(&list0[i..]);
  rest1.extend_from_slice(&list1[j..]);
  (common, rest0, rest1)
}

impl<B: Bdd> DgMgr<B> {
  /// `r0`/`r1` are the already-decomposed cofactors `f|top=0`/`f|top=1`.
  /// Returns the edge for `(¬top ∧ r0) ∨ (top ∧ r1)`.
  pub(crate) fn merge(&mut self, top: VID, r0: DgEdge, r1: DgEdge) -> DgEdge {
    use DgEdge::Const;

    match (r0, r1) {
      (Const(false), Const(true)) => return make_lit(&mut self.bdd, &self.store, top),
      (Const(true), Const(false)) => return !make_lit(&mut self.bdd, &self.store, top),
      (Const(false), _) => return make_lit_and(&mut self.bdd, &self.store, top, false, r1),
      (Const(true), _) => return make_lit_or(&mut self.bdd, &self.store, top, true, r1),
      (_, Const(false)) => return make_lit_and(&mut self.bdd, &self.store, top, true, r0),
      (_, Const(true)) => return make_lit_or(&mut self.bdd, &self.store, top, false, r0),
      _ => {}
    }
    if DgEdge::check_complement(r0, r1) {
      return make_lit_xor(&mut self.bdd, &self.store, top, false, r0);
    }

    let inv0 = r0.inv();
    let inv1 = r1.inv();
    let (kind0, children0) = {
      let n = self.store.get(r0.node());
      (n.kind, n.children.clone())
    };
    let (kind1, children1) = {
      let n = self.store.get(r1.node());
      (n.kind, n.children.clone())
    };
    let (common, rest0, rest1) = common_rest(self, &children0, &children1);

    if !common.is_empty() && kind0 == NodeKind::Or && kind1 == NodeKind::Or && inv0 == inv1 {
      trace!("merge: case1-or, {} common children", common.len());
      let rest0_edge = make_or(&mut self.bdd, &self.store, rest0.clone()).xor_bool(inv0);
      let rest1_edge = make_or(&mut self.bdd, &self.store, rest1.clone()).xor_bool(inv1);
      let merged = self.merge(top, rest0_edge, rest1_edge);
      let mut kids = common.clone();
      kids.push(merged);
      return make_or(&mut self.bdd, &self.store, kids).xor_bool(inv0);
    }

    if !common.is_empty() && kind0 == NodeKind::Xor && kind1 == NodeKind::Xor {
      trace!("merge: case1-xor, {} common children", common.len());
      let rest0_edge = make_xor(&mut self.bdd, &self.store, rest0.clone()).xor_bool(inv0);
      let rest1_edge = make_xor(&mut self.bdd, &self.store, rest1.clone()).xor_bool(inv1);
      let merged = self.merge(top, rest0_edge, rest1_edge);
      let mut kids = common.clone();
      kids.push(merged);
      return make_xor(&mut self.bdd, &self.store, kids);
    }

    // Case 2-OR only fires when the matched cofactor is non-inverted:
    // for an inverted match the OR-shaped simplification below isn't
    // sound (it only cancels correctly when the matched side reduces
    // to plain disjunction), so that configuration falls through to
    // the later, always-correct cases instead of risking a wrong node.
    if kind0 == NodeKind::Or && !inv0 {
      if let Some(pos) = children0.iter().position(|&c| c == r1) {
        trace!("merge: case2-or (n0 side)");
        let rest: Vec<DgEdge> = children0.iter().enumerate().filter(|&(i, _)| i != pos).map(|(_, &c)| c).collect();
        let rest_or = make_or(&mut self.bdd, &self.store, rest);
        let lhs = make_lit_and(&mut self.bdd, &self.store, top, true, rest_or);
        return make_or(&mut self.bdd, &self.store, vec![lhs, r1]);
      }
    }
    if kind1 == NodeKind::Or && !inv1 {
      if let Some(pos) = children1.iter().position(|&c| c == r0) {
        trace!("merge: case2-or (n1 side)");
        let rest: Vec<DgEdge> = children1.iter().enumerate().filter(|&(i, _)| i != pos).map(|(_, &c)| c).collect();
        let rest_or = make_or(&mut self.bdd, &self.store, rest);
        let lhs = make_lit_and(&mut self.bdd, &self.store, top, false, rest_or);
        return make_or(&mut self.bdd, &self.store, vec![r0, lhs]);
      }
    }

    // Case 2-XOR: some child of n0 (or n1) shares a node with r1 (or
    // r0), possibly up to polarity. XOR is linear under negation so,
    // unlike Case 2-OR, this closed form holds for every combination
    // of child/edge polarity - derived as
    //   f = XOR(r1, AND(¬top, XOR(rest0) ^ (sign ^ inv0)))
    // where sign is whether the matched child and r1 agree in polarity.
    if kind0 == NodeKind::Xor {
      if let Some(pos) = children0.iter().position(|&c| c.normal_edge() == r1.normal_edge()) {
        trace!("merge: case2-xor (n0 side)");
        let c = children0[pos];
        let sign = c.inv() != r1.inv();
        let rest: Vec<DgEdge> = children0.iter().enumerate().filter(|&(i, _)| i != pos).map(|(_, &c)| c).collect();
        let rest_edge = make_xor(&mut self.bdd, &self.store, rest);
        let k = sign ^ inv0;
        let and_part = make_lit_and(&mut self.bdd, &self.store, top, true, rest_edge.xor_bool(k));
        return make_xor(&mut self.bdd, &self.store, vec![r1, and_part]);
      }
    }
    if kind1 == NodeKind::Xor {
      if let Some(pos) = children1.iter().position(|&c| c.normal_edge() == r0.normal_edge()) {
        trace!("merge: case2-xor (n1 side)");
        let c = children1[pos];
        let sign = c.inv() != r0.inv();
        let rest: Vec<DgEdge> = children1.iter().enumerate().filter(|&(i, _)| i != pos).map(|(_, &c)| c).collect();
        let rest_edge = make_xor(&mut self.bdd, &self.store, rest);
        let k = sign ^ inv1;
        let and_part = make_lit_and(&mut self.bdd, &self.store, top, false, rest_edge.xor_bool(k));
        return make_xor(&mut self.bdd, &self.store, vec![r0, and_part]);
      }
    }

    let f0 = global_func(&self.bdd, &self.store, r0);
    let f1 = global_func(&self.bdd, &self.store, r1);

    // Cheap fallback: if the two cofactors share no variables at all,
    // `top`/r0/r1 are already pairwise disjoint in support, so the
    // trivial 3-input CPLX is itself a valid (if unfactored) disjoint
    // decomposition - no need for the boundary search.
    let sup0 = super::builders::support_of(&self.store, r0);
    let sup1 = super::builders::support_of(&self.store, r1);
    if !sup0.overlaps(&sup1) {
      trace!("merge: disjoint-cofactor ITE fallback");
      let top_func = self.bdd.var(top);
      let f = self.bdd.ite(top_func, f1, f0);
      let lit = make_lit(&mut self.bdd, &self.store, top);
      return make_cplx(&mut self.bdd, &self.store, f, vec![lit, r0, r1]);
    }

    if kind0 == NodeKind::Cplx && kind1 == NodeKind::Cplx && rest0.len() == 1 && rest1.len() == 1 {
      if let Some(e) = self.try_case1_cplx_type1(top, f0, f1, rest0[0], rest1[0], &common) {
        return e;
      }
    }

    if kind0 == NodeKind::Cplx && kind1 == NodeKind::Cplx && rest0.is_empty() && rest1.is_empty() {
      if let Some(e) = self.try_case1_cplx_type2(top, f0, f1, &common) {
        return e;
      }
    }

    if kind0 == NodeKind::Cplx {
      let sup1_full = self.store.get(r1.node()).support.clone();
      if sup1_full.is_subset_of(&self.store.get(r0.node()).support) {
        if let Some(e) = self.try_case2_cplx(top, f0, f1, true, &children0, &sup1_full) {
          return e;
        }
      }
    }
    if kind1 == NodeKind::Cplx {
      let sup0_full = self.store.get(r0.node()).support.clone();
      if sup0_full.is_subset_of(&self.store.get(r1.node()).support) {
        if let Some(e) = self.try_case2_cplx(top, f0, f1, false, &children1, &sup0_full) {
          return e;
        }
      }
    }

    if !self.config.allow_last_resort {
      panic!("merge: no algebraic case applied and last-resort boundary search is disabled");
    }
    self.last_resort(top, f0, f1, r0, r1)
  }

  fn try_case1_cplx_type1(&mut self, top: VID, f0: B::F, f1: B::F, e0: DgEdge, e1: DgEdge, common: &[DgEdge]) -> Option<DgEdge> {
    let e0_pat0 = edge_pat0(&self.bdd, &self.store, e0);
    let e0_pat1 = edge_pat1(&self.bdd, &self.store, e0);
    let e1_pat0 = edge_pat0(&self.bdd, &self.store, e1);
    let e1_pat1 = edge_pat1(&self.bdd, &self.store, e1);
    let f0_at_e0_0 = self.bdd.cofactor(f0, e0_pat0);
    let f0_at_e0_1 = self.bdd.cofactor(f0, e0_pat1);
    let f1_at_e1_0 = self.bdd.cofactor(f1, e1_pat0);
    let f1_at_e1_1 = self.bdd.cofactor(f1, e1_pat1);

    let merged = if f0_at_e0_0 == f1_at_e1_0 && f0_at_e0_1 == f1_at_e1_1 {
      trace!("merge: case1-cplx type1 (aligned)");
      self.merge(top, e0, e1)
    } else if f0_at_e0_0 == f1_at_e1_1 && f0_at_e0_1 == f1_at_e1_0 {
      trace!("merge: case1-cplx type1 (complemented)");
      self.merge(top, !e0, e1)
    } else {
      return None;
    };
    let top_func = self.bdd.var(top);
    let f = self.bdd.ite(top_func, f1, f0);
    let mut kids = common.to_vec();
    kids.push(merged);
    Some(make_cplx(&mut self.bdd, &self.store, f, kids))
  }

  fn try_case1_cplx_type2(&mut self, top: VID, f0: B::F, f1: B::F, common: &[DgEdge]) -> Option<DgEdge> {
    for (i, &c) in common.iter().enumerate() {
      let c_pat0 = edge_pat0(&self.bdd, &self.store, c);
      let c_pat1 = edge_pat1(&self.bdd, &self.store, c);
      let f0_at_0 = self.bdd.cofactor(f0, c_pat0);
      let f0_at_1 = self.bdd.cofactor(f0, c_pat1);
      let f1_at_0 = self.bdd.cofactor(f1, c_pat0);
      let f1_at_1 = self.bdd.cofactor(f1, c_pat1);
      if f0_at_0 == f1_at_1 && f0_at_1 == f1_at_0 {
        trace!("merge: case1-cplx type2 at child {}", i);
        let flipped = make_lit_xor(&mut self.bdd, &self.store, top, false, c);
        let mut kids = common.to_vec();
        kids[i] = flipped;
        let top_func = self.bdd.var(top);
        let f = self.bdd.ite(top_func, f1, f0);
        return Some(make_cplx(&mut self.bdd, &self.store, f, kids));
      }
    }
    None
  }

  /// `f0`/`f1` are merge's original cofactor functions, in order;
  /// `cplx_is_n0` says which side owns `cplx_children`; `sup_small` is
  /// the other side's support, used to find children of the CPLX side
  /// that are independent of it.
  fn try_case2_cplx(&mut self, top: VID, f0: B::F, f1: B::F, cplx_is_n0: bool, cplx_children: &[DgEdge], sup_small: &crate::support::Support) -> Option<DgEdge> {
    let f_cplx = if cplx_is_n0 { f0 } else { f1 };
    let f_other = if cplx_is_n0 { f1 } else { f0 };
    for (i, &c) in cplx_children.iter().enumerate() {
      let c_sup = super::builders::support_of(&self.store, c);
      if c_sup.overlaps(sup_small) { continue; }
      let c_pat0 = edge_pat0(&self.bdd, &self.store, c);
      let c_pat1 = edge_pat1(&self.bdd, &self.store, c);
      let f_at_0 = self.bdd.cofactor(f_cplx, c_pat0);
      let f_at_1 = self.bdd.cofactor(f_cplx, c_pat1);
      let replacement = if f_at_0 == f_other {
        make_lit_and(&mut self.bdd, &self.store, top, true, c)
      } else if f_at_1 == f_other {
        make_lit_and(&mut self.bdd, &self.store, top, false, c)
      } else {
        continue;
      };
      trace!("merge: case2-cplx at child {}", i);
      let mut kids = cplx_children.to_vec();
      kids[i] = replacement;
      let top_func = self.bdd.var(top);
      let f = self.bdd.ite(top_func, f1, f0);
      return Some(make_cplx(&mut self.bdd, &self.store, f, kids));
    }
    None
  }

  /// Last resort: assemble a CPLX node from the maximal sub-DAG pieces
  /// not shared between the two cofactor cones, plus the literal on
  /// `top`. Always succeeds (every DG is representable this way), so
  /// this is the terminal case of `merge`.
  fn last_resort(&mut self, top: VID, f0: B::F, f1: B::F, r0: DgEdge, r1: DgEdge) -> DgEdge {
    trace!("merge: last-resort boundary CPLX");
    let mut az = BoundaryAnalyzer::new(&self.store);
    az.mark_recur(r0, 1);
    az.mark_recur(r1, 2);
    az.tfimark_recur(r0);
    az.tfimark_recur(r1);
    az.classify_boundary(r0);
    az.classify_boundary(r1);
    let mut inputs = Vec::new();
    az.find_bnode(r0, &mut inputs);
    az.find_bnode(r1, &mut inputs);
    inputs.push(make_lit(&mut self.bdd, &self.store, top));

    let top_func = self.bdd.var(top);
    let f = self.bdd.ite(top_func, f1, f0);
    make_cplx(&mut self.bdd, &self.store, f, inputs)
  }
}
