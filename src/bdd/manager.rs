//! A small reference ROBDD manager: recursive ITE with a unique table
//! and a computed-result cache, using complement edges so that `hi`
//! branches are never stored inverted (this halves the unique table,
//! the same convention `ITE::norm` exploits in the teacher crate to
//! collapse `Norm::Nid`/`Norm::Not` into a single stored node).
//!
//! Variable order is fixed and ascending by `VID` index; this manager
//! never reorders.
use std::collections::{HashMap, HashSet};

use log::trace;

use super::nid::Nid;
use super::Bdd;
use crate::support::Support;
use crate::vid::VID;

#[derive(Clone, Copy)]
struct BddNode {
  var: VID,
  hi: Nid,
  lo: Nid,
}

#[derive(Default)]
pub struct BddMgr {
  nodes: Vec<BddNode>,
  unique: HashMap<(VID, Nid, Nid), usize>,
  ite_cache: HashMap<(Nid, Nid, Nid), Nid>,
}

impl BddMgr {
  pub fn new() -> Self { Self::default() }

  fn var_of(&self, f: Nid) -> Option<VID> {
    if f.is_const() { None } else { Some(self.nodes[f.idx()].var) }
  }

  /// Builds (or reuses) the node `(var, hi, lo)`, applying the
  /// reduction rule (`hi == lo` collapses to that child) and the
  /// complement-edge canonicalization (`hi` is never stored inverted).
  fn mk(&mut self, var: VID, hi: Nid, lo: Nid) -> Nid {
    if hi == lo { return hi; }
    if hi.is_inv() {
      return !self.mk_raw(var, !hi, !lo);
    }
    self.mk_raw(var, hi, lo)
  }

  fn mk_raw(&mut self, var: VID, hi: Nid, lo: Nid) -> Nid {
    let key = (var, hi, lo);
    if let Some(&idx) = self.unique.get(&key) {
      return Nid::from_idx(idx);
    }
    let idx = self.nodes.len();
    self.nodes.push(BddNode { var, hi, lo });
    self.unique.insert(key, idx);
    trace!("bdd: new node #{} var={} hi={:?} lo={:?}", idx, var, hi, lo);
    Nid::from_idx(idx)
  }

  /// Cofactors `f` about `top`, assuming `top` is `f`'s own top
  /// variable (or `f` does not depend on it at all, in which case both
  /// cofactors are `f` unchanged).
  fn cofactor_var(&self, f: Nid, top: VID) -> (Nid, Nid) {
    if f.is_const() { return (f, f); }
    let node = self.nodes[f.idx()];
    if node.var != top { return (f, f); }
    if f.is_inv() { (!node.lo, !node.hi) } else { (node.lo, node.hi) }
  }

  fn restrict_var(&mut self, f: Nid, var: VID, val: bool) -> Nid {
    let mut memo = HashMap::new();
    self.restrict_var_rec(f, var, val, &mut memo)
  }

  fn restrict_var_rec(&mut self, f: Nid, var: VID, val: bool, memo: &mut HashMap<Nid, Nid>) -> Nid {
    if f.is_const() { return f; }
    if let Some(&r) = memo.get(&f) { return r; }
    let node = self.nodes[f.idx()];
    let inv = f.is_inv();
    let r = if node.var == var {
      let branch = if val { node.hi } else { node.lo };
      if inv { !branch } else { branch }
    } else if node.var > var {
      // f's top variable already exceeds `var` in ascending order, so
      // `var` cannot appear anywhere below: f does not depend on it.
      f
    } else {
      let hi = self.restrict_var_rec(node.hi, var, val, memo);
      let lo = self.restrict_var_rec(node.lo, var, val, memo);
      let r0 = self.mk(node.var, hi, lo);
      if inv { !r0 } else { r0 }
    };
    memo.insert(f, r);
    r
  }

  /// Walks a cube BDD (as produced by `get_onepath`/`get_zeropath`)
  /// collecting its literal assignments.
  fn cube_assignments(&self, cube: Nid, out: &mut Vec<(VID, bool)>) {
    if cube.is_const() { return; }
    let node = self.nodes[cube.idx()];
    let inv = cube.is_inv();
    let hi = if inv { !node.hi } else { node.hi };
    let lo = if inv { !node.lo } else { node.lo };
    if self.is_zero(lo) {
      out.push((node.var, true));
      self.cube_assignments(hi, out);
    } else {
      out.push((node.var, false));
      self.cube_assignments(lo, out);
    }
  }

  fn support_rec(&self, f: Nid, vars: &mut Vec<VID>, seen: &mut HashSet<usize>) {
    if f.is_const() { return; }
    if !seen.insert(f.idx()) { return; }
    let node = self.nodes[f.idx()];
    vars.push(node.var);
    self.support_rec(node.hi, vars, seen);
    self.support_rec(node.lo, vars, seen);
  }
}

impl Bdd for BddMgr {
  type F = Nid;

  fn zero(&self) -> Nid { Nid::O }
  fn one(&self) -> Nid { Nid::I }
  fn is_zero(&self, f: Nid) -> bool { f == Nid::O }
  fn is_one(&self, f: Nid) -> bool { f == Nid::I }

  fn var(&mut self, v: VID) -> Nid { self.mk(v, Nid::I, Nid::O) }

  fn not(&self, f: Nid) -> Nid { !f }

  fn ite(&mut self, f: Nid, g: Nid, h: Nid) -> Nid {
    if f == Nid::I { return g; }
    if f == Nid::O { return h; }
    if g == h { return g; }
    if f.is_inv() { return self.ite(!f, h, g); }
    if g == Nid::I && h == Nid::O { return f; }
    if g == Nid::O && h == Nid::I { return !f; }
    if g.is_inv() { return !self.ite(f, !g, !h); }

    let key = (f, g, h);
    if let Some(&r) = self.ite_cache.get(&key) { return r; }

    let top = [self.var_of(f), self.var_of(g), self.var_of(h)]
      .into_iter()
      .flatten()
      .min()
      .expect("ite: all of f,g,h constant should have been handled above");

    let (f0, f1) = self.cofactor_var(f, top);
    let (g0, g1) = self.cofactor_var(g, top);
    let (h0, h1) = self.cofactor_var(h, top);
    let r0 = self.ite(f0, g0, h0);
    let r1 = self.ite(f1, g1, h1);
    let result = self.mk(top, r1, r0);
    self.ite_cache.insert(key, result);
    result
  }

  fn and(&mut self, a: Nid, b: Nid) -> Nid { self.ite(a, b, Nid::O) }
  fn or(&mut self, a: Nid, b: Nid) -> Nid { self.ite(a, Nid::I, b) }
  fn xor(&mut self, a: Nid, b: Nid) -> Nid { let nb = !b; self.ite(a, nb, b) }

  fn root_decomp(&self, f: Nid) -> (VID, Nid, Nid) {
    assert!(!self.is_zero(f) && !self.is_one(f), "root_decomp on a constant");
    let top = self.var_of(f).expect("non-constant f must have a top variable");
    let (f0, f1) = self.cofactor_var(f, top);
    (top, f0, f1)
  }

  fn cofactor(&mut self, f: Nid, pat: Nid) -> Nid {
    let mut assignments = Vec::new();
    self.cube_assignments(pat, &mut assignments);
    let mut r = f;
    for (var, val) in assignments {
      r = self.restrict_var(r, var, val);
    }
    r
  }

  fn get_onepath(&mut self, f: Nid) -> Nid {
    assert!(!self.is_zero(f), "get_onepath on the zero function");
    if self.is_one(f) { return Nid::I; }
    let (top, f0, f1) = self.root_decomp(f);
    if !self.is_zero(f1) {
      let rest = self.get_onepath(f1);
      self.mk(top, rest, Nid::O)
    } else {
      let rest = self.get_onepath(f0);
      self.mk(top, Nid::O, rest)
    }
  }

  fn get_zeropath(&mut self, f: Nid) -> Nid {
    assert!(!self.is_one(f), "get_zeropath on the one function");
    if self.is_zero(f) { return Nid::I; }
    let (top, f0, f1) = self.root_decomp(f);
    if !self.is_one(f1) {
      let rest = self.get_zeropath(f1);
      self.mk(top, rest, Nid::O)
    } else {
      let rest = self.get_zeropath(f0);
      self.mk(top, Nid::O, rest)
    }
  }

  fn support(&self, f: Nid) -> Support {
    let mut vars = Vec::new();
    let mut seen = HashSet::new();
    self.support_rec(f, &mut vars, &mut seen);
    Support::from_unsorted(vars)
  }

  fn root_inv(&self, f: Nid) -> bool { f.is_inv() }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::vid::named::*;

  #[test]
  fn var_is_its_own_literal() {
    let mut m = BddMgr::new();
    let x = m.var(x0);
    assert!(!m.is_zero(x));
    assert!(!m.is_one(x));
    let (top, f0, f1) = m.root_decomp(x);
    assert_eq!(top, x0);
    assert!(m.is_zero(f0));
    assert!(m.is_one(f1));
  }

  #[test]
  fn and_or_xor_agree_with_truth_table() {
    let mut m = BddMgr::new();
    let a = m.var(x0);
    let b = m.var(x1);
    let and = m.and(a, b);
    let or = m.or(a, b);
    let xor = m.xor(a, b);
    for av in [false, true] {
      for bv in [false, true] {
        let eval = |m: &mut BddMgr, f: Nid| -> bool {
          let (top, f0, f1) = if m.is_zero(f) || m.is_one(f) {
            return m.is_one(f);
          } else {
            m.root_decomp(f)
          };
          let v = if top == x0 { av } else { bv };
          let branch = if v { f1 } else { f0 };
          m.is_one(branch) || (!m.is_zero(branch) && {
            let (_, g0, g1) = m.root_decomp(branch);
            let v2 = bv;
            m.is_one(if v2 { g1 } else { g0 })
          })
        };
        assert_eq!(eval(&mut m, and), av && bv);
        assert_eq!(eval(&mut m, or), av || bv);
        assert_eq!(eval(&mut m, xor), av ^ bv);
      }
    }
  }

  #[test]
  fn complement_edges_share_nodes() {
    let mut m = BddMgr::new();
    let a = m.var(x0);
    let not_a = m.not(a);
    let not_not_a = m.not(not_a);
    assert_eq!(a, not_not_a);
  }

  #[test]
  fn support_collects_all_vars_once() {
    let mut m = BddMgr::new();
    let a = m.var(x0);
    let b = m.var(x1);
    let f = m.xor(a, b);
    let f2 = m.and(f, f);
    let sup = m.support(f2);
    assert_eq!(sup.size(), 2);
    assert!(sup.contains(x0));
    assert!(sup.contains(x1));
  }

  #[test]
  fn onepath_and_zeropath_are_satisfying_cubes() {
    let mut m = BddMgr::new();
    let a = m.var(x0);
    let b = m.var(x1);
    let f = m.and(a, b);
    let one = m.get_onepath(f);
    let restricted = m.cofactor(f, one);
    assert!(m.is_one(restricted));
    let zero = m.get_zeropath(f);
    let restricted0 = m.cofactor(f, zero);
    assert!(m.is_zero(restricted0));
  }
}
