//! The decomposition manager: owns the BDD package, the DG node store,
//! and the `decomp` memo table, and drives the recursive Shannon-based
//! decomposition.
use std::collections::HashMap;
use std::io::{self, Write};

use log::{debug, trace};

use crate::bdd::Bdd;

use super::edge::DgEdge;
use super::node::NodeKind;
use super::store::NodeStore;

/// Knobs with no effect on the function a decomposition computes, only
/// on how it's computed or traced. Not serialized — the DG itself has
/// no persistence story (see the crate's Non-goals).
pub struct DgConfig {
  /// When false, `decomp` panics instead of falling back to the
  /// boundary-search CPLX construction. Exists so tests can assert
  /// that a given function genuinely needs the last resort.
  pub allow_last_resort: bool,
}

impl Default for DgConfig {
  fn default() -> Self { DgConfig { allow_last_resort: true } }
}

pub struct DgMgr<B: Bdd> {
  pub(crate) bdd: B,
  pub(crate) store: NodeStore<B::F>,
  memo: HashMap<B::F, DgEdge>,
  pub(crate) config: DgConfig,
}

impl<B: Bdd> DgMgr<B> {
  pub fn new(bdd: B) -> Self { Self::with_config(bdd, DgConfig::default()) }

  pub fn with_config(bdd: B, config: DgConfig) -> Self {
    DgMgr { bdd, store: NodeStore::new(), memo: HashMap::new(), config }
  }

  pub fn bdd(&self) -> &B { &self.bdd }
  pub fn bdd_mut(&mut self) -> &mut B { &mut self.bdd }
  pub fn store(&self) -> &NodeStore<B::F> { &self.store }

  /// The function a DG edge represents, recovered from the node store.
  pub fn global_func(&self, e: DgEdge) -> B::F {
    super::builders::global_func(&self.bdd, &self.store, e)
  }

  /// The (hash-consed) literal edge for `v`.
  pub fn make_lit(&mut self, v: crate::vid::VID) -> DgEdge {
    super::builders::make_lit(&mut self.bdd, &self.store, v)
  }

  /// Decomposes `f` into a disjoint decomposition graph, returning the
  /// root edge. Repeated calls (including on `¬f`) reuse the existing
  /// node set and memo entries.
  pub fn decomp(&mut self, f: B::F) -> DgEdge {
    if self.bdd.is_zero(f) { return DgEdge::ZERO; }
    if self.bdd.is_one(f) { return DgEdge::ONE; }
    self.decomp_step(f)
  }

  fn decomp_step(&mut self, f: B::F) -> DgEdge {
    let inv = self.bdd.root_inv(f);
    let f_normal = if inv { self.bdd.not(f) } else { f };
    if let Some(&e) = self.memo.get(&f_normal) {
      return e.xor_bool(inv);
    }
    let (top, f0, f1) = self.bdd.root_decomp(f_normal);
    trace!("decomp_step: top={}", top);
    let r0 = self.decomp(f0);
    let r1 = self.decomp(f1);
    debug!("decomp_step: top={} r0_const={} r1_const={}", top, r0.is_const(), r1.is_const());
    let result = self.merge(top, r0, r1);
    self.memo.insert(f_normal, result);
    result.xor_bool(inv)
  }

  /// Emits one line per reachable node, depth-first. Format is for
  /// debugging only, not a stable contract.
  pub fn print(&self, e: DgEdge, out: &mut impl Write) -> io::Result<()> {
    let mut seen = std::collections::HashSet::new();
    self.print_rec(e, out, &mut seen)
  }

  fn print_rec(&self, e: DgEdge, out: &mut impl Write, seen: &mut std::collections::HashSet<usize>) -> io::Result<()> {
    if e.is_const() {
      return writeln!(out, "{}", if e.is_one() { "ONE" } else { "ZERO" });
    }
    let id = e.node();
    if !seen.insert(id.0) { return Ok(()); }
    let node = self.store.get(id);
    let kind = match node.kind {
      NodeKind::Lit => "LIT",
      NodeKind::Or => "OR",
      NodeKind::Xor => "XOR",
      NodeKind::Cplx => "CPLX",
    };
    let children: Vec<String> = node.children.iter().map(|c| {
      format!("{}{}", if c.inv() { "~" } else { "" }, c.node().0)
    }).collect();
    writeln!(out, "#{}{}: {}({})", id.0, if e.inv() { " (inv)" } else { "" }, kind, children.join(", "))?;
    for c in node.children.clone() {
      self.print_rec(c, out, seen)?;
    }
    Ok(())
  }
}
