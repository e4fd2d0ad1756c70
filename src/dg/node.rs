//! The DG node itself: an immutable record produced exactly once per
//! distinct (polarity-normalized) function by the node builders in
//! `builders.rs`.
use crate::support::Support;
use crate::vid::VID;

use super::edge::DgEdge;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeKind { Lit, Or, Xor, Cplx }

/// `F` is the BDD function-handle type; the node store is generic over
/// it so the DG layer never depends on a specific BDD package.
pub struct DgNode<F> {
  pub id: NodeId,
  pub kind: NodeKind,
  /// Always the polarity-normalized function: never the inverted form.
  pub global_func: F,
  pub support: Support,
  pub pat1: F,
  pub pat0: F,
  /// `Some` only for `Lit` nodes.
  pub lit_var: Option<VID>,
  /// Empty for `Lit` nodes; sorted ascending by `child.top()` otherwise.
  pub children: Vec<DgEdge>,
}

impl<F: Copy> DgNode<F> {
  pub fn is_lit(&self) -> bool { self.kind == NodeKind::Lit }
  pub fn is_or(&self) -> bool { self.kind == NodeKind::Or }
  pub fn is_xor(&self) -> bool { self.kind == NodeKind::Xor }
  pub fn is_cplx(&self) -> bool { self.kind == NodeKind::Cplx }

  pub fn top(&self) -> VID {
    match self.kind {
      NodeKind::Lit => self.lit_var.expect("lit node missing lit_var"),
      _ => self.support.top(),
    }
  }

  pub fn child_num(&self) -> usize { self.children.len() }

  pub fn child(&self, pos: usize) -> DgEdge { self.children[pos] }
}
