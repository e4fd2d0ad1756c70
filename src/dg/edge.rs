//! DG edges: a tagged union of "constant" and "node plus inversion
//! bit", deliberately a plain Rust enum rather than a packed pointer
//! with a stolen low bit. The original decomposition manager encodes
//! this as a tagged machine word (`reinterpret_cast<ympuint>(node) |
//! inv_bit`); we get the same two-word-free representation from an
//! ordinary tagged enum without unsafe code.
use std::ops::Not;

use super::node::NodeId;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DgEdge {
  Const(bool),
  Node(NodeId, bool),
}

impl DgEdge {
  pub const ZERO: DgEdge = DgEdge::Const(false);
  pub const ONE: DgEdge = DgEdge::Const(true);

  pub fn is_const(&self) -> bool { matches!(self, DgEdge::Const(_)) }
  pub fn is_zero(&self) -> bool { matches!(self, DgEdge::Const(false)) }
  pub fn is_one(&self) -> bool { matches!(self, DgEdge::Const(true)) }

  /// The node this edge points to. Precondition: `!self.is_const()`.
  pub fn node(&self) -> NodeId {
    match self {
      DgEdge::Node(id, _) => *id,
      DgEdge::Const(_) => panic!("DgEdge::node() called on a constant edge"),
    }
  }

  /// Always `false` for constants: `Const(false)`/`Const(true)` are
  /// each their own normal form, not one inverted from the other.
  pub fn inv(&self) -> bool {
    match self {
      DgEdge::Node(_, inv) => *inv,
      DgEdge::Const(_) => false,
    }
  }

  /// Same edge with the inversion bit cleared. A constant edge has no
  /// inversion bit to clear, so it's returned unchanged.
  pub fn normal_edge(&self) -> DgEdge {
    match self {
      DgEdge::Node(id, _) => DgEdge::Node(*id, false),
      DgEdge::Const(v) => DgEdge::Const(*v),
    }
  }

  pub fn xor_bool(&self, b: bool) -> DgEdge {
    if !b { return *self; }
    !*self
  }

  /// True iff `a` and `b` are exact structural complements of one another.
  pub fn check_complement(a: DgEdge, b: DgEdge) -> bool { a == !b }
}

impl Not for DgEdge {
  type Output = DgEdge;
  fn not(self) -> DgEdge {
    match self {
      DgEdge::Node(id, inv) => DgEdge::Node(id, !inv),
      DgEdge::Const(v) => DgEdge::Const(!v),
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn constants_negate_to_each_other() {
    assert_eq!(!DgEdge::ZERO, DgEdge::ONE);
    assert!(DgEdge::ZERO.is_zero());
    assert!(DgEdge::ONE.is_one());
  }

  #[test]
  fn node_edge_toggles_inv_bit() {
    let e = DgEdge::Node(NodeId(3), false);
    let ne = !e;
    assert_eq!(ne, DgEdge::Node(NodeId(3), true));
    assert_eq!(!ne, e);
  }

  #[test]
  fn check_complement() {
    let e = DgEdge::Node(NodeId(1), false);
    assert!(DgEdge::check_complement(e, !e));
    assert!(!DgEdge::check_complement(e, e));
  }

  #[test]
  fn xor_bool_is_conditional_negation() {
    let e = DgEdge::Node(NodeId(2), false);
    assert_eq!(e.xor_bool(false), e);
    assert_eq!(e.xor_bool(true), !e);
  }
}
