//! The BDD interface this crate consumes, plus a reference
//! implementation (`manager::BddMgr`) so the decomposition engine is
//! testable standalone.
//!
//! The decomposition engine never touches a concrete BDD package
//! directly; it only calls through the `Bdd` trait below. Swap in any
//! other ROBDD package by implementing it.
pub mod nid;
pub mod manager;

pub use nid::Nid;
pub use manager::BddMgr;

use crate::support::Support;
use crate::vid::VID;

/// A BDD function handle: a small `Copy` value that can be hashed and
/// compared for structural equality. The node store's hash-consing
/// depends on `Eq`/`Hash` being exact (not "semantically equal but
/// differently represented").
pub trait BddFunc: Copy + Eq + std::hash::Hash + std::fmt::Debug {}
impl<T: Copy + Eq + std::hash::Hash + std::fmt::Debug> BddFunc for T {}

/// The operations the decomposition engine needs from a BDD package.
pub trait Bdd {
  type F: BddFunc;

  fn zero(&self) -> Self::F;
  fn one(&self) -> Self::F;
  fn is_zero(&self, f: Self::F) -> bool;
  fn is_one(&self, f: Self::F) -> bool;

  /// Returns the edge for the positive literal on `v`.
  fn var(&mut self, v: VID) -> Self::F;

  fn not(&self, f: Self::F) -> Self::F;
  fn ite(&mut self, i: Self::F, t: Self::F, e: Self::F) -> Self::F;
  fn and(&mut self, a: Self::F, b: Self::F) -> Self::F;
  fn or(&mut self, a: Self::F, b: Self::F) -> Self::F;
  fn xor(&mut self, a: Self::F, b: Self::F) -> Self::F;

  /// Shannon-expands `f` about its top variable: returns
  /// `(top, f|top=0, f|top=1)`. Precondition: `f` is not constant.
  fn root_decomp(&self, f: Self::F) -> (VID, Self::F, Self::F);

  /// Generalized cofactor: restricts `f` by the cube `pat` (as
  /// produced by `get_onepath`/`get_zeropath`).
  fn cofactor(&mut self, f: Self::F, pat: Self::F) -> Self::F;

  /// One minterm (as a cube BDD) satisfying `f`. Precondition: `f` is not the zero function.
  fn get_onepath(&mut self, f: Self::F) -> Self::F;

  /// One minterm (as a cube BDD) falsifying `f`. Precondition: `f` is not the one function.
  fn get_zeropath(&mut self, f: Self::F) -> Self::F;

  fn support(&self, f: Self::F) -> Support;

  /// Canonical polarity indicator used to normalize hash-cons keys:
  /// true iff `f`'s underlying representation is the inverted form of
  /// its node's "natural" polarity.
  fn root_inv(&self, f: Self::F) -> bool;
}
