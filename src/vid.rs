//! Variable identifiers.
//!
//! Unlike a general-purpose BDD package, this crate has no notion of
//! "virtual" variables or reordering: a `VID` is simply the ascending
//! index of an external input, and `VID` order is always variable order.
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VID(u32);

impl VID {
  pub const fn var(i: u32) -> Self { VID(i) }
  pub fn ix(&self) -> usize { self.0 as usize }
  pub fn var_ix(&self) -> u32 { self.0 }
}

impl fmt::Display for VID {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "x{}", self.0) }
}

impl fmt::Debug for VID {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self) }
}

#[allow(non_upper_case_globals)]
pub mod named {
  use super::VID;
  pub const x0: VID = VID::var(0);
  pub const x1: VID = VID::var(1);
  pub const x2: VID = VID::var(2);
  pub const x3: VID = VID::var(3);
  pub const x4: VID = VID::var(4);
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn ordering_matches_index() {
    assert!(VID::var(0) < VID::var(1));
    assert!(VID::var(3) > VID::var(2));
    assert_eq!(VID::var(5).ix(), 5);
  }
}
