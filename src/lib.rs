//! Disjoint-support decomposition of Boolean functions represented as
//! BDDs: given a function's BDD, builds a rooted DAG of OR/XOR/CPLX
//! nodes over positive literals such that every OR/XOR node's children
//! have pairwise disjoint supports and the decomposition is maximal.
//!
//! The engine itself (`dg`) never touches a concrete BDD package; it
//! is generic over the [`bdd::Bdd`] trait. [`bdd::manager::BddMgr`] is
//! a small reference ROBDD implementation so this crate is testable
//! standalone.
pub mod bdd;
pub mod dg;
pub mod support;
pub mod vid;

pub use bdd::{Bdd, BddMgr};
pub use dg::{DgConfig, DgEdge, DgMgr};
pub use support::Support;
pub use vid::VID;
