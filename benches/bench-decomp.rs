//! Benchmarks the decomposition driver on a handful of representative
//! functions: a flat OR/XOR (cheap, Case1 merges only), a multiplexer
//! (forces CPLX), and a wider sum-of-products (exercises Case2-OR).
use dsd::bdd::manager::BddMgr;
use dsd::vid::named::*;
use dsd::{Bdd, DgMgr};

fn main() {
  divan::main();
}

#[divan::bench]
fn flat_or_of_eight() {
  let mut bdd = BddMgr::new();
  let vars = [x0, x1, x2, x3, x4];
  let mut f = bdd.var(vars[0]);
  for &v in &vars[1..] {
    let vf = bdd.var(v);
    f = bdd.or(f, vf);
  }
  let mut mgr = DgMgr::new(bdd);
  divan::black_box(mgr.decomp(f));
}

#[divan::bench]
fn multiplexer() {
  let mut bdd = BddMgr::new();
  let s = bdd.var(x0);
  let a = bdd.var(x1);
  let b = bdd.var(x2);
  let f = bdd.ite(s, a, b);
  let mut mgr = DgMgr::new(bdd);
  divan::black_box(mgr.decomp(f));
}

#[divan::bench]
fn sum_of_disjoint_products() {
  let mut bdd = BddMgr::new();
  let x0f = bdd.var(x0);
  let x1f = bdd.var(x1);
  let x2f = bdd.var(x2);
  let x3f = bdd.var(x3);
  let p = bdd.and(x0f, x1f);
  let q = bdd.and(x2f, x3f);
  let f = bdd.or(p, q);
  let mut mgr = DgMgr::new(bdd);
  divan::black_box(mgr.decomp(f));
}
