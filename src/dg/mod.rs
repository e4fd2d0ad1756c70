//! The disjoint decomposition graph: nodes, edges, the hash-consing
//! node store, the node builders, the boundary analyzer used by the
//! merge engine's last resort, the merge engine itself, and the
//! decomposition manager that drives it all.
pub mod boundary;
pub mod builders;
pub mod edge;
pub mod merge;
pub mod mgr;
pub mod node;
pub mod store;

pub use builders::{make_cplx, make_lit, make_lit_and, make_lit_or, make_lit_xor, make_or, make_xor};
pub use edge::DgEdge;
pub use mgr::{DgConfig, DgMgr};
pub use node::{DgNode, NodeId, NodeKind};
pub use store::NodeStore;
