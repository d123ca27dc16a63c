pub mod common;
pub mod centrality;
pub mod topology;

pub use common::{GraphView, NodeId};
pub use centrality::{degree, degree_centrality};
pub use topology::restrict_by_degree;
