pub mod edge_list;
pub mod karger;

pub use edge_list::{parse_edge_list, read_edge_list};
pub use karger::{karger_min_cut, Karger, KargerBuilder, MinCut, Partition, DEFAULT_TRIALS};
