pub mod cluster_first;
