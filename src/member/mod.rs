pub mod filtered_set;
