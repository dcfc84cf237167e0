pub mod text;

pub use text::{append_bias, binary_targets, load_whitespace, parse_whitespace, split_by_class, stack_rows};
