//! JSON document helpers: strategy-based deep merge and tab-indented file I/O

pub mod file;
pub mod merge;

pub use file::{read_json_object, to_tab_indented, write_json};
pub use merge::{
    deep_merge, merge_into, script_strategy, AppendScript, ConcatArrays, MergeStrategy,
    PrependScript, SCRIPT_SEPARATOR,
};
