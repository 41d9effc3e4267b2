//! Version stamp shown by the CLI banner and `--version`.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));
