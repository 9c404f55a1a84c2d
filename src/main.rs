//! Standalone runtime: attaches overlays to every configured element.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use ambient_fx::{dom, init_logging};

fn main() {
	init_logging();
	dom::attach_when_ready();
}
