//! Concrete pre-hooks and post-hooks wired into the dispatch façade's
//! pipeline, in a fixed registration order.

pub mod post;
pub mod pre;
