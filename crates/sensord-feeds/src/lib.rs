//! sensord-feeds — input source adapters for sensord.
//!
//! Every feed produces the same thing: a lazy, unbounded, non-restartable
//! `Stream<Item = Bytes>` of raw chunks, with no line alignment guaranteed.
//! The pipeline is feed-agnostic; which feed runs is a single startup
//! switch, resolved once.

pub mod stdin;
pub mod synthetic;
