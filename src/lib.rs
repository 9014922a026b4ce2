//! # car-seq
//!
//! Car sequencing optimization library: assign a fixed multiset of car
//! classes to an ordered line of slots so that, for every option, no window
//! of `q` consecutive slots contains more than `p` cars requiring that
//! option. The crate provides the incremental constraint-evaluation engine
//! that search strategies (local search, GRASP, ant construction, VNS) build
//! on: a cached per-window violation matrix that can be rebuilt from scratch
//! or patched in place after a local perturbation.
//!
//! ## Modules
//!
//! - [`models`] — Problem definition ([`models::Instance`]) and mutable
//!   solution state ([`models::SequenceState`])
//! - [`evaluation`] — Full evaluation and the three delta evaluators
//!   (swap, relocate, reverse), with apply/undo dispatch
//! - [`moves`] — Move descriptors with validation, pruned neighborhood
//!   enumeration, and random move selection
//! - [`construction`] — Incremental left-to-right sequence growth for
//!   constructive heuristics

pub mod construction;
pub mod evaluation;
pub mod models;
pub mod moves;
