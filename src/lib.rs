//! Timestamped item list backed by a unidirectional data-flow store.
//!
//! - [`mvi`]: store, reducer, action and effect primitives
//! - [`items`]: the item list feature
//! - [`storage`]: the injected item database and its implementations
//! - [`app`], [`cli`], [`config`], [`logging`]: composition for the binary

pub mod app;
pub mod cli;
pub mod config;
pub mod items;
pub mod logging;
pub mod mvi;
pub mod storage;
