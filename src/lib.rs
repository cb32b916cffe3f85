//! Raman-shift processing for Avantes RAW8 spectrum series.
//!
//! A run takes a folder of `.raw8` files, derives the Raman-shift axis of
//! every spectrum, normalizes a selection of them to a reference band and
//! stacks them with a vertical offset, then writes `{folder}.csv` and
//! `{folder}.png` into the folder's parent. See [`pipeline::run`].

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod processing;
pub mod state;
pub mod ui;
