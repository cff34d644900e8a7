//! Core 2-D interactive particle field library.
//!
//! Main components:
//! - [`point`] — a single particle with its rest anchor.
//! - [`field`] — the full set of points generated for a surface size.
//! - [`pointer`] — the (possibly absent) pointer and its influence radius.
//! - [`simulate`] — per-frame repulsion and return-to-rest.
//! - [`render`] — the drawing-surface trait, points and proximity lines.
//! - [`frame_loop`] — the clear / simulate / render / connect / reschedule driver.
//! - [`config`] — tunable constants for generation, forces and colors.
//! - [`error`] — configuration errors.
//! - [`types`] — shared color and stroke types.

pub mod config;
pub mod error;
pub mod field;
pub mod frame_loop;
pub mod point;
pub mod pointer;
pub mod render;
pub mod simulate;
pub mod types;
