//! # Type Descriptor Engine
//!
//! Interprets a [`TypeDescriptor`] to synthesize default values, validate arbitrary
//! `serde_json::Value`s and apply immutable structural edits. All three operations are exhaustive
//! matches over the descriptor's three shapes.
//!
//! - [`type_descriptor`]: the descriptor enum, its JSON wire shape and [`PathSegment`].
//! - [`defaults`]: default value synthesis.
//! - [`validate`](mod@validate): conformance checking.
//! - [`update`]: path-based updates, list removal and append.

pub mod defaults;
pub mod type_descriptor;
pub mod update;
pub mod validate;

pub use defaults::{synthesize_default, synthesize_default_raw};
pub use type_descriptor::{PathSegment, PrimitiveKind, TypeDescriptor, display_path};
pub use update::{append_at_path, remove_at_path, update_at_path};
pub use validate::{validate, validate_raw};
