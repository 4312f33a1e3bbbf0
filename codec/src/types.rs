//! Codec implementations for primitive and composite shapes.

pub mod array;
pub mod bigint;
pub mod empty;
pub mod pointer;
pub mod primitives;
pub mod record;
pub mod slice;
pub mod string;
