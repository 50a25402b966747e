//! Sequence assembly.
//!
//! Assemblers consume decoded (and possibly overlaid) frames in sequence order.

/// GIF assembler and the assembler trait.
pub mod gif;
