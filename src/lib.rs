//! seqgif assembles an ordered list of still images into one looping animated GIF.
//!
//! Each frame can carry a *sequence indicator*: a row of small dots near the bottom edge,
//! one per frame, with the dot of the current frame drawn solid and the others as rings.
//!
//! # Pipeline overview
//!
//! 1. **Validate**: `SequenceRequest -> Vec<ValidInput>` (unreadable paths are dropped together
//!    with their durations)
//! 2. **Decode**: `path -> Raster` (indexed color, at most 256 table entries)
//! 3. **Overlay** (optional): plan the dot row for the raster's size, resolve two colors
//!    against the raster's own table, draw
//! 4. **Assemble**: `[FrameDescriptor] -> GIF bytes`
//!
//! Frames are independent: decode and overlay run on a rayon pool and results are collected by
//! index, so frame order never depends on which worker finishes first.
//!
//! Overlay drawing never fails. A full color table falls back to the nearest existing entry
//! and degenerate geometry skips the overlay, leaving the frame as decoded.
#![forbid(unsafe_code)]

mod assets;
mod encode;
mod foundation;
mod overlay;
mod raster;
mod sequence;
mod ui;

pub use assets::decode::{decode_raster, decode_raster_bytes, encode_still};
pub use assets::format::ImageFormatKind;
pub use encode::gif::{
    AssembledFrame, FrameDescriptor, GifAssembler, InMemoryAssembler, SequenceAssembler,
};
pub use foundation::core::{FrameDuration, LoopCount, Rgb8};
pub use foundation::error::{SeqgifError, SeqgifResult};
pub use overlay::geometry::{
    IndicatorPlan, MIN_RADIUS, PlanOutcome, SkipReason, plan_for_raster, plan_indicators,
};
pub use overlay::render::{IndicatorStyle, overlay_indicator, render_indicators};
pub use raster::indexed::Raster;
pub use raster::palette::{ColorTable, resolve};
pub use sequence::pipeline::{
    FrameBatch, SequenceOptions, SequenceOutput, SequenceThreading, build_frames,
    create_sequence,
};
pub use sequence::request::{DecodeFailurePolicy, DurationField, SequenceRequest, ValidInput};
pub use ui::page::{render_error_page, render_result_page};
