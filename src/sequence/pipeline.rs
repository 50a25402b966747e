use std::{collections::BTreeSet, path::PathBuf};

use rayon::prelude::*;

use crate::{
    assets::decode::decode_raster,
    encode::gif::{FrameDescriptor, SequenceAssembler},
    foundation::{
        core::Rgb8,
        error::{SeqgifError, SeqgifResult},
    },
    overlay::{
        geometry::plan_indicators,
        render::{IndicatorStyle, render_indicators},
    },
    raster::indexed::Raster,
    sequence::request::{DecodeFailurePolicy, SequenceRequest, ValidInput},
};

/// Threading controls for per-frame work.
#[derive(Clone, Debug)]
pub struct SequenceThreading {
    /// Decode and draw frames on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for SequenceThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

/// Per-frame processing options.
#[derive(Clone, Debug)]
pub struct SequenceOptions {
    pub add_indicator: bool,
    pub style: IndicatorStyle,
    pub background: Rgb8,
    pub on_decode_failure: DecodeFailurePolicy,
    pub threading: SequenceThreading,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self {
            add_indicator: false,
            style: IndicatorStyle::default(),
            background: Rgb8::WHITE,
            on_decode_failure: DecodeFailurePolicy::default(),
            threading: SequenceThreading::default(),
        }
    }
}

impl SequenceOptions {
    pub fn from_request(request: &SequenceRequest, threading: SequenceThreading) -> Self {
        Self {
            add_indicator: request.add_indicator,
            style: request.indicator_style,
            background: request.background(),
            on_decode_failure: request.on_decode_failure,
            threading,
        }
    }
}

/// Frames ready for assembly, plus the inputs that failed to decode.
#[derive(Clone, Debug, Default)]
pub struct FrameBatch {
    pub frames: Vec<FrameDescriptor>,
    pub failed: Vec<PathBuf>,
}

/// Result of [`create_sequence`].
#[derive(Clone, Debug)]
pub struct SequenceOutput {
    /// Encoded animation as produced by the assembler.
    pub gif: Vec<u8>,
    /// Number of frames handed to the assembler.
    pub frames: usize,
    /// Paths dropped before decoding because they were empty or unreadable.
    pub rejected: Vec<PathBuf>,
    /// Paths dropped because they did not decode.
    pub failed: Vec<PathBuf>,
}

/// Decode every input and, when enabled, draw the sequence indicator on it.
///
/// The indicator counts the frames that actually decoded, so a skipped input never leaves a
/// hole in the row. Each row is planned against the part of the frame that stays visible on
/// the first frame's screen, so a larger frame that gets cropped still shows its dots.
/// Output order always equals input order, whatever order workers finish in.
#[tracing::instrument(skip(inputs, opts), fields(inputs = inputs.len()))]
pub fn build_frames(inputs: &[ValidInput], opts: &SequenceOptions) -> SeqgifResult<FrameBatch> {
    let pool = if opts.threading.parallel {
        Some(build_thread_pool(opts.threading.threads)?)
    } else {
        None
    };

    let decoded = ordered_map(inputs.iter().collect(), pool.as_ref(), |_, input| {
        decode_raster(&input.path, opts.background)
    });

    let mut kept = Vec::<(Raster, &ValidInput)>::with_capacity(inputs.len());
    let mut failed = Vec::new();
    for (input, res) in inputs.iter().zip(decoded) {
        match res {
            Ok(raster) => kept.push((raster, input)),
            Err(e) => match opts.on_decode_failure {
                DecodeFailurePolicy::Abort => return Err(e),
                DecodeFailurePolicy::Skip => {
                    tracing::warn!(index = input.index, error = %e, "dropping undecodable frame");
                    failed.push(input.path.clone());
                }
            },
        }
    }
    if kept.is_empty() {
        return Err(SeqgifError::validation("No valid images specified!"));
    }

    let total = kept.len() as i64;
    let screen = kept[0].0.dimensions();
    let frames = ordered_map(kept, pool.as_ref(), |position, (raster, input)| {
        let raster = if opts.add_indicator {
            let (width, height) = visible_area(raster.dimensions(), screen);
            let outcome = plan_indicators(Some(width), Some(height), total, position as i64);
            render_indicators(raster, &outcome, &opts.style)
        } else {
            raster
        };
        FrameDescriptor::new(raster, input.duration)
    });

    Ok(FrameBatch { frames, failed })
}

/// Validate `request`, build its frames and hand them to `assembler`.
#[tracing::instrument(skip_all, fields(images = request.image_path.len()))]
pub fn create_sequence(
    request: &SequenceRequest,
    threading: SequenceThreading,
    assembler: &mut dyn SequenceAssembler,
) -> SeqgifResult<SequenceOutput> {
    let inputs = request.validate()?;
    let valid: BTreeSet<usize> = inputs.iter().map(|i| i.index).collect();
    let rejected = request
        .image_path
        .iter()
        .enumerate()
        .filter(|(i, _)| !valid.contains(i))
        .map(|(_, p)| p.clone())
        .collect();

    let opts = SequenceOptions::from_request(request, threading);
    let batch = build_frames(&inputs, &opts)?;
    let gif = assembler.assemble(&batch.frames, request.loop_count())?;

    tracing::info!(
        frames = batch.frames.len(),
        bytes = gif.len(),
        "sequence assembled"
    );
    Ok(SequenceOutput {
        gif,
        frames: batch.frames.len(),
        rejected,
        failed: batch.failed,
    })
}

/// Top-left anchored part of a `frame` that fits on `screen`.
fn visible_area(frame: (u32, u32), screen: (u32, u32)) -> (u32, u32) {
    (frame.0.min(screen.0), frame.1.min(screen.1))
}

fn ordered_map<T, U, F>(items: Vec<T>, pool: Option<&rayon::ThreadPool>, f: F) -> Vec<U>
where
    T: Send,
    U: Send,
    F: Fn(usize, T) -> U + Sync + Send,
{
    match pool {
        Some(pool) => pool.install(|| {
            items
                .into_par_iter()
                .enumerate()
                .map(|(i, item)| f(i, item))
                .collect()
        }),
        None => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| f(i, item))
            .collect(),
    }
}

fn build_thread_pool(threads: Option<usize>) -> SeqgifResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SeqgifError::validation(
            "sequence threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SeqgifError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/pipeline.rs"]
mod tests;
