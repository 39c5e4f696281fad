//! Offline block renderer.
//!
//! Feeds a whole file through an [`Effect`] the way a plugin host would:
//! block by block, with either a fixed block size or a deterministic
//! pseudo-random sequence of sizes.

use adt_core::{Effect, StereoSamples};

use crate::{Error, Result};

/// How a stream is chunked into blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockPlan {
    /// Every block has the same size (the last one may be shorter).
    Fixed(usize),
    /// Block sizes drawn uniformly from `min..=max` by a seeded LCG, so the
    /// same seed always yields the same chunking.
    Varying {
        /// Smallest block size.
        min: usize,
        /// Largest block size.
        max: usize,
        /// PRNG seed.
        seed: u32,
    },
}

impl BlockPlan {
    /// Checks that every block the plan yields is at least two samples.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Fixed(n) if n < 2 => {
                Err(Error::InvalidBlockPlan("block size must be at least 2"))
            }
            Self::Varying { min, .. } if min < 2 => {
                Err(Error::InvalidBlockPlan("minimum block size must be at least 2"))
            }
            Self::Varying { min, max, .. } if min > max => {
                Err(Error::InvalidBlockPlan("minimum block size exceeds maximum"))
            }
            _ => Ok(()),
        }
    }

    /// Infinite iterator over the plan's block sizes.
    pub fn sizes(&self) -> BlockSizes {
        let rng_state = match *self {
            Self::Varying { seed, .. } => seed,
            Self::Fixed(_) => 0,
        };
        BlockSizes {
            plan: *self,
            rng_state,
        }
    }

    /// Largest block the plan can yield.
    pub fn max_block(&self) -> usize {
        match *self {
            Self::Fixed(n) => n,
            Self::Varying { max, .. } => max,
        }
    }
}

impl Default for BlockPlan {
    fn default() -> Self {
        Self::Fixed(512)
    }
}

/// Block sizes produced by a [`BlockPlan`].
#[derive(Debug, Clone)]
pub struct BlockSizes {
    plan: BlockPlan,
    rng_state: u32,
}

impl Iterator for BlockSizes {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self.plan {
            BlockPlan::Fixed(n) => Some(n),
            BlockPlan::Varying { min, max, .. } => {
                // Numerical Recipes LCG; upper bits have the longest period.
                self.rng_state = self
                    .rng_state
                    .wrapping_mul(1_664_525)
                    .wrapping_add(1_013_904_223);
                let span = max - min + 1;
                Some(min + (self.rng_state >> 8) as usize % span)
            }
        }
    }
}

/// Counters from the last [`Renderer::render`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Blocks handed to the effect.
    pub blocks: usize,
    /// Smallest block processed.
    pub min_block: usize,
    /// Largest block processed.
    pub max_block: usize,
    /// Silent samples appended per channel to flush latency.
    pub flushed: usize,
}

/// Drives an [`Effect`] over whole [`StereoSamples`] buffers.
///
/// # Example
///
/// ```rust
/// use adt_core::{DelayOffsetProcessor, StereoSamples};
/// use adt_io::{BlockPlan, Renderer};
///
/// let adt = DelayOffsetProcessor::new(8000.0).unwrap();
/// let mut renderer = Renderer::new(adt, BlockPlan::Fixed(64)).unwrap().with_flush(true);
///
/// let input = StereoSamples::from_mono(vec![1.0; 100]);
/// let output = renderer.render(&input).unwrap();
///
/// assert_eq!(output.len(), 140);
/// assert_eq!(output.right[39], 0.0);
/// assert_eq!(output.right[40], 1.0);
/// ```
pub struct Renderer<E: Effect> {
    effect: E,
    plan: BlockPlan,
    flush: bool,
    stats: RenderStats,
}

impl<E: Effect> Renderer<E> {
    /// Creates a renderer around `effect`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBlockPlan`] if the plan could yield blocks the effect
    /// would refuse.
    pub fn new(effect: E, plan: BlockPlan) -> Result<Self> {
        plan.validate()?;
        Ok(Self {
            effect,
            plan,
            flush: false,
            stats: RenderStats::default(),
        })
    }

    /// Appends `latency_samples` of silence to the input so the delayed
    /// tail is emitted and no input is lost.
    pub fn with_flush(mut self, flush: bool) -> Self {
        self.flush = flush;
        self
    }

    /// The block plan.
    pub fn plan(&self) -> BlockPlan {
        self.plan
    }

    /// Stats from the last render.
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// The wrapped effect.
    pub fn effect(&self) -> &E {
        &self.effect
    }

    /// Consumes the renderer, returning the effect.
    pub fn into_effect(self) -> E {
        self.effect
    }

    /// Number of frames [`render`](Self::render) will produce for `input_len`.
    pub fn output_len(&self, input_len: usize) -> usize {
        if self.flush {
            input_len + self.effect.latency_samples()
        } else {
            input_len
        }
    }

    /// Resets the effect and renders `input` into a new buffer.
    pub fn render(&mut self, input: &StereoSamples) -> Result<StereoSamples> {
        self.render_with_progress(input, |_| {})
    }

    /// Like [`render`](Self::render), calling `on_block` with each block's
    /// length after it is processed.
    ///
    /// A trailing block of one sample would be refused, so it is merged
    /// into the block before it. A one-frame input (after flushing) fails
    /// with [`Error::Block`]; an empty input renders to an empty buffer.
    pub fn render_with_progress<F>(
        &mut self,
        input: &StereoSamples,
        mut on_block: F,
    ) -> Result<StereoSamples>
    where
        F: FnMut(usize),
    {
        let mut source = input.clone();
        let flushed = if self.flush {
            let latency = self.effect.latency_samples();
            source.pad_silence(latency);
            latency
        } else {
            0
        };

        let len = source.len();
        let mut output = StereoSamples::silence(len);
        let mut stats = RenderStats {
            flushed,
            min_block: usize::MAX,
            ..RenderStats::default()
        };

        self.effect.reset();

        let mut sizes = self.plan.sizes();
        let mut pos = 0;
        while pos < len {
            let remaining = len - pos;
            let mut n = sizes.next().unwrap_or(remaining).min(remaining);
            if remaining - n == 1 {
                n = remaining;
            }
            let end = pos + n;

            self.effect
                .process_block_stereo(
                    &source.left[pos..end],
                    &source.right[pos..end],
                    &mut output.left[pos..end],
                    &mut output.right[pos..end],
                )
                .map_err(|source| Error::Block {
                    position: pos,
                    source,
                })?;

            stats.blocks += 1;
            stats.min_block = stats.min_block.min(n);
            stats.max_block = stats.max_block.max(n);
            on_block(n);
            pos = end;
        }

        if stats.blocks == 0 {
            stats.min_block = 0;
        }
        self.stats = stats;

        tracing::info!(
            frames = len,
            blocks = stats.blocks,
            min_block = stats.min_block,
            max_block = stats.max_block,
            flushed,
            "render complete"
        );

        Ok(output)
    }
}
