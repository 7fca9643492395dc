use crate::{
    blend::{math::blend_px, mode::BlendMode},
    foundation::color::PremulColor,
    foundation::error::{ComposeError, ComposeResult},
    pipeline::arena::{ScratchArena, ScratchSlot},
};

/// Number of pixels processed per batch.
///
/// Scratch slots that save a full register set must hold `4 * MAX_STRIDE` floats.
pub const MAX_STRIDE: usize = 8;

/// One unit of per-batch work.
///
/// "Current" registers (`r g b a`) hold the value being produced; "secondary" registers
/// (`dr dg db da`) hold the value a merge stage combines it with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stage {
    /// Set current registers to a constant premultiplied color.
    ConstantColor(PremulColor),
    /// Save current registers into a scratch slot, channel-planar (`r` lanes, then `g`, ...).
    StoreSrc(ScratchSlot),
    /// Load a saved register set from a scratch slot into the secondary registers.
    LoadDst(ScratchSlot),
    /// `current = secondary + t * (current - secondary)` on all four channels.
    Lerp1Float(f32),
    /// Blend current (source) onto secondary (destination), leaving the result in current.
    Blend(BlendMode),
}

impl Stage {
    /// Short stage name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConstantColor(_) => "constant_color",
            Self::StoreSrc(_) => "store_src",
            Self::LoadDst(_) => "load_dst",
            Self::Lerp1Float(_) => "lerp_1_float",
            Self::Blend(_) => "blend",
        }
    }

    fn scratch_slot(&self) -> Option<ScratchSlot> {
        match self {
            Self::StoreSrc(slot) | Self::LoadDst(slot) => Some(*slot),
            _ => None,
        }
    }
}

/// Ordered list of stages executed over batches of [`MAX_STRIDE`] pixels.
#[derive(Clone, Debug, Default)]
pub struct RasterPipeline {
    stages: Vec<Stage>,
}

#[derive(Clone, Copy, Default)]
struct Registers {
    r: [f32; MAX_STRIDE],
    g: [f32; MAX_STRIDE],
    b: [f32; MAX_STRIDE],
    a: [f32; MAX_STRIDE],
    dr: [f32; MAX_STRIDE],
    dg: [f32; MAX_STRIDE],
    db: [f32; MAX_STRIDE],
    da: [f32; MAX_STRIDE],
}

impl RasterPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one stage.
    pub fn append(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    /// Append a stage setting the current registers to `color`.
    pub fn append_constant_color(&mut self, color: PremulColor) {
        self.append(Stage::ConstantColor(color));
    }

    /// Stages in execution order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Return `true` when no stage has been appended.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run the pipeline over `count` pixels and return their premultiplied colors.
    ///
    /// `arena` must be the arena the stages' scratch slots were allocated from.
    pub fn run(&self, arena: &mut ScratchArena, count: usize) -> ComposeResult<Vec<PremulColor>> {
        let mut out = vec![PremulColor::TRANSPARENT; count];
        self.run_into(arena, &mut out)?;
        Ok(out)
    }

    /// Run the pipeline, writing one color per element of `out`.
    ///
    /// Fails without touching `out` when a stage's scratch slot is too small or does not belong
    /// to `arena` (a different arena, or this one after [`ScratchArena::reset`]).
    pub fn run_into(&self, arena: &mut ScratchArena, out: &mut [PremulColor]) -> ComposeResult<()> {
        for stage in &self.stages {
            let Some(slot) = stage.scratch_slot() else {
                continue;
            };
            if slot.len() < 4 * MAX_STRIDE {
                return Err(ComposeError::pipeline(format!(
                    "{} slot holds {} floats, expected {}",
                    stage.name(),
                    slot.len(),
                    4 * MAX_STRIDE
                )));
            }
            if !arena.contains(slot) {
                return Err(ComposeError::pipeline(format!(
                    "{} slot is not part of the arena ({} bytes reserved)",
                    stage.name(),
                    arena.bytes_reserved()
                )));
            }
        }

        for chunk in out.chunks_mut(MAX_STRIDE) {
            let mut regs = Registers::default();
            for stage in &self.stages {
                exec_stage(stage, &mut regs, arena);
            }
            for (i, px) in chunk.iter_mut().enumerate() {
                *px = PremulColor::from_array([regs.r[i], regs.g[i], regs.b[i], regs.a[i]]);
            }
        }
        Ok(())
    }
}

fn exec_stage(stage: &Stage, regs: &mut Registers, arena: &mut ScratchArena) {
    match *stage {
        Stage::ConstantColor(c) => {
            regs.r = [c.r; MAX_STRIDE];
            regs.g = [c.g; MAX_STRIDE];
            regs.b = [c.b; MAX_STRIDE];
            regs.a = [c.a; MAX_STRIDE];
        }
        Stage::StoreSrc(slot) => {
            let mem = arena.slot_mut(slot);
            for (plane, src) in mem
                .chunks_exact_mut(MAX_STRIDE)
                .zip([&regs.r, &regs.g, &regs.b, &regs.a])
            {
                plane.copy_from_slice(src);
            }
        }
        Stage::LoadDst(slot) => {
            let mem = arena.slot(slot);
            for (plane, dst) in mem
                .chunks_exact(MAX_STRIDE)
                .zip([&mut regs.dr, &mut regs.dg, &mut regs.db, &mut regs.da])
            {
                dst.copy_from_slice(plane);
            }
        }
        Stage::Lerp1Float(t) => {
            for i in 0..MAX_STRIDE {
                regs.r[i] = regs.dr[i] + t * (regs.r[i] - regs.dr[i]);
                regs.g[i] = regs.dg[i] + t * (regs.g[i] - regs.dg[i]);
                regs.b[i] = regs.db[i] + t * (regs.b[i] - regs.db[i]);
                regs.a[i] = regs.da[i] + t * (regs.a[i] - regs.da[i]);
            }
        }
        Stage::Blend(mode) => {
            // Mode dispatch happens inside `blend_px`; the branch is uniform across lanes.
            for i in 0..MAX_STRIDE {
                let s = [regs.r[i], regs.g[i], regs.b[i], regs.a[i]];
                let d = [regs.dr[i], regs.dg[i], regs.db[i], regs.da[i]];
                let [r, g, b, a] = blend_px(mode, s, d);
                regs.r[i] = r;
                regs.g[i] = g;
                regs.b[i] = b;
                regs.a[i] = a;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/raster.rs"]
mod tests;
