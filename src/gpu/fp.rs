use crate::{
    blend::{math::blend_px, mode::BlendMode},
    foundation::color::{Color4f, PremulColor},
};

/// Inputs shared by every node request in one lowering pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FpArgs {
    /// Paint color (straight alpha) used where a shader slot is empty.
    pub paint_color: Color4f,
}

/// A node in a fragment-processor graph.
///
/// Nodes own their children. `evaluate` computes the color the node would output for a fragment,
/// which is how the CPU side checks that a lowered graph agrees with the raster pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum FragmentProcessor {
    /// Outputs a constant premultiplied color.
    ConstColor(PremulColor),
    /// Blends the output of `src` onto the output of `dst`.
    ComposeTwo {
        /// Blend mode; never `Clear`, `Src`, or `Dst`.
        mode: BlendMode,
        /// Source child (first input register).
        src: Box<FragmentProcessor>,
        /// Destination child (second input register).
        dst: Box<FragmentProcessor>,
    },
}

impl FragmentProcessor {
    /// Combine two child graphs with `mode`.
    ///
    /// Argument order follows the backend's register convention: source first, destination second.
    /// Trivial modes collapse to a constant or to one of the children.
    pub fn make_from_two_processors(
        src: FragmentProcessor,
        dst: FragmentProcessor,
        mode: BlendMode,
    ) -> FragmentProcessor {
        match mode {
            BlendMode::Clear => Self::ConstColor(PremulColor::TRANSPARENT),
            BlendMode::Src => src,
            BlendMode::Dst => dst,
            _ => Self::ComposeTwo {
                mode,
                src: Box::new(src),
                dst: Box::new(dst),
            },
        }
    }

    /// Node name as a backend would report it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ConstColor(_) => "ConstColorProcessor",
            Self::ComposeTwo { .. } => "ComposeTwoFragmentProcessor",
        }
    }

    /// Number of nodes in this graph, this one included.
    pub fn node_count(&self) -> usize {
        match self {
            Self::ConstColor(_) => 1,
            Self::ComposeTwo { src, dst, .. } => 1 + src.node_count() + dst.node_count(),
        }
    }

    /// Output color of the graph.
    pub fn evaluate(&self) -> PremulColor {
        match self {
            Self::ConstColor(c) => *c,
            Self::ComposeTwo { mode, src, dst } => PremulColor::from_array(blend_px(
                *mode,
                src.evaluate().to_array(),
                dst.evaluate().to_array(),
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gpu/fp.rs"]
mod tests;
