use super::*;

const RED: PremulColor = PremulColor::from_array([1.0, 0.0, 0.0, 1.0]);
const BLUE: PremulColor = PremulColor::from_array([0.0, 0.0, 1.0, 1.0]);

#[test]
fn empty_pipeline_yields_transparent() {
    let mut arena = ScratchArena::new();
    let out = RasterPipeline::new().run(&mut arena, 3).unwrap();
    assert_eq!(out, vec![PremulColor::TRANSPARENT; 3]);
}

#[test]
fn constant_color_fills_partial_batches() {
    let mut arena = ScratchArena::new();
    let mut p = RasterPipeline::new();
    p.append_constant_color(RED);
    let out = p.run(&mut arena, MAX_STRIDE + 3).unwrap();
    assert_eq!(out.len(), MAX_STRIDE + 3);
    assert!(out.iter().all(|c| *c == RED));
}

#[test]
fn store_then_load_round_trips_through_scratch() {
    let mut arena = ScratchArena::new();
    let slot = arena.allocate(4 * MAX_STRIDE);
    let mut p = RasterPipeline::new();
    p.append_constant_color(RED);
    p.append(Stage::StoreSrc(slot));
    p.append_constant_color(BLUE);
    p.append(Stage::LoadDst(slot));
    p.append(Stage::Blend(BlendMode::Dst));
    let out = p.run(&mut arena, 1).unwrap();
    assert_eq!(out[0], RED);
}

#[test]
fn lerp_mixes_secondary_toward_current() {
    let mut arena = ScratchArena::new();
    let slot = arena.allocate(4 * MAX_STRIDE);
    let mut p = RasterPipeline::new();
    p.append_constant_color(RED);
    p.append(Stage::StoreSrc(slot));
    p.append_constant_color(BLUE);
    p.append(Stage::LoadDst(slot));
    p.append(Stage::Lerp1Float(0.25));
    let out = p.run(&mut arena, 2).unwrap();
    let want = PremulColor::from_array([0.75, 0.0, 0.25, 1.0]);
    assert!(out.iter().all(|c| c.approx_eq(want, 1e-6)), "{out:?}");
}

#[test]
fn undersized_slot_is_rejected() {
    let mut arena = ScratchArena::new();
    let slot = arena.allocate(4);
    let mut p = RasterPipeline::new();
    p.append(Stage::StoreSrc(slot));
    let err = p.run(&mut arena, 1).unwrap_err();
    assert!(err.to_string().contains("store_src"));
}

#[test]
fn stage_names_are_stable() {
    assert_eq!(Stage::Lerp1Float(0.5).name(), "lerp_1_float");
    assert_eq!(Stage::Blend(BlendMode::Xor).name(), "blend");
}

fn stored_red_pipeline(arena: &mut ScratchArena) -> RasterPipeline {
    let slot = arena.allocate(4 * MAX_STRIDE);
    let mut p = RasterPipeline::new();
    p.append_constant_color(RED);
    p.append(Stage::StoreSrc(slot));
    p.append_constant_color(BLUE);
    p.append(Stage::LoadDst(slot));
    p.append(Stage::Blend(BlendMode::SrcOver));
    p
}

#[test]
fn running_against_another_arena_is_an_error() {
    let mut built_with = ScratchArena::new();
    let p = stored_red_pipeline(&mut built_with);

    let err = p.run(&mut ScratchArena::new(), 1).unwrap_err();
    assert!(matches!(err, ComposeError::Pipeline(_)));
    assert!(err.to_string().contains("not part of the arena"), "{err}");

    assert!(p.run(&mut built_with, 1).is_ok());
}

#[test]
fn running_after_reset_is_an_error() {
    let mut arena = ScratchArena::new();
    let p = stored_red_pipeline(&mut arena);
    arena.reset();

    let mut out = [BLUE; 2];
    let err = p.run_into(&mut arena, &mut out).unwrap_err();
    assert!(matches!(err, ComposeError::Pipeline(_)));
    assert_eq!(out, [BLUE; 2]);
}
