use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use wavyte_compose::Shader as _;

#[derive(Parser, Debug)]
#[command(name = "wavyte-compose", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a shader from a JSON description and write its binary encoding.
    Encode(EncodeArgs),
    /// Decode a binary shader and print its tree and evaluated color.
    Inspect(InspectArgs),
    /// Render a shader (JSON description or binary) to a PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Input shader description JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output binary path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input binary shader.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Paint color used for absent shaders, as `#rrggbb` or `#rrggbbaa`.
    #[arg(long, default_value = "#000000")]
    paint: String,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input shader: `.json` description, anything else is read as binary.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Frame width in pixels.
    #[arg(long, default_value_t = 64)]
    width: u32,

    /// Frame height in pixels.
    #[arg(long, default_value_t = 64)]
    height: u32,

    /// Paint color used for absent shaders, as `#rrggbb` or `#rrggbbaa`.
    #[arg(long, default_value = "#000000")]
    paint: String,

    /// Render rows on a worker pool.
    #[arg(long)]
    parallel: bool,

    /// Worker thread count (implies `--parallel`).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Encode(args) => cmd_encode(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn parse_paint(s: &str) -> anyhow::Result<wavyte_compose::Paint> {
    let color: wavyte_compose::ColorDesc = serde_json::from_value(serde_json::Value::from(s))
        .with_context(|| format!("parse paint color '{s}'"))?;
    Ok(wavyte_compose::Paint::with_color(color.to_color4f()))
}

fn load_shader(path: &Path) -> anyhow::Result<Option<wavyte_compose::SharedShader>> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let desc = wavyte_compose::ShaderDesc::from_path(path)?;
        return desc
            .build()
            .with_context(|| format!("build shader from '{}'", path.display()));
    }

    let bytes =
        std::fs::read(path).with_context(|| format!("read shader '{}'", path.display()))?;
    wavyte_compose::decode_shader(&bytes)
        .with_context(|| format!("decode shader '{}'", path.display()))
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let desc = wavyte_compose::ShaderDesc::from_path(&args.in_path)?;
    let shader = desc.build()?;
    let bytes = wavyte_compose::encode_shader(shader.as_deref());

    ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, &bytes)
        .with_context(|| format!("write shader '{}'", args.out.display()))?;

    eprintln!("wrote {} ({} bytes)", args.out.display(), bytes.len());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let paint = parse_paint(&args.paint)?;
    let shader = load_shader(&args.in_path)?;

    let Some(shader) = shader else {
        println!("shader: <absent> (paint color)");
        return Ok(());
    };

    println!("tag:    {}", shader.tag().0);
    println!("opaque: {}", shader.is_opaque());
    println!("tree:   {shader:#?}");

    let px = wavyte_compose::eval_span(Some(shader.as_ref()), &paint, 1)?;
    if let Some(px) = px.first() {
        println!("pixel:  {:?}", px.to_array());
    }

    #[cfg(feature = "gpu")]
    {
        let fp_args = wavyte_compose::FpArgs {
            paint_color: paint.color,
        };
        match shader.as_fragment_processor(&fp_args) {
            Some(fp) => println!("gpu:    {} ({} nodes)", fp.name(), fp.node_count()),
            None => println!("gpu:    unsupported"),
        }
    }

    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let shader = load_shader(&args.in_path)?;

    let opts = wavyte_compose::RenderOpts {
        width: args.width,
        height: args.height,
        paint: parse_paint(&args.paint)?,
        parallel: args.parallel || args.threads.is_some(),
        threads: args.threads,
    };
    let frame = wavyte_compose::render_rgba8(shader.as_deref(), &opts)?;

    ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
