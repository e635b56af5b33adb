use anyhow::{Context, Result, anyhow};
use sbolplot::{
    SO_TERMS, about,
    glyphs::standard_part_renderers,
    part::PartOptions,
    render_dna::LinearRenderer,
    sbol_component::DnaComponent,
    sbol_renderer::SbolRenderer,
    settings::RenderSettings,
    surface::SvgSurface,
};
use serde::Serialize;
use std::{env, fs};

fn usage() {
    eprintln!(
        "Usage:\n  \
  sbolplot_cli --version\n  \
  sbolplot_cli terms\n  \
  sbolplot_cli parts DESIGN [--component DISPLAY_ID] [--opts '<options-json>']\n  \
  sbolplot_cli render-svg DESIGN OUTPUT.svg [--component DISPLAY_ID] [--opts '<options-json>'] [--no-backbone] [--settings PATH]\n\n  \
  DESIGN is SBOL RDF/XML (.xml, .sbol, .rdf), GenBank (.gb, .gbk, .genbank) or JSON (.json)\n  \
  Without --component, the first component that has features is used\n  \
  Tip: pass @file.json instead of inline JSON"
    );
}

fn load_json_arg(value: &str) -> Result<String> {
    if let Some(path) = value.strip_prefix('@') {
        fs::read_to_string(path).with_context(|| format!("Could not read JSON file '{path}'"))
    } else {
        Ok(value.to_string())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text =
        serde_json::to_string_pretty(value).context("Could not serialize JSON output")?;
    println!("{text}");
    Ok(())
}

#[derive(Debug, Default)]
struct RenderArgs {
    positional: Vec<String>,
    component: Option<String>,
    opts: Option<PartOptions>,
    plot_backbone: bool,
    settings: RenderSettings,
}

fn parse_render_args(args: &[String]) -> Result<RenderArgs> {
    let mut parsed = RenderArgs {
        plot_backbone: true,
        ..Default::default()
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--opts" => {
                let value = iter.next().ok_or_else(|| anyhow!("--opts needs a value"))?;
                let text = load_json_arg(value)?;
                let opts: PartOptions = serde_json::from_str(&text)
                    .context("--opts must be a JSON object")?;
                parsed.opts = Some(opts);
            }
            "--component" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--component needs a display id"))?;
                parsed.component = Some(value.clone());
            }
            "--no-backbone" => parsed.plot_backbone = false,
            "--settings" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow!("--settings needs a path"))?;
                parsed.settings = RenderSettings::load_from_path(path)?;
            }
            other if other.starts_with("--") => {
                return Err(anyhow!("Unknown option '{other}'"));
            }
            _ => parsed.positional.push(arg.clone()),
        }
    }
    Ok(parsed)
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() <= 1 {
        usage();
        return Err(anyhow!("Missing command"));
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{}", about::version_cli_text());
        return Ok(());
    }

    let command = args[1].as_str();
    let rest = parse_render_args(&args[2..])?;
    match command {
        "terms" => print_json(&SO_TERMS.summaries()),
        "parts" => {
            let [design_path] = rest.positional.as_slice() else {
                usage();
                return Err(anyhow!("parts expects exactly one DESIGN argument"));
            };
            let component = DnaComponent::load_from_path(design_path, rest.component.as_deref())?;
            let sbol = SbolRenderer::new(LinearRenderer::new(rest.settings));
            let parts = sbol.translate(&component, rest.opts.as_ref())?;
            print_json(&parts)
        }
        "render-svg" => {
            let [design_path, output_path] = rest.positional.as_slice() else {
                usage();
                return Err(anyhow!("render-svg expects DESIGN and OUTPUT.svg"));
            };
            let component = DnaComponent::load_from_path(design_path, rest.component.as_deref())?;
            let mut surface = SvgSurface::new(&rest.settings);
            let sbol = SbolRenderer::new(LinearRenderer::new(rest.settings));
            let (start, end) = sbol.render_sbol(
                &mut surface,
                &component,
                &standard_part_renderers(),
                rest.opts.as_ref(),
                rest.plot_backbone,
            )?;
            fs::write(output_path, surface.to_svg_string())
                .with_context(|| format!("Could not write SVG file '{output_path}'"))?;
            println!("Wrote '{output_path}' (x {start}..{end})");
            Ok(())
        }
        "help" | "--help" | "-h" => {
            usage();
            Ok(())
        }
        other => {
            usage();
            Err(anyhow!("Unknown command '{other}'"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_render_args_component_and_flags() {
        let parsed = parse_render_args(&args(&[
            "design.xml",
            "--component",
            "i13504",
            "out.svg",
            "--no-backbone",
        ]))
        .expect("parse");
        assert_eq!(parsed.positional, vec!["design.xml", "out.svg"]);
        assert_eq!(parsed.component.as_deref(), Some("i13504"));
        assert!(!parsed.plot_backbone);
        assert!(parsed.opts.is_none());
    }

    #[test]
    fn test_parse_render_args_rejects_missing_component_value() {
        let err = parse_render_args(&args(&["design.xml", "--component"])).expect_err("no value");
        assert!(err.to_string().contains("--component"));
        assert!(parse_render_args(&args(&["--colour", "red"])).is_err());
    }
}
