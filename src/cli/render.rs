//! Render command implementation.
//!
//! Runs the loader over each input in parallel. Every input gets its own
//! document; nothing is shared between workers except the read-only config.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use html_upsert::config::UpsertConfig;
use html_upsert::loader::{self, LoaderContext, LoaderOptions, LoaderOutcome};
use html_upsert::logger::ProgressLine;
use html_upsert::{debug, log};
use rayon::prelude::*;

use super::RenderArgs;

/// What happened to one input.
#[derive(Debug)]
pub struct RenderResult {
    pub input: PathBuf,
    pub output: String,
    pub rendered: bool,
}

/// Execute render command
pub fn run_render(args: &RenderArgs, config: &UpsertConfig) -> Result<()> {
    let mut options = config.loader.options()?;
    options.force |= args.force;

    match (&args.output, args.inputs.as_slice()) {
        (None, [input]) => {
            let result = render_file(input, config, &options)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(result.output.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
        (None, _) => bail!("multiple inputs need an output directory (-o)"),
        (Some(out_dir), inputs) => render_batch(inputs, out_dir, config, &options),
    }
}

/// Render one input through the loader.
pub fn render_file(
    input: &Path,
    config: &UpsertConfig,
    options: &LoaderOptions,
) -> Result<RenderResult> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("failed to read `{}`", input.display()))?;
    let ctx = LoaderContext::with_chain(input, &config.loader.chain);

    let outcome = loader::run(&ctx, options, &config.template, &source)
        .with_context(|| format!("failed to render `{}`", input.display()))?;
    let rendered = matches!(outcome, LoaderOutcome::Rendered(_));

    Ok(RenderResult {
        input: input.to_path_buf(),
        output: outcome.into_output(&source).into_owned(),
        rendered,
    })
}

fn render_batch(
    inputs: &[PathBuf],
    out_dir: &Path,
    config: &UpsertConfig,
    options: &LoaderOptions,
) -> Result<()> {
    let targets = output_paths(out_dir, inputs)?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create `{}`", out_dir.display()))?;

    let progress = ProgressLine::new("render", &[("html", inputs.len())]);
    let results = render_each(inputs, &targets, config, options, &progress);
    progress.finish();

    let mut rendered = 0;
    let mut skipped = 0;
    let mut failed = 0;
    for result in &results {
        match result {
            Ok(r) if r.rendered => rendered += 1,
            Ok(_) => skipped += 1,
            Err(e) => {
                failed += 1;
                log!("error"; "{:#}", e);
            }
        }
    }

    log!(
        "render";
        "{} rendered, {} passed through",
        plural_count(rendered, "file"),
        skipped
    );

    if failed > 0 {
        bail!("{} failed", plural_count(failed, "file"));
    }
    Ok(())
}

/// Failed inputs still advance the progress line.
fn render_each(
    inputs: &[PathBuf],
    targets: &[PathBuf],
    config: &UpsertConfig,
    options: &LoaderOptions,
    progress: &ProgressLine,
) -> Vec<Result<RenderResult>> {
    inputs
        .par_iter()
        .zip(targets.par_iter())
        .map(|(input, target)| {
            let result = write_output(input, target, config, options);
            progress.inc("html");
            result
        })
        .collect()
}

fn write_output(
    input: &Path,
    target: &Path,
    config: &UpsertConfig,
    options: &LoaderOptions,
) -> Result<RenderResult> {
    let result = render_file(input, config, options)?;
    fs::write(target, &result.output)
        .with_context(|| format!("failed to write `{}`", target.display()))?;
    debug!("render"; "{} -> {}", result.input.display(), target.display());
    Ok(result)
}

/// One target per input, `<out_dir>/<file name>`. Two inputs sharing a file
/// name would overwrite each other, so that is rejected up front.
fn output_paths(out_dir: &Path, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut seen: HashMap<&std::ffi::OsStr, &Path> = HashMap::new();
    let mut targets = Vec::with_capacity(inputs.len());
    for input in inputs {
        let name = input
            .file_name()
            .with_context(|| format!("`{}` has no file name", input.display()))?;
        if let Some(first) = seen.insert(name, input) {
            bail!(
                "`{}` and `{}` would both be written to `{}`",
                first.display(),
                input.display(),
                out_dir.join(name).display()
            );
        }
        targets.push(out_dir.join(name));
    }
    Ok(targets)
}

fn plural_count(count: usize, noun: &str) -> String {
    let s = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{s}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PAGE: &str = "<html><head></head><body></body></html>";

    fn config(toml: &str) -> UpsertConfig {
        UpsertConfig::from_str(toml).unwrap()
    }

    #[test]
    fn test_render_file_applies_template() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("index.html");
        fs::write(&input, PAGE).unwrap();
        let config = config("[template]\ntitle = \"Hi\"\n");

        let result = render_file(&input, &config, &LoaderOptions::default()).unwrap();

        assert!(result.rendered);
        assert_eq!(
            result.output,
            "<html><head><title>Hi</title></head><body></body></html>"
        );
    }

    #[test]
    fn test_chain_passes_through_unless_forced() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("index.html");
        fs::write(&input, PAGE).unwrap();
        let config = config("[loader]\nchain = [\"posthtml\"]\n\n[template]\ntitle = \"Hi\"\n");

        let skipped = render_file(&input, &config, &LoaderOptions::default()).unwrap();
        assert!(!skipped.rendered);
        assert_eq!(skipped.output, PAGE);

        let forced = LoaderOptions {
            force: true,
            ..Default::default()
        };
        assert!(render_file(&input, &config, &forced).unwrap().rendered);
    }

    #[test]
    fn test_batch_writes_outputs() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.html");
        let b = dir.path().join("b.txt");
        fs::write(&a, PAGE).unwrap();
        fs::write(&b, "plain").unwrap();
        let out = dir.path().join("dist");
        let config = config("[[template.bodyScripts]]\nid = \"app\"\nsrc = \"/app.js\"\nposition = \"end\"\n");

        let args = RenderArgs {
            inputs: vec![a, b],
            output: Some(out.clone()),
            params: None,
            force: false,
        };
        run_render(&args, &config).unwrap();

        assert_eq!(
            fs::read_to_string(out.join("a.html")).unwrap(),
            r#"<html><head></head><body><script id="app" src="/app.js"></script></body></html>"#
        );
        assert_eq!(fs::read_to_string(out.join("b.txt")).unwrap(), "plain");
    }

    #[test]
    fn test_missing_input_fails_batch() {
        let dir = TempDir::new().unwrap();
        let args = RenderArgs {
            inputs: vec![dir.path().join("missing.html")],
            output: Some(dir.path().join("dist")),
            params: None,
            force: false,
        };

        assert!(run_render(&args, &UpsertConfig::default()).is_err());
    }

    #[test]
    fn test_failed_input_counts_toward_progress() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.html");
        fs::write(&good, PAGE).unwrap();
        let inputs = vec![good, dir.path().join("missing.html")];
        let targets = output_paths(dir.path(), &inputs)
            .unwrap()
            .into_iter()
            .map(|t| t.with_extension("out"))
            .collect::<Vec<_>>();

        let progress = ProgressLine::new("render", &[("html", inputs.len())]);
        let results = render_each(
            &inputs,
            &targets,
            &UpsertConfig::default(),
            &LoaderOptions::default(),
            &progress,
        );

        assert_eq!(progress.count("html"), Some(2));
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
        progress.finish();
    }

    #[test]
    fn test_multiple_inputs_need_output() {
        let args = RenderArgs {
            inputs: vec!["a.html".into(), "b.html".into()],
            output: None,
            params: None,
            force: false,
        };
        assert!(run_render(&args, &UpsertConfig::default()).is_err());
    }

    #[test]
    fn test_same_file_name_rejected() {
        let dir = TempDir::new().unwrap();
        for sub in ["a", "b"] {
            fs::create_dir(dir.path().join(sub)).unwrap();
            fs::write(dir.path().join(sub).join("index.html"), PAGE).unwrap();
        }
        let out = dir.path().join("dist");
        let args = RenderArgs {
            inputs: vec![dir.path().join("a/index.html"), dir.path().join("b/index.html")],
            output: Some(out.clone()),
            params: None,
            force: false,
        };

        let err = run_render(&args, &UpsertConfig::default()).unwrap_err();

        assert!(err.to_string().contains("would both be written"));
        assert!(!out.exists());
    }

    #[test]
    fn test_output_paths_by_file_name() {
        let targets = output_paths(
            Path::new("dist"),
            &[PathBuf::from("pages/a.html"), PathBuf::from("b.html")],
        )
        .unwrap();
        assert_eq!(targets, vec![PathBuf::from("dist/a.html"), PathBuf::from("dist/b.html")]);
    }

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(1, "file"), "1 file");
        assert_eq!(plural_count(3, "file"), "3 files");
    }
}
