use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Context as _;
use clap::{
    ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum, parser::ValueSource,
};
use imgshow::{
    Composer, CpuBackend, CpuBackendOpts, Directive, DrawableBackend, HeadlessBackend,
    InputSource, LoopExit, LoopOptions, NoInput, PgrepProbe, ProcessProbe, Rgba8, Size,
    StdinInput, build_options, read_directives, read_options, select_startup,
};
use tracing_subscriber::EnvFilter;

/// Exit status when the drawing backend cannot be created.
const EXIT_BACKEND_INIT: u8 = 255;

#[derive(Parser, Debug)]
#[command(
    name = "imgshow",
    version,
    about = "Compose images and text on a fullscreen surface from directives"
)]
struct Cli {
    /// Read directives from a file at this point in the argument order.
    #[arg(short = 'z', long, value_name = "FILE", action = ArgAction::Append)]
    config: Vec<PathBuf>,

    /// Option file for selection mode (`id = name=value;;name=value` lines).
    #[arg(short = 'G', long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Display template replayed for every option.
    #[arg(short = 'T', long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// Option selected at startup.
    #[arg(short = 'F', long, value_name = "ID")]
    select: Option<String>,

    /// Quit as soon as a process with this name is running.
    #[arg(short = 'b', long, value_name = "PROCESS")]
    watch: Option<String>,

    /// Surface size.
    #[arg(long, value_name = "WxH", default_value = "640x480", value_parser = parse_size)]
    size: Size,

    /// Compose without rasterising; prints the last frame's draw list as JSON.
    #[arg(long)]
    headless: bool,

    /// Write every presented frame to this PNG (pixel backend only).
    #[arg(long, value_name = "PNG")]
    output: Option<PathBuf>,

    /// Stop after this many frames.
    #[arg(long, value_name = "N")]
    frames: Option<u64>,

    /// Where navigation commands come from.
    #[arg(long, value_enum, default_value_t = InputChoice::Stdin)]
    input: InputChoice,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InputChoice {
    /// `up`/`down`/`left`/`right`/`a`/`b`/`quit` lines on stdin.
    Stdin,
    None,
}

/// One command-line step, replayed in argument order.
#[derive(Debug)]
enum Step {
    Directive(Directive, String),
    Config(PathBuf),
}

fn parse_size(s: &str) -> Result<Size, String> {
    Size::parse(s).ok_or_else(|| format!("expected WxH with positive sides, got '{s}'"))
}

fn command() -> clap::Command {
    let mut after_help = String::from("Directives (flags mirror these keys):\n\n");
    after_help.push_str(&imgshow::compose::directive::reference());

    let mut cmd = Cli::command()
        .args_override_self(true)
        .after_help(after_help);
    for d in Directive::ALL {
        let mut arg = clap::Arg::new(d.key())
            .long(d.long_flag())
            .help(d.help());
        if d.key().contains('_') {
            arg = arg.alias(d.key());
        }
        if let Some(c) = d.short_flag() {
            arg = arg.short(c);
        }
        arg = match d.switch_value() {
            Some(_) => arg.action(ArgAction::SetTrue),
            None => arg
                .action(ArgAction::Append)
                .value_name(d.value_hint())
                .allow_hyphen_values(true),
        };
        cmd = cmd.arg(arg);
    }
    cmd
}

/// Directive and config flags in the order they were given.
fn ordered_steps(m: &ArgMatches) -> Vec<Step> {
    let mut indexed: Vec<(usize, Step)> = Vec::new();

    for d in Directive::ALL {
        let id = d.key();
        if m.value_source(id) != Some(ValueSource::CommandLine) {
            continue;
        }
        match d.switch_value() {
            Some(value) => {
                if m.get_flag(id)
                    && let Some(idx) = m.index_of(id)
                {
                    indexed.push((idx, Step::Directive(d, value.to_owned())));
                }
            }
            None => {
                if let (Some(idx), Some(values)) = (m.indices_of(id), m.get_many::<String>(id)) {
                    indexed.extend(
                        idx.zip(values)
                            .map(|(i, v)| (i, Step::Directive(d, v.clone()))),
                    );
                }
            }
        }
    }

    if let (Some(idx), Some(paths)) = (m.indices_of("config"), m.get_many::<PathBuf>("config")) {
        indexed.extend(idx.zip(paths).map(|(i, p)| (i, Step::Config(p.clone()))));
    }

    indexed.sort_by_key(|(i, _)| *i);
    indexed.into_iter().map(|(_, s)| s).collect()
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .try_init()
        .ok();
}

fn main() -> ExitCode {
    let matches = command().get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };
    init_tracing(cli.verbose);
    let steps = ordered_steps(&matches);

    let result = if cli.headless {
        let backend = HeadlessBackend::new(cli.size);
        show(backend, &cli, &steps, |b| {
            serde_json::to_string(b.last_frame()).context("serialize frame")
        })
    } else {
        let opts = CpuBackendOpts {
            clear_rgba: Rgba8::BLACK,
            output: cli.output.clone(),
        };
        match CpuBackend::new(cli.size, opts) {
            Ok(backend) => show(backend, &cli, &steps, |_| Ok(String::new())),
            Err(e) => {
                eprintln!("imgshow: backend init failed: {e}");
                return ExitCode::from(EXIT_BACKEND_INIT);
            }
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("imgshow: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn apply_steps<B: DrawableBackend>(composer: &mut Composer<B>, steps: &[Step]) {
    for step in steps {
        match step {
            Step::Directive(d, value) => {
                composer.apply(*d, value);
            }
            Step::Config(path) => match read_directives(path) {
                Ok(lines) => composer.apply_lines(&lines),
                Err(e) => tracing::error!(error = %e, "config file skipped"),
            },
        }
    }
}

fn build_selection<B: DrawableBackend>(
    composer: &mut Composer<B>,
    cli: &Cli,
    options: &Path,
) -> anyhow::Result<()> {
    let template_path = cli
        .template
        .as_deref()
        .context("selection mode needs a display template (-T)")?;
    let template = read_directives(template_path)?;
    let entries = read_options(options)?;
    let count = build_options(composer, &entries, &template)?;
    tracing::info!(count, "options built");
    select_startup(composer, cli.select.as_deref());
    Ok(())
}

fn show<B: DrawableBackend>(
    backend: B,
    cli: &Cli,
    steps: &[Step],
    describe: impl FnOnce(&B) -> anyhow::Result<String>,
) -> anyhow::Result<ExitCode> {
    let mut composer = Composer::new(backend);
    apply_steps(&mut composer, steps);

    if let Some(options) = cli.options.as_deref()
        && let Err(e) = build_selection(&mut composer, cli, options)
    {
        composer.shutdown();
        eprintln!("{}", command().render_usage());
        return Err(e);
    }

    let mut input: Box<dyn InputSource> = match cli.input {
        InputChoice::Stdin => Box::new(StdinInput::spawn()?),
        InputChoice::None => Box::new(NoInput),
    };
    let mut probe = cli.watch.as_deref().map(PgrepProbe::new);
    let opts = LoopOptions {
        max_frames: cli.frames,
        ..LoopOptions::default()
    };

    let exit = imgshow::run(
        &mut composer,
        input.as_mut(),
        probe.as_mut().map(|p| p as &mut dyn ProcessProbe),
        &opts,
    );
    let backend = composer.shutdown();
    let exit = exit?;
    tracing::debug!(?exit, "loop finished");

    let description = describe(&backend)?;
    if !description.is_empty() {
        println!("{description}");
    }
    if let LoopExit::Accepted(id) = exit {
        println!("{id}");
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[path = "../../tests/unit/bin/imgshow.rs"]
mod tests;
