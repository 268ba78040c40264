mod error;

use std::fmt;

use cmdf::{Handler, Key, LoadedArguments, Mode, OptionDescriptor, Outcome, Stream};
use lazy_format::lazy_format;
use tracing_subscriber::{EnvFilter, fmt as subscriber};

use crate::error::PlanError;

const WHERE: Key = Key::short('w');
const OUTPUT: Key = Key::short('o');
const FOLDER: Key = Key::short('f');
const MODULE: Key = Key::short('M');
const MOD: Key = Key::short('m');
const VERBOSE: Key = Key::short('v');
const VERBOSE_PLUS: Key = Key::short('V');
const WALL: Key = Key::short('W');

// No sensible letter for this one
const VSCODE: Key = Key::code(2);

static OPTIONS: &[OptionDescriptor<'static>] = &[
    OptionDescriptor::new("where", WHERE)
        .optional()
        .arity(1)
        .description("Where to create the project"),
    OptionDescriptor::alias("output", OUTPUT),
    OptionDescriptor::alias("folder", FOLDER),
    OptionDescriptor::new("module", MODULE)
        .optional()
        .arity(1)
        .description("To generate a module template in the folder specified"),
    OptionDescriptor::alias("mod", MOD),
    OptionDescriptor::new("verbose", VERBOSE)
        .optional()
        .description("Verbose mode"),
    OptionDescriptor::new("verbose+", VERBOSE_PLUS)
        .optional()
        .description("Verbose plus mode"),
    OptionDescriptor::new("Wall", WALL)
        .optional()
        .description("Wall error mode"),
    OptionDescriptor::new("vscode", VSCODE)
        .optional()
        .no_char_key()
        .description("Visual studio code .vscode folder with .json configuration files"),
];

const USAGE: &str = "Usage: [-w,-o,-f] for project or [-M,-m] for module [FILEPATH] [OPTIONS...]";
const VERSION: &str = "v1.0 - 10/08/2020";
const CONTACT: &str = "Repo: https://github.com/Joao-Peterson/CMD-Friend";

/// Everything collected from the command line
#[derive(Debug, Default)]
struct Arguments<'arg> {
    project: Option<&'arg str>,
    module: Option<&'arg str>,
    vscode: bool,
    verbose: bool,
    verbose_plus: bool,
    wall: bool,
    extra: Vec<&'arg str>,
}

impl<'arg> Handler<'arg> for Arguments<'arg> {
    fn handle(&mut self, key: Key, argument: Option<&'arg str>, index: usize) {
        tracing::debug!(%key, ?argument, index, "option");

        match key {
            Key::POSITIONAL => self.extra.extend(argument),
            WHERE | OUTPUT | FOLDER => self.project = argument,
            MODULE | MOD => self.module = argument,
            VERBOSE => self.verbose = true,
            VERBOSE_PLUS => self.verbose_plus = true,
            WALL => self.wall = true,
            VSCODE => self.vscode = true,
            _ => tracing::warn!(%key, "option without a handler"),
        }
    }
}

/// What to generate, and where
#[derive(Debug)]
enum Target<'arg> {
    Project(&'arg str),
    Module(&'arg str),
}

impl<'arg> Arguments<'arg> {
    fn target(&self) -> Result<Target<'arg>, PlanError> {
        match (self.project, self.module) {
            (Some(project), None) => Ok(Target::Project(project)),
            (None, Some(module)) => Ok(Target::Module(module)),
            (None, None) => Err(PlanError::NothingToGenerate),
            (Some(project), Some(module)) => Err(PlanError::Conflict {
                project: project.to_owned(),
                module: module.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Arguments<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yes_no = |set: bool| match set {
            true => "yes",
            false => "no",
        };

        let target = lazy_format!(match (self.target()) {
            Ok(Target::Project(path)) => "project in {path}",
            Ok(Target::Module(path)) => "module in {path}",
            Err(_) => "nothing",
        });

        writeln!(f, "generating: {target}")?;
        writeln!(f, "vscode folder: {}", yes_no(self.vscode))?;
        writeln!(f, "verbose: {}", yes_no(self.verbose))?;
        writeln!(f, "verbose+: {}", yes_no(self.verbose_plus))?;
        writeln!(f, "Wall: {}", yes_no(self.wall))?;

        self.extra
            .iter()
            .try_for_each(|extra| writeln!(f, "extra argument: {extra}"))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    subscriber()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mode = Mode::new().stream(Stream::Stdout);
    let info = cmdf::configure(Some(USAGE), Some(VERSION), Some(CONTACT));
    let arguments = LoadedArguments::from_env();
    let mut parsed = Arguments::default();

    let outcome = cmdf::run(OPTIONS, arguments.tail(), &mut parsed, &mode, &info)?;

    if outcome == Outcome::Informational {
        return Ok(());
    }

    let target = parsed.target()?;
    tracing::info!(?target, "plan ready");
    print!("{parsed}");

    Ok(())
}
