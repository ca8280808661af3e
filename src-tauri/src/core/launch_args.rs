use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "ttth", disable_help_flag = true, disable_version_flag = true)]
struct RawLaunchArgs {
    /// Echo log records to stderr.
    #[arg(long, short)]
    verbose: bool,

    /// Positional words. `verbose`, `--verbose` and `-v` are accepted here as well.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    rest: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    pub verbose: bool,
    /// Arguments the shell does not understand; logged once the logger is up.
    pub ignored: Vec<String>,
}

/// Never fails: anything unparseable is reported in `ignored`.
pub fn parse<I, T>(args: I) -> LaunchOptions
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let raw = match RawLaunchArgs::try_parse_from(&args) {
        Ok(raw) => raw,
        Err(_) => {
            return LaunchOptions {
                verbose: false,
                ignored: args.into_iter().skip(1).collect(),
            }
        }
    };

    let mut options = LaunchOptions {
        verbose: raw.verbose,
        ignored: Vec::new(),
    };
    // Everything after the first positional lands in `rest`, flags included.
    for word in raw.rest {
        if matches!(word.as_str(), "verbose" | "--verbose" | "-v") {
            options.verbose = true;
        } else {
            options.ignored.push(word);
        }
    }
    options
}

pub fn from_env() -> LaunchOptions {
    parse(std::env::args())
}
