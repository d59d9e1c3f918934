use clap::{
    crate_authors,
    crate_description,
    crate_name,
    crate_version,
    Args,
    Parser,
};

pub mod auction;
pub mod server;

#[cfg(test)]
pub use auction::MockDurationSource;
pub use auction::{
    ConfigError,
    DurationSource,
    EnvDuration,
    FixedDuration,
};

// `Options` is a struct definition to provide clean command-line args for the server.
#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
pub enum Options {
    /// Run the auction expiration server.
    Run(RunOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    #[command(flatten)]
    pub auction: auction::Options,
}
