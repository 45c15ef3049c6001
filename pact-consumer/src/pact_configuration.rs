use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

pub const DEFAULT_OUTPUT_DIR: &str = "pacts";
pub const OUTPUT_DIR_ENV: &str = "PACT_OUTPUT_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PactV3Options {
    consumer: String,
    provider: String,
    dir: PathBuf,
    strict_sequencing: bool,
}

impl PactV3Options {
    pub fn new<S1: Into<String>, S2: Into<String>>(consumer: S1, provider: S2) -> Self {
        Self {
            consumer: consumer.into(),
            provider: provider.into(),
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            strict_sequencing: false,
        }
    }

    /// Same as [`PactV3Options::new`], but the output directory is taken from
    /// `PACT_OUTPUT_DIR` when it is set.
    pub fn from_env<S1: Into<String>, S2: Into<String>>(consumer: S1, provider: S2) -> Self {
        Self::from_lookup(consumer, provider, |key| env::var_os(key))
    }

    fn from_lookup<S1, S2, F>(consumer: S1, provider: S2, lookup: F) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        F: Fn(&str) -> Option<OsString>,
    {
        let mut options = Self::new(consumer, provider);

        if let Some(dir) = lookup(OUTPUT_DIR_ENV).filter(|dir| !dir.is_empty()) {
            options.set_dir(dir);
        }

        options
    }

    pub fn consumer(&self) -> &str {
        &self.consumer
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn set_dir<P: Into<PathBuf>>(&mut self, dir: P) {
        self.dir = dir.into();
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reject builder calls made out of the description, request, response
    /// order instead of forwarding them to the engine.
    pub fn set_strict_sequencing(&mut self, value: bool) {
        self.strict_sequencing = value;
    }

    pub fn strict_sequencing(&self) -> bool {
        self.strict_sequencing
    }
}
