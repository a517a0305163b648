//! Environment and module format combinations
//!
//! Raw `--env` / `--format` values are untrusted. A [`CombinationResolver`]
//! turns them into a [`Combination`], which can only hold one of the pairs
//! the template tree ships an entry point for.

use std::fmt;
use thiserror::Error;

/// Target runtime of the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    /// Cloudflare Workers
    #[default]
    Cfw,
    Deno,
    Node,
}

impl Environment {
    pub const ALL: [Environment; 3] = [Environment::Cfw, Environment::Deno, Environment::Node];

    /// Token used in template file names and `--env` flags
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Cfw => "cfw",
            Environment::Deno => "deno",
            Environment::Node => "node",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Environment::Cfw => "Cloudflare Workers",
            Environment::Deno => "Deno",
            Environment::Node => "Node.js",
        }
    }

    /// Formats this runtime can be built for, default first
    pub fn formats(&self) -> &'static [Format] {
        match self {
            Environment::Cfw => &[Format::Esm, Format::Sw],
            Environment::Deno => &[Format::Esm],
            Environment::Node => &[Format::Esm, Format::Cjs],
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cfw" | "cloudflare" | "workers" => Some(Environment::Cfw),
            "deno" => Some(Environment::Deno),
            "node" | "nodejs" => Some(Environment::Node),
            _ => None,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Module packaging of the build output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// ES module (Cloudflare "modules worker")
    #[default]
    Esm,
    /// Service worker script
    Sw,
    /// CommonJS
    Cjs,
}

impl Format {
    /// Token used in template file names and `--format` flags
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Esm => "esm",
            Format::Sw => "sw",
            Format::Cjs => "cjs",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Format::Esm => "ES Module",
            Format::Sw => "Service Worker",
            Format::Cjs => "CommonJS",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "esm" | "module" | "modules" | "modulesworker" => Some(Format::Esm),
            "sw" | "serviceworker" | "service-worker" => Some(Format::Sw),
            "cjs" | "commonjs" => Some(Format::Cjs),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical, supported (environment, format) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Combination {
    env: Environment,
    format: Format,
}

impl Combination {
    /// Returns `None` for pairs the template tree has no entry point for
    pub fn new(env: Environment, format: Format) -> Option<Self> {
        env.formats()
            .contains(&format)
            .then_some(Self { env, format })
    }

    pub fn env(&self) -> Environment {
        self.env
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Every supported pair
    pub fn all() -> impl Iterator<Item = Combination> {
        Environment::ALL.into_iter().flat_map(|env| {
            env.formats()
                .iter()
                .map(move |&format| Combination { env, format })
        })
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.env, self.format)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComboError {
    #[error("Unknown environment \"{0}\". Expected one of: cfw, deno, node")]
    UnknownEnvironment(String),

    #[error("Unknown format \"{0}\". Expected one of: esm, sw, cjs")]
    UnknownFormat(String),

    #[error("The \"{env}\" environment does not support the \"{format}\" format")]
    Unsupported { env: Environment, format: Format },
}

/// Maps raw environment/format input to a canonical pair
pub trait CombinationResolver: Send + Sync {
    fn resolve(&self, env: Option<&str>, format: Option<&str>)
        -> Result<Combination, ComboError>;
}

/// Default resolver: aliases are case-insensitive, missing values fall back
/// to `cfw` and `esm`
#[derive(Debug, Clone, Copy, Default)]
pub struct Combos;

impl CombinationResolver for Combos {
    fn resolve(
        &self,
        env: Option<&str>,
        format: Option<&str>,
    ) -> Result<Combination, ComboError> {
        let env = match env {
            Some(raw) => Environment::parse(raw)
                .ok_or_else(|| ComboError::UnknownEnvironment(raw.to_string()))?,
            None => Environment::default(),
        };
        let format = match format {
            Some(raw) => {
                Format::parse(raw).ok_or_else(|| ComboError::UnknownFormat(raw.to_string()))?
            }
            None => Format::default(),
        };

        Combination::new(env, format).ok_or(ComboError::Unsupported { env, format })
    }
}
