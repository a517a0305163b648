//! Entry-point template selection and build flag derivation

use crate::combos::{Combination, Environment, Format};
use std::fmt;

/// Source language of the generated entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    JavaScript,
    TypeScript,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::JavaScript, Language::TypeScript];

    pub fn from_typescript(typescript: bool) -> Self {
        if typescript {
            Language::TypeScript
        } else {
            Language::JavaScript
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::TypeScript => "ts",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which template file becomes the project's entry point, and how to build it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Path relative to the template directory
    pub input: String,
    /// Path relative to the project directory
    pub output: String,
    pub flags: String,
}

pub fn select_template(combo: Combination, language: Language) -> Selection {
    let ext = language.extension();
    Selection {
        input: format!("src/{}.{}.{}", combo.env(), combo.format(), ext),
        output: format!("src/index.{}", ext),
        flags: derive_flags(combo),
    }
}

/// Build tool flags for whatever differs from the defaults, env first
pub fn derive_flags(combo: Combination) -> String {
    let mut flags = Vec::new();
    if combo.env() != Environment::default() {
        flags.push(format!("--env {}", combo.env()));
    }
    if combo.format() != Format::default() {
        flags.push(format!("--format {}", combo.format()));
    }
    flags.join(" ")
}
