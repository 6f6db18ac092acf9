use std::fmt;

use template::Template;

/// Run-wide configuration values a role may be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    Dem,
    Projection,
    PixelSize,
    DataType,
    Bands,
    LasExtension,
}

impl Setting {
    /// Command-line flag that supplies this setting.
    pub fn flag(&self) -> &'static str {
        match self {
            Self::Dem => "--dem",
            Self::Projection => "--outproj",
            Self::PixelSize => "--pixel-size",
            Self::DataType => "--data-type",
            Self::Bands => "--bands",
            Self::LasExtension => "--laz",
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

/// Explicit locations a user can give instead of relying on directory conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Override {
    /// directory holding `<basename>_mask.bil` files
    Masks,
    /// directory holding post-processed navigation files
    Navigation,
    /// a single view-vector file
    ViewVectors,
}

impl Override {
    pub fn flag(&self) -> &'static str {
        match self {
            Self::Masks => "--inmasks",
            Self::Navigation => "--innav",
            Self::ViewVectors => "--view-vectors",
        }
    }
}

/// How to find an auxiliary directory when no override is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirRule {
    /// the directory containing the item
    ItemDir,
    /// the item's directory with `from` replaced by `to`
    Substitute {
        from: &'static str,
        to: &'static str,
    },
}

/// Where a role's value comes from.
#[derive(Debug, Clone)]
pub enum Source {
    /// absolute path of the item itself
    Input,
    /// item file name without extension
    Basename,
    /// value of an earlier role with `from` replaced by `to`
    Replaced {
        role: &'static str,
        from: &'static str,
        to: &'static str,
    },
    /// `<dir>/<basename><suffix>`; must exist
    Aux {
        overridden_by: Override,
        default: DirRule,
        suffix: &'static str,
    },
    /// the one file with `extension` in a directory, or an explicit file
    OneOf {
        overridden_by: Override,
        default: DirRule,
        extension: &'static str,
    },
    /// an explicitly configured file; must exist
    File(Setting),
    /// `<output dir>/<name>`; terminal outputs must not exist yet
    Output { name: Template, terminal: bool },
    /// configuration value passed through unchanged
    Param(Setting),
    /// requested map projection, with the national grid expanded
    Projection,
    /// filename-safe tag for the requested projection
    ProjectionTag,
}

impl Source {
    /// Roles that must already be resolved before this one.
    pub fn dependencies(&self) -> Vec<&str> {
        match self {
            Self::Replaced { role, .. } => vec![*role],
            Self::Output { name, .. } => name.roles().collect(),
            _ => Vec::with_capacity(0),
        }
    }

    pub fn is_output(&self) -> bool {
        matches!(self, Self::Output { .. })
    }
}

/// A named slot in the pipeline.
#[derive(Debug, Clone)]
pub struct Role {
    pub name: &'static str,
    pub source: Source,
}
