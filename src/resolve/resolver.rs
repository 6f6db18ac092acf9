use std::path::{Path, PathBuf};

use pipeline::{
    ConfigurationError, DirRule, MissingRole, Override, PipelineSpec, ResolvedPaths, Role,
    Setting, Source,
};

use crate::discover::Item;
use crate::error::ItemError;
use crate::fs::Fs;

use super::{disambiguate, Conventions, ResolutionError};

/// Projection keyword for the British National Grid, which needs a transform grid file.
pub const NATIONAL_GRID: &str = "osng";

/// `PathResolver` computes every role a pipeline declares for one item.
///
/// Roles are resolved in declaration order, so output names can be built
/// from anything declared before them. Inputs must exist; terminal outputs
/// must not, so re-running a batch skips finished items instead of
/// overwriting them.
pub struct PathResolver<'a> {
    conventions: &'a Conventions,
    pipeline: &'a PipelineSpec,
    fs: &'a Fs,
}

impl<'a> PathResolver<'a> {
    pub fn new(conventions: &'a Conventions, pipeline: &'a PipelineSpec, fs: &'a Fs) -> Self {
        Self {
            conventions,
            pipeline,
            fs,
        }
    }

    /// Check the run-wide settings every item depends on: required settings
    /// are present and a national grid projection has its transform grid.
    /// Run once before any item, so a bad configuration can't be hidden
    /// behind per-item failures.
    pub fn check_configuration(&self) -> Result<(), ConfigurationError> {
        for role in &self.pipeline.roles {
            match &role.source {
                Source::File(setting) => {
                    self.conventions
                        .file(*setting)
                        .ok_or(ConfigurationError::MissingSetting(*setting))?;
                }
                Source::Param(setting) => {
                    self.conventions
                        .param(*setting)
                        .ok_or(ConfigurationError::MissingSetting(*setting))?;
                }
                Source::Projection => {
                    self.projection()?;
                }
                Source::ProjectionTag => {
                    self.requested_projection()?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn resolve(&self, item: &Item) -> Result<ResolvedPaths, ItemError> {
        let mut resolved = ResolvedPaths::with_capacity(self.pipeline.roles.len());
        for role in &self.pipeline.roles {
            let value = self.resolve_role(item, role, &resolved)?;
            log::debug!("{}: {} = {}", item.basename, role.name, value);
            resolved.insert(role.name, value)?;
        }
        Ok(resolved)
    }

    fn resolve_role(
        &self,
        item: &Item,
        role: &Role,
        resolved: &ResolvedPaths,
    ) -> Result<String, ItemError> {
        let value = match &role.source {
            Source::Input => {
                self.require_file(role.name, &item.path)?;
                path_string(&item.path)?
            }
            Source::Basename => item.basename.clone(),
            Source::Replaced { role: base, from, to } => resolved
                .get(base)
                .ok_or_else(|| ConfigurationError::UnresolvedRole(base.to_string()))?
                .replace(from, to),
            Source::Aux {
                overridden_by,
                default,
                suffix,
            } => {
                let dir = match self.conventions.override_path(*overridden_by) {
                    Some(dir) => dir.to_path_buf(),
                    None => derive_dir(item, role.name, *overridden_by, default)?,
                };
                let path = dir.join(format!("{}{}", item.basename, suffix));
                self.require_file(role.name, &path)?;
                path_string(&path)?
            }
            Source::OneOf {
                overridden_by,
                default,
                extension,
            } => {
                let path = match self.conventions.override_path(*overridden_by) {
                    Some(file) => {
                        self.require_file(role.name, file)?;
                        file.to_path_buf()
                    }
                    None => self.choose_candidate(item, role.name, *overridden_by, default, extension)?,
                };
                path_string(&path)?
            }
            Source::File(setting) => {
                let path = self
                    .conventions
                    .file(*setting)
                    .ok_or(ConfigurationError::MissingSetting(*setting))?;
                self.require_file(role.name, path)?;
                path_string(path)?
            }
            Source::Output { name, terminal } => {
                let name = name
                    .render(|r| resolved.get(r))
                    .map_err(|MissingRole(r)| ConfigurationError::UnresolvedRole(r))?;
                let path = self.fs.output(&name);
                if *terminal && self.fs.exists(&path) {
                    return Err(ResolutionError::AlreadyProcessed { path }.into());
                }
                path_string(&path)?
            }
            Source::Param(setting) => self
                .conventions
                .param(*setting)
                .ok_or(ConfigurationError::MissingSetting(*setting))?,
            Source::Projection => self.projection()?,
            Source::ProjectionTag => projection_tag(&self.requested_projection()?),
        };
        Ok(value)
    }

    /// Pick the single candidate file in the conventional directory.
    fn choose_candidate(
        &self,
        item: &Item,
        role: &str,
        overridden_by: Override,
        default: &DirRule,
        extension: &str,
    ) -> Result<PathBuf, ResolutionError> {
        let dir = derive_dir(item, role, overridden_by, default)?;
        let candidates = if self.fs.is_dir(&dir) {
            self.fs.list_files(&dir, &format!(".{extension}"))?
        } else {
            Vec::with_capacity(0)
        };
        log::debug!("{}: {} candidate {role} files in {dir:?}", item.basename, candidates.len());
        disambiguate(candidates, item).map_err(|a| a.into_error(role, &dir, overridden_by.flag()))
    }

    fn requested_projection(&self) -> Result<String, ConfigurationError> {
        self.conventions
            .param(Setting::Projection)
            .ok_or(ConfigurationError::MissingSetting(Setting::Projection))
    }

    /// The projection as passed to the transform tool. The national grid
    /// is expanded to name its transform grid file, which must exist.
    fn projection(&self) -> Result<String, ConfigurationError> {
        let requested = self.requested_projection()?;
        if !requested.eq_ignore_ascii_case(NATIONAL_GRID) {
            return Ok(requested);
        }
        let grid = &self.conventions.transform_grid;
        if !self.fs.is_file(grid) {
            return Err(ConfigurationError::MissingTransformGrid(grid.clone()));
        }
        Ok(format!("{NATIONAL_GRID} {}", grid.display()))
    }

    fn require_file(&self, role: &str, path: &Path) -> Result<(), ResolutionError> {
        if self.fs.is_file(path) {
            Ok(())
        } else {
            Err(ResolutionError::MissingFile {
                role: role.to_owned(),
                path: path.to_path_buf(),
            })
        }
    }
}

/// Filename-safe tag for a projection: `osng` for anything naming the national
/// grid in lower case, otherwise the projection with whitespace removed.
pub fn projection_tag(projection: &str) -> String {
    if projection.contains(NATIONAL_GRID) {
        NATIONAL_GRID.to_owned()
    } else {
        projection.split_whitespace().collect()
    }
}

/// Conventional location of an auxiliary directory relative to the item.
fn derive_dir(
    item: &Item,
    role: &str,
    overridden_by: Override,
    rule: &DirRule,
) -> Result<PathBuf, ResolutionError> {
    match rule {
        DirRule::ItemDir => Ok(item.dir().to_path_buf()),
        DirRule::Substitute { from, to } => {
            let dir = path_string(item.dir())?;
            if !dir.contains(from) {
                return Err(ResolutionError::NoConvention {
                    role: role.to_owned(),
                    dir: item.dir().to_path_buf(),
                    pattern: *from,
                    flag: overridden_by.flag(),
                });
            }
            Ok(PathBuf::from(dir.replace(from, to)))
        }
    }
}

fn path_string(path: &Path) -> Result<String, ResolutionError> {
    path.to_str()
        .map(str::to_owned)
        .ok_or_else(|| ResolutionError::PathEncoding(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline::presets;
    use std::fs::{create_dir_all, write};
    use tempfile::{tempdir, TempDir};

    /// A delivery laid out the way the APL pipeline expects:
    /// flightlines/level1b, flightlines/navigation, sensor_FOV_vectors.
    struct Delivery {
        root: TempDir,
    }

    impl Delivery {
        fn new() -> anyhow::Result<Self> {
            let root = tempdir()?;
            for dir in ["flightlines/level1b", "flightlines/navigation", "sensor_FOV_vectors", "dem", "out"] {
                create_dir_all(root.path().join(dir))?;
            }
            write(root.path().join("dem/uk.dem"), "")?;
            write(root.path().join("sensor_FOV_vectors/eagle_fov.bil"), "")?;
            write(root.path().join("sensor_FOV_vectors/hawk_fov.bil"), "")?;
            Ok(Self { root })
        }

        fn path(&self, rel: &str) -> PathBuf {
            self.root.path().join(rel)
        }

        fn add_line(&self, name: &str) -> anyhow::Result<Item> {
            write(self.path(&format!("flightlines/level1b/{name}.bil")), "")?;
            write(self.path(&format!("flightlines/level1b/{name}_mask.bil")), "")?;
            write(
                self.path(&format!("flightlines/navigation/{name}_nav_post_processed.bil")),
                "",
            )?;
            Ok(Item::new(self.path(&format!("flightlines/level1b/{name}.bil")))?)
        }

        fn fs(&self) -> Fs {
            Fs::new(&self.path("out"), &self.path("out"))
        }

        fn conventions(&self, projection: &str) -> Conventions {
            Conventions {
                dem: Some(self.path("dem/uk.dem")),
                projection: Some(projection.to_owned()),
                transform_grid: self.path("grid/OSTN02_NTv2.gsb"),
                ..Default::default()
            }
        }
    }

    fn s(path: PathBuf) -> String {
        path.to_str().unwrap().to_owned()
    }

    #[test]
    fn test_resolves_every_role() -> anyhow::Result<()> {
        let d = Delivery::new()?;
        let item = d.add_line("h153a011b")?;
        let pipeline = presets::apl()?;
        let conventions = d.conventions("utm_wgs84N 30");
        let fs = d.fs();
        let resolved = PathResolver::new(&conventions, &pipeline, &fs).resolve(&item)?;

        assert_eq!(resolved.len(), pipeline.roles.len());
        for role in &pipeline.roles {
            assert!(!resolved.get(role.name).unwrap().is_empty(), "{}", role.name);
        }
        assert_eq!(resolved.get("view_vectors"), Some(&*s(d.path("sensor_FOV_vectors/hawk_fov.bil"))));
        assert_eq!(
            resolved.get("navigation"),
            Some(&*s(d.path("flightlines/navigation/h153a011b_nav_post_processed.bil")))
        );
        assert_eq!(resolved.get("mask"), Some(&*s(d.path("flightlines/level1b/h153a011b_mask.bil"))));
        assert_eq!(resolved.get("projection"), Some("utm_wgs84N 30"));
        assert_eq!(resolved.get("igm"), Some(&*s(d.path("out/h153a011b.igm"))));
        assert_eq!(
            resolved.get("mapped"),
            Some(&*s(d.path("out/h153a013b_utm_wgs84N30.bil")))
        );
        Ok(())
    }

    #[test]
    fn test_existing_igm_is_already_processed() -> anyhow::Result<()> {
        let d = Delivery::new()?;
        let item = d.add_line("e153a011b")?;
        write(d.path("out/e153a011b.igm"), "")?;
        let pipeline = presets::apl()?;
        let conventions = d.conventions("utm_wgs84N 30");
        let fs = d.fs();
        let e = PathResolver::new(&conventions, &pipeline, &fs).resolve(&item).unwrap_err();
        assert!(matches!(
            e,
            ItemError::Resolution(ResolutionError::AlreadyProcessed { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_missing_navigation() -> anyhow::Result<()> {
        let d = Delivery::new()?;
        let item = d.add_line("e153a011b")?;
        std::fs::remove_file(d.path("flightlines/navigation/e153a011b_nav_post_processed.bil"))?;
        let pipeline = presets::apl()?;
        let conventions = d.conventions("utm_wgs84N 30");
        let fs = d.fs();
        let e = PathResolver::new(&conventions, &pipeline, &fs).resolve(&item).unwrap_err();
        assert!(matches!(
            e,
            ItemError::Resolution(ResolutionError::MissingFile { ref role, .. }) if role == "navigation"
        ));
        Ok(())
    }

    #[test]
    fn test_override_dirs_and_view_vectors() -> anyhow::Result<()> {
        let d = Delivery::new()?;
        let item = d.add_line("f153a011b")?;
        create_dir_all(d.path("masks"))?;
        write(d.path("masks/f153a011b_mask.bil"), "")?;
        write(d.path("fenix_fov.bil"), "")?;
        let pipeline = presets::apl()?;
        let mut conventions = d.conventions("utm_wgs84N 30");
        conventions.masks_dir = Some(d.path("masks"));
        conventions.view_vectors = Some(d.path("fenix_fov.bil"));
        let fs = d.fs();
        let resolved = PathResolver::new(&conventions, &pipeline, &fs).resolve(&item)?;
        assert_eq!(resolved.get("mask"), Some(&*s(d.path("masks/f153a011b_mask.bil"))));
        assert_eq!(resolved.get("view_vectors"), Some(&*s(d.path("fenix_fov.bil"))));
        Ok(())
    }

    #[test]
    fn test_untagged_line_is_ambiguous() -> anyhow::Result<()> {
        let d = Delivery::new()?;
        let item = d.add_line("f153a011b")?;
        let pipeline = presets::apl()?;
        let conventions = d.conventions("utm_wgs84N 30");
        let fs = d.fs();
        let e = PathResolver::new(&conventions, &pipeline, &fs).resolve(&item).unwrap_err();
        assert!(matches!(
            e,
            ItemError::Resolution(ResolutionError::AmbiguousAuxiliary { flag: "--view-vectors", .. })
        ));
        Ok(())
    }

    #[test]
    fn test_national_grid_needs_transform_grid() -> anyhow::Result<()> {
        let d = Delivery::new()?;
        let item = d.add_line("e153a011b")?;
        let pipeline = presets::apl()?;
        let conventions = d.conventions("OSNG");
        let fs = d.fs();
        let resolver = PathResolver::new(&conventions, &pipeline, &fs);

        let e = resolver.resolve(&item).unwrap_err();
        assert!(matches!(
            e,
            ItemError::Configuration(ConfigurationError::MissingTransformGrid(ref p)) if *p == d.path("grid/OSTN02_NTv2.gsb")
        ));

        create_dir_all(d.path("grid"))?;
        write(d.path("grid/OSTN02_NTv2.gsb"), "")?;
        let resolved = resolver.resolve(&item)?;
        assert_eq!(
            resolved.get("projection"),
            Some(&*format!("osng {}", d.path("grid/OSTN02_NTv2.gsb").display()))
        );
        // the tag keeps the requested spelling:
        assert_eq!(resolved.get("projection_tag"), Some("OSNG"));
        assert_eq!(resolved.get("mapped"), Some(&*s(d.path("out/e153a013b_OSNG.bil"))));
        Ok(())
    }

    #[test]
    fn test_check_configuration() -> anyhow::Result<()> {
        let d = Delivery::new()?;
        let pipeline = presets::apl()?;
        let fs = d.fs();

        let conventions = d.conventions("utm_wgs84N 30");
        PathResolver::new(&conventions, &pipeline, &fs).check_configuration()?;

        let conventions = d.conventions("osng");
        let e = PathResolver::new(&conventions, &pipeline, &fs)
            .check_configuration()
            .unwrap_err();
        assert!(matches!(e, ConfigurationError::MissingTransformGrid(_)));

        let mut conventions = d.conventions("utm_wgs84N 30");
        conventions.dem = None;
        let e = PathResolver::new(&conventions, &pipeline, &fs)
            .check_configuration()
            .unwrap_err();
        assert!(matches!(e, ConfigurationError::MissingSetting(Setting::Dem)));
        Ok(())
    }

    #[test]
    fn test_missing_dem_is_configuration_error() -> anyhow::Result<()> {
        let d = Delivery::new()?;
        let item = d.add_line("e153a011b")?;
        let pipeline = presets::apl()?;
        let mut conventions = d.conventions("utm_wgs84N 30");
        conventions.dem = None;
        let fs = d.fs();
        let e = PathResolver::new(&conventions, &pipeline, &fs).resolve(&item).unwrap_err();
        assert!(matches!(
            e,
            ItemError::Configuration(ConfigurationError::MissingSetting(Setting::Dem))
        ));
        Ok(())
    }

    #[test]
    fn test_no_convention_outside_delivery_layout() -> anyhow::Result<()> {
        let d = Delivery::new()?;
        create_dir_all(d.path("loose"))?;
        write(d.path("loose/e153a011b.bil"), "")?;
        write(d.path("loose/e153a011b_mask.bil"), "")?;
        let item = Item::new(d.path("loose/e153a011b.bil"))?;
        let pipeline = presets::apl()?;
        let conventions = d.conventions("utm_wgs84N 30");
        let fs = d.fs();
        let e = PathResolver::new(&conventions, &pipeline, &fs).resolve(&item).unwrap_err();
        assert!(matches!(
            e,
            ItemError::Resolution(ResolutionError::NoConvention { flag: "--innav", .. })
        ));
        Ok(())
    }

    #[test]
    fn test_projection_tag() {
        assert_eq!(projection_tag("utm_wgs84N 30"), "utm_wgs84N30");
        assert_eq!(projection_tag("osng /apps/grid.gsb"), "osng");
        assert_eq!(projection_tag("osng_custom"), "osng");
        assert_eq!(projection_tag("OSNG"), "OSNG");
    }
}
