//! The campaign pipelines this tool ships with.

use crate::{ConfigurationError, DirRule, Flag, Override, PipelineSpec, Setting, Source};

/// Selects one of the built-in pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// hyperspectral level-1b lines mapped with APL
    Apl,
    /// LAS point clouds gridded to DSMs
    LasToDsm,
    /// pre-2009 ASCII LiDAR (.all) converted to LAS/LAZ
    AsciiToLas,
    /// scanned aerial photographs (JP2) converted to GeoTIFF
    Jp2ToTiff,
}

impl Preset {
    pub fn spec(&self) -> Result<PipelineSpec, ConfigurationError> {
        match self {
            Self::Apl => apl(),
            Self::LasToDsm => las_to_dsm(),
            Self::AsciiToLas => ascii_to_las(),
            Self::Jp2ToTiff => jp2_to_tiff(),
        }
    }
}

/// aplmask, aplcorr, apltran and aplmap, optionally zipping the mapped file.
/// The IGM file marks a line as already processed.
pub fn apl() -> Result<PipelineSpec, ConfigurationError> {
    PipelineSpec::builder("apl")
        .input_suffix("1b.bil")
        .module("contrib/arsf/apl")
        .queue("lotus", "02:00")
        .role("basename", Source::Basename)
        .role("level1b", Source::Input)
        .role(
            "mapped_basename",
            Source::Replaced {
                role: "basename",
                from: "1b",
                to: "3b",
            },
        )
        .role(
            "mask",
            Source::Aux {
                overridden_by: Override::Masks,
                default: DirRule::ItemDir,
                suffix: "_mask.bil",
            },
        )
        .role(
            "navigation",
            Source::Aux {
                overridden_by: Override::Navigation,
                default: DirRule::Substitute {
                    from: "level1b",
                    to: "navigation",
                },
                suffix: "_nav_post_processed.bil",
            },
        )
        .role(
            "view_vectors",
            Source::OneOf {
                overridden_by: Override::ViewVectors,
                default: DirRule::Substitute {
                    from: "flightlines/level1b",
                    to: "sensor_FOV_vectors",
                },
                extension: "bil",
            },
        )
        .role("dem", Source::File(Setting::Dem))
        .role("projection", Source::Projection)
        .role("projection_tag", Source::ProjectionTag)
        .role("data_type", Source::Param(Setting::DataType))
        .role("pixel_size", Source::Param(Setting::PixelSize))
        .role("bands", Source::Param(Setting::Bands))
        .output("masked", "${basename}_masked.bil", false)
        .output("igm", "${basename}.igm", true)
        .output("igm_transformed", "${basename}_${projection_tag}.igm", false)
        .output("mapped", "${mapped_basename}_${projection_tag}.bil", false)
        .stage(
            "Mask file",
            "aplmask -lev1 $level1b -mask $mask -output $masked",
        )
        .stage(
            "Create IGM file",
            "aplcorr -lev1file $masked -igmfile $igm -vvfile $view_vectors \
             -navfile $navigation -dem $dem",
        )
        .stage(
            "Transform projection of IGM file",
            "apltran -inproj latlong WGS84 -igm $igm -output $igm_transformed \
             -outproj $projection",
        )
        .stage(
            "Map file",
            "aplmap -igm $igm_transformed -ignorediskspace -lev1 $masked -mapname $mapped \
             -outputdatatype $data_type -pixelsize $pixel_size $pixel_size -bandlist $bands",
        )
        .conditional_stage(
            "Zip mapped file",
            Flag::Zip,
            "zip -9 -j ${mapped}.zip $mapped ${mapped}.hdr",
        )
        .build()
}

pub fn las_to_dsm() -> Result<PipelineSpec, ConfigurationError> {
    PipelineSpec::builder("las-to-dsm")
        .input_suffix(".LAS")
        .queue("lotus", "02:00")
        .role("basename", Source::Basename)
        .role("las", Source::Input)
        .role("projection", Source::Param(Setting::Projection))
        .role("resolution", Source::Param(Setting::PixelSize))
        .output("dsm", "${basename}_dsm.tif", true)
        .stage(
            "Create DSM",
            "las_to_dsm.py --projection $projection --resolution $resolution -o $dsm $las",
        )
        .build()
}

pub fn ascii_to_las() -> Result<PipelineSpec, ConfigurationError> {
    PipelineSpec::builder("ascii-to-las")
        .input_suffix(".all")
        .module("contrib/arsf/lastools")
        .module("contrib/arsf/arsf_tools")
        .queue("lotus", "01:00")
        .role("basename", Source::Basename)
        .role("ascii", Source::Input)
        .role("las_extension", Source::Param(Setting::LasExtension))
        .output("las", "${basename}${las_extension}", true)
        .stage(
            "Convert ASCII LiDAR to LAS",
            "convert_pre2009_lidar.py -i $ascii -o $las",
        )
        .build()
}

pub fn jp2_to_tiff() -> Result<PipelineSpec, ConfigurationError> {
    PipelineSpec::builder("jp2-to-tiff")
        .input_suffix(".jp2")
        .queue("short-serial", "01:00")
        .role("basename", Source::Basename)
        .role("jp2", Source::Input)
        .output("tiff", "${basename}.tif", true)
        .stage(
            "Convert JP2 to GeoTIFF",
            "gdal_translate -of GTiff -co \"COMPRESS=LZW\" $jp2 $tiff",
        )
        .build()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ResolvedPaths;

    #[test]
    fn test_presets_are_valid() {
        for preset in [
            Preset::Apl,
            Preset::LasToDsm,
            Preset::AsciiToLas,
            Preset::Jp2ToTiff,
        ] {
            assert!(preset.spec().is_ok(), "{preset:?}");
        }
    }

    #[test]
    fn test_apl_render() {
        let pipeline = apl().unwrap();
        let mut r = ResolvedPaths::default();
        for (role, value) in [
            ("level1b", "/l1b/e153a011b.bil"),
            ("mask", "/l1b/e153a011b_mask.bil"),
            ("masked", "/out/e153a011b_masked.bil"),
            ("igm", "/out/e153a011b.igm"),
            ("view_vectors", "/fov/eagle_fov.bil"),
            ("navigation", "/nav/e153a011b_nav_post_processed.bil"),
            ("dem", "/dem/uk.dem"),
            ("igm_transformed", "/out/e153a011b_osng.igm"),
            ("projection", "osng /grid/OSTN02_NTv2.gsb"),
            ("mapped", "/out/e153a013b_osng.bil"),
            ("data_type", "uint16"),
            ("pixel_size", "2"),
            ("bands", "ALL"),
        ] {
            r.insert(role, value.to_owned()).unwrap();
        }
        let body = pipeline.render(&r, &[Flag::Zip]).unwrap();
        assert_eq!(
            body,
            "# Load environment modules\n\
             module load contrib/arsf/apl\n\
             \n\
             # Mask file\n\
             aplmask -lev1 /l1b/e153a011b.bil -mask /l1b/e153a011b_mask.bil \
             -output /out/e153a011b_masked.bil\n\
             \n\
             # Create IGM file\n\
             aplcorr -lev1file /out/e153a011b_masked.bil -igmfile /out/e153a011b.igm \
             -vvfile /fov/eagle_fov.bil -navfile /nav/e153a011b_nav_post_processed.bil \
             -dem /dem/uk.dem\n\
             \n\
             # Transform projection of IGM file\n\
             apltran -inproj latlong WGS84 -igm /out/e153a011b.igm \
             -output /out/e153a011b_osng.igm -outproj osng /grid/OSTN02_NTv2.gsb\n\
             \n\
             # Map file\n\
             aplmap -igm /out/e153a011b_osng.igm -ignorediskspace \
             -lev1 /out/e153a011b_masked.bil -mapname /out/e153a013b_osng.bil \
             -outputdatatype uint16 -pixelsize 2 2 -bandlist ALL\n\
             \n\
             # Zip mapped file\n\
             zip -9 -j /out/e153a013b_osng.bil.zip /out/e153a013b_osng.bil \
             /out/e153a013b_osng.bil.hdr\n\
             \n"
        );
    }
}
