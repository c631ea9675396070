use crate::math::*;

use super::config::CameraSettings;

/// A named scene: a mesh file together with the camera that frames it. Presets are the only way
/// to pick an input file, so a mesh is never paired with a camera that wasn't made for it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub mesh_file: &'static str,
    pub focal_offset: Vec3,
    // minus focal offset
    pub camera_origin: Point3,
}

pub static PRESETS: [Preset; 3] = [
    Preset {
        name: "teddy-bear",
        mesh_file: "assets/teddy_bear.obj",
        focal_offset: Vec3::new(0.0, 0.0, 1.0),
        camera_origin: Point3::new(0.0, 0.0, 40.0),
    },
    Preset {
        name: "teapot",
        mesh_file: "assets/teapot.obj",
        focal_offset: Vec3::new(0.0, 0.0, -1.0),
        camera_origin: Point3::new(0.0, 1.5, -4.0),
    },
    Preset {
        name: "cube",
        mesh_file: "assets/cube.obj",
        focal_offset: Vec3::new(0.0, 0.0, -1.0),
        camera_origin: Point3::new(-1.0, -1.0, -3.0),
    },
];

pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.name == name)
}

impl Preset {
    pub fn camera(&self) -> CameraSettings {
        CameraSettings {
            origin: self.camera_origin + self.focal_offset,
            focal_offset: self.focal_offset,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_find_preset() {
        assert_eq!(find_preset("teapot").unwrap().mesh_file, "assets/teapot.obj");
        assert!(find_preset("Teapot").is_none());
        assert!(find_preset("").is_none());
    }

    #[test]
    fn test_camera_origin_includes_focal_offset() {
        let camera = find_preset("teapot").unwrap().camera();
        assert_eq!(camera.origin, Point3::new(0.0, 1.5, -5.0));
        assert_eq!(camera.focal_offset, Vec3::new(0.0, 0.0, -1.0));

        let camera = find_preset("teddy-bear").unwrap().camera();
        assert_eq!(camera.origin, Point3::new(0.0, 0.0, 41.0));
    }
}
