use std::fs;
use std::path::{Path, PathBuf};

use rampage::assets::{load_bitmap, load_font, load_levels, load_textures};
use rampage::map::Thing;
use rampage::{AssetError, Color, EngineConfig, Texture};

fn bundled(file: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join(file)
}

#[test]
fn bundled_levels_load() {
    let levels = load_levels(&bundled("levels.json")).expect("bundled levels");
    assert_eq!(levels.len(), 2);
    for (index, level) in levels.iter().enumerate() {
        assert_eq!(level.index(), index);
        let spawns = (0..level.height())
            .flat_map(|y| (0..level.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| level.thing(x, y) == Thing::Player)
            .count();
        assert_eq!(spawns, 1);
    }
}

#[test]
fn bundled_levels_are_stable() {
    let a = load_levels(&bundled("levels.json")).expect("bundled levels");
    let b = load_levels(&bundled("levels.json")).expect("bundled levels");
    assert_eq!(a, b);
}

#[test]
fn bundled_font_loads() {
    let font = load_font(&bundled("font.json")).expect("bundled font");
    assert_eq!(font.texture, Texture::Font);
    assert_eq!(font.glyph_index(' '), 0);
    assert_eq!(font.glyph_index('0'), 1);
    assert_eq!(font.characters.len(), 40);
}

#[test]
fn empty_level_list_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("levels.json");
    fs::write(&path, "[]").unwrap();
    assert!(matches!(load_levels(&path), Err(AssetError::NoLevels)));
}

#[test]
fn invalid_level_reports_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("levels.json");
    fs::write(
        &path,
        r#"[
            { "width": 3, "tiles": [1,1,1, 1,0,1, 1,1,1], "things": [" "," "," ", " ","@"," ", " "," "," "] },
            { "width": 3, "tiles": [1,1,1, 1,0,1, 1,1,1] }
        ]"#,
    )
    .unwrap();
    match load_levels(&path) {
        Err(AssetError::Level(rampage::LevelError::NoSpawn { level })) => assert_eq!(level, 1),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn malformed_json_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("font.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(load_font(&path), Err(AssetError::Json { .. })));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nowhere.json");
    match load_levels(&path) {
        Err(AssetError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn missing_texture_folder_uses_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let textures = load_textures(&dir.path().join("textures")).expect("placeholders");
    assert!(textures[Texture::Wall].is_opaque());
}

#[test]
fn incomplete_texture_folder_fails() {
    let dir = tempfile::tempdir().unwrap();
    let image = image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
    image.save(dir.path().join("wall.png")).unwrap();

    match load_textures(dir.path()) {
        Err(AssetError::MissingTexture(texture)) => assert_ne!(texture, Texture::Wall),
        other => panic!("unexpected {:?}", other.map(|_| ())),
    }
}

#[test]
fn png_decodes_to_bitmap() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tile.png");
    let mut image = image::RgbaImage::new(3, 2);
    image.put_pixel(0, 0, image::Rgba([10, 20, 30, 255]));
    image.put_pixel(2, 1, image::Rgba([0, 0, 0, 0]));
    image.save(&path).unwrap();

    let bitmap = load_bitmap(&path).expect("png");
    assert_eq!((bitmap.width(), bitmap.height()), (3, 2));
    assert_eq!(bitmap.pixel(0, 0), Color::rgb(10, 20, 30));
    assert_eq!(bitmap.pixel(2, 1), Color::CLEAR);
    assert!(!bitmap.is_opaque());
}

#[test]
fn config_defaults_fill_missing_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rampage.json");
    fs::write(&path, r#"{ "render_width": 160, "asset_dir": "data" }"#).unwrap();

    let config = EngineConfig::load(&path).expect("config");
    assert_eq!(config.render_width, 160);
    assert_eq!(config.render_height, EngineConfig::default().render_height);
    assert_eq!(config.levels_path(), PathBuf::from("data/levels.json"));
    assert_eq!(config.textures_dir(), PathBuf::from("data/textures"));

    let missing = EngineConfig::load(&dir.path().join("absent.json")).expect("defaults");
    assert_eq!(missing, EngineConfig::default());
}
