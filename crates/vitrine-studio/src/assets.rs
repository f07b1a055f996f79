//! Image directory scanning and decoding.
//!
//! Layout on disk:
//!
//! ```text
//! images/
//!   loose-photo.jpg        // card without a detail page
//!   harbour-lights/        // project "harbour-lights", detail at /work/harbour-lights
//!     01.jpg
//!     02.png
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::imageops::FilterType;
use vitrine_gallery::{AssetError, AssetHandle, AssetLoader, AssetRecord, DetailCatalog, DetailRecord};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif", "tif", "tiff"];

/// Sources above this edge length are rejected rather than decoded.
const MAX_SOURCE_EDGE: u32 = 16_384;

/// Tightly packed RGBA8 pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Whether the card renderer will accept these pixels on a device whose
    /// texture edge limit is at least `max_edge`.
    pub fn fits_texture(&self, max_edge: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.width.max(self.height) <= max_edge
            && self.rgba.len() as u64 == self.width as u64 * self.height as u64 * 4
    }
}

/// Records and detail pages found under an image directory.
#[derive(Debug, Default)]
pub struct Library {
    pub records: Vec<AssetRecord>,
    pub catalog: DetailCatalog,
}

/// Walks `root` one level deep. Files and projects are visited in name order.
pub fn scan_directory(root: &Path) -> Result<Library> {
    let mut library = Library::default();

    for path in sorted_entries(root)? {
        if path.is_dir() {
            let Some(slug) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
                continue;
            };
            let images: Vec<PathBuf> =
                sorted_entries(&path)?.into_iter().filter(|p| is_image(p)).collect();
            if images.is_empty() {
                continue;
            }
            for file in images {
                library.records.push(AssetRecord {
                    project_id: slug.clone(),
                    project_slug: Some(slug.clone()),
                    image_url: file.to_string_lossy().into_owned(),
                    orientation: None,
                });
            }
            library.catalog.insert(DetailRecord {
                project_id: slug.clone(),
                title: title_from_slug(&slug),
                url: format!("/work/{slug}"),
                slug,
            });
        } else if is_image(&path) {
            let id = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
            library.records.push(AssetRecord {
                project_id: id,
                project_slug: None,
                image_url: path.to_string_lossy().into_owned(),
                orientation: None,
            });
        }
    }

    log::info!(
        "found {} images and {} projects in {}",
        library.records.len(),
        library.catalog.len(),
        root.display()
    );
    Ok(library)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| !p.file_name().and_then(|n| n.to_str()).is_some_and(|n| n.starts_with('.')))
        .collect::<Vec<_>>();
    paths.sort();
    Ok(paths)
}

fn is_image(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

/// `harbour-lights` → `Harbour Lights`.
pub fn title_from_slug(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decodes images from disk, downscaling so the longest edge fits `max_edge`.
pub struct DiskLoader {
    max_edge: u32,
    images: HashMap<u32, DecodedImage>,
}

impl DiskLoader {
    pub fn new(max_edge: u32) -> Self {
        Self { max_edge: max_edge.max(1), images: HashMap::new() }
    }

    /// Decoded pixels keyed by asset handle.
    pub fn into_images(self) -> HashMap<u32, DecodedImage> {
        self.images
    }
}

impl AssetLoader for DiskLoader {
    fn load(&mut self, handle: AssetHandle, record: &AssetRecord) -> Result<(u32, u32), AssetError> {
        let url = &record.image_url;
        let bytes = fs::read(url).map_err(|_| AssetError::NotFound(url.clone()))?;
        let img = image::load_from_memory(&bytes).map_err(|e| AssetError::Decode {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let (width, height) = (img.width(), img.height());
        if width == 0 || height == 0 {
            return Err(AssetError::Empty { url: url.clone() });
        }
        if width.max(height) > MAX_SOURCE_EDGE {
            return Err(AssetError::TooLarge { url: url.clone(), width, height, limit: MAX_SOURCE_EDGE });
        }

        let img = if width.max(height) > self.max_edge {
            img.resize(self.max_edge, self.max_edge, FilterType::Triangle)
        } else {
            img
        };
        let rgba = img.to_rgba8();
        log::debug!("decoded {url}: {width}x{height} -> {}x{}", rgba.width(), rgba.height());
        self.images.insert(
            handle.0,
            DecodedImage { width: rgba.width(), height: rgba.height(), rgba: rgba.into_raw() },
        );
        Ok((width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_gallery::DetailResolver;

    /// Fresh scratch directory under the system temp dir.
    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vitrine-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_png(path: &Path, w: u32, h: u32) {
        image::RgbaImage::from_pixel(w, h, image::Rgba([200, 40, 40, 255]))
            .save(path)
            .unwrap();
    }

    // ── slugs ─────────────────────────────────────────────────────────────

    #[test]
    fn titles_from_slugs() {
        assert_eq!(title_from_slug("harbour-lights"), "Harbour Lights");
        assert_eq!(title_from_slug("north_sea--2"), "North Sea 2");
        assert_eq!(title_from_slug(""), "");
    }

    // ── scanning ──────────────────────────────────────────────────────────

    #[test]
    fn subdirectories_become_projects() {
        let root = scratch("scan");
        fs::create_dir_all(root.join("harbour")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        write_png(&root.join("harbour/b.png"), 2, 3);
        write_png(&root.join("harbour/a.png"), 2, 3);
        write_png(&root.join("loose.png"), 3, 2);
        fs::write(root.join("notes.txt"), "not an image").unwrap();

        let lib = scan_directory(&root).unwrap();
        let slugs: Vec<Option<&str>> = lib.records.iter().map(|r| r.project_slug.as_deref()).collect();
        assert_eq!(slugs, vec![Some("harbour"), Some("harbour"), None]);
        assert!(lib.records[0].image_url.ends_with("a.png"));
        assert_eq!(lib.catalog.len(), 1);
        let detail = lib.catalog.resolve("harbour", Some("harbour")).unwrap();
        assert_eq!(detail.url, "/work/harbour");

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(scan_directory(Path::new("/definitely/not/here")).is_err());
    }

    // ── decoding ──────────────────────────────────────────────────────────

    #[test]
    fn loader_downscales_but_reports_natural_size() {
        let root = scratch("decode");
        let path = root.join("wide.png");
        write_png(&path, 64, 32);
        let record = AssetRecord {
            project_id: "wide".into(),
            project_slug: None,
            image_url: path.to_string_lossy().into_owned(),
            orientation: None,
        };

        let mut loader = DiskLoader::new(16);
        assert_eq!(loader.load(AssetHandle(3), &record).unwrap(), (64, 32));
        let images = loader.into_images();
        let img = &images[&3];
        assert_eq!((img.width, img.height), (16, 8));
        assert_eq!(img.rgba.len(), 16 * 8 * 4);

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn unreadable_files_are_reported() {
        let root = scratch("bad");
        let path = root.join("broken.png");
        fs::write(&path, b"not a png").unwrap();
        let mut loader = DiskLoader::new(64);
        let missing = AssetRecord {
            project_id: "x".into(),
            project_slug: None,
            image_url: root.join("gone.png").to_string_lossy().into_owned(),
            orientation: None,
        };
        let broken = AssetRecord { image_url: path.to_string_lossy().into_owned(), ..missing.clone() };

        assert!(matches!(loader.load(AssetHandle(0), &missing), Err(AssetError::NotFound(_))));
        assert!(matches!(loader.load(AssetHandle(1), &broken), Err(AssetError::Decode { .. })));
        assert!(loader.into_images().is_empty());

        fs::remove_dir_all(&root).unwrap();
    }
}
