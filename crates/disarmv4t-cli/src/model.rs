use std::path::{Path, PathBuf};

use disarmv4t::{Config, Mode};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("--skip {skip} exceeds file size {size}")]
    SkipPastEnd { skip: usize, size: usize },
    #[error("--len {len} exceeds the {remaining} bytes left after --skip")]
    LenPastEnd { len: usize, remaining: usize },
}

/// Raw bytes of the input file mapped at `base`.
#[derive(Debug, Clone)]
pub struct Image {
    pub base: u32,
    pub bytes: Vec<u8>,
}

impl Image {
    /// Decoder configuration for this image in `mode`.
    pub fn config(&self, mode: Mode) -> Config {
        Config { mode, base: self.base }
    }
}

pub fn load_raw_bin(path: &Path, base: u32, skip: usize, len: Option<usize>) -> Result<Image, LoadError> {
    let file = std::fs::read(path).map_err(|source| LoadError::Read { path: path.to_path_buf(), source })?;
    let image = slice_image(&file, base, skip, len)?;
    debug!(path = %path.display(), base, size = image.bytes.len(), "loaded image");
    Ok(image)
}

pub fn slice_image(file: &[u8], base: u32, skip: usize, len: Option<usize>) -> Result<Image, LoadError> {
    if skip > file.len() {
        return Err(LoadError::SkipPastEnd { skip, size: file.len() });
    }
    let mut payload = &file[skip..];
    if let Some(lim) = len {
        if lim > payload.len() {
            return Err(LoadError::LenPastEnd { len: lim, remaining: payload.len() });
        }
        payload = &payload[..lim];
    }
    Ok(Image { base, bytes: payload.to_vec() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_maps_skip_and_len() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("_disarmv4t_test_{}.bin", std::process::id()));
        std::fs::write(&path, [0u8, 1, 2, 3, 4, 5]).unwrap();
        let img = load_raw_bin(&path, 0x0800_0000, 2, Some(3)).unwrap();
        assert_eq!(img.base, 0x0800_0000);
        assert_eq!(img.bytes, vec![2, 3, 4]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn out_of_range_slices_are_rejected() {
        let file = [0u8; 4];
        assert!(matches!(
            slice_image(&file, 0, 5, None),
            Err(LoadError::SkipPastEnd { skip: 5, size: 4 })
        ));
        assert!(matches!(
            slice_image(&file, 0, 2, Some(3)),
            Err(LoadError::LenPastEnd { len: 3, remaining: 2 })
        ));
        assert_eq!(slice_image(&file, 0, 4, None).unwrap().bytes.len(), 0);
    }

    #[test]
    fn image_base_drives_config() {
        let img = slice_image(&[0x70, 0x47], 0x0300_0000, 0, None).unwrap();
        assert_eq!(img.config(Mode::Thumb), Config { mode: Mode::Thumb, base: 0x0300_0000 });
        let lines = disarmv4t::disassemble(&img.bytes, &img.config(Mode::Thumb));
        assert_eq!(lines[0].addr, 0x0300_0000);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_raw_bin(Path::new("/nonexistent/_disarmv4t.bin"), 0, 0, None).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/_disarmv4t.bin"));
    }
}
