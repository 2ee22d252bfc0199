//! Brand logo decoding
//!
//! Logos arrive as `data:image/...;base64,` URLs (or bare base64) from the
//! settings page. Baseline/progressive JPEG is embedded as-is; 8-bit
//! grayscale or RGB PNG has its compressed pixel stream embedded with PNG
//! predictors. Anything else is rejected so the caller can fall back to a
//! monogram.

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Why a logo could not be used
#[derive(Error, Debug, PartialEq)]
pub enum LogoError {
    #[error("logo data is not valid base64: {0}")]
    Base64(String),

    #[error("logo data is empty")]
    Empty,

    #[error("logo is neither PNG nor JPEG")]
    UnknownFormat,

    #[error("logo image is truncated or corrupt: {0}")]
    Corrupt(&'static str),

    #[error("unsupported logo image: {0}")]
    Unsupported(String),
}

/// How the image bytes are stored in the PDF
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoEncoding {
    /// JPEG stream with this many color components
    Jpeg { components: u8 },
    /// Zlib stream of PNG scanlines with this many color channels
    Png { colors: u8 },
}

/// A decoded logo ready to embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoImage {
    pub width: u32,
    pub height: u32,
    pub encoding: LogoEncoding,
    pub data: Vec<u8>,
}

impl LogoImage {
    /// Decode logo data from a data URL or a bare base64 string
    pub fn decode(raw: &str) -> Result<Self, LogoError> {
        let payload = match raw.trim().strip_prefix("data:") {
            Some(rest) => rest.split_once(',').map(|(_, data)| data).unwrap_or(""),
            None => raw.trim(),
        };
        let payload: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        if payload.is_empty() {
            return Err(LogoError::Empty);
        }

        let bytes = STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| LogoError::Base64(e.to_string()))?;

        Self::from_bytes(bytes)
    }

    /// Sniff and parse raw image bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, LogoError> {
        if bytes.starts_with(&PNG_SIGNATURE) {
            parse_png(&bytes)
        } else if bytes.starts_with(&[0xff, 0xd8]) {
            parse_jpeg(bytes)
        } else {
            Err(LogoError::UnknownFormat)
        }
    }

    /// PDF color space name for the image
    pub fn color_space(&self) -> &'static str {
        let channels = match self.encoding {
            LogoEncoding::Jpeg { components } => components,
            LogoEncoding::Png { colors } => colors,
        };
        match channels {
            1 => "DeviceGray",
            4 => "DeviceCMYK",
            _ => "DeviceRGB",
        }
    }

    /// Scale to fit a `max` x `max` box, keeping the aspect ratio
    pub fn fit_within(&self, max: f32) -> (f32, f32) {
        let (w, h) = (self.width as f32, self.height as f32);
        let scale = max / w.max(h);
        (w * scale, h * scale)
    }
}

fn parse_jpeg(bytes: Vec<u8>) -> Result<LogoImage, LogoError> {
    let mut pos = 2;

    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xff {
            return Err(LogoError::Corrupt("expected a JPEG marker"));
        }
        let marker = bytes[pos + 1];

        // Fill bytes and markers without a length field
        if marker == 0xff {
            pos += 1;
            continue;
        }
        if marker == 0x01 || (0xd0..=0xd8).contains(&marker) {
            pos += 2;
            continue;
        }
        if marker == 0xd9 || marker == 0xda {
            break;
        }

        let len = usize::from(u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]));
        if len < 2 {
            return Err(LogoError::Corrupt("invalid JPEG segment length"));
        }

        if matches!(marker, 0xc0..=0xc3 | 0xc5..=0xc7 | 0xc9..=0xcb | 0xcd..=0xcf) {
            let segment = bytes
                .get(pos + 4..pos + 2 + len)
                .ok_or(LogoError::Corrupt("JPEG frame header cut short"))?;
            if segment.len() < 6 {
                return Err(LogoError::Corrupt("JPEG frame header cut short"));
            }
            let height = u32::from(u16::from_be_bytes([segment[1], segment[2]]));
            let width = u32::from(u16::from_be_bytes([segment[3], segment[4]]));
            let components = segment[5];

            if width == 0 || height == 0 {
                return Err(LogoError::Unsupported("JPEG with zero dimensions".into()));
            }
            if !matches!(components, 1 | 3 | 4) {
                return Err(LogoError::Unsupported(format!(
                    "JPEG with {} color components",
                    components
                )));
            }

            return Ok(LogoImage {
                width,
                height,
                encoding: LogoEncoding::Jpeg { components },
                data: bytes,
            });
        }

        pos += 2 + len;
    }

    Err(LogoError::Corrupt("no JPEG frame header found"))
}

fn parse_png(bytes: &[u8]) -> Result<LogoImage, LogoError> {
    let mut pos = PNG_SIGNATURE.len();
    let mut header: Option<(u32, u32, u8)> = None;
    let mut idat = Vec::new();

    while pos + 8 <= bytes.len() {
        let length = u32::from_be_bytes([bytes[pos], bytes[pos + 1], bytes[pos + 2], bytes[pos + 3]]);
        let kind = &bytes[pos + 4..pos + 8];
        let start = pos + 8;
        let end = start
            .checked_add(length as usize)
            .filter(|end| *end <= bytes.len())
            .ok_or(LogoError::Corrupt("PNG chunk runs past the end of the data"))?;
        let data = &bytes[start..end];

        match kind {
            b"IHDR" => {
                if data.len() < 13 {
                    return Err(LogoError::Corrupt("PNG header too short"));
                }
                let width = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
                let height = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
                let (depth, color_type, interlace) = (data[8], data[9], data[12]);

                if depth != 8 {
                    return Err(LogoError::Unsupported(format!("PNG bit depth {}", depth)));
                }
                if interlace != 0 {
                    return Err(LogoError::Unsupported("interlaced PNG".into()));
                }
                let colors = match color_type {
                    0 => 1,
                    2 => 3,
                    4 | 6 => {
                        return Err(LogoError::Unsupported("PNG with alpha channel".into()))
                    }
                    3 => return Err(LogoError::Unsupported("palette PNG".into())),
                    other => {
                        return Err(LogoError::Unsupported(format!("PNG color type {}", other)))
                    }
                };
                if width == 0 || height == 0 {
                    return Err(LogoError::Unsupported("PNG with zero dimensions".into()));
                }
                header = Some((width, height, colors));
            }
            b"IDAT" => idat.extend_from_slice(data),
            b"IEND" => break,
            _ => {}
        }

        // length + type + data + crc
        pos = end + 4;
    }

    let (width, height, colors) = header.ok_or(LogoError::Corrupt("PNG has no header chunk"))?;
    if idat.is_empty() {
        return Err(LogoError::Corrupt("PNG has no image data"));
    }

    Ok(LogoImage {
        width,
        height,
        encoding: LogoEncoding::Png { colors },
        data: idat,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn png_chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
        let mut chunk = (data.len() as u32).to_be_bytes().to_vec();
        chunk.extend_from_slice(kind);
        chunk.extend_from_slice(data);
        // CRC is not checked by the decoder
        chunk.extend_from_slice(&[0, 0, 0, 0]);
        chunk
    }

    /// A 2x1 RGB PNG (pixel data is not inflated, so any bytes do)
    pub(crate) fn tiny_png(color_type: u8) -> Vec<u8> {
        let mut png = PNG_SIGNATURE.to_vec();
        let mut ihdr = Vec::new();
        ihdr.extend_from_slice(&2u32.to_be_bytes());
        ihdr.extend_from_slice(&1u32.to_be_bytes());
        ihdr.extend_from_slice(&[8, color_type, 0, 0, 0]);
        png.extend(png_chunk(b"IHDR", &ihdr));
        png.extend(png_chunk(b"IDAT", &[0x78, 0x9c, 0x01, 0x02]));
        png.extend(png_chunk(b"IEND", &[]));
        png
    }

    pub(crate) fn tiny_png_data_url() -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(tiny_png(2)))
    }

    fn tiny_jpeg() -> Vec<u8> {
        let mut jpeg = vec![0xff, 0xd8];
        // APP0 segment to skip over
        jpeg.extend_from_slice(&[0xff, 0xe0, 0x00, 0x04, 0x00, 0x00]);
        // SOF0: length 11, precision 8, height 3, width 4, 3 components
        jpeg.extend_from_slice(&[0xff, 0xc0, 0x00, 0x0b, 0x08, 0x00, 0x03, 0x00, 0x04, 0x03]);
        jpeg.extend_from_slice(&[0x01, 0x11, 0x00]);
        jpeg.extend_from_slice(&[0xff, 0xd9]);
        jpeg
    }

    #[test]
    fn test_decode_png_data_url() {
        let logo = LogoImage::decode(&tiny_png_data_url()).unwrap();
        assert_eq!((logo.width, logo.height), (2, 1));
        assert_eq!(logo.encoding, LogoEncoding::Png { colors: 3 });
        assert_eq!(logo.color_space(), "DeviceRGB");
        assert_eq!(logo.data, vec![0x78, 0x9c, 0x01, 0x02]);
    }

    #[test]
    fn test_decode_bare_base64_jpeg() {
        let logo = LogoImage::decode(&STANDARD.encode(tiny_jpeg())).unwrap();
        assert_eq!((logo.width, logo.height), (4, 3));
        assert_eq!(logo.encoding, LogoEncoding::Jpeg { components: 3 });
    }

    #[test]
    fn test_invalid_base64() {
        let err = LogoImage::decode("data:image/png;base64,@@not-base64@@").unwrap_err();
        assert!(matches!(err, LogoError::Base64(_)));
    }

    #[test]
    fn test_unknown_format() {
        let raw = STANDARD.encode(b"GIF89a....");
        assert_eq!(LogoImage::decode(&raw).unwrap_err(), LogoError::UnknownFormat);
    }

    #[test]
    fn test_alpha_png_unsupported() {
        let err = LogoImage::from_bytes(tiny_png(6)).unwrap_err();
        assert!(matches!(err, LogoError::Unsupported(_)));
    }

    #[test]
    fn test_truncated_png() {
        let mut png = tiny_png(2);
        png.truncate(20);
        assert!(LogoImage::from_bytes(png).is_err());
    }

    #[test]
    fn test_empty_data_url() {
        assert_eq!(LogoImage::decode("data:image/png;base64,").unwrap_err(), LogoError::Empty);
    }

    #[test]
    fn test_fit_within() {
        let logo = LogoImage::from_bytes(tiny_png(2)).unwrap();
        let (w, h) = logo.fit_within(40.0);
        assert_eq!((w, h), (40.0, 20.0));
    }
}
