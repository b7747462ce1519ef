//! Frame to tensor conversion

use camera_capture::VideoFrame;
use ndarray::Array4;

use crate::DepthError;

/// ImageNet channel means on the 0-255 scale (R, G, B)
pub const IMAGENET_MEAN: [f32; 3] = [123.675, 116.28, 103.53];

/// ImageNet channel standard deviations on the 0-255 scale (R, G, B)
pub const IMAGENET_STD: [f32; 3] = [58.395, 57.12, 57.375];

/// Resize a frame to `size`x`size` (bilinear) and lay it out as a
/// normalized `[1, 3, size, size]` tensor, channel then row then column.
pub fn preprocess(frame: &VideoFrame, size: u32) -> Result<Array4<f32>, DepthError> {
    let resized = frame
        .resize(size, size)
        .map_err(|e| DepthError::Preprocess(e.to_string()))?;

    let side = size as usize;
    let mut input = Array4::<f32>::zeros((1, 3, side, side));
    for (i, pixel) in resized.data.chunks_exact(3).enumerate() {
        let (y, x) = (i / side, i % side);
        for c in 0..3 {
            input[[0, c, y, x]] = (pixel[c] as f32 - IMAGENET_MEAN[c]) / IMAGENET_STD[c];
        }
    }

    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_shape_matches_input_size() {
        let frame = VideoFrame::solid(64, 32, [0, 0, 0]);
        let tensor = preprocess(&frame, 16).unwrap();
        assert_eq!(tensor.dim(), (1, 3, 16, 16));
    }

    #[test]
    fn test_channel_normalization() {
        let frame = VideoFrame::solid(8, 8, [255, 128, 0]);
        let tensor = preprocess(&frame, 4).unwrap();

        let r = (255.0 - IMAGENET_MEAN[0]) / IMAGENET_STD[0];
        let g = (128.0 - IMAGENET_MEAN[1]) / IMAGENET_STD[1];
        let b = (0.0 - IMAGENET_MEAN[2]) / IMAGENET_STD[2];

        assert!((tensor[[0, 0, 2, 3]] - r).abs() < 1e-5);
        assert!((tensor[[0, 1, 0, 0]] - g).abs() < 1e-5);
        assert!((tensor[[0, 2, 3, 1]] - b).abs() < 1e-5);
    }

    #[test]
    fn test_layout_is_channel_row_column() {
        // Left half red, right half blue; no resize so pixels are exact
        let mut frame = VideoFrame::solid(4, 4, [0, 0, 255]);
        for y in 0..4u32 {
            for x in 0..2u32 {
                let idx = ((y * 4 + x) * 3) as usize;
                frame.data[idx..idx + 3].copy_from_slice(&[255, 0, 0]);
            }
        }

        let tensor = preprocess(&frame, 4).unwrap();
        let red_hi = (255.0 - IMAGENET_MEAN[0]) / IMAGENET_STD[0];
        let red_lo = (0.0 - IMAGENET_MEAN[0]) / IMAGENET_STD[0];

        // Channel 0 (red) varies along the column axis, not the row axis
        assert!((tensor[[0, 0, 3, 0]] - red_hi).abs() < 1e-5);
        assert!((tensor[[0, 0, 0, 3]] - red_lo).abs() < 1e-5);
    }

    #[test]
    fn test_truncated_pixel_buffer_is_rejected() {
        let frame = VideoFrame {
            data: vec![0; 3],
            width: 4,
            height: 4,
            timestamp_ns: 0,
            sequence: 0,
        };
        assert!(matches!(preprocess(&frame, 8), Err(DepthError::Preprocess(_))));
    }
}
