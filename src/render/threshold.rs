//! Otsu adaptive thresholding over an 8-bit luma histogram.
//!
//! The threshold drives both transparency decisions and braille dot
//! activation. Frame content changes every frame, so the threshold is
//! recomputed per frame and never cached across frames.

use image::GrayImage;

/// Computes the Otsu threshold of a grayscale image.
pub fn otsu_threshold(gray: &GrayImage) -> u8 {
    let mut hist = [0u64; 256];
    for px in gray.pixels() {
        hist[px.0[0] as usize] += 1;
    }
    otsu_from_histogram(&hist)
}

/// Picks the split point maximizing between-class variance
/// `w_b * w_f * (mean_b - mean_f)^2` from running sums.
///
/// Ties keep the first maximum encountered. Degenerate histograms (all mass
/// in one bin, or no mass at all) return 128.
pub fn otsu_from_histogram(hist: &[u64; 256]) -> u8 {
    let total: u64 = hist.iter().sum();
    let sum_total: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &n)| (i as f64) * (n as f64))
        .sum();

    let mut max_variance = 0.0f64;
    let mut threshold = 128u8;
    let mut sum_b = 0.0f64;
    let mut w_b = 0u64;

    for (i, &n) in hist.iter().enumerate() {
        w_b += n;
        if w_b == 0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f == 0 {
            break;
        }

        sum_b += (i as f64) * (n as f64);
        let mean_b = sum_b / (w_b as f64);
        let mean_f = (sum_total - sum_b) / (w_f as f64);
        let variance = (w_b as f64) * (w_f as f64) * (mean_b - mean_f) * (mean_b - mean_f);

        if variance > max_variance {
            max_variance = variance;
            threshold = i as u8;
        }
    }

    threshold
}

#[cfg(test)]
#[path = "../../tests/unit/render/threshold.rs"]
mod tests;
