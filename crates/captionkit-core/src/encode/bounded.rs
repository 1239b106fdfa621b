//! Size-bounded JPEG export.
//!
//! # Algorithm
//!
//! Encode at the initial quality. While the output is over the byte budget
//! and the quality is still above the floor, lower the quality by one step and
//! encode again. Qualities are tracked as integer percentages so the schedule
//! cannot drift.
//!
//! The search is best effort: if the floor is still over budget, the floor
//! encoding is returned. Lower JPEG quality is not strictly guaranteed to give
//! smaller output for every image, but it is close enough for export sizing.

use serde::{Deserialize, Serialize};

use super::jpeg::{encode_raster_jpeg, EncodeError};
use crate::decode::Raster;

/// Quality schedule for [`encode_bounded`], as fractions in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QualitySearch {
    /// First quality tried
    pub initial: f32,
    /// Amount subtracted per retry
    pub step: f32,
    /// Retries stop once quality is at or below this floor
    pub min: f32,
}

impl Default for QualitySearch {
    fn default() -> Self {
        Self {
            initial: 0.95,
            step: 0.05,
            min: 0.10,
        }
    }
}

/// Integer-percent form of a validated [`QualitySearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Schedule {
    initial: i32,
    step: i32,
    min: i32,
}

impl QualitySearch {
    fn schedule(&self) -> Result<Schedule, EncodeError> {
        let finite = self.initial.is_finite() && self.step.is_finite() && self.min.is_finite();
        if !finite {
            return Err(EncodeError::InvalidSearch(
                "quality values must be finite".to_string(),
            ));
        }

        let to_percent = |q: f32| (q * 100.0).round() as i32;
        let schedule = Schedule {
            initial: to_percent(self.initial),
            step: to_percent(self.step),
            min: to_percent(self.min),
        };

        if !(1..=100).contains(&schedule.initial) {
            return Err(EncodeError::InvalidSearch(format!(
                "initial quality {} is outside 0.01..=1.0",
                self.initial
            )));
        }
        if schedule.step < 1 {
            return Err(EncodeError::InvalidSearch(format!(
                "step {} must be at least 0.01",
                self.step
            )));
        }
        if schedule.min < 0 || schedule.min > schedule.initial {
            return Err(EncodeError::InvalidSearch(format!(
                "minimum quality {} must be between 0 and the initial quality {}",
                self.min, self.initial
            )));
        }

        Ok(schedule)
    }

    /// Upper bound on re-encodes after the first encode.
    ///
    /// 17 for the default schedule.
    pub fn max_iterations(&self) -> Result<u32, EncodeError> {
        let s = self.schedule()?;
        let span = s.initial - s.min;
        Ok(((span + s.step - 1) / s.step) as u32)
    }
}

/// The result of a size-bounded export.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedArtifact {
    /// JPEG bytes
    pub bytes: Vec<u8>,
    /// Quality used for `bytes`, as a fraction
    pub quality: f32,
    /// Number of encodes performed, including the first
    pub attempts: u32,
    /// Whether `bytes` fits the requested budget
    pub within_budget: bool,
}

impl EncodedArtifact {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encode `raster` as JPEG, lowering quality until it fits `max_bytes`.
///
/// # Errors
///
/// Returns `EncodeError::InvalidSearch` for a schedule that cannot make
/// progress, and any error from the underlying JPEG encoder (for example an
/// empty raster). Missing the budget is not an error.
pub fn encode_bounded(
    raster: &Raster,
    max_bytes: usize,
    search: QualitySearch,
) -> Result<EncodedArtifact, EncodeError> {
    encode_bounded_with(max_bytes, search, |quality| {
        encode_raster_jpeg(raster, quality)
    })
}

/// [`encode_bounded`] over an arbitrary quality-parameterized encoder.
///
/// `encode` receives the JPEG quality in percent (1-100).
pub fn encode_bounded_with<F>(
    max_bytes: usize,
    search: QualitySearch,
    mut encode: F,
) -> Result<EncodedArtifact, EncodeError>
where
    F: FnMut(u8) -> Result<Vec<u8>, EncodeError>,
{
    let schedule = search.schedule()?;
    let as_quality = |percent: i32| percent.clamp(1, 100) as u8;

    let mut percent = schedule.initial;
    let mut bytes = encode(as_quality(percent))?;
    let mut attempts = 1u32;
    log::debug!("encoded at quality {percent}%: {} bytes", bytes.len());

    while bytes.len() > max_bytes && percent > schedule.min {
        percent -= schedule.step;
        bytes = encode(as_quality(percent))?;
        attempts += 1;
        log::debug!("encoded at quality {percent}%: {} bytes", bytes.len());
    }

    let within_budget = bytes.len() <= max_bytes;
    if !within_budget {
        log::warn!(
            "export is {} bytes at the {percent}% quality floor, over the {max_bytes} byte budget",
            bytes.len()
        );
    }

    Ok(EncodedArtifact {
        bytes,
        quality: as_quality(percent) as f32 / 100.0,
        attempts,
        within_budget,
    })
}

/// Approximate decoded byte length of a base64 payload of `encoded_len`
/// characters (three bytes per four characters).
pub fn estimated_bytes_from_base64_len(encoded_len: usize) -> usize {
    encoded_len / 4 * 3 + (encoded_len % 4) * 3 / 4
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: attempts never exceed the schedule bound plus the first
        /// encode, and the output is never empty.
        #[test]
        fn prop_attempts_bounded(
            initial in 1u32..=100,
            step in 1u32..=50,
            min_frac in 0.0f32..=1.0,
            budget in 0usize..20_000,
            scale in 1usize..300,
        ) {
            let min = ((initial as f32 * min_frac).floor() as u32).min(initial);
            let search = QualitySearch {
                initial: initial as f32 / 100.0,
                step: step as f32 / 100.0,
                min: min as f32 / 100.0,
            };
            let bound = search.max_iterations().unwrap();
            let artifact = encode_bounded_with(budget, search, |q| Ok(vec![1u8; q as usize * scale])).unwrap();

            prop_assert!(artifact.attempts <= bound + 1);
            prop_assert!(!artifact.is_empty());
        }

        /// Property: when the budget is met, the returned encoding is the
        /// first one that met it.
        #[test]
        fn prop_stops_at_first_fit(budget in 0usize..10_000, scale in 1usize..200) {
            let artifact = encode_bounded_with(budget, QualitySearch::default(), |q| {
                Ok(vec![1u8; q as usize * scale])
            })
            .unwrap();

            if artifact.within_budget {
                let percent = (artifact.quality * 100.0).round() as usize;
                prop_assert!(percent == 95 || (percent + 5) * scale > budget);
            }
        }
    }
}
