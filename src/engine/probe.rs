use crate::foundation::core::Dimensions;
use crate::foundation::error::{LottieError, LottieResult};

#[derive(serde::Deserialize)]
struct RawHeader {
    w: Option<f64>,
    h: Option<f64>,
    ip: Option<f64>,
    op: Option<f64>,
    fr: Option<f64>,
}

/// Top-level fields of a Lottie (Bodymovin) JSON document.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct LottieHeader {
    /// Composition width (`w`).
    pub width: u32,
    /// Composition height (`h`).
    pub height: u32,
    /// In-point frame (`ip`), if present.
    pub in_point: Option<f64>,
    /// Out-point frame (`op`), if present.
    pub out_point: Option<f64>,
    /// Frame rate (`fr`), if present.
    pub frame_rate: Option<f64>,
}

impl LottieHeader {
    /// Composition size as validated [`Dimensions`].
    pub fn dimensions(&self) -> LottieResult<Dimensions> {
        Dimensions::new(self.width, self.height)
    }

    /// `(start, end)` frames, floored to integers. `None` if `ip`/`op` are missing.
    pub fn frame_range(&self) -> Option<(i32, i32)> {
        let ip = self.in_point?;
        let op = self.out_point?;
        Some((ip.floor() as i32, op.floor() as i32))
    }

    /// Length of `ip..op` at `fr` in milliseconds. `None` if any field is missing or `fr <= 0`.
    pub fn duration_ms(&self) -> Option<u32> {
        let ip = self.in_point?;
        let op = self.out_point?;
        let fr = self.frame_rate?;
        if fr <= 0.0 || op < ip {
            return None;
        }
        let ms = ((op - ip) / fr * 1000.0).round();
        if ms > f64::from(u32::MAX) {
            return None;
        }
        Some(ms as u32)
    }
}

/// Parse the header of a Lottie JSON document.
///
/// `w` and `h` are required; timing fields are optional so a still composition still probes.
pub fn probe_header(bytes: &[u8]) -> LottieResult<LottieHeader> {
    let raw: RawHeader = serde_json::from_slice(bytes)
        .map_err(|e| LottieError::decode(format!("invalid Lottie JSON: {e}")))?;

    let (Some(w), Some(h)) = (raw.w, raw.h) else {
        return Err(LottieError::decode("Lottie JSON missing 'w' or 'h'"));
    };
    if !(w.is_finite() && h.is_finite()) || w < 0.0 || h < 0.0 {
        return Err(LottieError::decode(format!(
            "Lottie JSON has invalid size {w}x{h}"
        )));
    }

    Ok(LottieHeader {
        width: w as u32,
        height: h as u32,
        in_point: raw.ip,
        out_point: raw.op,
        frame_rate: raw.fr,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/engine/probe.rs"]
mod tests;
