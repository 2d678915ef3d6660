use crate::api::SpectrumResponse;

/// Intensity series extracted at one pixel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpectrumSeries {
    pub wavelength: Vec<f64>,
    pub intensity: Vec<f64>,
}

impl From<SpectrumResponse> for SpectrumSeries {
    fn from(response: SpectrumResponse) -> Self {
        Self {
            wavelength: response.wavelength,
            intensity: response.intensity,
        }
    }
}

impl SpectrumSeries {
    /// True when the x axis is the server's wavelength array rather than the
    /// sample index.
    pub fn has_wavelength(&self) -> bool {
        !self.wavelength.is_empty() && self.wavelength.len() == self.intensity.len()
    }

    pub fn x_label(&self) -> &'static str {
        if self.has_wavelength() {
            "Wavelength (pix)"
        } else {
            "Pixel index"
        }
    }

    pub fn y_label(&self) -> &'static str {
        "Counts"
    }

    /// `[x, y]` pairs for a line plot. Non-finite intensities are dropped.
    pub fn points(&self) -> Vec<[f64; 2]> {
        let use_wavelength = self.has_wavelength();
        self.intensity
            .iter()
            .enumerate()
            .filter(|(_, y)| y.is_finite())
            .map(|(i, &y)| {
                let x = if use_wavelength {
                    self.wavelength[i]
                } else {
                    i as f64
                };
                [x, y]
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.intensity.is_empty()
    }
}
