//! Vital sign plausibility checks, BMI and abnormal flags.

use serde::{Deserialize, Serialize};

use crate::error::{CareError, CareResult};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalReadings {
    pub systolic_bp: Option<u16>,
    pub diastolic_bp: Option<u16>,
    pub heart_rate: Option<u16>,
    pub temperature_c: Option<f64>,
    pub oxygen_saturation: Option<u8>,
    pub respiratory_rate: Option<u16>,
    /// mg/dL
    pub blood_glucose: Option<f64>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbnormalFlag {
    HighBloodPressure,
    LowBloodPressure,
    Tachycardia,
    Bradycardia,
    Fever,
    Hypothermia,
    LowOxygen,
    Tachypnea,
    Bradypnea,
    Hyperglycemia,
    Hypoglycemia,
    Underweight,
    Obese,
}

/// Values derived from a reading at save time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalAssessment {
    pub bmi: Option<f64>,
    pub flags: Vec<AbnormalFlag>,
}

impl VitalAssessment {
    pub fn is_abnormal(&self) -> bool {
        !self.flags.is_empty()
    }
}

fn in_range<T: PartialOrd + Copy>(value: Option<T>, min: T, max: T, field: &str) -> CareResult<()> {
    match value {
        Some(v) if v < min || v > max => Err(CareError::validation(field, "Value out of plausible range")),
        _ => Ok(()),
    }
}

fn finite(value: Option<f64>, field: &str) -> CareResult<()> {
    match value {
        Some(v) if !v.is_finite() => Err(CareError::validation(field, "Value must be a number")),
        _ => Ok(()),
    }
}

impl VitalReadings {
    pub fn is_empty(&self) -> bool {
        *self == VitalReadings::default()
    }

    /// Reject readings no instrument would produce.
    pub fn validate(&self) -> CareResult<()> {
        if self.is_empty() {
            return Err(CareError::validation("vitals", "At least one reading is required"));
        }
        for (value, field) in [
            (self.temperature_c, "temperature_c"),
            (self.blood_glucose, "blood_glucose"),
            (self.weight_kg, "weight_kg"),
            (self.height_cm, "height_cm"),
        ] {
            finite(value, field)?;
        }
        in_range(self.systolic_bp, 40, 300, "systolic_bp")?;
        in_range(self.diastolic_bp, 20, 200, "diastolic_bp")?;
        in_range(self.heart_rate, 20, 300, "heart_rate")?;
        in_range(self.temperature_c, 25.0, 45.0, "temperature_c")?;
        in_range(self.oxygen_saturation, 50, 100, "oxygen_saturation")?;
        in_range(self.respiratory_rate, 4, 80, "respiratory_rate")?;
        in_range(self.blood_glucose, 10.0, 1000.0, "blood_glucose")?;
        in_range(self.weight_kg, 0.5, 500.0, "weight_kg")?;
        in_range(self.height_cm, 20.0, 280.0, "height_cm")?;
        if let (Some(sys), Some(dia)) = (self.systolic_bp, self.diastolic_bp) {
            if dia >= sys {
                return Err(CareError::validation(
                    "diastolic_bp",
                    "Diastolic pressure must be below systolic",
                ));
            }
        }
        Ok(())
    }
}

/// Body mass index rounded to one decimal.
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if weight_kg <= 0.0 || height_cm <= 0.0 || !weight_kg.is_finite() || !height_cm.is_finite() {
        return None;
    }
    let meters = height_cm / 100.0;
    let raw = weight_kg / (meters * meters);
    Some((raw * 10.0).round() / 10.0)
}

pub fn assess(readings: &VitalReadings) -> VitalAssessment {
    let mut flags = Vec::new();

    let high_bp = readings.systolic_bp.map_or(false, |v| v > 140)
        || readings.diastolic_bp.map_or(false, |v| v > 90);
    let low_bp = readings.systolic_bp.map_or(false, |v| v < 90)
        || readings.diastolic_bp.map_or(false, |v| v < 60);
    if high_bp {
        flags.push(AbnormalFlag::HighBloodPressure);
    } else if low_bp {
        flags.push(AbnormalFlag::LowBloodPressure);
    }

    match readings.heart_rate {
        Some(v) if v > 100 => flags.push(AbnormalFlag::Tachycardia),
        Some(v) if v < 60 => flags.push(AbnormalFlag::Bradycardia),
        _ => {}
    }

    match readings.temperature_c {
        Some(v) if v >= 38.0 => flags.push(AbnormalFlag::Fever),
        Some(v) if v < 35.0 => flags.push(AbnormalFlag::Hypothermia),
        _ => {}
    }

    if readings.oxygen_saturation.map_or(false, |v| v < 95) {
        flags.push(AbnormalFlag::LowOxygen);
    }

    match readings.respiratory_rate {
        Some(v) if v > 20 => flags.push(AbnormalFlag::Tachypnea),
        Some(v) if v < 12 => flags.push(AbnormalFlag::Bradypnea),
        _ => {}
    }

    match readings.blood_glucose {
        Some(v) if v > 180.0 => flags.push(AbnormalFlag::Hyperglycemia),
        Some(v) if v < 70.0 => flags.push(AbnormalFlag::Hypoglycemia),
        _ => {}
    }

    let bmi = match (readings.weight_kg, readings.height_cm) {
        (Some(w), Some(h)) => bmi(w, h),
        _ => None,
    };
    match bmi {
        Some(v) if v < 18.5 => flags.push(AbnormalFlag::Underweight),
        Some(v) if v >= 30.0 => flags.push(AbnormalFlag::Obese),
        _ => {}
    }

    VitalAssessment { bmi, flags }
}
