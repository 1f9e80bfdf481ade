use super::format::{finite, is_positive};
use std::fmt;

const ML_PER_KG: f64 = 35.0;
const ML_PER_HOUR_OF_EXERCISE: f64 = 800.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Category for a BMI value. Each boundary belongs to the higher band.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 24.9 {
            BmiCategory::Normal
        } else if bmi < 29.9 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body-mass index rounded to one decimal, with its category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bmi {
    pub value: f64,
    pub category: BmiCategory,
}

impl fmt::Display for Bmi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} ({})", self.value, self.category)
    }
}

pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<Bmi> {
    if !is_positive(weight_kg) || !is_positive(height_cm) {
        return None;
    }
    let height_m = height_cm / 100.0;
    let value = finite((weight_kg / (height_m * height_m) * 10.0).round() / 10.0)?;
    // Classified on the shown value so number and label never disagree
    Some(Bmi {
        value,
        category: BmiCategory::from_bmi(value),
    })
}

/// Daily fluid need for a training day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hydration {
    pub millilitres: f64,
}

impl Hydration {
    pub fn litres(&self) -> f64 {
        self.millilitres / 1000.0
    }
}

impl fmt::Display for Hydration {
    /// Litres with two decimals
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.litres())
    }
}

/// `weight_kg * 35 + (duration_min / 60) * 800` millilitres
pub fn hydration_need(weight_kg: f64, duration_min: f64) -> Option<Hydration> {
    if !is_positive(weight_kg) || !is_positive(duration_min) {
        return None;
    }
    let millilitres = finite(weight_kg * ML_PER_KG + duration_min / 60.0 * ML_PER_HOUR_OF_EXERCISE)?;
    Some(Hydration { millilitres })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_normal() {
        let reading = bmi(70.0, 175.0).unwrap();
        assert_eq!(reading.value, 22.9);
        assert_eq!(reading.category, BmiCategory::Normal);
        assert_eq!(reading.to_string(), "22.9 (Normal)");
    }

    #[test]
    fn test_category_boundaries_belong_to_higher_band() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.9), BmiCategory::Obese);
    }

    #[test]
    fn test_category_follows_rounded_value() {
        // 24.87 displays as 24.9
        let reading = bmi(76.16, 175.0).unwrap();
        assert_eq!(reading.value, 24.9);
        assert_eq!(reading.category, BmiCategory::Overweight);
    }

    #[test]
    fn test_invalid_bmi() {
        assert!(bmi(0.0, 175.0).is_none());
        assert!(bmi(70.0, 0.0).is_none());
    }

    #[test]
    fn test_hydration_for_one_hour() {
        let need = hydration_need(70.0, 60.0).unwrap();
        assert_eq!(need.millilitres, 3250.0);
        assert_eq!(need.to_string(), "3.25");
    }

    #[test]
    fn test_overflow_is_no_result() {
        assert!(bmi(1e308, 1e-300).is_none());
        assert!(hydration_need(1e308, 60.0).is_none());
    }

    #[test]
    fn test_invalid_hydration() {
        assert!(hydration_need(70.0, 0.0).is_none());
        assert!(hydration_need(-70.0, 60.0).is_none());
    }
}
