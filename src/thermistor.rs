// thermistor.rs

use serde::Serialize;

// Freenove section 12 parts: 10k NTC thermistor (Beta 3950) over a 10k
// fixed divider resistor, read by the 12-bit ADC against 3.3V.
pub const ADC_MAX: i32 = 4095;
pub const VREF: f64 = 3.3;
pub const R_FIXED_KOHM: f64 = 10.0;
pub const R0_KOHM: f64 = 10.0;
pub const BETA: f64 = 3950.0;

const KELVIN_OFFSET: f64 = 273.15;
const T0_KELVIN: f64 = KELVIN_OFFSET + 25.0;

// The clamp keeps the divider voltage strictly inside (0, 3.3) so the
// resistance inversion never divides by zero.
const ADC_CLAMP_LO: i32 = 1;
const ADC_CLAMP_HI: i32 = ADC_MAX - 1;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Reading {
    pub adc: i32,
    pub voltage: f64,
    pub resistance_kohm: f64,
    pub temperature_c: f64,
}

/// Beta-model conversion of a raw ADC sample. Total over all integer
/// inputs: out-of-range samples are clamped to [1, 4094] first.
pub fn convert(adc: i32) -> Reading {
    let adc = adc.clamp(ADC_CLAMP_LO, ADC_CLAMP_HI);

    let voltage = (adc as f64 / ADC_MAX as f64) * VREF;
    let resistance_kohm = R_FIXED_KOHM * voltage / (VREF - voltage);
    let temp_k = 1.0 / (1.0 / T0_KELVIN + (resistance_kohm / R0_KOHM).ln() / BETA);

    Reading {
        adc,
        voltage,
        resistance_kohm,
        temperature_c: temp_k - KELVIN_OFFSET,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_and_finite_over_wide_input_range() {
        for adc in -1000..=6000 {
            let r = convert(adc);
            assert!(r.voltage.is_finite(), "adc {adc}: voltage not finite");
            assert!(r.resistance_kohm.is_finite(), "adc {adc}: resistance not finite");
            assert!(r.temperature_c.is_finite(), "adc {adc}: temperature not finite");
            assert!(r.voltage > 0.0 && r.voltage < VREF);
        }
    }

    #[test]
    fn clamps_are_idempotent_at_boundaries() {
        for low in [-1000, -1, 0, 1] {
            assert_eq!(convert(low).adc, 1);
            assert_eq!(convert(low).temperature_c, convert(1).temperature_c);
        }
        for high in [4094, 4095, 5000, i32::MAX] {
            assert_eq!(convert(high).adc, 4094);
            assert_eq!(convert(high).temperature_c, convert(4094).temperature_c);
        }
    }

    #[test]
    fn midscale_regression_values() {
        // adc 2048 sits just above half scale, so the thermistor reads a
        // hair over 10k and the temperature a hair under 25C.
        let r = convert(2048);
        assert!((r.voltage - 1.6504).abs() < 0.01, "voltage {}", r.voltage);
        assert!((r.resistance_kohm - 10.0049).abs() < 0.01, "resistance {}", r.resistance_kohm);
        assert!((r.temperature_c - 24.99).abs() < 0.01, "temperature {}", r.temperature_c);
    }

    #[test]
    fn hotter_means_lower_resistance() {
        // NTC: more ADC counts = higher divider voltage = colder reading.
        let cold = convert(3000);
        let warm = convert(1000);
        assert!(warm.temperature_c > cold.temperature_c);
        assert!(warm.resistance_kohm < cold.resistance_kohm);
    }
}

// EOF
