//! Decoded pattern data structures and their text rendering

use std::fmt;

use serde::Serialize;

use crate::{STEPS_PER_BEAT, STEPS_PER_MEASURE};

/// A decoded splice file
///
/// Built once by the decoder and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    version: String,
    tempo: f32,
    measures: Vec<Measure>,
}

impl Pattern {
    /// Create a pattern from its decoded parts
    pub fn new(version: impl Into<String>, tempo: f32, measures: Vec<Measure>) -> Self {
        Self {
            version: version.into(),
            tempo,
            measures,
        }
    }

    /// Hardware version the file was saved with
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Tempo in beats per minute
    pub fn tempo(&self) -> f32 {
        self.tempo
    }

    /// Measures in file order
    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    /// Find the first measure with the given name
    pub fn measure_named(&self, name: &str) -> Option<&Measure> {
        self.measures.iter().find(|m| m.name == name)
    }

    /// Canonical text rendering (same as `Display`)
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Saved with HW Version: {}", self.version)?;
        writeln!(f, "Tempo: {}", GeneralFloat(self.tempo))?;
        for measure in &self.measures {
            writeln!(f, "{}", measure)?;
        }
        Ok(())
    }
}

/// Shortest round-trip digits of an `f32`, switching to exponent notation
/// when the decimal exponent is below -4 or at least 6 (`1e+06`, `1e-05`)
struct GeneralFloat(f32);

impl fmt::Display for GeneralFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_nan() {
            return f.write_str("NaN");
        }
        if value.is_infinite() {
            return f.write_str(if value > 0.0 { "+Inf" } else { "-Inf" });
        }

        let scientific = format!("{:e}", value);
        let (mantissa, exp) = match scientific.split_once('e') {
            Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
            None => (scientific.as_str(), 0),
        };
        if (-4..6).contains(&exp) {
            write!(f, "{}", value)
        } else {
            let sign = if exp < 0 { '-' } else { '+' };
            write!(f, "{}e{}{:02}", mantissa, sign, exp.unsigned_abs())
        }
    }
}

/// One instrument track within a pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Measure {
    id: i32,
    name: String,
    steps: Steps,
}

impl Measure {
    /// Create a measure
    pub fn new(id: i32, name: impl Into<String>, steps: Steps) -> Self {
        Self {
            id,
            name: name.into(),
            steps,
        }
    }

    /// Track identifier (not necessarily unique)
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Instrument name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sixteen-step grid
    pub fn steps(&self) -> Steps {
        self.steps
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}\t{}", self.id, self.name, self.steps)
    }
}

/// Sixteen on/off steps of a measure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Steps([bool; STEPS_PER_MEASURE]);

impl Steps {
    /// Glyph for an active step
    pub const ACTIVE: char = 'x';
    /// Glyph for an inactive step
    pub const INACTIVE: char = '-';

    /// Create from explicit flags
    pub const fn new(steps: [bool; STEPS_PER_MEASURE]) -> Self {
        Self(steps)
    }

    /// Create from the raw step bytes of a record; any nonzero byte is active
    pub fn from_bytes(bytes: &[u8; STEPS_PER_MEASURE]) -> Self {
        Self(bytes.map(|b| b != 0))
    }

    /// Check a single step; out-of-range indices are inactive
    #[inline]
    pub fn is_active(&self, step: usize) -> bool {
        self.0.get(step).copied().unwrap_or(false)
    }

    /// Number of active steps
    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|&&on| on).count()
    }

    /// Iterate over the flags in step order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// The underlying flags
    pub fn as_array(&self) -> &[bool; STEPS_PER_MEASURE] {
        &self.0
    }
}

impl fmt::Display for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("|")?;
        for beat in self.0.chunks(STEPS_PER_BEAT) {
            for &on in beat {
                let glyph = if on { Self::ACTIVE } else { Self::INACTIVE };
                write!(f, "{}", glyph)?;
            }
            f.write_str("|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_on_the_floor() -> Steps {
        let mut bytes = [0u8; STEPS_PER_MEASURE];
        for step in (0..STEPS_PER_MEASURE).step_by(4) {
            bytes[step] = 1;
        }
        Steps::from_bytes(&bytes)
    }

    #[test]
    fn test_steps_render_bars_every_beat() {
        assert_eq!(Steps::default().to_string(), "|----|----|----|----|");
        assert_eq!(four_on_the_floor().to_string(), "|x---|x---|x---|x---|");
        assert_eq!(
            Steps::new([true; STEPS_PER_MEASURE]).to_string(),
            "|xxxx|xxxx|xxxx|xxxx|"
        );
    }

    #[test]
    fn test_any_nonzero_byte_is_active() {
        let mut bytes = [0u8; STEPS_PER_MEASURE];
        bytes[0] = 0x01;
        bytes[5] = 0x7F;
        bytes[15] = 0xFF;
        let steps = Steps::from_bytes(&bytes);

        assert!(steps.is_active(0));
        assert!(!steps.is_active(1));
        assert!(steps.is_active(5));
        assert!(steps.is_active(15));
        assert!(!steps.is_active(16));
        assert_eq!(steps.active_count(), 3);
        assert_eq!(steps.to_string(), "|x---|-x--|----|---x|");
    }

    #[test]
    fn test_measure_line() {
        let measure = Measure::new(40, "snare", four_on_the_floor());
        assert_eq!(measure.to_string(), "(40) snare\t|x---|x---|x---|x---|");
    }

    #[test]
    fn test_pattern_render() {
        let pattern = Pattern::new(
            "0.808-alpha",
            120.0,
            vec![
                Measure::new(0, "kick", four_on_the_floor()),
                Measure::new(1, "snare", Steps::default()),
            ],
        );

        let expected = "Saved with HW Version: 0.808-alpha\n\
                        Tempo: 120\n\
                        (0) kick\t|x---|x---|x---|x---|\n\
                        (1) snare\t|----|----|----|----|\n";
        assert_eq!(pattern.render(), expected);
        assert_eq!(pattern.render(), pattern.to_string());
    }

    #[test]
    fn test_tempo_uses_shortest_form() {
        let tempo_line = |tempo: f32| {
            Pattern::new("", tempo, Vec::new())
                .render()
                .lines()
                .nth(1)
                .unwrap()
                .to_string()
        };
        assert_eq!(tempo_line(120.0), "Tempo: 120");
        assert_eq!(tempo_line(98.4), "Tempo: 98.4");
        assert_eq!(tempo_line(118.5), "Tempo: 118.5");
        assert_eq!(tempo_line(240.0), "Tempo: 240");
    }

    #[test]
    fn test_general_float_exponent_range() {
        let general = |v: f32| GeneralFloat(v).to_string();
        assert_eq!(general(0.0), "0");
        assert_eq!(general(0.0001), "0.0001");
        assert_eq!(general(0.00001), "1e-05");
        assert_eq!(general(1e-7), "1e-07");
        assert_eq!(general(123456.0), "123456");
        assert_eq!(general(1e6), "1e+06");
        assert_eq!(general(1234567.0), "1.234567e+06");
        assert_eq!(general(-2.5e7), "-2.5e+07");
        assert_eq!(general(1e21), "1e+21");
        assert_eq!(general(f32::NAN), "NaN");
        assert_eq!(general(f32::INFINITY), "+Inf");
        assert_eq!(general(f32::NEG_INFINITY), "-Inf");
    }

    #[test]
    fn test_measure_named() {
        let pattern = Pattern::new(
            "",
            90.0,
            vec![
                Measure::new(7, "hh-open", Steps::default()),
                Measure::new(8, "hh-close", four_on_the_floor()),
            ],
        );
        assert_eq!(pattern.measure_named("hh-close").map(Measure::id), Some(8));
        assert!(pattern.measure_named("cowbell").is_none());
    }

    #[test]
    fn test_serialize_shape() {
        let measure = Measure::new(1, "clap", Steps::default());
        let json = serde_json::to_value(&measure).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "clap");
        assert_eq!(json["steps"].as_array().unwrap().len(), STEPS_PER_MEASURE);
    }
}
