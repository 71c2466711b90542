//! Daily forecast aggregation
//!
//! Collapses the provider's 3-hour samples into at most seven calendar-day
//! summaries: min/max temperature, mean humidity, summed rainfall, dominant
//! condition and a flood-risk bucket per day.

use chrono::{Datelike, NaiveDate};
use shared::{flood_risk_for_rainfall, DailyForecast, TempRange, WeatherCondition, WeatherSample};

use crate::error::{AppError, AppResult};

/// Maximum number of forecast days returned per aggregation run.
pub const MAX_FORECAST_DAYS: usize = 7;

/// A versioned lookup table mapping provider condition codes to the five
/// canonical buckets. Ranges are inclusive on both ends and checked in
/// order; codes matching no range fall back to `PartlyCloudy`.
#[derive(Debug, Clone)]
pub struct ConditionTable {
    pub version: &'static str,
    ranges: Vec<(u16, u16, WeatherCondition)>,
    fallback: WeatherCondition,
}

impl ConditionTable {
    /// The OpenWeatherMap condition-id table.
    pub fn openweathermap() -> Self {
        Self {
            version: "owm-2.5",
            ranges: vec![
                // Thunderstorm
                (200, 299, WeatherCondition::HeavyRain),
                // Drizzle
                (300, 399, WeatherCondition::Rainy),
                // Light to moderate rain
                (500, 504, WeatherCondition::Rainy),
                // Heavy rain
                (505, 599, WeatherCondition::HeavyRain),
                // Snow (treated as cloudy in Delhi)
                (600, 699, WeatherCondition::Cloudy),
                // Atmosphere (mist, haze, dust)
                (700, 799, WeatherCondition::Cloudy),
                // Clear
                (800, 800, WeatherCondition::Sunny),
                // Few clouds
                (801, 801, WeatherCondition::PartlyCloudy),
                // Clouds
                (802, u16::MAX, WeatherCondition::Cloudy),
            ],
            fallback: WeatherCondition::PartlyCloudy,
        }
    }

    /// Map a provider condition code to its canonical bucket.
    pub fn map(&self, code: u16) -> WeatherCondition {
        self.ranges
            .iter()
            .find(|(lo, hi, _)| code >= *lo && code <= *hi)
            .map(|(_, _, condition)| *condition)
            .unwrap_or(self.fallback)
    }
}

impl Default for ConditionTable {
    fn default() -> Self {
        Self::openweathermap()
    }
}

/// Stateless aggregator from raw samples to daily forecasts.
#[derive(Debug, Clone, Default)]
pub struct ForecastAggregator {
    table: ConditionTable,
}

/// Per-day accumulation bucket.
struct DayBucket {
    date: NaiveDate,
    temps: Vec<f64>,
    humidities: Vec<i32>,
    rainfall_mm: f64,
    codes: Vec<u16>,
}

impl ForecastAggregator {
    /// Create an aggregator with a non-default condition table.
    pub fn with_table(table: ConditionTable) -> Self {
        Self { table }
    }

    /// Aggregate raw samples into daily forecasts, one per distinct
    /// calendar date, in first-seen order, capped at seven days.
    ///
    /// Empty input yields an empty vec. Non-finite or negative sample
    /// values are rejected rather than silently bucketed.
    pub fn aggregate(&self, samples: &[WeatherSample]) -> AppResult<Vec<DailyForecast>> {
        let mut buckets: Vec<DayBucket> = Vec::new();

        for sample in samples {
            validate_sample(sample)?;

            let date = sample.timestamp.date_naive();
            let index = match buckets.iter().position(|b| b.date == date) {
                Some(index) => index,
                None => {
                    buckets.push(DayBucket {
                        date,
                        temps: Vec::new(),
                        humidities: Vec::new(),
                        rainfall_mm: 0.0,
                        codes: Vec::new(),
                    });
                    buckets.len() - 1
                }
            };

            let bucket = &mut buckets[index];
            bucket.temps.push(sample.temperature_celsius);
            bucket.humidities.push(sample.humidity_percent);
            bucket.rainfall_mm += sample.rainfall_mm;
            bucket.codes.push(sample.condition_code);
        }

        Ok(buckets
            .into_iter()
            .take(MAX_FORECAST_DAYS)
            .map(|bucket| self.summarize_day(bucket))
            .collect())
    }

    fn summarize_day(&self, bucket: DayBucket) -> DailyForecast {
        let min_temp = bucket.temps.iter().copied().fold(f64::INFINITY, f64::min);
        let max_temp = bucket
            .temps
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let avg_humidity = bucket.humidities.iter().sum::<i32>() as f64
            / bucket.humidities.len().max(1) as f64;
        let rainfall = bucket.rainfall_mm.round();

        let dominant_code = dominant_condition_code(&bucket.codes);

        DailyForecast {
            day: bucket.date.format("%a").to_string(),
            date: format!("{}/{}", bucket.date.day(), bucket.date.month()),
            temp: TempRange {
                min: min_temp.round() as i32,
                max: max_temp.round() as i32,
            },
            humidity: avg_humidity.round() as i32,
            rainfall: rainfall as i32,
            condition: self.table.map(dominant_code),
            flood_risk: flood_risk_for_rainfall(rainfall),
        }
    }
}

/// Most frequent condition code; ties break to the code seen first.
fn dominant_condition_code(codes: &[u16]) -> u16 {
    let mut tally: Vec<(u16, u32)> = Vec::new();
    for &code in codes {
        match tally.iter_mut().find(|(c, _)| *c == code) {
            Some((_, count)) => *count += 1,
            None => tally.push((code, 1)),
        }
    }

    let mut best = tally[0];
    for &entry in &tally[1..] {
        if entry.1 > best.1 {
            best = entry;
        }
    }
    best.0
}

fn validate_sample(sample: &WeatherSample) -> AppResult<()> {
    if !sample.temperature_celsius.is_finite() {
        return Err(AppError::MalformedSample(format!(
            "non-finite temperature at {}",
            sample.timestamp
        )));
    }
    if !sample.rainfall_mm.is_finite() || sample.rainfall_mm < 0.0 {
        return Err(AppError::MalformedSample(format!(
            "invalid rainfall increment at {}",
            sample.timestamp
        )));
    }
    if !(0..=100).contains(&sample.humidity_percent) {
        return Err(AppError::MalformedSample(format!(
            "humidity out of range at {}",
            sample.timestamp
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use shared::RiskLevel;

    fn sample(ts: &str, temp: f64, humidity: i32, rain: f64, code: u16) -> WeatherSample {
        WeatherSample {
            timestamp: ts.parse::<DateTime<Utc>>().unwrap(),
            temperature_celsius: temp,
            humidity_percent: humidity,
            rainfall_mm: rain,
            condition_code: code,
        }
    }

    #[test]
    fn test_condition_table_ranges() {
        let table = ConditionTable::openweathermap();
        assert_eq!(table.map(200), WeatherCondition::HeavyRain);
        assert_eq!(table.map(299), WeatherCondition::HeavyRain);
        assert_eq!(table.map(300), WeatherCondition::Rainy);
        assert_eq!(table.map(500), WeatherCondition::Rainy);
        assert_eq!(table.map(504), WeatherCondition::Rainy);
        assert_eq!(table.map(505), WeatherCondition::HeavyRain);
        assert_eq!(table.map(599), WeatherCondition::HeavyRain);
        assert_eq!(table.map(600), WeatherCondition::Cloudy);
        assert_eq!(table.map(741), WeatherCondition::Cloudy);
        assert_eq!(table.map(800), WeatherCondition::Sunny);
        assert_eq!(table.map(801), WeatherCondition::PartlyCloudy);
        assert_eq!(table.map(802), WeatherCondition::Cloudy);
        assert_eq!(table.map(999), WeatherCondition::Cloudy);
        // Codes outside any documented block
        assert_eq!(table.map(0), WeatherCondition::PartlyCloudy);
        assert_eq!(table.map(450), WeatherCondition::PartlyCloudy);
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let forecast = ForecastAggregator::default().aggregate(&[]).unwrap();
        assert!(forecast.is_empty());
    }

    #[test]
    fn test_single_sample_day() {
        let samples = vec![sample("2026-08-24T09:00:00Z", 31.6, 74, 3.2, 500)];
        let forecast = ForecastAggregator::default().aggregate(&samples).unwrap();

        assert_eq!(forecast.len(), 1);
        let day = &forecast[0];
        assert_eq!(day.temp.min, 32);
        assert_eq!(day.temp.max, 32);
        assert_eq!(day.humidity, 74);
        assert_eq!(day.rainfall, 3);
        assert_eq!(day.condition, WeatherCondition::Rainy);
        assert_eq!(day.flood_risk, RiskLevel::Low);
        assert_eq!(day.day, "Mon");
        assert_eq!(day.date, "24/8");
    }

    #[test]
    fn test_dominant_condition_tie_breaks_to_first_seen() {
        let samples = vec![
            sample("2026-08-24T00:00:00Z", 30.0, 70, 0.0, 801),
            sample("2026-08-24T03:00:00Z", 30.0, 70, 0.0, 500),
            sample("2026-08-24T06:00:00Z", 30.0, 70, 0.0, 500),
            sample("2026-08-24T09:00:00Z", 30.0, 70, 0.0, 801),
        ];
        let forecast = ForecastAggregator::default().aggregate(&samples).unwrap();
        // 801 and 500 both occur twice; 801 was seen first
        assert_eq!(forecast[0].condition, WeatherCondition::PartlyCloudy);
    }

    #[test]
    fn test_output_capped_at_seven_days() {
        let mut samples = Vec::new();
        for day in 1..=9 {
            samples.push(sample(
                &format!("2026-08-{:02}T12:00:00Z", day),
                30.0,
                60,
                0.0,
                800,
            ));
        }
        let forecast = ForecastAggregator::default().aggregate(&samples).unwrap();
        assert_eq!(forecast.len(), MAX_FORECAST_DAYS);
        assert_eq!(forecast[0].date, "1/8");
        assert_eq!(forecast[6].date, "7/8");
    }

    #[test]
    fn test_days_ordered_by_first_seen_date() {
        // Samples arrive out of date order
        let samples = vec![
            sample("2026-08-25T00:00:00Z", 30.0, 60, 0.0, 800),
            sample("2026-08-24T12:00:00Z", 30.0, 60, 0.0, 800),
            sample("2026-08-25T06:00:00Z", 30.0, 60, 0.0, 800),
        ];
        let forecast = ForecastAggregator::default().aggregate(&samples).unwrap();
        assert_eq!(forecast.len(), 2);
        assert_eq!(forecast[0].date, "25/8");
        assert_eq!(forecast[1].date, "24/8");
    }

    #[test]
    fn test_malformed_sample_rejected() {
        let bad_rain = vec![sample("2026-08-24T00:00:00Z", 30.0, 60, -1.0, 800)];
        assert!(matches!(
            ForecastAggregator::default().aggregate(&bad_rain),
            Err(AppError::MalformedSample(_))
        ));

        let bad_temp = vec![sample("2026-08-24T00:00:00Z", f64::NAN, 60, 0.0, 800)];
        assert!(matches!(
            ForecastAggregator::default().aggregate(&bad_temp),
            Err(AppError::MalformedSample(_))
        ));

        let bad_humidity = vec![sample("2026-08-24T00:00:00Z", 30.0, 130, 0.0, 800)];
        assert!(matches!(
            ForecastAggregator::default().aggregate(&bad_humidity),
            Err(AppError::MalformedSample(_))
        ));
    }

    #[test]
    fn test_three_day_aggregation_with_critical_middle_day() {
        // 24 three-hour samples spanning exactly 3 calendar days; day 2's
        // increments sum to 120mm.
        let mut samples = Vec::new();
        for day in 24..=26 {
            for slot in 0..8 {
                let rain = if day == 25 { 15.0 } else { 1.0 };
                samples.push(sample(
                    &format!("2026-08-{}T{:02}:00:00Z", day, slot * 3),
                    28.0 + slot as f64,
                    80,
                    rain,
                    if day == 25 { 502 } else { 801 },
                ));
            }
        }
        assert_eq!(samples.len(), 24);

        let forecast = ForecastAggregator::default().aggregate(&samples).unwrap();
        assert_eq!(forecast.len(), 3);

        assert_eq!(forecast[0].rainfall, 8);
        assert_eq!(forecast[0].flood_risk, RiskLevel::Low);

        assert_eq!(forecast[1].rainfall, 120);
        assert_eq!(forecast[1].flood_risk, RiskLevel::Critical);
        assert_eq!(forecast[1].condition, WeatherCondition::Rainy);

        assert_eq!(forecast[2].rainfall, 8);
        assert_eq!(forecast[2].flood_risk, RiskLevel::Low);

        // Temperature spread: 28..35 per day
        assert_eq!(forecast[0].temp.min, 28);
        assert_eq!(forecast[0].temp.max, 35);
    }

    #[test]
    fn test_humidity_averaged_and_rounded() {
        let samples = vec![
            sample("2026-08-24T00:00:00Z", 30.0, 71, 0.0, 800),
            sample("2026-08-24T03:00:00Z", 30.0, 72, 0.0, 800),
        ];
        let forecast = ForecastAggregator::default().aggregate(&samples).unwrap();
        // mean of 71 and 72 is 71.5, rounds to 72
        assert_eq!(forecast[0].humidity, 72);
    }
}
