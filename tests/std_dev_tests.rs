use chrono::{DateTime, Duration, TimeZone, Utc};

use ohlcv_series::indicator::{OhlcProp, StdDev};
use ohlcv_series::{Bar, Series, SeriesConfig};

const CLOSES: [f64; 32] = [
    52.22, 52.78, 53.02, 53.67, 53.67, 53.74, 53.45, 53.72, 53.39, 52.51, 52.32, 51.45, 51.60,
    52.43, 52.47, 52.91, 52.07, 53.12, 52.77, 52.73, 52.09, 53.19, 53.73, 53.87, 53.85, 53.88,
    54.08, 54.14, 54.50, 54.30, 54.40, 54.16,
];

const EXPECTED: [f64; 23] = [
    0.523018, 0.505411, 0.730122, 0.857364, 0.833642, 0.788707, 0.716251, 0.675498, 0.584679,
    0.507870, 0.518353, 0.526061, 0.480964, 0.490176, 0.578439, 0.622905, 0.670093, 0.622025,
    0.661064, 0.690358, 0.651152, 0.360466, 0.242959,
];

fn start(i: usize) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap() + Duration::seconds(300 * i as i64)
}

#[test]
fn matches_reference_values() {
    let bars = CLOSES
        .iter()
        .enumerate()
        .map(|(i, c)| Bar::new(start(i), *c, *c, *c, *c, 1.0));
    let mut series = Series::new(bars, SeriesConfig::new(300, 32)).unwrap();
    series
        .add_indicator("stddev", StdDev::new(OhlcProp::close(), 10))
        .unwrap();

    for i in 0..9 {
        let interval = series.value_for_interval(start(i)).unwrap();
        assert_eq!(interval.indicator("stddev"), None, "idx {}", i);
    }
    for (j, want) in EXPECTED.iter().enumerate() {
        let idx = j + 9;
        let got = series
            .value_for_interval(start(idx))
            .unwrap()
            .indicator("stddev")
            .unwrap_or_else(|| panic!("missing value at idx {}", idx));
        assert!(
            ((got - want) / want).abs() < 0.005,
            "idx {}: got {} want {}",
            idx,
            got,
            want
        );
    }
}

#[test]
fn constant_input_has_zero_deviation() {
    let bars = (0..5).map(|i| Bar::flat(start(i), 7.0, 1.0));
    let mut series = Series::new(bars, SeriesConfig::new(300, 32)).unwrap();
    series
        .add_indicator("stddev", StdDev::new(OhlcProp::close(), 3))
        .unwrap();
    let v = series
        .value_for_interval(start(4))
        .unwrap()
        .indicator("stddev")
        .unwrap();
    assert!(v.abs() < 1e-12);
}
