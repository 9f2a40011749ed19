use chrono::{DateTime, Duration, TimeZone, Utc};

use ohlcv_series::indicator::{OhlcField, OhlcProp};
use ohlcv_series::{Bar, Series, SeriesConfig};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 12, 0, 0).unwrap()
}

fn two_bar_series() -> Series {
    let five_min = now() + Duration::minutes(5);
    let data = vec![
        Bar::new(now(), 14.0, 15.0, 13.0, 14.0, 131.0),
        Bar::new(five_min, 13.0, 18.0, 10.0, 15.0, 12.0),
    ];
    Series::new(data, SeriesConfig::new(300, 100)).unwrap()
}

#[test]
fn selects_each_field() {
    let cases = [
        (OhlcField::Open, [14.0, 13.0]),
        (OhlcField::High, [15.0, 18.0]),
        (OhlcField::Low, [13.0, 10.0]),
        (OhlcField::Close, [14.0, 15.0]),
        (OhlcField::Volume, [131.0, 12.0]),
        (OhlcField::Hl2, [14.0, 14.0]),
        (OhlcField::Hlc3, [14.0, 14.333333333333334]),
    ];
    for (field, want) in cases {
        let mut series = two_bar_series();
        series.add_indicator("val", OhlcProp::new(field)).unwrap();
        let first = series.value_for_interval(now()).unwrap().indicator("val");
        let second = series
            .value_for_interval(now() + Duration::minutes(5))
            .unwrap()
            .indicator("val");
        assert!(
            (first.unwrap() - want[0]).abs() < 1e-12,
            "{:?}: first {:?}",
            field,
            first
        );
        assert!(
            (second.unwrap() - want[1]).abs() < 1e-12,
            "{:?}: second {:?}",
            field,
            second
        );
    }
}

#[test]
fn unknown_interval_has_no_value() {
    let mut series = two_bar_series();
    series.add_indicator("val", OhlcProp::close()).unwrap();
    assert!(series
        .value_for_interval(now() + Duration::minutes(10))
        .is_none());
}
