use questlog::format::short_numeric;

#[test]
fn small_values_render_as_plain_integers() {
    assert_eq!(short_numeric(0.0).unwrap(), "0");
    assert_eq!(short_numeric(7.0).unwrap(), "7");
    assert_eq!(short_numeric(999.0).unwrap(), "999");
    assert_eq!(short_numeric(999.4).unwrap(), "999");
}

#[test]
fn thousands_keep_three_significant_digits() {
    assert_eq!(short_numeric(1000.0).unwrap(), "1.00K");
    assert_eq!(short_numeric(1500.0).unwrap(), "1.50K");
    assert_eq!(short_numeric(12_345.0).unwrap(), "12.3K");
    assert_eq!(short_numeric(123_456.0).unwrap(), "123K");
}

#[test]
fn each_unit_steps_by_a_factor_of_one_thousand() {
    assert_eq!(short_numeric(1_500_000.0).unwrap(), "1.50M");
    assert_eq!(short_numeric(2.0e9).unwrap(), "2.00B");
    assert_eq!(short_numeric(3.25e12).unwrap(), "3.25T");
    assert_eq!(short_numeric(1.0e15).unwrap(), "1.00Qa");
}

#[test]
fn the_table_tops_out_at_vigintillion() {
    assert_eq!(short_numeric(2.0e63).unwrap(), "2.00V");
    assert_eq!(short_numeric(1.5e65).unwrap(), "150V");
}

#[test]
fn values_past_the_table_fail_loudly() {
    assert!(short_numeric(5.0e66).is_err());
    assert!(short_numeric(f64::MAX).is_err());
    let err = short_numeric(1.0e70).unwrap_err();
    assert!(err.to_string().contains("short-scale"));
}
