use super::*;

#[test]
fn dimensions_reject_zero_sides() {
    assert!(Dimensions::new(0, 10).is_err());
    assert!(Dimensions::new(10, 0).is_err());
    assert!(Dimensions::new(1, 1).is_ok());
}

#[test]
fn byte_len_is_rgba_sized() {
    let d = Dimensions::new(120, 80).unwrap();
    assert_eq!(d.pixel_count(), 9600);
    assert_eq!(d.byte_len(4), 38_400);
    assert_eq!(kib(d.byte_len(4)), 37);
}

#[test]
fn display_forms() {
    assert_eq!(Dimensions::new(64, 32).unwrap().to_string(), "64x32");
    assert_eq!(WidgetId(7).to_string(), "widget#7");
}
