//! Test to verify test infrastructure works correctly

mod common;

use common::builders::{quiet_config, PacketBuilder};
use streamvis_rs::types::Point;

#[test]
fn test_infrastructure_setup() {
    let packet = PacketBuilder::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0))
        .speed(0.007)
        .build();

    assert_eq!(packet.position, Point::new(1.0, 2.0));
    assert_eq!(packet.target, Point::new(3.0, 4.0));
    assert_eq!(packet.progress, 0.0);
    assert!(quiet_config().validate().is_ok());
}

#[test]
fn test_float_comparison() {
    common::assert_float_eq(1.0, 1.0000001, 0.001);
}

#[test]
#[should_panic]
fn test_float_comparison_fails() {
    common::assert_float_eq(1.0, 2.0, 0.001);
}
