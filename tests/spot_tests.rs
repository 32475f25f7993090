//! Parking spot state machine tests

use parking_allocator::lot::{
    format_plate, validate_plate, ParkingError, ParkingSpot, SpotCategory, SpotId, SpotState,
};

fn car_spot() -> ParkingSpot {
    ParkingSpot::new(SpotId(123), 52.3, SpotCategory::Car)
}

#[test]
fn test_new_spot_is_vacant() {
    let spot = car_spot();
    assert_eq!(spot.id(), SpotId(123));
    assert!((spot.distance() - 52.3).abs() < 0.001);
    assert_eq!(spot.category(), SpotCategory::Car);
    assert_eq!(spot.state(), SpotState::Vacant);
    assert!(!spot.is_occupied());
    assert_eq!(spot.plate(), None);
    assert_eq!(spot.motorcycle_count(), 0);
}

#[test]
fn test_occupy_and_release_repeatedly() {
    for category in SpotCategory::ALL {
        let mut spot = ParkingSpot::new(SpotId(100), 10.0, category);
        for plate in ["ABC123", "123ABC", "AB123C"] {
            spot.occupy(plate.to_string()).unwrap();
            assert_eq!(spot.state(), SpotState::Occupied);
            assert_eq!(spot.plate(), Some(plate));
            assert_eq!(spot.motorcycle_count(), 0);

            assert_eq!(spot.release().unwrap(), plate);
            assert_eq!(spot.state(), SpotState::Vacant);
            assert_eq!(spot.plate(), None);
        }
    }
}

#[test]
fn test_occupy_taken_spot_is_illegal() {
    let mut spot = car_spot();
    spot.occupy("ABC123".to_string()).unwrap();

    assert_eq!(
        spot.occupy("XYZ789".to_string()),
        Err(ParkingError::IllegalTransition {
            spot: SpotId(123),
            state: SpotState::Occupied,
            action: "occupy",
        })
    );
    assert_eq!(spot.plate(), Some("ABC123"));
}

#[test]
fn test_release_vacant_spot_is_illegal() {
    let mut spot = ParkingSpot::new(SpotId(5), 1.0, SpotCategory::Commercial);
    assert!(matches!(
        spot.release(),
        Err(ParkingError::IllegalTransition {
            state: SpotState::Vacant,
            ..
        })
    ));
}

#[test]
fn test_two_motorcycles_share_a_car_spot() {
    let mut spot = car_spot();

    assert_eq!(
        spot.occupy_with_motorcycle("Y00000".to_string()),
        Ok(SpotState::HalfOccupied)
    );
    assert!(spot.is_occupied());
    assert_eq!(spot.motorcycle_plates(), [Some("Y00000"), None]);
    assert_eq!(spot.plate(), None);

    assert_eq!(
        spot.occupy_with_motorcycle("Y12345".to_string()),
        Ok(SpotState::FullyShared)
    );
    assert_eq!(spot.motorcycle_plates(), [Some("Y00000"), Some("Y12345")]);
    assert_eq!(spot.motorcycle_count(), 2);

    assert!(matches!(
        spot.occupy_with_motorcycle("Y99999".to_string()),
        Err(ParkingError::IllegalTransition {
            state: SpotState::FullyShared,
            ..
        })
    ));
}

#[test]
fn test_motorcycle_refills_first_slot() {
    let mut spot = car_spot();
    spot.occupy_with_motorcycle("Y00000".to_string()).unwrap();
    spot.occupy_with_motorcycle("Y12345".to_string()).unwrap();
    spot.release_motorcycle("Y00000").unwrap();

    spot.occupy_with_motorcycle("Y34245".to_string()).unwrap();
    assert_eq!(spot.motorcycle_plates(), [Some("Y34245"), Some("Y12345")]);
}

#[test]
fn test_release_motorcycle_from_either_slot() {
    let mut first = car_spot();
    first.occupy_with_motorcycle("Y00000".to_string()).unwrap();
    first.occupy_with_motorcycle("Y12345".to_string()).unwrap();
    assert_eq!(first.release_motorcycle("Y00000"), Ok(SpotState::HalfOccupied));
    assert_eq!(first.motorcycle_plates(), [None, Some("Y12345")]);

    let mut second = car_spot();
    second.occupy_with_motorcycle("Y00000".to_string()).unwrap();
    second.occupy_with_motorcycle("Y12345".to_string()).unwrap();
    assert_eq!(second.release_motorcycle("Y12345"), Ok(SpotState::HalfOccupied));
    assert_eq!(second.motorcycle_plates(), [Some("Y00000"), None]);

    assert_eq!(second.release_motorcycle("Y00000"), Ok(SpotState::Vacant));
    assert_eq!(second.motorcycle_count(), 0);
    assert!(!second.is_occupied());
}

#[test]
fn test_release_motorcycle_with_unknown_plate() {
    let mut spot = car_spot();
    spot.occupy_with_motorcycle("Y00000".to_string()).unwrap();

    assert_eq!(
        spot.release_motorcycle("Z11111"),
        Err(ParkingError::PlateNotFound {
            spot: SpotId(123),
            plate: "Z11111".to_string(),
        })
    );
    assert_eq!(spot.state(), SpotState::HalfOccupied);
}

#[test]
fn test_car_and_motorcycles_never_mix() {
    let mut spot = car_spot();
    spot.occupy("ABC123".to_string()).unwrap();
    assert!(spot.occupy_with_motorcycle("Y00000".to_string()).is_err());

    let mut shared = car_spot();
    shared.occupy_with_motorcycle("Y00000".to_string()).unwrap();
    assert!(shared.occupy("ABC123".to_string()).is_err());
    assert!(shared.release().is_err());
    assert_eq!(shared.motorcycle_plates(), [Some("Y00000"), None]);
}

#[test]
fn test_only_car_spots_take_motorcycles() {
    let mut spot = ParkingSpot::new(SpotId(1), 3.0, SpotCategory::Motorcycle);
    assert!(spot.occupy_with_motorcycle("Y00000".to_string()).is_err());
    assert!(matches!(
        spot.release_motorcycle("Y00000"),
        Err(ParkingError::PlateNotFound { .. })
    ));
    assert_eq!(spot.state(), SpotState::Vacant);
}

#[test]
fn test_holds_plate_checks_every_slot() {
    let mut spot = car_spot();
    spot.occupy_with_motorcycle("Y00000".to_string()).unwrap();
    spot.occupy_with_motorcycle("Y12345".to_string()).unwrap();

    assert!(spot.holds_plate("Y00000"));
    assert!(spot.holds_plate("Y12345"));
    assert!(!spot.holds_plate("ABC123"));
    assert_eq!(spot.plates(), vec!["Y00000", "Y12345"]);
}

#[test]
fn test_plate_formatting() {
    assert_eq!(format_plate("abc-123"), "ABC123");
    assert_eq!(format_plate(" y 0 0 0 0 0 "), "Y00000");
    assert_eq!(validate_plate("ab 12c"), Ok("AB12C".to_string()));
    assert_eq!(validate_plate("abcd-123"), Ok("ABCD123".to_string()));

    assert_eq!(
        validate_plate("ab-1"),
        Err(ParkingError::InvalidPlate {
            raw: "ab-1".to_string(),
            formatted: "AB1".to_string(),
        })
    );
    assert!(validate_plate("ABCD1234").is_err());
    assert!(validate_plate("!!!!!!").is_err());
}
