use crate::{
    CaptureResult, CapturedCoordinatePair, Corner, DraftField, Point, Region, RegionDraft,
    RegionId, ScreenshotResponse, ValidationError, parse_coordinate,
};

/// WHAT: Coordinate input parses like a numeric form field
/// WHY: Unreadable input must become zero instead of an error
#[test]
fn given_raw_inputs_when_parsing_coordinates_then_leading_integer_or_zero() {
    let cases = [
        ("42", 42),
        ("  17", 17),
        ("-5", -5),
        ("+8", 8),
        ("15px", 15),
        ("3.9", 3),
        ("", 0),
        ("abc", 0),
        ("-", 0),
        ("99999999999", 0),
    ];

    for (input, expected) in cases {
        assert_eq!(parse_coordinate(input), expected, "input {:?}", input);
    }
}

/// WHAT: Points travel as two-element arrays
/// WHY: The backend encodes captured corners as `[x, y]`
#[test]
#[allow(clippy::unwrap_used)]
fn given_backend_coordinate_json_when_decoding_then_points_read() {
    // Given: Coordinates with only the top-left corner set
    let json = r#"{"top_left": [10, 20], "bottom_right": null}"#;

    // When: Decoding
    let pair: CapturedCoordinatePair = serde_json::from_str(json).unwrap();

    // Then: Top-left present, incomplete
    assert_eq!(pair.top_left, Some(Point::new(10, 20)));
    assert_eq!(pair.get(Corner::BottomRight), None);
    assert!(!pair.is_complete());
    assert_eq!(serde_json::to_string(&Point::new(1, 2)).unwrap(), "[1,2]");
}

/// WHAT: A batch entry without success=true becomes a failed result
/// WHY: The backend's message is the user-facing failure text
#[test]
#[allow(clippy::unwrap_used)]
fn given_failed_screenshot_response_when_converting_then_failed_result() {
    // Given: A failed entry as the backend sends it
    let response: ScreenshotResponse =
        serde_json::from_str(r#"{"success": false, "message": "Region is off-screen"}"#).unwrap();

    // When: Converting
    let result = CaptureResult::from(response);

    // Then: Failed with the message and no path
    assert_eq!(
        result,
        CaptureResult::failed(None, "Region is off-screen")
    );
}

/// WHAT: A single-region response without a success flag is a success
/// WHY: That shape only arrives on 2xx responses
#[test]
#[allow(clippy::unwrap_used)]
fn given_response_without_success_flag_when_decoding_then_success() {
    let response: ScreenshotResponse = serde_json::from_str(
        r#"{"message": "saved", "file_path": "./screenshots/price.png", "region_id": "r1"}"#,
    )
    .unwrap();

    let result = CaptureResult::from(response);

    assert!(result.success);
    assert_eq!(result.region_id, Some(RegionId::from("r1")));
    assert_eq!(result.file_path.as_deref(), Some("./screenshots/price.png"));
}

/// WHAT: Draft validation checks the name before the area
/// WHY: The first failing check is the one reported
#[test]
fn given_unnamed_zero_area_draft_when_validating_then_name_required() {
    let mut draft = RegionDraft::default();
    assert_eq!(draft.validate(), Err(ValidationError::NameRequired));

    draft.set_field(DraftField::Name, "price");
    assert_eq!(draft.validate(), Err(ValidationError::ZeroSize));

    draft.set_corner(Corner::BottomRight, Point::new(10, 10));
    assert_eq!(draft.validate(), Ok(()));
}

/// WHAT: Field names parse case-insensitively
/// WHY: The command line accepts `set X1 10`
#[test]
fn given_field_names_when_parsing_then_known_fields_accepted() {
    assert_eq!("x1".parse::<DraftField>(), Ok(DraftField::X1));
    assert_eq!("Y2".parse::<DraftField>(), Ok(DraftField::Y2));
    assert_eq!(" name ".parse::<DraftField>(), Ok(DraftField::Name));
    assert!("z".parse::<DraftField>().is_err());
    assert_eq!(DraftField::Name.corner(), None);
    assert_eq!(DraftField::Y1.corner(), Some(Corner::TopLeft));
}

/// WHAT: Editing a region starts from its stored values
/// WHY: The edit form is pre-filled
#[test]
fn given_region_when_converted_to_draft_then_fields_copied() {
    let region = Region {
        id: RegionId::from("r1"),
        name: "price".to_string(),
        x1: 1,
        y1: 2,
        x2: 3,
        y2: 4,
        created_at: None,
    };

    let draft = RegionDraft::from(region.clone());

    assert_eq!(draft.id, Some(region.id.clone()));
    assert_eq!(draft.coordinates(), (1, 2, 3, 4));
    assert_eq!(draft.payload(), region.payload());
}
