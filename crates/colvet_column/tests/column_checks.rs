use std::sync::Once;

use colvet_column::column::ColumnView;
use colvet_column::compat::{all_have_same_type, ensure_same_type, have_same_type};
use colvet_column::datatype::{ElementType, ExtraTypeInfo, TimeUnit};
use colvet_column::validate::{validate, validate_all, validate_ref, ColumnViolation};
use colvet_error::{ErrorKind, Result, ResultExt};
use pretty_assertions::assert_eq;

static LOGGER: Once = Once::new();

fn init_logger() {
    LOGGER.call_once(|| {
        logutil::configure_test_logger();
    });
}

/// What a binary kernel does before touching column buffers.
fn check_binary_inputs(left: Option<&ColumnView>, right: Option<&ColumnView>) -> Result<()> {
    validate_ref(left).context("left input")?;
    validate_ref(right).context("right input")?;
    // Both are Some at this point.
    if let (Some(left), Some(right)) = (left, right) {
        ensure_same_type(left, right, false)?;
    }
    Ok(())
}

#[test]
fn binary_inputs_ok() {
    init_logger();

    let data = [0u8; 32];
    let validity = [0b1011u8];
    let left = ColumnView::new(ElementType::Int64, &data, 4)
        .with_validity(&validity)
        .with_null_count(1);
    let right = ColumnView::new(ElementType::Int64, &data, 4).with_validity(&validity);

    check_binary_inputs(Some(&left), Some(&right)).unwrap();
}

#[test]
fn binary_inputs_missing_column() {
    init_logger();

    let col = ColumnView::empty(ElementType::Int8);
    let err = check_binary_inputs(Some(&col), None).unwrap_err();

    assert_eq!(ErrorKind::NullReference, err.kind());
    assert_eq!(&["right input".to_string()], err.get_context());
}

#[test]
fn binary_inputs_invalid_before_type_check() {
    init_logger();

    let data = [0u8; 32];
    // Invalid column and a type mismatch. Validation runs first.
    let left = ColumnView::new(ElementType::Int64, &data, 4).with_null_count(9);
    let right = ColumnView::new(ElementType::Float64, &data, 4);

    let err = check_binary_inputs(Some(&left), Some(&right)).unwrap_err();
    assert_eq!(ErrorKind::InvalidColumn, err.kind());
    assert_eq!(&["left input".to_string()], err.get_context());
}

#[test]
fn binary_inputs_mismatched_units() {
    init_logger();

    let data = [0u8; 16];
    let left = ColumnView::new(ElementType::Timestamp, &data, 2).with_time_unit(TimeUnit::Second);
    let right =
        ColumnView::new(ElementType::Timestamp, &data, 2).with_time_unit(TimeUnit::Microsecond);

    let err = check_binary_inputs(Some(&left), Some(&right)).unwrap_err();
    assert_eq!(ErrorKind::TypeMismatch, err.kind());

    assert!(have_same_type(left, right, true));
}

#[test]
fn raw_descriptors_from_producer() {
    init_logger();

    let data = [0u8; 12];
    let validity = [0u8];

    let cases: [(ColumnView, Option<ColumnViolation>); 6] = [
        (
            ColumnView::from_raw_parts(None, 0, 3, None, 0, ExtraTypeInfo::None),
            None,
        ),
        (
            ColumnView::from_raw_parts(Some(&data[..]), 3, 3, None, 0, ExtraTypeInfo::None),
            None,
        ),
        (
            ColumnView::from_raw_parts(None, 1, 3, None, 0, ExtraTypeInfo::None),
            Some(ColumnViolation::MissingData { size: 1 }),
        ),
        (
            ColumnView::from_raw_parts(Some(&data[..]), 3, 0, None, 0, ExtraTypeInfo::None),
            Some(ColumnViolation::InvalidElementType),
        ),
        (
            ColumnView::from_raw_parts(Some(&data[..]), 3, 3, None, 1, ExtraTypeInfo::None),
            Some(ColumnViolation::NullsWithoutValidity { null_count: 1 }),
        ),
        (
            ColumnView::from_raw_parts(
                Some(&data[..]),
                3,
                3,
                Some(&validity[..]),
                4,
                ExtraTypeInfo::None,
            ),
            Some(ColumnViolation::NullCountExceedsSize {
                null_count: 4,
                size: 3,
            }),
        ),
    ];

    for (col, expected) in cases {
        assert_eq!(expected, ColumnViolation::check(&col));
        assert_eq!(expected.is_none(), validate(col).is_ok());
    }
}

#[test]
fn columns_checked_from_many_threads() {
    init_logger();

    let data = vec![0u8; 64];
    let cols: Vec<_> = (0..4)
        .map(|_| ColumnView::new(ElementType::Float32, &data, 16))
        .collect();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    validate_all(&cols).unwrap();
                    all_have_same_type(&cols, false)
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
}
