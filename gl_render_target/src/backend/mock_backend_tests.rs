/// Unit tests for MockBackend and its format tables.

use super::*;

// ============================================================================
// MockFormats Tests
// ============================================================================

#[test]
fn test_mock_render_format_exact_matches() {
    let caps = MockCaps::default();
    assert_eq!(MockFormats.render_format(InternalFormat::RGBA8, &caps), MockFormat::A8R8G8B8);
    assert_eq!(MockFormats.render_format(InternalFormat::RGB8, &caps), MockFormat::X8R8G8B8);
    assert_eq!(MockFormats.render_format(InternalFormat::DEPTH24_STENCIL8, &caps), MockFormat::D24S8);
}

#[test]
fn test_mock_render_format_substitutes_without_rgb8() {
    let caps = MockCaps { supports_rgb8: false };
    let native = MockFormats.render_format(InternalFormat::RGB8, &caps);
    assert_eq!(native, MockFormat::A8R8G8B8);
    assert_eq!(MockFormats.internal_format(native), InternalFormat::RGBA8);
}

#[test]
fn test_mock_unknown_format_maps_to_none() {
    let caps = MockCaps::default();
    let native = MockFormats.render_format(InternalFormat::R11F_G11F_B10F, &caps);
    assert_eq!(native, MockFormat::UNKNOWN);
    assert_eq!(MockFormats.internal_format(native), InternalFormat::NONE);
}

#[test]
fn test_mock_multisample_round_trip() {
    assert_eq!(MockFormats.multisample(0), MockMultisample(0));
    assert_eq!(MockFormats.multisample(1), MockMultisample(0));
    assert_eq!(MockFormats.multisample(4), MockMultisample(4));
    assert_eq!(MockFormats.sample_count(MockMultisample(0)), 0);
    assert_eq!(MockFormats.sample_count(MockMultisample(8)), 8);
}

// ============================================================================
// MockBackend Tests
// ============================================================================

#[test]
fn test_mock_nearest_samples_rounds_up() {
    let backend = MockBackend::new();
    assert_eq!(backend.nearest_supported_samples(MockFormat::A8R8G8B8, 0), Some(0));
    assert_eq!(backend.nearest_supported_samples(MockFormat::A8R8G8B8, 3), Some(4));
    assert_eq!(backend.nearest_supported_samples(MockFormat::A8R8G8B8, 8), Some(8));
    assert_eq!(backend.nearest_supported_samples(MockFormat::A8R8G8B8, 16), None);
}

#[test]
fn test_mock_nearest_samples_unknown_format_is_sentinel() {
    let backend = MockBackend::new();
    assert_eq!(backend.nearest_supported_samples(MockFormat::UNKNOWN, 0), None);

    let backend = MockBackend::new().without_format(MockFormat::D24S8);
    assert_eq!(backend.nearest_supported_samples(MockFormat::D24S8, 0), None);
}

#[test]
fn test_mock_create_records_calls() {
    let backend = MockBackend::new();
    let surface = backend
        .create_color_surface(64, 32, MockFormat::A8R8G8B8, MockMultisample(0))
        .unwrap();

    assert_eq!(surface.width, 64);
    assert_eq!(surface.height, 32);
    assert_eq!(backend.creation_count(), 1);
    assert_eq!(backend.device().surfaces_created(), 1);
    assert_eq!(
        backend.calls(),
        vec![MockCall::CreateColorSurface {
            width: 64,
            height: 32,
            format: MockFormat::A8R8G8B8,
            multisample: MockMultisample(0),
        }]
    );
}

#[test]
fn test_mock_injected_failure_applies_once() {
    let backend = MockBackend::new();
    backend.fail_next_create(MockError::OutOfVideoMemory);

    let first = backend.create_depth_stencil_surface(16, 16, MockFormat::D24S8, MockMultisample(0));
    let second = backend.create_depth_stencil_surface(16, 16, MockFormat::D24S8, MockMultisample(0));

    assert_eq!(first.unwrap_err(), MockError::OutOfVideoMemory);
    assert!(second.is_ok());
    assert_eq!(backend.creation_count(), 2);
    assert_eq!(backend.device().surfaces_created(), 1);
}

#[test]
fn test_mock_error_classification() {
    assert!(MockError::OutOfVideoMemory.is_out_of_memory());
    assert!(MockError::OutOfMemory.is_out_of_memory());
    assert!(!MockError::InvalidCall.is_out_of_memory());
}

#[test]
fn test_mock_describe_external_surface() {
    let backend = MockBackend::new();
    let surface = MockBackend::external_surface(512, 256, MockFormat::R5G6B5, 4);
    let desc = backend.describe_surface(&surface);

    assert_eq!(desc.width, 512);
    assert_eq!(desc.height, 256);
    assert_eq!(desc.format, MockFormat::R5G6B5);
    assert_eq!(desc.multisample, MockMultisample(4));
    assert_eq!(backend.calls(), vec![MockCall::DescribeSurface]);
}
