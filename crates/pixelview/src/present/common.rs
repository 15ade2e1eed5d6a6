//! Shared helpers for the presentation path.

/// Runs `create` under a wgpu validation error scope.
///
/// wgpu reports rejected resource creation through error scopes rather than
/// return values; this wraps one creation call and surfaces the validation
/// message, if any, as an `Err`. The created object must not be used when
/// an error is returned.
pub(super) fn validation_scope<T>(
    device: &wgpu::Device,
    create: impl FnOnce() -> T,
) -> Result<T, String> {
    let guard = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    match pollster::block_on(guard.pop()) {
        None => Ok(value),
        Some(err) => Err(err.to_string()),
    }
}
